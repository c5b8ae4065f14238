//! The two per-node caches from §3/§4.5: the measure cache (keyed by the
//! four measure-callback inputs) and the sizing cache (keyed by the two
//! available dimensions, populated by the intrinsic measurer).

use arrayvec::ArrayVec;

use crate::style::MeasureMode;
use crate::sys::{nan_aware_eq, MEASURE_CACHE_SIZE, SIZING_CACHE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
struct MeasureKey {
    avail_w: f64,
    w_mode: MeasureMode,
    avail_h: f64,
    h_mode: MeasureMode,
}

impl MeasureKey {
    fn matches(&self, other: &MeasureKey) -> bool {
        self.w_mode == other.w_mode
            && self.h_mode == other.h_mode
            && nan_aware_eq(self.avail_w, other.avail_w)
            && nan_aware_eq(self.avail_h, other.avail_h)
    }
}

#[derive(Debug, Clone, Copy)]
struct MeasureEntry {
    key: MeasureKey,
    result: (f64, f64),
}

/// Small fixed-capacity (4) bounded LRU, lazily allocated, rotating
/// oldest-out on insert (§4.5 F4). A hit returns the stable stored result
/// rather than a fresh copy, matching §4.5's "pointer/reference to a
/// node-stable result record" wording as closely as an owned `(f64, f64)`
/// tuple allows — callers read it by reference via `get`.
#[derive(Debug, Default)]
pub struct MeasureCache {
    entries: ArrayVec<MeasureEntry, MEASURE_CACHE_SIZE>,
    next_slot: usize,
    pub call_count: u64,
    pub hit_count: u64,
}

impl MeasureCache {
    pub fn get(
        &mut self,
        avail_w: f64,
        w_mode: MeasureMode,
        avail_h: f64,
        h_mode: MeasureMode,
    ) -> Option<(f64, f64)> {
        self.call_count += 1;
        let key = MeasureKey { avail_w, w_mode, avail_h, h_mode };
        for entry in self.entries.iter() {
            if entry.key.matches(&key) {
                self.hit_count += 1;
                return Some(entry.result);
            }
        }
        None
    }

    pub fn insert(
        &mut self,
        avail_w: f64,
        w_mode: MeasureMode,
        avail_h: f64,
        h_mode: MeasureMode,
        result: (f64, f64),
    ) {
        let key = MeasureKey { avail_w, w_mode, avail_h, h_mode };
        let entry = MeasureEntry { key, result };
        if self.entries.len() < MEASURE_CACHE_SIZE {
            self.entries.push(entry);
        } else {
            self.entries[self.next_slot] = entry;
        }
        self.next_slot = (self.next_slot + 1) % MEASURE_CACHE_SIZE;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_slot = 0;
    }
}

#[derive(Debug, Clone, Copy)]
struct SizingEntry {
    avail_w: f64,
    avail_h: f64,
    result: (f64, f64),
}

/// Small fixed-capacity (2) cache keyed by `(available_w, available_h)`,
/// populated during intrinsic-sizing recursions (§3 "Sizing cache"). Entries
/// are invalidated by truncating the `ArrayVec` to empty, never by a NaN
/// sentinel, because NaN is itself a legitimate key (§4.5 F1).
#[derive(Debug, Default)]
pub struct SizingCache {
    entries: ArrayVec<SizingEntry, SIZING_CACHE_SIZE>,
    next_slot: usize,
}

impl SizingCache {
    pub fn get(&self, avail_w: f64, avail_h: f64) -> Option<(f64, f64)> {
        for entry in self.entries.iter() {
            if nan_aware_eq(entry.avail_w, avail_w) && nan_aware_eq(entry.avail_h, avail_h) {
                return Some(entry.result);
            }
        }
        None
    }

    pub fn insert(&mut self, avail_w: f64, avail_h: f64, result: (f64, f64)) {
        let entry = SizingEntry { avail_w, avail_h, result };
        if self.entries.len() < SIZING_CACHE_SIZE {
            self.entries.push(entry);
        } else {
            self.entries[self.next_slot] = entry;
        }
        self.next_slot = (self.next_slot + 1) % SIZING_CACHE_SIZE;
    }

    /// Invalidate every slot (not free it) — called at the start of every
    /// root `calculate_layout` (§4.5).
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.next_slot = 0;
    }
}
