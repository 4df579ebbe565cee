//! Simple profiling guards using thread-local storage
//!
//! Lightweight timing of the per-turn searches without changing function
//! signatures. Enable with environment variable: BATTLESNAKE_PROFILE=1

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Timed categories, in report order
const CATEGORIES: [&str; 5] = [
    "decide",
    "volume",
    "pessimistic_volume",
    "a_star",
    "head_threat",
];

thread_local! {
    static LOCAL_TIME: RefCell<[u64; CATEGORIES.len()]> = RefCell::new([0; CATEGORIES.len()]);
    static LOCAL_COUNT: RefCell<[usize; CATEGORIES.len()]> = RefCell::new([0; CATEGORIES.len()]);
}

// Global aggregators
static GLOBAL_TIME: [AtomicU64; CATEGORIES.len()] = [
    AtomicU64::new(0),
    AtomicU64::new(0),
    AtomicU64::new(0),
    AtomicU64::new(0),
    AtomicU64::new(0),
];
static GLOBAL_COUNT: [AtomicUsize; CATEGORIES.len()] = [
    AtomicUsize::new(0),
    AtomicUsize::new(0),
    AtomicUsize::new(0),
    AtomicUsize::new(0),
    AtomicUsize::new(0),
];

#[inline]
pub fn is_profiling_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("BATTLESNAKE_PROFILE").is_ok())
}

pub struct ProfileGuard {
    start: Instant,
    slot: usize,
}

impl ProfileGuard {
    /// Starts timing `category`; `None` when profiling is off or the
    /// category is unknown
    pub fn new(category: &'static str) -> Option<Self> {
        if !is_profiling_enabled() {
            return None;
        }
        CATEGORIES
            .iter()
            .position(|c| *c == category)
            .map(|slot| ProfileGuard {
                start: Instant::now(),
                slot,
            })
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;
        LOCAL_TIME.with(|t| t.borrow_mut()[self.slot] += elapsed_ns);
        LOCAL_COUNT.with(|c| c.borrow_mut()[self.slot] += 1);
    }
}

/// Folds this thread's counters into the global totals
pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    LOCAL_TIME.with(|t| {
        let mut t = t.borrow_mut();
        for (slot, value) in t.iter_mut().enumerate() {
            GLOBAL_TIME[slot].fetch_add(*value, Ordering::Relaxed);
            *value = 0;
        }
    });
    LOCAL_COUNT.with(|c| {
        let mut c = c.borrow_mut();
        for (slot, value) in c.iter_mut().enumerate() {
            GLOBAL_COUNT[slot].fetch_add(*value, Ordering::Relaxed);
            *value = 0;
        }
    });
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    for (slot, name) in CATEGORIES.iter().enumerate() {
        let time = GLOBAL_TIME[slot].load(Ordering::Relaxed);
        let count = GLOBAL_COUNT[slot].load(Ordering::Relaxed);
        let ms = time as f64 / 1_000_000.0;
        let pct = if total_ns > 0 { 100.0 * time as f64 / total_ns as f64 } else { 0.0 };
        let avg_us = if count > 0 { time as f64 / (count * 1000) as f64 } else { 0.0 };

        eprintln!("{:<20} {:>10.2}ms ({:>5.1}%) - {} calls, {:.2}µs avg",
            name, ms, pct, count, avg_us);
    }

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::simple_profiler::ProfileGuard::new($category);
        $code
    }};
}
