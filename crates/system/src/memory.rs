use pulse_core::{MemoryUsage, SwapUsage};
use sysinfo::System;

/// Physical memory in bytes; "available" is what new allocations can use
/// without swapping.
pub fn memory(sys: &System) -> MemoryUsage {
    let total = sys.total_memory();
    let available = sys.available_memory().min(total);
    MemoryUsage {
        total,
        used: sys.used_memory().min(total),
        available,
    }
}

pub fn swap(sys: &System) -> SwapUsage {
    SwapUsage::new(sys.total_swap(), sys.used_swap())
}

/// Share of physical memory held by `rss` bytes, in percent.
pub fn percent_of(rss: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (rss as f64 / total as f64 * 100.0) as f32
}
