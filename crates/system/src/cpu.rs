use pulse_core::LoadAverage;
use std::time::Duration;
use sysinfo::System;

/// Window over which CPU usage (host and per-process) is measured.
///
/// Every sample blocks the calling thread for this long; it is the only
/// suspension point in a sample.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Global CPU usage in percent, clamped to `0.0 ..= 100.0`.
///
/// Only meaningful after two CPU refreshes separated by [`CPU_SAMPLE_WINDOW`].
pub fn global_usage(sys: &System) -> f32 {
    let usage = sys.global_cpu_usage();
    if usage.is_finite() {
        usage.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// 1/5/15-minute load averages, or all zeros where the platform has none.
pub fn load_average() -> LoadAverage {
    if cfg!(windows) {
        return LoadAverage::default();
    }

    let load = System::load_average();
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    LoadAverage {
        one:     finite(load.one),
        five:    finite(load.five),
        fifteen: finite(load.fifteen),
    }
}
