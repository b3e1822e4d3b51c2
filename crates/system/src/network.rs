use pulse_core::NetworkTotals;
use sysinfo::Networks;

/// Cumulative byte counters since boot, summed over every interface.
pub fn totals() -> NetworkTotals {
    let networks = Networks::new_with_refreshed_list();
    NetworkTotals {
        bytes_sent: networks.iter().map(|(_, d)| d.total_transmitted()).sum(),
        bytes_recv: networks.iter().map(|(_, d)| d.total_received()).sum(),
    }
}
