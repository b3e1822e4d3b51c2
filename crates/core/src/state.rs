use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::IpAddr;

/// Bytes per GiB, as a float for unit conversion.
pub const GIB: f64 = (1u64 << 30) as f64;
/// Bytes per MiB, as a float for unit conversion.
pub const MIB: f64 = (1u64 << 20) as f64;

/// The scalar readings tracked over time by the history store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSample {
    /// Global CPU usage (0.0 – 100.0) over the sampling window.
    pub cpu_percent: f32,
    /// RAM in use, GiB.
    pub ram_used_gb: f64,
    /// RAM available to new allocations, GiB.
    pub ram_free_gb: f64,
    /// Cumulative bytes sent on all interfaces, MiB.
    pub network_sent_mb: f64,
    /// Cumulative bytes received on all interfaces, MiB.
    pub network_recv_mb: f64,
}

/// One network point of the history, both directions in MiB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkPoint {
    pub sent: f64,
    pub recv: f64,
}

/// Point-in-time copy of every history series, oldest value first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryView {
    pub ram: Vec<f64>,
    pub cpu: Vec<f32>,
    pub network: Vec<NetworkPoint>,
}

impl HistoryView {
    /// Chart x-axis labels: plain positions `0..len`.
    #[must_use]
    pub fn labels(&self) -> Vec<usize> {
        (0..self.ram.len()).collect()
    }
}

/// Who the host is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostIdentity {
    pub hostname: String,
    /// Primary local address; `None` when it could not be determined.
    pub ip: Option<IpAddr>,
    /// `"<system name> <kernel release>"`, e.g. `"Linux 6.8.0"`.
    pub os: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    #[default]
    Online,
}

/// Physical memory, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

/// Swap space, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SwapUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

impl SwapUsage {
    pub fn new(total: u64, used: u64) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            (used as f64 / total as f64 * 100.0) as f32
        };
        Self {
            total,
            used,
            free: total.saturating_sub(used),
            percent,
        }
    }
}

/// Usage of one mounted partition, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    pub used: u64,
    pub free: u64,
    pub total: u64,
}

/// Cumulative interface counters since boot, summed over all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkTotals {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// 1, 5 and 15 minute load averages. Serialized as a three-element array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(into = "[f64; 3]")]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

impl From<LoadAverage> for [f64; 3] {
    fn from(load: LoadAverage) -> Self {
        [load.one, load.five, load.fifteen]
    }
}

/// CPU temperature reading.
///
/// On the wire this is either a number (°C) or the string `"N/A"`, which is
/// what the dashboard page expects.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Temperature {
    Celsius(f32),
    #[default]
    Unavailable,
}

impl Serialize for Temperature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Celsius(c) => serializer.serialize_f32(*c),
            Self::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Time since boot in whole seconds.
///
/// Displays as `H:MM:SS`, with a `"N day(s), "` prefix past 24 hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uptime(pub u64);

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs  = self.0 % 60;
        let mins  = (self.0 / 60) % 60;
        let hours = (self.0 / 3600) % 24;
        let days  = self.0 / 86_400;

        match days {
            0 => {}
            1 => write!(f, "1 day, ")?,
            n => write!(f, "{n} days, ")?,
        }
        write!(f, "{hours}:{mins:02}:{secs:02}")
    }
}

impl Serialize for Uptime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Lightweight projection of one OS process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    /// Owner's login name; `None` when it cannot be resolved.
    pub username: Option<String>,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    /// Lowercase scheduler state, e.g. `"running"`, `"sleeping"`.
    pub status: String,
}

/// Full point-in-time host state produced by one sampler call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub identity: HostIdentity,
    pub status: HostStatus,
    pub uptime: Uptime,
    pub temperature: Temperature,
    pub load_avg: LoadAverage,
    pub memory: MemoryUsage,
    pub swap: SwapUsage,
    /// Usage per partition, keyed by device path, in enumeration order.
    pub disks: IndexMap<String, DiskUsage>,
    pub network: NetworkTotals,
    /// Logical CPU count.
    pub cpu_count: usize,
    /// Global CPU usage (0.0 – 100.0) over the sampling window.
    pub cpu_percent: f32,
    /// Every process seen in the sampling window, unordered.
    pub processes: Vec<ProcessEntry>,
}

impl HostSnapshot {
    /// Extract the scalars the history store tracks.
    #[must_use]
    pub fn metric_sample(&self) -> MetricSample {
        MetricSample {
            cpu_percent:     self.cpu_percent,
            ram_used_gb:     self.memory.used as f64 / GIB,
            ram_free_gb:     self.memory.available as f64 / GIB,
            network_sent_mb: self.network.bytes_sent as f64 / MIB,
            network_recv_mb: self.network.bytes_recv as f64 / MIB,
        }
    }
}
