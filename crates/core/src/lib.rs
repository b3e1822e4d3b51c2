pub mod error;
pub mod payload;
pub mod state;

pub use error::{PulseError, Result};
pub use payload::{DataResponse, DiskEntry, ServerData};
pub use state::{
    DiskUsage, HistoryView, HostIdentity, HostSnapshot, HostStatus, LoadAverage, MemoryUsage,
    MetricSample, NetworkPoint, NetworkTotals, ProcessEntry, SwapUsage, Temperature, Uptime,
};
