//! Wire shape of the `/data` response consumed by the dashboard page.

use crate::state::{
    DiskUsage, HostStatus, LoadAverage, NetworkPoint, ProcessEntry, SwapUsage, Temperature,
    Uptime, GIB,
};
use serde::Serialize;
use std::net::IpAddr;

/// Top-level `/data` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResponse {
    pub labels: Vec<usize>,
    /// Always exactly one entry: the local host.
    pub servers: Vec<ServerData>,
    /// Top processes by CPU then memory, highest first.
    pub processes: Vec<ProcessEntry>,
}

/// Per-host block of the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerData {
    pub name: String,
    pub ip: Option<IpAddr>,
    pub os: String,
    pub status: HostStatus,
    pub cpu_count: usize,
    pub labels: Vec<usize>,
    /// RAM used history, GiB.
    pub ram: Vec<f64>,
    /// RAM currently available, GiB.
    pub ram_free: f64,
    /// Installed RAM, GiB.
    pub ram_total: f64,
    /// CPU usage history, percent.
    pub cpu: Vec<f32>,
    /// Cumulative network counter history, MiB.
    pub network: Vec<NetworkPoint>,
    pub disk_usage: Vec<DiskEntry>,
    pub swap: SwapUsage,
    pub load_avg: LoadAverage,
    pub uptime: Uptime,
    pub temperature: Temperature,
}

/// Disk usage of one device, in GiB.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskEntry {
    /// Device path, e.g. `/dev/sda1`.
    pub device: String,
    pub used: f64,
    pub free: f64,
    pub total: f64,
}

impl DiskEntry {
    pub fn new(device: impl Into<String>, usage: DiskUsage) -> Self {
        Self {
            device: device.into(),
            used:   usage.used as f64 / GIB,
            free:   usage.free as f64 / GIB,
            total:  usage.total as f64 / GIB,
        }
    }
}
