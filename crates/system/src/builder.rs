use crate::history::HistoryStore;
use crate::process::{top_processes, TOP_PROCESS_LIMIT};
use crate::sampler::Sampler;
use pulse_core::{
    state::GIB, DataResponse, DiskEntry, HistoryView, HostSnapshot, PulseError, Result,
    ServerData,
};
use std::sync::Arc;

/// Turns one sample plus the rolling history into a `/data` payload.
///
/// Every build records into the history, so repeated calls rotate it.
pub struct SnapshotBuilder {
    sampler: Arc<dyn Sampler>,
    history: Arc<HistoryStore>,
}

impl SnapshotBuilder {
    pub fn new(sampler: Arc<dyn Sampler>) -> Self {
        Self {
            sampler,
            history: Arc::new(HistoryStore::new()),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Sample the host on the blocking pool, record it and assemble the payload.
    ///
    /// Sampling and recording run together on the blocking task, so a caller
    /// that gives up mid-window still leaves the sample in the history. A
    /// failed sample records nothing.
    pub async fn build_response(&self) -> Result<DataResponse> {
        let sampler = Arc::clone(&self.sampler);
        let history = Arc::clone(&self.history);
        let (host, view) = tokio::task::spawn_blocking(move || {
            let host = sampler.sample()?;
            history.record(host.metric_sample());
            Ok::<_, PulseError>((host, history.snapshot()))
        })
        .await
        .map_err(|e| PulseError::Sampler(e.to_string()))??;

        Ok(assemble(host, view))
    }
}

/// Merge a host sample with a history view.
pub fn assemble(host: HostSnapshot, history: HistoryView) -> DataResponse {
    let labels = history.labels();
    let ram_free = host.metric_sample().ram_free_gb;
    let ram_total = host.memory.total as f64 / GIB;

    let server = ServerData {
        name:        host.identity.hostname,
        ip:          host.identity.ip,
        os:          host.identity.os,
        status:      host.status,
        cpu_count:   host.cpu_count,
        labels:      labels.clone(),
        ram:         history.ram,
        ram_free,
        ram_total,
        cpu:         history.cpu,
        network:     history.network,
        disk_usage:  host
            .disks
            .into_iter()
            .map(|(device, usage)| DiskEntry::new(device, usage))
            .collect(),
        swap:        host.swap,
        load_avg:    host.load_avg,
        uptime:      host.uptime,
        temperature: host.temperature,
    };

    DataResponse {
        labels,
        servers: vec![server],
        processes: top_processes(host.processes, TOP_PROCESS_LIMIT),
    }
}
