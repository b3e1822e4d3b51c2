use crate::{cpu, disk, host, memory, network, process, temperature};
use parking_lot::Mutex;
use pulse_core::{HostSnapshot, HostStatus, Result};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users};
use tracing::debug;

/// Reads a full [`HostSnapshot`] from the operating system.
///
/// Implementations block: a real sample spends [`cpu::CPU_SAMPLE_WINDOW`]
/// measuring CPU usage. Call from a blocking-capable thread.
pub trait Sampler: Send + Sync + 'static {
    fn sample(&self) -> Result<HostSnapshot>;
}

/// [`Sampler`] backed by `sysinfo`.
///
/// The `System` handle is reused between samples and held for the whole
/// window, so concurrent callers take turns.
pub struct SysinfoSampler {
    sys: Mutex<System>,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn refresh(sys: &mut System) {
    sys.refresh_cpu_usage();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing()
            .with_cpu()
            .with_memory()
            .with_user(UpdateKind::OnlyIfNotSet),
    );
}

impl Sampler for SysinfoSampler {
    fn sample(&self) -> Result<HostSnapshot> {
        let mut sys = self.sys.lock();

        // Two refreshes one window apart: host and per-process CPU usage are
        // both deltas between them.
        refresh(&mut sys);
        std::thread::sleep(cpu::CPU_SAMPLE_WINDOW);
        refresh(&mut sys);
        sys.refresh_memory();

        let cpu_percent = cpu::global_usage(&sys);
        let disks = disk::usage_map(&disk::partitions(), disk::measure)?;
        let users = Users::new_with_refreshed_list();
        let processes = process::entries(&sys, &users);

        let snapshot = HostSnapshot {
            identity:    host::identity(),
            status:      HostStatus::Online,
            uptime:      host::uptime(),
            temperature: temperature::read(),
            load_avg:    cpu::load_average(),
            memory:      memory::memory(&sys),
            swap:        memory::swap(&sys),
            disks,
            network:     network::totals(),
            cpu_count:   sys.cpus().len(),
            cpu_percent,
            processes,
        };

        debug!(
            cpu = snapshot.cpu_percent,
            ram_used = snapshot.memory.used,
            disks = snapshot.disks.len(),
            processes = snapshot.processes.len(),
            "Sampled host"
        );

        Ok(snapshot)
    }
}
