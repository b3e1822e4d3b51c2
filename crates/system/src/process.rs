use crate::memory;
use pulse_core::ProcessEntry;
use std::cmp::Ordering;
use sysinfo::{Process, ProcessStatus, System, ThreadKind, Users};

/// How many processes the dashboard lists.
pub const TOP_PROCESS_LIMIT: usize = 10;

/// Project every process in `sys`, kernel threads included, into a
/// [`ProcessEntry`].
///
/// `sys` must have had its process list refreshed twice across the CPU
/// window; processes that exited in between are already gone from it.
pub fn entries(sys: &System, users: &Users) -> Vec<ProcessEntry> {
    let total = sys.total_memory();
    sys.processes()
        .values()
        .filter(|p| is_listed(p.thread_kind()))
        .map(|p| entry(p, users, total))
        .collect()
}

/// Per-thread tasks of a userland process repeat their parent; everything
/// else is a process table row.
fn is_listed(kind: Option<ThreadKind>) -> bool {
    !matches!(kind, Some(ThreadKind::Userland))
}

fn entry(process: &Process, users: &Users, total_memory: u64) -> ProcessEntry {
    let username = process
        .user_id()
        .and_then(|uid| users.get_user_by_id(uid))
        .map(|user| user.name().to_string());

    ProcessEntry {
        pid:            process.pid().as_u32(),
        name:           process.name().to_string_lossy().into_owned(),
        username,
        cpu_percent:    process.cpu_usage(),
        memory_percent: memory::percent_of(process.memory(), total_memory),
        status:         status_word(process.status()).to_string(),
    }
}

/// Lowercase scheduler state word.
pub fn status_word(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Run                      => "running",
        ProcessStatus::Sleep                    => "sleeping",
        ProcessStatus::Idle                     => "idle",
        ProcessStatus::Stop                     => "stopped",
        ProcessStatus::Zombie                   => "zombie",
        ProcessStatus::Tracing                  => "tracing-stop",
        ProcessStatus::Dead                     => "dead",
        ProcessStatus::Wakekill                 => "wake-kill",
        ProcessStatus::Waking                   => "waking",
        ProcessStatus::Parked                   => "parked",
        ProcessStatus::LockBlocked              => "locked",
        ProcessStatus::UninterruptibleDiskSleep => "disk-sleep",
        _                                       => "unknown",
    }
}

/// Highest CPU users first, memory share breaking ties; at most `limit`.
///
/// The sort is stable, so fully tied processes keep their input order.
pub fn top_processes(mut processes: Vec<ProcessEntry>, limit: usize) -> Vec<ProcessEntry> {
    processes.sort_by(|a, b| by_usage_desc(a, b));
    processes.truncate(limit);
    processes
}

fn by_usage_desc(a: &ProcessEntry, b: &ProcessEntry) -> Ordering {
    b.cpu_percent
        .total_cmp(&a.cpu_percent)
        .then_with(|| b.memory_percent.total_cmp(&a.memory_percent))
}
