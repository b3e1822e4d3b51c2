//! Host metrics sampling, rolling history and `/data` payload assembly.

pub mod builder;
pub mod cpu;
pub mod disk;
pub mod history;
pub mod host;
pub mod memory;
pub mod network;
pub mod process;
pub mod sampler;
pub mod temperature;

pub use builder::{assemble, SnapshotBuilder};
pub use cpu::CPU_SAMPLE_WINDOW;
pub use history::{HistoryStore, Series, HISTORY_CAPACITY};
pub use process::{top_processes, TOP_PROCESS_LIMIT};
pub use sampler::{Sampler, SysinfoSampler};
