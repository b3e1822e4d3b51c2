use parking_lot::Mutex;
use pulse_core::{HistoryView, MetricSample, NetworkPoint};
use std::collections::VecDeque;

/// Number of samples each history series retains.
pub const HISTORY_CAPACITY: usize = 20;

/// Bounded FIFO of samples; the oldest value is evicted first.
#[derive(Debug, Clone)]
pub struct Series<T> {
    samples:  VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> Series<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples:  VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest while at capacity.
    pub fn push(&mut self, value: T) {
        while self.samples.len() >= self.capacity.max(1) {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copy of the retained samples, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }
}

#[derive(Debug)]
struct Tracked {
    ram:     Series<f64>,
    cpu:     Series<f32>,
    network: Series<NetworkPoint>,
}

/// Rolling RAM, CPU and network history shared by every request.
///
/// All three series sit behind one lock, so a `record` is a single atomic
/// append-and-evict and a `snapshot` never sees the series out of step.
#[derive(Debug)]
pub struct HistoryStore {
    series: Mutex<Tracked>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            series: Mutex::new(Tracked {
                ram:     Series::new(HISTORY_CAPACITY),
                cpu:     Series::new(HISTORY_CAPACITY),
                network: Series::new(HISTORY_CAPACITY),
            }),
        }
    }

    /// Append one sample to every series.
    pub fn record(&self, sample: MetricSample) {
        let mut series = self.series.lock();
        series.ram.push(sample.ram_used_gb);
        series.cpu.push(sample.cpu_percent);
        series.network.push(NetworkPoint {
            sent: sample.network_sent_mb,
            recv: sample.network_recv_mb,
        });
    }

    /// Consistent copy of all series.
    pub fn snapshot(&self) -> HistoryView {
        let series = self.series.lock();
        HistoryView {
            ram:     series.ram.to_vec(),
            cpu:     series.cpu.to_vec(),
            network: series.network.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.series.lock().ram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.lock().ram.is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
