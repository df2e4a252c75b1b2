/// Counters for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub comparisons: u64,
    pub swaps: u64,
}

impl Metrics {
    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    pub fn reset(&mut self) {
        *self = Metrics::default();
    }
}
