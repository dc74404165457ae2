/// Append-only sample sequence in frame order.
///
/// Each sample remembers the frame tick it was taken on, so gaps left by
/// skipped frames can be recovered later. Single producer; estimation
/// always works on a [`snapshot`](Self::snapshot) copy.
#[derive(Clone, Debug)]
pub struct SignalBuffer {
    samples: Vec<f64>,
    ticks: Vec<usize>,
    sampling_rate: f64,
}

impl SignalBuffer {
    pub fn new(sampling_rate: f64) -> Self {
        Self {
            samples: Vec::new(),
            ticks: Vec::new(),
            sampling_rate,
        }
    }

    /// Append a sample taken on the frame after the previous one.
    pub fn append(&mut self, sample: f64) {
        let tick = self.ticks.last().map_or(0, |&t| t + 1);
        self.append_at(sample, tick);
    }

    /// Append a sample taken on frame `tick`. Ticks must increase.
    pub fn append_at(&mut self, sample: f64, tick: usize) {
        debug_assert!(self.ticks.last().map_or(true, |&t| tick > t));
        self.samples.push(sample);
        self.ticks.push(tick);
    }

    /// Owned copy of all samples, in insertion order.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.clone()
    }

    /// Owned copy of the most recent `n` samples (all of them if fewer).
    pub fn latest(&self, n: usize) -> Vec<f64> {
        let start = self.samples.len().saturating_sub(n);
        self.samples[start..].to_vec()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn ticks(&self) -> &[usize] {
        &self.ticks
    }

    /// Capture time of each sample in seconds, from its frame tick.
    pub fn timestamps(&self) -> Vec<f64> {
        self.ticks
            .iter()
            .map(|&t| t as f64 / self.sampling_rate)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Seconds of signal held, assuming one sample per frame.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate
    }
}
