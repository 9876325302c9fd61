use crate::probe::{LatencyX100, ProbeResult};

/// Latency samples of one configuration. Only batches where every request
/// returned 200 are accepted into the average.
#[derive(Debug, Clone, Default)]
pub(crate) struct SampleStats {
    samples: usize,
    accepted: Vec<LatencyX100>,
}

impl SampleStats {
    /// Returns whether the sample was accepted.
    pub(crate) fn record(&mut self, result: &ProbeResult) -> bool {
        self.samples = self.samples.saturating_add(1);
        if result.all_succeeded() {
            self.accepted.push(result.latency());
            true
        } else {
            false
        }
    }

    pub(crate) const fn samples(&self) -> usize {
        self.samples
    }

    pub(crate) const fn accepted(&self) -> usize {
        self.accepted.len()
    }

    /// Mean of the accepted samples, rounded half-up.
    pub(crate) fn average(&self) -> Option<LatencyX100> {
        let count = u64::try_from(self.accepted.len()).ok()?;
        let total = self
            .accepted
            .iter()
            .try_fold(0_u64, |acc, latency| acc.checked_add(latency.centis()))?;
        let doubled = total.checked_mul(2)?.checked_add(count)?;
        let centis = doubled.checked_div(count.checked_mul(2)?)?;
        Some(LatencyX100::from_centis(centis))
    }

    pub(crate) fn min(&self) -> Option<LatencyX100> {
        self.accepted.iter().min().copied()
    }

    pub(crate) fn max(&self) -> Option<LatencyX100> {
        self.accepted.iter().max().copied()
    }
}
