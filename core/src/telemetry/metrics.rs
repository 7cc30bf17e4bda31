use serde::Serialize;

/// Counters for controller transitions.
#[derive(Debug, Default)]
pub struct TransitionMetrics {
    inner: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub runs: usize,
    pub resets: usize,
    pub render_failures: usize,
}

impl TransitionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&mut self) {
        self.inner.runs += 1;
    }

    pub fn record_reset(&mut self) {
        self.inner.resets += 1;
    }

    pub fn record_render_failure(&mut self) {
        self.inner.render_failures += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let mut metrics = TransitionMetrics::new();
        metrics.record_run();
        metrics.record_run();
        metrics.record_reset();
        metrics.record_render_failure();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                runs: 2,
                resets: 1,
                render_failures: 1,
            }
        );
    }
}
