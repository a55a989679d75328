use serde::{Deserialize, Serialize};
use std::time::Instant;

#[inline]
fn ms_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Wall-clock time spent in one extraction stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Stage timings of one run in execution order, plus the end-to-end total.
///
/// Stages may overlap the total but never each other; time outside any
/// stage (bookkeeping, report assembly) only shows up in `total_ms`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Run `stage`, recording its duration under `label`. Fallible stages
    /// are timed even when they fail.
    pub fn time<T>(&mut self, label: &str, stage: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = stage();
        self.stages.push(StageTiming {
            label: label.to_owned(),
            elapsed_ms: ms_since(start),
        });
        out
    }

    /// Close the breakdown with the time elapsed since `start`.
    pub fn finish(&mut self, start: Instant) {
        self.total_ms = ms_since(start);
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }

    /// Sum over all recorded stages.
    pub fn staged_ms(&self) -> f64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}
