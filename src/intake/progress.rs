use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};

pub const DEFAULT_STAGES: [&str; 4] = [
    "Collecting data",
    "Analyzing symptoms",
    "Evaluating risk level",
    "Generating results",
];

/// Snapshot of the Processing step's progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub percent: u8,
    /// Index of the stage currently shown as active.
    pub stage: usize,
    pub completed_stages: usize,
}

impl ProgressUpdate {
    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }
}

/// Fixed-duration progress sequence: one percent per tick, one stage per
/// stage interval. Independent of the analysis call.
#[derive(Debug, Clone)]
pub struct ProgressSequence {
    tick: Duration,
    stage_interval: Duration,
    stages: Vec<String>,
}

impl Default for ProgressSequence {
    fn default() -> Self {
        Self::new(Duration::from_millis(150), Duration::from_millis(2000))
    }
}

impl ProgressSequence {
    pub fn new(tick: Duration, stage_interval: Duration) -> Self {
        Self {
            tick,
            stage_interval,
            stages: DEFAULT_STAGES.iter().map(|stage| stage.to_string()).collect(),
        }
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn total_duration(&self) -> Duration {
        self.tick * 100
    }

    /// Progress shown `percent` ticks into the sequence.
    pub fn update_at(&self, percent: u8) -> ProgressUpdate {
        let percent = percent.min(100);
        let last_stage = self.stages.len().saturating_sub(1);
        if percent >= 100 {
            return ProgressUpdate {
                percent,
                stage: last_stage,
                completed_stages: self.stages.len(),
            };
        }

        let elapsed = self.tick * u32::from(percent);
        let stage = if self.stage_interval.is_zero() {
            last_stage
        } else {
            ((elapsed.as_nanos() / self.stage_interval.as_nanos()) as usize).min(last_stage)
        };

        ProgressUpdate {
            percent,
            stage,
            completed_stages: stage,
        }
    }

    /// Runs the sequence to 100%, publishing every step. A closed receiver
    /// does not cut the sequence short.
    pub async fn run(
        &self,
        updates: Option<&mpsc::UnboundedSender<ProgressUpdate>>,
    ) -> ProgressUpdate {
        let mut ticker = interval(self.tick.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last = self.update_at(0);
        for percent in 0..=100u8 {
            ticker.tick().await;
            last = self.update_at(percent);
            if let Some(updates) = updates {
                let _ = updates.send(last);
            }
        }

        last
    }
}
