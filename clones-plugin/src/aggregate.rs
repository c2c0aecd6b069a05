use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use clones_core::{CloneEvent, PluginError};
use clones_utils::time::{LocalZone, local_to_utc, parse_instant, parse_instant_utc};

use crate::validation::{IssueCode, ValidatedInput, ValidationIssue};

/// The GitHub traffic API keeps at most 14 days of clone data.
pub const TWO_WEEKS_MS: f64 = 14.0 * 24.0 * 60.0 * 60.0 * 1000.0;

pub const TWO_WEEKS_WARNING: &str = "The `duration` exceeds two weeks. The GitHub API provides a maximum of 2 weeks of data. The plugin calculated data for two weeks.\n";

/// What happens to windows longer than [`TWO_WEEKS_MS`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Warn, but filter over the full requested window.
    #[default]
    Advisory,
    /// Warn and clamp the window to two weeks.
    Truncate,
}

/// Inclusive `[start, end]` window in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let at = instant.timestamp_millis() as f64;
        at >= self.start_ms && at <= self.end_ms
    }
}

/// Aggregated clone count for one input record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowTally {
    pub clones: u64,
    pub window: TimeWindow,
    pub exceeds_two_weeks: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowAggregator {
    zone: LocalZone,
    policy: WindowPolicy,
}

impl WindowAggregator {
    pub fn new(zone: LocalZone, policy: WindowPolicy) -> Self {
        Self { zone, policy }
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    /// Normalized start of the window, falling back to the raw timestamp
    /// (naive values read as UTC) when normalization fails.
    pub fn window_start(&self, timestamp: &str) -> Option<DateTime<Utc>> {
        local_to_utc(timestamp, self.zone).or_else(|| parse_instant_utc(timestamp))
    }

    /// Resolve the window for `input`. Emits the two-week warning when the
    /// requested duration is longer than the remote data retention.
    pub fn window(&self, input: &ValidatedInput, index: usize) -> Result<(TimeWindow, bool), PluginError> {
        let Some(start) = self.window_start(&input.timestamp) else {
            let issue =
                ValidationIssue::new("timestamp", "Not a valid date-time", IssueCode::InvalidDate);
            return Err(PluginError::InputInvalid(issue.render(Some(index))));
        };

        let mut duration_ms = input.duration.seconds() * 1000.0;
        let exceeds_two_weeks = duration_ms > TWO_WEEKS_MS;

        if exceeds_two_weeks {
            warn!("{}", TWO_WEEKS_WARNING);
            if self.policy == WindowPolicy::Truncate {
                duration_ms = TWO_WEEKS_MS;
            }
        }

        let start_ms = start.timestamp_millis() as f64;
        Ok((
            TimeWindow {
                start_ms,
                end_ms: start_ms + duration_ms,
            },
            exceeds_two_weeks,
        ))
    }

    /// Sum `count` over every event inside the record's inclusive window.
    /// Event order does not matter; unparseable event timestamps are skipped.
    pub fn clones_for_time_range(
        &self,
        input: &ValidatedInput,
        clones: &[CloneEvent],
        index: usize,
    ) -> Result<WindowTally, PluginError> {
        let (window, exceeds_two_weeks) = self.window(input, index)?;

        let total = clones
            .iter()
            .filter(|event| match parse_instant(&event.timestamp, self.zone) {
                Some(at) => window.contains(at),
                None => {
                    debug!(timestamp = %event.timestamp, "skipping clone event with unparseable timestamp");
                    false
                }
            })
            .fold(0_u64, |total, event| total.saturating_add(event.count));

        Ok(WindowTally {
            clones: total,
            window,
            exceeds_two_weeks,
        })
    }
}
