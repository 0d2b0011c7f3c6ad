//! Pipeline orchestration
//!
//! This module provides the public API for stride-log. Each record goes
//! through parse → calculate → render on its own; batches keep one report
//! slot per input line, in input order.
//!
//! Failures surface differently per record shape. A rejected day-step record
//! is logged as a warning and its slot is left empty. A rejected training
//! record gets a `data processing error: ...` report instead.

use tracing::{debug, info, warn};

use crate::config::UserProfile;
use crate::error::RecordError;
use crate::metrics::{MetricsCalculator, StandardCalculator};
use crate::parser::{parse_day_steps, parse_training};
use crate::report::{format_processing_error, UNKNOWN_ACTIVITY_MESSAGE};
use crate::types::{DaySummary, RecordOutcome, TrainingSummary};

/// Parse a day-step record and compute its summary.
pub fn process_day<C>(
    raw: &str,
    profile: &UserProfile,
    calculator: &C,
) -> Result<DaySummary, RecordError>
where
    C: MetricsCalculator + ?Sized,
{
    let record = parse_day_steps(raw)?;
    let summary = calculator.day_summary(&record, profile);

    debug!(
        steps = summary.steps,
        distance_km = summary.distance_km,
        calories_kcal = summary.calories_kcal,
        "computed day summary"
    );

    Ok(summary)
}

/// Parse a training record and compute its summary.
///
/// An unrecognised activity label fails with [`RecordError::UnknownActivity`]
/// before any metric is computed.
pub fn process_training<C>(
    raw: &str,
    profile: &UserProfile,
    calculator: &C,
) -> Result<TrainingSummary, RecordError>
where
    C: MetricsCalculator + ?Sized,
{
    let record = parse_training(raw)?;
    let kind = record.kind();

    let Some(metrics) = calculator.training_metrics(&record, kind, profile) else {
        return Err(RecordError::UnknownActivity(record.label));
    };

    debug!(
        label = %record.label,
        steps = record.steps,
        distance_km = metrics.distance_km,
        speed_kmh = metrics.speed_kmh,
        calories_kcal = metrics.calories_kcal,
        "computed training summary"
    );

    Ok(TrainingSummary {
        duration_hours: record.duration_hours(),
        label: record.label,
        kind,
        metrics,
    })
}

/// Render the day report for one raw record.
///
/// Returns an empty string when the record is rejected; the reason is logged.
pub fn day_action_info<C>(raw: &str, profile: &UserProfile, calculator: &C) -> String
where
    C: MetricsCalculator + ?Sized,
{
    match process_day(raw, profile, calculator) {
        Ok(summary) => summary.render(),
        Err(error) => {
            warn!(record = raw, %error, "rejected day-step record");
            String::new()
        }
    }
}

/// Render the training report for one raw record.
///
/// Rejected records produce an error report rather than an empty slot.
pub fn training_info<C>(raw: &str, profile: &UserProfile, calculator: &C) -> String
where
    C: MetricsCalculator + ?Sized,
{
    match process_training(raw, profile, calculator) {
        Ok(summary) => summary.render(),
        Err(RecordError::UnknownActivity(label)) => {
            debug!(%label, "unknown training type");
            UNKNOWN_ACTIVITY_MESSAGE.to_string()
        }
        Err(error) => format_processing_error(&error),
    }
}

/// Batch processor binding a user profile to a calculator.
#[derive(Debug, Clone)]
pub struct TrackerProcessor<C = StandardCalculator> {
    profile: UserProfile,
    calculator: C,
}

impl TrackerProcessor<StandardCalculator> {
    /// Create a processor using the default calculator constants
    pub fn new(profile: UserProfile) -> Self {
        Self::with_calculator(profile, StandardCalculator::default())
    }
}

impl<C: MetricsCalculator> TrackerProcessor<C> {
    /// Create a processor with a specific calculator
    pub fn with_calculator(profile: UserProfile, calculator: C) -> Self {
        Self {
            profile,
            calculator,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Day report for a single record
    pub fn day_info(&self, raw: &str) -> String {
        day_action_info(raw, &self.profile, &self.calculator)
    }

    /// Training report for a single record
    pub fn training_info(&self, raw: &str) -> String {
        training_info(raw, &self.profile, &self.calculator)
    }

    /// Day reports for every record, one slot per input
    pub fn day_reports<S: AsRef<str>>(&self, records: &[S]) -> Vec<String> {
        let reports: Vec<String> = records
            .iter()
            .map(|raw| self.day_info(raw.as_ref()))
            .collect();

        let rejected = reports.iter().filter(|r| r.is_empty()).count();
        info!(records = reports.len(), rejected, "processed day-step batch");

        reports
    }

    /// Training reports for every record, one slot per input
    pub fn training_reports<S: AsRef<str>>(&self, records: &[S]) -> Vec<String> {
        let reports: Vec<String> = records
            .iter()
            .map(|raw| self.training_info(raw.as_ref()))
            .collect();

        info!(records = reports.len(), "processed training batch");

        reports
    }

    /// Structured day results, one per input
    pub fn day_outcomes<S: AsRef<str>>(&self, records: &[S]) -> Vec<RecordOutcome<DaySummary>> {
        records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = raw.as_ref();
                outcome(
                    index,
                    raw,
                    process_day(raw, &self.profile, &self.calculator),
                )
            })
            .collect()
    }

    /// Structured training results, one per input
    pub fn training_outcomes<S: AsRef<str>>(
        &self,
        records: &[S],
    ) -> Vec<RecordOutcome<TrainingSummary>> {
        records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = raw.as_ref();
                outcome(
                    index,
                    raw,
                    process_training(raw, &self.profile, &self.calculator),
                )
            })
            .collect()
    }
}

fn outcome<T>(index: usize, raw: &str, result: Result<T, RecordError>) -> RecordOutcome<T> {
    match result {
        Ok(summary) => RecordOutcome::Ok {
            index,
            input: raw.to_string(),
            summary,
        },
        Err(error) => RecordOutcome::Error {
            index,
            input: raw.to_string(),
            error: error.to_string(),
        },
    }
}
