//! Core types for the stride-log pipeline
//!
//! This module defines the values that flow through each stage: parsed
//! records, computed metrics and the structured summaries handed to the
//! report formatter.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::duration::hours;

/// Label of a running session in training records
pub const RUNNING_LABEL: &str = "Бег";

/// Label of a walking session in training records
pub const WALKING_LABEL: &str = "Ходьба";

/// Kind of training session, selecting the calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Walking,
    Unknown,
}

impl ActivityKind {
    /// Map a raw record label to a kind. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            RUNNING_LABEL => ActivityKind::Running,
            WALKING_LABEL => ActivityKind::Walking,
            _ => ActivityKind::Unknown,
        }
    }
}

/// A day's step count and the time spent walking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStepRecord {
    /// Always greater than zero
    pub steps: i64,
    pub duration: TimeDelta,
}

/// One labeled training session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRecord {
    /// Not checked for sign
    pub steps: i64,
    /// Activity label exactly as written in the record
    pub label: String,
    pub duration: TimeDelta,
}

impl TrainingRecord {
    pub fn kind(&self) -> ActivityKind {
        ActivityKind::from_label(&self.label)
    }

    pub fn duration_hours(&self) -> f64 {
        hours(self.duration)
    }
}

/// Metrics derived from one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub calories_kcal: f64,
}

/// Computed result of a valid day-step record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub steps: i64,
    pub distance_km: f64,
    pub calories_kcal: f64,
}

/// Computed result of a valid training record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub label: String,
    pub kind: ActivityKind,
    pub duration_hours: f64,
    pub metrics: Metrics,
}

/// Structured result of one record, used for machine-readable output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome<T> {
    Ok { index: usize, input: String, summary: T },
    Error { index: usize, input: String, error: String },
}

impl<T> RecordOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, RecordOutcome::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_kind_mapping() {
        assert_eq!(ActivityKind::from_label("Бег"), ActivityKind::Running);
        assert_eq!(ActivityKind::from_label("Ходьба"), ActivityKind::Walking);
        assert_eq!(ActivityKind::from_label("Плавание"), ActivityKind::Unknown);
        // labels are not normalised
        assert_eq!(ActivityKind::from_label(" Бег"), ActivityKind::Unknown);
        assert_eq!(ActivityKind::from_label("бег"), ActivityKind::Unknown);
    }

    #[test]
    fn test_record_kind() {
        let record = TrainingRecord {
            steps: 100,
            label: "Плавание".to_string(),
            duration: TimeDelta::zero(),
        };
        assert_eq!(record.kind(), ActivityKind::Unknown);

        let record = TrainingRecord {
            label: WALKING_LABEL.to_string(),
            ..record
        };
        assert_eq!(record.kind(), ActivityKind::Walking);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome: RecordOutcome<DaySummary> = RecordOutcome::Error {
            index: 2,
            input: ",3456".to_string(),
            error: "invalid".to_string(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["index"], 2);
        assert!(!outcome.is_ok());
    }
}
