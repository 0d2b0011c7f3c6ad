//! Record parsing
//!
//! Turns comma-delimited record lines into typed records. Both record shapes
//! share the field splitting; they differ in field count and in the checks
//! applied to the step count.

use crate::duration::parse_duration;
use crate::error::{ConversionError, RecordError};
use crate::types::{DayStepRecord, TrainingRecord};

const FIELD_SEPARATOR: char = ',';

/// Split `raw` on commas, requiring exactly `N` fields
fn split_fields<const N: usize>(raw: &str) -> Result<[&str; N], RecordError> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let actual = fields.len();
    fields.try_into().map_err(|_| RecordError::Format {
        expected: N,
        actual,
    })
}

fn parse_steps(field: &str) -> Result<i64, RecordError> {
    field
        .parse::<i64>()
        .map_err(|e| ConversionError::from(e).into())
}

/// Parse a `<steps>,<duration>` day record, e.g. `678,0h50m`.
///
/// The step count must be strictly positive.
pub fn parse_day_steps(raw: &str) -> Result<DayStepRecord, RecordError> {
    let [steps, duration] = split_fields::<2>(raw)?;

    let steps = parse_steps(steps)?;
    if steps <= 0 {
        return Err(RecordError::InvalidValue(steps));
    }

    let duration = parse_duration(duration).map_err(ConversionError::from)?;

    Ok(DayStepRecord { steps, duration })
}

/// Parse a `<steps>,<label>,<duration>` training record, e.g. `3456,Ходьба,3h00m`.
///
/// The label is kept verbatim and the step count is accepted whatever its sign.
pub fn parse_training(raw: &str) -> Result<TrainingRecord, RecordError> {
    let [steps, label, duration] = split_fields::<3>(raw)?;

    let steps = parse_steps(steps)?;
    let duration = parse_duration(duration).map_err(ConversionError::from)?;

    Ok(TrainingRecord {
        steps,
        label: label.to_string(),
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationError;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    fn minutes(n: i64) -> TimeDelta {
        TimeDelta::nanoseconds(n * 60 * 1_000_000_000)
    }

    #[test]
    fn test_parse_day_steps() {
        assert_eq!(
            parse_day_steps("678,0h50m").unwrap(),
            DayStepRecord {
                steps: 678,
                duration: minutes(50)
            }
        );
        assert_eq!(parse_day_steps("7830,2h40m").unwrap().duration, minutes(160));
    }

    #[test]
    fn test_day_steps_field_count() {
        assert_eq!(
            parse_day_steps("something is wrong").unwrap_err(),
            RecordError::Format {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            parse_day_steps("1,2,3").unwrap_err(),
            RecordError::Format {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_day_steps_conversion_errors() {
        assert!(matches!(
            parse_day_steps(",3456"),
            Err(RecordError::Conversion(ConversionError::Steps(_)))
        ));
        assert!(matches!(
            parse_day_steps("12:40:00, 3456"),
            Err(RecordError::Conversion(ConversionError::Steps(_)))
        ));
        assert!(matches!(
            parse_day_steps(" 678,0h50m"),
            Err(RecordError::Conversion(ConversionError::Steps(_)))
        ));
        assert_eq!(
            parse_day_steps("678,50").unwrap_err(),
            RecordError::Conversion(ConversionError::Duration(DurationError::MissingUnit(
                "50".to_string()
            )))
        );
    }

    #[test]
    fn test_day_steps_must_be_positive() {
        assert_eq!(
            parse_day_steps("0,1h").unwrap_err(),
            RecordError::InvalidValue(0)
        );
        assert_eq!(
            parse_day_steps("-15,1h").unwrap_err(),
            RecordError::InvalidValue(-15)
        );
    }

    #[test]
    fn test_day_steps_allows_non_positive_duration() {
        assert_eq!(parse_day_steps("100,0m").unwrap().duration, TimeDelta::zero());
        assert_eq!(parse_day_steps("100,-1h").unwrap().duration, minutes(-60));
    }

    #[test]
    fn test_positivity_checked_before_duration() {
        assert_eq!(
            parse_day_steps("0,garbage").unwrap_err(),
            RecordError::InvalidValue(0)
        );
    }

    #[test]
    fn test_parse_training() {
        assert_eq!(
            parse_training("3456,Ходьба,3h00m").unwrap(),
            TrainingRecord {
                steps: 3456,
                label: "Ходьба".to_string(),
                duration: minutes(180),
            }
        );
    }

    #[test]
    fn test_training_keeps_label_verbatim() {
        let record = parse_training("10, Бег ,1h").unwrap();
        assert_eq!(record.label, " Бег ");
    }

    #[test]
    fn test_training_accepts_non_positive_steps() {
        assert_eq!(parse_training("-5,Бег,1h").unwrap().steps, -5);
        assert_eq!(parse_training("0,Бег,1h").unwrap().steps, 0);
    }

    #[test]
    fn test_training_errors() {
        assert_eq!(
            parse_training("something is wrong").unwrap_err(),
            RecordError::Format {
                expected: 3,
                actual: 1
            }
        );
        assert_eq!(
            parse_training(",3456 Ходьба").unwrap_err(),
            RecordError::Format {
                expected: 3,
                actual: 2
            }
        );
        assert!(matches!(
            parse_training("abc,Бег,1h"),
            Err(RecordError::Conversion(ConversionError::Steps(_)))
        ));
        assert!(matches!(
            parse_training("100,Бег,1x"),
            Err(RecordError::Conversion(ConversionError::Duration(_)))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            parse_day_steps("something is wrong").unwrap_err().to_string(),
            "invalid data format: expected 2 fields, got 1"
        );
        assert_eq!(
            parse_day_steps(",3456").unwrap_err().to_string(),
            "step count conversion failed: cannot parse integer from empty string"
        );
        assert_eq!(
            parse_day_steps("678,1d").unwrap_err().to_string(),
            "time conversion failed: unknown unit \"d\" in duration \"1d\""
        );
    }
}
