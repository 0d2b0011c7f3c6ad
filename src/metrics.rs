//! Metric derivation
//!
//! Distance, mean speed and calorie formulas. All arithmetic is performed in
//! the order the formulas are written so results are reproducible to the bit.

use chrono::TimeDelta;

use crate::config::{MetricsConfig, UserProfile};
use crate::duration::hours;
use crate::types::{ActivityKind, DayStepRecord, DaySummary, Metrics, TrainingRecord};

/// Calculator seam used by the pipeline
pub trait MetricsCalculator {
    /// Distance covered in kilometers
    fn distance(&self, steps: i64) -> f64;

    /// Average speed in km/h; zero for non-positive durations
    fn mean_speed(&self, steps: i64, duration: TimeDelta) -> f64;

    /// Calories burnt running; zero for non-positive durations
    fn running_calories(&self, steps: i64, weight_kg: f64, duration: TimeDelta) -> f64;

    /// Calories burnt walking
    fn walking_calories(
        &self,
        steps: i64,
        weight_kg: f64,
        height_m: f64,
        duration: TimeDelta,
    ) -> f64;

    /// Distance and walking calories of a day-step record
    fn day_summary(&self, record: &DayStepRecord, profile: &UserProfile) -> DaySummary {
        DaySummary {
            steps: record.steps,
            distance_km: self.distance(record.steps),
            calories_kcal: self.walking_calories(
                record.steps,
                profile.weight_kg,
                profile.height_m,
                record.duration,
            ),
        }
    }

    /// Metrics of a training record, using the formula matching `kind`.
    ///
    /// Returns `None` for [`ActivityKind::Unknown`] without computing anything.
    fn training_metrics(
        &self,
        record: &TrainingRecord,
        kind: ActivityKind,
        profile: &UserProfile,
    ) -> Option<Metrics> {
        let calories_kcal = match kind {
            ActivityKind::Running => {
                self.running_calories(record.steps, profile.weight_kg, record.duration)
            }
            ActivityKind::Walking => self.walking_calories(
                record.steps,
                profile.weight_kg,
                profile.height_m,
                record.duration,
            ),
            ActivityKind::Unknown => return None,
        };

        Some(Metrics {
            distance_km: self.distance(record.steps),
            speed_kmh: self.mean_speed(record.steps, record.duration),
            calories_kcal,
        })
    }
}

/// Calculator backed by a [`MetricsConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StandardCalculator {
    config: MetricsConfig,
}

impl StandardCalculator {
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }
}

impl MetricsCalculator for StandardCalculator {
    fn distance(&self, steps: i64) -> f64 {
        steps as f64 * self.config.step_length_m / self.config.meters_per_km
    }

    fn mean_speed(&self, steps: i64, duration: TimeDelta) -> f64 {
        if duration <= TimeDelta::zero() {
            return 0.0;
        }

        self.distance(steps) / hours(duration)
    }

    fn running_calories(&self, steps: i64, weight_kg: f64, duration: TimeDelta) -> f64 {
        let speed = self.mean_speed(steps, duration);

        if duration <= TimeDelta::zero() {
            return 0.0;
        }

        let per_hour = ((self.config.running_speed_multiplier * speed)
            - self.config.running_speed_shift)
            * weight_kg;

        per_hour * hours(duration)
    }

    fn walking_calories(
        &self,
        steps: i64,
        weight_kg: f64,
        height_m: f64,
        duration: TimeDelta,
    ) -> f64 {
        let speed = self.mean_speed(steps, duration);

        ((self.config.walking_weight_multiplier * weight_kg)
            + (speed * speed / height_m) * self.config.walking_speed_height_multiplier)
            * hours(duration)
            * self.config.minutes_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHT: f64 = 84.6;
    const HEIGHT: f64 = 1.87;

    fn minutes(n: i64) -> TimeDelta {
        TimeDelta::nanoseconds(n * 60 * 1_000_000_000)
    }

    fn profile() -> UserProfile {
        UserProfile::new(WEIGHT, HEIGHT).unwrap()
    }

    #[test]
    fn test_distance_is_steps_times_step_length() {
        let calc = StandardCalculator::default();

        for steps in [1, 678, 792, 1078, 3456, 7830, 15392] {
            let expected = steps as f64 * 0.65 / 1000.0;
            assert_eq!(calc.distance(steps), expected);
            assert!((calc.distance(steps) - steps as f64 * 0.00065).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mean_speed() {
        let calc = StandardCalculator::default();

        // 3456 steps = 2.2464 km in 3 hours
        assert!((calc.mean_speed(3456, minutes(180)) - 0.7488).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_duration_zeroes_speed_and_running() {
        let calc = StandardCalculator::default();

        for duration in [TimeDelta::zero(), minutes(-1), minutes(-600)] {
            assert_eq!(calc.mean_speed(1000, duration), 0.0);
            assert_eq!(calc.running_calories(1000, WEIGHT, duration), 0.0);
        }
    }

    #[test]
    fn test_walking_has_no_duration_guard() {
        let calc = StandardCalculator::default();

        assert_eq!(calc.walking_calories(678, WEIGHT, HEIGHT, TimeDelta::zero()), 0.0);
        assert!(calc.walking_calories(100, WEIGHT, HEIGHT, minutes(-60)) < 0.0);
    }

    #[test]
    fn test_walking_calories_monotonic_in_weight() {
        let calc = StandardCalculator::default();

        for (steps, duration) in [(678, minutes(50)), (7892, minutes(190)), (1, minutes(1))] {
            let mut previous = f64::NEG_INFINITY;
            for weight in [40.0, 55.5, 70.0, 84.6, 100.0, 150.0] {
                let calories = calc.walking_calories(steps, weight, HEIGHT, duration);
                assert!(calories >= previous);
                previous = calories;
            }
        }
    }

    #[test]
    fn test_reference_values() {
        let calc = StandardCalculator::default();

        let walking = calc.walking_calories(678, WEIGHT, HEIGHT, minutes(50));
        assert_eq!(format!("{walking:.2}"), "148.27");

        let running = calc.running_calories(15392, WEIGHT, minutes(45));
        assert_eq!(format!("{running:.2}"), "13966.31");

        let running = calc.running_calories(678, WEIGHT, minutes(5));
        assert_eq!(format!("{running:.2}"), "530.10");
    }

    #[test]
    fn test_training_metrics_dispatch() {
        let calc = StandardCalculator::default();
        let record = TrainingRecord {
            steps: 1078,
            label: "Бег".to_string(),
            duration: minutes(10),
        };

        let metrics = calc
            .training_metrics(&record, ActivityKind::Running, &profile())
            .unwrap();
        assert_eq!(
            metrics.calories_kcal,
            calc.running_calories(1078, WEIGHT, minutes(10))
        );
        assert_eq!(metrics.distance_km, calc.distance(1078));

        let metrics = calc
            .training_metrics(&record, ActivityKind::Walking, &profile())
            .unwrap();
        assert_eq!(
            metrics.calories_kcal,
            calc.walking_calories(1078, WEIGHT, HEIGHT, minutes(10))
        );

        assert!(calc
            .training_metrics(&record, ActivityKind::Unknown, &profile())
            .is_none());
    }

    #[test]
    fn test_custom_config_is_used() {
        let calc = StandardCalculator::new(MetricsConfig {
            step_length_m: 1.0,
            ..MetricsConfig::default()
        });

        assert_eq!(calc.distance(2000), 2.0);
        assert_eq!(calc.mean_speed(2000, minutes(30)), 4.0);
    }
}
