//! Report rendering
//!
//! Fixed-template, fixed-locale text for day and training summaries.

use std::fmt::Display;

use crate::types::{DaySummary, TrainingSummary};

/// Header printed before the day-step reports
pub const DAY_ACTIVITY_HEADER: &str = "Активность в течение дня";

/// Header printed before the training reports
pub const TRAINING_LOG_HEADER: &str = "Журнал тренировок";

/// Report text for a training record whose label matches no known kind
pub const UNKNOWN_ACTIVITY_MESSAGE: &str = "неизвестный тип тренировки";

/// Three-line day report: steps, distance and calories
pub fn format_day_report(steps: i64, distance_km: f64, calories_kcal: f64) -> String {
    format!(
        "Количество шагов: {steps}.\n\
         Дистанция составила {distance_km:.2} км.\n\
         Вы сожгли {calories_kcal:.2} ккал."
    )
}

/// Five-line training report
pub fn format_training_report(
    label: &str,
    duration_hours: f64,
    distance_km: f64,
    speed_kmh: f64,
    calories_kcal: f64,
) -> String {
    format!(
        "Тип тренировки: {label}\n\
         Длительность: {duration_hours:.2} ч.\n\
         Дистанция: {distance_km:.2} км.\n\
         Скорость: {speed_kmh:.2} км/ч\n\
         Сожгли калорий: {calories_kcal:.2}"
    )
}

/// Report text for a training record that could not be parsed
pub fn format_processing_error(error: impl Display) -> String {
    format!("data processing error: {error}")
}

impl DaySummary {
    pub fn render(&self) -> String {
        format_day_report(self.steps, self.distance_km, self.calories_kcal)
    }
}

impl TrainingSummary {
    pub fn render(&self) -> String {
        format_training_report(
            &self.label,
            self.duration_hours,
            self.metrics.distance_km,
            self.metrics.speed_kmh,
            self.metrics.calories_kcal,
        )
    }
}
