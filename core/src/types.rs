use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exercises::Exercise;

/// 2D-landemerke i normaliserte bildekoordinater (0..1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// NaN/inf fra pose-modellen regnes som manglende landemerke.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fase i en repetisjon: UP = strukket utgangsstilling, DOWN = bøyd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Up,
    Down,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Up => "up",
            Stage::Down => "down",
        }
    }
}

/// Resultat per prosessert frame – alt overlayet trenger, uten videre regning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameUpdate {
    pub stage: Stage,
    pub rep_count: u32,
    pub form_score: u8,
    pub calories_burned: f64,
    pub feedback: String,
    /// Målt leddvinkel (grader) for dette framet.
    pub angle_deg: f64,
}

/// Øyeblikksbilde av aktiv økt (duration løper fortsatt).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub exercise_type: Exercise,
    pub reps: u32,
    pub calories: f64,
    pub form_score: u8,
    /// Sekunder siden start.
    pub duration: f64,
}

/// Ferdigstilt økt slik den legges i historikken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise_type: Exercise,
    pub reps: u32,
    pub calories: f64,
    pub form_score: u8,
    pub duration: f64,
    pub start_time: DateTime<Utc>,
}

/// Personlige mål. Holdes kun i minnet – persistens er bevisst utelatt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goals {
    pub daily_calories: f64,
    pub weekly_workouts: u32,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            daily_calories: 300.0,
            weekly_workouts: 5,
        }
    }
}
