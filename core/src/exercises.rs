use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// De tre støttede øvelsene. Id-strengene matcher web-klienten
/// ("bicep_curl" | "squat" | "pushup").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    BicepCurl,
    Squat,
    Pushup,
}

impl Exercise {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exercise::BicepCurl => "bicep_curl",
            Exercise::Squat => "squat",
            Exercise::Pushup => "pushup",
        }
    }
}

impl FromStr for Exercise {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bicep_curl" => Ok(Exercise::BicepCurl),
            "squat" => Ok(Exercise::Squat),
            "pushup" => Ok(Exercise::Pushup),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Landemerkene vi leser fra pose-modellen (venstre side, MediaPipe Pose).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    LeftShoulder,
    LeftElbow,
    LeftWrist,
    LeftHip,
    LeftKnee,
    LeftAnkle,
}

impl Landmark {
    /// Indeks i MediaPipe Pose sin 33-punkts landemerkeliste.
    pub fn pose_index(self) -> usize {
        match self {
            Landmark::LeftShoulder => 11,
            Landmark::LeftElbow => 13,
            Landmark::LeftWrist => 15,
            Landmark::LeftHip => 23,
            Landmark::LeftKnee => 25,
            Landmark::LeftAnkle => 27,
        }
    }
}

/// Ett frame med landemerker, indeksert som MediaPipe Pose.
/// Listen kan være kortere enn 33 punkter; manglende indeks = manglende punkt.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    points: Vec<Point>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Henter et landemerke. `None` hvis det mangler eller ikke er finite.
    pub fn get(&self, landmark: Landmark) -> Option<Point> {
        self.points
            .get(landmark.pose_index())
            .copied()
            .filter(Point::is_finite)
    }
}

/// Terskelregel for fasebytte, relativ til målt leddvinkel.
#[derive(Debug, Clone, Copy)]
pub enum Threshold {
    Above(f64),
    Below(f64),
}

impl Threshold {
    pub fn crossed(self, angle_deg: f64) -> bool {
        match self {
            Threshold::Above(t) => angle_deg > t,
            Threshold::Below(t) => angle_deg < t,
        }
    }
}

/// Profil per øvelse: leddvalg, idealområde, faseterskler, tempo og kalorier.
/// All øvelsesspesifikk logikk ligger her – telleren selv er datadrevet.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseProfile {
    pub exercise: Exercise,
    /// Proksimal, pivot, distal. Vinkelen måles i pivot-leddet.
    pub joints: [Landmark; 3],
    /// Nedre grense i idealområdet (grader).
    pub min_angle: f64,
    /// Øvre grense i idealområdet (grader).
    pub max_angle: f64,
    pub enter_down: Threshold,
    pub enter_up: Threshold,
    /// Ideell tid per repetisjon (sekunder).
    pub ideal_rep_sec: f64,
    pub calories_per_rep: f64,
    /// Instruksjon som vises når utøveren går inn i DOWN-fasen.
    pub down_cue: &'static str,
}

impl ExerciseProfile {
    /// Kalorier er en ren lineær funksjon av antall reps.
    pub fn calories_for(&self, reps: u32) -> f64 {
        self.calories_per_rep * f64::from(reps)
    }
}

static PROFILES: [ExerciseProfile; 3] = [
    ExerciseProfile {
        exercise: Exercise::BicepCurl,
        joints: [Landmark::LeftShoulder, Landmark::LeftElbow, Landmark::LeftWrist],
        min_angle: 30.0,
        max_angle: 160.0,
        enter_down: Threshold::Above(160.0),
        enter_up: Threshold::Below(30.0),
        ideal_rep_sec: 2.0,
        calories_per_rep: 0.32,
        down_cue: "Lower your arm slowly",
    },
    ExerciseProfile {
        exercise: Exercise::Squat,
        joints: [Landmark::LeftHip, Landmark::LeftKnee, Landmark::LeftAnkle],
        min_angle: 70.0,
        max_angle: 170.0,
        enter_down: Threshold::Below(100.0),
        enter_up: Threshold::Above(160.0),
        ideal_rep_sec: 2.5,
        calories_per_rep: 0.45,
        down_cue: "Good depth! Push through heels",
    },
    ExerciseProfile {
        exercise: Exercise::Pushup,
        joints: [Landmark::LeftShoulder, Landmark::LeftElbow, Landmark::LeftWrist],
        min_angle: 80.0,
        max_angle: 160.0,
        enter_down: Threshold::Below(90.0),
        enter_up: Threshold::Above(160.0),
        ideal_rep_sec: 2.0,
        calories_per_rep: 0.6,
        down_cue: "Keep core tight",
    },
];

/// Slår opp profilen for en øvelse. Katalogen er fast og komplett.
pub fn profile_for(exercise: Exercise) -> &'static ExerciseProfile {
    match exercise {
        Exercise::BicepCurl => &PROFILES[0],
        Exercise::Squat => &PROFILES[1],
        Exercise::Pushup => &PROFILES[2],
    }
}
