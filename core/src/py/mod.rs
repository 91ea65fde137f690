use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use serde::Deserialize;
use serde_json::{self as json, json as json_obj};
use serde_path_to_error as spte;

use crate::tracker::{RepCounter, TrackerError};
use crate::types::{Goals, Point};
use crate::LandmarkFrame;

// ──────────────────────────────────────────────────────────────────────────────
// TOLERANT INPUT (aliaser for avvikende feltnavn fra ulike klienter)
// ──────────────────────────────────────────────────────────────────────────────

/// Ett landemerke fra pose-modellen. `x`/`y` som mangler eller er null
/// videreføres som NaN slik at kjernen klassifiserer framet som
/// MalformedLandmarks i stedet for at parsingen feiler.
#[derive(Debug, Deserialize)]
struct LandmarkInTol {
    #[serde(default, alias = "X")]
    x: Option<f64>,
    #[serde(default, alias = "Y")]
    y: Option<f64>,
    // 2D-kjerne: dybde og synlighet aksepteres men brukes ikke
    #[serde(default)]
    #[allow(dead_code)]
    z: Option<f64>,
    #[serde(default, alias = "v")]
    #[allow(dead_code)]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FrameObjectTol {
    landmarks: Vec<LandmarkInTol>,
}

// Prøv OBJECT først ({"landmarks": [...]}), deretter bar liste
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameInTol {
    Object(FrameObjectTol),
    List(Vec<LandmarkInTol>),
}

#[derive(Debug, Deserialize)]
struct GoalsInTol {
    #[serde(default, alias = "dailyCalories")]
    daily_calories: Option<f64>,
    #[serde(default, alias = "weeklyWorkouts")]
    weekly_workouts: Option<u32>,
}

// ──────────────────────────────────────────────────────────────────────────────
// HJELPERE
// ──────────────────────────────────────────────────────────────────────────────

fn to_core_frame(input: FrameInTol) -> LandmarkFrame {
    let landmarks = match input {
        FrameInTol::Object(o) => o.landmarks,
        FrameInTol::List(l) => l,
    };
    let points = landmarks
        .into_iter()
        .map(|lm| Point::new(lm.x.unwrap_or(f64::NAN), lm.y.unwrap_or(f64::NAN)))
        .collect();
    LandmarkFrame::new(points)
}

/// Aksepter både JSON-string og Python-objekt (dict/list) som payload.
fn payload_to_json_string(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    if let Ok(s) = payload.extract::<&str>() {
        return Ok(s.to_owned());
    }
    // Bruk Python sin json.dumps for å serialisere hvilket som helst objekt
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    json_mod
        .call_method1("dumps", (payload,))
        .and_then(|o| o.extract::<String>())
        .map_err(|e| PyValueError::new_err(format!("failed to serialize payload: {e}")))
}

fn parse_with_path<'de, T: Deserialize<'de>>(json_in: &'de str, what: &str) -> PyResult<T> {
    let mut de = json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de)
        .map_err(|e| PyValueError::new_err(format!("parse error ({what}) at {}: {}", e.path(), e)))
}

fn to_json_string<T: serde::Serialize>(value: &T) -> PyResult<String> {
    json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-KLASSE — eksplisitt eid av Python-verten, ingen modul-globale
// singletons (kamera/tracker-globalene fra Flask-appen er bevisst borte)
// ──────────────────────────────────────────────────────────────────────────────

#[pyclass]
pub struct PoseTracker {
    inner: RepCounter,
}

#[pymethods]
impl PoseTracker {
    #[new]
    fn new() -> Self {
        Self {
            inner: RepCounter::new(),
        }
    }

    /// Starter sporing. Ukjent øvelse → PyValueError, ingen økt opprettes.
    fn start_tracking(&mut self, exercise_type: &str) -> PyResult<String> {
        self.inner
            .start(exercise_type)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        to_json_string(&json_obj!({
            "status": "success",
            "exercise_type": exercise_type,
        }))
    }

    /// Avslutter økten og legger sammendraget i historikken.
    /// Uten aktiv økt rapporteres status – aldri exception.
    fn stop_tracking(&mut self) -> PyResult<String> {
        match self.inner.stop() {
            Ok(summary) => to_json_string(&json_obj!({
                "status": "success",
                "stats": summary,
            })),
            Err(TrackerError::InactiveSession) => to_json_string(&json_obj!({
                "status": "error",
                "message": "No active tracking session",
            })),
            Err(e) => Err(PyValueError::new_err(e.to_string())),
        }
    }

    /// Prosesserer ett frame. Payload er enten {"landmarks": [...]} eller
    /// en bar liste; string eller Python-objekt. Inaktiv økt gir tomt
    /// objekt og hoppede frames en eksplisitt status – overlayet kan alltid
    /// rendre svaret direkte.
    fn process_landmarks(&mut self, py: Python<'_>, payload: &PyAny) -> PyResult<String> {
        let json_in = payload_to_json_string(py, payload)?;
        let parsed: FrameInTol = parse_with_path(&json_in, "landmark frame")?;
        let frame = to_core_frame(parsed);

        match self.inner.process(&frame) {
            Ok(update) => to_json_string(&update),
            Err(TrackerError::InactiveSession) => Ok("{}".to_string()),
            Err(TrackerError::MalformedLandmarks(reason)) => to_json_string(&json_obj!({
                "status": "skipped",
                "reason": reason,
            })),
            Err(e) => Err(PyValueError::new_err(e.to_string())),
        }
    }

    /// Øyeblikksbilde av aktiv økt, tomt objekt hvis ingen.
    fn get_session_stats(&self) -> PyResult<String> {
        match self.inner.session_stats() {
            Some(stats) => to_json_string(&stats),
            None => Ok("{}".to_string()),
        }
    }

    /// Alias for get_session_stats – beholdt for web-klientens /get_stats.
    fn get_stats(&self) -> PyResult<String> {
        self.get_session_stats()
    }

    fn get_workout_history(&self) -> PyResult<String> {
        to_json_string(&json_obj!({
            "status": "success",
            "history": self.inner.history(),
        }))
    }

    fn set_goals(&mut self, py: Python<'_>, payload: &PyAny) -> PyResult<String> {
        let json_in = payload_to_json_string(py, payload)?;
        let parsed: GoalsInTol = parse_with_path(&json_in, "goals")?;

        let defaults = Goals::default();
        self.inner.set_goals(Goals {
            daily_calories: parsed.daily_calories.unwrap_or(defaults.daily_calories),
            weekly_workouts: parsed.weekly_workouts.unwrap_or(defaults.weekly_workouts),
        });
        to_json_string(&json_obj!({ "status": "success" }))
    }

    fn get_goals(&self) -> PyResult<String> {
        to_json_string(self.inner.goals())
    }

    fn is_tracking(&self) -> bool {
        self.inner.is_tracking()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn fitpose_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PoseTracker>()?;
    Ok(())
}
