use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::exercises::{profile_for, Exercise, ExerciseProfile, LandmarkFrame};
use crate::geometry::joint_angle_deg;
use crate::scoring::{check_form, pace_feedback, START_FORM_SCORE};
use crate::types::{FrameUpdate, Goals, Point, SessionStats, SessionSummary, Stage};

/// Feil fra telleren. Alle er lokalt gjenopprettbare – bindingen degraderer
/// dem til nøytrale svar i stedet for å la dem propagere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("unknown exercise: {0}")]
    InvalidExercise(String),
    #[error("no active session")]
    InactiveSession,
    #[error("malformed landmarks: {0}")]
    MalformedLandmarks(&'static str),
}

/// Klokkeabstraksjon slik at tempo- og varighetslogikk kan testes
/// deterministisk. Prod bruker `SystemClock`, tester `ManualClock`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manuell klokke for tester. Delt tilstand slik at testen kan skru tiden
/// frem mens telleren eier en klone.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(t: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(t)),
        }
    }

    pub fn advance_secs(&self, secs: f64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + Duration::milliseconds((secs * 1000.0).round() as i64);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Aktiv økt. Opprettes av `start`, muteres per frame, avsluttes og
/// kastes av `stop`.
#[derive(Debug, Clone)]
struct ActiveSession {
    profile: &'static ExerciseProfile,
    start_time: DateTime<Utc>,
    rep_count: u32,
    stage: Stage,
    form_score: u8,
    calories_burned: f64,
    /// Epoch-sekunder per fullført rep, append-only.
    rep_times: Vec<f64>,
    feedback: String,
}

impl ActiveSession {
    fn new(profile: &'static ExerciseProfile, start_time: DateTime<Utc>) -> Self {
        Self {
            profile,
            start_time,
            rep_count: 0,
            stage: Stage::Up,
            form_score: START_FORM_SCORE,
            calories_burned: 0.0,
            rep_times: Vec::new(),
            feedback: String::new(),
        }
    }
}

/// Rep-teller for én økt om gangen: vinkelmåling, faselogikk, form- og
/// tempovurdering, kalorier og økt-historikk. Én datadrevet algoritme for
/// alle øvelsene – alt øvelsesspesifikt kommer fra `ExerciseProfile`.
#[derive(Debug)]
pub struct RepCounter<C: Clock = SystemClock> {
    clock: C,
    session: Option<ActiveSession>,
    history: Vec<SessionSummary>,
    goals: Goals,
}

impl Default for RepCounter<SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl RepCounter<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> RepCounter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            session: None,
            history: Vec::new(),
            goals: Goals::default(),
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Starter en ny økt. Ukjent øvelse gir `InvalidExercise` og rører
    /// ikke eksisterende tilstand – ingen stille fallback-øvelse.
    pub fn start(&mut self, exercise_id: &str) -> Result<(), TrackerError> {
        let exercise = Exercise::from_str(exercise_id)
            .map_err(|_| TrackerError::InvalidExercise(exercise_id.to_string()))?;

        self.session = Some(ActiveSession::new(profile_for(exercise), self.clock.now()));
        Ok(())
    }

    /// Avslutter økten: beregner varighet, legger sammendraget i
    /// historikken og returnerer det. `InactiveSession` hvis ingen økt.
    pub fn stop(&mut self) -> Result<SessionSummary, TrackerError> {
        let session = self.session.take().ok_or(TrackerError::InactiveSession)?;

        let duration = secs_between(session.start_time, self.clock.now());
        let summary = SessionSummary {
            exercise_type: session.profile.exercise,
            reps: session.rep_count,
            calories: session.calories_burned,
            form_score: session.form_score,
            duration,
            start_time: session.start_time,
        };
        self.history.push(summary.clone());
        Ok(summary)
    }

    /// Prosesserer ett frame med landemerker. Telleren plukker selv ut
    /// profilens tre ledd. Manglende/ikke-finite punkter hopper over
    /// framet med uendret tilstand; ingen aktiv økt er også bare et
    /// typet utfall, aldri panikk.
    pub fn process(&mut self, frame: &LandmarkFrame) -> Result<FrameUpdate, TrackerError> {
        let now = self.clock.now();
        let session = self
            .session
            .as_mut()
            .ok_or(TrackerError::InactiveSession)?;

        let [a, b, c] = extract_joints(frame, session.profile).map_err(|e| {
            log::warn!(
                "skipping frame for {}: {}",
                session.profile.exercise,
                e
            );
            e
        })?;

        let angle = joint_angle_deg(a, b, c);

        // Formvurdering per frame: maks ett trekk, saturert mot 0.
        let form = check_form(angle, session.profile);
        session.form_score = session.form_score.saturating_sub(form.deduction);

        // Faselogikk: DOWN settes idempotent (hold gir bare ny feedback),
        // men rep telles kun på selve DOWN→UP-krysningen.
        if session.profile.enter_down.crossed(angle) {
            session.stage = Stage::Down;
            session.feedback = format!("{} - {}", form.message, session.profile.down_cue);
        } else if session.profile.enter_up.crossed(angle) && session.stage == Stage::Down {
            session.stage = Stage::Up;
            session.rep_count += 1;
            session
                .rep_times
                .push(now.timestamp_millis() as f64 / 1000.0);
            session.calories_burned = session.profile.calories_for(session.rep_count);

            let pace = pace_feedback(&session.rep_times, session.profile.ideal_rep_sec);
            session.feedback = format!("{} - {}", form.message, pace);
        }

        Ok(FrameUpdate {
            stage: session.stage,
            rep_count: session.rep_count,
            form_score: session.form_score,
            calories_burned: session.calories_burned,
            feedback: session.feedback.clone(),
            angle_deg: angle,
        })
    }

    /// Ikke-muterende øyeblikksbilde av aktiv økt. `None` når ingen økt.
    pub fn session_stats(&self) -> Option<SessionStats> {
        let session = self.session.as_ref()?;
        Some(SessionStats {
            exercise_type: session.profile.exercise,
            reps: session.rep_count,
            calories: session.calories_burned,
            form_score: session.form_score,
            duration: secs_between(session.start_time, self.clock.now()),
        })
    }

    /// Fullførte økter i kronologisk rekkefølge (prosess-levetid).
    pub fn history(&self) -> &[SessionSummary] {
        &self.history
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn set_goals(&mut self, goals: Goals) {
        self.goals = goals;
    }
}

fn secs_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

fn extract_joints(
    frame: &LandmarkFrame,
    profile: &ExerciseProfile,
) -> Result<[Point; 3], TrackerError> {
    let mut out = [Point::new(0.0, 0.0); 3];
    for (slot, landmark) in out.iter_mut().zip(profile.joints) {
        *slot = frame
            .get(landmark)
            .ok_or(TrackerError::MalformedLandmarks("missing or non-finite joint"))?;
    }
    Ok(out)
}
