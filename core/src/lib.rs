pub mod exercises;
pub mod geometry;
pub mod scoring;
pub mod tracker;
pub mod types;

pub mod py;

pub use exercises::{profile_for, Exercise, ExerciseProfile, Landmark, LandmarkFrame, Threshold};
pub use geometry::joint_angle_deg;
pub use scoring::{check_form, pace_feedback, FormCheck, START_FORM_SCORE};
pub use tracker::{Clock, ManualClock, RepCounter, SystemClock, TrackerError};
pub use types::{FrameUpdate, Goals, Point, SessionStats, SessionSummary, Stage};
