use crate::exercises::ExerciseProfile;

/// Formscore ved øktstart.
pub const START_FORM_SCORE: u8 = 100;

/// Utfall av formsjekken for ett frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCheck {
    /// Poengtrekk (0, 2 eller 5). Telleren saturerer mot 0.
    pub deduction: u8,
    pub message: &'static str,
}

/// Avviksbånd rundt profilens idealområde [min_angle, max_angle]:
/// innenfor ±5° → ok, 5–10° utenfor → −2, mer enn 10° utenfor → −5.
pub fn check_form(angle_deg: f64, profile: &ExerciseProfile) -> FormCheck {
    let (lo, hi) = (profile.min_angle, profile.max_angle);

    if angle_deg < lo - 10.0 || angle_deg > hi + 10.0 {
        FormCheck {
            deduction: 5,
            message: "Poor form detected! Adjust your position.",
        }
    } else if angle_deg < lo - 5.0 || angle_deg > hi + 5.0 {
        FormCheck {
            deduction: 2,
            message: "Form needs slight adjustment",
        }
    } else {
        FormCheck {
            deduction: 0,
            message: "Good form!",
        }
    }
}

/// Tempo-tilbakemelding fra siste rep-intervall mot idealtempo ± 0.5 s.
/// `rep_times` er epoch-sekunder, append-only; færre enn to reps gir
/// nøytral melding.
pub fn pace_feedback(rep_times: &[f64], ideal_rep_sec: f64) -> &'static str {
    let n = rep_times.len();
    if n < 2 {
        return "Maintain steady pace";
    }

    let last_interval = rep_times[n - 1] - rep_times[n - 2];

    if last_interval < ideal_rep_sec - 0.5 {
        "Slow down for better form"
    } else if last_interval > ideal_rep_sec + 0.5 {
        "Try to maintain a steady pace"
    } else {
        "Perfect speed!"
    }
}
