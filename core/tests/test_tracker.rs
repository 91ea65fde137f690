use fitpose_core::{
    profile_for, Exercise, LandmarkFrame, Point, RepCounter, Stage, TrackerError,
};

/// Bygger et frame der profilens tre ledd gir nøyaktig ønsket vinkel:
/// proksimal rett ut fra pivot, distal rotert `angle_deg` rundt den.
fn frame_with_angle(exercise: Exercise, angle_deg: f64) -> LandmarkFrame {
    let profile = profile_for(exercise);
    let pivot = Point::new(0.5, 0.5);
    let proximal = Point::new(0.7, 0.5);
    let theta = angle_deg.to_radians();
    let distal = Point::new(0.5 + 0.2 * theta.cos(), 0.5 + 0.2 * theta.sin());

    let mut points = vec![Point::new(0.0, 0.0); 33];
    points[profile.joints[0].pose_index()] = proximal;
    points[profile.joints[1].pose_index()] = pivot;
    points[profile.joints[2].pose_index()] = distal;
    LandmarkFrame::new(points)
}

#[test]
fn test_bicep_curl_scenario_170_20() {
    let mut counter = RepCounter::new();
    counter.start("bicep_curl").expect("kjent øvelse");

    // 170° => DOWN, 20° => DOWN→UP-krysning som teller én rep
    let down = counter
        .process(&frame_with_angle(Exercise::BicepCurl, 170.0))
        .expect("gyldig frame");
    assert_eq!(down.stage, Stage::Down);
    assert_eq!(down.rep_count, 0);

    let up = counter
        .process(&frame_with_angle(Exercise::BicepCurl, 20.0))
        .expect("gyldig frame");
    assert_eq!(up.stage, Stage::Up);
    assert_eq!(up.rep_count, 1);
    assert!((up.calories_burned - 0.32).abs() < 1e-9);
}

#[test]
fn test_squat_scenario_65_165() {
    let mut counter = RepCounter::new();
    counter.start("squat").expect("kjent øvelse");

    counter
        .process(&frame_with_angle(Exercise::Squat, 65.0))
        .expect("gyldig frame");
    let up = counter
        .process(&frame_with_angle(Exercise::Squat, 165.0))
        .expect("gyldig frame");

    assert_eq!(up.rep_count, 1);
    assert!((up.calories_burned - 0.45).abs() < 1e-9);
}

#[test]
fn test_hold_i_ytterstilling_teller_ikke_dobbelt() {
    let mut counter = RepCounter::new();
    counter.start("bicep_curl").expect("kjent øvelse");

    counter
        .process(&frame_with_angle(Exercise::BicepCurl, 170.0))
        .expect("gyldig frame");

    // Hold i flektert stilling over flere frames: kun krysningen teller
    for _ in 0..5 {
        let update = counter
            .process(&frame_with_angle(Exercise::BicepCurl, 20.0))
            .expect("gyldig frame");
        assert_eq!(update.rep_count, 1);
        assert_eq!(update.stage, Stage::Up);
    }

    // Ny full syklus gir nøyaktig én rep til
    counter
        .process(&frame_with_angle(Exercise::BicepCurl, 170.0))
        .expect("gyldig frame");
    let update = counter
        .process(&frame_with_angle(Exercise::BicepCurl, 20.0))
        .expect("gyldig frame");
    assert_eq!(update.rep_count, 2);
}

#[test]
fn test_hold_i_down_teller_ingenting() {
    let mut counter = RepCounter::new();
    counter.start("pushup").expect("kjent øvelse");

    // Pushup går i DOWN under 90°; å bli liggende der gir null reps
    for _ in 0..10 {
        let update = counter
            .process(&frame_with_angle(Exercise::Pushup, 85.0))
            .expect("gyldig frame");
        assert_eq!(update.rep_count, 0);
        assert_eq!(update.stage, Stage::Down);
    }
}

#[test]
fn test_ukjent_oevelse_gir_feil_uten_oekt() {
    let mut counter = RepCounter::new();
    let err = counter.start("lunge").unwrap_err();
    assert_eq!(err, TrackerError::InvalidExercise("lunge".to_string()));
    assert!(!counter.is_tracking());
    assert!(counter.session_stats().is_none());
}

#[test]
fn test_ukjent_oevelse_roerer_ikke_aktiv_oekt() {
    let mut counter = RepCounter::new();
    counter.start("squat").expect("kjent øvelse");
    counter
        .process(&frame_with_angle(Exercise::Squat, 65.0))
        .expect("gyldig frame");
    counter
        .process(&frame_with_angle(Exercise::Squat, 165.0))
        .expect("gyldig frame");

    assert!(counter.start("lunge").is_err());

    let stats = counter.session_stats().expect("økten lever fortsatt");
    assert_eq!(stats.exercise_type, Exercise::Squat);
    assert_eq!(stats.reps, 1);
}

#[test]
fn test_start_nullstiller_uansett_tidligere_tilstand() {
    let mut counter = RepCounter::new();
    counter.start("bicep_curl").expect("kjent øvelse");

    // Skit til økten: én rep og dårlig form
    counter
        .process(&frame_with_angle(Exercise::BicepCurl, 170.0))
        .expect("gyldig frame");
    counter
        .process(&frame_with_angle(Exercise::BicepCurl, 10.0))
        .expect("gyldig frame");
    let dirty = counter.session_stats().expect("aktiv økt");
    assert_eq!(dirty.reps, 1);
    assert!(dirty.form_score < 100);

    counter.start("bicep_curl").expect("restart");
    let fresh = counter.session_stats().expect("aktiv økt");
    assert_eq!(fresh.reps, 0);
    assert_eq!(fresh.form_score, 100);
    assert_eq!(fresh.calories, 0.0);
}

#[test]
fn test_form_score_er_monoton_og_bunner_paa_null() {
    let mut counter = RepCounter::new();
    counter.start("bicep_curl").expect("kjent øvelse");

    // 95° ligger midt i idealområdet => ingen trekk
    let ok = counter
        .process(&frame_with_angle(Exercise::BicepCurl, 95.0))
        .expect("gyldig frame");
    assert_eq!(ok.form_score, 100);

    // 10° er mer enn 10 under min_angle => −5 per frame, saturert mot 0
    let mut prev = 100u8;
    for _ in 0..25 {
        let update = counter
            .process(&frame_with_angle(Exercise::BicepCurl, 10.0))
            .expect("gyldig frame");
        assert!(update.form_score <= prev);
        prev = update.form_score;
    }
    assert_eq!(prev, 0);
}

#[test]
fn test_nan_landemerke_hopper_over_frame_uten_mutasjon() {
    let mut counter = RepCounter::new();
    counter.start("bicep_curl").expect("kjent øvelse");
    counter
        .process(&frame_with_angle(Exercise::BicepCurl, 170.0))
        .expect("gyldig frame");
    let before = counter.session_stats().expect("aktiv økt");

    let mut points = vec![Point::new(0.5, 0.5); 33];
    points[13] = Point::new(f64::NAN, 0.5); // venstre albue ødelagt
    let err = counter.process(&LandmarkFrame::new(points)).unwrap_err();
    assert!(matches!(err, TrackerError::MalformedLandmarks(_)));

    let after = counter.session_stats().expect("aktiv økt");
    assert_eq!(after.reps, before.reps);
    assert_eq!(after.form_score, before.form_score);

    // Økten fortsetter som om framet aldri kom
    let update = counter
        .process(&frame_with_angle(Exercise::BicepCurl, 20.0))
        .expect("gyldig frame");
    assert_eq!(update.rep_count, 1);
}

#[test]
fn test_for_kort_landemerkeliste_er_malformed() {
    let mut counter = RepCounter::new();
    counter.start("squat").expect("kjent øvelse");

    // Kun 20 punkter: ankel (indeks 27) mangler helt
    let err = counter
        .process(&LandmarkFrame::new(vec![Point::new(0.5, 0.5); 20]))
        .unwrap_err();
    assert!(matches!(err, TrackerError::MalformedLandmarks(_)));
}

#[test]
fn test_process_uten_oekt_er_typet_utfall() {
    let mut counter = RepCounter::new();
    let err = counter
        .process(&frame_with_angle(Exercise::BicepCurl, 95.0))
        .unwrap_err();
    assert_eq!(err, TrackerError::InactiveSession);
}

#[test]
fn test_stop_uten_oekt_rapporterer_inactive() {
    let mut counter = RepCounter::new();
    assert_eq!(counter.stop().unwrap_err(), TrackerError::InactiveSession);
    assert!(counter.history().is_empty());
}

#[test]
fn test_feedback_ved_down_inneholder_instruksjon() {
    let mut counter = RepCounter::new();
    counter.start("squat").expect("kjent øvelse");
    let update = counter
        .process(&frame_with_angle(Exercise::Squat, 80.0))
        .expect("gyldig frame");
    assert_eq!(update.stage, Stage::Down);
    assert!(update.feedback.contains("Push through heels"));
    assert!(update.feedback.contains("Good form!"));
}
