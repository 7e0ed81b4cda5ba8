// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the booth session state machine

use photobooth::session::{FinalArtifact, Phase, Photo, Session};
use photobooth::templates;
use std::sync::Arc;

fn photo() -> Photo {
    Photo {
        data: Arc::from(vec![0u8; 32].into_boxed_slice()),
        width: 8,
        height: 8,
    }
}

fn artifact() -> FinalArtifact {
    FinalArtifact {
        data: Arc::from(vec![0u8; 64].into_boxed_slice()),
        width: 600,
        height: 1920,
    }
}

#[test]
fn capturing_to_customizing_happens_exactly_once() {
    let mut session = Session::new();
    let mut transitions = 0;

    for _ in 0..3 {
        let before = session.phase();
        let outcome = session.complete_capture(photo()).unwrap();
        if before == Phase::Capturing && session.phase() == Phase::Customizing {
            transitions += 1;
            assert!(outcome.completed_set);
        }
    }

    assert_eq!(transitions, 1);
    assert_eq!(session.photo_count(), 3);
}

#[test]
fn retake_preserves_count_and_phase() {
    let mut session = Session::new();
    session.complete_capture(photo()).unwrap();
    session.complete_capture(photo()).unwrap();

    session.request_retake(0).unwrap();
    let outcome = session.complete_capture(photo()).unwrap();

    assert_eq!(outcome.slot, 0);
    assert!(outcome.replaced);
    assert_eq!(session.photo_count(), 2);
    assert_eq!(session.phase(), Phase::Capturing);
    assert_eq!(session.retake_slot(), None);
}

#[test]
fn cancel_retake_restores_append_semantics() {
    let mut session = Session::new();
    session.complete_capture(photo()).unwrap();
    session.request_retake(0).unwrap();
    session.cancel_retake();

    let outcome = session.complete_capture(photo()).unwrap();
    assert_eq!(outcome.slot, 1);
    assert!(!outcome.replaced);
}

#[test]
fn reset_is_idempotent_from_every_phase() {
    // From Capturing
    let mut session = Session::new();
    session.complete_capture(photo()).unwrap();
    session.reset();
    assert_eq!(session.phase(), Phase::Capturing);
    assert_eq!(session.photo_count(), 0);

    // From Customizing
    for _ in 0..3 {
        session.complete_capture(photo()).unwrap();
    }
    assert_eq!(session.phase(), Phase::Customizing);
    session.reset();
    assert_eq!(session.phase(), Phase::Capturing);

    // From Downloading, twice in a row
    for _ in 0..3 {
        session.complete_capture(photo()).unwrap();
    }
    session.store_artifact(artifact()).unwrap();
    assert_eq!(session.phase(), Phase::Downloading);
    session.reset();
    session.reset();
    assert_eq!(session.phase(), Phase::Capturing);
    assert_eq!(session.photo_count(), 0);
    assert_eq!(session.retake_slot(), None);
    assert!(session.artifact().is_none());
}

#[test]
fn template_selection_changes_only_the_reference() {
    let mut session = Session::new();
    for _ in 0..3 {
        session.complete_capture(photo()).unwrap();
    }

    let photos_before: Vec<_> = session.photos().iter().map(|p| p.data.clone()).collect();
    let vintage = templates::find("vintage").unwrap();
    session.select_template(vintage).unwrap();

    assert_eq!(session.template().id, "vintage");
    assert_eq!(session.phase(), Phase::Customizing);
    for (before, after) in photos_before.iter().zip(session.photos()) {
        assert!(Arc::ptr_eq(before, &after.data));
    }
}

#[test]
fn artifact_moves_session_to_downloading() {
    let mut session = Session::new();
    for _ in 0..3 {
        session.complete_capture(photo()).unwrap();
    }

    session.store_artifact(artifact()).unwrap();
    assert_eq!(session.phase(), Phase::Downloading);
    assert!(session.artifact().is_some());
}

#[test]
fn customizing_requires_three_photos() {
    let mut session = Session::new();
    session.complete_capture(photo()).unwrap();
    session.complete_capture(photo()).unwrap();

    assert_eq!(session.phase(), Phase::Capturing);
    let vintage = templates::find("vintage").unwrap();
    assert!(session.select_template(vintage).is_err());
    assert!(session.store_artifact(artifact()).is_err());
}
