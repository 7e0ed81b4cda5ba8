// SPDX-License-Identifier: GPL-3.0-only

//! Booth session state machine
//!
//! A session walks through three phases: Capturing (collect three photos,
//! with an optional retake overriding append semantics), Customizing (pick a
//! template, compose the strip) and Downloading (artifact ready). The session
//! owns the captured photos; photos are opaque encoded images and are
//! replaced wholesale on retake.

use crate::constants::STRIP_PHOTO_COUNT;
use crate::templates::{self, Template};
use std::fmt;
use std::sync::Arc;

/// Workflow position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Capturing,
    Customizing,
    Downloading,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Capturing => write!(f, "Capturing"),
            Phase::Customizing => write!(f, "Customizing"),
            Phase::Downloading => write!(f, "Downloading"),
        }
    }
}

/// An encoded still image produced by the capture pipeline.
///
/// Immutable once created; the session owns it until it is overwritten by a
/// retake or the session resets.
#[derive(Debug, Clone)]
pub struct Photo {
    /// JPEG-encoded pixel data
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// The rasterized, downloadable strip. Derived, never mutated.
#[derive(Debug, Clone)]
pub struct FinalArtifact {
    /// PNG-encoded strip
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// What a completed capture did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Slot the photo landed in
    pub slot: usize,
    /// True when an existing photo was replaced (retake)
    pub replaced: bool,
    /// True when this capture completed the set and advanced the phase
    pub completed_set: bool,
}

/// Session state transition errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// All photo slots are filled and no retake is pending
    PhotosFull,
    /// Retake index does not reference an existing photo
    InvalidSlot(usize),
    /// Operation is not legal in the current phase
    WrongPhase { expected: Phase, actual: Phase },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::PhotosFull => write!(f, "All photo slots are already filled"),
            SessionError::InvalidSlot(index) => {
                write!(f, "Retake slot {} does not reference a photo", index)
            }
            SessionError::WrongPhase { expected, actual } => {
                write!(f, "Operation requires {} phase, session is {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// The booth session: ordered photos, workflow phase, optional retake slot,
/// active template and (in the Downloading phase) the final artifact.
#[derive(Debug, Clone)]
pub struct Session {
    photos: Vec<Photo>,
    phase: Phase,
    retake_slot: Option<usize>,
    template: &'static Template,
    artifact: Option<FinalArtifact>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session in the Capturing phase
    pub fn new() -> Self {
        Self::with_template(templates::default_template())
    }

    /// Create an empty session with a preselected template (e.g. the one
    /// persisted from the previous run)
    pub fn with_template(template: &'static Template) -> Self {
        Self {
            photos: Vec::with_capacity(STRIP_PHOTO_COUNT),
            phase: Phase::Capturing,
            retake_slot: None,
            template,
            artifact: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn retake_slot(&self) -> Option<usize> {
        self.retake_slot
    }

    pub fn template(&self) -> &'static Template {
        self.template
    }

    pub fn artifact(&self) -> Option<&FinalArtifact> {
        self.artifact.as_ref()
    }

    /// True once all photo slots are filled
    pub fn is_complete(&self) -> bool {
        self.photos.len() == STRIP_PHOTO_COUNT
    }

    /// The slot the next completed capture will fill: the pending retake
    /// slot, or the append position.
    pub fn next_capture_slot(&self) -> usize {
        self.retake_slot.unwrap_or(self.photos.len())
    }

    /// Record a completed capture.
    ///
    /// With a retake pending the photo replaces the marked slot and the
    /// retake is cleared; the phase never changes on a retake. Otherwise the
    /// photo is appended, and filling the last slot advances the session to
    /// Customizing.
    pub fn complete_capture(&mut self, photo: Photo) -> Result<CaptureOutcome, SessionError> {
        if let Some(slot) = self.retake_slot.take() {
            // Invariant: retake_slot always references an existing photo
            debug_assert!(slot < self.photos.len());
            self.photos[slot] = photo;
            return Ok(CaptureOutcome {
                slot,
                replaced: true,
                completed_set: false,
            });
        }

        if self.phase != Phase::Capturing {
            return Err(SessionError::WrongPhase {
                expected: Phase::Capturing,
                actual: self.phase,
            });
        }
        if self.photos.len() >= STRIP_PHOTO_COUNT {
            return Err(SessionError::PhotosFull);
        }

        let slot = self.photos.len();
        self.photos.push(photo);

        let completed_set = self.photos.len() == STRIP_PHOTO_COUNT;
        if completed_set {
            self.phase = Phase::Customizing;
        }

        Ok(CaptureOutcome {
            slot,
            replaced: false,
            completed_set,
        })
    }

    /// Mark a slot for re-capture. The next completed capture overwrites it
    /// instead of appending. Does not change the phase.
    pub fn request_retake(&mut self, slot: usize) -> Result<(), SessionError> {
        if self.phase != Phase::Capturing {
            return Err(SessionError::WrongPhase {
                expected: Phase::Capturing,
                actual: self.phase,
            });
        }
        if slot >= self.photos.len() {
            return Err(SessionError::InvalidSlot(slot));
        }
        self.retake_slot = Some(slot);
        Ok(())
    }

    /// Abandon a pending retake without capturing
    pub fn cancel_retake(&mut self) {
        self.retake_slot = None;
    }

    /// Select the active template. Pure reference assignment, only legal
    /// while customizing.
    pub fn select_template(&mut self, template: &'static Template) -> Result<(), SessionError> {
        if self.phase != Phase::Customizing {
            return Err(SessionError::WrongPhase {
                expected: Phase::Customizing,
                actual: self.phase,
            });
        }
        self.template = template;
        Ok(())
    }

    /// Store a successfully composed artifact and advance to Downloading
    pub fn store_artifact(&mut self, artifact: FinalArtifact) -> Result<(), SessionError> {
        if self.phase != Phase::Customizing {
            return Err(SessionError::WrongPhase {
                expected: Phase::Customizing,
                actual: self.phase,
            });
        }
        self.artifact = Some(artifact);
        self.phase = Phase::Downloading;
        Ok(())
    }

    /// Discard everything and return to an empty Capturing session.
    /// Idempotent; legal from any phase. The template choice survives the
    /// reset so a follow-up strip keeps the user's pick.
    pub fn reset(&mut self) {
        self.photos.clear();
        self.retake_slot = None;
        self.artifact = None;
        self.phase = Phase::Capturing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_photo() -> Photo {
        Photo {
            data: Arc::from(vec![0xffu8; 16].into_boxed_slice()),
            width: 4,
            height: 4,
        }
    }

    #[test]
    fn test_three_captures_advance_once() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Capturing);

        for expected_slot in 0..2 {
            let outcome = session.complete_capture(test_photo()).unwrap();
            assert_eq!(outcome.slot, expected_slot);
            assert!(!outcome.completed_set);
            assert_eq!(session.phase(), Phase::Capturing);
        }

        let outcome = session.complete_capture(test_photo()).unwrap();
        assert!(outcome.completed_set);
        assert_eq!(session.phase(), Phase::Customizing);

        // A fourth capture is rejected
        assert!(session.complete_capture(test_photo()).is_err());
    }

    #[test]
    fn test_retake_replaces_in_place() {
        let mut session = Session::new();
        session.complete_capture(test_photo()).unwrap();
        session.complete_capture(test_photo()).unwrap();

        session.request_retake(0).unwrap();
        assert_eq!(session.next_capture_slot(), 0);

        let outcome = session.complete_capture(test_photo()).unwrap();
        assert_eq!(outcome.slot, 0);
        assert!(outcome.replaced);
        assert_eq!(session.photo_count(), 2);
        assert_eq!(session.phase(), Phase::Capturing);
        assert_eq!(session.retake_slot(), None);
    }

    #[test]
    fn test_retake_out_of_range() {
        let mut session = Session::new();
        session.complete_capture(test_photo()).unwrap();
        assert_eq!(session.request_retake(1), Err(SessionError::InvalidSlot(1)));
    }

    #[test]
    fn test_template_select_requires_customizing() {
        let mut session = Session::new();
        let vintage = crate::templates::find("vintage").unwrap();
        assert!(session.select_template(vintage).is_err());

        for _ in 0..3 {
            session.complete_capture(test_photo()).unwrap();
        }
        session.select_template(vintage).unwrap();
        assert_eq!(session.template().id, "vintage");
        // Photos are untouched by template selection
        assert_eq!(session.photo_count(), 3);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.complete_capture(test_photo()).unwrap();
        }
        session
            .store_artifact(FinalArtifact {
                data: Arc::from(vec![0u8; 8].into_boxed_slice()),
                width: 600,
                height: 1920,
            })
            .unwrap();
        assert_eq!(session.phase(), Phase::Downloading);

        session.reset();
        session.reset();
        assert_eq!(session.phase(), Phase::Capturing);
        assert_eq!(session.photo_count(), 0);
        assert_eq!(session.retake_slot(), None);
        assert!(session.artifact().is_none());
    }

    #[test]
    fn test_store_artifact_requires_customizing() {
        let mut session = Session::new();
        let artifact = FinalArtifact {
            data: Arc::from(vec![0u8; 8].into_boxed_slice()),
            width: 600,
            height: 1920,
        };
        assert!(session.store_artifact(artifact).is_err());
    }
}
