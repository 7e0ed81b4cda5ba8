// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use photobooth::constants::{STRIP_PHOTO_COUNT, countdown, strip};

#[test]
fn test_strip_holds_three_photos() {
    assert_eq!(STRIP_PHOTO_COUNT, 3);
}

#[test]
fn test_strip_aspect_ratio() {
    // width : height must stay 1 : 3.2
    let ratio = strip::BASE_HEIGHT as f32 / strip::BASE_WIDTH as f32;
    assert!((ratio - strip::ASPECT).abs() < 0.01);
}

#[test]
fn test_export_scale_doubles_preview() {
    assert!(strip::EXPORT_SCALE >= 2 * strip::PREVIEW_SCALE);
}

#[test]
fn test_countdown_runs_three_seconds() {
    assert_eq!(countdown::START, 3);
    assert_eq!(countdown::TICK_MS, 1000);
    assert!(countdown::SETTLE_MS > 0);
    assert!(countdown::SETTLE_MS < countdown::TICK_MS);
}
