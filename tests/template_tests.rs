// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the template catalog

use photobooth::templates::{self, BackgroundFill, PhotoEffect};

#[test]
fn catalog_has_at_least_six_presets() {
    assert!(templates::all().len() >= 6);
}

#[test]
fn lookup_matches_enumeration() {
    for template in templates::all() {
        let found = templates::find(template.id).expect("every listed id resolves");
        assert!(std::ptr::eq(found, template), "lookup is a pure reference");
    }
}

#[test]
fn vintage_is_the_sepia_numbered_preset() {
    let vintage = templates::find("vintage").unwrap();
    assert!(matches!(vintage.photo_effect, PhotoEffect::Sepia(_)));
    assert!(vintage.photo_number.is_some());
    assert!(vintage.header.is_some());
    assert!(vintage.footer.is_some());
}

#[test]
fn minimal_has_no_decoration() {
    let minimal = templates::find("minimal").unwrap();
    assert!(minimal.header.is_none());
    assert!(minimal.footer.is_none());
    assert!(minimal.photo_number.is_none());
    assert!(minimal.photo_border.is_none());
    assert!(minimal.photo_shadow.is_none());
}

#[test]
fn gradient_backgrounds_have_stops() {
    for template in templates::all() {
        if let BackgroundFill::VerticalGradient(stops) = template.background {
            assert!(stops.len() >= 2, "{} gradient needs stops", template.id);
        }
    }
}

#[test]
fn spacing_leaves_room_for_photos() {
    // A photo cell must keep a positive side length after padding
    for template in templates::all() {
        assert!(
            template.spacing * 2 < 300,
            "{} spacing consumes the whole strip width",
            template.id
        );
    }
}
