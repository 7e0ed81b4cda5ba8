// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for strip composition and export

use photobooth::pipelines::photo::encode_jpeg;
use photobooth::pipelines::strip::{self, artifact_filename, compose};
use photobooth::session::Photo;
use photobooth::templates;
use std::sync::Arc;

fn photo(fill: [u8; 3]) -> Photo {
    let image = image::RgbImage::from_pixel(48, 48, image::Rgb(fill));
    let encoded = encode_jpeg(&image, 90).unwrap();
    Photo {
        data: Arc::from(encoded.data.into_boxed_slice()),
        width: 48,
        height: 48,
    }
}

fn photos() -> Vec<Photo> {
    vec![
        photo([220, 60, 60]),
        photo([60, 220, 60]),
        photo([60, 60, 220]),
    ]
}

#[test]
fn every_template_composes_at_export_scale() {
    let photos = photos();
    for template in templates::all() {
        let strip_image = compose(&photos, template, 2).unwrap();
        assert_eq!(strip_image.dimensions(), (600, 1920), "{}", template.id);
    }
}

#[test]
fn repeated_composition_is_pixel_identical() {
    let photos = photos();
    for template in ["classic", "colorful", "polaroid"] {
        let template = templates::find(template).unwrap();
        let first = compose(&photos, template, 2).unwrap();
        let second = compose(&photos, template, 2).unwrap();
        assert_eq!(first.as_raw(), second.as_raw(), "{}", template.id);
    }
}

#[test]
fn switching_template_changes_pixels_but_not_geometry() {
    let photos = photos();
    let classic = compose(&photos, templates::find("classic").unwrap(), 1).unwrap();
    let modern = compose(&photos, templates::find("modern").unwrap(), 1).unwrap();

    assert_eq!(classic.dimensions(), modern.dimensions());
    assert_ne!(classic.as_raw(), modern.as_raw());
}

#[test]
fn compose_requires_exactly_three_photos() {
    let template = templates::default_template();
    assert!(compose(&[], template, 1).is_err());
    assert!(compose(&photos()[..2], template, 1).is_err());
    assert!(compose(&photos(), template, 1).is_ok());
}

#[test]
fn artifact_filename_is_time_based_png() {
    let name = artifact_filename(1_754_000_000_000);
    assert_eq!(name, "photo-strip-1754000000000.png");

    // Distinct timestamps yield unique names
    assert_ne!(artifact_filename(1), artifact_filename(2));
}

#[test]
fn exported_artifact_is_valid_png_at_double_scale() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let template = templates::find("vintage").unwrap();
    let artifact = rt
        .block_on(strip::render_artifact(photos(), template))
        .unwrap();

    assert_eq!(artifact.width, 600);
    assert_eq!(artifact.height, 1920);

    let decoded = image::load_from_memory(&artifact.data).unwrap();
    assert_eq!(decoded.width(), 600);
    assert_eq!(decoded.height(), 1920);
}

#[test]
fn export_is_deterministic_for_unchanged_session() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let template = templates::find("minimal").unwrap();
    let photos = photos();

    let first = rt
        .block_on(strip::render_artifact(photos.clone(), template))
        .unwrap();
    let second = rt
        .block_on(strip::render_artifact(photos, template))
        .unwrap();

    assert_eq!(first.data.as_ref(), second.data.as_ref());
}

#[test]
fn preview_and_export_share_proportions() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let template = templates::find("classic").unwrap();
    let (pixels, width, height) = rt
        .block_on(strip::render_preview(photos(), template))
        .unwrap();

    assert_eq!((width, height), (300, 960));
    assert_eq!(pixels.len(), (width * height * 4) as usize);
}
