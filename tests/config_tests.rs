// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use photobooth::Config;
use photobooth::backends::camera::FacingMode;
use photobooth::templates;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(
        config.mirror_preview, true,
        "Mirror preview should be enabled by default"
    );
    assert_eq!(
        config.last_facing,
        FacingMode::Front,
        "Front camera should be the default"
    );
}

#[test]
fn test_config_default_template_exists() {
    let config = Config::default();
    assert!(
        templates::find(&config.last_template).is_some(),
        "Default template id must exist in the catalog"
    );
}
