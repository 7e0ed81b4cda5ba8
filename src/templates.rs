// SPDX-License-Identifier: GPL-3.0-only

//! Static catalog of strip templates
//!
//! A template is a pure bundle of presentation data: colors, borders, spacing,
//! caption text and the per-photo effect. The strip compositor consumes these
//! fields without any template-specific branching beyond optional-field
//! presence, so every preset must supply a coherent set of values.

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
}

/// Strip background fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundFill {
    Solid(Rgb),
    /// Top-to-bottom gradient through the listed stops (evenly spaced)
    VerticalGradient(&'static [Rgb]),
}

/// Visual effect baked into each photo cell at composition time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhotoEffect {
    None,
    /// Partial sepia toning, amount in [0, 1]
    Sepia(f32),
    /// Brightness multiplier (1.0 = unchanged)
    Brighten(f32),
    /// Contrast multiplier around mid-gray (1.0 = unchanged)
    Contrast(f32),
}

/// Border stroke: width in layout units plus color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSpec {
    pub width: u32,
    pub color: Rgb,
}

/// Drop shadow behind a photo cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub dx: i32,
    pub dy: i32,
    pub blur: u32,
    pub alpha: f32,
}

/// Header or footer caption band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caption {
    pub text: &'static str,
    pub color: Rgb,
}

/// Per-photo index badge (1-based number in a filled circle)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSpec {
    pub background: Rgb,
    pub color: Rgb,
}

/// Immutable named bundle of presentation attributes for the photo strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub background: BackgroundFill,
    pub corner_radius: u32,
    pub border: Option<BorderSpec>,
    /// Padding around each photo cell, in layout units
    pub spacing: u32,
    pub photo_corner_radius: u32,
    pub photo_border: Option<BorderSpec>,
    pub photo_shadow: Option<ShadowSpec>,
    pub photo_effect: PhotoEffect,
    pub header: Option<Caption>,
    pub footer: Option<Caption>,
    pub photo_number: Option<BadgeSpec>,
}

const CLASSIC: Template = Template {
    id: "classic",
    name: "Classic",
    background: BackgroundFill::Solid(Rgb::WHITE),
    corner_radius: 0,
    border: Some(BorderSpec {
        width: 1,
        color: Rgb::BLACK,
    }),
    spacing: 8,
    photo_corner_radius: 0,
    photo_border: Some(BorderSpec {
        width: 1,
        color: Rgb::BLACK,
    }),
    photo_shadow: None,
    photo_effect: PhotoEffect::None,
    header: Some(Caption {
        text: "PHOTO BOOTH",
        color: Rgb::BLACK,
    }),
    footer: Some(Caption {
        text: "memories captured",
        color: Rgb::BLACK,
    }),
    photo_number: None,
};

const VINTAGE: Template = Template {
    id: "vintage",
    name: "Vintage",
    background: BackgroundFill::Solid(Rgb::new(0xf5, 0xe8, 0xc9)),
    corner_radius: 0,
    border: Some(BorderSpec {
        width: 4,
        color: Rgb::new(0x8b, 0x45, 0x13),
    }),
    spacing: 16,
    photo_corner_radius: 0,
    photo_border: Some(BorderSpec {
        width: 4,
        color: Rgb::new(0x8b, 0x45, 0x13),
    }),
    photo_shadow: Some(ShadowSpec {
        dx: 2,
        dy: 2,
        blur: 8,
        alpha: 0.3,
    }),
    photo_effect: PhotoEffect::Sepia(0.5),
    header: Some(Caption {
        text: "MEMORIES",
        color: Rgb::new(0x8b, 0x45, 0x13),
    }),
    footer: Some(Caption {
        text: "captured moments",
        color: Rgb::new(0x8b, 0x45, 0x13),
    }),
    photo_number: Some(BadgeSpec {
        background: Rgb::new(0x8b, 0x45, 0x13),
        color: Rgb::new(0xf5, 0xe8, 0xc9),
    }),
};

const MODERN: Template = Template {
    id: "modern",
    name: "Modern",
    background: BackgroundFill::Solid(Rgb::BLACK),
    corner_radius: 16,
    border: None,
    spacing: 4,
    photo_corner_radius: 8,
    photo_border: None,
    photo_shadow: Some(ShadowSpec {
        dx: 0,
        dy: 4,
        blur: 12,
        alpha: 0.5,
    }),
    photo_effect: PhotoEffect::None,
    header: Some(Caption {
        text: "PHOTO STRIP",
        color: Rgb::WHITE,
    }),
    footer: Some(Caption {
        text: "created with arctabooth",
        color: Rgb::WHITE,
    }),
    photo_number: None,
};

const COLORFUL_STOPS: [Rgb; 4] = [
    Rgb::new(0xff, 0x9a, 0x9e),
    Rgb::new(0xfa, 0xd0, 0xc4),
    Rgb::new(0xfa, 0xd0, 0xc4),
    Rgb::new(0xa1, 0xc4, 0xfd),
];

const COLORFUL: Template = Template {
    id: "colorful",
    name: "Colorful",
    background: BackgroundFill::VerticalGradient(&COLORFUL_STOPS),
    corner_radius: 12,
    border: Some(BorderSpec {
        width: 2,
        color: Rgb::WHITE,
    }),
    spacing: 12,
    photo_corner_radius: 8,
    photo_border: Some(BorderSpec {
        width: 4,
        color: Rgb::WHITE,
    }),
    photo_shadow: Some(ShadowSpec {
        dx: 0,
        dy: 6,
        blur: 12,
        alpha: 0.2,
    }),
    photo_effect: PhotoEffect::Brighten(1.1),
    header: Some(Caption {
        text: "FUN MEMORIES",
        color: Rgb::WHITE,
    }),
    footer: Some(Caption {
        text: "smile!!",
        color: Rgb::WHITE,
    }),
    photo_number: Some(BadgeSpec {
        background: Rgb::WHITE,
        color: Rgb::new(0xff, 0x9a, 0x9e),
    }),
};

const MINIMAL: Template = Template {
    id: "minimal",
    name: "Minimal",
    background: BackgroundFill::Solid(Rgb::new(0xf8, 0xf9, 0xfa)),
    corner_radius: 4,
    border: None,
    spacing: 2,
    photo_corner_radius: 0,
    photo_border: None,
    photo_shadow: None,
    photo_effect: PhotoEffect::None,
    header: None,
    footer: None,
    photo_number: None,
};

const POLAROID: Template = Template {
    id: "polaroid",
    name: "Polaroid",
    background: BackgroundFill::Solid(Rgb::WHITE),
    corner_radius: 0,
    border: None,
    spacing: 24,
    photo_corner_radius: 0,
    photo_border: Some(BorderSpec {
        width: 12,
        color: Rgb::WHITE,
    }),
    photo_shadow: Some(ShadowSpec {
        dx: 0,
        dy: 8,
        blur: 16,
        alpha: 0.15,
    }),
    photo_effect: PhotoEffect::Contrast(1.1),
    header: None,
    footer: Some(Caption {
        text: "shake it like a polaroid picture",
        color: Rgb::new(0x88, 0x88, 0x88),
    }),
    photo_number: None,
};

/// All presets, in display order
pub const TEMPLATES: [Template; 6] = [CLASSIC, VINTAGE, MODERN, COLORFUL, MINIMAL, POLAROID];

/// Enumerate the catalog
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

/// Look up a template by its id
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// The template selected when a session starts
pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert!(all().len() >= 6);
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in TEMPLATES.iter().enumerate() {
            for b in &TEMPLATES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let vintage = find("vintage").expect("vintage preset exists");
        assert_eq!(vintage.name, "Vintage");
        assert!(vintage.photo_number.is_some());
        assert!(find("no-such-template").is_none());
    }

    #[test]
    fn test_default_is_first() {
        assert_eq!(default_template().id, TEMPLATES[0].id);
    }

    #[test]
    fn test_captions_have_text() {
        for template in all() {
            if let Some(header) = &template.header {
                assert!(!header.text.is_empty(), "{} header empty", template.id);
            }
            if let Some(footer) = &template.footer {
                assert!(!footer.text.is_empty(), "{} footer empty", template.id);
            }
        }
    }
}
