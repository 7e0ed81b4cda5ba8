// SPDX-License-Identifier: GPL-3.0-only

//! Strip geometry
//!
//! The strip is laid out on a logical 300-wide, 960-tall canvas (1 : 3.2)
//! and every rectangle is emitted in device pixels for a given integer scale
//! factor. Preview and export run through the same layout, so what is shown
//! is exactly what gets exported.

use crate::constants::{STRIP_PHOTO_COUNT, strip};
use crate::templates::Template;

/// Axis-aligned rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Geometry of one photo cell
#[derive(Debug, Clone, Copy)]
pub struct CellLayout {
    /// Square region the decoded photo is resized into
    pub photo: Rect,
    /// Badge circle center, used when the template shows photo numbers
    pub badge_center: (u32, u32),
    /// Badge circle radius
    pub badge_radius: u32,
}

/// Complete strip geometry at a given scale
#[derive(Debug, Clone)]
pub struct StripLayout {
    pub scale: u32,
    pub width: u32,
    pub height: u32,
    /// Header caption band (present when the template has a header)
    pub header: Option<Rect>,
    pub cells: [CellLayout; STRIP_PHOTO_COUNT],
    /// Footer caption band (present when the template has a footer)
    pub footer: Option<Rect>,
}

/// Compute the strip layout for a template at an integer scale factor.
///
/// Cells divide the full height into three equal rows; each photo is a
/// square of side `width - 2*spacing`, top-aligned inside its padded row.
/// Header and footer bands overlay the top and bottom of the canvas.
pub fn layout(template: &Template, scale: u32) -> StripLayout {
    assert!(scale >= 1, "scale factor must be at least 1");

    let width = strip::BASE_WIDTH * scale;
    let height = strip::BASE_HEIGHT * scale;
    let spacing = template.spacing * scale;
    let cell_height = height / STRIP_PHOTO_COUNT as u32;
    let photo_side = width.saturating_sub(2 * spacing);

    let badge_radius = (strip::BADGE_DIAMETER * scale) / 2;
    let badge_inset = strip::BADGE_INSET * scale;

    let mut cells = Vec::with_capacity(STRIP_PHOTO_COUNT);
    for index in 0..STRIP_PHOTO_COUNT as u32 {
        let photo = Rect {
            x: spacing,
            y: index * cell_height + spacing,
            width: photo_side,
            height: photo_side,
        };
        let badge_center = (
            photo.right() - badge_inset - badge_radius,
            photo.bottom() - badge_inset - badge_radius,
        );
        cells.push(CellLayout {
            photo,
            badge_center,
            badge_radius,
        });
    }

    let band_height = strip::BAND_HEIGHT * scale;
    let header = template.header.map(|_| Rect {
        x: 0,
        y: 0,
        width,
        height: band_height,
    });
    let footer = template.footer.map(|_| Rect {
        x: 0,
        y: height - band_height,
        width,
        height: band_height,
    });

    StripLayout {
        scale,
        width,
        height,
        header,
        cells: [cells[0], cells[1], cells[2]],
        footer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    #[test]
    fn test_fixed_aspect_ratio() {
        for template in templates::all() {
            for scale in [1, 2, 3] {
                let layout = layout(template, scale);
                assert_eq!(layout.width, 300 * scale);
                assert_eq!(layout.height, 960 * scale);
            }
        }
    }

    #[test]
    fn test_cells_are_square_and_ordered() {
        let template = templates::find("classic").unwrap();
        let layout = layout(template, 2);
        for cell in &layout.cells {
            assert_eq!(cell.photo.width, cell.photo.height);
        }
        assert!(layout.cells[0].photo.y < layout.cells[1].photo.y);
        assert!(layout.cells[1].photo.y < layout.cells[2].photo.y);
    }

    #[test]
    fn test_photo_side_respects_spacing() {
        let polaroid = templates::find("polaroid").unwrap();
        let layout = layout(polaroid, 1);
        assert_eq!(layout.cells[0].photo.width, 300 - 2 * polaroid.spacing);
    }

    #[test]
    fn test_bands_follow_template_captions() {
        let minimal = templates::find("minimal").unwrap();
        let layout_minimal = layout(minimal, 1);
        assert!(layout_minimal.header.is_none());
        assert!(layout_minimal.footer.is_none());

        let classic = templates::find("classic").unwrap();
        let layout_classic = layout(classic, 1);
        assert!(layout_classic.header.is_some());
        assert_eq!(layout_classic.footer.unwrap().bottom(), layout_classic.height);
    }

    #[test]
    fn test_badge_inside_photo() {
        let vintage = templates::find("vintage").unwrap();
        let layout = layout(vintage, 2);
        for cell in &layout.cells {
            let (cx, cy) = cell.badge_center;
            assert!(cell.photo.contains(cx, cy));
        }
    }
}
