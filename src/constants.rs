// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Number of photos in a finished strip
pub const STRIP_PHOTO_COUNT: usize = 3;

/// Countdown and capture timing
pub mod countdown {
    /// Countdown start value (3-2-1)
    pub const START: u8 = 3;

    /// Milliseconds per countdown tick
    pub const TICK_MS: u64 = 1000;

    /// Settle delay between countdown reaching zero and the actual capture
    pub const SETTLE_MS: u64 = 100;
}

/// Capture format preferences
pub mod capture {
    /// Ideal preview/capture resolution
    pub const IDEAL_WIDTH: u32 = 1280;
    pub const IDEAL_HEIGHT: u32 = 720;

    /// Lower bound used on constrained devices when the ideal format is
    /// unavailable
    pub const FALLBACK_WIDTH: u32 = 640;
    pub const FALLBACK_HEIGHT: u32 = 480;

    /// JPEG quality for captured photos (0-100)
    pub const PHOTO_JPEG_QUALITY: u8 = 90;
}

/// Strip geometry
///
/// The strip is laid out on a logical 300-wide canvas with a fixed 1 : 3.2
/// aspect ratio, then rendered at an integer scale factor. Preview and export
/// share this layout; export just uses a larger scale.
pub mod strip {
    /// Logical strip width in layout units
    pub const BASE_WIDTH: u32 = 300;

    /// Height/width ratio of the whole strip
    pub const ASPECT: f32 = 3.2;

    /// Logical strip height in layout units
    pub const BASE_HEIGHT: u32 = (BASE_WIDTH as f32 * ASPECT) as u32;

    /// Scale factor for the on-screen preview rendering
    pub const PREVIEW_SCALE: u32 = 1;

    /// Scale factor for the exported artifact (>= 2x per export contract)
    pub const EXPORT_SCALE: u32 = 2;

    /// Header/footer band height in layout units
    pub const BAND_HEIGHT: u32 = 44;

    /// Diameter of the photo-number badge in layout units
    pub const BADGE_DIAMETER: u32 = 24;

    /// Badge inset from the photo cell's bottom-right corner
    pub const BADGE_INSET: u32 = 8;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Get number of threads for videoconvert based on available CPU threads
    pub fn videoconvert_threads() -> u32 {
        std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(4)
    }

    /// Output pixel format for appsink
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Pipeline state change timeout on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Pipeline playing state timeout on start
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 30;
}

/// UI Constants
pub mod ui {
    /// Side length of a slot preview in the capture rail
    pub const SLOT_PREVIEW_SIZE: f32 = 96.0;

    /// Countdown overlay text size
    pub const COUNTDOWN_TEXT_SIZE: u16 = 72;

    /// Width of a template swatch button in the customize step
    pub const TEMPLATE_SWATCH_WIDTH: f32 = 120.0;

    /// Overlay button/container background transparency
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;
}

/// Name of the folder under ~/Pictures where strips are saved
pub const SAVE_FOLDER: &str = "photobooth";

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_geometry() {
        assert_eq!(strip::BASE_HEIGHT, 960);
        assert!(strip::EXPORT_SCALE >= 2);
        // Three square cells plus bands must fit the fixed aspect
        assert!(strip::BASE_HEIGHT > strip::BASE_WIDTH * STRIP_PHOTO_COUNT as u32);
    }

    #[test]
    fn test_countdown_constants() {
        assert_eq!(countdown::START, 3);
        assert!(countdown::SETTLE_MS < countdown::TICK_MS);
    }
}
