// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │ frames over a bounded channel
//! ┌──────────┴──────────┐
//! │   CameraPipeline    │  ← exclusive owner of the camera
//! └──────────┬──────────┘
//!            │
//!       ┌────┴───┐
//!       │PipeWire│
//!       └────────┘
//! ```

pub mod enumeration;
pub mod pipeline;
pub mod types;

pub use enumeration::{can_switch_facing, enumerate_cameras, pick_device, probe_cameras};
pub use pipeline::CameraPipeline;
pub use types::*;
