// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines for photo capture and strip composition
//!
//! All heavy operations run in background tasks so the live camera preview
//! never freezes.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ Photo (JPEG) │
//! │   (RGBA)     │     │  - Square crop    │     │  in session  │
//! │              │     │  - Mirror/Filter  │     │              │
//! │              │     │  - JPEG encode    │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ 3 Photos +   │ ──▶ │  Strip Pipeline   │ ──▶ │  PNG export  │
//! │  Template    │     │  - Layout         │     │              │
//! │              │     │  - Compositing    │     │              │
//! │              │     │  - PNG encode     │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Capture post-processing and encoding
//! - [`strip`]: Strip layout, composition, caption text and export

pub mod photo;
pub mod strip;
