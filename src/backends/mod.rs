// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for camera capture
//!
//! The backend layer abstracts hardware access behind a small API: device
//! enumeration (with facing-mode classification) and a GStreamer preview
//! pipeline that delivers RGBA frames over a channel. The single active
//! pipeline is the exclusive owner of the camera; callers must drop it before
//! acquiring another one.

pub mod camera;
