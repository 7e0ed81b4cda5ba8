// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer preview pipeline for camera capture
//!
//! Native GStreamer pipeline using `pipewiresrc`, decoding and converting
//! everything to tightly packed RGBA before handing frames to the app. The
//! pipeline object is the exclusive owner of the camera; dropping it drives
//! the pipeline to `Null` and releases the hardware.

use super::types::{BackendError, BackendResult, CameraDevice, CameraFormat, CameraFrame, FrameSender};
use crate::constants::pipeline as pipeline_consts;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Camera preview pipeline
pub struct CameraPipeline {
    pipeline: gstreamer::Pipeline,
    _appsink: AppSink,
}

impl CameraPipeline {
    /// Create and start a new camera pipeline
    ///
    /// The optional format is a resolution hint; the pipeline rescales
    /// whatever the camera negotiates, so the hint never causes a hard
    /// negotiation failure.
    pub fn new(
        device: &CameraDevice,
        format: Option<CameraFormat>,
        frame_sender: FrameSender,
    ) -> BackendResult<Self> {
        info!(device = %device.name, ?format, "Creating camera pipeline");

        gstreamer::init().map_err(|e| BackendError::InitializationFailed(e.to_string()))?;

        gstreamer::ElementFactory::find("pipewiresrc")
            .ok_or_else(|| BackendError::NotAvailable("pipewiresrc factory not found".into()))?;

        let launch = build_pipeline_string(&device.path, format);
        info!(pipeline = %launch, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&launch)
            .map_err(|e| BackendError::InitializationFailed(e.to_string()))?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| {
                BackendError::InitializationFailed("Parsed element is not a pipeline".into())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| BackendError::InitializationFailed("Failed to get appsink".into()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| BackendError::InitializationFailed("Failed to cast appsink".into()))?;

        // Low-latency preview configuration: drop old frames instead of
        // blocking the camera when the UI is busy
        appsink.set_property("emit-signals", true);
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline_consts::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_start = Instant::now();
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|e| {
                        if frame_num % pipeline_consts::FRAME_LOG_INTERVAL == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to pull sample");
                        }
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                        warn!(frame = frame_num, "Buffer marked as corrupted, skipping");
                        return Err(gstreamer::FlowError::Error);
                    }

                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info =
                        VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
                    let map = buffer
                        .map_readable()
                        .map_err(|_| gstreamer::FlowError::Error)?;

                    let width = video_info.width();
                    let height = video_info.height();
                    let stride = video_info.stride()[0] as usize;

                    // Repack to a tight RGBA buffer when the stride carries
                    // row padding
                    let row_bytes = width as usize * 4;
                    let data: Arc<[u8]> = if stride == row_bytes {
                        Arc::from(&map.as_slice()[..row_bytes * height as usize])
                    } else {
                        let mut packed = Vec::with_capacity(row_bytes * height as usize);
                        for row in 0..height as usize {
                            let start = row * stride;
                            packed.extend_from_slice(&map.as_slice()[start..start + row_bytes]);
                        }
                        Arc::from(packed.into_boxed_slice())
                    };

                    let frame = CameraFrame {
                        width,
                        height,
                        data,
                        captured_at: frame_start,
                    };

                    let mut sender = frame_sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        // Dropping frames is fine for live preview
                        if frame_num % pipeline_consts::FRAME_LOG_INTERVAL == 0 {
                            debug!(frame = frame_num, error = ?e, "Frame dropped (channel full)");
                        }
                        if e.is_disconnected() {
                            return Err(gstreamer::FlowError::Eos);
                        }
                    } else if frame_num % pipeline_consts::FRAME_LOG_INTERVAL == 0 {
                        debug!(
                            frame = frame_num,
                            width,
                            height,
                            decode_us = frame_start.elapsed().as_micros() as u64,
                            "Frame forwarded to UI"
                        );
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            BackendError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        // Wait briefly for the state change; async completion is accepted
        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            pipeline_consts::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");
        if state != gstreamer::State::Playing {
            warn!("Pipeline is not in PLAYING state yet");
        }

        info!("Camera pipeline initialization complete");

        Ok(Self {
            pipeline,
            _appsink: appsink,
        })
    }

    /// Stop the pipeline and release the camera
    pub fn stop(self) -> BackendResult<()> {
        info!("Stopping camera pipeline");

        self._appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());

        self.pipeline
            .set_state(gstreamer::State::Null)
            .map_err(|e| BackendError::Other(format!("Failed to stop pipeline: {}", e)))?;

        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            pipeline_consts::STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => info!(state = ?state, "Camera pipeline stopped"),
            Err(e) => debug!(error = ?e, state = ?state, "Pipeline state change had issues"),
        }

        Ok(())
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        // Explicitly reach Null so the camera hardware is released before a
        // successor pipeline is created
        self._appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        info!("Camera pipeline released");
    }
}

/// Build the GStreamer launch string for a device and resolution hint
fn build_pipeline_string(device_path: &str, format: Option<CameraFormat>) -> String {
    let target = pipewire_target_property(device_path);

    let scale_caps = match format {
        Some(fmt) => format!(
            "video/x-raw,format={},width={},height={}",
            pipeline_consts::OUTPUT_FORMAT,
            fmt.width,
            fmt.height
        ),
        None => format!("video/x-raw,format={}", pipeline_consts::OUTPUT_FORMAT),
    };

    format!(
        "pipewiresrc {}do-timestamp=true ! \
         queue max-size-buffers={} leaky=downstream ! \
         decodebin ! \
         videoconvert n-threads={} ! \
         videoscale ! \
         {} ! \
         appsink name=sink",
        target,
        pipeline_consts::MAX_BUFFERS,
        pipeline_consts::videoconvert_threads(),
        scale_caps
    )
}

/// Translate a device path into the matching pipewiresrc property clause
fn pipewire_target_property(device_path: &str) -> String {
    if device_path.is_empty() {
        // Empty path = PipeWire auto-select default camera
        String::new()
    } else if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else {
        format!("path={} ", device_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_property_forms() {
        assert_eq!(pipewire_target_property(""), "");
        assert_eq!(
            pipewire_target_property("pipewire-serial-2146"),
            "target-object=2146 "
        );
        assert_eq!(pipewire_target_property("pipewire-42"), "target-object=42 ");
    }

    #[test]
    fn test_pipeline_string_has_rgba_sink() {
        let launch = build_pipeline_string(
            "pipewire-serial-7",
            Some(CameraFormat {
                width: 1280,
                height: 720,
            }),
        );
        assert!(launch.contains("target-object=7"));
        assert!(launch.contains("format=RGBA,width=1280,height=720"));
        assert!(launch.ends_with("appsink name=sink"));
    }
}
