// SPDX-License-Identifier: GPL-3.0-only

//! Camera enumeration and facing-mode classification
//!
//! Camera discovery goes through PipeWire. `pw-cli` output is parsed for
//! video source nodes; when it is unavailable, a generic auto-selected
//! camera is reported so PipeWire can pick its default.

use super::types::{CameraDevice, FacingMode};
use tracing::{debug, info, warn};

/// Probe whether camera capture is possible at all.
///
/// Checks GStreamer initialization and the presence of the `pipewiresrc`
/// element, then enumerates devices. Returns the device list on success and
/// a human-readable reason on failure. This is the capability gate: a
/// failure here is terminal for the session.
pub fn probe_cameras() -> Result<Vec<CameraDevice>, String> {
    if let Err(e) = gstreamer::init() {
        return Err(format!("GStreamer initialization failed: {}", e));
    }

    if gstreamer::ElementFactory::find("pipewiresrc").is_none() {
        return Err("PipeWire video source not available on this system".to_string());
    }

    let cameras = enumerate_cameras();
    if cameras.is_empty() {
        return Err("No camera devices found".to_string());
    }

    Ok(cameras)
}

/// Enumerate cameras using PipeWire
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    debug!("Enumerating cameras via PipeWire");

    if let Some(cameras) = try_enumerate_with_pw_cli()
        && !cameras.is_empty()
    {
        debug!(count = cameras.len(), "Found PipeWire cameras");
        return cameras;
    }

    // Fallback: let PipeWire pick its default camera
    info!("Using PipeWire auto-selection (default camera)");
    vec![CameraDevice {
        name: "Default Camera (PipeWire)".to_string(),
        path: String::new(),
        facing: Some(FacingMode::Front),
    }]
}

/// Pick the device matching the requested facing mode.
///
/// Falls back to the first device when no camera declares the requested
/// facing; a single-camera system therefore always resolves to that camera.
pub fn pick_device(cameras: &[CameraDevice], facing: FacingMode) -> Option<CameraDevice> {
    cameras
        .iter()
        .find(|cam| cam.facing == Some(facing))
        .or_else(|| cameras.first())
        .cloned()
}

/// True when the list holds cameras for both facing modes, i.e. switching
/// the facing mode would actually change devices.
pub fn can_switch_facing(cameras: &[CameraDevice]) -> bool {
    let has_front = cameras.iter().any(|c| c.facing == Some(FacingMode::Front));
    let has_back = cameras.iter().any(|c| c.facing == Some(FacingMode::Back));
    has_front && has_back
}

/// Try to enumerate cameras by parsing `pw-cli ls Node` output
fn try_enumerate_with_pw_cli() -> Option<Vec<CameraDevice>> {
    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(parse_pw_cli_nodes(&stdout))
}

/// Accumulator for one PipeWire node while scanning `pw-cli` output
#[derive(Default)]
struct NodeScan {
    id: Option<String>,
    serial: Option<String>,
    name: Option<String>,
    location: Option<String>,
    is_video_source: bool,
}

impl NodeScan {
    fn into_device(self) -> Option<CameraDevice> {
        if !self.is_video_source {
            return None;
        }
        let id = self.id?;
        let name = self.name?;

        // Priority: object.serial for target-object, fallback to node ID
        let path = if let Some(serial) = &self.serial {
            format!("pipewire-serial-{}", serial)
        } else {
            format!("pipewire-{}", id)
        };

        let facing = classify_facing(&name, self.location.as_deref());
        debug!(id = %id, name = %name, path = %path, ?facing, "Found video camera");

        Some(CameraDevice { name, path, facing })
    }
}

/// Parse `pw-cli ls Node` output into camera devices
fn parse_pw_cli_nodes(stdout: &str) -> Vec<CameraDevice> {
    let mut cameras = Vec::new();
    let mut current = NodeScan::default();

    for line in stdout.lines() {
        let trimmed = line.trim();

        // Node boundary, e.g. `id 76, type PipeWire:Interface:Node/3`
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            if let Some(device) = std::mem::take(&mut current).into_device() {
                cameras.push(device);
            }
            if let Some(id_str) = trimmed.strip_prefix("id ")
                && let Some(id_num) = id_str.split(',').next()
            {
                current.id = Some(id_num.trim().to_string());
            }
            continue;
        }

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            current.is_video_source = true;
        }

        if trimmed.contains("object.serial")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current.serial = Some(value);
        }

        if trimmed.contains("node.description")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current.name = Some(value);
        }

        // libcamera exposes the physical placement of mobile sensors
        if trimmed.contains("api.libcamera.location")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current.location = Some(value);
        }
    }

    // Don't forget the last node
    if let Some(device) = current.into_device() {
        cameras.push(device);
    }

    if cameras.is_empty() {
        debug!("No cameras found via pw-cli");
    } else {
        debug!(count = cameras.len(), "Enumerated cameras via pw-cli");
    }

    cameras
}

/// Classify a camera's facing mode from its PipeWire properties.
///
/// The libcamera location property is authoritative when present; otherwise
/// the device name is matched against common integrated/external patterns.
fn classify_facing(name: &str, location: Option<&str>) -> Option<FacingMode> {
    match location {
        Some("front") => return Some(FacingMode::Front),
        Some("back") => return Some(FacingMode::Back),
        Some(other) => {
            warn!(location = other, "Unknown camera location property");
        }
        None => {}
    }

    let lower = name.to_lowercase();
    if lower.contains("front") || lower.contains("integrated") || lower.contains("built-in") {
        Some(FacingMode::Front)
    } else if lower.contains("back") || lower.contains("rear") {
        Some(FacingMode::Back)
    } else {
        None
    }
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_quoted_value() {
        assert_eq!(
            extract_quoted_value("node.description = \"Laptop Webcam\""),
            Some("Laptop Webcam".to_string())
        );
        assert_eq!(extract_quoted_value("no quotes here"), None);
    }

    #[test]
    fn test_parse_pw_cli_nodes() {
        let output = "\
id 42, type PipeWire:Interface:Node/3
 \t\tmedia.class = \"Video/Source\"
 \t\tobject.serial = \"2146\"
 \t\tnode.description = \"Integrated Camera (V4L2)\"
id 43, type PipeWire:Interface:Node/3
 \t\tmedia.class = \"Audio/Source\"
 \t\tnode.description = \"Microphone\"
id 44, type PipeWire:Interface:Node/3
 \t\tmedia.class = \"Video/Source\"
 \t\tnode.description = \"USB Camera\"
 \t\tapi.libcamera.location = \"back\"
";
        let cameras = parse_pw_cli_nodes(output);
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].path, "pipewire-serial-2146");
        assert_eq!(cameras[0].facing, Some(FacingMode::Front));
        assert_eq!(cameras[1].path, "pipewire-44");
        assert_eq!(cameras[1].facing, Some(FacingMode::Back));
    }

    #[test]
    fn test_classify_facing_heuristics() {
        assert_eq!(
            classify_facing("Integrated Camera", None),
            Some(FacingMode::Front)
        );
        assert_eq!(classify_facing("Rear Camera", None), Some(FacingMode::Back));
        assert_eq!(classify_facing("Elgato Facecam", None), None);
        // Location property wins over the name
        assert_eq!(
            classify_facing("Integrated Camera", Some("back")),
            Some(FacingMode::Back)
        );
    }

    #[test]
    fn test_pick_device_falls_back_to_first() {
        let cameras = vec![CameraDevice {
            name: "Only Camera".to_string(),
            path: "pipewire-1".to_string(),
            facing: Some(FacingMode::Front),
        }];
        let picked = pick_device(&cameras, FacingMode::Back).unwrap();
        assert_eq!(picked.path, "pipewire-1");
        assert!(!can_switch_facing(&cameras));
    }
}
