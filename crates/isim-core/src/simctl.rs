//! Interface to Apple's `xcrun simctl` command-line tool.
//!
//! [`SimulatorBackend`] is the boundary between isim and the OS tooling.
//! [`Simctl`] is the production implementation; tests substitute fixtures.
//!
//! # Requirements
//!
//! Xcode must be installed for `xcrun simctl` to be available.
//!
//! # Example
//!
//! ```no_run
//! use isim_core::simctl::{Simctl, SimulatorBackend};
//!
//! let devices = Simctl.list_devices().unwrap();
//! for device in &devices {
//!     println!("{}: {} ({})", device.name, device.udid, device.state);
//! }
//! ```

use std::collections::HashMap;
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, info};

use crate::device::{DeviceRecord, DeviceState, Runtime};
use crate::error::{IsimError, Result};

/// Operations isim needs from the simulator tooling.
pub trait SimulatorBackend {
    /// Returns the available iOS/iPadOS simulators, ordered by runtime version then name.
    fn list_devices(&self) -> Result<Vec<DeviceRecord>>;

    /// Boots the device. Already-booted devices are not an error.
    fn boot(&self, udid: &str) -> Result<()>;

    /// Brings Simulator.app to the foreground showing the given device.
    fn foreground_app(&self, udid: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct DeviceList {
    devices: HashMap<String, Vec<RawDevice>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDevice {
    udid: String,
    name: String,
    state: String,
    is_available: Option<bool>,
    device_type_identifier: Option<String>,
}

/// Wrapper for `xcrun simctl` and `open`.
///
/// All methods are synchronous and block until the child process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Simctl;

impl Simctl {
    /// Parses `simctl list devices --json` output into ordered device records.
    ///
    /// Non-iOS runtimes and devices flagged `isAvailable: false` are skipped.
    /// A missing `isAvailable` flag counts as available.
    pub fn parse_device_list(json: &[u8]) -> Result<Vec<DeviceRecord>> {
        let device_list: DeviceList = serde_json::from_slice(json)
            .map_err(|e| IsimError::Enumeration(format!("invalid simctl output: {}", e)))?;

        let mut devices = Vec::new();
        for (key, raw_devices) in device_list.devices {
            let Some(runtime) = Runtime::parse(&key) else {
                continue;
            };
            let os_version = runtime.display_name();
            for raw in raw_devices {
                if raw.is_available == Some(false) {
                    continue;
                }
                devices.push(DeviceRecord {
                    udid: raw.udid,
                    name: raw.name,
                    os_version: os_version.clone(),
                    state: DeviceState::from(raw.state),
                    device_type: raw.device_type_identifier,
                    version: runtime.version,
                });
            }
        }

        devices.sort_by(|a, b| {
            a.version
                .cmp(&b.version)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.udid.cmp(&b.udid))
        });
        Ok(devices)
    }
}

impl SimulatorBackend for Simctl {
    fn list_devices(&self) -> Result<Vec<DeviceRecord>> {
        debug!("running simctl list devices");
        let output = Command::new("xcrun")
            .args(["simctl", "list", "devices", "available", "--json"])
            .output()
            .map_err(|e| IsimError::Enumeration(format!("failed to run xcrun: {}", e)))?;

        debug!(status = %output.status, bytes = output.stdout.len(), "simctl list finished");
        if !output.status.success() {
            return Err(IsimError::Enumeration(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Self::parse_device_list(&output.stdout)
    }

    fn boot(&self, udid: &str) -> Result<()> {
        info!(%udid, "booting simulator");
        let output = Command::new("xcrun")
            .args(["simctl", "boot", udid])
            .output()
            .map_err(|e| IsimError::CommandFailed(format!("failed to run xcrun: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Already booted is not an error
            if !stderr.contains("current state: Booted") {
                return Err(IsimError::CommandFailed(stderr.trim().to_string()));
            }
            debug!(%udid, "simulator already booted");
        }
        Ok(())
    }

    fn foreground_app(&self, udid: &str) -> Result<()> {
        info!(%udid, "opening Simulator.app");
        let status = Command::new("open")
            .args(["-a", "Simulator", "--args", "-CurrentDeviceUDID", udid])
            .status()
            .map_err(|e| IsimError::CommandFailed(format!("failed to run open: {}", e)))?;

        if !status.success() {
            return Err(IsimError::CommandFailed(format!(
                "open -a Simulator exited with {}",
                status
            )));
        }
        Ok(())
    }
}
