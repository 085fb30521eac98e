//! Shared test fixtures: a canned device list and a recording backend.

use std::cell::RefCell;

use crate::device::{DeviceRecord, DeviceState};
use crate::error::{IsimError, Result};
use crate::simctl::SimulatorBackend;

fn device(
    udid: &str,
    name: &str,
    os: &str,
    state: DeviceState,
    version: (u32, u32, u32),
) -> DeviceRecord {
    DeviceRecord {
        udid: udid.to_string(),
        name: name.to_string(),
        os_version: os.to_string(),
        state,
        device_type: None,
        version,
    }
}

/// Four devices in enumeration order (runtime version, then name).
pub fn sample_devices() -> Vec<DeviceRecord> {
    use DeviceState::{Booted, Shutdown};
    vec![
        device(
            "C3D4E5F6-A7B8-9012-CDEF-123456789012",
            "iPhone 14",
            "iOS 16.4",
            Shutdown,
            (16, 4, 0),
        ),
        device(
            "B2C3D4E5-F6A7-8901-BCDE-F12345678901",
            "iPhone 15",
            "iOS 17.0",
            Shutdown,
            (17, 0, 0),
        ),
        device(
            "A1B2C3D4-E5F6-7890-ABCD-EF1234567890",
            "iPhone 15 Pro",
            "iOS 17.0",
            Booted,
            (17, 0, 0),
        ),
        device(
            "F6A7B8C9-D0E1-2345-F012-456789012345",
            "iPad Air (5th generation)",
            "iPadOS 18.0",
            Shutdown,
            (18, 0, 0),
        ),
    ]
}

/// Backend returning fixed devices and recording every boot/foreground call.
pub struct FakeBackend {
    pub devices: Vec<DeviceRecord>,
    pub fail_enumeration: bool,
    pub booted: RefCell<Vec<String>>,
    pub foregrounded: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self {
            devices,
            fail_enumeration: false,
            booted: RefCell::new(Vec::new()),
            foregrounded: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_enumeration: true,
            ..Self::new(Vec::new())
        }
    }
}

impl SimulatorBackend for FakeBackend {
    fn list_devices(&self) -> Result<Vec<DeviceRecord>> {
        if self.fail_enumeration {
            return Err(IsimError::Enumeration(
                "xcrun: error: unable to find utility \"simctl\"".to_string(),
            ));
        }
        Ok(self.devices.clone())
    }

    fn boot(&self, udid: &str) -> Result<()> {
        self.booted.borrow_mut().push(udid.to_string());
        Ok(())
    }

    fn foreground_app(&self, udid: &str) -> Result<()> {
        self.foregrounded.borrow_mut().push(udid.to_string());
        Ok(())
    }
}
