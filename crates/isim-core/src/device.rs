//! Simulator device records as reported by `simctl`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Power state of a simulator device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceState {
    Booted,
    Shutdown,
    /// Transitional or unrecognised states (e.g. "Booting", "Shutting Down").
    Other(String),
}

impl DeviceState {
    pub fn is_booted(&self) -> bool {
        matches!(self, DeviceState::Booted)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceState::Booted => "Booted",
            DeviceState::Shutdown => "Shutdown",
            DeviceState::Other(s) => s,
        }
    }
}

impl From<String> for DeviceState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Booted" => DeviceState::Booted,
            "Shutdown" => DeviceState::Shutdown,
            _ => DeviceState::Other(s),
        }
    }
}

impl From<DeviceState> for String {
    fn from(state: DeviceState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single simulator device.
///
/// Records are built fresh from each enumeration and never mutated by isim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// The unique device identifier (UDID) assigned by CoreSimulator.
    pub udid: String,

    /// Human-readable device name (e.g., "iPhone 15 Pro").
    pub name: String,

    /// Display form of the runtime, e.g. "iOS 17.2" or "iPadOS 18.0.1".
    #[serde(rename = "os")]
    pub os_version: String,

    pub state: DeviceState,

    /// Device type identifier (e.g., "com.apple.CoreSimulator.SimDeviceType.iPhone-15-Pro").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    /// Runtime version as (major, minor, patch), used for ordering.
    #[serde(skip)]
    pub version: (u32, u32, u32),
}

/// A parsed simulator runtime identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    /// Platform name as it appears in the identifier ("iOS" or "iPadOS").
    pub platform: String,
    pub version: (u32, u32, u32),
}

impl Runtime {
    /// Parses a runtime key such as `com.apple.CoreSimulator.SimRuntime.iOS-17-2`.
    ///
    /// Only iOS and iPadOS runtimes are recognised (case-insensitively); any
    /// other platform, or a malformed version, yields `None`.
    pub fn parse(identifier: &str) -> Option<Self> {
        let tail = identifier.rsplit('.').next()?;
        let mut parts = tail.split('-');

        let platform = parts.next()?;
        let lower = platform.to_ascii_lowercase();
        if lower != "ios" && lower != "ipados" {
            return None;
        }

        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            platform: platform.to_string(),
            version: (major, minor, patch),
        })
    }

    /// Display name such as "iOS 17.2"; the patch is shown only when non-zero.
    pub fn display_name(&self) -> String {
        let (major, minor, patch) = self.version;
        if patch == 0 {
            format!("{} {}.{}", self.platform, major, minor)
        } else {
            format!("{} {}.{}.{}", self.platform, major, minor, patch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_without_patch() {
        let rt = Runtime::parse("com.apple.CoreSimulator.SimRuntime.iOS-17-2").unwrap();
        assert_eq!(rt.platform, "iOS");
        assert_eq!(rt.version, (17, 2, 0));
        assert_eq!(rt.display_name(), "iOS 17.2");
    }

    #[test]
    fn test_parse_runtime_with_patch() {
        let rt = Runtime::parse("com.apple.CoreSimulator.SimRuntime.iOS-16-4-1").unwrap();
        assert_eq!(rt.version, (16, 4, 1));
        assert_eq!(rt.display_name(), "iOS 16.4.1");
    }

    #[test]
    fn test_parse_runtime_ipados_case_insensitive() {
        let rt = Runtime::parse("com.apple.CoreSimulator.SimRuntime.ipados-18-0").unwrap();
        assert_eq!(rt.platform, "ipados");
        assert_eq!(rt.display_name(), "ipados 18.0");
    }

    #[test]
    fn test_parse_runtime_rejects_other_platforms() {
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.watchOS-10-0").is_none());
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.tvOS-17-0").is_none());
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.xrOS-1-0").is_none());
    }

    #[test]
    fn test_parse_runtime_rejects_malformed() {
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.iOS").is_none());
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.iOS-17").is_none());
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.iOS-x-1").is_none());
        assert!(Runtime::parse("com.apple.CoreSimulator.SimRuntime.iOS-17-0-1-2").is_none());
    }

    #[test]
    fn test_device_state_from_string() {
        assert_eq!(DeviceState::from("Booted".to_string()), DeviceState::Booted);
        assert_eq!(DeviceState::from("Shutdown".to_string()), DeviceState::Shutdown);
        assert_eq!(
            DeviceState::from("Shutting Down".to_string()),
            DeviceState::Other("Shutting Down".to_string())
        );
        assert!(DeviceState::Booted.is_booted());
        assert!(!DeviceState::Other("Booting".to_string()).is_booted());
    }

    #[test]
    fn test_device_record_serializes_os_and_state() {
        let record = DeviceRecord {
            udid: "A1B2".to_string(),
            name: "iPhone 15".to_string(),
            os_version: "iOS 17.0".to_string(),
            state: DeviceState::Booted,
            device_type: None,
            version: (17, 0, 0),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["os"], "iOS 17.0");
        assert_eq!(json["state"], "Booted");
        assert!(json.get("device_type").is_none());
        assert!(json.get("version").is_none());
    }
}
