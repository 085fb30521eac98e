//! Query matching over device records.
//!
//! Matching is a case-insensitive substring test against the device name,
//! OS version and UDID. There is no scoring: callers get results in
//! enumeration order.

use crate::device::DeviceRecord;
use crate::error::{IsimError, Result};

/// Returns true if `query` occurs in the name, OS version or UDID of `device`.
///
/// `query` must already be lowercased.
fn matches_lowered(device: &DeviceRecord, query: &str) -> bool {
    device.name.to_lowercase().contains(query)
        || device.os_version.to_lowercase().contains(query)
        || device.udid.to_lowercase().contains(query)
}

/// Filters devices by a free-text query, preserving order.
///
/// An empty (or whitespace-only) query returns every device. Any other query
/// is matched as given, surrounding whitespace included.
pub fn filter_devices<'a>(devices: &'a [DeviceRecord], query: &str) -> Vec<&'a DeviceRecord> {
    if query.trim().is_empty() {
        return devices.iter().collect();
    }
    let query = query.to_lowercase();
    devices
        .iter()
        .filter(|d| matches_lowered(d, &query))
        .collect()
}

/// Finds the device whose UDID equals `udid`, ignoring case.
pub fn find_by_udid<'a>(devices: &'a [DeviceRecord], udid: &str) -> Option<&'a DeviceRecord> {
    let udid = udid.trim();
    devices.iter().find(|d| d.udid.eq_ignore_ascii_case(udid))
}

/// Resolves a query to exactly one device.
///
/// An exact UDID match wins outright. Otherwise the substring filter must
/// yield a single device; zero matches is [`IsimError::NotFound`] and several
/// is [`IsimError::AmbiguousQuery`] carrying the candidates.
pub fn resolve<'a>(devices: &'a [DeviceRecord], query: &str) -> Result<&'a DeviceRecord> {
    if query.trim().is_empty() {
        return Err(IsimError::Usage("query must not be empty".to_string()));
    }
    if let Some(device) = find_by_udid(devices, query) {
        return Ok(device);
    }

    let mut found = filter_devices(devices, query);
    match found.len() {
        0 => Err(IsimError::NotFound(query.to_string())),
        1 => Ok(found.remove(0)),
        _ => Err(IsimError::AmbiguousQuery {
            query: query.to_string(),
            candidates: found.into_iter().cloned().collect(),
        }),
    }
}
