//! Stable per-monitor device identities.
//!
//! Raw OS device ids look like `\\?\DISPLAY#GSM5B08#5&1f38c6&0&UID4352#{...}`:
//! a hardware model segment followed by a transient, enumeration-generated
//! suffix. The transient part survives a session but not always a reboot,
//! and a known OS bug occasionally hands the same transient part to several
//! monitors. The resolution chain here must be deterministic: two passes
//! over unchanged hardware yield identical ids, or persisted per-monitor
//! layouts stop matching.

use std::collections::HashMap;

use zonas_core::MonitorHandle;

use crate::platform::MonitorInfo;

/// A hardware-inventory record for an attached monitor.
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    /// Device instance name, e.g. `DISPLAY\GSM5B08\5&1f38c6&0&UID4352_0`.
    pub instance_name: String,
    pub friendly_name: String,
    pub serial_number: String,
}

/// Resolves a stable device id for every real monitor in `monitors`.
///
/// Mirroring-driver monitors are dropped. The result preserves the order
/// of the input after sorting by handle, so callers get a deterministic
/// mapping regardless of enumeration order.
pub fn resolve_device_ids(
    monitors: &[MonitorInfo],
    remote_session: bool,
    inventory: &[InventoryRecord],
) -> Vec<(MonitorHandle, String)> {
    let mut real: Vec<&MonitorInfo> = monitors.iter().filter(|m| !m.mirroring).collect();
    real.sort_by_key(|m| m.handle);

    if remote_session {
        // Remote sessions expose virtual display devices with no usable
        // hardware identity; number them in handle order.
        return real
            .iter()
            .enumerate()
            .map(|(i, m)| (m.handle, format!("REMOTEDISPLAY_{}", i + 1)))
            .collect();
    }

    let parsed: Vec<(MonitorHandle, Option<RawId>)> = real
        .iter()
        .map(|m| (m.handle, m.raw_device_id.as_deref().and_then(parse_raw_id)))
        .collect();

    // Known enumeration bug: distinct monitors reported with the same
    // transient suffix. When that happens the transient part is useless
    // and identity must come from the hardware inventory instead.
    let mut transient_counts: HashMap<&str, usize> = HashMap::new();
    for (_, raw) in &parsed {
        if let Some(raw) = raw {
            *transient_counts.entry(raw.transient.as_str()).or_default() += 1;
        }
    }
    let duplicates = transient_counts.values().any(|&n| n > 1);

    let mut used_inventory = vec![false; inventory.len()];
    let mut unknown_counter = 0usize;
    let mut ids = Vec::with_capacity(parsed.len());

    for (i, (handle, raw)) in parsed.iter().enumerate() {
        let id = match raw {
            None => format!("LOCALDISPLAY_{}", i + 1),
            Some(raw) => {
                let record = take_inventory_match(inventory, &mut used_inventory, &raw.hardware);
                if duplicates {
                    match record {
                        Some(r) if !r.serial_number.is_empty() => {
                            format!("{}#{}", raw.hardware, r.serial_number)
                        }
                        _ => {
                            unknown_counter += 1;
                            format!("UNKNOWN_{unknown_counter}")
                        }
                    }
                } else {
                    match record {
                        Some(r) if !r.serial_number.is_empty() => {
                            format!("{}#{}", raw.hardware, r.serial_number)
                        }
                        _ => format!("{}#{}", raw.hardware, raw.transient),
                    }
                }
            }
        };
        ids.push((*handle, id));
    }

    disambiguate(&mut ids);
    ids
}

struct RawId {
    hardware: String,
    transient: String,
}

/// Splits a raw `\\?\DISPLAY#<hardware>#<transient>#{guid}` id into its
/// hardware and transient segments.
fn parse_raw_id(raw: &str) -> Option<RawId> {
    let mut parts = raw.split('#');
    let _prefix = parts.next()?;
    let hardware = parts.next()?;
    let transient = parts.next()?;
    if hardware.is_empty() || transient.is_empty() {
        return None;
    }
    Some(RawId {
        hardware: hardware.to_string(),
        transient: transient.to_string(),
    })
}

/// Finds and consumes the first unused inventory record whose instance
/// name mentions the hardware segment.
fn take_inventory_match<'a>(
    inventory: &'a [InventoryRecord],
    used: &mut [bool],
    hardware: &str,
) -> Option<&'a InventoryRecord> {
    for (i, record) in inventory.iter().enumerate() {
        if !used[i] && record.instance_name.contains(hardware) {
            used[i] = true;
            return Some(record);
        }
    }
    None
}

/// Appends `_2`, `_3`, ... to later occurrences of an already-used id.
/// Identical twin monitors can otherwise collide on model+serial.
fn disambiguate(ids: &mut [(MonitorHandle, String)]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (_, id) in ids.iter_mut() {
        let n = seen.entry(id.clone()).or_insert(0);
        *n += 1;
        if *n > 1 {
            *id = format!("{id}_{n}");
        }
    }
}
