use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque handle identifying a physical monitor for the lifetime of a
/// display configuration. Not stable across topology changes; stable
/// identity comes from the device-id resolution in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonitorHandle(pub usize);

/// Opaque handle identifying a top-level application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(pub usize);

/// A virtual-desktop identifier: a 16-byte GUID treated as a plain value.
///
/// Hash and equality are structural; the textual form is the usual
/// lower-case hyphenated GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DesktopId(pub [u8; 16]);

impl DesktopId {
    /// The all-zero id, standing in for "no desktop observed yet".
    pub const NIL: DesktopId = DesktopId([0; 16]);
}

impl fmt::Display for DesktopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11], b[12], b[13],
            b[14], b[15]
        )
    }
}

impl FromStr for DesktopId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 {
            return Err(format!("invalid desktop id: {s}"));
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| format!("invalid desktop id: {s}"))?;
        }
        Ok(DesktopId(bytes))
    }
}

impl Serialize for DesktopId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DesktopId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_id_roundtrips_through_text() {
        let id = DesktopId([
            0x12, 0x8c, 0x2c, 0xb0, 0x6b, 0xdf, 0x49, 0x3e, 0xab, 0xbe, 0xf8, 0x70, 0x5e, 0x04,
            0xaa, 0x95,
        ]);
        let text = id.to_string();
        assert_eq!(text, "128c2cb0-6bdf-493e-abbe-f8705e04aa95");
        assert_eq!(text.parse::<DesktopId>().unwrap(), id);
    }

    #[test]
    fn desktop_id_rejects_malformed_text() {
        assert!("not-a-guid".parse::<DesktopId>().is_err());
        assert!("128c2cb06bdf493eabbef8705e04aa".parse::<DesktopId>().is_err());
    }

    #[test]
    fn desktop_id_serializes_as_a_string() {
        let id: DesktopId = "128c2cb0-6bdf-493e-abbe-f8705e04aa95".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"128c2cb0-6bdf-493e-abbe-f8705e04aa95\"");
        let back: DesktopId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
