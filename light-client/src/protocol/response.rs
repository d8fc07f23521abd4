use serde::{Deserialize, Serialize};

use super::{status, Color};
use crate::{LightClientError, Result};

/// Length of a raw status response.
pub const STATUS_FRAME_LEN: usize = 14;

/// Length of a status response in hex characters.
pub const STATUS_HEX_LEN: usize = STATUS_FRAME_LEN * 2;

/// Decoded state of a bulb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulbStatus {
    pub on: bool,
    pub brightness: u8,
    pub color: Color,
}

/// Raw status response as read off the socket.
///
/// Layout, by byte offset:
///
/// | offset | meaning                     |
/// |--------|-----------------------------|
/// | 0..2   | header `81 44`              |
/// | 2      | power, `23` when on         |
/// | 3..5   | mode marker `61 21`         |
/// | 5      | unused                      |
/// | 6..9   | color, wire order preserved |
/// | 9      | warm white brightness       |
/// | 10..12 | marker `04 00`              |
/// | 12     | unused                      |
/// | 13     | checksum                    |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusFrame([u8; STATUS_FRAME_LEN]);

impl StatusFrame {
    pub fn from_bytes(bytes: [u8; STATUS_FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses the first [`STATUS_HEX_LEN`] characters of `text`. Anything after
    /// them is ignored.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .get(..STATUS_HEX_LEN)
            .ok_or_else(|| LightClientError::InvalidHex {
                reason: format!(
                    "expected at least {STATUS_HEX_LEN} characters, got {}",
                    text.len()
                ),
            })?;

        let mut bytes = [0u8; STATUS_FRAME_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| LightClientError::InvalidHex {
            reason: e.to_string(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; STATUS_FRAME_LEN] {
        &self.0
    }

    fn marker(&self, offset: usize) -> [u8; 2] {
        [self.0[offset], self.0[offset + 1]]
    }

    pub fn is_valid(&self) -> bool {
        self.marker(status::HEADER_OFFSET) == status::HEADER
            && self.marker(status::MODE_MARKER_OFFSET) == status::MODE_MARKER
            && self.marker(status::TRAILER_MARKER_OFFSET) == status::TRAILER_MARKER
    }

    /// Returns `None` when any sentinel does not match.
    pub fn decode(&self) -> Option<BulbStatus> {
        if !self.is_valid() {
            return None;
        }

        let c = status::COLOR_OFFSET;
        Some(BulbStatus {
            on: self.0[status::POWER_OFFSET] == status::POWER_ON,
            brightness: self.0[status::BRIGHTNESS_OFFSET],
            color: Color::rgb(self.0[c], self.0[c + 1], self.0[c + 2]),
        })
    }
}

impl From<[u8; STATUS_FRAME_LEN]> for StatusFrame {
    fn from(bytes: [u8; STATUS_FRAME_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}
