//! Frame layouts and constants of the Zengge control protocol.
//!
//! Every outbound frame is an opcode template with its parameters filled in,
//! followed by one checksum byte. The only inbound frame is the 14 byte status
//! response to [`status::QUERY`].

mod color;
mod command;
mod response;

pub use color::{Color, ParseColorError};
pub use command::{Command, CommandFrame};
pub use response::{BulbStatus, StatusFrame, STATUS_FRAME_LEN, STATUS_HEX_LEN};

/// Bulbs listen for control connections on TCP port 5577.
pub const DEFAULT_PORT: u16 = 5577;

/// Power on/off: `71 <state> 0f`.
pub mod power {
    pub const ON: [u8; 3] = [0x71, 0x23, 0x0f];
    pub const OFF: [u8; 3] = [0x71, 0x24, 0x0f];
}

/// Warm white level: `31 00 00 00 <level> 0f 0f`.
pub mod brightness {
    pub const OPCODE: u8 = 0x31;
    pub const LEVEL_OFFSET: usize = 4;
    pub const TEMPLATE: [u8; 7] = [OPCODE, 0x00, 0x00, 0x00, 0x00, 0x0f, 0x0f];
}

/// RGB color: `31 <r> <g> <b> 00 f0 0f`.
pub mod color_mode {
    pub const OPCODE: u8 = 0x31;
    pub const RGB_OFFSET: usize = 1;
    pub const TEMPLATE: [u8; 7] = [OPCODE, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x0f];
}

/// Status query and the sentinels of its response.
pub mod status {
    pub const QUERY: [u8; 3] = [0x81, 0x8a, 0x8b];

    pub const HEADER: [u8; 2] = [0x81, 0x44];
    pub const HEADER_OFFSET: usize = 0;
    pub const MODE_MARKER: [u8; 2] = [0x61, 0x21];
    pub const MODE_MARKER_OFFSET: usize = 3;
    pub const TRAILER_MARKER: [u8; 2] = [0x04, 0x00];
    pub const TRAILER_MARKER_OFFSET: usize = 10;

    pub const POWER_OFFSET: usize = 2;
    pub const POWER_ON: u8 = 0x23;
    pub const COLOR_OFFSET: usize = 6;
    pub const BRIGHTNESS_OFFSET: usize = 9;
}

/// Sum of all bytes modulo 256.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_sum_mod_256() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x71, 0x23, 0x0f]), 0xa3);
        assert_eq!(checksum(&[0xff, 0x01]), 0x00);
        assert_eq!(checksum(&[0xff; 3]), 0xfd);

        let bytes: Vec<u8> = (0..=255).collect();
        let expected = bytes.iter().map(|b| *b as u32).sum::<u32>() % 256;
        assert_eq!(checksum(&bytes) as u32, expected);
    }
}
