use std::fmt;

use super::{brightness, checksum, color_mode, power, status, Color};

/// A high level operation that maps onto exactly one outbound frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TurnOn,
    TurnOff,
    SetBrightness(u8),
    SetColor(Color),
    QueryStatus,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::TurnOn => write!(f, "turn on"),
            Command::TurnOff => write!(f, "turn off"),
            Command::SetBrightness(level) => write!(f, "set brightness to {level}"),
            Command::SetColor(color) => write!(
                f,
                "set color to (R: {}, G: {}, B: {})",
                color.r, color.g, color.b
            ),
            Command::QueryStatus => write!(f, "query status"),
        }
    }
}

/// Encoded command bytes, checksum included as the last byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandFrame {
    command: Command,
    bytes: Vec<u8>,
    checksum: u8,
}

impl CommandFrame {
    pub fn new(command: Command) -> Self {
        let mut bytes = match command {
            Command::TurnOn => power::ON.to_vec(),
            Command::TurnOff => power::OFF.to_vec(),
            Command::SetBrightness(level) => {
                let mut bytes = brightness::TEMPLATE.to_vec();
                bytes[brightness::LEVEL_OFFSET] = level;
                bytes
            }
            Command::SetColor(color) => {
                let mut bytes = color_mode::TEMPLATE.to_vec();
                bytes[color_mode::RGB_OFFSET..color_mode::RGB_OFFSET + 3]
                    .copy_from_slice(&color.to_array());
                bytes
            }
            Command::QueryStatus => status::QUERY.to_vec(),
        };
        let checksum = checksum(&bytes);
        bytes.push(checksum);
        Self {
            command,
            bytes,
            checksum,
        }
    }

    pub fn turn_on() -> Self {
        Self::new(Command::TurnOn)
    }

    pub fn turn_off() -> Self {
        Self::new(Command::TurnOff)
    }

    pub fn set_brightness(level: u8) -> Self {
        Self::new(Command::SetBrightness(level))
    }

    pub fn set_color(color: Color) -> Self {
        Self::new(Command::SetColor(color))
    }

    pub fn query_status() -> Self {
        Self::new(Command::QueryStatus)
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
