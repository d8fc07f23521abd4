//! Client for the binary TCP control protocol spoken by Zengge (Magic Home)
//! RGB/white light bulbs.
//!
//! ```no_run
//! use zengge_light_client::{Bulb, BulbConfig, Color};
//!
//! let mut bulb = Bulb::connect(BulbConfig::new("192.168.1.50"))?;
//! bulb.turn_on()?;
//! bulb.set_color(Color::rgb(255, 120, 0))?;
//! if let Some(status) = bulb.status()? {
//!     println!("{status:?}");
//! }
//! # Ok::<(), zengge_light_client::LightClientError>(())
//! ```

mod backoff;
mod bulb;
mod config;
mod connection;
mod observer;
pub mod protocol;

use std::{io, net::SocketAddr};

pub use bulb::Bulb;
pub use config::BulbConfig;
pub use connection::{BulbConnection, Connector, TcpConnector};
pub use observer::{ConnectionObserver, LogObserver, NoopObserver};
pub use protocol::{BulbStatus, Color, Command, CommandFrame, StatusFrame, DEFAULT_PORT};

#[derive(Debug, thiserror::Error)]
pub enum LightClientError {
    #[error("failed to connect to {address} after {attempts} attempt(s): {source}")]
    ConnectionFailed {
        address: SocketAddr,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to send frame after {attempts} attempt(s): {source}")]
    TransmissionFailed {
        attempts: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to receive status frame: {0}")]
    ReceiveFailed(#[source] io::Error),

    #[error("status frame is not valid hex: {reason}")]
    InvalidHex { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, LightClientError>;
