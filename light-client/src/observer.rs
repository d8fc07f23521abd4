use std::{io, net::SocketAddr};

use log::{debug, error, info, warn};

use crate::protocol::{CommandFrame, StatusFrame};

/// Receives connection and traffic events from a [`crate::BulbConnection`].
///
/// All methods default to doing nothing, so implementors only override what
/// they care about.
pub trait ConnectionObserver {
    fn connecting(&self, _address: &SocketAddr, _attempt: u32) {}

    fn connected(&self, _address: &SocketAddr) {}

    fn connect_failed(&self, _address: &SocketAddr, _attempt: u32, _error: &io::Error) {}

    fn connection_failed(&self, _address: &SocketAddr, _attempts: u32) {}

    fn disconnected(&self, _address: &SocketAddr) {}

    fn frame_sent(&self, _frame: &CommandFrame) {}

    fn send_failed(&self, _frame: &CommandFrame, _attempt: u32, _error: &io::Error) {}

    fn transmission_failed(&self, _frame: &CommandFrame, _attempts: u32) {}

    fn frame_received(&self, _frame: &StatusFrame) {}

    fn receive_failed(&self, _error: &io::Error) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ConnectionObserver for LogObserver {
    fn connecting(&self, address: &SocketAddr, attempt: u32) {
        info!("Connecting to {address} (attempt {attempt})");
    }

    fn connected(&self, address: &SocketAddr) {
        debug!("Connected to {address}");
    }

    fn connect_failed(&self, address: &SocketAddr, attempt: u32, error: &io::Error) {
        warn!("Connecting to {address} failed on attempt {attempt}, trying again; reason: {error}");
    }

    fn connection_failed(&self, address: &SocketAddr, attempts: u32) {
        error!("Failed to connect to {address}. Maximum attempts ({attempts}) reached");
    }

    fn disconnected(&self, address: &SocketAddr) {
        debug!("Disconnected from {address}");
    }

    fn frame_sent(&self, frame: &CommandFrame) {
        debug!(
            "Sent {} frame: {}",
            frame.command(),
            hex::encode(frame.as_bytes())
        );
    }

    fn send_failed(&self, frame: &CommandFrame, attempt: u32, error: &io::Error) {
        warn!(
            "Failed to send {} frame on attempt {attempt}, reconnecting; reason: {error}",
            frame.command()
        );
    }

    fn transmission_failed(&self, frame: &CommandFrame, attempts: u32) {
        error!(
            "Failed to send {} frame. Maximum attempts ({attempts}) reached",
            frame.command()
        );
    }

    fn frame_received(&self, frame: &StatusFrame) {
        debug!("Received status frame: {}", hex::encode(frame.as_bytes()));
    }

    fn receive_failed(&self, error: &io::Error) {
        error!("Connection failed while receiving status frame: {error}");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ConnectionObserver for NoopObserver {}
