use std::{
    io::{self, ErrorKind, Read, Write},
    net::{Shutdown, SocketAddr, TcpStream},
    time::Duration,
};

use crate::{
    backoff::Backoff,
    observer::{ConnectionObserver, LogObserver},
    protocol::{CommandFrame, StatusFrame, STATUS_FRAME_LEN, STATUS_HEX_LEN},
    BulbConfig, LightClientError, Result,
};

/// Opens the byte stream a [`BulbConnection`] talks over.
pub trait Connector {
    type Stream: Read + Write;

    /// Opens a stream to `address`. `timeout` bounds the connect itself and
    /// every later read and write on the returned stream.
    fn connect(&self, address: &SocketAddr, timeout: Duration) -> io::Result<Self::Stream>;

    /// Closes a stream. Dropping it is enough unless the transport needs more.
    fn close(&self, stream: Self::Stream) {
        drop(stream);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, address: &SocketAddr, timeout: Duration) -> io::Result<TcpStream> {
        let stream = TcpStream::connect_timeout(address, timeout)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        Ok(stream)
    }

    fn close(&self, stream: TcpStream) {
        // The peer may already be gone, there is nothing to do about it here.
        let _ = stream.shutdown(Shutdown::Both);
    }
}

/// A single socket to one bulb, with bounded reconnect-and-retry.
///
/// Not meant to be shared between threads; use one connection per bulb.
pub struct BulbConnection<C: Connector = TcpConnector> {
    config: BulbConfig,
    address: SocketAddr,
    connector: C,
    observer: Box<dyn ConnectionObserver + Send>,
    stream: Option<C::Stream>,
}

impl BulbConnection<TcpConnector> {
    /// Resolves the configured address and connects, logging through `log`.
    pub fn open(config: BulbConfig) -> Result<Self> {
        Self::open_with_observer(config, LogObserver)
    }

    pub fn open_with_observer(
        config: BulbConfig,
        observer: impl ConnectionObserver + Send + 'static,
    ) -> Result<Self> {
        let address = config.socket_addr()?;
        Self::with_connector(config, address, TcpConnector, observer)
    }
}

impl<C: Connector> BulbConnection<C> {
    /// Creates the connection and immediately connects it.
    pub fn with_connector(
        config: BulbConfig,
        address: SocketAddr,
        connector: C,
        observer: impl ConnectionObserver + Send + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let mut connection = Self {
            config,
            address,
            connector,
            observer: Box::new(observer),
            stream: None,
        };
        connection.connect()?;
        Ok(connection)
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn config(&self) -> &BulbConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Tries up to `max_attempts` times to open a stream. Any stream held
    /// before the call is closed first.
    pub fn connect(&mut self) -> Result<()> {
        self.disconnect();

        let max_attempts = self.config.max_attempts;
        let mut backoff = Backoff::new(self.config.retry_delay, self.config.max_retry_delay);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            self.observer.connecting(&self.address, attempt);
            match self.connector.connect(&self.address, self.config.timeout) {
                Ok(stream) => {
                    self.stream = Some(stream);
                    self.observer.connected(&self.address);
                    return Ok(());
                }
                Err(e) => {
                    self.observer.connect_failed(&self.address, attempt, &e);
                    last_error = Some(e);
                    if attempt < max_attempts {
                        backoff.wait();
                    }
                }
            }
        }

        self.observer.connection_failed(&self.address, max_attempts);
        Err(LightClientError::ConnectionFailed {
            address: self.address,
            attempts: max_attempts,
            source: last_error.unwrap_or_else(|| {
                io::Error::new(ErrorKind::NotConnected, "no connection attempt was made")
            }),
        })
    }

    /// Closes the socket if one is open. Safe to call any number of times.
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.connector.close(stream);
            self.observer.disconnected(&self.address);
        }
    }

    pub fn reconnect(&mut self) -> Result<()> {
        self.disconnect();
        self.connect()
    }

    /// Writes `frame`, reconnecting after every failed write. Gives up after
    /// `max_attempts` writes and returns the last write error, or the cause of
    /// the last failed reconnect.
    pub fn send(&mut self, frame: &CommandFrame) -> Result<()> {
        let max_attempts = self.config.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.write_frame(frame.as_bytes()) {
                Ok(()) => {
                    self.observer.frame_sent(frame);
                    return Ok(());
                }
                Err(e) => {
                    self.observer.send_failed(frame, attempt, &e);
                    last_error = Some(e);
                    if let Err(LightClientError::ConnectionFailed { source, .. }) =
                        self.reconnect()
                    {
                        last_error = Some(source);
                    }
                }
            }
        }

        self.observer.transmission_failed(frame, max_attempts);
        Err(LightClientError::TransmissionFailed {
            attempts: max_attempts,
            source: last_error.unwrap_or_else(|| {
                io::Error::new(ErrorKind::NotConnected, "no send attempt was made")
            }),
        })
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        stream.write_all(bytes)?;
        stream.flush()
    }

    /// Reads one status response. Failures are returned as-is, never retried.
    ///
    /// A failed read drops the socket, so a late reply cannot be mistaken for
    /// the answer to the next query.
    pub fn receive_status(&mut self) -> Result<StatusFrame> {
        let text = match self.read_status_hex() {
            Ok(text) => text,
            Err(e) => {
                self.observer.receive_failed(&e);
                self.disconnect();
                return Err(LightClientError::ReceiveFailed(e));
            }
        };
        let frame = StatusFrame::from_hex(&text)?;
        self.observer.frame_received(&frame);
        Ok(frame)
    }

    fn read_status_hex(&mut self) -> io::Result<String> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        let mut text = String::with_capacity(STATUS_HEX_LEN);
        let mut buf = [0u8; STATUS_FRAME_LEN];

        while text.len() < STATUS_HEX_LEN {
            let read = stream.read(&mut buf)?;
            if read == 0 {
                return Err(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "connection closed before a full status frame arrived",
                ));
            }
            text.push_str(&hex::encode(&buf[..read]));
        }
        Ok(text)
    }
}

impl<C: Connector> Drop for BulbConnection<C> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn not_connected() -> io::Error {
    io::Error::new(ErrorKind::NotConnected, "bulb is not connected")
}
