use crate::{
    connection::{BulbConnection, Connector, TcpConnector},
    observer::ConnectionObserver,
    protocol::{BulbStatus, Color, CommandFrame},
    BulbConfig, Result,
};

/// A connected bulb.
///
/// Every operation blocks until its frame has been written, or for
/// [`Bulb::status`] until the response has been read.
pub struct Bulb<C: Connector = TcpConnector> {
    connection: BulbConnection<C>,
}

impl Bulb<TcpConnector> {
    pub fn connect(config: BulbConfig) -> Result<Self> {
        Ok(Self::from_connection(BulbConnection::open(config)?))
    }

    pub fn connect_with_observer(
        config: BulbConfig,
        observer: impl ConnectionObserver + Send + 'static,
    ) -> Result<Self> {
        Ok(Self::from_connection(BulbConnection::open_with_observer(
            config, observer,
        )?))
    }
}

impl<C: Connector> Bulb<C> {
    pub fn from_connection(connection: BulbConnection<C>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &BulbConnection<C> {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut BulbConnection<C> {
        &mut self.connection
    }

    pub fn turn_on(&mut self) -> Result<()> {
        self.connection.send(&CommandFrame::turn_on())
    }

    pub fn turn_off(&mut self) -> Result<()> {
        self.connection.send(&CommandFrame::turn_off())
    }

    /// Sets the warm white channel.
    pub fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.connection.send(&CommandFrame::set_brightness(level))
    }

    pub fn set_color(&mut self, color: impl Into<Color>) -> Result<()> {
        self.connection.send(&CommandFrame::set_color(color.into()))
    }

    /// Queries the bulb. `Ok(None)` means a response arrived but did not look
    /// like a status frame.
    pub fn status(&mut self) -> Result<Option<BulbStatus>> {
        self.connection.send(&CommandFrame::query_status())?;
        let frame = self.connection.receive_status()?;
        Ok(frame.decode())
    }
}
