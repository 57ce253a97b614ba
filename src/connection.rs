use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_stream::StreamExt;
use tokio_util::codec::FramedRead;
use tracing::debug;

use crate::codec::ReplyCodec;
use crate::command::Command;
use crate::frame::Frame;
use crate::tx::TxState;
use crate::{Error, Result, DEFAULT_PORT};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where to find the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionSpec {
    pub host: String,
    pub port: u16,
}

impl ConnectionSpec {
    pub fn new(host: impl Into<String>, port: u16) -> ConnectionSpec {
        ConnectionSpec {
            host: host.into(),
            port,
        }
    }
}

impl Default for ConnectionSpec {
    fn default() -> ConnectionSpec {
        ConnectionSpec::new("127.0.0.1", DEFAULT_PORT)
    }
}

impl fmt::Display for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ConnectionSpec {
    type Err = Error;

    /// Parses `"host"` or `"host:port"`.
    fn from_str(s: &str) -> Result<ConnectionSpec> {
        match s.rsplit_once(':') {
            None => Ok(ConnectionSpec::new(s, DEFAULT_PORT)),
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| Error::Spec(format!("invalid port in {:?}", s)))?;
                Ok(ConnectionSpec::new(host, port))
            }
        }
    }
}

/// A single TCP connection to the server.
///
/// The framed read half is the lazy reply sequence: each
/// [`read_reply`](Connection::read_reply) performs exactly one RESP
/// parse, and the codec's buffer owns any residue between pulls. It is
/// the only legitimate source of parsed replies.
#[derive(Debug)]
pub struct Connection {
    replies: FramedRead<OwnedReadHalf, ReplyCodec>,
    writer: BufWriter<OwnedWriteHalf>,
    tx_state: TxState,
    in_flight: bool,
    closed: bool,
}

impl Connection {
    /// Open a TCP connection to `spec`.
    pub async fn connect(spec: &ConnectionSpec) -> Result<Connection> {
        let stream = timeout(
            CONNECT_TIMEOUT,
            TcpStream::connect((spec.host.as_str(), spec.port)),
        )
        .await
        .map_err(|_| Error::ConnectTimeout(spec.to_string()))??;

        debug!(%spec, "connected");

        let (read_half, write_half) = stream.into_split();

        Ok(Connection {
            replies: FramedRead::new(read_half, ReplyCodec),
            writer: BufWriter::new(write_half),
            tx_state: TxState::Idle,
            in_flight: false,
            closed: false,
        })
    }

    /// Encode one command, write it and flush.
    pub async fn write_command(&mut self, cmd: &Command) -> Result<()> {
        if self.closed {
            return Err(Error::ConnectionClosed);
        }
        self.writer.write_all(&cmd.encode()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Pull the next reply. The server closing the stream between
    /// frames surfaces as [`Error::ConnectionClosed`]; mid-frame it is
    /// an I/O error.
    pub async fn read_reply(&mut self) -> Result<Frame> {
        match self.replies.next().await {
            Some(Ok(frame)) => Ok(frame),
            Some(Err(err)) => Err(err),
            None => Err(Error::ConnectionClosed),
        }
    }

    /// Close the connection. Idempotent.
    pub async fn disconnect(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!("disconnecting");
        self.writer.shutdown().await?;
        Ok(())
    }

    /// Mark a request in flight. Fails if a previous request future
    /// was cancelled between write and reply: the next frame on the
    /// wire belongs to the cancelled caller, so correlation is lost
    /// and the connection fails closed.
    pub(crate) fn begin_request(&mut self) -> Result<()> {
        if self.in_flight {
            return Err(Error::Poisoned);
        }
        if self.closed {
            return Err(Error::ConnectionClosed);
        }
        self.in_flight = true;
        Ok(())
    }

    pub(crate) fn end_request(&mut self) {
        self.in_flight = false;
    }

    pub(crate) fn tx_state(&self) -> TxState {
        self.tx_state
    }

    pub(crate) fn set_tx_state(&mut self, state: TxState) {
        self.tx_state = state;
    }
}
