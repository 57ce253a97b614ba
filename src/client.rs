use bytes::Bytes;

use crate::command::Command;
use crate::connection::{Connection, ConnectionSpec};
use crate::frame::Frame;
use crate::tx::TxState;
use crate::{BoxFuture, Error, Result};

/// The command layer: typed wrappers over a single [`Connection`].
///
/// One outstanding request at a time; replies correlate to requests by
/// FIFO order. Callers needing parallelism hold multiple clients.
#[derive(Debug)]
pub struct Client {
    pub(crate) connection: Connection,
}

impl Client {
    pub async fn connect(spec: &ConnectionSpec) -> Result<Client> {
        let connection = Connection::connect(spec).await?;
        Ok(Client { connection })
    }

    /// Close the connection. The socket is also released when the
    /// client is dropped.
    pub async fn disconnect(mut self) -> Result<()> {
        self.connection.disconnect().await
    }

    /// Issue one command and pull its reply.
    ///
    /// `-ERR` replies surface as [`Error::Server`] and leave the
    /// connection usable. Inside a MULTI block the server acknowledges
    /// each command with `QUEUED` instead of its result; the helper
    /// then yields `None` and the shaped wrappers return placeholder
    /// values until EXEC delivers the real replies.
    pub(crate) async fn request(&mut self, cmd: Command) -> Result<Option<Frame>> {
        self.connection.begin_request()?;
        self.connection.write_command(&cmd).await?;
        let frame = self.connection.read_reply().await?;
        self.connection.end_request();

        if self.connection.tx_state() == TxState::Queueing {
            return match frame {
                Frame::Simple(ref status) if status == "QUEUED" => Ok(None),
                Frame::Error(message) => {
                    self.connection.set_tx_state(TxState::Aborted);
                    Err(Error::Server(message))
                }
                other => Err(Error::unexpected("QUEUED status", other)),
            };
        }

        match frame {
            Frame::Error(message) => Err(Error::Server(message)),
            frame => Ok(Some(frame)),
        }
    }

    /// Commands replying `+OK`.
    pub(crate) async fn ok_request(&mut self, cmd: Command) -> Result<()> {
        match self.request(cmd).await? {
            None => Ok(()),
            Some(Frame::Simple(ref status)) if status == "OK" => Ok(()),
            Some(other) => Err(Error::unexpected("OK status", other)),
        }
    }

    /// Commands replying an arbitrary status line (PING, TYPE, ...).
    pub(crate) async fn status_request(&mut self, cmd: Command) -> Result<String> {
        match self.request(cmd).await? {
            None => Ok(String::new()),
            Some(Frame::Simple(status)) => Ok(status),
            Some(other) => Err(Error::unexpected("status", other)),
        }
    }

    /// Commands replying a count or other integer.
    pub(crate) async fn int_request(&mut self, cmd: Command) -> Result<i64> {
        match self.request(cmd).await? {
            None => Ok(0),
            Some(Frame::Integer(n)) => Ok(n),
            Some(other) => Err(Error::unexpected("integer", other)),
        }
    }

    /// Boolean-valued commands reply `:0` or `:1`.
    pub(crate) async fn bool_request(&mut self, cmd: Command) -> Result<bool> {
        match self.request(cmd).await? {
            None => Ok(false),
            Some(Frame::Integer(0)) => Ok(false),
            Some(Frame::Integer(1)) => Ok(true),
            Some(other) => Err(Error::unexpected("0/1 integer", other)),
        }
    }

    /// Commands replying a bulk string, absent on missing keys.
    pub(crate) async fn bulk_request(&mut self, cmd: Command) -> Result<Option<Bytes>> {
        match self.request(cmd).await? {
            None => Ok(None),
            Some(Frame::Bulk(data)) => Ok(data),
            Some(other) => Err(Error::unexpected("bulk string", other)),
        }
    }

    /// Bulk reply decoded as UTF-8 text.
    pub(crate) async fn string_request(&mut self, cmd: Command) -> Result<Option<String>> {
        match self.bulk_request(cmd).await? {
            None => Ok(None),
            Some(data) => text(data).map(Some),
        }
    }

    /// Floating-point replies arrive as bulk strings in decimal form.
    pub(crate) async fn float_request(&mut self, cmd: Command) -> Result<f64> {
        match self.opt_float_request(cmd).await? {
            Some(value) => Ok(value),
            None => Ok(0.0),
        }
    }

    pub(crate) async fn opt_float_request(&mut self, cmd: Command) -> Result<Option<f64>> {
        match self.request(cmd).await? {
            None => Ok(None),
            Some(Frame::Bulk(None)) => Ok(None),
            Some(Frame::Bulk(Some(data))) => {
                let repr = text(data.clone())?;
                repr.parse::<f64>()
                    .map(Some)
                    .map_err(|_| Error::unexpected("decimal float", Frame::Bulk(Some(data))))
            }
            Some(other) => Err(Error::unexpected("bulk float", other)),
        }
    }

    /// Collection-shaped commands. A null array flattens to empty; the
    /// commands where the distinction matters use
    /// [`opt_array_request`](Client::opt_array_request).
    pub(crate) async fn array_request(&mut self, cmd: Command) -> Result<Vec<Frame>> {
        match self.opt_array_request(cmd).await? {
            Some(frames) => Ok(frames),
            None => Ok(vec![]),
        }
    }

    pub(crate) async fn opt_array_request(&mut self, cmd: Command) -> Result<Option<Vec<Frame>>> {
        match self.request(cmd).await? {
            None => Ok(Some(vec![])),
            Some(Frame::Array(frames)) => Ok(frames),
            Some(other) => Err(Error::unexpected("array", other)),
        }
    }

    /// Raw reply passthrough, for EVAL and friends whose shape depends
    /// on the script.
    pub(crate) async fn frame_request(&mut self, cmd: Command) -> Result<Frame> {
        match self.request(cmd).await? {
            None => Ok(Frame::Simple("QUEUED".to_string())),
            Some(frame) => Ok(frame),
        }
    }
}

/// Decode reply bytes expected to be text.
pub(crate) fn text(data: Bytes) -> Result<String> {
    match String::from_utf8(data.to_vec()) {
        Ok(string) => Ok(string),
        Err(_) => Err(Error::unexpected("UTF-8 text", Frame::Bulk(Some(data)))),
    }
}

/// Scoped connection: connect, run `body`, release on every exit path.
///
/// ```no_run
/// use retis::{with_connection, ConnectionSpec};
///
/// # async fn example() -> retis::Result<()> {
/// let spec = ConnectionSpec::default();
/// let value = with_connection(&spec, |client| {
///     Box::pin(async move { client.get("key").await })
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn with_connection<T, F>(spec: &ConnectionSpec, body: F) -> Result<T>
where
    F: for<'a> FnOnce(&'a mut Client) -> BoxFuture<'a, Result<T>>,
{
    let mut client = Client::connect(spec).await?;
    let result = body(&mut client).await;

    // Release regardless of the body's outcome. If the body's future is
    // dropped instead, the socket closes when the client drops.
    let _ = client.connection.disconnect().await;

    result
}
