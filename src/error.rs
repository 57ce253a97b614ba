use thiserror::Error as ThisError;

use crate::frame::{self, Frame};

/// Errors surfaced at the library boundary.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The server answered with an error reply (`-ERR ...`). Non-fatal:
    /// the connection stays usable.
    #[error("server error: {0}")]
    Server(String),

    /// The reply did not match the shape the command contract expects.
    /// Carries the actual reply for diagnostics.
    #[error("unexpected reply: expected {expected}, got {actual}")]
    UnexpectedReply {
        expected: &'static str,
        actual: Frame,
    },

    /// The codec could not parse the inbound bytes. Fatal to the
    /// connection.
    #[error("protocol error: {0}")]
    Frame(#[from] frame::Error),

    /// The server closed the connection.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// Opening the TCP connection did not complete in time.
    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A connection spec string could not be parsed.
    #[error("invalid connection spec: {0}")]
    Spec(String),

    /// A request future was dropped after its bytes were written but
    /// before its reply was pulled. Reply correlation is lost, so the
    /// connection fails closed.
    #[error("connection poisoned by a cancelled in-flight request")]
    Poisoned,

    /// EXEC observed a WATCH conflict: the server answered with a null
    /// array and no queued command ran.
    #[error("transaction aborted by a watched-key conflict")]
    TransactionAborted,

    /// A transaction command was used outside its legal state.
    #[error("transaction error: {0}")]
    Transaction(&'static str),

    /// `acquire` exhausted its waiting budget without taking the lock.
    #[error("timed out acquiring lock {0:?}")]
    LockTimeout(String),

    #[error("lock error: {0}")]
    Lock(String),

    #[error("subscriber error: {0}")]
    Subscribe(String),
}

impl Error {
    pub(crate) fn unexpected(expected: &'static str, actual: Frame) -> Error {
        Error::UnexpectedReply { expected, actual }
    }
}
