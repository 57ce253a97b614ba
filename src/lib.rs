//! A Redis client library built on the RESP wire protocol.
//!
//! The main components are:
//!
//! * [`Frame`]: a single RESP protocol frame, the intermediate
//!   representation between commands and their byte encoding.
//! * [`Connection`]: a TCP connection to a server, exposing the lazy
//!   reply sequence (one RESP parse per pull).
//! * [`Client`]: the command layer. Typed wrappers for the command
//!   catalogue, plus transactions ([`Client::multi`]) and scripting.
//! * [`Subscriber`]: a connection in subscriber mode; only pub/sub and
//!   connection commands are available.
//! * [`Cache`]: a typed key/value shim with optional expiration.
//! * [`Lock`]: a distributed lock built on SETNX/EXPIRE and a
//!   compare-and-delete release script.
//! * [`blocking`]: synchronous wrappers around the async client.

pub mod blocking;
pub mod cache;
pub mod client;
pub mod codec;
pub mod command;
pub mod commands;
pub mod connection;
pub mod error;
pub mod frame;
pub mod lock;
pub mod subscriber;
pub mod tx;

pub use cache::{Cache, CacheParams};
pub use client::{with_connection, Client};
pub use command::{Command, ToArg};
pub use commands::{BitOp, Position};
pub use connection::{Connection, ConnectionSpec};
pub use error::Error;
pub use frame::Frame;
pub use lock::Lock;
pub use subscriber::{Message, Subscriber};

use std::future::Future;
use std::pin::Pin;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed future used by the scoped helpers ([`with_connection`],
/// [`Lock::with_lock`], [`Client::queue`]) so a closure body can borrow
/// the client it is given.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The port a Redis server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 6379;
