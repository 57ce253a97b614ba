//! The command catalogue, grouped by keyspace.
//!
//! Every wrapper follows the same shape: marshal typed arguments into
//! a [`Command`](crate::Command), send it, pull one reply, check the
//! expected reply shape. The request helpers on
//! [`Client`](crate::Client) own the shape checks; this module adds
//! [`ReplyParser`] for walking collection replies element by element.

pub mod hashes;
pub mod keys;
pub mod lists;
pub mod pubsub;
pub mod scripting;
pub mod server;
pub mod sets;
pub mod sorted_sets;
pub mod strings;

pub use lists::Position;
pub use strings::BitOp;

use std::vec;

use bytes::Bytes;

use crate::client::text;
use crate::frame::Frame;
use crate::{Error, Result};

/// Typed walker over the elements of an array reply.
pub(crate) struct ReplyParser {
    parts: vec::IntoIter<Frame>,
}

impl ReplyParser {
    pub(crate) fn new(frames: Vec<Frame>) -> ReplyParser {
        ReplyParser {
            parts: frames.into_iter(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.parts.len() == 0
    }

    fn next_frame(&mut self) -> Result<Frame> {
        self.parts
            .next()
            .ok_or_else(|| Error::unexpected("another array element", Frame::Array(None)))
    }

    /// Bulk element, absent allowed (MGET and friends interleave null
    /// bulks for missing keys).
    pub(crate) fn next_opt_bytes(&mut self) -> Result<Option<Bytes>> {
        match self.next_frame()? {
            Frame::Bulk(data) => Ok(data),
            other => Err(Error::unexpected("bulk element", other)),
        }
    }

    pub(crate) fn next_bytes(&mut self) -> Result<Bytes> {
        match self.next_opt_bytes()? {
            Some(data) => Ok(data),
            None => Err(Error::unexpected("present bulk element", Frame::Bulk(None))),
        }
    }

    pub(crate) fn next_string(&mut self) -> Result<String> {
        text(self.next_bytes()?)
    }

    pub(crate) fn next_integer(&mut self) -> Result<i64> {
        match self.next_frame()? {
            Frame::Integer(n) => Ok(n),
            other => Err(Error::unexpected("integer element", other)),
        }
    }

    /// Scores and other floats ride in bulk strings.
    pub(crate) fn next_float(&mut self) -> Result<f64> {
        let data = self.next_bytes()?;
        let repr = text(data.clone())?;
        repr.parse::<f64>()
            .map_err(|_| Error::unexpected("decimal float element", Frame::Bulk(Some(data))))
    }
}

/// Flatten a flat array into a list of present bulks.
pub(crate) fn bytes_list(frames: Vec<Frame>) -> Result<Vec<Bytes>> {
    let mut parser = ReplyParser::new(frames);
    let mut items = Vec::new();
    while !parser.is_empty() {
        items.push(parser.next_bytes()?);
    }
    Ok(items)
}

/// Flatten a flat array into optional bulks (missing keys stay `None`).
pub(crate) fn opt_bytes_list(frames: Vec<Frame>) -> Result<Vec<Option<Bytes>>> {
    let mut parser = ReplyParser::new(frames);
    let mut items = Vec::new();
    while !parser.is_empty() {
        items.push(parser.next_opt_bytes()?);
    }
    Ok(items)
}

/// Flatten an array of consecutive field/value bulks into pairs, in
/// server-returned order.
pub(crate) fn pairs_list(frames: Vec<Frame>) -> Result<Vec<(String, Bytes)>> {
    let mut parser = ReplyParser::new(frames);
    let mut pairs = Vec::new();
    while !parser.is_empty() {
        let field = parser.next_string()?;
        let value = parser.next_bytes()?;
        pairs.push((field, value));
    }
    Ok(pairs)
}
