use bytes::{Buf, BytesMut};
use std::io::Cursor;
use tokio_util::codec::Decoder;

use crate::frame::{self, Frame};
use crate::Error;

/// Decoder for the inbound reply stream.
///
/// Wraps [`Frame::parse`] for use with a framed reader: an incomplete
/// frame yields `Ok(None)` and the residue stays in the buffer until
/// the socket delivers the rest.
#[derive(Debug)]
pub struct ReplyCodec;

impl Decoder for ReplyCodec {
    type Item = Frame;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut cursor = Cursor::new(&src[..]);
        let frame = match Frame::parse(&mut cursor) {
            Ok(frame) => frame,
            Err(frame::Error::Incomplete) => return Ok(None), // Not enough data to parse a frame.
            Err(err) => return Err(err.into()),
        };

        let position = usize::try_from(cursor.position())
            .map_err(|_| frame::Error::Format("cursor position overflow".to_string()))?;

        // Remove the parsed frame from the buffer.
        src.advance(position);

        Ok(Some(frame))
    }
}
