// https://redis.io/docs/reference/protocol-spec

use std::fmt;

use bytes::Buf;
use bytes::Bytes;
use std::io::Cursor;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use thiserror::Error as ThisError;

static CRLF: &[u8; 2] = b"\r\n";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("not enough data is available to parse an entire frame")]
    Incomplete,
    #[error("invalid frame data type: {0}")]
    InvalidDataType(u8),
    /// Invalid frame encoding.
    #[error("invalid frame format: {0}")]
    Format(String),
}

/// A single RESP reply value.
///
/// Null bulk strings (`$-1`) and null arrays (`*-1`) are distinct from
/// their empty counterparts and survive a parse/serialize round trip
/// unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Option<Bytes>),
    Array(Option<Vec<Frame>>),
}

impl Frame {
    /// Parse exactly one frame, advancing the cursor past it.
    ///
    /// Returns [`Error::Incomplete`] without consuming input when the
    /// buffer holds only part of a frame.
    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, Error> {
        // The first byte in a RESP-serialized payload always identifies
        // its type. Subsequent bytes constitute the type's contents.
        let first_byte = get_byte(src)?;
        let data_type = DataType::try_from(first_byte)?;

        match data_type {
            DataType::SimpleString => {
                let bytes = get_line(src)?.to_vec();
                let string = String::from_utf8(bytes)?;
                Ok(Frame::Simple(string))
            }
            DataType::SimpleError => {
                let bytes = get_line(src)?.to_vec();
                let string = String::from_utf8(bytes)?;
                Ok(Frame::Error(string))
            }
            DataType::Integer => {
                let integer = get_decimal(src)?;
                Ok(Frame::Integer(integer))
            }
            // $<length>\r\n<data>\r\n
            DataType::BulkString => {
                let length = get_decimal(src)?;

                if length == -1 {
                    return Ok(Frame::Bulk(None));
                }

                let length = length_of(length)?;
                let data = get_exact(src, length)?;
                expect_crlf(src)?;

                Ok(Frame::Bulk(Some(data)))
            }
            // *<number-of-elements>\r\n<element-1>...<element-n>
            DataType::Array => {
                let length = get_decimal(src)?;

                if length == -1 {
                    return Ok(Frame::Array(None));
                }

                let length = length_of(length)?;
                let mut frames = Vec::with_capacity(length);
                for _ in 0..length {
                    frames.push(Self::parse(src)?);
                }

                Ok(Frame::Array(Some(frames)))
            }
        }
    }

    /// Serialize into the server's wire format.
    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Frame::Simple(s) => {
                let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
                bytes.push(u8::from(DataType::SimpleString));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Error(s) => {
                let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
                bytes.push(u8::from(DataType::SimpleError));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Integer(i) => {
                let repr = i.to_string();
                let mut bytes = Vec::with_capacity(1 + repr.len() + CRLF.len());
                bytes.push(u8::from(DataType::Integer));
                bytes.extend_from_slice(repr.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Bulk(None) => b"$-1\r\n".to_vec(),
            Frame::Bulk(Some(data)) => {
                let length_str = data.len().to_string();
                let mut bytes = Vec::with_capacity(
                    1 + length_str.len() + CRLF.len() + data.len() + CRLF.len(),
                );
                bytes.push(u8::from(DataType::BulkString));
                bytes.extend_from_slice(length_str.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes.extend_from_slice(data);
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Array(None) => b"*-1\r\n".to_vec(),
            Frame::Array(Some(frames)) => {
                let length_str = frames.len().to_string();
                let mut bytes = Vec::with_capacity(1 + length_str.len() + CRLF.len());
                bytes.push(u8::from(DataType::Array));
                bytes.extend_from_slice(length_str.as_bytes());
                bytes.extend_from_slice(CRLF);
                for frame in frames {
                    bytes.extend(frame.serialize());
                }
                bytes
            }
        }
    }
}

impl From<Frame> for Vec<u8> {
    fn from(frame: Frame) -> Self {
        frame.serialize()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Simple(s) => write!(f, "+{}", s),
            Frame::Error(s) => write!(f, "-{}", s),
            Frame::Integer(i) => write!(f, ":{}", i),
            Frame::Bulk(None) => write!(f, "$-1"),
            Frame::Bulk(Some(bytes)) => write!(f, "${}", String::from_utf8_lossy(bytes)),
            Frame::Array(None) => write!(f, "*-1"),
            Frame::Array(Some(frames)) => {
                write!(f, "*{}", frames.len())?;
                for frame in frames {
                    write!(f, " {}", frame)?;
                }
                Ok(())
            }
        }
    }
}

/// Read bytes up to (not including) the next CRLF, consuming the CRLF.
fn get_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], Error> {
    let start = src.position() as usize;
    let end = src.get_ref().len();

    let line_end = src.get_ref()[start..end]
        .windows(2)
        .position(|window| window == CRLF)
        .ok_or(Error::Incomplete)
        .map(|index| start + index)?;

    src.set_position((line_end + CRLF.len()) as u64);

    Ok(&src.get_ref()[start..line_end])
}

/// Read a CRLF-terminated signed decimal. Length prefixes and integer
/// frames share this format.
fn get_decimal(src: &mut Cursor<&[u8]>) -> Result<i64, Error> {
    let line = get_line(src)?;
    let string = std::str::from_utf8(line)
        .map_err(|_| Error::Format("non-ascii decimal".to_string()))?;
    Ok(string.parse::<i64>()?)
}

/// Read exactly `length` payload bytes.
fn get_exact(src: &mut Cursor<&[u8]>, length: usize) -> Result<Bytes, Error> {
    let start = src.position() as usize;

    if src.get_ref().len() < start + length {
        return Err(Error::Incomplete);
    }

    let data = Bytes::copy_from_slice(&src.get_ref()[start..start + length]);
    src.set_position((start + length) as u64);

    Ok(data)
}

/// Consume the CRLF terminating a bulk payload.
fn expect_crlf(src: &mut Cursor<&[u8]>) -> Result<(), Error> {
    if src.remaining() < CRLF.len() {
        return Err(Error::Incomplete);
    }

    let position = src.position() as usize;
    if &src.get_ref()[position..position + CRLF.len()] != CRLF {
        return Err(Error::Format("bulk payload not terminated by CRLF".to_string()));
    }

    src.set_position((position + CRLF.len()) as u64);
    Ok(())
}

fn get_byte(src: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    if !src.has_remaining() {
        return Err(Error::Incomplete);
    }
    Ok(src.get_u8())
}

fn length_of(value: i64) -> Result<usize, Error> {
    usize::try_from(value).map_err(|_| Error::Format(format!("negative length: {}", value)))
}

/// RESP2 type tags. Anything else on the wire is a framing error.
#[derive(Debug)]
enum DataType {
    SimpleString, // '+'
    SimpleError,  // '-'
    Integer,      // ':'
    BulkString,   // '$'
    Array,        // '*'
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self, Error> {
        match byte {
            b'+' => Ok(Self::SimpleString),
            b'-' => Ok(Self::SimpleError),
            b':' => Ok(Self::Integer),
            b'$' => Ok(Self::BulkString),
            b'*' => Ok(Self::Array),
            _ => Err(Error::InvalidDataType(byte)),
        }
    }
}

impl From<DataType> for u8 {
    fn from(value: DataType) -> Self {
        match value {
            DataType::SimpleString => b'+',
            DataType::SimpleError => b'-',
            DataType::Integer => b':',
            DataType::BulkString => b'$',
            DataType::Array => b'*',
        }
    }
}

impl From<FromUtf8Error> for Error {
    fn from(_src: FromUtf8Error) -> Error {
        Error::Format("invalid UTF-8 in text frame".to_string())
    }
}

impl From<ParseIntError> for Error {
    fn from(src: ParseIntError) -> Error {
        Error::Format(src.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Result<Frame, Error> {
        let mut cursor = Cursor::new(data);
        Frame::parse(&mut cursor)
    }

    #[test]
    fn parse_simple_string_frame() {
        let frame = parse(b"+OK\r\n");

        assert!(matches!(frame, Ok(Frame::Simple(ref s)) if s == "OK"));
    }

    #[test]
    fn parse_simple_error_frame() {
        let frame = parse(b"-Error message\r\n");

        assert!(matches!(
            frame,
            Ok(Frame::Error(ref s)) if s == "Error message"
        ));
    }

    fn parse_integer_frame(data: &[u8], expected: i64) {
        let frame = parse(data);

        assert!(matches!(frame, Ok(Frame::Integer(i)) if i == expected));
    }

    #[test]
    fn parse_integer_frame_positive() {
        parse_integer_frame(b":1000\r\n", 1000);
    }

    #[test]
    fn parse_integer_frame_negative() {
        parse_integer_frame(b":-1000\r\n", -1000);
    }

    #[test]
    fn parse_integer_frame_zero() {
        parse_integer_frame(b":0\r\n", 0);
    }

    #[test]
    fn parse_integer_frame_beyond_32_bits() {
        parse_integer_frame(b":17179869184\r\n", 17_179_869_184);
    }

    #[test]
    fn parse_bulk_string_frame() {
        let frame = parse(b"$6\r\nfoobar\r\n");

        assert!(matches!(
            frame,
            Ok(Frame::Bulk(Some(ref b))) if b == &Bytes::from("foobar")
        ));
    }

    #[test]
    fn parse_bulk_string_frame_empty() {
        let frame = parse(b"$0\r\n\r\n");

        assert!(matches!(
            frame,
            Ok(Frame::Bulk(Some(ref b))) if b.is_empty()
        ));
    }

    #[test]
    fn parse_bulk_string_frame_null() {
        let frame = parse(b"$-1\r\n");

        assert!(matches!(frame, Ok(Frame::Bulk(None))));
    }

    #[test]
    fn parse_bulk_string_frame_binary() {
        // Payload bytes are opaque: NUL and CRLF inside the payload are
        // covered by the length prefix.
        let frame = parse(b"$6\r\na\x00b\r\nc\r\n");

        assert!(matches!(
            frame,
            Ok(Frame::Bulk(Some(ref b))) if b == &Bytes::from_static(b"a\x00b\r\nc")
        ));
    }

    #[test]
    fn parse_array_frame_empty() {
        let frame = parse(b"*0\r\n");

        assert!(matches!(frame, Ok(Frame::Array(Some(ref a))) if a.is_empty()));
    }

    #[test]
    fn parse_array_frame() {
        let frame = parse(b"*2\r\n$5\r\nhello\r\n$5\r\nworld\r\n");

        assert_eq!(
            frame.unwrap(),
            Frame::Array(Some(vec![
                Frame::Bulk(Some(Bytes::from("hello"))),
                Frame::Bulk(Some(Bytes::from("world"))),
            ]))
        );
    }

    #[test]
    fn parse_array_frame_nested() {
        let frame = parse(b"*2\r\n*3\r\n:1\r\n:2\r\n:3\r\n*2\r\n+Hello\r\n-World\r\n");

        assert_eq!(
            frame.unwrap(),
            Frame::Array(Some(vec![
                Frame::Array(Some(vec![
                    Frame::Integer(1),
                    Frame::Integer(2),
                    Frame::Integer(3),
                ])),
                Frame::Array(Some(vec![
                    Frame::Simple("Hello".to_string()),
                    Frame::Error("World".to_string()),
                ])),
            ]))
        );
    }

    #[test]
    fn parse_array_frame_null() {
        let frame = parse(b"*-1\r\n");

        assert!(matches!(frame, Ok(Frame::Array(None))));
    }

    #[test]
    fn parse_array_frame_null_in_the_middle() {
        let frame = parse(b"*3\r\n$5\r\nhello\r\n$-1\r\n$5\r\nworld\r\n");

        assert_eq!(
            frame.unwrap(),
            Frame::Array(Some(vec![
                Frame::Bulk(Some(Bytes::from("hello"))),
                Frame::Bulk(None),
                Frame::Bulk(Some(Bytes::from("world"))),
            ]))
        );
    }

    #[test]
    fn parse_incomplete_frames() {
        for data in [
            &b"+OK"[..],
            &b"$6\r\nfoo"[..],
            &b"$6\r\nfoobar"[..],
            &b"*2\r\n$5\r\nhello\r\n"[..],
            &b""[..],
        ] {
            assert!(matches!(parse(data), Err(Error::Incomplete)));
        }
    }

    #[test]
    fn parse_unknown_tag() {
        let frame = parse(b"%2\r\n");

        assert!(matches!(frame, Err(Error::InvalidDataType(b'%'))));
    }

    #[test]
    fn serialize_round_trip() {
        let frames = [
            Frame::Simple("OK".to_string()),
            Frame::Error("ERR wrong type".to_string()),
            Frame::Integer(-42),
            Frame::Bulk(None),
            Frame::Bulk(Some(Bytes::from_static(b""))),
            Frame::Bulk(Some(Bytes::from_static(b"a\x00\r\nb"))),
            Frame::Array(None),
            Frame::Array(Some(vec![])),
            Frame::Array(Some(vec![
                Frame::Bulk(None),
                Frame::Array(Some(vec![Frame::Integer(1)])),
                Frame::Simple("nested".to_string()),
            ])),
        ];

        for frame in frames {
            let bytes = frame.serialize();
            let parsed = parse(&bytes).unwrap();
            assert_eq!(parsed, frame);
        }
    }

    #[test]
    fn null_and_empty_bulk_serialize_differently() {
        assert_eq!(Frame::Bulk(None).serialize(), b"$-1\r\n");
        assert_eq!(
            Frame::Bulk(Some(Bytes::new())).serialize(),
            b"$0\r\n\r\n"
        );
        assert_eq!(Frame::Array(None).serialize(), b"*-1\r\n");
        assert_eq!(Frame::Array(Some(vec![])).serialize(), b"*0\r\n");
    }
}
