use bytes::Bytes;

use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::frame::Frame;
use crate::{Error, Result};

/// Where LINSERT places the new element relative to the pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

impl Position {
    fn as_arg(self) -> &'static str {
        match self {
            Position::Before => "BEFORE",
            Position::After => "AFTER",
        }
    }
}

impl Client {
    /// Prepend to the list at `key`, returning the new length.
    pub async fn lpush(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("LPUSH").arg(key).arg(value))
            .await
    }

    /// Append to the list at `key`, returning the new length.
    pub async fn rpush(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("RPUSH").arg(key).arg(value))
            .await
    }

    /// Prepend only if the list exists. Returns the new length, 0 when
    /// the key is missing.
    pub async fn lpushx(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("LPUSHX").arg(key).arg(value))
            .await
    }

    /// Append only if the list exists.
    pub async fn rpushx(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("RPUSHX").arg(key).arg(value))
            .await
    }

    pub async fn lpop(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("LPOP").arg(key)).await
    }

    pub async fn rpop(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("RPOP").arg(key)).await
    }

    pub async fn llen(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("LLEN").arg(key)).await
    }

    /// Elements between `start` and `stop` inclusive; negative indexes
    /// count from the tail.
    pub async fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        let frames = self
            .array_request(Command::new("LRANGE").arg(key).arg(start).arg(stop))
            .await?;
        super::bytes_list(frames)
    }

    pub async fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("LINDEX").arg(key).arg(index))
            .await
    }

    /// Insert `value` next to the first occurrence of `pivot`. Returns
    /// the new length, or -1 when the pivot is missing.
    pub async fn linsert(
        &mut self,
        key: &str,
        position: Position,
        pivot: impl ToArg,
        value: impl ToArg,
    ) -> Result<i64> {
        self.int_request(
            Command::new("LINSERT")
                .arg(key)
                .arg(position.as_arg())
                .arg(pivot)
                .arg(value),
        )
        .await
    }

    /// Remove up to `count` occurrences of `value` (sign selects the
    /// scan direction; 0 removes all). Returns how many were removed.
    pub async fn lrem(&mut self, key: &str, count: i64, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("LREM").arg(key).arg(count).arg(value))
            .await
    }

    pub async fn lset(&mut self, key: &str, index: i64, value: impl ToArg) -> Result<()> {
        self.ok_request(Command::new("LSET").arg(key).arg(index).arg(value))
            .await
    }

    /// Trim the list to the inclusive range.
    pub async fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<()> {
        self.ok_request(Command::new("LTRIM").arg(key).arg(start).arg(stop))
            .await
    }

    /// Atomically pop the tail of `source` and push it onto the head
    /// of `destination`.
    pub async fn rpoplpush(&mut self, source: &str, destination: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("RPOPLPUSH").arg(source).arg(destination))
            .await
    }

    /// Blocking head pop over several lists. Occupies the connection
    /// for up to `timeout` seconds (0 blocks forever); `None` when the
    /// timeout expires. Returns the list the element came from.
    pub async fn blpop(&mut self, keys: &[&str], timeout: u64) -> Result<Option<(String, Bytes)>> {
        let cmd = Command::new("BLPOP").args(keys).arg(timeout);
        self.blocking_pop(cmd).await
    }

    /// Blocking tail pop; see [`blpop`](Client::blpop).
    pub async fn brpop(&mut self, keys: &[&str], timeout: u64) -> Result<Option<(String, Bytes)>> {
        let cmd = Command::new("BRPOP").args(keys).arg(timeout);
        self.blocking_pop(cmd).await
    }

    /// Blocking RPOPLPUSH. `None` when the timeout expires (the server
    /// signals this with a null array).
    pub async fn brpoplpush(
        &mut self,
        source: &str,
        destination: &str,
        timeout: u64,
    ) -> Result<Option<Bytes>> {
        let cmd = Command::new("BRPOPLPUSH")
            .arg(source)
            .arg(destination)
            .arg(timeout);
        match self.frame_request(cmd).await? {
            Frame::Bulk(data) => Ok(data),
            Frame::Array(None) => Ok(None),
            Frame::Simple(ref status) if status == "QUEUED" => Ok(None),
            other => Err(Error::unexpected("bulk or null array", other)),
        }
    }

    async fn blocking_pop(&mut self, cmd: Command) -> Result<Option<(String, Bytes)>> {
        match self.opt_array_request(cmd).await? {
            None => Ok(None),
            Some(frames) if frames.is_empty() => Ok(None),
            Some(frames) => {
                let mut parser = super::ReplyParser::new(frames);
                let key = parser.next_string()?;
                let value = parser.next_bytes()?;
                Ok(Some((key, value)))
            }
        }
    }
}
