use bytes::Bytes;

use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::Result;

/// Bitwise operation for [`Client::bitop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    Xor,
    Not,
}

impl BitOp {
    fn as_arg(self) -> &'static str {
        match self {
            BitOp::And => "AND",
            BitOp::Or => "OR",
            BitOp::Xor => "XOR",
            BitOp::Not => "NOT",
        }
    }
}

impl Client {
    /// Set `key` to `value`.
    pub async fn set(&mut self, key: &str, value: impl ToArg) -> Result<()> {
        self.ok_request(Command::new("SET").arg(key).arg(value)).await
    }

    /// Set `key` only if it does not exist. True when the key was set.
    pub async fn setnx(&mut self, key: &str, value: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("SETNX").arg(key).arg(value))
            .await
    }

    /// Set `key` with a time-to-live in seconds.
    pub async fn setex(&mut self, key: &str, seconds: i64, value: impl ToArg) -> Result<()> {
        self.ok_request(Command::new("SETEX").arg(key).arg(seconds).arg(value))
            .await
    }

    /// Set `key` with a time-to-live in milliseconds.
    pub async fn psetex(&mut self, key: &str, milliseconds: i64, value: impl ToArg) -> Result<()> {
        self.ok_request(
            Command::new("PSETEX")
                .arg(key)
                .arg(milliseconds)
                .arg(value),
        )
        .await
    }

    /// Get the value of `key` as UTF-8 text. Missing keys are `None`;
    /// an existing empty value is `Some("")`.
    pub async fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.string_request(Command::new("GET").arg(key)).await
    }

    /// Get the raw value of `key`. Binary-safe.
    pub async fn get_bytes(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("GET").arg(key)).await
    }

    /// Atomically set `key` and return its previous value.
    pub async fn getset(&mut self, key: &str, value: impl ToArg) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("GETSET").arg(key).arg(value))
            .await
    }

    /// Values of all `keys`, missing ones as `None`, in argument order.
    pub async fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<Bytes>>> {
        let frames = self.array_request(Command::new("MGET").args(keys)).await?;
        super::opt_bytes_list(frames)
    }

    /// Set several keys in one round trip.
    pub async fn mset<V: ToArg + Clone>(&mut self, pairs: &[(&str, V)]) -> Result<()> {
        let mut cmd = Command::new("MSET");
        for (key, value) in pairs {
            cmd = cmd.arg(*key).arg(value.clone());
        }
        self.ok_request(cmd).await
    }

    /// Set several keys only if none of them exist.
    pub async fn msetnx<V: ToArg + Clone>(&mut self, pairs: &[(&str, V)]) -> Result<bool> {
        let mut cmd = Command::new("MSETNX");
        for (key, value) in pairs {
            cmd = cmd.arg(*key).arg(value.clone());
        }
        self.bool_request(cmd).await
    }

    /// Append to the string at `key`, returning the new length.
    pub async fn append(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("APPEND").arg(key).arg(value))
            .await
    }

    pub async fn strlen(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("STRLEN").arg(key)).await
    }

    /// Substring by byte offsets; negative offsets count from the end.
    pub async fn getrange(&mut self, key: &str, start: i64, end: i64) -> Result<Bytes> {
        let data = self
            .bulk_request(Command::new("GETRANGE").arg(key).arg(start).arg(end))
            .await?;
        Ok(data.unwrap_or_default())
    }

    /// Overwrite part of the string at `key` starting at `offset`,
    /// returning the new length.
    pub async fn setrange(&mut self, key: &str, offset: i64, value: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("SETRANGE").arg(key).arg(offset).arg(value))
            .await
    }

    pub async fn incr(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("INCR").arg(key)).await
    }

    pub async fn incrby(&mut self, key: &str, increment: i64) -> Result<i64> {
        self.int_request(Command::new("INCRBY").arg(key).arg(increment))
            .await
    }

    /// The new value arrives as a bulk string in decimal form.
    pub async fn incrbyfloat(&mut self, key: &str, increment: f64) -> Result<f64> {
        self.float_request(Command::new("INCRBYFLOAT").arg(key).arg(increment))
            .await
    }

    pub async fn decr(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("DECR").arg(key)).await
    }

    pub async fn decrby(&mut self, key: &str, decrement: i64) -> Result<i64> {
        self.int_request(Command::new("DECRBY").arg(key).arg(decrement))
            .await
    }

    /// Value of the bit at `offset`.
    pub async fn getbit(&mut self, key: &str, offset: i64) -> Result<bool> {
        self.bool_request(Command::new("GETBIT").arg(key).arg(offset))
            .await
    }

    /// Set the bit at `offset`, returning its previous value.
    pub async fn setbit(&mut self, key: &str, offset: i64, value: bool) -> Result<bool> {
        self.bool_request(
            Command::new("SETBIT")
                .arg(key)
                .arg(offset)
                .arg(if value { 1_i64 } else { 0 }),
        )
        .await
    }

    /// Number of set bits in the string at `key`.
    pub async fn bitcount(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("BITCOUNT").arg(key)).await
    }

    /// Bitwise operation over `keys`, stored in `destkey`. Returns the
    /// length of the resulting string. NOT takes exactly one source
    /// key; the server enforces it.
    pub async fn bitop(&mut self, op: BitOp, destkey: &str, keys: &[&str]) -> Result<i64> {
        self.int_request(Command::new("BITOP").arg(op.as_arg()).arg(destkey).args(keys))
            .await
    }
}
