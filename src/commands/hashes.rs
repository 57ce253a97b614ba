use bytes::Bytes;

use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::Result;

impl Client {
    /// Set `field` in the hash at `key`. True when the field is new.
    pub async fn hset(&mut self, key: &str, field: &str, value: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("HSET").arg(key).arg(field).arg(value))
            .await
    }

    /// Set `field` only if it does not exist yet.
    pub async fn hsetnx(&mut self, key: &str, field: &str, value: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("HSETNX").arg(key).arg(field).arg(value))
            .await
    }

    pub async fn hget(&mut self, key: &str, field: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("HGET").arg(key).arg(field))
            .await
    }

    /// Values of several fields, missing ones as `None`, in argument
    /// order.
    pub async fn hmget(&mut self, key: &str, fields: &[&str]) -> Result<Vec<Option<Bytes>>> {
        let frames = self
            .array_request(Command::new("HMGET").arg(key).args(fields))
            .await?;
        super::opt_bytes_list(frames)
    }

    /// Set several fields in one round trip.
    pub async fn hmset<V: ToArg + Clone>(&mut self, key: &str, pairs: &[(&str, V)]) -> Result<()> {
        let mut cmd = Command::new("HMSET").arg(key);
        for (field, value) in pairs {
            cmd = cmd.arg(*field).arg(value.clone());
        }
        self.ok_request(cmd).await
    }

    /// Delete fields, returning how many existed.
    pub async fn hdel(&mut self, key: &str, fields: &[&str]) -> Result<i64> {
        self.int_request(Command::new("HDEL").arg(key).args(fields))
            .await
    }

    pub async fn hexists(&mut self, key: &str, field: &str) -> Result<bool> {
        self.bool_request(Command::new("HEXISTS").arg(key).arg(field))
            .await
    }

    pub async fn hincrby(&mut self, key: &str, field: &str, increment: i64) -> Result<i64> {
        self.int_request(Command::new("HINCRBY").arg(key).arg(field).arg(increment))
            .await
    }

    pub async fn hincrbyfloat(&mut self, key: &str, field: &str, increment: f64) -> Result<f64> {
        self.float_request(
            Command::new("HINCRBYFLOAT")
                .arg(key)
                .arg(field)
                .arg(increment),
        )
        .await
    }

    /// Number of fields in the hash.
    pub async fn hlen(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("HLEN").arg(key)).await
    }

    pub async fn hkeys(&mut self, key: &str) -> Result<Vec<String>> {
        let frames = self.array_request(Command::new("HKEYS").arg(key)).await?;
        let mut parser = super::ReplyParser::new(frames);
        let mut fields = Vec::new();
        while !parser.is_empty() {
            fields.push(parser.next_string()?);
        }
        Ok(fields)
    }

    pub async fn hvals(&mut self, key: &str) -> Result<Vec<Bytes>> {
        let frames = self.array_request(Command::new("HVALS").arg(key)).await?;
        super::bytes_list(frames)
    }

    /// All fields and values, as pairs in server-returned order.
    pub async fn hgetall(&mut self, key: &str) -> Result<Vec<(String, Bytes)>> {
        let frames = self.array_request(Command::new("HGETALL").arg(key)).await?;
        super::pairs_list(frames)
    }
}
