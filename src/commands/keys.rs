use crate::client::Client;
use crate::command::Command;
use crate::Result;

impl Client {
    /// Delete keys, returning how many existed.
    pub async fn del(&mut self, keys: &[&str]) -> Result<i64> {
        self.int_request(Command::new("DEL").args(keys)).await
    }

    pub async fn exists(&mut self, key: &str) -> Result<bool> {
        self.bool_request(Command::new("EXISTS").arg(key)).await
    }

    /// Set a time-to-live in seconds. False when the key is missing.
    pub async fn expire(&mut self, key: &str, seconds: i64) -> Result<bool> {
        self.bool_request(Command::new("EXPIRE").arg(key).arg(seconds))
            .await
    }

    /// Set a time-to-live in milliseconds.
    pub async fn pexpire(&mut self, key: &str, milliseconds: i64) -> Result<bool> {
        self.bool_request(Command::new("PEXPIRE").arg(key).arg(milliseconds))
            .await
    }

    /// Expire at a Unix timestamp (seconds).
    pub async fn expireat(&mut self, key: &str, timestamp: i64) -> Result<bool> {
        self.bool_request(Command::new("EXPIREAT").arg(key).arg(timestamp))
            .await
    }

    /// Expire at a Unix timestamp (milliseconds).
    pub async fn pexpireat(&mut self, key: &str, timestamp_ms: i64) -> Result<bool> {
        self.bool_request(Command::new("PEXPIREAT").arg(key).arg(timestamp_ms))
            .await
    }

    /// Remaining time-to-live in seconds. -1 when the key has no
    /// expiration, -2 when it does not exist.
    pub async fn ttl(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("TTL").arg(key)).await
    }

    /// Remaining time-to-live in milliseconds.
    pub async fn pttl(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("PTTL").arg(key)).await
    }

    /// Drop the expiration. True when one was removed.
    pub async fn persist(&mut self, key: &str) -> Result<bool> {
        self.bool_request(Command::new("PERSIST").arg(key)).await
    }

    /// All keys matching a glob pattern. The pattern is sent verbatim;
    /// matching happens server-side.
    pub async fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        let frames = self.array_request(Command::new("KEYS").arg(pattern)).await?;
        let mut parser = super::ReplyParser::new(frames);
        let mut keys = Vec::new();
        while !parser.is_empty() {
            keys.push(parser.next_string()?);
        }
        Ok(keys)
    }

    /// A random key, or `None` on an empty database.
    pub async fn randomkey(&mut self) -> Result<Option<String>> {
        self.string_request(Command::new("RANDOMKEY")).await
    }

    /// Rename `key` to `newkey`, overwriting any existing value.
    pub async fn rename(&mut self, key: &str, newkey: &str) -> Result<()> {
        self.ok_request(Command::new("RENAME").arg(key).arg(newkey))
            .await
    }

    /// Rename only if `newkey` does not exist.
    pub async fn renamenx(&mut self, key: &str, newkey: &str) -> Result<bool> {
        self.bool_request(Command::new("RENAMENX").arg(key).arg(newkey))
            .await
    }

    /// The storage type of `key` ("string", "list", ..., or "none").
    pub async fn type_(&mut self, key: &str) -> Result<String> {
        self.status_request(Command::new("TYPE").arg(key)).await
    }
}
