use bytes::Bytes;

use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::Result;

impl Client {
    /// Add `member` to the set at `key`. True when it was not already
    /// a member.
    pub async fn sadd(&mut self, key: &str, member: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("SADD").arg(key).arg(member))
            .await
    }

    /// Remove `member`. True when it was a member.
    pub async fn srem(&mut self, key: &str, member: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("SREM").arg(key).arg(member))
            .await
    }

    /// Remove and return a random member.
    pub async fn spop(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("SPOP").arg(key)).await
    }

    /// A random member, without removing it.
    pub async fn srandmember(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.bulk_request(Command::new("SRANDMEMBER").arg(key)).await
    }

    /// Set cardinality.
    pub async fn scard(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("SCARD").arg(key)).await
    }

    pub async fn sismember(&mut self, key: &str, member: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("SISMEMBER").arg(key).arg(member))
            .await
    }

    pub async fn smembers(&mut self, key: &str) -> Result<Vec<Bytes>> {
        let frames = self.array_request(Command::new("SMEMBERS").arg(key)).await?;
        super::bytes_list(frames)
    }

    /// Move `member` between sets atomically. True when it was moved.
    pub async fn smove(
        &mut self,
        source: &str,
        destination: &str,
        member: impl ToArg,
    ) -> Result<bool> {
        self.bool_request(
            Command::new("SMOVE")
                .arg(source)
                .arg(destination)
                .arg(member),
        )
        .await
    }

    /// Members of the first set that are in none of the others.
    pub async fn sdiff(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        let frames = self.array_request(Command::new("SDIFF").args(keys)).await?;
        super::bytes_list(frames)
    }

    /// Like [`sdiff`](Client::sdiff), stored in `destination`. Returns
    /// the result's cardinality.
    pub async fn sdiffstore(&mut self, destination: &str, keys: &[&str]) -> Result<i64> {
        self.int_request(Command::new("SDIFFSTORE").arg(destination).args(keys))
            .await
    }

    pub async fn sinter(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        let frames = self.array_request(Command::new("SINTER").args(keys)).await?;
        super::bytes_list(frames)
    }

    pub async fn sinterstore(&mut self, destination: &str, keys: &[&str]) -> Result<i64> {
        self.int_request(Command::new("SINTERSTORE").arg(destination).args(keys))
            .await
    }

    pub async fn sunion(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        let frames = self.array_request(Command::new("SUNION").args(keys)).await?;
        super::bytes_list(frames)
    }

    pub async fn sunionstore(&mut self, destination: &str, keys: &[&str]) -> Result<i64> {
        self.int_request(Command::new("SUNIONSTORE").arg(destination).args(keys))
            .await
    }
}
