use bytes::Bytes;

use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::frame::Frame;
use crate::{Error, Result};

impl Client {
    /// Add `member` with `score`, or update its score. True when the
    /// member is new.
    pub async fn zadd(&mut self, key: &str, score: f64, member: impl ToArg) -> Result<bool> {
        self.bool_request(Command::new("ZADD").arg(key).arg(score).arg(member))
            .await
    }

    /// Remove members, returning how many existed.
    pub async fn zrem(&mut self, key: &str, members: &[&str]) -> Result<i64> {
        self.int_request(Command::new("ZREM").arg(key).args(members))
            .await
    }

    /// The member's score, or `None` when absent.
    pub async fn zscore(&mut self, key: &str, member: impl ToArg) -> Result<Option<f64>> {
        self.opt_float_request(Command::new("ZSCORE").arg(key).arg(member))
            .await
    }

    /// Add `increment` to the member's score, returning the new score.
    pub async fn zincrby(&mut self, key: &str, increment: f64, member: impl ToArg) -> Result<f64> {
        self.float_request(Command::new("ZINCRBY").arg(key).arg(increment).arg(member))
            .await
    }

    /// Sorted-set cardinality.
    pub async fn zcard(&mut self, key: &str) -> Result<i64> {
        self.int_request(Command::new("ZCARD").arg(key)).await
    }

    /// Members with a score between `min` and `max` inclusive.
    /// Infinite bounds encode as `inf`/`-inf`.
    pub async fn zcount(&mut self, key: &str, min: f64, max: f64) -> Result<i64> {
        self.int_request(Command::new("ZCOUNT").arg(key).arg(min).arg(max))
            .await
    }

    /// Members between ranks `start` and `stop`, ascending by score.
    pub async fn zrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        let frames = self
            .array_request(Command::new("ZRANGE").arg(key).arg(start).arg(stop))
            .await?;
        super::bytes_list(frames)
    }

    /// Like [`zrange`](Client::zrange), with each member's score.
    pub async fn zrange_withscores(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>> {
        let frames = self
            .array_request(
                Command::new("ZRANGE")
                    .arg(key)
                    .arg(start)
                    .arg(stop)
                    .arg("WITHSCORES"),
            )
            .await?;
        scored_list(frames)
    }

    /// Members between ranks `start` and `stop`, descending by score.
    pub async fn zrevrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        let frames = self
            .array_request(Command::new("ZREVRANGE").arg(key).arg(start).arg(stop))
            .await?;
        super::bytes_list(frames)
    }

    pub async fn zrevrange_withscores(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>> {
        let frames = self
            .array_request(
                Command::new("ZREVRANGE")
                    .arg(key)
                    .arg(start)
                    .arg(stop)
                    .arg("WITHSCORES"),
            )
            .await?;
        scored_list(frames)
    }

    /// Members with a score between `min` and `max`, ascending.
    pub async fn zrangebyscore(&mut self, key: &str, min: f64, max: f64) -> Result<Vec<Bytes>> {
        let frames = self
            .array_request(Command::new("ZRANGEBYSCORE").arg(key).arg(min).arg(max))
            .await?;
        super::bytes_list(frames)
    }

    /// Ascending rank of `member`, or `None` when absent.
    pub async fn zrank(&mut self, key: &str, member: impl ToArg) -> Result<Option<i64>> {
        self.rank_request(Command::new("ZRANK").arg(key).arg(member))
            .await
    }

    /// Descending rank of `member`.
    pub async fn zrevrank(&mut self, key: &str, member: impl ToArg) -> Result<Option<i64>> {
        self.rank_request(Command::new("ZREVRANK").arg(key).arg(member))
            .await
    }

    /// Remove members between ranks `start` and `stop`, returning how
    /// many were removed.
    pub async fn zremrangebyrank(&mut self, key: &str, start: i64, stop: i64) -> Result<i64> {
        self.int_request(
            Command::new("ZREMRANGEBYRANK")
                .arg(key)
                .arg(start)
                .arg(stop),
        )
        .await
    }

    /// Remove members with a score between `min` and `max`.
    pub async fn zremrangebyscore(&mut self, key: &str, min: f64, max: f64) -> Result<i64> {
        self.int_request(
            Command::new("ZREMRANGEBYSCORE")
                .arg(key)
                .arg(min)
                .arg(max),
        )
        .await
    }

    /// Rank replies are an integer, or a null bulk for missing members.
    async fn rank_request(&mut self, cmd: Command) -> Result<Option<i64>> {
        match self.frame_request(cmd).await? {
            Frame::Integer(rank) => Ok(Some(rank)),
            Frame::Bulk(None) => Ok(None),
            Frame::Simple(ref status) if status == "QUEUED" => Ok(None),
            other => Err(Error::unexpected("integer or null bulk", other)),
        }
    }
}

/// Flatten alternating member/score bulks.
fn scored_list(frames: Vec<Frame>) -> Result<Vec<(Bytes, f64)>> {
    let mut parser = super::ReplyParser::new(frames);
    let mut scored = Vec::new();
    while !parser.is_empty() {
        let member = parser.next_bytes()?;
        let score = parser.next_float()?;
        scored.push((member, score));
    }
    Ok(scored)
}
