//! Subscriber mode.
//!
//! After SUBSCRIBE/PSUBSCRIBE the server pushes frames instead of
//! answering requests, so who drains the socket changes: the
//! [`Subscriber`] owns the connection and every inbound frame is
//! either a published message or a subscription acknowledgement.

use std::collections::{HashSet, VecDeque};

use async_stream::try_stream;
use bytes::Bytes;
use tokio_stream::Stream;
use tracing::debug;

use crate::client::{text, Client};
use crate::command::Command;
use crate::commands::ReplyParser;
use crate::frame::Frame;
use crate::{Error, Result};

/// A message published to a channel this subscriber listens on.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub channel: String,
    /// The matching pattern, for pattern subscriptions.
    pub pattern: Option<String>,
    pub payload: Bytes,
}

/// A connection in subscriber mode.
///
/// Only subscription management, PING and QUIT are available; every
/// other command is unrepresentable here, so "disallowed commands fail
/// before being written" holds by construction. Exactly one consumer
/// pulls messages.
pub struct Subscriber {
    client: Client,
    channels: HashSet<String>,
    patterns: HashSet<String>,
    /// Messages that arrived interleaved with command acknowledgements.
    pending: VecDeque<Message>,
}

enum Push {
    Message(Message),
    Ack {
        kind: AckKind,
        subject: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AckKind {
    Subscribe,
    Unsubscribe,
    Psubscribe,
    Punsubscribe,
}

impl Subscriber {
    pub(crate) async fn establish(
        client: Client,
        channels: &[&str],
        patterns: &[&str],
    ) -> Result<Subscriber> {
        let mut subscriber = Subscriber {
            client,
            channels: HashSet::new(),
            patterns: HashSet::new(),
            pending: VecDeque::new(),
        };
        if !channels.is_empty() {
            subscriber.subscribe(channels).await?;
        }
        if !patterns.is_empty() {
            subscriber.psubscribe(patterns).await?;
        }
        Ok(subscriber)
    }

    /// Listen on additional channels.
    pub async fn subscribe(&mut self, channels: &[&str]) -> Result<()> {
        self.client
            .connection
            .write_command(&Command::new("SUBSCRIBE").args(channels))
            .await?;
        self.await_acks(AckKind::Subscribe, channels.len()).await
    }

    /// Stop listening on channels; an empty slice drops them all.
    pub async fn unsubscribe(&mut self, channels: &[&str]) -> Result<()> {
        // With no channel arguments the server acknowledges once per
        // active channel subscription, or once with a nil subject when
        // there were none.
        let expected = if channels.is_empty() {
            self.channels.len().max(1)
        } else {
            channels.len()
        };
        self.client
            .connection
            .write_command(&Command::new("UNSUBSCRIBE").args(channels))
            .await?;
        self.await_acks(AckKind::Unsubscribe, expected).await
    }

    /// Listen on additional patterns.
    pub async fn psubscribe(&mut self, patterns: &[&str]) -> Result<()> {
        self.client
            .connection
            .write_command(&Command::new("PSUBSCRIBE").args(patterns))
            .await?;
        self.await_acks(AckKind::Psubscribe, patterns.len()).await
    }

    /// Stop listening on patterns; an empty slice drops them all.
    pub async fn punsubscribe(&mut self, patterns: &[&str]) -> Result<()> {
        let expected = if patterns.is_empty() {
            self.patterns.len().max(1)
        } else {
            patterns.len()
        };
        self.client
            .connection
            .write_command(&Command::new("PUNSUBSCRIBE").args(patterns))
            .await?;
        self.await_acks(AckKind::Punsubscribe, expected).await
    }

    /// Liveness probe. Messages arriving before the PONG are queued,
    /// not dropped.
    pub async fn ping(&mut self) -> Result<()> {
        self.client
            .connection
            .write_command(&Command::new("PING"))
            .await?;

        loop {
            let frame = self.client.connection.read_reply().await?;
            match frame {
                Frame::Simple(ref status) if status == "PONG" => return Ok(()),
                frame => {
                    if let Push::Message(message) = parse_push(frame)? {
                        self.pending.push_back(message);
                    }
                }
            }
        }
    }

    /// The next published message. `None` when the server closes the
    /// connection.
    pub async fn next_message(&mut self) -> Result<Option<Message>> {
        if let Some(message) = self.pending.pop_front() {
            return Ok(Some(message));
        }

        loop {
            let frame = match self.client.connection.read_reply().await {
                Ok(frame) => frame,
                Err(Error::ConnectionClosed) => return Ok(None),
                Err(err) => return Err(err),
            };

            match parse_push(frame)? {
                Push::Message(message) => return Ok(Some(message)),
                Push::Ack { kind, subject } => self.apply_ack(kind, subject),
            }
        }
    }

    /// The subscriber as a stream of messages, ending when the server
    /// closes the connection.
    pub fn into_stream(self) -> impl Stream<Item = Result<Message>> {
        try_stream! {
            let mut subscriber = self;
            while let Some(message) = subscriber.next_message().await? {
                yield message;
            }
        }
    }

    /// Channels currently subscribed, plus patterns.
    pub fn subscription_count(&self) -> usize {
        self.channels.len() + self.patterns.len()
    }

    /// Leave subscriber mode. Fails unless every subscription was
    /// dropped first; messages still queued locally are discarded.
    pub fn into_client(self) -> Result<Client> {
        if self.subscription_count() != 0 {
            return Err(Error::Subscribe(format!(
                "{} subscriptions still active",
                self.subscription_count()
            )));
        }
        debug!("leaving subscriber mode");
        Ok(self.client)
    }

    /// Close the connection.
    pub async fn quit(mut self) -> Result<()> {
        self.client.connection.disconnect().await
    }

    /// Consume acknowledgement frames until `expected` of `kind` have
    /// arrived, queueing any messages interleaved between them.
    async fn await_acks(&mut self, kind: AckKind, expected: usize) -> Result<()> {
        let mut seen = 0;
        while seen < expected {
            let frame = self.client.connection.read_reply().await?;
            match parse_push(frame)? {
                Push::Message(message) => self.pending.push_back(message),
                Push::Ack {
                    kind: ack_kind,
                    subject,
                } => {
                    if ack_kind == kind {
                        seen += 1;
                    }
                    self.apply_ack(ack_kind, subject);
                }
            }
        }
        Ok(())
    }

    fn apply_ack(&mut self, kind: AckKind, subject: Option<String>) {
        match (kind, subject) {
            (AckKind::Subscribe, Some(channel)) => {
                debug!(%channel, "subscribed");
                self.channels.insert(channel);
            }
            (AckKind::Unsubscribe, Some(channel)) => {
                debug!(%channel, "unsubscribed");
                self.channels.remove(&channel);
            }
            (AckKind::Psubscribe, Some(pattern)) => {
                debug!(%pattern, "pattern subscribed");
                self.patterns.insert(pattern);
            }
            (AckKind::Punsubscribe, Some(pattern)) => {
                debug!(%pattern, "pattern unsubscribed");
                self.patterns.remove(&pattern);
            }
            // A nil subject acknowledges an unsubscribe-all with no
            // active subscriptions.
            (_, None) => {}
        }
    }
}

/// Decode one pushed frame: `["message", channel, payload]`,
/// `["pmessage", pattern, channel, payload]`, or an acknowledgement
/// `[kind, subject, count]`.
fn parse_push(frame: Frame) -> Result<Push> {
    let items = match frame {
        Frame::Array(Some(items)) => items,
        other => return Err(Error::unexpected("pushed array", other)),
    };

    let mut parser = ReplyParser::new(items);

    let kind = parser.next_string()?;
    match kind.as_str() {
        "message" => {
            let channel = parser.next_string()?;
            let payload = parser.next_bytes()?;
            Ok(Push::Message(Message {
                channel,
                pattern: None,
                payload,
            }))
        }
        "pmessage" => {
            let pattern = parser.next_string()?;
            let channel = parser.next_string()?;
            let payload = parser.next_bytes()?;
            Ok(Push::Message(Message {
                channel,
                pattern: Some(pattern),
                payload,
            }))
        }
        "subscribe" | "unsubscribe" | "psubscribe" | "punsubscribe" => {
            let kind = match kind.as_str() {
                "subscribe" => AckKind::Subscribe,
                "unsubscribe" => AckKind::Unsubscribe,
                "psubscribe" => AckKind::Psubscribe,
                _ => AckKind::Punsubscribe,
            };
            let subject = match parser.next_opt_bytes()? {
                Some(bytes) => Some(text(bytes)?),
                None => None,
            };
            // Trailing element is the server's subscription count.
            let _count = parser.next_integer()?;
            Ok(Push::Ack { kind, subject })
        }
        _ => Err(Error::Subscribe(format!(
            "unrecognized pushed frame kind {:?}",
            kind
        ))),
    }
}
