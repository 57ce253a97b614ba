use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::subscriber::Subscriber;
use crate::tx::TxState;
use crate::{Error, Result};

impl Client {
    /// Post a message to a channel, returning how many subscribers
    /// received it.
    pub async fn publish(&mut self, channel: &str, message: impl ToArg) -> Result<i64> {
        self.int_request(Command::new("PUBLISH").arg(channel).arg(message))
            .await
    }

    /// Enter subscriber mode on the given channels.
    ///
    /// The client is consumed: in subscriber mode only the pub/sub and
    /// connection commands exist, which the returned [`Subscriber`]
    /// type is the whole of. [`Subscriber::into_client`] returns to
    /// request/reply mode once every subscription is dropped.
    pub async fn subscribe(self, channels: &[&str]) -> Result<Subscriber> {
        if channels.is_empty() {
            return Err(Error::Subscribe(
                "subscribe requires at least one channel".to_string(),
            ));
        }
        self.enter_subscriber_mode(channels, &[]).await
    }

    /// Enter subscriber mode on the given glob patterns.
    pub async fn psubscribe(self, patterns: &[&str]) -> Result<Subscriber> {
        if patterns.is_empty() {
            return Err(Error::Subscribe(
                "psubscribe requires at least one pattern".to_string(),
            ));
        }
        self.enter_subscriber_mode(&[], patterns).await
    }

    async fn enter_subscriber_mode(
        self,
        channels: &[&str],
        patterns: &[&str],
    ) -> Result<Subscriber> {
        if self.connection.tx_state() != TxState::Idle {
            return Err(Error::Transaction(
                "subscribe inside MULTI is not allowed",
            ));
        }
        Subscriber::establish(self, channels, patterns).await
    }
}
