//! MULTI/EXEC transaction support.
//!
//! The state machine lives on the connection. While queueing, the
//! request helpers consume the server's `QUEUED` acknowledgements and
//! the real replies surface from [`Client::exec`] as raw frames in
//! queue order.

use tracing::debug;

use crate::client::Client;
use crate::command::Command;
use crate::frame::Frame;
use crate::{BoxFuture, Error, Result};

/// Per-connection transaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    Idle,
    /// Between MULTI and EXEC/DISCARD: commands are queued server-side.
    Queueing,
    /// A queued command or EXEC failed; EXEC is rejected locally until
    /// [`Client::discard`] clears the state.
    Aborted,
}

impl Client {
    /// Open a MULTI block.
    pub async fn multi(&mut self) -> Result<()> {
        match self.connection.tx_state() {
            TxState::Queueing => return Err(Error::Transaction("MULTI calls cannot be nested")),
            TxState::Aborted => {
                return Err(Error::Transaction(
                    "transaction aborted; DISCARD before starting another",
                ))
            }
            TxState::Idle => {}
        }

        self.ok_request(Command::new("MULTI")).await?;
        self.connection.set_tx_state(TxState::Queueing);
        Ok(())
    }

    /// Run the queued commands atomically.
    ///
    /// Replies come back as one frame per queued command, in order. A
    /// null array means a watched key changed and nothing ran; this
    /// surfaces as [`Error::TransactionAborted`].
    pub async fn exec(&mut self) -> Result<Vec<Frame>> {
        match self.connection.tx_state() {
            TxState::Idle => return Err(Error::Transaction("EXEC without MULTI")),
            TxState::Aborted => {
                return Err(Error::Transaction(
                    "transaction aborted; DISCARD before EXEC",
                ))
            }
            TxState::Queueing => {}
        }

        // EXEC itself is not queued: leave queueing mode before the
        // request so its reply is decoded as a result array.
        self.connection.set_tx_state(TxState::Idle);

        match self.request(Command::new("EXEC")).await {
            Ok(Some(Frame::Array(Some(frames)))) => Ok(frames),
            Ok(Some(Frame::Array(None))) => {
                debug!("EXEC aborted by watched-key conflict");
                Err(Error::TransactionAborted)
            }
            Ok(Some(other)) => Err(Error::unexpected("EXEC reply array", other)),
            Ok(None) => Err(Error::Transaction("EXEC without MULTI")),
            Err(Error::Server(message)) => {
                // EXECABORT: the server refused the whole queue.
                self.connection.set_tx_state(TxState::Aborted);
                Err(Error::Server(message))
            }
            Err(err) => Err(err),
        }
    }

    /// Drop the queued commands and leave the MULTI block.
    ///
    /// Also clears the aborted state after a failed queue or EXEC; in
    /// that case the server may already have discarded the block, so
    /// its "DISCARD without MULTI" complaint is swallowed.
    pub async fn discard(&mut self) -> Result<()> {
        let state = self.connection.tx_state();
        if state == TxState::Idle {
            return Err(Error::Transaction("DISCARD without MULTI"));
        }

        self.connection.set_tx_state(TxState::Idle);

        match self.ok_request(Command::new("DISCARD")).await {
            Ok(()) => Ok(()),
            Err(Error::Server(_)) if state == TxState::Aborted => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Mark keys for optimistic concurrency: if any changes before
    /// EXEC, the transaction aborts. Only legal outside a MULTI block.
    pub async fn watch(&mut self, keys: &[&str]) -> Result<()> {
        if self.connection.tx_state() != TxState::Idle {
            return Err(Error::Transaction("WATCH inside MULTI is not allowed"));
        }
        self.ok_request(Command::new("WATCH").args(keys)).await
    }

    /// Forget all watched keys. Only legal outside a MULTI block.
    pub async fn unwatch(&mut self) -> Result<()> {
        if self.connection.tx_state() != TxState::Idle {
            return Err(Error::Transaction("UNWATCH inside MULTI is not allowed"));
        }
        self.ok_request(Command::new("UNWATCH")).await
    }

    /// Queue one command inside a MULTI block.
    ///
    /// Runs the closure, which must issue exactly one command; the
    /// `QUEUED` acknowledgement is consumed by the request helpers and
    /// the closure's typed result is a placeholder. A failure aborts
    /// the transaction.
    ///
    /// ```no_run
    /// # async fn example(client: &mut retis::Client) -> retis::Result<()> {
    /// client.multi().await?;
    /// client
    ///     .queue(|c| Box::pin(async move { c.set("a", "1").await }))
    ///     .await?;
    /// let replies = client.exec().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn queue<T, F>(&mut self, thunk: F) -> Result<()>
    where
        F: for<'a> FnOnce(&'a mut Client) -> BoxFuture<'a, Result<T>>,
    {
        if self.connection.tx_state() != TxState::Queueing {
            return Err(Error::Transaction("queue is only legal inside MULTI"));
        }

        match thunk(self).await {
            Ok(_) => Ok(()),
            Err(err) => {
                self.connection.set_tx_state(TxState::Aborted);
                Err(err)
            }
        }
    }
}
