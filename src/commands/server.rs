use bytes::Bytes;

use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::Result;

impl Client {
    /// Authenticate. Must precede every other command when the server
    /// requires a password.
    pub async fn auth(&mut self, password: &str) -> Result<()> {
        self.ok_request(Command::new("AUTH").arg(password)).await
    }

    /// Switch to a numbered database.
    pub async fn select(&mut self, db: u32) -> Result<()> {
        self.ok_request(Command::new("SELECT").arg(db)).await
    }

    /// Liveness probe; replies `PONG`.
    pub async fn ping(&mut self) -> Result<String> {
        self.status_request(Command::new("PING")).await
    }

    /// The server echoes `message` back, byte for byte.
    pub async fn echo(&mut self, message: impl ToArg) -> Result<Bytes> {
        let data = self.bulk_request(Command::new("ECHO").arg(message)).await?;
        Ok(data.unwrap_or_default())
    }

    /// Ask the server to close the connection, then release it.
    pub async fn quit(mut self) -> Result<()> {
        self.ok_request(Command::new("QUIT")).await?;
        self.connection.disconnect().await
    }

    /// Number of keys in the selected database.
    pub async fn dbsize(&mut self) -> Result<i64> {
        self.int_request(Command::new("DBSIZE")).await
    }

    /// Delete every key in the selected database.
    pub async fn flushdb(&mut self) -> Result<()> {
        self.ok_request(Command::new("FLUSHDB")).await
    }

    /// Delete every key in every database.
    pub async fn flushall(&mut self) -> Result<()> {
        self.ok_request(Command::new("FLUSHALL")).await
    }
}
