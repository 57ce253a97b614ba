use crate::client::Client;
use crate::command::{Command, ToArg};
use crate::frame::Frame;
use crate::Result;

impl Client {
    /// Run a Lua script server-side. The reply shape depends on the
    /// script, so the raw frame is passed through.
    pub async fn eval<A: ToArg + Clone>(
        &mut self,
        script: &str,
        keys: &[&str],
        args: &[A],
    ) -> Result<Frame> {
        let cmd = Command::new("EVAL")
            .arg(script)
            .arg(keys.len())
            .args(keys)
            .args(args);
        self.frame_request(cmd).await
    }

    /// Run a script already loaded server-side by its SHA1 digest.
    /// Fails with a `NOSCRIPT` server error when the cache lost it.
    pub async fn evalsha<A: ToArg + Clone>(
        &mut self,
        sha: &str,
        keys: &[&str],
        args: &[A],
    ) -> Result<Frame> {
        let cmd = Command::new("EVALSHA")
            .arg(sha)
            .arg(keys.len())
            .args(keys)
            .args(args);
        self.frame_request(cmd).await
    }

    /// Load a script into the server's cache, returning its SHA1
    /// digest for [`evalsha`](Client::evalsha).
    pub async fn script_load(&mut self, script: &str) -> Result<String> {
        let sha = self
            .string_request(Command::new("SCRIPT").arg("LOAD").arg(script))
            .await?;
        Ok(sha.unwrap_or_default())
    }

    /// For each digest, whether the server's cache holds the script.
    pub async fn script_exists(&mut self, shas: &[&str]) -> Result<Vec<bool>> {
        let frames = self
            .array_request(Command::new("SCRIPT").arg("EXISTS").args(shas))
            .await?;
        let mut parser = super::ReplyParser::new(frames);
        let mut present = Vec::new();
        while !parser.is_empty() {
            present.push(parser.next_integer()? == 1);
        }
        Ok(present)
    }

    /// Drop every cached script.
    pub async fn script_flush(&mut self) -> Result<()> {
        self.ok_request(Command::new("SCRIPT").arg("FLUSH")).await
    }
}
