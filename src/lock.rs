//! A distributed lock over SETNX/EXPIRE.
//!
//! Acquisition is a bounded SETNX retry loop; the EXPIRE after a
//! successful SETNX makes the lock self-expire if its holder crashes.
//! A crash between the two leaves the key permanent until an operator
//! intervenes; this window is accepted. Release is a compare-and-delete
//! Lua script so only the holder's token can delete the key.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::client::Client;
use crate::frame::Frame;
use crate::{BoxFuture, Error, Result};

/// Pause between SETNX attempts while the lock is held elsewhere.
const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Default budget for waiting on a held lock, in seconds.
pub const DEFAULT_ACQUIRE_TIMEOUT: f64 = 10.0;

/// Default lock time-to-live, in seconds.
pub const DEFAULT_LOCK_TTL: u64 = 10;

/// Compare-and-delete: the key is deleted only while it still holds
/// the caller's token.
pub const RELEASE_SCRIPT: &str = r#"if redis.call("get", KEYS[1]) == ARGV[1] then
    return redis.call("del", KEYS[1])
else
    return 0
end"#;

/// A named lock held under a caller-chosen token.
///
/// The token identifies this holder; pick a fresh unique value per
/// acquisition so a release can never delete a lock some other holder
/// re-acquired in the meantime.
pub struct Lock {
    name: String,
    token: String,
    /// SHA1 of the release script, filled on first release.
    release_sha: Option<String>,
}

impl Lock {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Lock {
        Lock {
            name: name.into(),
            token: token.into(),
            release_sha: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquire with the default waiting budget and time-to-live.
    pub async fn acquire(&mut self, client: &mut Client) -> Result<()> {
        self.acquire_with(client, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_LOCK_TTL)
            .await
    }

    /// Acquire, waiting up to `atime` seconds for the current holder,
    /// and holding for at most `ltime` seconds (must be at least 1).
    pub async fn acquire_with(
        &mut self,
        client: &mut Client,
        atime: f64,
        ltime: u64,
    ) -> Result<()> {
        if ltime < 1 {
            return Err(Error::Lock(
                "lock time-to-live must be at least one second".to_string(),
            ));
        }

        let mut waited = Duration::ZERO;
        loop {
            if client.setnx(&self.name, &self.token).await? {
                client.expire(&self.name, ltime as i64).await?;
                debug!(lock = %self.name, "acquired");
                return Ok(());
            }

            if waited.as_secs_f64() >= atime {
                return Err(Error::LockTimeout(self.name.clone()));
            }

            debug!(lock = %self.name, ?waited, "held elsewhere, retrying");
            sleep(RETRY_INTERVAL).await;
            waited += RETRY_INTERVAL;
        }
    }

    /// Release if still held under this token. Releasing a lock owned
    /// by someone else (or already expired) is a silent no-op.
    pub async fn release(&mut self, client: &mut Client) -> Result<()> {
        let sha = match &self.release_sha {
            Some(sha) => sha.clone(),
            None => {
                let sha = client.script_load(RELEASE_SCRIPT).await?;
                self.release_sha = Some(sha.clone());
                sha
            }
        };

        let keys = [self.name.as_str()];
        let args = [self.token.as_str()];

        let reply = match client.evalsha(&sha, &keys, &args).await {
            Ok(reply) => reply,
            // The server's script cache can be flushed independently.
            Err(Error::Server(ref message)) if message.starts_with("NOSCRIPT") => {
                client.eval(RELEASE_SCRIPT, &keys, &args).await?
            }
            Err(err) => return Err(err),
        };

        match reply {
            Frame::Integer(1) => debug!(lock = %self.name, "released"),
            Frame::Integer(0) => debug!(lock = %self.name, "not held by this token"),
            other => return Err(Error::unexpected("0/1 integer", other)),
        }
        Ok(())
    }

    /// Scoped acquisition: acquire, run `body`, release on every exit
    /// path including the body failing. If the surrounding task is
    /// cancelled mid-body the release cannot run; the lock then lives
    /// until its time-to-live expires.
    ///
    /// ```no_run
    /// use retis::Lock;
    ///
    /// # async fn example(client: &mut retis::Client) -> retis::Result<()> {
    /// let mut lock = Lock::new("jobs:refresh", "worker-7:81aa");
    /// let value = lock
    ///     .with_lock(client, |c| Box::pin(async move { c.incr("jobs:refreshed").await }))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_lock<T, F>(&mut self, client: &mut Client, body: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a mut Client) -> BoxFuture<'a, Result<T>>,
    {
        self.acquire(client).await?;
        let result = body(client).await;
        let released = self.release(client).await;

        // The body's outcome wins; a release failure only surfaces when
        // the body itself succeeded.
        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), _) => Err(err),
        }
    }
}
