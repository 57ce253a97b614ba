//! A typed key/value shim over the string commands.

use std::marker::PhantomData;
use std::time::Duration;

use bytes::Bytes;

use crate::client::Client;
use crate::Result;

/// How a cache maps its keys and values onto Redis strings.
pub trait CacheParams {
    type Key;
    type Value;

    /// Encode a key into the keyspace this cache owns (typically with
    /// a namespace prefix).
    fn cache_key(key: &Self::Key) -> String;

    fn encode(value: &Self::Value) -> Bytes;

    fn decode(data: Bytes) -> Result<Self::Value>;
}

/// A cache over a parameter set, with optional expiration.
///
/// ```no_run
/// use bytes::Bytes;
/// use retis::{Cache, CacheParams};
///
/// struct Sessions;
///
/// impl CacheParams for Sessions {
///     type Key = u64;
///     type Value = String;
///
///     fn cache_key(key: &u64) -> String {
///         format!("session:{}", key)
///     }
///
///     fn encode(value: &String) -> Bytes {
///         Bytes::copy_from_slice(value.as_bytes())
///     }
///
///     fn decode(data: Bytes) -> retis::Result<String> {
///         retis::cache::decode_utf8(data)
///     }
/// }
///
/// # async fn example(client: &mut retis::Client) -> retis::Result<()> {
/// let sessions = Cache::<Sessions>::new(Some(std::time::Duration::from_secs(300)));
/// sessions.set(client, &42, &"alice".to_string()).await?;
/// let user = sessions.get(client, &42).await?;
/// # Ok(())
/// # }
/// ```
pub struct Cache<P> {
    expiration: Option<Duration>,
    _params: PhantomData<P>,
}

impl<P: CacheParams> Cache<P> {
    pub fn new(expiration: Option<Duration>) -> Cache<P> {
        Cache {
            expiration,
            _params: PhantomData,
        }
    }

    /// Store a value. With an expiration configured, the write and the
    /// time-to-live land in a single round trip (PSETEX).
    pub async fn set(&self, client: &mut Client, key: &P::Key, value: &P::Value) -> Result<()> {
        let cache_key = P::cache_key(key);
        let data = P::encode(value);
        match self.expiration {
            Some(ttl) => {
                client
                    .psetex(&cache_key, ttl.as_millis() as i64, data)
                    .await
            }
            None => client.set(&cache_key, data).await,
        }
    }

    /// Look up a value; a missing (or expired) key is `None`.
    pub async fn get(&self, client: &mut Client, key: &P::Key) -> Result<Option<P::Value>> {
        let cache_key = P::cache_key(key);
        match client.get_bytes(&cache_key).await? {
            Some(data) => P::decode(data).map(Some),
            None => Ok(None),
        }
    }

    /// Evict a key. Whether it existed is deliberately not reported.
    pub async fn delete(&self, client: &mut Client, key: &P::Key) -> Result<()> {
        let cache_key = P::cache_key(key);
        client.del(&[cache_key.as_str()]).await?;
        Ok(())
    }
}

/// Decode helper for caches whose values are UTF-8 text.
pub fn decode_utf8(data: Bytes) -> Result<String> {
    crate::client::text(data)
}
