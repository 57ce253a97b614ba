//! Synchronous wrappers around the async client.
//!
//! The blocking realization shares the codec, connection and command
//! layer with the cooperative one: each call is run to completion on a
//! private current-thread runtime. The surface mirrors the async one
//! method for method, transactions, lock and cache included.

use bytes::Bytes;
use tokio::runtime::Runtime;

use crate::cache::{Cache, CacheParams};
use crate::client::Client;
use crate::commands::{BitOp, Position};
use crate::connection::ConnectionSpec;
use crate::frame::Frame;
use crate::lock::Lock;
use crate::subscriber::{Message, Subscriber};
use crate::tx::TxState;
use crate::{Error, Result, ToArg};

/// A blocking-socket view of [`Client`].
pub struct BlockingClient {
    inner: Client,
    rt: Runtime,
}

/// A blocking-socket view of [`Subscriber`].
pub struct BlockingSubscriber {
    inner: Subscriber,
    rt: Runtime,
}

fn runtime() -> Result<Runtime> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt)
}

impl BlockingClient {
    pub fn connect(spec: &ConnectionSpec) -> Result<BlockingClient> {
        let rt = runtime()?;
        let inner = rt.block_on(Client::connect(spec))?;
        Ok(BlockingClient { inner, rt })
    }

    pub fn disconnect(self) -> Result<()> {
        self.rt.block_on(self.inner.disconnect())
    }

    // Connection and server.

    pub fn auth(&mut self, password: &str) -> Result<()> {
        self.rt.block_on(self.inner.auth(password))
    }

    pub fn select(&mut self, db: u32) -> Result<()> {
        self.rt.block_on(self.inner.select(db))
    }

    pub fn ping(&mut self) -> Result<String> {
        self.rt.block_on(self.inner.ping())
    }

    pub fn echo(&mut self, message: impl ToArg) -> Result<Bytes> {
        self.rt.block_on(self.inner.echo(message))
    }

    pub fn quit(self) -> Result<()> {
        let BlockingClient { inner, rt } = self;
        rt.block_on(inner.quit())
    }

    pub fn dbsize(&mut self) -> Result<i64> {
        self.rt.block_on(self.inner.dbsize())
    }

    pub fn flushdb(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.flushdb())
    }

    pub fn flushall(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.flushall())
    }

    // Keys.

    pub fn del(&mut self, keys: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.del(keys))
    }

    pub fn exists(&mut self, key: &str) -> Result<bool> {
        self.rt.block_on(self.inner.exists(key))
    }

    pub fn expire(&mut self, key: &str, seconds: i64) -> Result<bool> {
        self.rt.block_on(self.inner.expire(key, seconds))
    }

    pub fn pexpire(&mut self, key: &str, milliseconds: i64) -> Result<bool> {
        self.rt.block_on(self.inner.pexpire(key, milliseconds))
    }

    pub fn expireat(&mut self, key: &str, timestamp: i64) -> Result<bool> {
        self.rt.block_on(self.inner.expireat(key, timestamp))
    }

    pub fn pexpireat(&mut self, key: &str, timestamp_ms: i64) -> Result<bool> {
        self.rt.block_on(self.inner.pexpireat(key, timestamp_ms))
    }

    pub fn ttl(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.ttl(key))
    }

    pub fn pttl(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.pttl(key))
    }

    pub fn persist(&mut self, key: &str) -> Result<bool> {
        self.rt.block_on(self.inner.persist(key))
    }

    pub fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        self.rt.block_on(self.inner.keys(pattern))
    }

    pub fn randomkey(&mut self) -> Result<Option<String>> {
        self.rt.block_on(self.inner.randomkey())
    }

    pub fn rename(&mut self, key: &str, newkey: &str) -> Result<()> {
        self.rt.block_on(self.inner.rename(key, newkey))
    }

    pub fn renamenx(&mut self, key: &str, newkey: &str) -> Result<bool> {
        self.rt.block_on(self.inner.renamenx(key, newkey))
    }

    pub fn type_(&mut self, key: &str) -> Result<String> {
        self.rt.block_on(self.inner.type_(key))
    }

    // Strings.

    pub fn set(&mut self, key: &str, value: impl ToArg) -> Result<()> {
        self.rt.block_on(self.inner.set(key, value))
    }

    pub fn setnx(&mut self, key: &str, value: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.setnx(key, value))
    }

    pub fn setex(&mut self, key: &str, seconds: i64, value: impl ToArg) -> Result<()> {
        self.rt.block_on(self.inner.setex(key, seconds, value))
    }

    pub fn psetex(&mut self, key: &str, milliseconds: i64, value: impl ToArg) -> Result<()> {
        self.rt.block_on(self.inner.psetex(key, milliseconds, value))
    }

    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.rt.block_on(self.inner.get(key))
    }

    pub fn get_bytes(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.get_bytes(key))
    }

    pub fn getset(&mut self, key: &str, value: impl ToArg) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.getset(key, value))
    }

    pub fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<Bytes>>> {
        self.rt.block_on(self.inner.mget(keys))
    }

    pub fn mset<V: ToArg + Clone>(&mut self, pairs: &[(&str, V)]) -> Result<()> {
        self.rt.block_on(self.inner.mset(pairs))
    }

    pub fn msetnx<V: ToArg + Clone>(&mut self, pairs: &[(&str, V)]) -> Result<bool> {
        self.rt.block_on(self.inner.msetnx(pairs))
    }

    pub fn append(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.append(key, value))
    }

    pub fn strlen(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.strlen(key))
    }

    pub fn getrange(&mut self, key: &str, start: i64, end: i64) -> Result<Bytes> {
        self.rt.block_on(self.inner.getrange(key, start, end))
    }

    pub fn setrange(&mut self, key: &str, offset: i64, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.setrange(key, offset, value))
    }

    pub fn incr(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.incr(key))
    }

    pub fn incrby(&mut self, key: &str, increment: i64) -> Result<i64> {
        self.rt.block_on(self.inner.incrby(key, increment))
    }

    pub fn incrbyfloat(&mut self, key: &str, increment: f64) -> Result<f64> {
        self.rt.block_on(self.inner.incrbyfloat(key, increment))
    }

    pub fn decr(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.decr(key))
    }

    pub fn decrby(&mut self, key: &str, decrement: i64) -> Result<i64> {
        self.rt.block_on(self.inner.decrby(key, decrement))
    }

    pub fn getbit(&mut self, key: &str, offset: i64) -> Result<bool> {
        self.rt.block_on(self.inner.getbit(key, offset))
    }

    pub fn setbit(&mut self, key: &str, offset: i64, value: bool) -> Result<bool> {
        self.rt.block_on(self.inner.setbit(key, offset, value))
    }

    pub fn bitcount(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.bitcount(key))
    }

    pub fn bitop(&mut self, op: BitOp, destkey: &str, keys: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.bitop(op, destkey, keys))
    }

    // Hashes.

    pub fn hset(&mut self, key: &str, field: &str, value: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.hset(key, field, value))
    }

    pub fn hsetnx(&mut self, key: &str, field: &str, value: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.hsetnx(key, field, value))
    }

    pub fn hget(&mut self, key: &str, field: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.hget(key, field))
    }

    pub fn hmget(&mut self, key: &str, fields: &[&str]) -> Result<Vec<Option<Bytes>>> {
        self.rt.block_on(self.inner.hmget(key, fields))
    }

    pub fn hmset<V: ToArg + Clone>(&mut self, key: &str, pairs: &[(&str, V)]) -> Result<()> {
        self.rt.block_on(self.inner.hmset(key, pairs))
    }

    pub fn hdel(&mut self, key: &str, fields: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.hdel(key, fields))
    }

    pub fn hexists(&mut self, key: &str, field: &str) -> Result<bool> {
        self.rt.block_on(self.inner.hexists(key, field))
    }

    pub fn hincrby(&mut self, key: &str, field: &str, increment: i64) -> Result<i64> {
        self.rt.block_on(self.inner.hincrby(key, field, increment))
    }

    pub fn hincrbyfloat(&mut self, key: &str, field: &str, increment: f64) -> Result<f64> {
        self.rt.block_on(self.inner.hincrbyfloat(key, field, increment))
    }

    pub fn hlen(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.hlen(key))
    }

    pub fn hkeys(&mut self, key: &str) -> Result<Vec<String>> {
        self.rt.block_on(self.inner.hkeys(key))
    }

    pub fn hvals(&mut self, key: &str) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.hvals(key))
    }

    pub fn hgetall(&mut self, key: &str) -> Result<Vec<(String, Bytes)>> {
        self.rt.block_on(self.inner.hgetall(key))
    }

    // Lists.

    pub fn lpush(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.lpush(key, value))
    }

    pub fn rpush(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.rpush(key, value))
    }

    pub fn lpushx(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.lpushx(key, value))
    }

    pub fn rpushx(&mut self, key: &str, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.rpushx(key, value))
    }

    pub fn lpop(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.lpop(key))
    }

    pub fn rpop(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.rpop(key))
    }

    pub fn llen(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.llen(key))
    }

    pub fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.lrange(key, start, stop))
    }

    pub fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.lindex(key, index))
    }

    pub fn linsert(
        &mut self,
        key: &str,
        position: Position,
        pivot: impl ToArg,
        value: impl ToArg,
    ) -> Result<i64> {
        self.rt
            .block_on(self.inner.linsert(key, position, pivot, value))
    }

    pub fn lrem(&mut self, key: &str, count: i64, value: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.lrem(key, count, value))
    }

    pub fn lset(&mut self, key: &str, index: i64, value: impl ToArg) -> Result<()> {
        self.rt.block_on(self.inner.lset(key, index, value))
    }

    pub fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<()> {
        self.rt.block_on(self.inner.ltrim(key, start, stop))
    }

    pub fn rpoplpush(&mut self, source: &str, destination: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.rpoplpush(source, destination))
    }

    pub fn blpop(&mut self, keys: &[&str], timeout: u64) -> Result<Option<(String, Bytes)>> {
        self.rt.block_on(self.inner.blpop(keys, timeout))
    }

    pub fn brpop(&mut self, keys: &[&str], timeout: u64) -> Result<Option<(String, Bytes)>> {
        self.rt.block_on(self.inner.brpop(keys, timeout))
    }

    pub fn brpoplpush(
        &mut self,
        source: &str,
        destination: &str,
        timeout: u64,
    ) -> Result<Option<Bytes>> {
        self.rt
            .block_on(self.inner.brpoplpush(source, destination, timeout))
    }

    // Sets.

    pub fn sadd(&mut self, key: &str, member: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.sadd(key, member))
    }

    pub fn srem(&mut self, key: &str, member: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.srem(key, member))
    }

    pub fn spop(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.spop(key))
    }

    pub fn srandmember(&mut self, key: &str) -> Result<Option<Bytes>> {
        self.rt.block_on(self.inner.srandmember(key))
    }

    pub fn scard(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.scard(key))
    }

    pub fn sismember(&mut self, key: &str, member: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.sismember(key, member))
    }

    pub fn smembers(&mut self, key: &str) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.smembers(key))
    }

    pub fn smove(&mut self, source: &str, destination: &str, member: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.smove(source, destination, member))
    }

    pub fn sdiff(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.sdiff(keys))
    }

    pub fn sdiffstore(&mut self, destination: &str, keys: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.sdiffstore(destination, keys))
    }

    pub fn sinter(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.sinter(keys))
    }

    pub fn sinterstore(&mut self, destination: &str, keys: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.sinterstore(destination, keys))
    }

    pub fn sunion(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.sunion(keys))
    }

    pub fn sunionstore(&mut self, destination: &str, keys: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.sunionstore(destination, keys))
    }

    // Sorted sets.

    pub fn zadd(&mut self, key: &str, score: f64, member: impl ToArg) -> Result<bool> {
        self.rt.block_on(self.inner.zadd(key, score, member))
    }

    pub fn zrem(&mut self, key: &str, members: &[&str]) -> Result<i64> {
        self.rt.block_on(self.inner.zrem(key, members))
    }

    pub fn zscore(&mut self, key: &str, member: impl ToArg) -> Result<Option<f64>> {
        self.rt.block_on(self.inner.zscore(key, member))
    }

    pub fn zincrby(&mut self, key: &str, increment: f64, member: impl ToArg) -> Result<f64> {
        self.rt.block_on(self.inner.zincrby(key, increment, member))
    }

    pub fn zcard(&mut self, key: &str) -> Result<i64> {
        self.rt.block_on(self.inner.zcard(key))
    }

    pub fn zcount(&mut self, key: &str, min: f64, max: f64) -> Result<i64> {
        self.rt.block_on(self.inner.zcount(key, min, max))
    }

    pub fn zrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.zrange(key, start, stop))
    }

    pub fn zrange_withscores(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>> {
        self.rt.block_on(self.inner.zrange_withscores(key, start, stop))
    }

    pub fn zrevrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.zrevrange(key, start, stop))
    }

    pub fn zrevrange_withscores(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>> {
        self.rt
            .block_on(self.inner.zrevrange_withscores(key, start, stop))
    }

    pub fn zrangebyscore(&mut self, key: &str, min: f64, max: f64) -> Result<Vec<Bytes>> {
        self.rt.block_on(self.inner.zrangebyscore(key, min, max))
    }

    pub fn zrank(&mut self, key: &str, member: impl ToArg) -> Result<Option<i64>> {
        self.rt.block_on(self.inner.zrank(key, member))
    }

    pub fn zrevrank(&mut self, key: &str, member: impl ToArg) -> Result<Option<i64>> {
        self.rt.block_on(self.inner.zrevrank(key, member))
    }

    pub fn zremrangebyrank(&mut self, key: &str, start: i64, stop: i64) -> Result<i64> {
        self.rt.block_on(self.inner.zremrangebyrank(key, start, stop))
    }

    pub fn zremrangebyscore(&mut self, key: &str, min: f64, max: f64) -> Result<i64> {
        self.rt.block_on(self.inner.zremrangebyscore(key, min, max))
    }

    // Scripting.

    pub fn eval<A: ToArg + Clone>(
        &mut self,
        script: &str,
        keys: &[&str],
        args: &[A],
    ) -> Result<Frame> {
        self.rt.block_on(self.inner.eval(script, keys, args))
    }

    pub fn evalsha<A: ToArg + Clone>(
        &mut self,
        sha: &str,
        keys: &[&str],
        args: &[A],
    ) -> Result<Frame> {
        self.rt.block_on(self.inner.evalsha(sha, keys, args))
    }

    pub fn script_load(&mut self, script: &str) -> Result<String> {
        self.rt.block_on(self.inner.script_load(script))
    }

    pub fn script_exists(&mut self, shas: &[&str]) -> Result<Vec<bool>> {
        self.rt.block_on(self.inner.script_exists(shas))
    }

    pub fn script_flush(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.script_flush())
    }

    // Transactions.

    pub fn multi(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.multi())
    }

    pub fn exec(&mut self) -> Result<Vec<Frame>> {
        self.rt.block_on(self.inner.exec())
    }

    pub fn discard(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.discard())
    }

    pub fn watch(&mut self, keys: &[&str]) -> Result<()> {
        self.rt.block_on(self.inner.watch(keys))
    }

    pub fn unwatch(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.unwatch())
    }

    /// Queue one command inside a MULTI block; mirrors
    /// [`Client::queue`]. The closure must not be wrapped in another
    /// `block_on`: each command it issues drives the runtime itself.
    pub fn queue<T, F>(&mut self, thunk: F) -> Result<()>
    where
        F: FnOnce(&mut BlockingClient) -> Result<T>,
    {
        if self.inner.connection.tx_state() != TxState::Queueing {
            return Err(Error::Transaction("queue is only legal inside MULTI"));
        }

        match thunk(self) {
            Ok(_) => Ok(()),
            Err(err) => {
                self.inner.connection.set_tx_state(TxState::Aborted);
                Err(err)
            }
        }
    }

    // Pub/sub.

    pub fn publish(&mut self, channel: &str, message: impl ToArg) -> Result<i64> {
        self.rt.block_on(self.inner.publish(channel, message))
    }

    /// Enter subscriber mode, consuming this client.
    pub fn subscribe(self, channels: &[&str]) -> Result<BlockingSubscriber> {
        let BlockingClient { inner, rt } = self;
        let subscriber = rt.block_on(inner.subscribe(channels))?;
        Ok(BlockingSubscriber {
            inner: subscriber,
            rt,
        })
    }

    /// Enter subscriber mode on glob patterns, consuming this client.
    pub fn psubscribe(self, patterns: &[&str]) -> Result<BlockingSubscriber> {
        let BlockingClient { inner, rt } = self;
        let subscriber = rt.block_on(inner.psubscribe(patterns))?;
        Ok(BlockingSubscriber {
            inner: subscriber,
            rt,
        })
    }
}

impl BlockingSubscriber {
    pub fn subscribe(&mut self, channels: &[&str]) -> Result<()> {
        self.rt.block_on(self.inner.subscribe(channels))
    }

    pub fn unsubscribe(&mut self, channels: &[&str]) -> Result<()> {
        self.rt.block_on(self.inner.unsubscribe(channels))
    }

    pub fn psubscribe(&mut self, patterns: &[&str]) -> Result<()> {
        self.rt.block_on(self.inner.psubscribe(patterns))
    }

    pub fn punsubscribe(&mut self, patterns: &[&str]) -> Result<()> {
        self.rt.block_on(self.inner.punsubscribe(patterns))
    }

    pub fn ping(&mut self) -> Result<()> {
        self.rt.block_on(self.inner.ping())
    }

    pub fn next_message(&mut self) -> Result<Option<Message>> {
        self.rt.block_on(self.inner.next_message())
    }

    /// The messages as an iterator, ending when the server closes the
    /// connection. The blocking counterpart of
    /// [`Subscriber::into_stream`].
    pub fn into_iter(mut self) -> impl Iterator<Item = Result<Message>> {
        std::iter::from_fn(move || self.next_message().transpose())
    }

    pub fn subscription_count(&self) -> usize {
        self.inner.subscription_count()
    }

    /// Back to request/reply mode once every subscription is dropped.
    pub fn into_client(self) -> Result<BlockingClient> {
        let BlockingSubscriber { inner, rt } = self;
        let client = inner.into_client()?;
        Ok(BlockingClient { inner: client, rt })
    }

    pub fn quit(self) -> Result<()> {
        let BlockingSubscriber { inner, rt } = self;
        rt.block_on(inner.quit())
    }
}

// The lock and cache run against either realization; these are their
// blocking entry points.

impl Lock {
    /// Blocking [`Lock::acquire`].
    pub fn acquire_blocking(&mut self, client: &mut BlockingClient) -> Result<()> {
        let BlockingClient { inner, rt } = client;
        rt.block_on(self.acquire(inner))
    }

    /// Blocking [`Lock::acquire_with`].
    pub fn acquire_with_blocking(
        &mut self,
        client: &mut BlockingClient,
        atime: f64,
        ltime: u64,
    ) -> Result<()> {
        let BlockingClient { inner, rt } = client;
        rt.block_on(self.acquire_with(inner, atime, ltime))
    }

    /// Blocking [`Lock::release`].
    pub fn release_blocking(&mut self, client: &mut BlockingClient) -> Result<()> {
        let BlockingClient { inner, rt } = client;
        rt.block_on(self.release(inner))
    }

    /// Blocking [`Lock::with_lock`]: acquire, run `body`, release on
    /// every exit path including the body failing. The body issues
    /// commands through the client it is handed; it must not be
    /// wrapped in another `block_on`.
    pub fn with_lock_blocking<T, F>(&mut self, client: &mut BlockingClient, body: F) -> Result<T>
    where
        F: FnOnce(&mut BlockingClient) -> Result<T>,
    {
        self.acquire_blocking(client)?;
        let result = body(client);
        let released = self.release_blocking(client);

        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), _) => Err(err),
        }
    }
}

impl<P: CacheParams> Cache<P> {
    /// Blocking [`Cache::set`].
    pub fn set_blocking(
        &self,
        client: &mut BlockingClient,
        key: &P::Key,
        value: &P::Value,
    ) -> Result<()> {
        let BlockingClient { inner, rt } = client;
        rt.block_on(self.set(inner, key, value))
    }

    /// Blocking [`Cache::get`].
    pub fn get_blocking(&self, client: &mut BlockingClient, key: &P::Key) -> Result<Option<P::Value>> {
        let BlockingClient { inner, rt } = client;
        rt.block_on(self.get(inner, key))
    }

    /// Blocking [`Cache::delete`].
    pub fn delete_blocking(&self, client: &mut BlockingClient, key: &P::Key) -> Result<()> {
        let BlockingClient { inner, rt } = client;
        rt.block_on(self.delete(inner, key))
    }
}
