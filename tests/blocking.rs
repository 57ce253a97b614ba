mod support;

use std::time::Duration;

use bytes::Bytes;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use retis::blocking::BlockingClient;
use retis::frame::Frame;
use retis::lock::RELEASE_SCRIPT;
use retis::{Cache, CacheParams, Command, ConnectionSpec, Error, Lock};

use support::{scripted_server, step, Step};

fn req(cmd: Command) -> Vec<u8> {
    cmd.encode().to_vec()
}

/// The scripted mock runs on its own multi-thread runtime so it keeps
/// serving while the blocking client occupies the test thread.
fn scripted(steps: Vec<Step>) -> (Runtime, ConnectionSpec, JoinHandle<()>) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let (spec, server) = rt.block_on(scripted_server(steps));
    (rt, spec, server)
}

fn finish(rt: Runtime, server: JoinHandle<()>) {
    rt.block_on(server).unwrap();
}

#[test]
fn set_then_get() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("SET").arg("key1").arg("hello")), &b"+OK\r\n"[..]),
        step(req(Command::new("GET").arg("key1")), &b"$5\r\nhello\r\n"[..]),
        step(req(Command::new("GET").arg("missing")), &b"$-1\r\n"[..]),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    client.set("key1", "hello").unwrap();
    assert_eq!(client.get("key1").unwrap(), Some("hello".to_string()));
    assert_eq!(client.get("missing").unwrap(), None);

    client.disconnect().unwrap();

    finish(rt, server);
}

#[test]
fn key_commands() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("EXISTS").arg("k")), &b":1\r\n"[..]),
        step(req(Command::new("EXPIRE").arg("k").arg(60_i64)), &b":1\r\n"[..]),
        step(req(Command::new("DEL").args(&["k"])), &b":1\r\n"[..]),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    assert!(client.exists("k").unwrap());
    assert!(client.expire("k", 60).unwrap());
    assert_eq!(client.del(&["k"]).unwrap(), 1);

    finish(rt, server);
}

#[test]
fn hash_commands() {
    let (rt, spec, server) = scripted(vec![
        step(
            req(Command::new("HSET").arg("h").arg("f1").arg("v1")),
            &b":1\r\n"[..],
        ),
        step(
            req(Command::new("HGETALL").arg("h")),
            &b"*2\r\n$2\r\nf1\r\n$2\r\nv1\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    assert!(client.hset("h", "f1", "v1").unwrap());
    assert_eq!(
        client.hgetall("h").unwrap(),
        vec![("f1".to_string(), Bytes::from("v1"))]
    );

    finish(rt, server);
}

#[test]
fn list_commands() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("LPUSH").arg("l").arg("a")), &b":1\r\n"[..]),
        step(
            req(Command::new("LRANGE").arg("l").arg(0).arg(-1)),
            &b"*1\r\n$1\r\na\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    assert_eq!(client.lpush("l", "a").unwrap(), 1);
    assert_eq!(client.lrange("l", 0, -1).unwrap(), vec![Bytes::from("a")]);

    finish(rt, server);
}

#[test]
fn set_commands() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("SADD").arg("s").arg("m")), &b":1\r\n"[..]),
        step(
            req(Command::new("SMEMBERS").arg("s")),
            &b"*1\r\n$1\r\nm\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    assert!(client.sadd("s", "m").unwrap());
    assert_eq!(client.smembers("s").unwrap(), vec![Bytes::from("m")]);

    finish(rt, server);
}

#[test]
fn sorted_set_commands() {
    let (rt, spec, server) = scripted(vec![
        step(
            req(Command::new("ZADD").arg("z").arg(1.5).arg("m")),
            &b":1\r\n"[..],
        ),
        step(
            req(Command::new("ZSCORE").arg("z").arg("m")),
            &b"$3\r\n1.5\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    assert!(client.zadd("z", 1.5, "m").unwrap());
    assert_eq!(client.zscore("z", "m").unwrap(), Some(1.5));

    finish(rt, server);
}

#[test]
fn server_commands() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("SELECT").arg(1_u32)), &b"+OK\r\n"[..]),
        step(req(Command::new("PING")), &b"+PONG\r\n"[..]),
        step(req(Command::new("DBSIZE")), &b":3\r\n"[..]),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    client.select(1).unwrap();
    assert_eq!(client.ping().unwrap(), "PONG");
    assert_eq!(client.dbsize().unwrap(), 3);

    finish(rt, server);
}

#[test]
fn eval_passes_the_reply_through() {
    let (rt, spec, server) = scripted(vec![step(
        req(Command::new("EVAL")
            .arg("return 1")
            .arg(0_usize)),
        &b":1\r\n"[..],
    )]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    let reply = client.eval::<&str>("return 1", &[], &[]).unwrap();
    assert_eq!(reply, Frame::Integer(1));

    finish(rt, server);
}

#[test]
fn transaction_queues_and_execs() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("MULTI")), &b"+OK\r\n"[..]),
        step(req(Command::new("INCR").arg("c")), &b"+QUEUED\r\n"[..]),
        step(req(Command::new("INCR").arg("c")), &b"+QUEUED\r\n"[..]),
        step(req(Command::new("EXEC")), &b"*2\r\n:1\r\n:2\r\n"[..]),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    client.multi().unwrap();
    client.queue(|c| c.incr("c")).unwrap();
    client.queue(|c| c.incr("c")).unwrap();

    let replies = client.exec().unwrap();
    assert_eq!(replies, vec![Frame::Integer(1), Frame::Integer(2)]);

    finish(rt, server);
}

#[test]
fn transaction_discard_drops_the_queue() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("WATCH").args(&["a"])), &b"+OK\r\n"[..]),
        step(req(Command::new("MULTI")), &b"+OK\r\n"[..]),
        step(
            req(Command::new("SET").arg("a").arg("1")),
            &b"+QUEUED\r\n"[..],
        ),
        step(req(Command::new("DISCARD")), &b"+OK\r\n"[..]),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    client.watch(&["a"]).unwrap();
    client.multi().unwrap();
    client.queue(|c| c.set("a", "1")).unwrap();
    client.discard().unwrap();

    finish(rt, server);
}

#[test]
fn lock_acquire_and_release() {
    let sha = "fak3sha0000000000000000000000000000000000";
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("SETNX").arg("L").arg("T1")), &b":1\r\n"[..]),
        step(
            req(Command::new("EXPIRE").arg("L").arg(10_i64)),
            &b":1\r\n"[..],
        ),
        step(
            req(Command::new("SCRIPT").arg("LOAD").arg(RELEASE_SCRIPT)),
            format!("${}\r\n{}\r\n", sha.len(), sha).into_bytes(),
        ),
        step(
            req(Command::new("EVALSHA")
                .arg(sha)
                .arg(1_usize)
                .arg("L")
                .arg("T1")),
            &b":1\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();
    let mut lock = Lock::new("L", "T1");

    lock.acquire_blocking(&mut client).unwrap();
    lock.release_blocking(&mut client).unwrap();

    finish(rt, server);
}

#[test]
fn with_lock_runs_the_body_between_acquire_and_release() {
    let sha = "fak3sha0000000000000000000000000000000000";
    let (rt, spec, server) = scripted(vec![
        step(
            req(Command::new("SETNX").arg("jobs").arg("w1")),
            &b":1\r\n"[..],
        ),
        step(
            req(Command::new("EXPIRE").arg("jobs").arg(10_i64)),
            &b":1\r\n"[..],
        ),
        step(req(Command::new("INCR").arg("done")), &b":5\r\n"[..]),
        step(
            req(Command::new("SCRIPT").arg("LOAD").arg(RELEASE_SCRIPT)),
            format!("${}\r\n{}\r\n", sha.len(), sha).into_bytes(),
        ),
        step(
            req(Command::new("EVALSHA")
                .arg(sha)
                .arg(1_usize)
                .arg("jobs")
                .arg("w1")),
            &b":1\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();
    let mut lock = Lock::new("jobs", "w1");

    let value = lock
        .with_lock_blocking(&mut client, |c| c.incr("done"))
        .unwrap();
    assert_eq!(value, 5);

    finish(rt, server);
}

#[test]
fn lock_times_out_while_held_elsewhere() {
    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("SETNX").arg("L").arg("T2")), &b":0\r\n"[..]),
        step(req(Command::new("SETNX").arg("L").arg("T2")), &b":0\r\n"[..]),
        step(req(Command::new("SETNX").arg("L").arg("T2")), &b":0\r\n"[..]),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();
    let mut lock = Lock::new("L", "T2");

    let err = lock
        .acquire_with_blocking(&mut client, 0.2, 10)
        .unwrap_err();
    assert!(matches!(err, Error::LockTimeout(ref name) if name == "L"));

    finish(rt, server);
}

struct Sessions;

impl CacheParams for Sessions {
    type Key = u64;
    type Value = String;

    fn cache_key(key: &u64) -> String {
        format!("session:{}", key)
    }

    fn encode(value: &String) -> Bytes {
        Bytes::copy_from_slice(value.as_bytes())
    }

    fn decode(data: Bytes) -> retis::Result<String> {
        retis::cache::decode_utf8(data)
    }
}

#[test]
fn cache_round_trip() {
    let (rt, spec, server) = scripted(vec![
        step(
            req(Command::new("PSETEX")
                .arg("session:42")
                .arg(300_000_i64)
                .arg("alice")),
            &b"+OK\r\n"[..],
        ),
        step(
            req(Command::new("GET").arg("session:42")),
            &b"$5\r\nalice\r\n"[..],
        ),
        step(
            req(Command::new("DEL").args(&["session:42"])),
            &b":1\r\n"[..],
        ),
    ]);

    let mut client = BlockingClient::connect(&spec).unwrap();
    let sessions = Cache::<Sessions>::new(Some(Duration::from_secs(300)));

    sessions
        .set_blocking(&mut client, &42, &"alice".to_string())
        .unwrap();
    assert_eq!(
        sessions.get_blocking(&mut client, &42).unwrap(),
        Some("alice".to_string())
    );
    sessions.delete_blocking(&mut client, &42).unwrap();

    finish(rt, server);
}

#[test]
fn subscriber_enter_and_exit() {
    let mut subscribe_reply = b"*3\r\n$9\r\nsubscribe\r\n$2\r\nch\r\n:1\r\n".to_vec();
    subscribe_reply
        .extend_from_slice(b"*3\r\n$7\r\nmessage\r\n$2\r\nch\r\n$2\r\nhi\r\n");

    let (rt, spec, server) = scripted(vec![
        step(req(Command::new("SUBSCRIBE").args(&["ch"])), subscribe_reply),
        step(
            req(Command::new("UNSUBSCRIBE")),
            &b"*3\r\n$11\r\nunsubscribe\r\n$2\r\nch\r\n:0\r\n"[..],
        ),
        step(req(Command::new("PING")), &b"+PONG\r\n"[..]),
    ]);

    let client = BlockingClient::connect(&spec).unwrap();
    let mut subscriber = client.subscribe(&["ch"]).unwrap();
    assert_eq!(subscriber.subscription_count(), 1);

    let received = subscriber.next_message().unwrap().unwrap();
    assert_eq!(received.channel, "ch");
    assert_eq!(received.payload, Bytes::from("hi"));

    subscriber.unsubscribe(&[]).unwrap();
    assert_eq!(subscriber.subscription_count(), 0);

    let mut client = subscriber.into_client().unwrap();
    assert_eq!(client.ping().unwrap(), "PONG");

    finish(rt, server);
}

#[test]
fn publish_reports_receiver_count() {
    let (rt, spec, server) = scripted(vec![step(
        req(Command::new("PUBLISH").arg("ch").arg("hi")),
        &b":1\r\n"[..],
    )]);

    let mut client = BlockingClient::connect(&spec).unwrap();

    assert_eq!(client.publish("ch", "hi").unwrap(), 1);

    finish(rt, server);
}
