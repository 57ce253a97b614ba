mod support;

use bytes::Bytes;
use tokio_stream::StreamExt;

use retis::{Client, Command, Error};

use support::{scripted_server, step};

fn req(cmd: Command) -> Vec<u8> {
    cmd.encode().to_vec()
}

fn subscribe_ack(channel: &str, count: i64) -> Vec<u8> {
    format!(
        "*3\r\n$9\r\nsubscribe\r\n${}\r\n{}\r\n:{}\r\n",
        channel.len(),
        channel,
        count
    )
    .into_bytes()
}

fn unsubscribe_ack(channel: &str, count: i64) -> Vec<u8> {
    format!(
        "*3\r\n$11\r\nunsubscribe\r\n${}\r\n{}\r\n:{}\r\n",
        channel.len(),
        channel,
        count
    )
    .into_bytes()
}

fn message(channel: &str, payload: &str) -> Vec<u8> {
    format!(
        "*3\r\n$7\r\nmessage\r\n${}\r\n{}\r\n${}\r\n{}\r\n",
        channel.len(),
        channel,
        payload.len(),
        payload
    )
    .into_bytes()
}

#[tokio::test]
async fn subscribe_receives_published_messages() {
    support::init_tracing();

    // The ack and a pushed message arrive back to back.
    let mut reply = subscribe_ack("ch", 1);
    reply.extend_from_slice(&message("ch", "hi"));

    let (spec, server) =
        scripted_server(vec![step(req(Command::new("SUBSCRIBE").args(&["ch"])), reply)]).await;

    let client = Client::connect(&spec).await.unwrap();
    let mut subscriber = client.subscribe(&["ch"]).await.unwrap();
    assert_eq!(subscriber.subscription_count(), 1);

    let received = subscriber.next_message().await.unwrap().unwrap();
    assert_eq!(received.channel, "ch");
    assert_eq!(received.pattern, None);
    assert_eq!(received.payload, Bytes::from("hi"));

    server.await.unwrap();
}

#[tokio::test]
async fn publish_reports_receiver_count() {
    let (spec, server) = scripted_server(vec![step(
        req(Command::new("PUBLISH").arg("ch").arg("hi")),
        &b":1\r\n"[..],
    )])
    .await;

    let mut client = Client::connect(&spec).await.unwrap();

    assert_eq!(client.publish("ch", "hi").await.unwrap(), 1);

    server.await.unwrap();
}

#[tokio::test]
async fn pattern_subscription_decodes_pmessage() {
    let mut reply = b"*3\r\n$10\r\npsubscribe\r\n$6\r\nnews.*\r\n:1\r\n".to_vec();
    reply.extend_from_slice(
        b"*4\r\n$8\r\npmessage\r\n$6\r\nnews.*\r\n$9\r\nnews.tech\r\n$2\r\nhi\r\n",
    );

    let (spec, server) = scripted_server(vec![step(
        req(Command::new("PSUBSCRIBE").args(&["news.*"])),
        reply,
    )])
    .await;

    let client = Client::connect(&spec).await.unwrap();
    let mut subscriber = client.psubscribe(&["news.*"]).await.unwrap();

    let received = subscriber.next_message().await.unwrap().unwrap();
    assert_eq!(received.channel, "news.tech");
    assert_eq!(received.pattern.as_deref(), Some("news.*"));

    server.await.unwrap();
}

#[tokio::test]
async fn ping_queues_interleaved_messages() {
    let mut ping_reply = message("ch", "while-pinging");
    ping_reply.extend_from_slice(b"+PONG\r\n");

    let (spec, server) = scripted_server(vec![
        step(
            req(Command::new("SUBSCRIBE").args(&["ch"])),
            subscribe_ack("ch", 1),
        ),
        step(req(Command::new("PING")), ping_reply),
    ])
    .await;

    let client = Client::connect(&spec).await.unwrap();
    let mut subscriber = client.subscribe(&["ch"]).await.unwrap();

    subscriber.ping().await.unwrap();

    // The message that raced the PONG was kept, not dropped.
    let received = subscriber.next_message().await.unwrap().unwrap();
    assert_eq!(received.payload, Bytes::from("while-pinging"));

    server.await.unwrap();
}

#[tokio::test]
async fn unsubscribing_everything_restores_request_reply_mode() {
    let (spec, server) = scripted_server(vec![
        step(
            req(Command::new("SUBSCRIBE").args(&["ch"])),
            subscribe_ack("ch", 1),
        ),
        step(
            req(Command::new("UNSUBSCRIBE")),
            unsubscribe_ack("ch", 0),
        ),
        step(req(Command::new("PING")), &b"+PONG\r\n"[..]),
    ])
    .await;

    let client = Client::connect(&spec).await.unwrap();
    let mut subscriber = client.subscribe(&["ch"]).await.unwrap();

    subscriber.unsubscribe(&[]).await.unwrap();
    assert_eq!(subscriber.subscription_count(), 0);

    let mut client = subscriber.into_client().unwrap();
    assert_eq!(client.ping().await.unwrap(), "PONG");

    server.await.unwrap();
}

#[tokio::test]
async fn leaving_subscriber_mode_with_active_subscriptions_fails() {
    let (spec, server) = scripted_server(vec![step(
        req(Command::new("SUBSCRIBE").args(&["ch"])),
        subscribe_ack("ch", 1),
    )])
    .await;

    let client = Client::connect(&spec).await.unwrap();
    let subscriber = client.subscribe(&["ch"]).await.unwrap();

    let err = subscriber.into_client().unwrap_err();
    assert!(matches!(err, Error::Subscribe(_)));

    server.await.unwrap();
}

#[tokio::test]
async fn stream_yields_messages_until_the_server_closes() {
    let mut reply = subscribe_ack("ch", 1);
    reply.extend_from_slice(&message("ch", "one"));
    reply.extend_from_slice(&message("ch", "two"));

    let (spec, server) =
        scripted_server(vec![step(req(Command::new("SUBSCRIBE").args(&["ch"])), reply)]).await;

    let client = Client::connect(&spec).await.unwrap();
    let subscriber = client.subscribe(&["ch"]).await.unwrap();

    let stream = subscriber.into_stream();
    tokio::pin!(stream);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.payload, Bytes::from("one"));
    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(second.payload, Bytes::from("two"));

    // Script exhausted: the server closes and the stream ends.
    assert!(stream.next().await.is_none());

    server.await.unwrap();
}
