//! In-process mock servers speaking canned RESP over real sockets.
#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use retis::ConnectionSpec;

/// Route the library's debug traces into the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A server that pushes whatever bytes are sent down the channel,
/// ignoring its inbound side. Closing the channel closes the socket.
pub async fn canned_server() -> (UnboundedSender<Vec<u8>>, ConnectionSpec) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            while let Some(data) = rx.recv().await {
                if socket.write_all(&data).await.is_err() {
                    break;
                }
            }
        }
    });

    (tx, ConnectionSpec::new("127.0.0.1", port))
}

/// One request/reply exchange as the mock server sees it.
pub struct Step {
    pub expect: Vec<u8>,
    pub reply: Vec<u8>,
}

pub fn step(expect: impl Into<Vec<u8>>, reply: impl Into<Vec<u8>>) -> Step {
    Step {
        expect: expect.into(),
        reply: reply.into(),
    }
}

/// A server that follows a script: for each step it reads exactly the
/// expected request bytes, asserts them, and writes the canned reply.
///
/// Await the handle at the end of the test so a mismatch asserted
/// inside the server task fails the test.
pub async fn scripted_server(steps: Vec<Step>) -> (ConnectionSpec, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        for (index, step) in steps.into_iter().enumerate() {
            let mut request = vec![0u8; step.expect.len()];
            socket.read_exact(&mut request).await.unwrap();
            assert_eq!(
                String::from_utf8_lossy(&request),
                String::from_utf8_lossy(&step.expect),
                "request bytes mismatch at step {}",
                index
            );
            socket.write_all(&step.reply).await.unwrap();
        }
    });

    (ConnectionSpec::new("127.0.0.1", port), handle)
}
