//! Streaming zlib-compressed request bodies.
//!
//! Domain-graph payloads can be large, so they are encoded as a continuous
//! compressed byte stream instead of being built fully in memory: a
//! blocking worker writes JSON through a zlib encoder into a bounded
//! channel, and the HTTP layer consumes the channel as the request body.
//!
//! Pipeline contract: the producer closes its end after the last byte on
//! every exit path (`finish` then drop on success, an explicit error pushed
//! through the channel on encode failure), and the consumer drains the
//! stream until it ends. Neither side can block forever.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::Serialize;
use std::io::{self, Write};
use tokio::sync::mpsc;

/// Bounded buffer between the encoder and the HTTP send; backpressure
/// keeps at most this many chunks in flight.
const CHANNEL_CAPACITY: usize = 8;

/// Builds a request body that streams `payload` as zlib-compressed JSON.
///
/// Must be called within a tokio runtime; the encoder runs on a blocking
/// worker. An encode failure surfaces through the body stream and fails
/// the request instead of truncating it silently.
pub(crate) fn zlib_json_body<T>(payload: T) -> reqwest::Body
where
    T: Serialize + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<io::Result<Vec<u8>>>(CHANNEL_CAPACITY);
    tokio::task::spawn_blocking(move || {
        let writer = ChannelWriter { tx: tx.clone() };
        let mut encoder = ZlibEncoder::new(writer, Compression::default());
        let result = serde_json::to_writer(&mut encoder, &payload)
            .map_err(io::Error::other)
            .and_then(|()| encoder.finish().map(drop));
        if let Err(err) = result {
            // Receiver may already be gone when the request aborted early.
            let _ = tx.blocking_send(Err(err));
        }
    });
    let stream = futures::stream::poll_fn(move |cx| rx.poll_recv(cx));
    reqwest::Body::wrap_stream(stream)
}

/// `io::Write` adapter pushing compressed chunks into the body channel.
struct ChannelWriter {
    tx: mpsc::Sender<io::Result<Vec<u8>>>,
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .blocking_send(Ok(buf.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "request body dropped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
