use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle for writing replies to the user. Cheap to clone; background tasks
/// such as the countdown hold their own copy.
#[derive(Clone)]
pub struct Console {
    tx: mpsc::UnboundedSender<String>,
}

impl Console {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a message for display
    pub fn send(&self, text: impl Into<String>) {
        if self.tx.send(text.into()).is_err() {
            tracing::warn!("Console output closed, dropping message");
        }
    }
}

/// Drain queued messages to stdout until every sender is dropped
pub fn spawn_writer(rx: mpsc::UnboundedReceiver<String>) -> JoinHandle<()> {
    tokio::spawn(write_lines(rx, tokio::io::stdout()))
}

/// Writes each message as a line. Stops at the first write or flush error.
async fn write_lines<W>(mut rx: mpsc::UnboundedReceiver<String>, mut out: W)
where
    W: AsyncWrite + Unpin,
{
    while let Some(text) = rx.recv().await {
        let mut line = text;
        if !line.ends_with('\n') {
            line.push('\n');
        }
        if let Err(e) = out.write_all(line.as_bytes()).await {
            tracing::error!("Failed to write to stdout: {}", e);
            break;
        }
        if let Err(e) = out.flush().await {
            tracing::error!("Failed to flush stdout: {}", e);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Accepts writes into a buffer but refuses to flush
    struct NoFlush(Vec<u8>);

    impl AsyncWrite for NoFlush {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.0.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_writer_appends_newlines() {
        let (console, rx) = Console::channel();
        console.send("one");
        console.send("two\n");
        drop(console);

        let mut out = Vec::new();
        write_lines(rx, &mut out).await;
        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_writer_stops_on_flush_error() {
        let (console, rx) = Console::channel();
        console.send("first");
        console.send("second");

        let mut out = NoFlush(Vec::new());
        // Returns even though the sender is still alive
        write_lines(rx, &mut out).await;
        assert_eq!(out.0, b"first\n");
        drop(console);
    }
}
