use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::errors::DecodeError;
use crate::engine::query::row::Row;
use crate::engine::query::row_reader::RowReader;
use crate::engine::query::source::ChunkSource;
use crate::shared::config::CONFIG;

/// [`RowReader`] as a `Stream`. Decoding happens inline on each poll.
pub struct RowStream<S: ChunkSource> {
    reader: RowReader<S>,
}

impl<S: ChunkSource> RowStream<S> {
    pub fn new(reader: RowReader<S>) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> RowReader<S> {
        self.reader
    }
}

impl<S: ChunkSource + Unpin> Stream for RowStream<S> {
    type Item = Result<Row, DecodeError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().reader.next())
    }
}

impl<S: ChunkSource> RowReader<S> {
    pub fn into_stream(self) -> RowStream<S> {
        RowStream::new(self)
    }
}

/// Rows decoded on a blocking worker and handed over through a bounded channel.
/// Dropping the stream stops the worker at the next row.
pub struct BackgroundRowStream {
    rx: mpsc::Receiver<Result<Row, DecodeError>>,
    handle: JoinHandle<()>,
}

impl BackgroundRowStream {
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(reader: RowReader<S>, buffer: usize) -> Self
    where
        S: ChunkSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let handle = tokio::task::spawn_blocking(move || {
            for item in reader {
                if tx.blocking_send(item).is_err() {
                    debug!("Row stream receiver dropped; stopping decode");
                    return;
                }
            }
        });
        Self { rx, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<S: ChunkSource + Send + 'static> RowReader<S> {
    /// Background decoding with the configured channel depth.
    pub fn into_background_stream(self) -> BackgroundRowStream {
        BackgroundRowStream::spawn(self, CONFIG.reader.stream_buffer)
    }
}

impl Stream for BackgroundRowStream {
    type Item = Result<Row, DecodeError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for BackgroundRowStream {
    fn drop(&mut self) {
        self.rx.close();
    }
}
