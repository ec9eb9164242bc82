//! Document-ordered body stream.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;

use crate::chunk::{ChunkMsg, ChunkReceiver};
use crate::error::RenderError;

/// One position in the output: either bytes that are ready now, or a
/// deferred section still being produced by its task.
#[derive(Debug)]
pub(crate) enum Segment {
    Ready(Bytes),
    Deferred { name: String, rx: ChunkReceiver },
}

impl Segment {
    pub(crate) fn ready(text: String) -> Self {
        Self::Ready(Bytes::from(text))
    }

    pub(crate) fn deferred(name: &str, rx: ChunkReceiver) -> Self {
        Self::Deferred {
            name: name.to_string(),
            rx,
        }
    }
}

/// The rendered body as an ordered stream of byte chunks.
///
/// Segments are drained strictly in document order: a pending deferred
/// section holds back everything after it, while its own chunks are
/// yielded as they arrive. A failed section yields its error and ends the
/// stream; bytes already yielded are unaffected.
#[derive(Debug)]
pub struct RenderStream {
    segments: VecDeque<Segment>,
}

impl RenderStream {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments: segments.into(),
        }
    }

    /// Collect the whole body into a string.
    ///
    /// Fails if any section fails; partial output is discarded.
    pub async fn into_string(self) -> Result<String, RenderError> {
        use futures::StreamExt;

        let mut stream = self;
        let mut out = String::new();
        while let Some(chunk) = stream.next().await {
            out.push_str(&String::from_utf8_lossy(&chunk?));
        }
        Ok(out)
    }
}

impl Stream for RenderStream {
    type Item = Result<Bytes, RenderError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let Some(front) = this.segments.front_mut() else {
                return Poll::Ready(None);
            };

            match front {
                Segment::Ready(_) => {
                    let Some(Segment::Ready(bytes)) = this.segments.pop_front() else {
                        unreachable!("front segment changed under us");
                    };
                    return Poll::Ready(Some(Ok(bytes)));
                }
                Segment::Deferred { name, rx } => match rx.poll_recv(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Some(Ok(ChunkMsg::Data(bytes)))) => {
                        return Poll::Ready(Some(Ok(bytes)));
                    }
                    Poll::Ready(Some(Ok(ChunkMsg::End))) => {
                        this.segments.pop_front();
                    }
                    Poll::Ready(Some(Err(err))) => {
                        this.segments.clear();
                        return Poll::Ready(Some(Err(err)));
                    }
                    // The task went away without end(): failed section.
                    Poll::Ready(None) => {
                        let name = name.clone();
                        this.segments.clear();
                        return Poll::Ready(Some(Err(RenderError::Incomplete(name))));
                    }
                },
            }
        }
    }
}
