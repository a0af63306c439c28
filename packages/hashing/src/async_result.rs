//! Futures over a MurmurHash3 computation running on the tokio runtime
//!
//! `Murmur3Builder::compute` hashes on a spawned task and sends the 32-bit
//! `HashResult` back through a oneshot channel. The only failure these
//! futures surface is that task going away before it sends.

use crate::{HashError, HashResult, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::warn;

/// A `HashResult` still being computed; resolves to `Result<HashResult>`
pub struct AsyncHashResult {
    receiver: oneshot::Receiver<Result<HashResult>>,
}

/// A pending hash whose outcome is mapped by an `on_result` closure
pub struct AsyncHashResultWithHandler<F> {
    receiver: oneshot::Receiver<Result<HashResult>>,
    handler: Option<F>,
}

/// A pending hash whose errors pass through an `on_error` closure
pub struct AsyncHashResultWithError<E> {
    receiver: oneshot::Receiver<Result<HashResult>>,
    error_handler: E,
}

fn dropped_sender() -> HashError {
    warn!("Hash computation task dropped before delivering a result");
    HashError::internal("Hash computation task dropped")
}

impl AsyncHashResult {
    /// Wrap the receiving end of a spawned hash task
    pub(crate) fn new(receiver: oneshot::Receiver<Result<HashResult>>) -> Self {
        Self { receiver }
    }

    /// Resolve immediately to `result`, without spawning
    #[must_use]
    pub fn ready(result: Result<HashResult>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// Resolve immediately to `error`
    #[must_use]
    pub fn error(error: HashError) -> Self {
        Self::ready(Err(error))
    }

    /// Map the outcome with `handler`, which runs exactly once
    pub fn on_result<F, T>(self, handler: F) -> AsyncHashResultWithHandler<F>
    where
        F: FnOnce(Result<HashResult>) -> T,
    {
        AsyncHashResultWithHandler {
            receiver: self.receiver,
            handler: Some(handler),
        }
    }
}

impl Future for AsyncHashResult {
    type Output = Result<HashResult>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(dropped_sender())),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T> Future for AsyncHashResultWithHandler<F>
where
    F: FnOnce(Result<HashResult>) -> T + Unpin,
{
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let result = match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(_)) => Err(dropped_sender()),
            Poll::Pending => return Poll::Pending,
        };

        // A handler is only ever called once; later polls stay pending.
        match this.handler.take() {
            Some(handler) => Poll::Ready(handler(result)),
            None => Poll::Pending,
        }
    }
}

impl<E> AsyncHashResultWithError<E> {
    /// Wrap a spawned hash task with an error transform
    pub(crate) fn new(receiver: oneshot::Receiver<Result<HashResult>>, error_handler: E) -> Self {
        Self {
            receiver,
            error_handler,
        }
    }
}

impl<E> Future for AsyncHashResultWithError<E>
where
    E: Fn(HashError) -> HashError + Unpin,
{
    type Output = Result<HashResult>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(Ok(value))) => Poll::Ready(Ok(value)),
            Poll::Ready(Ok(Err(e))) => Poll::Ready(Err((this.error_handler)(e))),
            Poll::Ready(Err(_)) => Poll::Ready(Err((this.error_handler)(dropped_sender()))),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_result() -> Result<()> {
        let hash = AsyncHashResult::ready(Ok(HashResult::new(5))).await?;
        assert_eq!(hash.value(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_error_result_through_handler() {
        let message = AsyncHashResult::error(HashError::internal("boom"))
            .on_result(|result| match result {
                Ok(hash) => hash.to_hex(),
                Err(e) => e.to_string(),
            })
            .await;
        assert_eq!(message, "Internal error: boom");
    }

    #[tokio::test]
    async fn test_hash_sent_from_spawned_task() -> Result<()> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(Ok(HashResult::new(crate::murmur3_32("spawned", 2))));
        });
        let hash = AsyncHashResult::new(rx).await?;
        assert_eq!(hash.value(), crate::murmur3_32("spawned", 2));
        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_sender_is_internal_error() {
        let (tx, rx) = oneshot::channel();
        drop(tx);
        let result = AsyncHashResult::new(rx).await;
        assert!(matches!(result, Err(HashError::Internal(_))));
    }

    #[tokio::test]
    async fn test_error_transform() {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(HashError::internal("inner")));
        let result = AsyncHashResultWithError::new(rx, |_: HashError| {
            HashError::HashComputation("wrapped".to_string())
        })
        .await;
        assert!(matches!(result, Err(HashError::HashComputation(msg)) if msg == "wrapped"));
    }
}
