//! Async bridge for observables
//!
//! Lets an [`Observable`] be consumed as a `futures::Stream` from async code.

use crate::disposable::{Disposable, Subscription};
use crate::error::RxError;
use crate::rx::{Observable, Observer};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Stream of the events produced by a subscribed observable
///
/// Yields `Ok` for each value and `Err` once if the observable fails; ends after completion or
/// error. Dropping the stream disposes the subscription.
pub struct ObservableStream<T> {
    receiver: mpsc::UnboundedReceiver<Result<T, RxError>>,
    subscription: Subscription,
}

impl<T> ObservableStream<T> {
    /// The subscription feeding this stream
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for ObservableStream<T> {
    type Item = Result<T, RxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl<T> Drop for ObservableStream<T> {
    fn drop(&mut self) {
        // Automatically unsubscribe when the stream is dropped
        self.subscription.dispose();
    }
}

/// Observer that pushes events into the stream's channel
struct ChannelObserver<T> {
    sender: Option<mpsc::UnboundedSender<Result<T, RxError>>>,
}

impl<T: Send> Observer<T> for ChannelObserver<T> {
    fn on_next(&mut self, value: T) {
        if let Some(sender) = &self.sender {
            // send() fails if the stream was dropped, which is fine
            let _ = sender.send(Ok(value));
        }
    }

    fn on_error(&mut self, error: RxError) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(Err(error));
        }
    }

    fn on_complete(&mut self) {
        // Dropping the sender ends the stream once buffered values are read
        self.sender.take();
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Subscribe and consume the events as a `futures::Stream`
    ///
    /// # Example
    /// ```
    /// # use rxflow::Observable;
    /// # use futures::StreamExt;
    /// # #[tokio::main]
    /// # async fn main() {
    /// let obs = Observable::create(|emitter| {
    ///     emitter.next(1);
    ///     emitter.next(2);
    ///     emitter.complete();
    /// });
    ///
    /// let values: Vec<i32> = obs.into_stream().filter_map(|r| async move { r.ok() }).collect().await;
    /// assert_eq!(values, vec![1, 2]);
    /// # }
    /// ```
    pub fn into_stream(&self) -> ObservableStream<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let subscription = self.subscribe(ChannelObserver {
            sender: Some(sender),
        });

        ObservableStream {
            receiver,
            subscription,
        }
    }
}
