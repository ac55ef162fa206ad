//! # Event Subscriber
//!
//! Receiving side of the bus. A [`Subscription`] pulls committed events one
//! at a time and reports a subscriber that fell behind the channel; an
//! [`EventStream`] is the same feed as a `Stream` for indexers that consume
//! it with combinators.
//!
//! Filtering happens on the receiving side: every subscriber sees every
//! broadcast and skips what its [`EventFilter`] rejects.

use crate::events::{ContractEvent, EventFilter};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

/// Errors from receiving on a subscription.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was dropped; no further events will arrive.
    #[error("event bus closed")]
    Closed,
    /// The subscriber fell behind and this many events were overwritten
    /// before it could read them. Receiving again resumes with the oldest
    /// event still buffered.
    #[error("subscriber missed {0} events")]
    Lagged(u64),
}

/// Source of subscriptions.
pub trait EventSubscriber: Send + Sync {
    /// Opens a subscription receiving every later event that matches
    /// `filter`.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

/// A filtered handle on the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<ContractEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<ContractEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Waits for the next matching event.
    ///
    /// # Errors
    ///
    /// `Lagged` once after events were lost, `Closed` when the bus is gone.
    pub async fn recv(&mut self) -> Result<ContractEvent, SubscriptionError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Ok(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return Err(SubscriptionError::Closed),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    return Err(SubscriptionError::Lagged(missed))
                }
            }
        }
    }

    /// Returns the next matching event if one is already buffered.
    ///
    /// # Errors
    ///
    /// As [`Subscription::recv`].
    pub fn try_recv(&mut self) -> Result<Option<ContractEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    return Err(SubscriptionError::Lagged(missed))
                }
            }
        }
    }

    /// Filter applied to this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Turns the subscription into a [`Stream`].
    #[must_use]
    pub fn into_stream(self) -> EventStream {
        EventStream {
            inner: BroadcastStream::new(self.receiver),
            filter: self.filter,
        }
    }
}

/// Matching events as a [`Stream`]. Ends when the bus is dropped. Lost
/// events are logged and skipped.
pub struct EventStream {
    inner: BroadcastStream<ContractEvent>,
    filter: EventFilter,
}

impl EventStream {
    /// Filter applied to this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = ContractEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match ready!(Pin::new(&mut self.inner).poll_next(cx)) {
                None => return Poll::Ready(None),
                Some(Ok(event)) if self.filter.matches(&event) => return Poll::Ready(Some(event)),
                Some(Ok(_)) => {}
                Some(Err(BroadcastStreamRecvError::Lagged(missed))) => {
                    warn!(missed, "Event stream lagged, events skipped");
                }
            }
        }
    }
}
