// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use std::any::TypeId;
use std::cell::RefCell;

use futures::StreamExt as _;
use futures::future;
use iced::{Subscription, subscription};
use iced_futures::MaybeSend;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::warn;

enum State<T> {
    Open(UnboundedReceiverStream<T>),
    Closed,
}

/// Turns the receiving end of a channel into an iced subscription.
///
/// `T` is the type of the event
pub struct ChannelSubscription<T> {
    stream: RefCell<Option<UnboundedReceiverStream<T>>>,
}

impl<T: MaybeSend + 'static> ChannelSubscription<T> {
    pub fn new(receiver: mpsc::UnboundedReceiver<T>) -> ChannelSubscription<T> {
        ChannelSubscription {
            stream: RefCell::new(Some(UnboundedReceiverStream::new(receiver))),
        }
    }

    /// Subscriptions over different event types never share an id
    fn id() -> TypeId {
        TypeId::of::<ChannelSubscription<T>>()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        // iced calls this after every update but only runs the first subscription with a given id,
        // so only the first call needs the stream
        let initial_state = match self.stream.take() {
            Some(stream) => State::Open(stream),
            None => State::Closed,
        };

        subscription::unfold(
            Self::id(),
            initial_state,
            |state| async move {
                match state {
                    State::Open(mut stream) => match stream.next().await {
                        Some(event) => (event, State::Open(stream)),
                        None => {
                            warn!("subscription channel closed");
                            future::pending().await
                        }
                    },
                    State::Closed => future::pending().await,
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_depend_on_event_type() {
        assert_ne!(ChannelSubscription::<u8>::id(), ChannelSubscription::<String>::id());
        assert_eq!(ChannelSubscription::<u8>::id(), ChannelSubscription::<u8>::id());
    }

    #[test]
    fn stream_is_handed_out_once() {
        let (_sender, receiver) = mpsc::unbounded_channel::<u8>();
        let subscription = ChannelSubscription::new(receiver);
        let _ = subscription.subscribe();
        assert!(subscription.stream.borrow().is_none());
        let _ = subscription.subscribe();
    }
}
