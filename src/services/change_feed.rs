//! Real-time change feed for the bookmarks table.
//!
//! Writes publish a [`ChangeEvent`] after they commit; each subscriber sees
//! only the events for the owner it subscribed with. Delivery is best effort:
//! a subscriber that falls behind skips the events it missed, and there is no
//! backfill on reconnect.

use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing::{debug, warn};

use crate::types::change::ChangeEvent;

/// Number of events buffered per subscriber before it starts lagging.
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast hub for bookmark changes. Cloning shares the same channel.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event to every live subscriber.
    ///
    /// Returns the number of receivers the event was handed to; zero is not an error.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let kind = event.kind();
        match self.tx.send(event) {
            Ok(n) => {
                debug!(event = kind, receivers = n, "change published");
                n
            }
            Err(_) => 0,
        }
    }

    /// Subscribes to the changes of one owner.
    pub fn subscribe(&self, user_id: &str) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            user_id: user_id.to_string(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Owner-filtered view of the change feed.
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
    user_id: String,
}

impl Subscription {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Waits for the next event belonging to this subscription's owner.
    ///
    /// Returns `None` once the feed is closed.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.owner_id() == self.user_id => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(missed)) => {
                    warn!(user_id = %self.user_id, missed, "change subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Converts the subscription into a stream of owner events.
    pub fn into_stream(self) -> impl Stream<Item = ChangeEvent> + Send + 'static {
        let user_id = self.user_id;
        BroadcastStream::new(self.rx).filter_map(move |result| match result {
            Ok(event) if event.owner_id() == user_id => Some(event),
            Ok(_) => None,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "change stream lagged");
                None
            }
        })
    }
}
