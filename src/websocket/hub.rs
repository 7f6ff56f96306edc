use dashmap::DashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc;

pub type WsSender = mpsc::UnboundedSender<String>;

/// Registry of open real-time connections, keyed by user id.
///
/// Constructed at startup and handed to the router as an Extension;
/// holds no global state.
#[derive(Clone)]
pub struct NotificationHub {
    connections: Arc<DashMap<i32, Vec<(u64, WsSender)>>>,
    next_conn_id: Arc<AtomicU64>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            next_conn_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a connection for a user. Returns the connection id and the
    /// receiving half the socket task drains.
    pub fn subscribe(&self, user_id: i32) -> (u64, mpsc::UnboundedReceiver<String>) {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections
            .entry(user_id)
            .or_default()
            .push((conn_id, tx));
        (conn_id, rx)
    }

    /// Remove one connection; prunes the user's entry when it empties.
    pub fn unsubscribe(&self, user_id: i32, conn_id: u64) {
        if let Some(mut senders) = self.connections.get_mut(&user_id) {
            senders.retain(|(id, _)| *id != conn_id);
            if senders.is_empty() {
                drop(senders);
                self.connections.remove(&user_id);
            }
        }
    }

    /// Best-effort push to every open connection of a user. Closed channels
    /// are dropped on the way; no delivery guarantee beyond the attempt.
    pub fn send_to_user(&self, user_id: i32, message: &str) {
        if let Some(mut senders) = self.connections.get_mut(&user_id) {
            senders.retain(|(_, sender)| sender.send(message.to_string()).is_ok());
            if senders.is_empty() {
                drop(senders);
                self.connections.remove(&user_id);
            }
        }
    }

    /// Number of open connections for a user.
    pub fn connection_count(&self, user_id: i32) -> usize {
        self.connections
            .get(&user_id)
            .map(|senders| senders.len())
            .unwrap_or(0)
    }

    /// True when the user has an entry in the registry at all.
    pub fn is_registered(&self, user_id: i32) -> bool {
        self.connections.contains_key(&user_id)
    }
}
