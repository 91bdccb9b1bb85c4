//! Per-document broadcast groups for live edits.
//!
//! The relay owns a map from document key to the group of connections
//! joined to it. Each group sits behind its own mutex, so join, leave and
//! broadcast on one document serialize with each other without blocking
//! other documents. The outer map lock is only taken to find, create, or
//! drop a group.
//!
//! Lock order is always outer map, then group. Broadcast clones the group
//! handle and releases the map before locking the group.
//!
//! The relay never touches the document store: a change can be broadcast
//! and lost before it is ever saved, and a late joiner receives no backlog.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message;
use inkwell_core::collaboration::RelayMessage;
use tokio::sync::{Mutex, RwLock};

use crate::ws::manager::WsSender;

/// Members of one document group, keyed by connection id.
type Group = Mutex<HashMap<String, WsSender>>;

pub struct CollabRelay {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl CollabRelay {
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Add a connection to a document group.
    ///
    /// Idempotent: returns `false` if the connection was already a member.
    pub async fn join(&self, conn_id: &str, sender: &WsSender, document_id: &str) -> bool {
        {
            let groups = self.groups.read().await;
            if let Some(group) = groups.get(document_id) {
                let mut members = group.lock().await;
                return members
                    .insert(conn_id.to_string(), sender.clone())
                    .is_none();
            }
        }

        let mut groups = self.groups.write().await;
        let group = Arc::clone(groups.entry(document_id.to_string()).or_default());
        let mut members = group.lock().await;
        members
            .insert(conn_id.to_string(), sender.clone())
            .is_none()
    }

    /// Remove a connection from a document group. No-op if it was not a member.
    pub async fn leave(&self, conn_id: &str, document_id: &str) -> bool {
        let emptied = {
            let groups = self.groups.read().await;
            let Some(group) = groups.get(document_id) else {
                return false;
            };
            let mut members = group.lock().await;
            if members.remove(conn_id).is_none() {
                return false;
            }
            members.is_empty()
        };

        if emptied {
            self.prune(document_id).await;
        }
        true
    }

    /// Forward `changes` to every member of the group except `sender_conn_id`.
    ///
    /// Only a member may broadcast: returns `None` when the sender has not
    /// joined `document_id`. Delivery is best-effort, closed recipients are
    /// skipped silently. Otherwise returns the number of connections the
    /// update was queued to.
    pub async fn broadcast_change(
        &self,
        sender_conn_id: &str,
        document_id: &str,
        changes: serde_json::Value,
    ) -> Option<usize> {
        let group = self.groups.read().await.get(document_id).cloned()?;

        let update = RelayMessage::Update {
            document_id: document_id.to_string(),
            changes,
            sender: sender_conn_id.to_string(),
        };
        let frame = match serde_json::to_string(&update) {
            Ok(text) => Message::Text(text.into()),
            Err(e) => {
                tracing::warn!(error = %e, document_id, "Failed to encode relay update");
                return Some(0);
            }
        };

        let members = group.lock().await;
        if !members.contains_key(sender_conn_id) {
            return None;
        }
        let delivered = members
            .iter()
            .filter(|(conn_id, _)| conn_id.as_str() != sender_conn_id)
            .filter(|(_, tx)| tx.send(frame.clone()).is_ok())
            .count();
        Some(delivered)
    }

    /// Remove a connection from every group it joined.
    ///
    /// Returns the number of groups it was removed from.
    pub async fn on_disconnect(&self, conn_id: &str) -> usize {
        let mut groups = self.groups.write().await;
        let mut left = 0;
        let mut emptied = Vec::new();

        for (document_id, group) in groups.iter() {
            let mut members = group.lock().await;
            if members.remove(conn_id).is_some() {
                left += 1;
            }
            if members.is_empty() {
                emptied.push(document_id.clone());
            }
        }
        for document_id in emptied {
            groups.remove(&document_id);
        }
        left
    }

    /// Number of connections joined to a document.
    pub async fn group_size(&self, document_id: &str) -> usize {
        let Some(group) = self.groups.read().await.get(document_id).cloned() else {
            return 0;
        };
        let size = group.lock().await.len();
        size
    }

    /// Document keys a connection is currently joined to, sorted.
    pub async fn groups_of(&self, conn_id: &str) -> Vec<String> {
        let groups = self.groups.read().await;
        let mut joined = Vec::new();
        for (document_id, group) in groups.iter() {
            if group.lock().await.contains_key(conn_id) {
                joined.push(document_id.clone());
            }
        }
        joined.sort();
        joined
    }

    /// Number of non-empty groups.
    pub async fn group_count(&self) -> usize {
        self.groups.read().await.len()
    }

    /// Drop a group if it is still empty.
    async fn prune(&self, document_id: &str) {
        let mut groups = self.groups.write().await;
        let empty = match groups.get(document_id) {
            Some(group) => group.lock().await.is_empty(),
            None => false,
        };
        if empty {
            groups.remove(document_id);
        }
    }
}

impl Default for CollabRelay {
    fn default() -> Self {
        Self::new()
    }
}
