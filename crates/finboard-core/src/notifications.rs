//! Notification center state

use serde::{Deserialize, Serialize};

use crate::models::Notification;

/// Notification popover state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NotificationCenter {
    pub notifications: Vec<Notification>,
    pub open: bool,
}

/// Notification center transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
pub enum NotificationAction {
    Open,
    Close,
    Toggle,
    MarkRead(String),
    MarkAllRead,
    Dismiss(String),
}

impl NotificationCenter {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            open: false,
        }
    }

    /// Apply one transition in place. Unknown ids are ignored.
    pub fn reduce(&mut self, action: NotificationAction) {
        log::debug!("notification action: {:?}", action);
        match action {
            NotificationAction::Open => self.open = true,
            NotificationAction::Close => self.open = false,
            NotificationAction::Toggle => self.open = !self.open,
            NotificationAction::MarkRead(id) => {
                if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
                    n.read = true;
                }
            }
            NotificationAction::MarkAllRead => {
                self.notifications.iter_mut().for_each(|n| n.read = true);
            }
            NotificationAction::Dismiss(id) => self.notifications.retain(|n| n.id != id),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// First `count` notifications in display order
    pub fn recent(&self, count: usize) -> &[Notification] {
        &self.notifications[..count.min(self.notifications.len())]
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }
}
