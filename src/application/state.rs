//! Application-wide state shared by the dashboard views: the notification
//! list and the direct-message store.
//!
//! State is only changed through [`AppState::reduce`]. Message bodies are
//! sealed by a [`MessageCipher`] before they are stored.

use crate::domain::ports::MessageCipherBox;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedMessage {
    pub from: String,
    pub sealed: Vec<u8>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub enum Action {
    Notify { title: String, body: String },
    MarkRead(u64),
    MarkAllRead,
    Dismiss(u64),
    SendMessage { thread: String, from: String, body: String },
    ClearThread(String),
}

pub struct AppState {
    cipher: MessageCipherBox,
    notifications: Vec<Notification>,
    threads: BTreeMap<String, Vec<SealedMessage>>,
    next_notification: u64,
}

impl AppState {
    pub fn new(cipher: MessageCipherBox) -> Self {
        Self {
            cipher,
            notifications: Vec::new(),
            threads: BTreeMap::new(),
            next_notification: 1,
        }
    }

    /// Applies one action. Unknown ids are ignored; only sealing a message
    /// can fail, in which case the state is left untouched.
    pub fn reduce(&mut self, action: Action) -> Result<()> {
        debug!(?action, "app state action");
        match action {
            Action::Notify { title, body } => {
                let id = self.next_notification;
                self.next_notification += 1;
                // Newest first.
                self.notifications.insert(
                    0,
                    Notification {
                        id,
                        title,
                        body,
                        read: false,
                        created_at: Utc::now(),
                    },
                );
            }
            Action::MarkRead(id) => {
                if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
                    n.read = true;
                }
            }
            Action::MarkAllRead => {
                self.notifications.iter_mut().for_each(|n| n.read = true);
            }
            Action::Dismiss(id) => {
                self.notifications.retain(|n| n.id != id);
            }
            Action::SendMessage { thread, from, body } => {
                let sealed = self.cipher.seal(&body)?;
                self.threads.entry(thread).or_default().push(SealedMessage {
                    from,
                    sealed,
                    sent_at: Utc::now(),
                });
            }
            Action::ClearThread(thread) => {
                self.threads.remove(&thread);
            }
        }
        Ok(())
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn thread_names(&self) -> impl Iterator<Item = &str> {
        self.threads.keys().map(String::as_str)
    }

    /// Opens every message in `thread`, oldest first.
    pub fn read_thread(&self, thread: &str) -> Result<Vec<Message>> {
        self.threads
            .get(thread)
            .map(|messages| messages.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|m| {
                Ok(Message {
                    from: m.from.clone(),
                    body: self.cipher.open(&m.sealed)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MessageCipher;
    use crate::error::BookingError;

    /// Reverses bytes. Only good enough to prove the store never keeps plaintext.
    struct ReverseCipher;

    impl MessageCipher for ReverseCipher {
        fn seal(&self, plaintext: &str) -> Result<Vec<u8>> {
            if plaintext.is_empty() {
                return Err(BookingError::CipherError("empty message".to_string()));
            }
            Ok(plaintext.bytes().rev().collect())
        }

        fn open(&self, sealed: &[u8]) -> Result<String> {
            let bytes: Vec<u8> = sealed.iter().rev().copied().collect();
            String::from_utf8(bytes).map_err(|e| BookingError::CipherError(e.to_string()))
        }
    }

    fn state() -> AppState {
        AppState::new(Box::new(ReverseCipher))
    }

    fn notify(state: &mut AppState, title: &str) {
        state
            .reduce(Action::Notify {
                title: title.to_string(),
                body: String::new(),
            })
            .unwrap();
    }

    #[test]
    fn test_notifications_newest_first_and_unread_count() {
        let mut state = state();
        notify(&mut state, "Booking confirmed");
        notify(&mut state, "Payout sent");

        assert_eq!(state.notifications()[0].title, "Payout sent");
        assert_eq!(state.unread_count(), 2);

        let oldest = state.notifications()[1].id;
        state.reduce(Action::MarkRead(oldest)).unwrap();
        assert_eq!(state.unread_count(), 1);

        state.reduce(Action::MarkAllRead).unwrap();
        assert_eq!(state.unread_count(), 0);
    }

    #[test]
    fn test_dismiss_and_unknown_ids() {
        let mut state = state();
        notify(&mut state, "Check-in tomorrow");
        let id = state.notifications()[0].id;

        state.reduce(Action::MarkRead(999)).unwrap();
        state.reduce(Action::Dismiss(999)).unwrap();
        assert_eq!(state.notifications().len(), 1);

        state.reduce(Action::Dismiss(id)).unwrap();
        assert!(state.notifications().is_empty());
    }

    #[test]
    fn test_messages_are_sealed_and_readable() {
        let mut state = state();
        state
            .reduce(Action::SendMessage {
                thread: "host-42".to_string(),
                from: "guest".to_string(),
                body: "What time is check-in?".to_string(),
            })
            .unwrap();

        assert_ne!(state.threads["host-42"][0].sealed, b"What time is check-in?".to_vec());
        let messages = state.read_thread("host-42").unwrap();
        assert_eq!(messages[0].body, "What time is check-in?");
        assert!(state.read_thread("nobody").unwrap().is_empty());

        state.reduce(Action::ClearThread("host-42".to_string())).unwrap();
        assert_eq!(state.thread_names().count(), 0);
    }

    #[test]
    fn test_cipher_failure_leaves_state_untouched() {
        let mut state = state();
        let result = state.reduce(Action::SendMessage {
            thread: "host-42".to_string(),
            from: "guest".to_string(),
            body: String::new(),
        });
        assert!(matches!(result, Err(BookingError::CipherError(_))));
        assert_eq!(state.thread_names().count(), 0);
    }
}
