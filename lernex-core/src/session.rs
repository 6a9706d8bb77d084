//! Current-user session handle.
//!
//! Authentication itself lives elsewhere; the engine only consumes the
//! resulting fact. Components receive the handle as explicit context, and
//! auth changes arrive over a cancellable stream: dropping the stream is
//! the unsubscribe.

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use lernex_model::UserID;

/// Stream of auth changes; yields the new current user on every sign-in /
/// sign-out.
pub type AuthEvents = WatchStream<Option<UserID>>;

/// Shared holder of the signed-in user.
#[derive(Debug)]
pub struct SessionTracker {
    tx: watch::Sender<Option<UserID>>,
}

impl SessionTracker {
    pub fn anonymous() -> Self {
        Self {
            tx: watch::Sender::new(None),
        }
    }

    pub fn signed_in(user: UserID) -> Self {
        Self {
            tx: watch::Sender::new(Some(user)),
        }
    }

    pub fn current_user(&self) -> Option<UserID> {
        *self.tx.borrow()
    }

    /// Payment confirmations and logins can land mid-session; observers
    /// re-evaluate access when this fires.
    pub fn sign_in(&self, user: UserID) {
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    pub fn subscribe(&self) -> AuthEvents {
        WatchStream::new(self.tx.subscribe())
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn subscribers_see_sign_in_and_sign_out() {
        let session = SessionTracker::anonymous();
        let mut events = session.subscribe();

        // Watch streams replay the current value first.
        assert_eq!(events.next().await, Some(None));

        let user = UserID::new();
        session.sign_in(user);
        assert_eq!(events.next().await, Some(Some(user)));
        assert_eq!(session.current_user(), Some(user));

        session.sign_out();
        assert_eq!(events.next().await, Some(None));
        assert_eq!(session.current_user(), None);
    }

    #[tokio::test]
    async fn dropping_the_stream_unsubscribes() {
        let session = SessionTracker::anonymous();
        let events = session.subscribe();
        drop(events);
        // No receivers left; state updates still succeed.
        session.sign_in(UserID::new());
        assert!(session.current_user().is_some());
    }
}
