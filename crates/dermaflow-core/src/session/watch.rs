//! Sign-in state broadcast. One sender owned by the process, one receiver
//! per live screen; receivers are released when the screen is dropped.

use super::Identity;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    SignedOut,
    SignedIn(Identity),
}

/// Broadcasts sign-in/sign-out transitions to subscribed screens.
#[derive(Debug)]
pub struct SessionWatch {
    tx: watch::Sender<SessionState>,
}

impl SessionWatch {
    pub fn new(initial: SessionState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn signed_in(&self, identity: Identity) {
        self.tx.send_replace(SessionState::SignedIn(identity));
    }

    pub fn signed_out(&self) {
        self.tx.send_replace(SessionState::SignedOut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn transitions_reach_existing_subscribers() {
        let watch = SessionWatch::new(SessionState::SignedOut);
        let rx = watch.subscribe();
        let identity = Identity {
            id: Uuid::new_v4(),
            email: None,
        };
        watch.signed_in(identity.clone());
        assert_eq!(*rx.borrow(), SessionState::SignedIn(identity));
        watch.signed_out();
        assert_eq!(*rx.borrow(), SessionState::SignedOut);
    }

    #[test]
    fn broadcast_survives_dropped_subscribers() {
        let watch = SessionWatch::new(SessionState::SignedOut);
        drop(watch.subscribe());
        watch.signed_out();
        assert_eq!(watch.current(), SessionState::SignedOut);
    }
}
