//! Admin gate and sessions
//!
//! The gate is a plain shared secret and not a security boundary. Each
//! successful login opens a session holding that admin's view state. Idle
//! sessions expire, and closing a session ends every event stream opened
//! with its token.

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use kiosk_types::{Clock, ViewState};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

/// Decides whether a login secret is accepted
pub trait Authenticator: Send + Sync + Debug {
    fn verify(&self, secret: &str) -> bool;
}

/// Compares against one configured secret
#[derive(Debug, Clone)]
pub struct SharedSecretAuthenticator {
    secret: String,
}

impl SharedSecretAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Authenticator for SharedSecretAuthenticator {
    fn verify(&self, secret: &str) -> bool {
        self.secret == secret
    }
}

/// Authenticated admin, inserted into request extensions by the auth middleware
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

#[derive(Debug)]
struct Session {
    view: ViewState,
    last_seen: DateTime<Utc>,
    closed: watch::Sender<bool>,
}

impl Session {
    fn close(&self) {
        self.closed.send_replace(true);
    }
}

/// Open admin sessions keyed by bearer token
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Sessions idle for `ttl` or longer are closed
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            clock,
        }
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(session.last_seen)
            .to_std()
            .is_ok_and(|idle| idle >= self.ttl)
    }

    /// Open a session with a fresh view for `today`
    pub fn create(&self, today: NaiveDate) -> String {
        self.prune_expired();

        let token = Uuid::new_v4().to_string();
        let (closed, _) = watch::channel(false);
        self.sessions.insert(
            token.clone(),
            Session {
                view: ViewState::new(today),
                last_seen: self.clock.now(),
                closed,
            },
        );
        token
    }

    /// Whether `token` names a live session
    pub fn contains(&self, token: &str) -> bool {
        let now = self.clock.now();
        self.sessions
            .get(token)
            .is_some_and(|session| !self.is_expired(&session, now))
    }

    /// Record activity on a session
    ///
    /// Returns false for unknown tokens. An expired session is closed and
    /// also returns false.
    pub fn touch(&self, token: &str) -> bool {
        let now = self.clock.now();
        if let Some(mut session) = self.sessions.get_mut(token) {
            if !self.is_expired(&session, now) {
                session.last_seen = now;
                return true;
            }
        }

        if let Some((_, session)) = self
            .sessions
            .remove_if(token, |_, session| self.is_expired(session, now))
        {
            session.close();
            debug!("Admin session expired");
        }
        false
    }

    pub fn view(&self, token: &str) -> Option<ViewState> {
        self.sessions.get(token).map(|session| session.view.clone())
    }

    /// Store the view of an open session; unknown tokens are ignored
    pub fn update(&self, token: &str, view: ViewState) {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.view = view;
        }
    }

    /// Signal that flips to `true` once the session is closed
    pub fn closed(&self, token: &str) -> Option<watch::Receiver<bool>> {
        self.sessions
            .get(token)
            .map(|session| session.closed.subscribe())
    }

    /// Close a session, returning whether it was open
    pub fn remove(&self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some((_, session)) => {
                session.close();
                true
            }
            None => false,
        }
    }

    /// Close every session idle past the TTL, returning how many were closed
    pub fn prune_expired(&self) -> usize {
        let now = self.clock.now();
        let mut pruned = 0;
        self.sessions.retain(|_, session| {
            let expired = self.is_expired(session, now);
            if expired {
                session.close();
                pruned += 1;
            }
            !expired
        });
        if pruned > 0 {
            debug!(pruned, "Expired admin sessions closed");
        }
        pruned
    }

    /// Close every session
    pub fn close_all(&self) {
        self.sessions.retain(|_, session| {
            session.close();
            false
        });
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
