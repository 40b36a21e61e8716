//! Connected clients as seen by the plugin
//!
//! The host owns the real player list; the scheduler only needs a
//! point-in-time snapshot each tick.

use std::fmt;
use std::sync::RwLock;

/// Stable per-session player id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Underlying connection handle of a client (what the host's own hint primitive takes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub u32);

/// Current role classification of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientRole {
    /// Dead and waiting for the next wave
    Spectator,
    /// In the round as a participant
    Alive,
    /// Staff observing the round
    Overwatch,
    /// Connected but not yet assigned
    #[default]
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: PlayerId,
    pub nickname: String,
    pub role: ClientRole,
    pub session: SessionHandle,
}

impl Client {
    pub fn new(id: i32, nickname: impl Into<String>, role: ClientRole) -> Self {
        Self {
            id: PlayerId(id),
            nickname: nickname.into(),
            role,
            session: SessionHandle(id as u32),
        }
    }

    pub fn is_spectator(&self) -> bool {
        self.role == ClientRole::Spectator
    }
}

/// Source of the currently connected clients
pub trait ClientRoster: Send + Sync {
    /// Everyone connected right now
    fn snapshot(&self) -> Vec<Client>;
}

/// Roster kept in memory; the host pushes joins, leaves and role changes.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    clients: RwLock<Vec<Client>>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client, replacing any existing entry with the same id
    pub fn join(&self, client: Client) {
        if let Ok(mut clients) = self.clients.write() {
            clients.retain(|c| c.id != client.id);
            clients.push(client);
        }
    }

    /// Remove a client. Returns the removed entry, if it was connected.
    pub fn leave(&self, id: PlayerId) -> Option<Client> {
        let mut clients = self.clients.write().ok()?;
        let idx = clients.iter().position(|c| c.id == id)?;
        Some(clients.remove(idx))
    }

    pub fn set_role(&self, id: PlayerId, role: ClientRole) -> bool {
        let Ok(mut clients) = self.clients.write() else {
            return false;
        };
        match clients.iter_mut().find(|c| c.id == id) {
            Some(client) => {
                client.role = role;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.clients.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClientRoster for InMemoryRoster {
    fn snapshot(&self) -> Vec<Client> {
        self.clients.read().map(|c| c.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_leave_and_role_change() {
        let roster = InMemoryRoster::new();
        roster.join(Client::new(1, "alpha", ClientRole::Alive));
        roster.join(Client::new(2, "bravo", ClientRole::Spectator));
        assert_eq!(roster.len(), 2);

        assert!(roster.set_role(PlayerId(1), ClientRole::Spectator));
        assert!(roster.snapshot().iter().all(Client::is_spectator));

        let left = roster.leave(PlayerId(2)).unwrap();
        assert_eq!(left.nickname, "bravo");
        assert!(roster.leave(PlayerId(2)).is_none());
        assert!(!roster.set_role(PlayerId(2), ClientRole::Alive));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_rejoin_replaces_entry() {
        let roster = InMemoryRoster::new();
        roster.join(Client::new(7, "old", ClientRole::Alive));
        roster.join(Client::new(7, "new", ClientRole::Spectator));

        let snapshot = roster.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].nickname, "new");
    }
}
