// 👬 Friend Entity - Stable identity + running balance
//
// "Name and avatar are fixed at creation, the balance is the only thing that moves"
//
// - FriendId is the sole join key between the selection and the directory
// - Entries are appended, never removed or reordered
// - Balance changes only through a bill split

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default avatar service; every new friend gets `?u=<id>` appended.
pub const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/48";

// ============================================================================
// IDENTITY
// ============================================================================

/// Opaque friend identity. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendId(String);

impl FriendId {
    pub fn new(id: impl Into<String>) -> Self {
        FriendId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh identities.
///
/// Production code uses [`UuidGenerator`]; tests swap in something
/// deterministic.
pub trait IdGenerator {
    fn next_id(&mut self) -> FriendId;
}

/// Random v4 UUIDs, unique for the lifetime of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> FriendId {
        FriendId(uuid::Uuid::new_v4().to_string())
    }
}

// ============================================================================
// FRIEND ENTITY
// ============================================================================

/// Which way the money flows between the user and a friend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceStatus {
    /// The friend owes the user this (positive) amount
    FriendOwes(f64),

    /// The user owes the friend this (positive) amount
    UserOwes(f64),

    /// Settled
    Even,
}

/// A ledger entry: one friend and the net debt between them and the user.
///
/// Positive balance: the friend owes the user.
/// Negative balance: the user owes the friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub image: String,
    pub balance: f64,
}

impl Friend {
    /// Create a settled friend whose avatar is keyed by the new id.
    pub fn new(id: FriendId, name: impl Into<String>, avatar_base_url: &str) -> Self {
        let image = avatar_image(avatar_base_url, &id);

        Friend {
            id,
            name: name.into(),
            image,
            balance: 0.0,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        if self.balance > 0.0 {
            BalanceStatus::FriendOwes(self.balance)
        } else if self.balance < 0.0 {
            BalanceStatus::UserOwes(-self.balance)
        } else {
            BalanceStatus::Even
        }
    }
}

/// Build the avatar reference by tagging the base URL with the friend id.
pub fn avatar_image(base_url: &str, id: &FriendId) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}u={}", base_url, separator, urlencoding::encode(id.as_str()))
}

// ============================================================================
// FRIEND DIRECTORY
// ============================================================================

/// Ordered, append-only collection of friends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendDirectory {
    entries: Vec<Friend>,
}

impl FriendDirectory {
    pub fn new(entries: Vec<Friend>) -> Self {
        FriendDirectory { entries }
    }

    /// The three friends every fresh session starts with
    pub fn seeded() -> Self {
        let seed = |id: &str, name: &str, balance: f64| {
            let id = FriendId::new(id);
            Friend {
                image: avatar_image(DEFAULT_AVATAR_URL, &id),
                id,
                name: name.to_string(),
                balance,
            }
        };

        FriendDirectory::new(vec![
            seed("118836", "Clark", -7.0),
            seed("933372", "Sarah", 20.0),
            seed("499476", "Anthony", 0.0),
        ])
    }

    /// Add a friend to the end of the list
    pub fn append(&mut self, friend: Friend) {
        self.entries.push(friend);
    }

    /// Apply `delta` to the matching friend's balance.
    ///
    /// Unknown ids are ignored. Returns whether a friend was updated.
    pub fn update_balance(&mut self, id: &FriendId, delta: f64) -> bool {
        match self.entries.iter_mut().find(|f| &f.id == id) {
            Some(friend) => {
                friend.balance += delta;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &FriendId) -> Option<&Friend> {
        self.entries.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FriendId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Friend> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Friend] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_creation() {
        let friend = Friend::new(FriendId::new("abc"), "Dana", DEFAULT_AVATAR_URL);

        assert_eq!(friend.name, "Dana");
        assert_eq!(friend.balance, 0.0);
        assert_eq!(friend.image, "https://i.pravatar.cc/48?u=abc");
        assert_eq!(friend.status(), BalanceStatus::Even);
    }

    #[test]
    fn test_avatar_image_existing_query() {
        let id = FriendId::new("42");
        assert_eq!(
            avatar_image("https://example.com/a?size=48", &id),
            "https://example.com/a?size=48&u=42"
        );
    }

    #[test]
    fn test_balance_status() {
        let mut friend = Friend::new(FriendId::new("1"), "Eve", DEFAULT_AVATAR_URL);

        friend.balance = 12.5;
        assert_eq!(friend.status(), BalanceStatus::FriendOwes(12.5));

        friend.balance = -7.0;
        assert_eq!(friend.status(), BalanceStatus::UserOwes(7.0));
    }

    #[test]
    fn test_uuid_generator_unique() {
        let mut ids = UuidGenerator;
        let generated: std::collections::HashSet<FriendId> =
            (0..1000).map(|_| ids.next_id()).collect();

        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_directory_seeded() {
        let directory = FriendDirectory::seeded();
        let names: Vec<&str> = directory.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["Clark", "Sarah", "Anthony"]);
        assert_eq!(directory.as_slice()[0].image, "https://i.pravatar.cc/48?u=118836");
        assert_eq!(directory.as_slice()[1].balance, 20.0);
    }

    #[test]
    fn test_directory_append_keeps_order() {
        let mut directory = FriendDirectory::seeded();
        directory.append(Friend::new(FriendId::new("new"), "Zoe", DEFAULT_AVATAR_URL));

        assert_eq!(directory.len(), 4);
        assert_eq!(directory.as_slice()[3].name, "Zoe");
        assert_eq!(directory.as_slice()[0].name, "Clark");
    }

    #[test]
    fn test_update_balance_touches_only_target() {
        let mut directory = FriendDirectory::seeded();
        let before = directory.clone();

        assert!(directory.update_balance(&FriendId::new("933372"), 60.0));

        assert_eq!(directory.as_slice()[1].balance, 80.0);
        assert_eq!(directory.as_slice()[0], before.as_slice()[0]);
        assert_eq!(directory.as_slice()[2], before.as_slice()[2]);
    }

    #[test]
    fn test_update_balance_unknown_id_is_noop() {
        let mut directory = FriendDirectory::seeded();
        let before = directory.clone();

        assert!(!directory.update_balance(&FriendId::new("missing"), 10.0));
        assert_eq!(directory, before);
    }

    #[test]
    fn test_directory_json_shape() {
        let directory = FriendDirectory::new(vec![Friend::new(
            FriendId::new("7"),
            "Kim",
            DEFAULT_AVATAR_URL,
        )]);

        let json = serde_json::to_value(&directory).unwrap();
        assert_eq!(json[0]["id"], "7");
        assert_eq!(json[0]["name"], "Kim");
        assert_eq!(json[0]["balance"], 0.0);
    }
}
