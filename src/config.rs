// Session configuration: seed friends, avatar service, currency symbol.
//
// Read once at startup. Nothing is ever written back.

use crate::entities::{Friend, FriendDirectory, FriendId, DEFAULT_AVATAR_URL};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL new friends' avatars are derived from
    pub avatar_base_url: String,

    /// Symbol printed in front of amounts
    pub currency: String,

    /// Friends the session starts with
    pub friends: Vec<Friend>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            avatar_base_url: DEFAULT_AVATAR_URL.to_string(),
            currency: "$".to_string(),
            friends: FriendDirectory::seeded().as_slice().to_vec(),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json).context("Invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Seed friends must have unique ids and non-empty names.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&FriendId> = HashSet::new();

        for friend in &self.friends {
            ensure!(
                !friend.name.is_empty(),
                "Friend {} has an empty name",
                friend.id
            );
            ensure!(seen.insert(&friend.id), "Duplicate friend id {}", friend.id);
        }

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_json_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Default config when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }

    pub fn directory(&self) -> FriendDirectory {
        FriendDirectory::new(self.friends.clone())
    }
}
