//! User audit record storage.

use std::collections::HashMap;
use std::path::PathBuf;

use filmgate_models::UserProfile;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::Result;

/// File name of the user snapshot under the state directory.
const USERS_FILE: &str = "users.json";

/// Durable, append-only audit log of users who have contacted the bot.
///
/// Never consulted for authorization; the resolver records first contact
/// here and the broadcast command reads it back.
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Creates a store rooted at the given state directory.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: state_dir.into().join(USERS_FILE),
        }
    }

    fn load_map(&self) -> Result<HashMap<i64, UserProfile>> {
        Ok(read_json_optional(&self.path)?.unwrap_or_default())
    }

    /// Records a contact. First contact creates the profile; later contacts
    /// refresh the name fields but keep the original `joined_at`.
    pub fn upsert(&self, profile: UserProfile) -> Result<()> {
        let mut map = self.load_map()?;
        match map.get_mut(&profile.id) {
            Some(existing) => existing.refresh(&profile),
            None => {
                map.insert(profile.id, profile);
            }
        }
        atomic_write_json(&self.path, &map)
    }

    /// Looks up a profile by user id.
    pub fn get(&self, id: i64) -> Result<Option<UserProfile>> {
        Ok(self.load_map()?.get(&id).cloned())
    }

    /// Returns every known user id (broadcast targets).
    pub fn all_ids(&self) -> Result<Vec<i64>> {
        Ok(self.load_map()?.into_keys().collect())
    }
}
