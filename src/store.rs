//! Static application data served through resources
//!
//! Holds the configuration snapshot and the user directory. Both are seeded
//! once at startup and read-only afterwards.

use std::collections::BTreeMap;

use serde::Serialize;

/// Application configuration returned by the `data://config` resource.
///
/// Field order is the wire order: readers receive the snapshot serialized
/// exactly as declared here.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub theme: String,
    pub version: String,
    pub feature_flags: Vec<String>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            version: "1.1".to_string(),
            feature_flags: vec!["new_dashboard".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub status: UserStatus,
}

/// Outcome of a directory lookup. Missing ids are an expected case, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Found(UserProfile),
    NotFound,
}

/// Read-only table of user profiles keyed by integer id.
#[derive(Debug, Default)]
pub struct UserDirectory {
    profiles: BTreeMap<i64, UserProfile>,
}

impl UserDirectory {
    pub fn new(profiles: BTreeMap<i64, UserProfile>) -> Self {
        Self { profiles }
    }

    /// The fixed demonstration data set.
    pub fn with_demo_users() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            101,
            UserProfile {
                name: "Alice".to_string(),
                status: UserStatus::Active,
            },
        );
        profiles.insert(
            102,
            UserProfile {
                name: "Bob".to_string(),
                status: UserStatus::Inactive,
            },
        );
        Self::new(profiles)
    }

    pub fn lookup(&self, user_id: i64) -> ProfileLookup {
        match self.profiles.get(&user_id) {
            Some(profile) => ProfileLookup::Found(profile.clone()),
            None => ProfileLookup::NotFound,
        }
    }
}
