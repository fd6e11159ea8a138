//! Wire types of the dashboard's `/api/rgw/user` endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// One gateway user as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgwUser {
    pub uid: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "bool_or_int")]
    pub suspended: bool,
    /// `-1` disables bucket creation, `0` means unlimited.
    #[serde(default)]
    pub max_buckets: i64,
    #[serde(default)]
    pub user_quota: UserQuota,
    /// Per-bucket usage breakdown.
    #[serde(default)]
    pub usage: Vec<BucketUsage>,
}

/// Quota limits. Non-positive values mean "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserQuota {
    pub enabled: bool,
    pub max_size: i64,
    pub max_objects: i64,
}

impl Default for UserQuota {
    fn default() -> Self {
        Self {
            enabled: false,
            max_size: -1,
            max_objects: -1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketUsage {
    pub bucket: String,
    pub size_actual: u64,
    pub num_objects: u64,
}

// Older gateways report `suspended` as 0/1.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
