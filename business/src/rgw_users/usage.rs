use super::model::RgwUser;

/// Usage figures derived client-side from a user's per-bucket breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserUsage {
    /// Sum of `size_actual` over all buckets.
    pub user_size: u64,
    /// Sum of `num_objects` over all buckets.
    pub num_objects: u64,
    /// `user_size / max_size`, `None` without a positive size quota.
    pub size_usage: Option<f64>,
    /// `num_objects / max_objects`, `None` without a positive object quota.
    pub object_usage: Option<f64>,
}

impl UserUsage {
    pub fn of(user: &RgwUser) -> Self {
        let (user_size, num_objects) = user.usage.iter().fold((0u64, 0u64), |(size, objs), b| {
            (
                size.saturating_add(b.size_actual),
                objs.saturating_add(b.num_objects),
            )
        });

        Self {
            user_size,
            num_objects,
            size_usage: ratio(user_size, user.user_quota.max_size),
            object_usage: ratio(num_objects, user.user_quota.max_objects),
        }
    }
}

fn ratio(used: u64, limit: i64) -> Option<f64> {
    (limit > 0).then(|| used as f64 / limit as f64)
}

/// A table row: the user record together with its derived usage.
#[derive(Debug, Clone, PartialEq)]
pub struct RgwUserRow {
    pub user: RgwUser,
    pub usage: UserUsage,
}

impl From<RgwUser> for RgwUserRow {
    fn from(user: RgwUser) -> Self {
        let usage = UserUsage::of(&user);
        Self { user, usage }
    }
}

pub fn transform_users(users: Vec<RgwUser>) -> Vec<RgwUserRow> {
    users.into_iter().map(RgwUserRow::from).collect()
}

const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Formats a byte count with binary units, e.g. `1.5 GiB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
