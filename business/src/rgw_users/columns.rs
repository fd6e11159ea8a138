//! Column layout of the users table, shared by every front end.

use std::fmt;

use super::usage::{RgwUserRow, format_bytes};

/// Row property a column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserProp {
    Uid,
    DisplayName,
    Email,
    Suspended,
    MaxBuckets,
    SizeUsage,
    ObjectUsage,
}

impl UserProp {
    /// Property key as it appears in the API record.
    pub fn key(self) -> &'static str {
        match self {
            Self::Uid => "uid",
            Self::DisplayName => "display_name",
            Self::Email => "email",
            Self::Suspended => "suspended",
            Self::MaxBuckets => "max_buckets",
            Self::SizeUsage => "size_usage",
            Self::ObjectUsage => "object_usage",
        }
    }
}

/// How a cell turns its property into something to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTemplate {
    Text,
    CheckIcon,
    /// Replace listed values by labels, show anything else as is.
    Map(&'static [(i64, &'static str)]),
    UsageBar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserColumn {
    pub name: &'static str,
    pub prop: UserProp,
    pub flex_grow: f32,
    pub template: CellTemplate,
    pub centered: bool,
}

const MAX_BUCKETS_LABELS: &[(i64, &str)] = &[(-1, "Disabled"), (0, "Unlimited")];

const fn column(
    name: &'static str,
    prop: UserProp,
    flex_grow: f32,
    template: CellTemplate,
) -> UserColumn {
    UserColumn {
        name,
        prop,
        flex_grow,
        template,
        centered: false,
    }
}

pub const USER_COLUMNS: [UserColumn; 7] = [
    column("Username", UserProp::Uid, 1.0, CellTemplate::Text),
    column("Full name", UserProp::DisplayName, 1.0, CellTemplate::Text),
    column("Email address", UserProp::Email, 1.0, CellTemplate::Text),
    UserColumn {
        centered: true,
        ..column("Suspended", UserProp::Suspended, 1.0, CellTemplate::CheckIcon)
    },
    column(
        "Max. buckets",
        UserProp::MaxBuckets,
        1.0,
        CellTemplate::Map(MAX_BUCKETS_LABELS),
    ),
    column("Capacity Limit %", UserProp::SizeUsage, 0.8, CellTemplate::UsageBar),
    column("Object Limit %", UserProp::ObjectUsage, 0.8, CellTemplate::UsageBar),
];

/// Unit of the numbers behind a usage bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageUnit {
    Bytes,
    Objects,
}

impl UsageUnit {
    pub fn format(self, value: u64) -> String {
        match self {
            Self::Bytes => format_bytes(value),
            Self::Objects => value.to_string(),
        }
    }
}

/// Rendered content of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Check(bool),
    Usage {
        ratio: f64,
        used: u64,
        limit: u64,
        unit: UsageUnit,
    },
    NoLimit,
}

impl CellValue {
    pub fn percent(ratio: f64) -> String {
        format!("{:.0}%", ratio * 100.0)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Check(true) => f.write_str("✔"),
            Self::Check(false) => Ok(()),
            Self::Usage {
                ratio,
                used,
                limit,
                unit,
            } => write!(
                f,
                "{} ({} / {})",
                Self::percent(*ratio),
                unit.format(*used),
                unit.format(*limit)
            ),
            Self::NoLimit => f.write_str("No Limit"),
        }
    }
}

impl UserColumn {
    pub fn value(&self, row: &RgwUserRow) -> CellValue {
        let user = &row.user;
        match (self.prop, self.template) {
            (UserProp::Suspended, _) => CellValue::Check(user.suspended),
            (UserProp::MaxBuckets, CellTemplate::Map(labels)) => labels
                .iter()
                .find(|(value, _)| *value == user.max_buckets)
                .map(|(_, label)| CellValue::Text((*label).to_owned()))
                .unwrap_or_else(|| CellValue::Text(user.max_buckets.to_string())),
            (UserProp::MaxBuckets, _) => CellValue::Text(user.max_buckets.to_string()),
            (UserProp::SizeUsage, _) => usage_cell(
                row.usage.size_usage,
                row.usage.user_size,
                user.user_quota.max_size,
                UsageUnit::Bytes,
            ),
            (UserProp::ObjectUsage, _) => usage_cell(
                row.usage.object_usage,
                row.usage.num_objects,
                user.user_quota.max_objects,
                UsageUnit::Objects,
            ),
            (UserProp::Uid, _) => CellValue::Text(user.uid.clone()),
            (UserProp::DisplayName, _) => CellValue::Text(user.display_name.clone()),
            (UserProp::Email, _) => CellValue::Text(user.email.clone()),
        }
    }
}

fn usage_cell(ratio: Option<f64>, used: u64, limit: i64, unit: UsageUnit) -> CellValue {
    match (ratio, u64::try_from(limit)) {
        (Some(ratio), Ok(limit)) => CellValue::Usage {
            ratio,
            used,
            limit,
            unit,
        },
        _ => CellValue::NoLimit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgw_users::model::{BucketUsage, RgwUser, UserQuota};

    fn row(max_buckets: i64, quota: UserQuota) -> RgwUserRow {
        RgwUserRow::from(RgwUser {
            uid: "alice".to_owned(),
            tenant: String::new(),
            display_name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            suspended: true,
            max_buckets,
            user_quota: quota,
            usage: vec![BucketUsage {
                bucket: "b".to_owned(),
                size_actual: 512,
                num_objects: 5,
            }],
        })
    }

    fn column_for(prop: UserProp) -> UserColumn {
        *USER_COLUMNS.iter().find(|c| c.prop == prop).unwrap()
    }

    #[test]
    fn test_column_layout() {
        let names: Vec<_> = USER_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "Username",
                "Full name",
                "Email address",
                "Suspended",
                "Max. buckets",
                "Capacity Limit %",
                "Object Limit %"
            ]
        );
        let keys: Vec<_> = USER_COLUMNS.iter().map(|c| c.prop.key()).collect();
        assert_eq!(
            keys,
            [
                "uid",
                "display_name",
                "email",
                "suspended",
                "max_buckets",
                "size_usage",
                "object_usage"
            ]
        );
        assert!(column_for(UserProp::Suspended).centered);
        assert!((column_for(UserProp::SizeUsage).flex_grow - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_max_buckets_mapping() {
        let col = column_for(UserProp::MaxBuckets);
        let text = |n| col.value(&row(n, UserQuota::default())).to_string();
        assert_eq!(text(-1), "Disabled");
        assert_eq!(text(0), "Unlimited");
        assert_eq!(text(1000), "1000");
    }

    #[test]
    fn test_usage_cells() {
        let limited = row(
            0,
            UserQuota {
                enabled: true,
                max_size: 1024,
                max_objects: 10,
            },
        );
        assert_eq!(
            column_for(UserProp::SizeUsage).value(&limited).to_string(),
            "50% (512 B / 1.0 KiB)"
        );
        assert_eq!(
            column_for(UserProp::ObjectUsage).value(&limited).to_string(),
            "50% (5 / 10)"
        );

        let unlimited = row(0, UserQuota::default());
        assert_eq!(
            column_for(UserProp::SizeUsage).value(&unlimited),
            CellValue::NoLimit
        );
        assert_eq!(
            column_for(UserProp::ObjectUsage).value(&unlimited).to_string(),
            "No Limit"
        );
    }

    #[test]
    fn test_suspended_check_icon() {
        let value = column_for(UserProp::Suspended).value(&row(0, UserQuota::default()));
        assert_eq!(value, CellValue::Check(true));
    }
}
