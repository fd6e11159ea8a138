//! Toolbar actions of the users table.

use super::selection::Selection;
use crate::RgwPermission;

/// Builds dashboard routes under one base path, e.g. `rgw/user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlBuilder {
    base: &'static str,
}

impl UrlBuilder {
    pub const RGW_USER: Self = Self::new("rgw/user");

    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub fn create(&self) -> String {
        format!("/{}/create", self.base)
    }

    /// `item` is percent-encoded.
    pub fn edit(&self, item: &str) -> String {
        format!("/{}/edit/{}", self.base, urlencoding::encode(item))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableActionKind {
    Create,
    Edit,
    Delete,
}

impl TableActionKind {
    pub const ALL: [Self; 3] = [Self::Create, Self::Edit, Self::Delete];

    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }

    pub fn is_permitted(self, permission: RgwPermission) -> bool {
        match self {
            Self::Create => permission.create,
            Self::Edit => permission.update,
            Self::Delete => permission.delete,
        }
    }

    fn is_disabled(self, selection: &Selection) -> bool {
        match self {
            Self::Create => false,
            Self::Edit | Self::Delete => !selection.has_selection(),
        }
    }

    fn can_be_primary(self, selection: &Selection) -> bool {
        match self {
            Self::Create => !selection.has_selection(),
            Self::Edit => selection.has_single_selection(),
            Self::Delete => selection.has_multi_selection(),
        }
    }
}

/// One permitted action as the toolbar should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAction {
    pub kind: TableActionKind,
    pub disabled: bool,
    pub primary: bool,
    /// Dashboard route for navigation actions.
    pub route: Option<String>,
}

impl TableAction {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Actions the administrator may use for the current selection.
    ///
    /// Exactly one of them is primary: the first whose condition matches the selection,
    /// or the first offered one.
    pub fn for_selection(selection: &Selection, permission: RgwPermission) -> Vec<Self> {
        let urls = UrlBuilder::RGW_USER;
        let mut actions: Vec<Self> = TableActionKind::ALL
            .into_iter()
            .filter(|kind| kind.is_permitted(permission))
            .map(|kind| Self {
                kind,
                disabled: kind.is_disabled(selection),
                primary: false,
                route: match kind {
                    TableActionKind::Create => Some(urls.create()),
                    TableActionKind::Edit => selection.first().map(|uid| urls.edit(&uid)),
                    TableActionKind::Delete => None,
                },
            })
            .collect();

        let primary = actions
            .iter()
            .position(|action| action.kind.can_be_primary(selection))
            .or_else(|| (!actions.is_empty()).then_some(0));
        if let Some(index) = primary {
            actions[index].primary = true;
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use ustr::Ustr;

    use super::*;

    fn selection(uids: &[&str]) -> Selection {
        let mut selection = Selection::default();
        for uid in uids {
            selection.select(Ustr::from(*uid));
        }
        selection
    }

    fn primary(actions: &[TableAction]) -> Option<TableActionKind> {
        actions.iter().find(|a| a.primary).map(|a| a.kind)
    }

    #[test]
    fn test_url_builder() {
        let urls = UrlBuilder::RGW_USER;
        assert_eq!(urls.create(), "/rgw/user/create");
        assert_eq!(urls.edit("tenant$alice"), "/rgw/user/edit/tenant%24alice");
    }

    #[test]
    fn test_primary_follows_selection() {
        let all = RgwPermission::ALL;
        assert_eq!(
            primary(&TableAction::for_selection(&selection(&[]), all)),
            Some(TableActionKind::Create)
        );
        assert_eq!(
            primary(&TableAction::for_selection(&selection(&["a"]), all)),
            Some(TableActionKind::Edit)
        );
        assert_eq!(
            primary(&TableAction::for_selection(&selection(&["a", "b"]), all)),
            Some(TableActionKind::Delete)
        );
    }

    #[test]
    fn test_disabled_without_selection() {
        let actions = TableAction::for_selection(&selection(&[]), RgwPermission::ALL);
        let disabled: Vec<_> = actions.iter().map(|a| (a.kind, a.disabled)).collect();
        assert_eq!(
            disabled,
            [
                (TableActionKind::Create, false),
                (TableActionKind::Edit, true),
                (TableActionKind::Delete, true)
            ]
        );
    }

    #[test]
    fn test_permissions_filter_actions() {
        let read_only = RgwPermission {
            read: true,
            ..RgwPermission::NONE
        };
        assert!(TableAction::for_selection(&selection(&["a"]), read_only).is_empty());

        let delete_only = RgwPermission {
            delete: true,
            ..RgwPermission::NONE
        };
        let actions = TableAction::for_selection(&selection(&["a"]), delete_only);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, TableActionKind::Delete);
        assert!(actions[0].primary, "only offered action falls back to primary");
    }

    #[test]
    fn test_edit_route_uses_first_selected() {
        let actions = TableAction::for_selection(&selection(&["a b", "c"]), RgwPermission::ALL);
        let edit = actions
            .iter()
            .find(|a| a.kind == TableActionKind::Edit)
            .unwrap();
        assert_eq!(edit.route.as_deref(), Some("/rgw/user/edit/a%20b"));
    }
}
