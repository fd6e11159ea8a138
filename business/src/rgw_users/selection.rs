use ustr::Ustr;

/// Uids selected in the users table, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<Ustr>,
}

impl Selection {
    pub fn selected(&self) -> &[Ustr] {
        &self.selected
    }

    pub fn contains(&self, uid: Ustr) -> bool {
        self.selected.contains(&uid)
    }

    pub fn select(&mut self, uid: Ustr) {
        if !self.contains(uid) {
            self.selected.push(uid);
        }
    }

    pub fn deselect(&mut self, uid: Ustr) {
        self.selected.retain(|selected| *selected != uid);
    }

    pub fn toggle(&mut self, uid: Ustr) {
        if self.contains(uid) {
            self.deselect(uid);
        } else {
            self.select(uid);
        }
    }

    /// Drops every uid in `removed`. Returns whether anything changed.
    pub fn remove_all(&mut self, removed: &[Ustr]) -> bool {
        let before = self.selected.len();
        self.selected.retain(|uid| !removed.contains(uid));
        before != self.selected.len()
    }

    pub fn first(&self) -> Option<Ustr> {
        self.selected.first().copied()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn has_single_selection(&self) -> bool {
        self.selected.len() == 1
    }

    pub fn has_multi_selection(&self) -> bool {
        self.selected.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> Ustr {
        Ustr::from(s)
    }

    #[test]
    fn test_toggle_keeps_pick_order() {
        let mut selection = Selection::default();
        selection.toggle(uid("bob"));
        selection.toggle(uid("alice"));
        selection.toggle(uid("bob"));
        selection.toggle(uid("carol"));

        assert_eq!(selection.selected(), [uid("alice"), uid("carol")]);
        assert_eq!(selection.first(), Some(uid("alice")));
    }

    #[test]
    fn test_selection_cardinality() {
        let mut selection = Selection::default();
        assert!(!selection.has_selection());

        selection.select(uid("alice"));
        selection.select(uid("alice"));
        assert!(selection.has_single_selection());
        assert!(!selection.has_multi_selection());

        selection.select(uid("bob"));
        assert!(selection.has_multi_selection());
    }

    #[test]
    fn test_remove_all() {
        let mut selection = Selection::default();
        selection.select(uid("alice"));
        selection.select(uid("bob"));

        assert!(selection.remove_all(&[uid("bob"), uid("zed")]));
        assert_eq!(selection.selected(), [uid("alice")]);
        assert!(!selection.remove_all(&[uid("bob")]));
    }
}
