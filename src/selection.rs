// Selection State - at most one friend is being split-billed at a time

use crate::entities::FriendId;

/// The friend currently selected for a bill split, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(FriendId),
}

impl Selection {
    /// Select `id`, or clear the selection when `id` is already selected.
    pub fn select(&mut self, id: FriendId) {
        *self = match self {
            Selection::Selected(current) if *current == id => Selection::None,
            _ => Selection::Selected(id),
        };
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    pub fn selected(&self) -> Option<&FriendId> {
        match self {
            Selection::Selected(id) => Some(id),
            Selection::None => None,
        }
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selected() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sets_selection() {
        let mut selection = Selection::default();
        selection.select(FriendId::new("a"));

        assert_eq!(selection, Selection::Selected(FriendId::new("a")));
        assert!(selection.is_selected(&FriendId::new("a")));
    }

    #[test]
    fn test_select_same_twice_toggles_off() {
        let mut selection = Selection::default();
        selection.select(FriendId::new("a"));
        selection.select(FriendId::new("a"));

        assert_eq!(selection, Selection::None);
    }

    #[test]
    fn test_select_other_switches() {
        let mut selection = Selection::Selected(FriendId::new("a"));
        selection.select(FriendId::new("b"));

        assert_eq!(selection.selected(), Some(&FriendId::new("b")));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::Selected(FriendId::new("a"));
        selection.clear();

        assert!(selection.selected().is_none());
    }
}
