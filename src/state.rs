// Root Controller - owns the directory, the selection and both forms
//
// All changes go through `update(state, event) -> state`, so the whole
// app can be driven and checked without a terminal.

use crate::entities::{Friend, FriendDirectory, FriendId, IdGenerator, DEFAULT_AVATAR_URL};
use crate::forms::{AddFriendField, AddFriendForm, Payer, SplitBillForm};
use crate::selection::Selection;
use serde::Serialize;
use tracing::{debug, info};

/// Edits coming from the split-bill form
#[derive(Debug, Clone, PartialEq)]
pub enum SplitBillInput {
    BillTotal(String),
    UserExpense(String),
    Payer(Payer),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Flip the add-friend form open/closed
    ToggleAddForm,
    /// A finished friend from the add-friend form
    FriendAdded(Friend),
    /// A friend row's Select/Close button
    FriendSelected(FriendId),
    /// A signed delta for the selected friend
    BillSplit(f64),
    /// New text for one add-friend field
    AddForm(AddFriendField, String),
    SplitForm(SplitBillInput),
}

/// Totals across the whole directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerTotals {
    /// Sum of positive balances
    pub owed_to_you: f64,
    /// Sum of negative balances, as a positive amount
    pub you_owe: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub friends: FriendDirectory,
    pub selection: Selection,
    pub is_add_form_open: bool,
    pub add_form: AddFriendForm,
    pub split_form: SplitBillForm,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(FriendDirectory::default(), DEFAULT_AVATAR_URL)
    }
}

impl AppState {
    pub fn new(friends: FriendDirectory, avatar_base_url: &str) -> Self {
        AppState {
            friends,
            selection: Selection::None,
            is_add_form_open: false,
            add_form: AddFriendForm::new(avatar_base_url),
            split_form: SplitBillForm::default(),
        }
    }

    /// Split form shows only with a friend selected and the add form closed.
    pub fn split_form_visible(&self) -> bool {
        self.selection.selected().is_some() && !self.is_add_form_open
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection.selected().and_then(|id| self.friends.get(id))
    }

    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(self);
        *self = update(state, event);
    }

    /// Submit the add-friend form. Returns whether a friend was added.
    pub fn submit_add_friend(&mut self, ids: &mut dyn IdGenerator) -> bool {
        if !self.is_add_form_open {
            return false;
        }
        match self.add_form.submit(ids) {
            Some(friend) => {
                self.dispatch(Event::FriendAdded(friend));
                true
            }
            None => false,
        }
    }

    /// Submit the split-bill form. Returns whether a balance changed.
    pub fn submit_split_bill(&mut self) -> bool {
        if !self.split_form_visible() {
            return false;
        }
        match self.split_form.submit() {
            Some(delta) => {
                self.dispatch(Event::BillSplit(delta));
                true
            }
            None => false,
        }
    }

    pub fn ledger_totals(&self) -> LedgerTotals {
        let mut totals = LedgerTotals::default();

        for friend in self.friends.iter() {
            if friend.balance > 0.0 {
                totals.owed_to_you += friend.balance;
            } else {
                totals.you_owe -= friend.balance;
            }
        }

        totals.net = totals.owed_to_you - totals.you_owe;
        totals
    }
}

/// Apply one event and return the next state.
pub fn update(mut state: AppState, event: Event) -> AppState {
    match event {
        Event::ToggleAddForm => {
            state.is_add_form_open = !state.is_add_form_open;
            debug!(open = state.is_add_form_open, "add-friend form toggled");
        }
        Event::FriendAdded(friend) => {
            info!(id = %friend.id, name = %friend.name, "friend added");
            state.friends.append(friend);
            state.is_add_form_open = false;
        }
        Event::FriendSelected(id) => {
            if state.friends.contains(&id) {
                state.selection.select(id);
                state.is_add_form_open = false;
                debug!(selected = ?state.selection.selected(), "selection changed");
            }
        }
        Event::BillSplit(delta) => {
            if let Some(id) = state.selection.selected().cloned() {
                if state.friends.update_balance(&id, delta) {
                    info!(id = %id, delta, "bill split");
                }
                state.selection.clear();
            }
        }
        Event::AddForm(field, value) => {
            state.add_form.set(field, value);
        }
        Event::SplitForm(input) => match input {
            SplitBillInput::BillTotal(text) => state.split_form.set_bill_total(&text),
            SplitBillInput::UserExpense(text) => state.split_form.set_user_expense(&text),
            SplitBillInput::Payer(payer) => state.split_form.set_payer(payer),
        },
    }

    // Hidden forms lose their fields
    if !state.is_add_form_open {
        state.add_form.reset();
    }
    if !state.split_form_visible() {
        state.split_form = SplitBillForm::default();
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sequential(u32);

    impl IdGenerator for Sequential {
        fn next_id(&mut self) -> FriendId {
            self.0 += 1;
            FriendId::new(format!("friend-{}", self.0))
        }
    }

    fn sarah() -> FriendId {
        FriendId::new("933372")
    }

    fn seeded() -> AppState {
        AppState::new(FriendDirectory::seeded(), DEFAULT_AVATAR_URL)
    }

    fn add_friend(state: &mut AppState, ids: &mut Sequential, name: &str, url: &str) -> bool {
        if !state.is_add_form_open {
            state.dispatch(Event::ToggleAddForm);
        }
        state.dispatch(Event::AddForm(AddFriendField::Name, name.into()));
        state.dispatch(Event::AddForm(AddFriendField::AvatarUrl, url.into()));
        state.submit_add_friend(ids)
    }

    fn fill_split(state: &mut AppState, bill: &str, user: &str, payer: Payer) {
        state.dispatch(Event::SplitForm(SplitBillInput::BillTotal(bill.into())));
        state.dispatch(Event::SplitForm(SplitBillInput::UserExpense(user.into())));
        state.dispatch(Event::SplitForm(SplitBillInput::Payer(payer)));
    }

    #[test]
    fn test_toggle_add_form_only_flips_flag() {
        let state = update(seeded(), Event::ToggleAddForm);

        assert!(state.is_add_form_open);
        assert_eq!(state.friends, FriendDirectory::seeded());
        assert_eq!(state.selection, Selection::None);

        let state = update(state, Event::ToggleAddForm);
        assert!(!state.is_add_form_open);
    }

    #[test]
    fn test_each_add_appends_one_unique_friend() {
        let mut state = seeded();
        let mut ids = Sequential(0);

        for (i, name) in ["Ann", "Ben", "Cal"].iter().enumerate() {
            assert!(add_friend(&mut state, &mut ids, name, "https://i.pravatar.cc/48"));
            assert_eq!(state.friends.len(), 4 + i);
            assert!(!state.is_add_form_open);
        }

        let added = &state.friends.as_slice()[3..];
        assert!(added.iter().all(|f| f.balance == 0.0));
        let unique: std::collections::HashSet<&FriendId> = added.iter().map(|f| &f.id).collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_add_with_blank_fields_leaves_directory() {
        let mut state = seeded();
        let mut ids = Sequential(0);

        assert!(!add_friend(&mut state, &mut ids, "", "https://i.pravatar.cc/48"));
        assert!(!add_friend(&mut state, &mut ids, "Dee", ""));

        assert_eq!(state.friends, FriendDirectory::seeded());
        assert!(state.is_add_form_open);
    }

    #[test]
    fn test_closing_add_form_resets_fields() {
        let mut state = seeded();
        state.dispatch(Event::ToggleAddForm);
        state.dispatch(Event::AddForm(AddFriendField::Name, "Half".into()));
        state.dispatch(Event::ToggleAddForm);

        assert_eq!(state.add_form.name(), "");
    }

    #[test]
    fn test_select_closes_add_form_and_toggles() {
        let mut state = seeded();
        state.dispatch(Event::ToggleAddForm);
        state.dispatch(Event::FriendSelected(sarah()));

        assert!(!state.is_add_form_open);
        assert_eq!(state.selected_friend().map(|f| f.name.as_str()), Some("Sarah"));

        state.dispatch(Event::FriendSelected(sarah()));
        assert_eq!(state.selection, Selection::None);
    }

    #[test]
    fn test_select_unknown_friend_ignored() {
        let state = update(seeded(), Event::FriendSelected(FriendId::new("ghost")));

        assert_eq!(state.selection, Selection::None);
    }

    #[test]
    fn test_split_user_pays() {
        let mut state = seeded();
        state.dispatch(Event::FriendSelected(sarah()));
        fill_split(&mut state, "100", "40", Payer::User);

        assert!(state.submit_split_bill());
        assert_eq!(state.friends.get(&sarah()).unwrap().balance, 80.0);
        assert_eq!(state.selection, Selection::None);
        assert_eq!(state.split_form, SplitBillForm::default());
    }

    #[test]
    fn test_split_friend_pays_after_reselect() {
        let mut state = seeded();
        state.dispatch(Event::FriendSelected(sarah()));
        fill_split(&mut state, "100", "40", Payer::User);
        state.submit_split_bill();

        state.dispatch(Event::FriendSelected(sarah()));
        fill_split(&mut state, "100", "40", Payer::Friend);

        assert!(state.submit_split_bill());
        assert_eq!(state.friends.get(&sarah()).unwrap().balance, 40.0);
    }

    #[test]
    fn test_split_with_missing_amount_keeps_everything() {
        let mut state = seeded();
        state.dispatch(Event::FriendSelected(sarah()));
        fill_split(&mut state, "100", "", Payer::User);

        assert!(!state.submit_split_bill());
        assert_eq!(state.friends, FriendDirectory::seeded());
        assert!(state.selection.is_selected(&sarah()));

        state.dispatch(Event::SplitForm(SplitBillInput::BillTotal(String::new())));
        assert!(!state.submit_split_bill());
        assert!(state.selection.is_selected(&sarah()));
    }

    #[test]
    fn test_user_expense_above_bill_unchanged() {
        let mut state = seeded();
        state.dispatch(Event::FriendSelected(sarah()));
        fill_split(&mut state, "100", "40", Payer::User);
        state.dispatch(Event::SplitForm(SplitBillInput::UserExpense("101".into())));

        assert_eq!(state.split_form.user_expense().value(), Some(40.0));
    }

    #[test]
    fn test_split_form_visibility_follows_add_form() {
        let mut state = seeded();
        state.dispatch(Event::FriendSelected(sarah()));
        assert!(state.split_form_visible());

        state.dispatch(Event::ToggleAddForm);
        assert!(!state.split_form_visible());
        assert!(state.selection.is_selected(&sarah()));

        state.dispatch(Event::ToggleAddForm);
        assert!(state.split_form_visible());
    }

    #[test]
    fn test_bill_split_without_selection_is_noop() {
        let state = update(seeded(), Event::BillSplit(25.0));

        assert_eq!(state.friends, FriendDirectory::seeded());
    }

    #[test]
    fn test_ledger_totals() {
        let totals = seeded().ledger_totals();

        assert_eq!(totals.owed_to_you, 20.0);
        assert_eq!(totals.you_owe, 7.0);
        assert_eq!(totals.net, 13.0);
    }
}
