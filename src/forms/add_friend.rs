// Add-Friend Form - name + avatar URL in, settled Friend out

use crate::entities::{Friend, IdGenerator, DEFAULT_AVATAR_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFriendField {
    Name,
    AvatarUrl,
}

impl AddFriendField {
    pub fn next(&self) -> Self {
        match self {
            AddFriendField::Name => AddFriendField::AvatarUrl,
            AddFriendField::AvatarUrl => AddFriendField::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddFriendField::Name => "Friend name",
            AddFriendField::AvatarUrl => "Image URL",
        }
    }
}

/// Local state of the add-friend form.
#[derive(Debug, Clone, PartialEq)]
pub struct AddFriendForm {
    name: String,
    avatar_url: String,
    default_avatar_url: String,
}

impl Default for AddFriendForm {
    fn default() -> Self {
        AddFriendForm::new(DEFAULT_AVATAR_URL)
    }
}

impl AddFriendForm {
    /// Empty name, avatar URL pre-filled with `default_avatar_url`.
    pub fn new(default_avatar_url: impl Into<String>) -> Self {
        let default_avatar_url = default_avatar_url.into();

        AddFriendForm {
            name: String::new(),
            avatar_url: default_avatar_url.clone(),
            default_avatar_url,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    pub fn value(&self, field: AddFriendField) -> &str {
        match field {
            AddFriendField::Name => &self.name,
            AddFriendField::AvatarUrl => &self.avatar_url,
        }
    }

    pub fn set(&mut self, field: AddFriendField, value: impl Into<String>) {
        match field {
            AddFriendField::Name => self.name = value.into(),
            AddFriendField::AvatarUrl => self.avatar_url = value.into(),
        }
    }

    /// Back to an empty name and the default avatar URL.
    pub fn reset(&mut self) {
        self.name.clear();
        self.avatar_url = self.default_avatar_url.clone();
    }

    /// Build a new friend from the fields and reset the form.
    ///
    /// Returns `None`, leaving the fields untouched, when the name or the
    /// avatar URL is empty. Fields are used exactly as typed.
    pub fn submit(&mut self, ids: &mut dyn IdGenerator) -> Option<Friend> {
        if self.name.is_empty() || self.avatar_url.is_empty() {
            return None;
        }

        let friend = Friend::new(ids.next_id(), self.name.as_str(), &self.avatar_url);
        self.reset();
        Some(friend)
    }
}
