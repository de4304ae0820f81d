// Entity Models
//
// A friend has a stable identity (generated once, never changes) and a
// balance that is the only mutable value.

pub mod friend;

pub use friend::{
    avatar_image, BalanceStatus, Friend, FriendDirectory, FriendId, IdGenerator, UuidGenerator,
    DEFAULT_AVATAR_URL,
};
