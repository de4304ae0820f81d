// Form state for the two input panels. Each form keeps its own fields
// and turns a submission into either a new Friend or a balance delta.

pub mod add_friend;
pub mod split_bill;

pub use add_friend::{AddFriendField, AddFriendForm};
pub use split_bill::{parse_amount, AmountInput, Payer, SplitBillField, SplitBillForm};
