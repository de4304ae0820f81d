// Eat-N-Split - Core Library
// Friend ledger, form state and the pure state transitions behind the TUI

pub mod entities;
pub mod selection;
pub mod forms;
pub mod state;
pub mod config;
pub mod format;

// Re-export commonly used types
pub use entities::{
    BalanceStatus, Friend, FriendDirectory, FriendId, IdGenerator, UuidGenerator,
    DEFAULT_AVATAR_URL,
};
pub use selection::Selection;
pub use forms::{
    parse_amount, AddFriendField, AddFriendForm, AmountInput, Payer, SplitBillField,
    SplitBillForm,
};
pub use state::{update, AppState, Event, LedgerTotals, SplitBillInput};
pub use config::Config;
pub use format::{balance_message, format_amount, Tone};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
