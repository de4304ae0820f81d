// Display helpers shared by the terminal UI and the exit summary

use crate::entities::{BalanceStatus, Friend};

/// Whole amounts print without decimals, everything else with two.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Tone of a balance line, mapped to a color by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Negative,
    Positive,
    Neutral,
}

/// The balance line shown under a friend's name.
pub fn balance_message(friend: &Friend, currency: &str) -> (String, Tone) {
    match friend.status() {
        BalanceStatus::UserOwes(amount) => (
            format!("You owe {} {}{}", friend.name, currency, format_amount(amount)),
            Tone::Negative,
        ),
        BalanceStatus::FriendOwes(amount) => (
            format!("{} owes you {}{}", friend.name, currency, format_amount(amount)),
            Tone::Positive,
        ),
        BalanceStatus::Even => (format!("You and {} are even", friend.name), Tone::Neutral),
    }
}
