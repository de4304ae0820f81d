// Split-Bill Form - bill total + user's share + payer in, signed delta out
//
// Sign convention follows the friend's balance:
//   user paid   → friend owes their share → +friend_expense
//   friend paid → user owes their share   → -user_expense

/// Who covered the bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn toggle(&self) -> Self {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitBillField {
    BillTotal,
    UserExpense,
    Payer,
}

impl SplitBillField {
    pub fn next(&self) -> Self {
        match self {
            SplitBillField::BillTotal => SplitBillField::UserExpense,
            SplitBillField::UserExpense => SplitBillField::Payer,
            SplitBillField::Payer => SplitBillField::BillTotal,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            SplitBillField::BillTotal => SplitBillField::Payer,
            SplitBillField::UserExpense => SplitBillField::BillTotal,
            SplitBillField::Payer => SplitBillField::UserExpense,
        }
    }
}

/// Parse user-entered amount text. Blank, non-numeric and non-finite
/// input all count as empty.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A numeric text field: the text as typed plus its parsed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountInput {
    text: String,
    value: Option<f64>,
}

impl AmountInput {
    /// Accept `input` if it parses, otherwise fall back to empty.
    fn coerce(input: &str) -> Self {
        match parse_amount(input) {
            Some(value) => AmountInput {
                text: input.trim().to_string(),
                value: Some(value),
            },
            None => AmountInput::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Zero counts as missing, matching the submit guard.
    fn nonzero(&self) -> Option<f64> {
        self.value.filter(|v| *v != 0.0)
    }
}

/// Local state of the split-bill form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitBillForm {
    bill_total: AmountInput,
    user_expense: AmountInput,
    payer: Payer,
}

impl SplitBillForm {
    pub fn bill_total(&self) -> &AmountInput {
        &self.bill_total
    }

    pub fn user_expense(&self) -> &AmountInput {
        &self.user_expense
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn set_bill_total(&mut self, input: &str) {
        // NOTE: lowering the bill does not re-clamp user_expense, so
        // user_expense > bill_total stays reachable.
        self.bill_total = AmountInput::coerce(input);
    }

    /// Values above the current bill total are rejected and the previous
    /// value kept. An empty bill counts as 0 for this check.
    pub fn set_user_expense(&mut self, input: &str) {
        let candidate = AmountInput::coerce(input);
        if let Some(value) = candidate.value {
            if value > self.bill_total.value.unwrap_or(0.0) {
                return;
            }
        }
        self.user_expense = candidate;
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    /// The friend's share. Empty while the bill is empty or zero.
    pub fn friend_expense(&self) -> Option<f64> {
        let bill = self.bill_total.nonzero()?;
        Some(bill - self.user_expense.value.unwrap_or(0.0))
    }

    /// Signed balance adjustment for the selected friend, or `None` when
    /// either amount is missing.
    pub fn submit(&self) -> Option<f64> {
        let bill = self.bill_total.nonzero()?;
        let user_expense = self.user_expense.nonzero()?;

        let delta = match self.payer {
            Payer::User => bill - user_expense,
            Payer::Friend => -user_expense,
        };
        Some(delta)
    }
}
