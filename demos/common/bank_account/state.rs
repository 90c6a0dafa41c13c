#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankAccountState {
    pub account_number: Option<String>,
    pub deposits: i64,
    pub withdrawals: i64,
}

impl BankAccountState {
    pub fn opened(account_number: String) -> Self {
        Self {
            account_number: Some(account_number),
            ..Self::default()
        }
    }

    pub fn add_amount(self, amount: i64) -> Self {
        Self {
            deposits: self.deposits + amount,
            ..self
        }
    }

    pub fn sub_amount(self, amount: i64) -> Self {
        Self {
            withdrawals: self.withdrawals + amount,
            ..self
        }
    }

    pub fn balance(&self) -> i64 {
        self.deposits - self.withdrawals
    }
}
