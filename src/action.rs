use rust_decimal::Decimal;
use strum::Display;

use crate::domain::records::{BankAccount, BankTransaction, Transaction, Wallet};
use crate::domain::session::{Identity, Route};
use crate::infra::backend::DataError;

/// Severity of a transient notice shown in the notice stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A transient user-facing notice. The app stamps an expiry when it
/// enters the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// The three dashboard fetches, delivered together. Each section carries
/// its own result so one failure never blanks the others.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardBatch {
    pub transactions: Result<Vec<Transaction>, DataError>,
    pub bank_accounts: Result<Vec<BankAccount>, DataError>,
    pub wallet: Result<Wallet, DataError>,
}

#[derive(Debug, Clone, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    Navigate(Route),
    ToggleTheme,
    SubmitLogin,
    LoginSucceeded(Identity),
    LoginFailed(String),
    Logout,
    LoadDashboard,
    DashboardLoaded {
        generation: u64,
        batch: DashboardBatch,
    },
    CheckBankBalance,
    BankBalancesRefreshed {
        generation: u64,
    },
    CloseBankPanel,
    SelectBankAccount(u64),
    BankTransactionsLoaded {
        account_id: u64,
        result: Result<Vec<BankTransaction>, DataError>,
    },
    SendPayment {
        recipient: String,
        amount: Decimal,
    },
    RequestPayment {
        recipient: String,
        amount: Decimal,
    },
    Notify(Notice),
}
