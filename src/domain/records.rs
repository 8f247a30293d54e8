//! Record types shared by the mock and remote data backends.
//!
//! Field renames follow the record API table schemas (`Id`, `Name`,
//! `type`, ...), so the same types serve as wire shapes for the remote
//! backend and as plain values for the mock one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::money::format_usd;

/// Direction of an in-app wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Direction of a bank ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BankDirection {
    Credit,
    Debit,
}

/// An in-app wallet transaction. Immutable once created; the signed
/// amount always agrees with the direction field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Id")]
    pub id: u64,
    /// Counterparty display name.
    #[serde(rename = "Name")]
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub direction: Direction,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Transaction {
    /// Build a transaction from an unsigned magnitude, applying the sign
    /// implied by the direction.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        magnitude: Decimal,
        date: NaiveDate,
        direction: Direction,
    ) -> Self {
        let amount = match direction {
            Direction::Incoming => magnitude.abs(),
            Direction::Outgoing => -magnitude.abs(),
        };
        Self {
            id,
            name: name.into(),
            amount,
            date,
            direction,
            avatar: None,
        }
    }

    /// Whether the amount's sign agrees with the direction field.
    pub fn sign_matches_direction(&self) -> bool {
        match self.direction {
            Direction::Incoming => self.amount >= Decimal::ZERO,
            Direction::Outgoing => self.amount <= Decimal::ZERO,
        }
    }

    /// `+$120.00` / `-$25.99` style display amount.
    pub fn display_amount(&self) -> String {
        match self.direction {
            Direction::Incoming => format!("+{}", format_usd(self.amount.abs())),
            Direction::Outgoing => format!("-{}", format_usd(self.amount.abs())),
        }
    }

    /// Short display date, e.g. `Apr 12`.
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Creation payload for a wallet transaction; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "Name")]
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub direction: Direction,
}

/// The application's own balance record, one per identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    pub balance: Decimal,
    #[serde(rename = "Owner", default)]
    pub owner: Option<String>,
}

/// Creation payload for a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWallet {
    #[serde(rename = "Name")]
    pub name: String,
    pub balance: Decimal,
}

/// An externally-linked bank account, distinct from the in-app wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(rename = "Id")]
    pub id: u64,
    pub bank_name: String,
    pub account_type: String,
    /// Masked, e.g. `****4567`.
    pub account_number: String,
    pub balance: Decimal,
    #[serde(default)]
    pub color: Option<String>,
}

/// Creation payload for a bank account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBankAccount {
    pub bank_name: String,
    pub account_type: String,
    pub account_number: String,
    pub balance: Decimal,
}

/// A ledger entry of a linked bank account. The amount is an unsigned
/// magnitude; the direction says which way it moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    #[serde(rename = "Id")]
    pub id: u64,
    pub merchant: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub direction: BankDirection,
    pub date: NaiveDate,
    pub bank_account: u64,
}

impl BankTransaction {
    /// `+$12.45` / `-$78.35` style display amount.
    pub fn display_amount(&self) -> String {
        match self.direction {
            BankDirection::Credit => format!("+{}", format_usd(self.amount)),
            BankDirection::Debit => format!("-{}", format_usd(self.amount)),
        }
    }

    /// Long display date, e.g. `Aug 12, 2023`.
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }
}

/// Creation payload for a bank transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBankTransaction {
    pub merchant: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub direction: BankDirection,
    pub date: NaiveDate,
    pub bank_account: u64,
}

/// Card network branding for the demo cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Debit,
}

/// A payment card shown on the cards tab. Purely presentational demo
/// data; card management is a placeholder feature.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCard {
    pub id: u64,
    pub name: String,
    pub last4: String,
    pub network: CardNetwork,
}

impl PaymentCard {
    /// The three seeded demo cards.
    pub fn demo_set() -> Vec<PaymentCard> {
        vec![
            PaymentCard {
                id: 1,
                name: "PayWave Visa".to_string(),
                last4: "4567".to_string(),
                network: CardNetwork::Visa,
            },
            PaymentCard {
                id: 2,
                name: "PayWave Mastercard".to_string(),
                last4: "8901".to_string(),
                network: CardNetwork::Mastercard,
            },
            PaymentCard {
                id: 3,
                name: "PayWave Debit".to_string(),
                last4: "2345".to_string(),
                network: CardNetwork::Debit,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn constructor_signs_amount_by_direction() {
        let incoming = Transaction::new(
            1,
            "Michael Roberts",
            "120".parse().unwrap(),
            date(2023, 4, 8),
            Direction::Incoming,
        );
        assert!(incoming.amount > Decimal::ZERO);
        assert!(incoming.sign_matches_direction());

        let outgoing = Transaction::new(
            2,
            "Coffee Shop",
            "4.50".parse().unwrap(),
            date(2023, 4, 10),
            Direction::Outgoing,
        );
        assert!(outgoing.amount < Decimal::ZERO);
        assert!(outgoing.sign_matches_direction());
    }

    #[test]
    fn display_amount_uses_magnitude_with_sign_prefix() {
        let tx = Transaction::new(
            1,
            "Sarah Johnson",
            "25.99".parse().unwrap(),
            date(2023, 4, 12),
            Direction::Outgoing,
        );
        assert_eq!(tx.display_amount(), "-$25.99");
        assert_eq!(tx.display_date(), "Apr 12");
    }

    #[test]
    fn bank_transaction_display() {
        let tx = BankTransaction {
            id: 103,
            merchant: "Salary Deposit".to_string(),
            amount: "2500".parse().unwrap(),
            direction: BankDirection::Credit,
            date: date(2023, 8, 1),
            bank_account: 1,
        };
        assert_eq!(tx.display_amount(), "+$2,500.00");
        assert_eq!(tx.display_date(), "Aug 1, 2023");
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Direction::Incoming).unwrap(),
            "\"incoming\""
        );
        assert_eq!(
            serde_json::to_string(&BankDirection::Debit).unwrap(),
            "\"debit\""
        );
    }
}
