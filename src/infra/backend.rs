//! The uniform record store contract shared by the mock and remote
//! backends.
//!
//! Every operation is asynchronous and single-shot: no retry, no
//! caching. Backends log transport failures and propagate them as
//! [`DataError`]; callers own the user-facing presentation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use strum::Display;
use thiserror::Error;

use crate::domain::records::{
    BankAccount, BankDirection, BankTransaction, Direction, NewBankAccount, NewBankTransaction,
    NewTransaction, NewWallet, Transaction, Wallet,
};

/// Record tables served by a backend. The display form is the remote
/// API table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
    Transaction,
    BankAccount,
    BankTransaction,
    Wallet,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("{0} store reported a non-success response")]
    NotSuccessful(Entity),
    #[error("record id is required for update")]
    MissingId,
    #[error("unexpected response shape: {0}")]
    BadResponse(String),
}

pub type DataResult<T> = Result<T, DataError>;

/// Equality predicates a fetch filter may carry (at most two).
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Direction(Direction),
    BankDirection(BankDirection),
    AccountType(String),
    BankAccountId(u64),
}

/// Pagination plus equality predicates for fetch operations.
///
/// Results are ordered by each entity's documented default: date
/// descending for transactional entities, balance descending for
/// accounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub limit: Option<usize>,
    pub offset: usize,
    pub predicates: Vec<Predicate>,
}

impl Filter {
    /// The most recent `limit` records under the default ordering.
    pub fn latest(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// All ledger entries of one bank account.
    pub fn for_bank_account(id: u64) -> Self {
        Self {
            predicates: vec![Predicate::BankAccountId(id)],
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}

/// Uniform asynchronous record access, one method set per entity.
///
/// Fetches return an empty `Vec` (never an error) when nothing matches.
/// Create and update fail with [`DataError::NotSuccessful`] when the
/// underlying store reports non-success.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_transactions(&self, filter: Filter) -> DataResult<Vec<Transaction>>;
    async fn create_transaction(&self, new: NewTransaction) -> DataResult<Transaction>;
    async fn get_transaction(&self, id: u64) -> DataResult<Option<Transaction>>;
    async fn update_transaction(&self, record: Transaction) -> DataResult<Transaction>;
    async fn delete_transaction(&self, id: u64) -> DataResult<bool>;

    async fn fetch_bank_accounts(&self, filter: Filter) -> DataResult<Vec<BankAccount>>;
    async fn create_bank_account(&self, new: NewBankAccount) -> DataResult<BankAccount>;
    async fn get_bank_account(&self, id: u64) -> DataResult<Option<BankAccount>>;
    async fn update_bank_account(&self, record: BankAccount) -> DataResult<BankAccount>;
    async fn delete_bank_account(&self, id: u64) -> DataResult<bool>;

    async fn fetch_bank_transactions(&self, filter: Filter) -> DataResult<Vec<BankTransaction>>;
    async fn create_bank_transaction(
        &self,
        new: NewBankTransaction,
    ) -> DataResult<BankTransaction>;
    async fn get_bank_transaction(&self, id: u64) -> DataResult<Option<BankTransaction>>;
    async fn update_bank_transaction(&self, record: BankTransaction) -> DataResult<BankTransaction>;
    async fn delete_bank_transaction(&self, id: u64) -> DataResult<bool>;

    /// The wallet is a singleton per identity; `None` means it has not
    /// been created yet.
    async fn fetch_wallet(&self) -> DataResult<Option<Wallet>>;
    async fn create_wallet(&self, new: NewWallet) -> DataResult<Wallet>;
    async fn update_wallet(&self, record: Wallet) -> DataResult<Wallet>;
}

/// Seed balance for a lazily created wallet.
pub fn default_seed_balance() -> Decimal {
    Decimal::new(1_000, 0)
}

/// Fetch the wallet, creating it with the default seed balance when it
/// does not exist yet. Creation is strictly sequenced after the fetch.
pub async fn fetch_or_create_wallet(
    records: &dyn RecordStore,
    owner_name: Option<&str>,
) -> DataResult<Wallet> {
    if let Some(wallet) = records.fetch_wallet().await? {
        return Ok(wallet);
    }
    let name = match owner_name {
        Some(first_name) => format!("{}'s Wallet", first_name),
        None => "My Wallet".to_string(),
    };
    records
        .create_wallet(NewWallet {
            name,
            balance: default_seed_balance(),
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_display_matches_table_names() {
        assert_eq!(Entity::Transaction.to_string(), "transaction");
        assert_eq!(Entity::BankAccount.to_string(), "bank_account");
        assert_eq!(Entity::BankTransaction.to_string(), "bank_transaction");
        assert_eq!(Entity::Wallet.to_string(), "wallet");
    }

    #[test]
    fn filter_builders() {
        let filter = Filter::latest(4);
        assert_eq!(filter.limit, Some(4));
        assert_eq!(filter.offset, 0);
        assert!(filter.predicates.is_empty());

        let filter = Filter::for_bank_account(2).with_offset(10);
        assert_eq!(filter.offset, 10);
        assert_eq!(filter.predicates, vec![Predicate::BankAccountId(2)]);
    }
}
