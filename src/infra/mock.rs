//! In-memory record backend with simulated latency.
//!
//! Serves the same contract as the remote record API from seeded demo
//! data, keyed by a small fixed set of bank account ids. Tests can zero
//! out the latency and inject per-entity outages.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::domain::records::{
    BankAccount, BankDirection, BankTransaction, Direction, NewBankAccount, NewBankTransaction,
    NewTransaction, NewWallet, Transaction, Wallet,
};

use super::backend::{DataError, DataResult, Entity, Filter, Predicate, RecordStore};

/// Default artificial latency applied to every operation.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

struct State {
    transactions: Vec<Transaction>,
    bank_accounts: Vec<BankAccount>,
    bank_transactions: Vec<BankTransaction>,
    wallet: Option<Wallet>,
    next_id: u64,
}

pub struct MockBackend {
    state: Mutex<State>,
    failures: Mutex<HashSet<Entity>>,
    latency: Duration,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: Mutex::new(seed_state()),
            failures: Mutex::new(HashSet::new()),
            latency,
        }
    }

    /// Make every operation on `entity` fail until cleared.
    pub fn set_failing(&self, entity: Entity, failing: bool) {
        let mut failures = self.failures.lock().expect("failures lock");
        if failing {
            failures.insert(entity);
        } else {
            failures.remove(&entity);
        }
    }

    async fn begin(&self, entity: Entity) -> DataResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failures.lock().expect("failures lock").contains(&entity) {
            let err = DataError::Transport(format!("simulated {} outage", entity));
            error!("Mock backend error: {}", err);
            return Err(err);
        }
        debug!("Mock backend serving {}", entity);
        Ok(())
    }

    fn next_id(state: &mut State) -> u64 {
        let id = state.next_id;
        state.next_id += 1;
        id
    }
}

fn paginate<T>(mut items: Vec<T>, filter: &Filter) -> Vec<T> {
    let offset = filter.offset.min(items.len());
    items.drain(..offset);
    if let Some(limit) = filter.limit {
        items.truncate(limit);
    }
    items
}

fn transaction_matches(tx: &Transaction, filter: &Filter) -> bool {
    filter.predicates.iter().all(|p| match p {
        Predicate::Direction(direction) => tx.direction == *direction,
        _ => true,
    })
}

fn bank_account_matches(account: &BankAccount, filter: &Filter) -> bool {
    filter.predicates.iter().all(|p| match p {
        Predicate::AccountType(account_type) => account.account_type == *account_type,
        _ => true,
    })
}

fn bank_transaction_matches(tx: &BankTransaction, filter: &Filter) -> bool {
    filter.predicates.iter().all(|p| match p {
        Predicate::BankAccountId(id) => tx.bank_account == *id,
        Predicate::BankDirection(direction) => tx.direction == *direction,
        _ => true,
    })
}

#[async_trait]
impl RecordStore for MockBackend {
    async fn fetch_transactions(&self, filter: Filter) -> DataResult<Vec<Transaction>> {
        self.begin(Entity::Transaction).await?;
        let state = self.state.lock().expect("state lock");
        let mut matched: Vec<_> = state
            .transactions
            .iter()
            .filter(|tx| transaction_matches(tx, &filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(paginate(matched, &filter))
    }

    async fn create_transaction(&self, new: NewTransaction) -> DataResult<Transaction> {
        self.begin(Entity::Transaction).await?;
        let mut state = self.state.lock().expect("state lock");
        let id = Self::next_id(&mut state);
        let record = Transaction::new(id, new.name, new.amount, new.date, new.direction);
        state.transactions.push(record.clone());
        Ok(record)
    }

    async fn get_transaction(&self, id: u64) -> DataResult<Option<Transaction>> {
        self.begin(Entity::Transaction).await?;
        let state = self.state.lock().expect("state lock");
        Ok(state.transactions.iter().find(|tx| tx.id == id).cloned())
    }

    async fn update_transaction(&self, record: Transaction) -> DataResult<Transaction> {
        self.begin(Entity::Transaction).await?;
        let mut state = self.state.lock().expect("state lock");
        match state.transactions.iter_mut().find(|tx| tx.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(DataError::NotSuccessful(Entity::Transaction)),
        }
    }

    async fn delete_transaction(&self, id: u64) -> DataResult<bool> {
        self.begin(Entity::Transaction).await?;
        let mut state = self.state.lock().expect("state lock");
        let before = state.transactions.len();
        state.transactions.retain(|tx| tx.id != id);
        Ok(state.transactions.len() < before)
    }

    async fn fetch_bank_accounts(&self, filter: Filter) -> DataResult<Vec<BankAccount>> {
        self.begin(Entity::BankAccount).await?;
        let state = self.state.lock().expect("state lock");
        let mut matched: Vec<_> = state
            .bank_accounts
            .iter()
            .filter(|account| bank_account_matches(account, &filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.balance.cmp(&a.balance));
        Ok(paginate(matched, &filter))
    }

    async fn create_bank_account(&self, new: NewBankAccount) -> DataResult<BankAccount> {
        self.begin(Entity::BankAccount).await?;
        let mut state = self.state.lock().expect("state lock");
        let id = Self::next_id(&mut state);
        let record = BankAccount {
            id,
            bank_name: new.bank_name,
            account_type: new.account_type,
            account_number: new.account_number,
            balance: new.balance,
            color: None,
        };
        state.bank_accounts.push(record.clone());
        Ok(record)
    }

    async fn get_bank_account(&self, id: u64) -> DataResult<Option<BankAccount>> {
        self.begin(Entity::BankAccount).await?;
        let state = self.state.lock().expect("state lock");
        Ok(state.bank_accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn update_bank_account(&self, record: BankAccount) -> DataResult<BankAccount> {
        self.begin(Entity::BankAccount).await?;
        let mut state = self.state.lock().expect("state lock");
        match state.bank_accounts.iter_mut().find(|a| a.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(DataError::NotSuccessful(Entity::BankAccount)),
        }
    }

    async fn delete_bank_account(&self, id: u64) -> DataResult<bool> {
        self.begin(Entity::BankAccount).await?;
        let mut state = self.state.lock().expect("state lock");
        let before = state.bank_accounts.len();
        state.bank_accounts.retain(|a| a.id != id);
        // Ledger entries never dangle
        state.bank_transactions.retain(|tx| tx.bank_account != id);
        Ok(state.bank_accounts.len() < before)
    }

    async fn fetch_bank_transactions(&self, filter: Filter) -> DataResult<Vec<BankTransaction>> {
        self.begin(Entity::BankTransaction).await?;
        let state = self.state.lock().expect("state lock");
        let mut matched: Vec<_> = state
            .bank_transactions
            .iter()
            .filter(|tx| bank_transaction_matches(tx, &filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(paginate(matched, &filter))
    }

    async fn create_bank_transaction(
        &self,
        new: NewBankTransaction,
    ) -> DataResult<BankTransaction> {
        self.begin(Entity::BankTransaction).await?;
        let mut state = self.state.lock().expect("state lock");
        if !state.bank_accounts.iter().any(|a| a.id == new.bank_account) {
            return Err(DataError::NotSuccessful(Entity::BankTransaction));
        }
        let id = Self::next_id(&mut state);
        let record = BankTransaction {
            id,
            merchant: new.merchant,
            amount: new.amount,
            direction: new.direction,
            date: new.date,
            bank_account: new.bank_account,
        };
        state.bank_transactions.push(record.clone());
        Ok(record)
    }

    async fn get_bank_transaction(&self, id: u64) -> DataResult<Option<BankTransaction>> {
        self.begin(Entity::BankTransaction).await?;
        let state = self.state.lock().expect("state lock");
        Ok(state.bank_transactions.iter().find(|tx| tx.id == id).cloned())
    }

    async fn update_bank_transaction(&self, record: BankTransaction) -> DataResult<BankTransaction> {
        self.begin(Entity::BankTransaction).await?;
        let mut state = self.state.lock().expect("state lock");
        match state.bank_transactions.iter_mut().find(|tx| tx.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(DataError::NotSuccessful(Entity::BankTransaction)),
        }
    }

    async fn delete_bank_transaction(&self, id: u64) -> DataResult<bool> {
        self.begin(Entity::BankTransaction).await?;
        let mut state = self.state.lock().expect("state lock");
        let before = state.bank_transactions.len();
        state.bank_transactions.retain(|tx| tx.id != id);
        Ok(state.bank_transactions.len() < before)
    }

    async fn fetch_wallet(&self) -> DataResult<Option<Wallet>> {
        self.begin(Entity::Wallet).await?;
        let state = self.state.lock().expect("state lock");
        Ok(state.wallet.clone())
    }

    async fn create_wallet(&self, new: NewWallet) -> DataResult<Wallet> {
        self.begin(Entity::Wallet).await?;
        let mut state = self.state.lock().expect("state lock");
        if state.wallet.is_some() {
            return Err(DataError::NotSuccessful(Entity::Wallet));
        }
        let id = Self::next_id(&mut state);
        let record = Wallet {
            id,
            name: new.name,
            balance: new.balance.max(Decimal::ZERO),
            owner: None,
        };
        state.wallet = Some(record.clone());
        Ok(record)
    }

    async fn update_wallet(&self, record: Wallet) -> DataResult<Wallet> {
        self.begin(Entity::Wallet).await?;
        let mut state = self.state.lock().expect("state lock");
        match state.wallet {
            Some(ref existing) if existing.id == record.id => {
                state.wallet = Some(record.clone());
                Ok(record)
            }
            _ => Err(DataError::NotSuccessful(Entity::Wallet)),
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid seed amount")
}

/// Demo data: four recent wallet transactions, three linked bank
/// accounts (fixed ids 1..3) and their ledgers. No wallet, so the lazy
/// wallet-creation path runs on first dashboard load.
fn seed_state() -> State {
    let transactions = vec![
        Transaction::new(1, "Sarah Johnson", dec("25.99"), date(2023, 4, 12), Direction::Outgoing),
        Transaction::new(2, "Coffee Shop", dec("4.50"), date(2023, 4, 10), Direction::Outgoing),
        Transaction::new(3, "Michael Roberts", dec("120.00"), date(2023, 4, 8), Direction::Incoming),
        Transaction::new(4, "Grocery Store", dec("32.75"), date(2023, 4, 5), Direction::Outgoing),
    ];

    let bank_accounts = vec![
        BankAccount {
            id: 1,
            bank_name: "First National Bank".to_string(),
            account_type: "Checking".to_string(),
            account_number: "****4567".to_string(),
            balance: dec("3245.67"),
            color: Some("blue".to_string()),
        },
        BankAccount {
            id: 2,
            bank_name: "City Credit Union".to_string(),
            account_type: "Savings".to_string(),
            account_number: "****1234".to_string(),
            balance: dec("12750.42"),
            color: Some("green".to_string()),
        },
        BankAccount {
            id: 3,
            bank_name: "Global Investment Bank".to_string(),
            account_type: "Investment".to_string(),
            account_number: "****7890".to_string(),
            balance: dec("45689.23"),
            color: Some("purple".to_string()),
        },
    ];

    let bank_transactions = vec![
        bank_tx(101, "Grocery Store", "78.35", BankDirection::Debit, date(2023, 8, 12), 1),
        bank_tx(102, "Gas Station", "45.00", BankDirection::Debit, date(2023, 8, 10), 1),
        bank_tx(103, "Salary Deposit", "2500.00", BankDirection::Credit, date(2023, 8, 1), 1),
        bank_tx(104, "Restaurant", "65.23", BankDirection::Debit, date(2023, 7, 28), 1),
        bank_tx(201, "Interest Payment", "12.45", BankDirection::Credit, date(2023, 8, 15), 2),
        bank_tx(202, "Transfer to Checking", "500.00", BankDirection::Debit, date(2023, 8, 5), 2),
        bank_tx(203, "Deposit", "1000.00", BankDirection::Credit, date(2023, 7, 20), 2),
        bank_tx(301, "Dividend Payment", "345.67", BankDirection::Credit, date(2023, 8, 17), 3),
        bank_tx(302, "Stock Purchase", "1500.00", BankDirection::Debit, date(2023, 8, 10), 3),
        bank_tx(303, "Broker Fee", "25.00", BankDirection::Debit, date(2023, 8, 10), 3),
        bank_tx(304, "Stock Sale", "2700.00", BankDirection::Credit, date(2023, 7, 25), 3),
    ];

    State {
        transactions,
        bank_accounts,
        bank_transactions,
        wallet: None,
        next_id: 1000,
    }
}

fn bank_tx(
    id: u64,
    merchant: &str,
    amount: &str,
    direction: BankDirection,
    date: NaiveDate,
    bank_account: u64,
) -> BankTransaction {
    BankTransaction {
        id,
        merchant: merchant.to_string(),
        amount: dec(amount),
        direction,
        date,
        bank_account,
    }
}
