use chrono::NaiveDate;
use rust_decimal::Decimal;

use paywave::domain::records::{BankDirection, Direction, NewBankTransaction, NewTransaction};
use paywave::infra::backend::{
    default_seed_balance, fetch_or_create_wallet, DataError, Entity, Filter, Predicate,
    RecordStore,
};
use paywave::infra::mock::MockBackend;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn transactions_come_back_newest_first() {
    let backend = MockBackend::instant();
    let transactions = backend.fetch_transactions(Filter::default()).await.unwrap();
    assert_eq!(transactions.len(), 4);
    for pair in transactions.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
    assert_eq!(transactions[0].name, "Sarah Johnson");
}

#[tokio::test]
async fn limit_and_offset_page_through_the_set() {
    let backend = MockBackend::instant();
    let first_two = backend.fetch_transactions(Filter::latest(2)).await.unwrap();
    assert_eq!(first_two.len(), 2);

    let next_two = backend
        .fetch_transactions(Filter::latest(2).with_offset(2))
        .await
        .unwrap();
    assert_eq!(next_two.len(), 2);
    assert_ne!(first_two[0].id, next_two[0].id);

    let past_the_end = backend
        .fetch_transactions(Filter::latest(2).with_offset(10))
        .await
        .unwrap();
    assert!(past_the_end.is_empty());
}

#[tokio::test]
async fn direction_predicate_filters_transactions() {
    let backend = MockBackend::instant();
    let incoming = backend
        .fetch_transactions(Filter::default().with_predicate(Predicate::Direction(Direction::Incoming)))
        .await
        .unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].name, "Michael Roberts");
    assert!(incoming[0].amount > Decimal::ZERO);
}

#[tokio::test]
async fn account_type_and_bank_direction_predicates_filter() {
    let backend = MockBackend::instant();
    let savings = backend
        .fetch_bank_accounts(
            Filter::default().with_predicate(Predicate::AccountType("Savings".to_string())),
        )
        .await
        .unwrap();
    assert_eq!(savings.len(), 1);
    assert_eq!(savings[0].bank_name, "City Credit Union");

    let credits = backend
        .fetch_bank_transactions(
            Filter::for_bank_account(1)
                .with_predicate(Predicate::BankDirection(BankDirection::Credit)),
        )
        .await
        .unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].merchant, "Salary Deposit");
}

#[tokio::test]
async fn bank_accounts_come_back_largest_balance_first() {
    let backend = MockBackend::instant();
    let accounts = backend.fetch_bank_accounts(Filter::default()).await.unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0].bank_name, "Global Investment Bank");
    for pair in accounts.windows(2) {
        assert!(pair[0].balance >= pair[1].balance);
    }
}

#[tokio::test]
async fn bank_transactions_are_scoped_to_their_account() {
    let backend = MockBackend::instant();
    let ledger = backend
        .fetch_bank_transactions(Filter::for_bank_account(2))
        .await
        .unwrap();
    assert_eq!(ledger.len(), 3);
    assert!(ledger.iter().all(|tx| tx.bank_account == 2));
    assert_eq!(ledger[0].merchant, "Interest Payment");
}

#[tokio::test]
async fn no_match_is_an_empty_vec_not_an_error() {
    let backend = MockBackend::instant();
    let ledger = backend
        .fetch_bank_transactions(Filter::for_bank_account(999))
        .await
        .unwrap();
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn failure_injection_is_per_entity() {
    let backend = MockBackend::instant();
    backend.set_failing(Entity::Transaction, true);

    let err = backend
        .fetch_transactions(Filter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Transport(_)));

    // Other entities are unaffected
    assert!(backend.fetch_bank_accounts(Filter::default()).await.is_ok());

    backend.set_failing(Entity::Transaction, false);
    assert!(backend.fetch_transactions(Filter::default()).await.is_ok());
}

#[tokio::test]
async fn transaction_crud_round_trip() {
    let backend = MockBackend::instant();
    let created = backend
        .create_transaction(NewTransaction {
            name: "Bookstore".to_string(),
            amount: "18.40".parse().unwrap(),
            date: date(2023, 9, 1),
            direction: Direction::Outgoing,
        })
        .await
        .unwrap();
    assert!(created.amount < Decimal::ZERO);
    assert!(created.sign_matches_direction());

    let fetched = backend.get_transaction(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    assert!(backend.delete_transaction(created.id).await.unwrap());
    assert!(backend.get_transaction(created.id).await.unwrap().is_none());
    assert!(!backend.delete_transaction(created.id).await.unwrap());
}

#[tokio::test]
async fn bank_transactions_require_an_existing_account() {
    let backend = MockBackend::instant();
    let err = backend
        .create_bank_transaction(NewBankTransaction {
            merchant: "Nowhere".to_string(),
            amount: "1".parse().unwrap(),
            direction: BankDirection::Debit,
            date: date(2023, 9, 1),
            bank_account: 999,
        })
        .await
        .unwrap_err();
    assert_eq!(err, DataError::NotSuccessful(Entity::BankTransaction));
}

#[tokio::test]
async fn deleting_an_account_drops_its_ledger() {
    let backend = MockBackend::instant();
    assert!(backend.delete_bank_account(1).await.unwrap());
    let ledger = backend
        .fetch_bank_transactions(Filter::for_bank_account(1))
        .await
        .unwrap();
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn wallet_is_created_once_with_the_seed_balance() {
    let backend = MockBackend::instant();
    assert!(backend.fetch_wallet().await.unwrap().is_none());

    let wallet = fetch_or_create_wallet(&backend, Some("Alex")).await.unwrap();
    assert_eq!(wallet.name, "Alex's Wallet");
    assert_eq!(wallet.balance, default_seed_balance());

    // A second call reuses the existing wallet
    let again = fetch_or_create_wallet(&backend, Some("Alex")).await.unwrap();
    assert_eq!(again.id, wallet.id);
}

#[tokio::test]
async fn wallet_without_an_owner_gets_the_default_name() {
    let backend = MockBackend::instant();
    let wallet = fetch_or_create_wallet(&backend, None).await.unwrap();
    assert_eq!(wallet.name, "My Wallet");
}
