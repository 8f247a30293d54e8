//! The dashboard's three concurrent fetches, exercised end to end
//! against the mock backend.

use paywave::infra::backend::{fetch_or_create_wallet, Entity, Filter, RecordStore};
use paywave::infra::mock::MockBackend;

async fn load_batch(
    backend: &MockBackend,
    owner: Option<&str>,
) -> (
    Result<Vec<paywave::domain::records::Transaction>, paywave::infra::backend::DataError>,
    Result<Vec<paywave::domain::records::BankAccount>, paywave::infra::backend::DataError>,
    Result<paywave::domain::records::Wallet, paywave::infra::backend::DataError>,
) {
    tokio::join!(
        backend.fetch_transactions(Filter::latest(4)),
        backend.fetch_bank_accounts(Filter::default()),
        fetch_or_create_wallet(backend, owner),
    )
}

#[tokio::test]
async fn a_clean_load_fills_all_three_sections() {
    let backend = MockBackend::instant();
    let (transactions, accounts, wallet) = load_batch(&backend, Some("Alex")).await;

    assert_eq!(transactions.unwrap().len(), 4);
    assert_eq!(accounts.unwrap().len(), 3);
    let wallet = wallet.unwrap();
    assert_eq!(wallet.name, "Alex's Wallet");
}

#[tokio::test]
async fn one_failing_section_does_not_take_down_the_others() {
    let backend = MockBackend::instant();
    backend.set_failing(Entity::BankAccount, true);

    let (transactions, accounts, wallet) = load_batch(&backend, Some("Alex")).await;

    assert!(transactions.is_ok());
    assert!(accounts.is_err());
    assert!(wallet.is_ok());
}

#[tokio::test]
async fn a_failing_wallet_store_leaves_no_wallet_behind() {
    let backend = MockBackend::instant();
    backend.set_failing(Entity::Wallet, true);

    let (_, _, wallet) = load_batch(&backend, Some("Alex")).await;
    assert!(wallet.is_err());

    // Once the store recovers, creation proceeds from scratch
    backend.set_failing(Entity::Wallet, false);
    let (_, _, wallet) = load_batch(&backend, Some("Alex")).await;
    assert!(wallet.is_ok());
}
