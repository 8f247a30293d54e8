//! Remote record API client.
//!
//! Speaks the hosted record service's JSON protocol: fetches are POSTed
//! queries with field lists, ordering and paging; mutations return a
//! `success` flag plus the stored records. Transport and shape errors
//! are logged here and surfaced as [`DataError`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::domain::records::{
    BankAccount, BankTransaction, NewBankAccount, NewBankTransaction, NewTransaction, NewWallet,
    Transaction, Wallet,
};

use super::backend::{DataError, DataResult, Entity, Filter, Predicate, RecordStore};

const DEFAULT_PAGE_LIMIT: usize = 10;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

#[derive(Debug, Serialize)]
struct RecordQuery {
    fields: Vec<&'static str>,
    #[serde(rename = "orderBy")]
    order_by: Vec<OrderBy>,
    #[serde(rename = "pagingInfo")]
    paging_info: PagingInfo,
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    clauses: Vec<WhereClause>,
}

#[derive(Debug, Serialize)]
struct OrderBy {
    #[serde(rename = "fieldName")]
    field_name: &'static str,
    direction: &'static str,
}

#[derive(Debug, Serialize)]
struct PagingInfo {
    limit: usize,
    offset: usize,
}

#[derive(Debug, Serialize)]
struct WhereClause {
    #[serde(rename = "fieldName")]
    field_name: &'static str,
    operator: &'static str,
    values: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct FetchResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MutationResponse<T> {
    success: bool,
    #[serde(default = "Vec::new")]
    results: Vec<MutationResult<T>>,
}

#[derive(Debug, Deserialize)]
struct MutationResult<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    success: bool,
}

fn fields_for(entity: Entity) -> Vec<&'static str> {
    match entity {
        Entity::Transaction => vec!["Id", "Name", "amount", "date", "type", "avatar"],
        Entity::BankAccount => vec![
            "Id",
            "bank_name",
            "account_type",
            "account_number",
            "balance",
            "color",
        ],
        Entity::BankTransaction => vec!["Id", "merchant", "amount", "type", "date", "bank_account"],
        Entity::Wallet => vec!["Id", "Name", "balance", "Owner"],
    }
}

fn default_order(entity: Entity) -> Vec<OrderBy> {
    let field_name = match entity {
        Entity::Transaction | Entity::BankTransaction => "date",
        Entity::BankAccount | Entity::Wallet => "balance",
    };
    vec![OrderBy {
        field_name,
        direction: "desc",
    }]
}

fn where_clauses(filter: &Filter) -> Vec<WhereClause> {
    filter
        .predicates
        .iter()
        .map(|predicate| match predicate {
            Predicate::Direction(direction) => WhereClause {
                field_name: "type",
                operator: "ExactMatch",
                values: vec![json!(direction.to_string())],
            },
            Predicate::BankDirection(direction) => WhereClause {
                field_name: "type",
                operator: "ExactMatch",
                values: vec![json!(direction.to_string())],
            },
            Predicate::AccountType(account_type) => WhereClause {
                field_name: "account_type",
                operator: "ExactMatch",
                values: vec![json!(account_type)],
            },
            Predicate::BankAccountId(id) => WhereClause {
                field_name: "bank_account",
                operator: "ExactMatch",
                values: vec![json!(id)],
            },
        })
        .collect()
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        }
    }

    fn records_url(&self, entity: Entity) -> String {
        format!("{}/records/{}", self.base_url, entity)
    }

    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Project-Id", &self.project_id)
            .header("X-Public-Key", &self.public_key)
    }

    fn transport(err: reqwest::Error) -> DataError {
        error!("Record API transport failure: {}", err);
        DataError::Transport(err.to_string())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        entity: Entity,
        filter: Filter,
    ) -> DataResult<Vec<T>> {
        let query = RecordQuery {
            fields: fields_for(entity),
            order_by: default_order(entity),
            paging_info: PagingInfo {
                limit: filter.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
                offset: filter.offset,
            },
            clauses: where_clauses(&filter),
        };
        debug!("Fetching {} records", entity);
        let response = self
            .with_headers(self.http.post(format!("{}/fetch", self.records_url(entity))))
            .json(&query)
            .send()
            .await
            .map_err(Self::transport)?;
        let body: FetchResponse<T> = response.json().await.map_err(Self::transport)?;
        Ok(body.data)
    }

    async fn create<P: Serialize, T: DeserializeOwned>(
        &self,
        entity: Entity,
        payload: &P,
    ) -> DataResult<T> {
        let response = self
            .with_headers(self.http.post(self.records_url(entity)))
            .json(&json!({ "records": [payload] }))
            .send()
            .await
            .map_err(Self::transport)?;
        let body: MutationResponse<T> = response.json().await.map_err(Self::transport)?;
        if !body.success {
            return Err(DataError::NotSuccessful(entity));
        }
        body.results
            .into_iter()
            .next()
            .map(|result| result.data)
            .ok_or_else(|| DataError::BadResponse(format!("empty {} create result", entity)))
    }

    async fn get<T: DeserializeOwned>(&self, entity: Entity, id: u64) -> DataResult<Option<T>> {
        let url = format!("{}/{}", self.records_url(entity), id);
        let response = self
            .with_headers(self.http.get(url))
            .send()
            .await
            .map_err(Self::transport)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record: T = response.json().await.map_err(Self::transport)?;
        Ok(Some(record))
    }

    async fn update<P: Serialize, T: DeserializeOwned>(
        &self,
        entity: Entity,
        record: &P,
    ) -> DataResult<T> {
        let response = self
            .with_headers(self.http.post(format!("{}/update", self.records_url(entity))))
            .json(&json!({ "records": [record] }))
            .send()
            .await
            .map_err(Self::transport)?;
        let body: MutationResponse<T> = response.json().await.map_err(Self::transport)?;
        if !body.success {
            return Err(DataError::NotSuccessful(entity));
        }
        body.results
            .into_iter()
            .next()
            .map(|result| result.data)
            .ok_or_else(|| DataError::BadResponse(format!("empty {} update result", entity)))
    }

    async fn delete(&self, entity: Entity, id: u64) -> DataResult<bool> {
        let url = format!("{}/{}", self.records_url(entity), id);
        let response = self
            .with_headers(self.http.delete(url))
            .send()
            .await
            .map_err(Self::transport)?;
        let body: DeleteResponse = response.json().await.map_err(Self::transport)?;
        Ok(body.success)
    }
}

#[async_trait]
impl RecordStore for ApiClient {
    async fn fetch_transactions(&self, filter: Filter) -> DataResult<Vec<Transaction>> {
        self.fetch(Entity::Transaction, filter).await
    }

    async fn create_transaction(&self, new: NewTransaction) -> DataResult<Transaction> {
        self.create(Entity::Transaction, &new).await
    }

    async fn get_transaction(&self, id: u64) -> DataResult<Option<Transaction>> {
        self.get(Entity::Transaction, id).await
    }

    async fn update_transaction(&self, record: Transaction) -> DataResult<Transaction> {
        self.update(Entity::Transaction, &record).await
    }

    async fn delete_transaction(&self, id: u64) -> DataResult<bool> {
        self.delete(Entity::Transaction, id).await
    }

    async fn fetch_bank_accounts(&self, filter: Filter) -> DataResult<Vec<BankAccount>> {
        self.fetch(Entity::BankAccount, filter).await
    }

    async fn create_bank_account(&self, new: NewBankAccount) -> DataResult<BankAccount> {
        self.create(Entity::BankAccount, &new).await
    }

    async fn get_bank_account(&self, id: u64) -> DataResult<Option<BankAccount>> {
        self.get(Entity::BankAccount, id).await
    }

    async fn update_bank_account(&self, record: BankAccount) -> DataResult<BankAccount> {
        self.update(Entity::BankAccount, &record).await
    }

    async fn delete_bank_account(&self, id: u64) -> DataResult<bool> {
        self.delete(Entity::BankAccount, id).await
    }

    async fn fetch_bank_transactions(&self, filter: Filter) -> DataResult<Vec<BankTransaction>> {
        self.fetch(Entity::BankTransaction, filter).await
    }

    async fn create_bank_transaction(
        &self,
        new: NewBankTransaction,
    ) -> DataResult<BankTransaction> {
        self.create(Entity::BankTransaction, &new).await
    }

    async fn get_bank_transaction(&self, id: u64) -> DataResult<Option<BankTransaction>> {
        self.get(Entity::BankTransaction, id).await
    }

    async fn update_bank_transaction(&self, record: BankTransaction) -> DataResult<BankTransaction> {
        self.update(Entity::BankTransaction, &record).await
    }

    async fn delete_bank_transaction(&self, id: u64) -> DataResult<bool> {
        self.delete(Entity::BankTransaction, id).await
    }

    async fn fetch_wallet(&self) -> DataResult<Option<Wallet>> {
        let wallets: Vec<Wallet> = self.fetch(Entity::Wallet, Filter::latest(1)).await?;
        Ok(wallets.into_iter().next())
    }

    async fn create_wallet(&self, new: NewWallet) -> DataResult<Wallet> {
        self.create(Entity::Wallet, &new).await
    }

    async fn update_wallet(&self, record: Wallet) -> DataResult<Wallet> {
        self.update(Entity::Wallet, &record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::Direction;

    #[test]
    fn fetch_query_serializes_wire_names() {
        let query = RecordQuery {
            fields: fields_for(Entity::Transaction),
            order_by: default_order(Entity::Transaction),
            paging_info: PagingInfo { limit: 4, offset: 0 },
            clauses: where_clauses(
                &Filter::default().with_predicate(Predicate::Direction(Direction::Incoming)),
            ),
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["orderBy"][0]["fieldName"], "date");
        assert_eq!(value["orderBy"][0]["direction"], "desc");
        assert_eq!(value["pagingInfo"]["limit"], 4);
        assert_eq!(value["where"][0]["operator"], "ExactMatch");
        assert_eq!(value["where"][0]["values"][0], "incoming");
    }

    #[test]
    fn empty_where_is_omitted() {
        let query = RecordQuery {
            fields: fields_for(Entity::Wallet),
            order_by: default_order(Entity::Wallet),
            paging_info: PagingInfo { limit: 1, offset: 0 },
            clauses: Vec::new(),
        };
        let value = serde_json::to_value(&query).unwrap();
        assert!(value.get("where").is_none());
    }

    #[test]
    fn bank_account_filter_targets_the_link_field() {
        let clauses = where_clauses(&Filter::for_bank_account(3));
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].field_name, "bank_account");
        assert_eq!(clauses[0].values, vec![serde_json::json!(3)]);
    }
}
