use async_trait::async_trait;

use super::clients_model::{ClientRecord, NewClient};
use crate::aggregation::{AmountPolicy, RebateSummary};
use crate::errors::Result;
use crate::forms::ClientDetailsForm;

/// Remote storage of clients.
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<ClientRecord>>;
    async fn create_client(&self, new_client: NewClient) -> Result<ClientRecord>;
}

/// Trait for client service operations
#[async_trait]
pub trait ClientServiceTrait: Send + Sync {
    async fn get_clients(&self) -> Result<Vec<ClientRecord>>;
    async fn create_client(&self, form: ClientDetailsForm) -> Result<ClientRecord>;
    /// Searches clients, then totals the matches created in `year`.
    fn year_to_date(
        &self,
        clients: &[ClientRecord],
        query: &str,
        year: i32,
        policy: AmountPolicy,
    ) -> Result<RebateSummary>;
}
