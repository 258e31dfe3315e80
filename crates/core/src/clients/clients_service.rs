use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::clients_model::ClientRecord;
use super::clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
use crate::aggregation::{
    filter_by_query, filter_by_year, summarize, AmountPolicy, RebateSummary, YearFilter,
};
use crate::errors::Result;
use crate::forms::ClientDetailsForm;

pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepositoryTrait>) -> Self {
        ClientService { repository }
    }
}

#[async_trait]
impl ClientServiceTrait for ClientService {
    async fn get_clients(&self) -> Result<Vec<ClientRecord>> {
        self.repository.list_clients().await
    }

    async fn create_client(&self, form: ClientDetailsForm) -> Result<ClientRecord> {
        let new_client = form.into_new_client()?;
        let created = self.repository.create_client(new_client).await?;
        info!("[Clients] Created client {}", created.id);
        Ok(created)
    }

    fn year_to_date(
        &self,
        clients: &[ClientRecord],
        query: &str,
        year: i32,
        policy: AmountPolicy,
    ) -> Result<RebateSummary> {
        let matches = filter_by_query(clients, query);
        summarize(filter_by_year(matches, YearFilter::Year(year)), policy)
    }
}
