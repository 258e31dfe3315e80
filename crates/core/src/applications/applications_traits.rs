use async_trait::async_trait;

use super::applications_model::{ApplicationRecord, BulkDeleteRequest, NewApplication};
use crate::errors::Result;
use crate::forms::ApplicationForm;

/// Remote storage of applications.
#[async_trait]
pub trait ApplicationRepositoryTrait: Send + Sync {
    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>>;
    async fn get_application(&self, id: i64) -> Result<ApplicationRecord>;
    async fn create_application(&self, new_application: NewApplication)
        -> Result<ApplicationRecord>;
    /// Replaces the whole stored record.
    async fn update_application(&self, record: ApplicationRecord) -> Result<ApplicationRecord>;
    async fn delete_application(&self, id: i64) -> Result<()>;
    async fn duplicate_application(&self, id: i64) -> Result<ApplicationRecord>;
    async fn bulk_delete_applications(&self, request: BulkDeleteRequest) -> Result<()>;
}

/// Trait for application service operations
#[async_trait]
pub trait ApplicationServiceTrait: Send + Sync {
    async fn get_applications(&self) -> Result<Vec<ApplicationRecord>>;
    async fn get_application(&self, id: i64) -> Result<ApplicationRecord>;
    async fn create_application(&self, form: ApplicationForm) -> Result<ApplicationRecord>;
    async fn update_application(&self, record: ApplicationRecord) -> Result<ApplicationRecord>;
    async fn delete_application(&self, id: i64) -> Result<()>;
    async fn duplicate_application(&self, id: i64) -> Result<ApplicationRecord>;
    async fn bulk_delete_applications(&self, ids: Vec<i64>, code: &str) -> Result<usize>;
}
