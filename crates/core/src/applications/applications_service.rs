use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::applications_model::{ApplicationRecord, BulkDeleteRequest};
use super::applications_traits::{ApplicationRepositoryTrait, ApplicationServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::forms::{validate_details, ApplicationForm};

pub struct ApplicationService {
    repository: Arc<dyn ApplicationRepositoryTrait>,
}

impl ApplicationService {
    pub fn new(repository: Arc<dyn ApplicationRepositoryTrait>) -> Self {
        ApplicationService { repository }
    }
}

#[async_trait]
impl ApplicationServiceTrait for ApplicationService {
    async fn get_applications(&self) -> Result<Vec<ApplicationRecord>> {
        self.repository.list_applications().await
    }

    async fn get_application(&self, id: i64) -> Result<ApplicationRecord> {
        self.repository.get_application(id).await
    }

    async fn create_application(&self, form: ApplicationForm) -> Result<ApplicationRecord> {
        let new_application = form.into_new_application()?;
        let created = self.repository.create_application(new_application).await?;
        info!("[Applications] Created application {}", created.id);
        Ok(created)
    }

    async fn update_application(&self, record: ApplicationRecord) -> Result<ApplicationRecord> {
        validate_details(&record.details)?;
        debug!("[Applications] Saving application {}", record.id);
        self.repository.update_application(record).await
    }

    async fn delete_application(&self, id: i64) -> Result<()> {
        self.repository.delete_application(id).await?;
        info!("[Applications] Deleted application {}", id);
        Ok(())
    }

    async fn duplicate_application(&self, id: i64) -> Result<ApplicationRecord> {
        let copy = self.repository.duplicate_application(id).await?;
        info!("[Applications] Duplicated application {} as {}", id, copy.id);
        Ok(copy)
    }

    async fn bulk_delete_applications(&self, ids: Vec<i64>, code: &str) -> Result<usize> {
        let mut ids = ids;
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingDeleteCode.into());
        }

        let count = ids.len();
        self.repository
            .bulk_delete_applications(BulkDeleteRequest {
                ids,
                code: code.to_string(),
            })
            .await?;
        info!("[Applications] Bulk-deleted {} applications", count);
        Ok(count)
    }
}
