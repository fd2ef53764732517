use std::sync::Arc;

use uuid::Uuid;

use crate::model::{Solution, SolutionInput, Status, DEFAULT_REORDER_THRESHOLD};
use crate::repository::{RepoError, SolutionRecord, SolutionRepository};

pub(crate) const MISSING_ASSET: &str = "Asset not found. It may have been confiscated.";
pub(crate) const DESTROYED_ASSET: &str = "Asset not found. It may have already been destroyed.";
pub(crate) const ZERO_STOCK_AVAILABLE: &str = "Invalid entry: An item with 0 stock cannot be set to AVAILABLE. Please enter a valid stock amount or change the status.";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidRequest { code: &'static str, message: String },
    #[error("{message}")]
    NotFound { message: &'static str },
    #[error("a solution named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("database error: {0}")]
    Store(#[source] sqlx::Error),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateName(name) => ServiceError::DuplicateName(name),
            RepoError::Database(e) => ServiceError::Store(e),
        }
    }
}

/// Resolves the lifecycle status of an incoming record before it is written.
///
/// An unset status is derived from the stock level. An explicit AVAILABLE
/// with zero stock is rejected. Every other explicit status is respected
/// verbatim, including OUT_OF_STOCK with positive stock.
pub(crate) fn resolve_status(
    explicit: Option<Status>,
    stock_quantity: i32,
) -> Result<Status, ServiceError> {
    match explicit {
        None if stock_quantity == 0 => Ok(Status::OutOfStock),
        None => Ok(Status::Available),
        Some(Status::Available) if stock_quantity == 0 => Err(ServiceError::InvalidRequest {
            code: "invalid_status",
            message: ZERO_STOCK_AVAILABLE.to_string(),
        }),
        Some(status) => Ok(status),
    }
}

fn to_record(input: SolutionInput, status: Status) -> SolutionRecord {
    SolutionRecord {
        name: input.name,
        description: input.description,
        category: input.category,
        stock_quantity: input.stock_quantity,
        reorder_threshold: input.reorder_threshold.unwrap_or(DEFAULT_REORDER_THRESHOLD),
        price: input.price,
        status,
    }
}

#[derive(Clone)]
pub struct SolutionService {
    repo: Arc<dyn SolutionRepository>,
}

impl SolutionService {
    pub fn new(repo: Arc<dyn SolutionRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Solution>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Solution, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { message: MISSING_ASSET })
    }

    pub async fn create(&self, input: SolutionInput) -> Result<Solution, ServiceError> {
        let status = resolve_status(input.status, input.stock_quantity)?;
        Ok(self.repo.insert(to_record(input, status)).await?)
    }

    /// Full replace: every mutable field of the existing record is
    /// overwritten with the incoming values. Id and created_at survive.
    pub async fn update(&self, id: Uuid, input: SolutionInput) -> Result<Solution, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { message: MISSING_ASSET })?;
        let status = resolve_status(input.status, input.stock_quantity)?;
        self.repo
            .update(id, to_record(input, status))
            .await?
            .ok_or(ServiceError::NotFound { message: MISSING_ASSET })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::NotFound { message: DESTROYED_ASSET });
        }
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::NotFound { message: DESTROYED_ASSET });
        }
        Ok(())
    }

    pub async fn list_low_stock(&self) -> Result<Vec<Solution>, ServiceError> {
        Ok(self.repo.find_low_stock().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_status_with_zero_stock_becomes_out_of_stock() {
        assert_eq!(resolve_status(None, 0).unwrap(), Status::OutOfStock);
    }

    #[test]
    fn unset_status_with_positive_stock_becomes_available() {
        assert_eq!(resolve_status(None, 50).unwrap(), Status::Available);
    }

    #[test]
    fn available_with_zero_stock_is_rejected() {
        let err = resolve_status(Some(Status::Available), 0).unwrap_err();
        match err {
            ServiceError::InvalidRequest { code, message } => {
                assert_eq!(code, "invalid_status");
                assert!(message.contains("0 stock"));
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn available_with_positive_stock_passes_through() {
        assert_eq!(resolve_status(Some(Status::Available), 1).unwrap(), Status::Available);
    }

    #[test]
    fn explicit_statuses_are_respected_regardless_of_stock() {
        assert_eq!(resolve_status(Some(Status::Discontinued), 0).unwrap(), Status::Discontinued);
        assert_eq!(resolve_status(Some(Status::Recalled), 999).unwrap(), Status::Recalled);
        assert_eq!(resolve_status(Some(Status::OutOfStock), 42).unwrap(), Status::OutOfStock);
    }
}
