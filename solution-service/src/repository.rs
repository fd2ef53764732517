use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::model::{Category, Solution, Status};

pub(crate) const LIST_SOLUTIONS_SQL: &str = "SELECT id, name, description, category, stock_quantity, reorder_threshold, price, status, created_at, updated_at FROM solutions";

pub(crate) const FIND_SOLUTION_SQL: &str = "SELECT id, name, description, category, stock_quantity, reorder_threshold, price, status, created_at, updated_at FROM solutions WHERE id = $1";

pub(crate) const INSERT_SOLUTION_SQL: &str = "INSERT INTO solutions (id, name, description, category, stock_quantity, reorder_threshold, price, status)\n     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)\n     RETURNING id, name, description, category, stock_quantity, reorder_threshold, price, status, created_at, updated_at";

pub(crate) const UPDATE_SOLUTION_SQL: &str = "UPDATE solutions SET name = $2, description = $3, category = $4, stock_quantity = $5, reorder_threshold = $6, price = $7, status = $8, updated_at = now()\n     WHERE id = $1\n     RETURNING id, name, description, category, stock_quantity, reorder_threshold, price, status, created_at, updated_at";

pub(crate) const DELETE_SOLUTION_SQL: &str = "DELETE FROM solutions WHERE id = $1";

pub(crate) const EXISTS_SOLUTION_SQL: &str = "SELECT EXISTS(SELECT 1 FROM solutions WHERE id = $1)";

pub(crate) const LOW_STOCK_SQL: &str = "SELECT id, name, description, category, stock_quantity, reorder_threshold, price, status, created_at, updated_at FROM solutions WHERE stock_quantity <= reorder_threshold";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("a solution named \"{0}\" already exists")]
    DuplicateName(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Field set written on insert and full-replace update. Ids and timestamps
/// are owned by the store and never appear here.
#[derive(Debug, Clone)]
pub struct SolutionRecord {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub stock_quantity: i32,
    pub reorder_threshold: i32,
    pub price: BigDecimal,
    pub status: Status,
}

#[async_trait]
pub trait SolutionRepository: Send + Sync {
    async fn insert(&self, record: SolutionRecord) -> Result<Solution, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Solution>, RepoError>;
    async fn find_all(&self) -> Result<Vec<Solution>, RepoError>;
    async fn update(&self, id: Uuid, record: SolutionRecord) -> Result<Option<Solution>, RepoError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, RepoError>;
    async fn find_low_stock(&self) -> Result<Vec<Solution>, RepoError>;
}

#[derive(Clone)]
pub struct PgSolutionRepository {
    pool: PgPool,
}

impl PgSolutionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_err(name: &str, e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::DuplicateName(name.to_string())
        }
        _ => RepoError::Database(e),
    }
}

#[async_trait]
impl SolutionRepository for PgSolutionRepository {
    async fn insert(&self, record: SolutionRecord) -> Result<Solution, RepoError> {
        let id = Uuid::new_v4();
        debug!(%id, name = %record.name, "inserting solution");
        sqlx::query_as::<_, Solution>(INSERT_SOLUTION_SQL)
            .bind(id)
            .bind(&record.name)
            .bind(&record.description)
            .bind(record.category)
            .bind(record.stock_quantity)
            .bind(record.reorder_threshold)
            .bind(&record.price)
            .bind(record.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_err(&record.name, e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Solution>, RepoError> {
        let row = sqlx::query_as::<_, Solution>(FIND_SOLUTION_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Solution>, RepoError> {
        let rows = sqlx::query_as::<_, Solution>(LIST_SOLUTIONS_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: Uuid, record: SolutionRecord) -> Result<Option<Solution>, RepoError> {
        debug!(%id, name = %record.name, "updating solution");
        sqlx::query_as::<_, Solution>(UPDATE_SOLUTION_SQL)
            .bind(id)
            .bind(&record.name)
            .bind(&record.description)
            .bind(record.category)
            .bind(record.stock_quantity)
            .bind(record.reorder_threshold)
            .bind(&record.price)
            .bind(record.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_err(&record.name, e))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        debug!(%id, "deleting solution");
        let result = sqlx::query(DELETE_SOLUTION_SQL)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let exists: bool = sqlx::query_scalar(EXISTS_SOLUTION_SQL)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_low_stock(&self) -> Result<Vec<Solution>, RepoError> {
        let rows = sqlx::query_as::<_, Solution>(LOW_STOCK_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_query_is_boundary_inclusive() {
        assert!(LOW_STOCK_SQL.contains("stock_quantity <= reorder_threshold"));
    }

    #[test]
    fn update_never_touches_id_or_created_at() {
        assert!(!UPDATE_SOLUTION_SQL.contains("created_at ="));
        assert!(!UPDATE_SOLUTION_SQL.contains("SET id"));
        assert!(UPDATE_SOLUTION_SQL.contains("updated_at = now()"));
    }
}
