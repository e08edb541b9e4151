use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgConnection, PgPool, Postgres};

use business::domain::errors::RepositoryError;
use business::domain::franchise::gateway::FranchiseGateway;
use business::domain::franchise::model::{Branch, BranchProductResult, Franchise, Product};
use business::domain::shared::value_objects::generate_id;

use super::entity::{BranchEntity, FranchiseEntity, MaxStockEntity, ProductEntity};

/// PostgreSQL gateway. Each mutation is a single conditional statement scoped by the
/// franchise id, run in a transaction that also reads back the resulting aggregate.
pub struct FranchiseGatewayPostgres {
    pool: PgPool,
}

impl FranchiseGatewayPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn mutate(
        &self,
        franchise_id: &str,
        statement: Query<'_, Postgres, PgArguments>,
    ) -> Result<Franchise, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(read_error)?;

        let result = statement.execute(&mut *tx).await.map_err(write_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let franchise = load(&mut tx, franchise_id)
            .await
            .map_err(read_error)?
            .ok_or(RepositoryError::NotFound)?;
        tx.commit().await.map_err(write_error)?;

        Ok(franchise)
    }
}

fn read_error(error: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %error, "franchise store read failed");
    RepositoryError::DatabaseError
}

fn write_error(error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => unique_violation(db.constraint()),
        _ => {
            tracing::error!(error = %error, "franchise store write failed");
            RepositoryError::DatabaseError
        }
    }
}

/// Primary-key violations come from caller-supplied ids; the other unique indexes guard names.
fn unique_violation(constraint: Option<&str>) -> RepositoryError {
    match constraint {
        Some(name) if name.ends_with("_pkey") => RepositoryError::DuplicatedId,
        _ => RepositoryError::Duplicated,
    }
}

async fn load(conn: &mut PgConnection, id: &str) -> Result<Option<Franchise>, sqlx::Error> {
    let Some(franchise) =
        sqlx::query_as::<_, FranchiseEntity>("SELECT id, name FROM franchises WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
    else {
        return Ok(None);
    };

    let branches = sqlx::query_as::<_, BranchEntity>(
        "SELECT id, name FROM branches WHERE franchise_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    let products = sqlx::query_as::<_, ProductEntity>(
        r#"SELECT p.id, p.branch_id, p.name, p.stock
        FROM products p
        JOIN branches b ON b.id = p.branch_id
        WHERE b.franchise_id = $1
        ORDER BY p.position"#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(franchise.into_domain(branches, products)))
}

async fn insert_branch(
    conn: &mut PgConnection,
    franchise_id: &str,
    branch: &Branch,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO branches (id, franchise_id, name) VALUES ($1, $2, $3)")
        .bind(&branch.branch_id)
        .bind(franchise_id)
        .bind(&branch.name)
        .execute(&mut *conn)
        .await?;

    for product in &branch.products {
        sqlx::query("INSERT INTO products (id, branch_id, name, stock) VALUES ($1, $2, $3, $4)")
            .bind(&product.product_id)
            .bind(&branch.branch_id)
            .bind(&product.name)
            .bind(product.stock)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl FranchiseGateway for FranchiseGatewayPostgres {
    async fn save_new(&self, franchise: &Franchise) -> Result<Franchise, RepositoryError> {
        tracing::debug!(name = %franchise.name, "saving franchise");
        let stored = Franchise::from_repository(
            generate_id(),
            franchise.name.clone(),
            franchise.branches.clone(),
        );

        let mut tx = self.pool.begin().await.map_err(read_error)?;
        sqlx::query("INSERT INTO franchises (id, name) VALUES ($1, $2)")
            .bind(&stored.id)
            .bind(&stored.name)
            .execute(&mut *tx)
            .await
            .map_err(write_error)?;
        for branch in &stored.branches {
            insert_branch(&mut tx, &stored.id, branch)
                .await
                .map_err(write_error)?;
        }
        tx.commit().await.map_err(write_error)?;

        Ok(stored)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Franchise>, RepositoryError> {
        tracing::debug!(name, "finding franchise by name");
        let mut conn = self.pool.acquire().await.map_err(read_error)?;

        let id: Option<String> = sqlx::query_scalar("SELECT id FROM franchises WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(read_error)?;

        match id {
            Some(id) => load(&mut conn, &id).await.map_err(read_error),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, RepositoryError> {
        tracing::debug!(id, "finding franchise by id");
        let mut conn = self.pool.acquire().await.map_err(read_error)?;

        load(&mut conn, id).await.map_err(read_error)
    }

    async fn append_branch(
        &self,
        franchise_id: &str,
        branch: &Branch,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, branch = %branch.name, "appending branch");
        let statement = sqlx::query(
            r#"INSERT INTO branches (id, franchise_id, name)
            SELECT $1, f.id, $3 FROM franchises f WHERE f.id = $2"#,
        )
        .bind(branch.branch_id.clone())
        .bind(franchise_id.to_string())
        .bind(branch.name.clone());

        self.mutate(franchise_id, statement).await
    }

    async fn append_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product: &Product,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, branch_id, product = %product.name, "appending product");
        let statement = sqlx::query(
            r#"INSERT INTO products (id, branch_id, name, stock)
            SELECT $1, b.id, $3, $4 FROM branches b WHERE b.id = $2 AND b.franchise_id = $5"#,
        )
        .bind(product.product_id.clone())
        .bind(branch_id.to_string())
        .bind(product.name.clone())
        .bind(product.stock)
        .bind(franchise_id.to_string());

        self.mutate(franchise_id, statement).await
    }

    async fn remove_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, branch_id, product_id, "removing product");
        let statement = sqlx::query(
            r#"DELETE FROM products p USING branches b
            WHERE p.id = $1 AND p.branch_id = b.id AND b.id = $2 AND b.franchise_id = $3"#,
        )
        .bind(product_id.to_string())
        .bind(branch_id.to_string())
        .bind(franchise_id.to_string());

        self.mutate(franchise_id, statement).await
    }

    async fn set_product_stock(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        stock: i32,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, branch_id, product_id, stock, "setting product stock");
        let statement = sqlx::query(
            r#"UPDATE products p SET stock = $1 FROM branches b
            WHERE p.id = $2 AND p.branch_id = b.id AND b.id = $3 AND b.franchise_id = $4"#,
        )
        .bind(stock)
        .bind(product_id.to_string())
        .bind(branch_id.to_string())
        .bind(franchise_id.to_string());

        self.mutate(franchise_id, statement).await
    }

    async fn rename_franchise(
        &self,
        franchise_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, new_name, "renaming franchise");
        let statement = sqlx::query("UPDATE franchises SET name = $1 WHERE id = $2")
            .bind(new_name.to_string())
            .bind(franchise_id.to_string());

        self.mutate(franchise_id, statement).await
    }

    async fn rename_branch(
        &self,
        franchise_id: &str,
        branch_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, branch_id, new_name, "renaming branch");
        let statement =
            sqlx::query("UPDATE branches SET name = $1 WHERE id = $2 AND franchise_id = $3")
                .bind(new_name.to_string())
                .bind(branch_id.to_string())
                .bind(franchise_id.to_string());

        self.mutate(franchise_id, statement).await
    }

    async fn rename_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        tracing::debug!(franchise_id, branch_id, product_id, new_name, "renaming product");
        let statement = sqlx::query(
            r#"UPDATE products p SET name = $1 FROM branches b
            WHERE p.id = $2 AND p.branch_id = b.id AND b.id = $3 AND b.franchise_id = $4"#,
        )
        .bind(new_name.to_string())
        .bind(product_id.to_string())
        .bind(branch_id.to_string())
        .bind(franchise_id.to_string());

        self.mutate(franchise_id, statement).await
    }

    async fn stream_max_stock_per_branch(
        &self,
        franchise_id: &str,
    ) -> Result<BoxStream<'static, BranchProductResult>, RepositoryError> {
        tracing::debug!(franchise_id, "finding max stock product per branch");
        // DISTINCT ON keeps the first row per branch: highest stock, then earliest inserted.
        let rows = sqlx::query_as::<_, MaxStockEntity>(
            r#"SELECT DISTINCT ON (b.position)
                b.name AS branch_name, p.id AS product_id, p.name AS product_name, p.stock
            FROM branches b
            JOIN products p ON p.branch_id = b.id
            WHERE b.franchise_id = $1
            ORDER BY b.position, p.stock DESC, p.position ASC"#,
        )
        .bind(franchise_id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(stream::iter(rows.into_iter().map(MaxStockEntity::into_domain)).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_primary_key_violation_as_id_collision() {
        assert_eq!(
            unique_violation(Some("products_pkey")),
            RepositoryError::DuplicatedId
        );
    }

    #[test]
    fn should_report_name_index_violation_as_duplicate() {
        assert_eq!(
            unique_violation(Some("products_branch_name_key")),
            RepositoryError::Duplicated
        );
        assert_eq!(unique_violation(None), RepositoryError::Duplicated);
    }
}
