//! PostgreSQL package repository
//!
//! Packages reference their load through `load_id`; a NULL load means the
//! package sits in free stock. Content lines live in `package_lines` and are
//! rewritten as a whole on every update.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::constants::{CROSS_SECTION_HEIGHT_MM, CROSS_SECTION_WIDTH_MM, STOCK_DESTINATION};
use shared::{ContentLine, Load, LoadStatus, Package, PackageDraft};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::PackageRepository;
use crate::error::{AppError, AppResult};

/// Repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgRepository {
    db: PgPool,
}

/// Row for package query
#[derive(Debug, FromRow)]
struct PackageRow {
    id: Uuid,
    code: String,
    load_name: Option<String>,
    species: String,
    finish: String,
    certification: String,
    packed_on: Option<NaiveDate>,
}

/// Row for content line query
#[derive(Debug, FromRow)]
struct LineRow {
    package_id: Uuid,
    length_ft: i32,
    piece_count: i32,
}

/// Row for load query
#[derive(Debug, FromRow)]
struct LoadRow {
    id: Uuid,
    name: String,
    number: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LoadRow> for Load {
    type Error = AppError;

    fn try_from(row: LoadRow) -> Result<Self, Self::Error> {
        Ok(Load {
            id: row.id,
            name: row.name,
            number: row.number,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

const PACKAGE_SELECT: &str = r#"
    SELECT p.id, p.code, l.name AS load_name, p.species, p.finish, p.certification, p.packed_on
    FROM packages p
    LEFT JOIN loads l ON l.id = p.load_id
"#;

impl PgRepository {
    /// Create a new PgRepository instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Assemble packages from their rows, recomputing board-feet from the lines
    async fn hydrate(&self, rows: Vec<PackageRow>) -> AppResult<Vec<Package>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT package_id, length_ft, piece_count
            FROM package_lines
            WHERE package_id = ANY($1)
            ORDER BY package_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut content: HashMap<Uuid, Vec<ContentLine>> = HashMap::new();
        for line in lines {
            content
                .entry(line.package_id)
                .or_default()
                .push(ContentLine::new(line.length_ft, line.piece_count));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                Package::build(PackageDraft {
                    content: content.remove(&row.id).unwrap_or_default(),
                    id: row.code,
                    destination: row
                        .load_name
                        .unwrap_or_else(|| STOCK_DESTINATION.to_string()),
                    species: row.species,
                    finish: row.finish,
                    certification: row.certification,
                    packed_on: row.packed_on,
                })
            })
            .collect())
    }

    /// Resolve a destination to a load id (None for stock)
    async fn resolve_load_id(
        tx: &mut Transaction<'_, Postgres>,
        destination: &str,
    ) -> AppResult<Option<Uuid>> {
        if destination == STOCK_DESTINATION {
            return Ok(None);
        }
        let load_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM loads WHERE name = $1")
            .bind(destination)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Load {}", destination)))?;
        Ok(Some(load_id))
    }

    async fn write_lines(
        tx: &mut Transaction<'_, Postgres>,
        package_id: Uuid,
        package: &Package,
    ) -> AppResult<()> {
        for (position, line) in package.content().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO package_lines (package_id, position, length_ft, piece_count, length_group)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(package_id)
            .bind(position as i32)
            .bind(line.length())
            .bind(line.piece_count())
            .bind(line.category().group_label())
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

/// Map unique-constraint violations to a duplicate entry
fn map_unique(err: sqlx::Error, field: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEntry(field.to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

#[async_trait]
impl PackageRepository for PgRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn list_packages(&self) -> AppResult<Vec<Package>> {
        let rows = sqlx::query_as::<_, PackageRow>(&format!("{} ORDER BY p.code", PACKAGE_SELECT))
            .fetch_all(&self.db)
            .await?;
        self.hydrate(rows).await
    }

    async fn find_package(&self, id: &str) -> AppResult<Option<Package>> {
        let rows = sqlx::query_as::<_, PackageRow>(&format!("{} WHERE p.code = $1", PACKAGE_SELECT))
            .bind(id)
            .fetch_all(&self.db)
            .await?;
        Ok(self.hydrate(rows).await?.into_iter().next())
    }

    async fn insert_package(&self, package: &Package) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let load_id = Self::resolve_load_id(&mut tx, &package.destination).await?;
        let package_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO packages (id, code, load_id, species, finish, certification, packed_on, thickness_mm, width_mm)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(package_id)
        .bind(&package.id)
        .bind(load_id)
        .bind(&package.species)
        .bind(&package.finish)
        .bind(&package.certification)
        .bind(package.packed_on)
        .bind(CROSS_SECTION_WIDTH_MM as i32)
        .bind(CROSS_SECTION_HEIGHT_MM as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique(e, "package id"))?;

        Self::write_lines(&mut tx, package_id, package).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn replace_package(&self, package: &Package) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let package_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM packages WHERE code = $1")
            .bind(&package.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Package {}", package.id)))?;

        let load_id = Self::resolve_load_id(&mut tx, &package.destination).await?;

        sqlx::query(
            r#"
            UPDATE packages
            SET load_id = $2, species = $3, finish = $4, certification = $5,
                packed_on = $6, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(package_id)
        .bind(load_id)
        .bind(&package.species)
        .bind(&package.finish)
        .bind(&package.certification)
        .bind(package.packed_on)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM package_lines WHERE package_id = $1")
            .bind(package_id)
            .execute(&mut *tx)
            .await?;

        Self::write_lines(&mut tx, package_id, package).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_packages(&self, ids: &[String]) -> AppResult<u64> {
        let unique: Vec<String> = ids
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut tx = self.db.begin().await?;

        let deleted = sqlx::query("DELETE FROM packages WHERE code = ANY($1)")
            .bind(&unique)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted != unique.len() as u64 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!(
                "{} of {} packages",
                unique.len() as u64 - deleted,
                unique.len()
            )));
        }

        tx.commit().await?;
        Ok(deleted)
    }

    async fn list_loads(&self) -> AppResult<Vec<Load>> {
        let rows = sqlx::query_as::<_, LoadRow>(
            "SELECT id, name, number, status, created_at FROM loads ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Load::try_from).collect()
    }

    async fn insert_load(&self, load: &Load) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO loads (id, name, number, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(load.id)
        .bind(&load.name)
        .bind(&load.number)
        .bind(load.status.as_str())
        .bind(load.created_at)
        .execute(&self.db)
        .await
        .map_err(|e| map_unique(e, "load name"))?;

        Ok(())
    }

    async fn set_load_status(&self, name: &str, status: LoadStatus) -> AppResult<()> {
        let updated = sqlx::query("UPDATE loads SET status = $2 WHERE name = $1")
            .bind(name)
            .bind(status.as_str())
            .execute(&self.db)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!("Load {}", name)));
        }
        Ok(())
    }

    async fn delete_load(&self, name: &str) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;

        let load_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM loads WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Load {}", name)))?;

        let moved = sqlx::query("UPDATE packages SET load_id = NULL WHERE load_id = $1")
            .bind(load_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM loads WHERE id = $1")
            .bind(load_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(moved)
    }
}
