use crate::error::{Error, Result};
use crate::models::region::{NewRegion, Region};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;
use validator::Validate;

const REGION_COLUMNS: &str = "id, country_code, country_name, region_name, city_type, \
     base_score, base_breakdown, tags, created_at";

/// Inserts one Region. Works on a pool or inside a unit-of-work.
///
/// A second row with the same (country_code, region_name) is rejected by
/// `uq_regions_country_region`; the error comes back unchanged.
pub async fn insert_region<'e, E>(executor: E, new: &NewRegion) -> Result<Region>
where
    E: PgExecutor<'e>,
{
    new.validate()?;

    let region = sqlx::query_as::<_, Region>(&format!(
        r#"
        INSERT INTO regions (
            id, country_code, country_name, region_name, city_type,
            base_score, base_breakdown, tags
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {REGION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&new.country_code)
    .bind(&new.country_name)
    .bind(&new.region_name)
    .bind(new.city_type.as_str())
    .bind(new.base_score)
    .bind(&new.base_breakdown)
    .bind(&new.tags)
    .fetch_one(executor)
    .await?;

    Ok(region)
}

pub async fn find_region_by_key<'e, E>(
    executor: E,
    country_code: &str,
    region_name: &str,
) -> Result<Option<Region>>
where
    E: PgExecutor<'e>,
{
    let region = sqlx::query_as::<_, Region>(&format!(
        "SELECT {REGION_COLUMNS} FROM regions WHERE country_code = $1 AND region_name = $2"
    ))
    .bind(country_code)
    .bind(region_name)
    .fetch_optional(executor)
    .await?;

    Ok(region)
}

#[derive(Clone)]
pub struct RegionService {
    pool: PgPool,
}

impl RegionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewRegion) -> Result<Region> {
        insert_region(&self.pool, &new).await
    }

    pub async fn find_by_key(&self, country_code: &str, region_name: &str) -> Result<Option<Region>> {
        find_region_by_key(&self.pool, country_code, region_name).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Region> {
        sqlx::query_as::<_, Region>(&format!(
            "SELECT {REGION_COLUMNS} FROM regions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Region {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Region>> {
        let regions = sqlx::query_as::<_, Region>(&format!(
            "SELECT {REGION_COLUMNS} FROM regions ORDER BY country_code ASC, region_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(regions)
    }

    /// Deletes a Region. Tests that selected it keep existing with
    /// `selected_region_id` cleared by the foreign key.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Region {} not found", id)));
        }
        Ok(())
    }
}
