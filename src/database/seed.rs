//! Default Region catalog and the idempotent routine that installs it.

use serde::Serialize;
use serde_json::json;
use sqlx::PgConnection;
use tracing::{debug, info};

use crate::database::Database;
use crate::error::Result;
use crate::models::region::{CityType, NewRegion};
use crate::services::region_service::{find_region_by_key, insert_region};

/// The fixed catalog. Rows are keyed by (country_code, region_name).
pub fn default_regions() -> Vec<NewRegion> {
    vec![
        NewRegion {
            country_code: "JP".to_string(),
            country_name: "Japan".to_string(),
            region_name: "Tokyo".to_string(),
            city_type: CityType::Metro,
            base_score: 0,
            base_breakdown: json!({}),
            tags: vec!["tokyo".into(), "japan".into(), "metro".into()],
        },
        NewRegion {
            country_code: "AU".to_string(),
            country_name: "Australia".to_string(),
            region_name: "Sydney".to_string(),
            city_type: CityType::Metro,
            base_score: 0,
            base_breakdown: json!({}),
            tags: vec!["sydney".into(), "australia".into(), "metro".into()],
        },
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Inserts every catalog entry that has no row yet. Existing rows are left
/// untouched even when the catalog values differ.
///
/// Not isolated against a concurrent run: a racing duplicate insert fails on
/// `uq_regions_country_region` and the error is returned as is.
pub async fn seed_regions(conn: &mut PgConnection) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for region in default_regions() {
        let existing =
            find_region_by_key(&mut *conn, &region.country_code, &region.region_name).await?;

        if existing.is_some() {
            debug!(
                country_code = %region.country_code,
                region_name = %region.region_name,
                "region already present, skipping"
            );
            report.skipped += 1;
            continue;
        }

        insert_region(&mut *conn, &region).await?;
        debug!(
            country_code = %region.country_code,
            region_name = %region.region_name,
            "region inserted"
        );
        report.inserted += 1;
    }

    Ok(report)
}

/// Runs [`seed_regions`] in one unit-of-work, so the whole catalog is
/// committed once.
pub async fn run_seed(db: &Database) -> Result<SeedReport> {
    let report = db
        .unit_of_work(|conn| Box::pin(async move { seed_regions(conn).await }))
        .await?;

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "region seed finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use validator::Validate;

    #[test]
    fn catalog_contains_tokyo_and_sydney() {
        let keys: Vec<(String, String)> = default_regions()
            .into_iter()
            .map(|r| (r.country_code, r.region_name))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("JP".to_string(), "Tokyo".to_string()),
                ("AU".to_string(), "Sydney".to_string()),
            ]
        );
    }

    #[test]
    fn catalog_keys_are_unique_and_valid() {
        let regions = default_regions();
        let keys: HashSet<_> = regions
            .iter()
            .map(|r| (r.country_code.clone(), r.region_name.clone()))
            .collect();
        assert_eq!(keys.len(), regions.len());
        for r in &regions {
            r.validate().expect("catalog entry must validate");
            assert_eq!(r.city_type, CityType::Metro);
            assert_eq!(r.base_score, 0);
            assert_eq!(r.tags.len(), 3);
        }
    }
}
