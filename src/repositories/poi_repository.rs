use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::PoiRepository;
use crate::models::{NewPoi, Poi};
use crate::utils::errors::AppResult;

pub struct PgPoiRepository {
    pool: PgPool,
}

impl PgPoiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PoiRepository for PgPoiRepository {
    async fn find_filtered(&self, epochs: &[String], categories: &[String]) -> AppResult<Vec<Poi>> {
        let pois = sqlx::query_as::<_, Poi>(
            r#"
            SELECT * FROM pois
            WHERE (cardinality($1::text[]) = 0 OR epoch = ANY($1))
              AND (cardinality($2::text[]) = 0 OR category = ANY($2))
            "#,
        )
        .bind(epochs.to_vec())
        .bind(categories.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(pois)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Poi>> {
        let poi = sqlx::query_as::<_, Poi>("SELECT * FROM pois WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(poi)
    }

    async fn create(&self, poi: NewPoi) -> AppResult<Poi> {
        let poi = poi.into_poi();

        let created = sqlx::query_as::<_, Poi>(
            r#"
            INSERT INTO pois (id, name, description, latitude, longitude, epoch, category, importance,
                              year_built, architect, style, photos, wikipedia_url, metadata, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(poi.id)
        .bind(&poi.name)
        .bind(&poi.description)
        .bind(poi.latitude)
        .bind(poi.longitude)
        .bind(&poi.epoch)
        .bind(&poi.category)
        .bind(poi.importance)
        .bind(poi.year_built)
        .bind(&poi.architect)
        .bind(&poi.style)
        .bind(&poi.photos)
        .bind(&poi.wikipedia_url)
        .bind(&poi.metadata)
        .bind(poi.created_at)
        .bind(poi.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pois")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
