use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ContentRepository;
use crate::models::{Content, NewContent};
use crate::utils::errors::{AppError, AppResult};

pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn create(&self, content: NewContent) -> AppResult<Content> {
        let content = content.into_content();

        let result = sqlx::query_as::<_, Content>(
            r#"
            INSERT INTO contents (id, waypoint_id, text, audio_url, audio_path, duration, photos, generated, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(content.id)
        .bind(content.waypoint_id)
        .bind(&content.text)
        .bind(&content.audio_url)
        .bind(&content.audio_path)
        .bind(content.duration)
        .bind(&content.photos)
        .bind(content.generated)
        .bind(content.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("Content for waypoint '{}' already exists", content.waypoint_id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_waypoint(&self, waypoint_id: Uuid) -> AppResult<Option<Content>> {
        let content = sqlx::query_as::<_, Content>("SELECT * FROM contents WHERE waypoint_id = $1")
            .bind(waypoint_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(content)
    }
}
