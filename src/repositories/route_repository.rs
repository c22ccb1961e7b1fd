use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::RouteRepository;
use crate::models::{NewRoute, Route, Waypoint};
use crate::utils::errors::AppResult;

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn create(&self, route: NewRoute) -> AppResult<Route> {
        let route = route.into_route();

        let created = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, name, description, total_distance, estimated_duration, epochs, categories, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(&route.name)
        .bind(&route.description)
        .bind(route.total_distance)
        .bind(route.estimated_duration)
        .bind(&route.epochs)
        .bind(&route.categories)
        .bind(route.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn create_waypoints(&self, route_id: Uuid, poi_ids: &[Uuid]) -> AppResult<Vec<Waypoint>> {
        let mut tx = self.pool.begin().await?;
        let mut waypoints = Vec::with_capacity(poi_ids.len());

        for (index, poi_id) in poi_ids.iter().enumerate() {
            let waypoint = sqlx::query_as::<_, Waypoint>(
                r#"
                INSERT INTO waypoints (id, route_id, poi_id, waypoint_order, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(route_id)
            .bind(poi_id)
            .bind(index as i32 + 1)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

            waypoints.push(waypoint);
        }

        tx.commit().await?;
        Ok(waypoints)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    async fn find_waypoints(&self, route_id: Uuid) -> AppResult<Vec<Waypoint>> {
        let waypoints = sqlx::query_as::<_, Waypoint>(
            "SELECT * FROM waypoints WHERE route_id = $1 ORDER BY waypoint_order ASC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(waypoints)
    }
}
