use async_trait::async_trait;
use geogate_models::{City, CityIdRow, PermissionGrantRow, Zone, ZoneAccess, ZoneIdRow};
use sqlx::PgPool;
use tracing::instrument;

use crate::filters::build_zone_filter_clause;
use crate::{AccessStore, StoreError};

const PERMISSION_GRANTS_QUERY: &str = r#"
    SELECT p.module, p.action, NULL::int AS city_id, TRUE AS inherited
    FROM permissions p
    JOIN role_permissions rp ON rp.permission_id = p.id
    JOIN user_roles ur ON ur.role_id = rp.role_id
    WHERE ur.user_id = $1
    UNION ALL
    SELECT p.module, p.action, up.city_id, FALSE AS inherited
    FROM permissions p
    JOIN user_permissions up ON up.permission_id = p.id
    WHERE up.user_id = $1
"#;

/// [`AccessStore`] backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PgAccessStore {
    db: PgPool,
}

impl PgAccessStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl AccessStore for PgAccessStore {
    #[instrument(skip(self))]
    async fn permission_grants(&self, user_id: i64) -> Result<Vec<PermissionGrantRow>, StoreError> {
        let rows = sqlx::query_as::<_, PermissionGrantRow>(PERMISSION_GRANTS_QUERY)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn city_ids(&self, user_id: i64) -> Result<Vec<i64>, StoreError> {
        let rows = sqlx::query_as::<_, CityIdRow>(
            "SELECT city_id FROM user_city_access WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| i64::from(r.city_id)).collect())
    }

    #[instrument(skip(self))]
    async fn granted_cities(&self, user_id: i64) -> Result<Vec<City>, StoreError> {
        let cities = sqlx::query_as::<_, City>(
            r#"SELECT c.city_id, c.city_name
            FROM user_city_access uca
            JOIN cities c ON c.city_id = uca.city_id
            WHERE uca.user_id = $1
            ORDER BY c.city_name ASC"#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(cities)
    }

    #[instrument(skip(self))]
    async fn all_cities(&self) -> Result<Vec<City>, StoreError> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT city_id, city_name FROM cities ORDER BY city_name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(cities)
    }

    #[instrument(skip(self))]
    async fn zone_ids(&self, user_id: i64) -> Result<Vec<i64>, StoreError> {
        let rows = sqlx::query_as::<_, ZoneIdRow>(
            "SELECT zone_id FROM user_zone_access WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| i64::from(r.zone_id)).collect())
    }

    #[instrument(skip(self))]
    async fn replace_city_grants(
        &self,
        user_id: i64,
        city_ids: &[i64],
        granted_by: Option<i64>,
    ) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_city_access WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if !city_ids.is_empty() {
            sqlx::query(
                r#"INSERT INTO user_city_access (user_id, city_id, granted_at, granted_by)
                SELECT $1, UNNEST($2::bigint[]), NOW(), $3
                ON CONFLICT DO NOTHING"#,
            )
            .bind(user_id)
            .bind(city_ids)
            .bind(granted_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn cities_in_scope(&self, filter: Option<&[i64]>) -> Result<Vec<City>, StoreError> {
        let cities = match filter {
            None => self.all_cities().await?,
            Some([]) => Vec::new(),
            Some(ids) => {
                sqlx::query_as::<_, City>(
                    r#"SELECT city_id, city_name FROM cities
                    WHERE city_id = ANY($1::bigint[])
                    ORDER BY city_name ASC"#,
                )
                .bind(ids)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(cities)
    }

    #[instrument(skip(self))]
    async fn zones_in_scope(&self, scope: &ZoneAccess) -> Result<Vec<Zone>, StoreError> {
        let filter = build_zone_filter_clause(Some(scope), "z", 0);
        let sql = format!(
            "SELECT z.zone_id, z.zone_name, z.city_id FROM zones z {} ORDER BY z.zone_name ASC",
            filter.clause
        );

        let mut query = sqlx::query_as::<_, Zone>(&sql);
        if let Some(ids) = filter.ids {
            query = query.bind(ids);
        }

        Ok(query.fetch_all(&self.db).await?)
    }
}
