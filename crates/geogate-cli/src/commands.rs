use anyhow::{Context, Result, bail};
use geogate_access::AccessEngine;
use geogate_models::{AccessSummary, Actor};

/// Replaces the city grants of `user_id` and returns the ids actually stored.
pub async fn sync_cities(
    engine: &AccessEngine,
    user_id: i64,
    city_ids: &[i64],
    granted_by: Option<i64>,
) -> Result<Vec<i64>> {
    if user_id <= 0 {
        bail!("user id must be positive, got {user_id}");
    }

    engine
        .sync_city_access(user_id, city_ids, granted_by)
        .await
        .with_context(|| format!("failed to sync city access for user {user_id}"))
}

/// Resolves everything the engine grants to `user_id` acting with `role`.
pub async fn show_access(
    engine: &AccessEngine,
    user_id: i64,
    role: Option<String>,
) -> Result<AccessSummary> {
    let actor = Actor::new(user_id, role);
    engine
        .summarize(&actor)
        .await
        .with_context(|| format!("failed to resolve access for user {user_id}"))
}

pub fn render_summary(summary: &AccessSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to render access summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogate_config::AccessConfig;
    use geogate_db::InMemoryAccessStore;
    use std::sync::Arc;

    fn engine(store: Arc<InMemoryAccessStore>) -> AccessEngine {
        AccessEngine::new(store, AccessConfig::default())
    }

    #[tokio::test]
    async fn test_sync_cities_dedupes() {
        let engine = engine(Arc::new(InMemoryAccessStore::new()));
        let synced = sync_cities(&engine, 7, &[3, 1, 3], None).await.unwrap();
        assert_eq!(synced, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_sync_cities_rejects_non_positive_user() {
        let engine = engine(Arc::new(InMemoryAccessStore::new()));
        assert!(sync_cities(&engine, 0, &[1], None).await.is_err());
    }

    #[tokio::test]
    async fn test_show_access_after_sync() {
        let store = Arc::new(InMemoryAccessStore::new());
        store.grant_role_permission(7, "cities", "view");
        let engine = engine(store);

        sync_cities(&engine, 7, &[4], None).await.unwrap();
        let summary = show_access(&engine, 7, Some("analyst".to_string()))
            .await
            .unwrap();

        assert_eq!(summary.permissions, vec!["cities:view"]);
        let rendered = render_summary(&summary).unwrap();
        assert!(rendered.contains("\"base_city_scope\""));
    }

    #[tokio::test]
    async fn test_store_failure_has_context() {
        let store = Arc::new(InMemoryAccessStore::new());
        store.set_failing(true);
        let engine = engine(store);

        let err = show_access(&engine, 7, None).await.unwrap_err();
        assert!(err.to_string().contains("user 7"));
    }
}
