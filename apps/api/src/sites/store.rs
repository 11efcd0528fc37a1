//! Append-only site store and the fire-and-forget submission used after
//! generation.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::site::SiteRow;
use crate::models::{GeneratedPageContent, ProjectProfile};

/// A site ready to be stored. Construction strips credentials.
#[derive(Debug, Clone)]
pub struct NewSite {
    pub profile: ProjectProfile,
    pub content: GeneratedPageContent,
}

impl NewSite {
    pub fn new(profile: &ProjectProfile, content: &GeneratedPageContent) -> Self {
        Self {
            profile: profile.without_credentials(),
            content: content.clone(),
        }
    }
}

/// Storage backend for generated sites. Carried in `AppState` as `Arc<dyn SiteStore>`.
#[async_trait]
pub trait SiteStore: Send + Sync {
    async fn save(&self, site: NewSite) -> Result<SiteRow>;
    async fn fetch(&self, id: Uuid) -> Result<Option<SiteRow>>;
}

pub struct PgSiteStore {
    pool: PgPool,
}

impl PgSiteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteStore for PgSiteStore {
    async fn save(&self, site: NewSite) -> Result<SiteRow> {
        let profile_json =
            serde_json::to_value(&site.profile).context("Failed to serialize profile")?;
        let content_json =
            serde_json::to_value(&site.content).context("Failed to serialize content")?;

        // Append-only: INSERT, never UPDATE
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            INSERT INTO sites (profile_json, content_json, company_name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, profile_json, content_json, company_name, created_at
            "#,
        )
        .bind(&profile_json)
        .bind(&content_json)
        .bind(&site.profile.company.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<SiteRow>> {
        let row = sqlx::query_as::<_, SiteRow>(
            "SELECT id, profile_json, content_json, company_name, created_at FROM sites WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Hands a save to the tokio executor and returns immediately.
///
/// The outcome is only logged. Callers may drop the handle; tests await it.
pub fn submit_site(
    store: Arc<dyn SiteStore>,
    profile: &ProjectProfile,
    content: &GeneratedPageContent,
) -> JoinHandle<()> {
    let site = NewSite::new(profile, content);
    let profile_id = site.profile.id;

    tokio::spawn(async move {
        match store.save(site).await {
            Ok(row) => info!("Saved site {} for profile {}", row.id, profile_id),
            Err(e) => error!("Failed to save site for profile {profile_id}: {e:#}"),
        }
    })
}
