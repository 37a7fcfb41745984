pub mod sanity;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::models::{RemoteContent, SiteContent};

/// Result of one content fetch: whatever sections arrived plus the errors of
/// the ones that did not.
#[derive(Debug, Clone, Default)]
pub struct ContentFetch {
    pub content: RemoteContent,
    pub errors: BTreeMap<String, String>,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<ContentFetch>;
}

/// Used when no CMS is configured; the site renders its built-in copy.
pub struct StaticContentSource;

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch(&self) -> anyhow::Result<ContentFetch> {
        Ok(ContentFetch::default())
    }
}

pub async fn load_site_content(source: &dyn ContentSource, year: i32) -> SiteContent {
    match source.fetch().await {
        Ok(fetch) => {
            if !fetch.errors.is_empty() {
                tracing::warn!(sections = ?fetch.errors.keys().collect::<Vec<_>>(), "some content sections failed to load");
            }
            let mut content = SiteContent::resolve(&fetch.content, year);
            content.errors = fetch.errors;
            content
        }
        Err(e) => {
            tracing::warn!(error = %e, "content fetch failed, using defaults");
            let mut content = SiteContent::resolve(&RemoteContent::default(), year);
            content.errors.insert("site".to_string(), e.to_string());
            content
        }
    }
}
