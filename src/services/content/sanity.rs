use std::future::Future;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{ContentFetch, ContentSource};
use crate::models::RemoteContent;

const HERO_FIELDS: &str = "{enabled, title, subtitle}";
const CONTACT_FIELDS: &str =
    "{enabled, title, subtitle, contactInfo{address, phone, email, schedule[]{days, hours}}}";
const FOOTER_FIELDS: &str = "{enabled, businessInfo{name, description}, contactInfo{address, phone, email}, socialLinks{facebook, instagram, twitter, linkedin, youtube, tiktok}, copyright}";

fn site_query() -> String {
    format!(
        r#"*[_type == "siteSettings"][0]{{heroSection{HERO_FIELDS}, contactSection{CONTACT_FIELDS}, footerSection{FOOTER_FIELDS}}}"#
    )
}

fn section_query(section: &str, fields: &str) -> String {
    format!(r#"*[_type == "siteSettings"][0].{section}{fields}"#)
}

pub struct SanityContentSource {
    endpoint: String,
    client: reqwest::Client,
}

impl SanityContentSource {
    pub fn new(project_id: &str, dataset: &str, api_version: &str) -> Self {
        Self {
            endpoint: format!(
                "https://{project_id}.apicdn.sanity.io/v{api_version}/data/query/{dataset}"
            ),
            client: reqwest::Client::new(),
        }
    }

    async fn query(&self, groq: String) -> anyhow::Result<serde_json::Value> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("query", groq.as_str())])
            .send()
            .await
            .context("failed to call Sanity API")?;

        let status = resp.status();
        let mut data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Sanity response")?;

        if !status.is_success() {
            anyhow::bail!("Sanity API error ({}): {}", status, data);
        }

        Ok(data["result"].take())
    }
}

#[async_trait]
impl ContentSource for SanityContentSource {
    async fn fetch(&self) -> anyhow::Result<ContentFetch> {
        fetch_with_fallback(|groq| self.query(groq)).await
    }
}

/// One query for the whole site first; if that fails, each section on its
/// own so a single broken section does not blank the page.
pub async fn fetch_with_fallback<F, Fut>(query: F) -> anyhow::Result<ContentFetch>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = anyhow::Result<serde_json::Value>>,
{
    match query(site_query()).await.and_then(parse::<RemoteContent>) {
        Ok(content) => {
            tracing::debug!("site content fetched in one query");
            return Ok(ContentFetch {
                content,
                errors: Default::default(),
            });
        }
        Err(e) => {
            tracing::warn!(error = %e, "site content query failed, falling back to per-section queries");
        }
    }

    let mut fetch = ContentFetch::default();

    match query(section_query("heroSection", HERO_FIELDS)).await.and_then(parse) {
        Ok(hero) => fetch.content.hero_section = hero,
        Err(e) => {
            fetch.errors.insert("heroSection".to_string(), e.to_string());
        }
    }
    match query(section_query("contactSection", CONTACT_FIELDS)).await.and_then(parse) {
        Ok(contact) => fetch.content.contact_section = contact,
        Err(e) => {
            fetch.errors.insert("contactSection".to_string(), e.to_string());
        }
    }
    match query(section_query("footerSection", FOOTER_FIELDS)).await.and_then(parse) {
        Ok(footer) => fetch.content.footer_section = footer,
        Err(e) => {
            fetch.errors.insert("footerSection".to_string(), e.to_string());
        }
    }

    if fetch.errors.len() == 3 {
        anyhow::bail!("all content sections failed to load");
    }
    Ok(fetch)
}

fn parse<T: DeserializeOwned>(value: serde_json::Value) -> anyhow::Result<T> {
    serde_json::from_value(value).context("unexpected content shape")
}
