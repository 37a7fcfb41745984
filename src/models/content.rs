use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Remote (CMS) shapes ──
//
// Every field is optional; an empty string counts as missing.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContent {
    pub hero_section: Option<RemoteHero>,
    pub contact_section: Option<RemoteContactSection>,
    pub footer_section: Option<RemoteFooter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteHero {
    pub enabled: Option<bool>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContactSection {
    pub enabled: Option<bool>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub contact_info: Option<RemoteContactInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContactInfo {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub schedule: Option<Vec<OpeningHours>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFooter {
    pub enabled: Option<bool>,
    pub business_info: Option<RemoteBusinessInfo>,
    pub contact_info: Option<RemoteContactInfo>,
    pub social_links: Option<BTreeMap<String, Option<String>>>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBusinessInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

// ── Resolved shapes served to the site ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub days: String,
    pub hours: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteContent {
    pub hero: HeroContent,
    pub contact: ContactContent,
    pub footer: FooterContent,
    /// Sections the CMS failed to deliver, keyed by section name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroContent {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactContent {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub schedule: Vec<OpeningHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterContent {
    pub enabled: bool,
    pub business_name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub social_links: Vec<SocialLink>,
    pub copyright: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

const BUSINESS_NAME: &str = "Paws & Care";
const BUSINESS_DESCRIPTION: &str =
    "Providing compassionate veterinary care for your beloved pets since 2009.";
const ADDRESS: &str = "123 Veterinary Lane\nPet City, PC 12345";
const PHONE: &str = "(555) 123-4567";
const EMAIL: &str = "info@pawsandcare.com";

const SOCIAL_NETWORKS: [(&str, &str); 6] = [
    ("facebook", "Facebook"),
    ("instagram", "Instagram"),
    ("twitter", "Twitter"),
    ("linkedin", "LinkedIn"),
    ("youtube", "YouTube"),
    ("tiktok", "TikTok"),
];

fn pick(remote: Option<&String>, default: &str) -> String {
    remote
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn default_schedule() -> Vec<OpeningHours> {
    vec![
        OpeningHours {
            days: "Monday - Friday".to_string(),
            hours: "8:00 AM - 6:00 PM".to_string(),
        },
        OpeningHours {
            days: "Saturday".to_string(),
            hours: "9:00 AM - 4:00 PM".to_string(),
        },
        OpeningHours {
            days: "Sunday".to_string(),
            hours: "Closed".to_string(),
        },
    ]
}

impl SiteContent {
    /// Merges CMS content over the built-in copy. `year` feeds the default copyright line.
    pub fn resolve(remote: &RemoteContent, year: i32) -> Self {
        let hero = remote.hero_section.clone().unwrap_or_default();
        let contact = remote.contact_section.clone().unwrap_or_default();
        let contact_info = contact.contact_info.clone().unwrap_or_default();
        let footer = remote.footer_section.clone().unwrap_or_default();
        let business = footer.business_info.clone().unwrap_or_default();
        let footer_info = footer.contact_info.clone().unwrap_or_default();

        let schedule = contact_info
            .schedule
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_schedule);

        let social_links = footer
            .social_links
            .as_ref()
            .map(|links| {
                SOCIAL_NETWORKS
                    .iter()
                    .filter_map(|(key, name)| {
                        links
                            .get(*key)
                            .and_then(|u| u.as_deref())
                            .map(str::trim)
                            .filter(|u| !u.is_empty())
                            .map(|url| SocialLink {
                                name: name.to_string(),
                                url: url.to_string(),
                            })
                    })
                    .collect()
            })
            .unwrap_or_default();

        SiteContent {
            hero: HeroContent {
                enabled: hero.enabled.unwrap_or(true),
                title: pick(hero.title.as_ref(), "Compassionate Care for Your Beloved Pets"),
                subtitle: pick(
                    hero.subtitle.as_ref(),
                    "Expert veterinary services with a gentle touch. Your pet's health and happiness are our top priority.",
                ),
            },
            contact: ContactContent {
                enabled: contact.enabled.unwrap_or(true),
                title: pick(contact.title.as_ref(), "Get In Touch"),
                subtitle: pick(
                    contact.subtitle.as_ref(),
                    "We're here to answer your questions and schedule appointments",
                ),
                address: pick(contact_info.address.as_ref(), ADDRESS),
                phone: pick(contact_info.phone.as_ref(), PHONE),
                email: pick(contact_info.email.as_ref(), EMAIL),
                schedule,
            },
            footer: FooterContent {
                enabled: footer.enabled.unwrap_or(true),
                business_name: pick(business.name.as_ref(), BUSINESS_NAME),
                description: pick(business.description.as_ref(), BUSINESS_DESCRIPTION),
                address: pick(footer_info.address.as_ref(), ADDRESS),
                phone: pick(footer_info.phone.as_ref(), PHONE),
                email: pick(footer_info.email.as_ref(), EMAIL),
                social_links,
                copyright: pick(
                    footer.copyright.as_ref(),
                    &format!("© {year} Paws & Care Veterinary Clinic. All rights reserved."),
                ),
            },
            errors: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_remote_empty() {
        let content = SiteContent::resolve(&RemoteContent::default(), 2025);
        assert_eq!(content.footer.business_name, "Paws & Care");
        assert_eq!(content.footer.phone, "(555) 123-4567");
        assert_eq!(content.footer.email, "info@pawsandcare.com");
        assert_eq!(
            content.footer.copyright,
            "© 2025 Paws & Care Veterinary Clinic. All rights reserved."
        );
        assert_eq!(content.hero.title, "Compassionate Care for Your Beloved Pets");
        assert_eq!(content.contact.title, "Get In Touch");
        assert!(content.hero.enabled);
        assert!(content.footer.social_links.is_empty());
        assert_eq!(content.contact.schedule.len(), 3);
    }

    #[test]
    fn test_remote_overrides_and_empty_strings_fall_back() {
        let json = r#"{
            "heroSection": {"enabled": false, "title": "Welcome", "subtitle": ""},
            "footerSection": {
                "businessInfo": {"name": "Happy Tails"},
                "contactInfo": {"phone": "   ", "email": "hello@happytails.test"},
                "socialLinks": {"instagram": "https://instagram.com/happytails", "facebook": "", "twitter": null},
                "copyright": ""
            }
        }"#;
        let remote: RemoteContent = serde_json::from_str(json).unwrap();
        let content = SiteContent::resolve(&remote, 2030);

        assert!(!content.hero.enabled);
        assert_eq!(content.hero.title, "Welcome");
        assert!(content.hero.subtitle.starts_with("Expert veterinary services"));
        assert_eq!(content.footer.business_name, "Happy Tails");
        assert_eq!(content.footer.phone, "(555) 123-4567");
        assert_eq!(content.footer.email, "hello@happytails.test");
        assert_eq!(
            content.footer.social_links,
            vec![SocialLink {
                name: "Instagram".to_string(),
                url: "https://instagram.com/happytails".to_string(),
            }]
        );
        assert!(content.footer.copyright.starts_with("© 2030"));
    }

    #[test]
    fn test_remote_schedule_replaces_default() {
        let json = r#"{"contactSection":{"contactInfo":{"schedule":[{"days":"Every day","hours":"24h"}]}}}"#;
        let remote: RemoteContent = serde_json::from_str(json).unwrap();
        let content = SiteContent::resolve(&remote, 2025);
        assert_eq!(content.contact.schedule.len(), 1);
        assert_eq!(content.contact.schedule[0].days, "Every day");
    }
}
