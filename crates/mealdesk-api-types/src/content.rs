//! FAQs and the singleton content pages (privacy policy, terms, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub order: i32,
}

/// Site-wide text pages. Each exists at most once on the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ContentSlug {
    PrivacyPolicy,
    TermsAndConditions,
    AboutUs,
    RefundPolicy,
}

impl ContentSlug {
    pub const ALL: [ContentSlug; 4] = [
        ContentSlug::PrivacyPolicy,
        ContentSlug::TermsAndConditions,
        ContentSlug::AboutUs,
        ContentSlug::RefundPolicy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentSlug::PrivacyPolicy => "privacy-policy",
            ContentSlug::TermsAndConditions => "terms-and-conditions",
            ContentSlug::AboutUs => "about-us",
            ContentSlug::RefundPolicy => "refund-policy",
        }
    }
}

impl fmt::Display for ContentSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentSlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentSlug::ALL
            .into_iter()
            .find(|slug| slug.as_str() == s)
            .ok_or_else(|| format!("unknown content page `{s}`"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentPageDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_parses_from_path_form() {
        assert_eq!(
            "privacy-policy".parse::<ContentSlug>(),
            Ok(ContentSlug::PrivacyPolicy)
        );
        assert!("cookies".parse::<ContentSlug>().is_err());
    }

    #[test]
    fn slug_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ContentSlug::TermsAndConditions).expect("json");
        assert_eq!(json, "\"terms-and-conditions\"");
    }
}
