//! Singleton content pages (privacy policy, terms, about us, refund policy).
//!
//! A page that was never written answers 404. Reads normalize that into an
//! empty success so editors open on a blank page instead of an error.

use mealdesk_api_types::content::{ContentPage, ContentPageDraft, ContentSlug};

use crate::cache::{Mutation, Query, ResourceKind, Tag};
use crate::infra::rest::{ApiError, ApiRequest, Payload};

#[derive(Debug, Clone, Copy, Hash)]
pub struct GetContent {
    pub slug: ContentSlug,
    pub empty_on_missing: bool,
}

impl GetContent {
    pub fn new(slug: ContentSlug) -> Self {
        Self {
            slug,
            empty_on_missing: true,
        }
    }

    /// Report a missing page as an error instead of an empty result.
    pub fn strict(slug: ContentSlug) -> Self {
        Self {
            slug,
            empty_on_missing: false,
        }
    }
}

impl Query for GetContent {
    type Output = ContentPage;
    const ENDPOINT: &'static str = "content";

    fn kind(&self) -> ResourceKind {
        self.slug.into()
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(self.slug.as_str())
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn provides(&self, _output: Option<&Self::Output>) -> Vec<Tag> {
        vec![Tag::single(self.kind())]
    }

    fn not_found_as_empty(&self) -> bool {
        self.empty_on_missing
    }
}

/// Create or replace a content page.
#[derive(Debug, Clone)]
pub struct SaveContent {
    pub slug: ContentSlug,
    pub draft: ContentPageDraft,
}

impl SaveContent {
    pub fn new(slug: ContentSlug, draft: ContentPageDraft) -> Self {
        Self { slug, draft }
    }
}

impl Mutation for SaveContent {
    type Output = Option<ContentPage>;
    const ENDPOINT: &'static str = "save_content";

    fn kind(&self) -> ResourceKind {
        self.slug.into()
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        ApiRequest::post(self.slug.as_str()).json(&self.draft)
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        vec![Tag::single(self.kind())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_have_distinct_keys_and_tags() {
        let about = GetContent::new(ContentSlug::AboutUs);
        let refund = GetContent::new(ContentSlug::RefundPolicy);
        assert_ne!(about.key(), refund.key());
        assert_eq!(
            about.provides(None),
            vec![Tag::single(ResourceKind::AboutUs)]
        );
    }

    #[test]
    fn missing_pages_are_empty_by_default() {
        assert!(GetContent::new(ContentSlug::PrivacyPolicy).not_found_as_empty());
        assert!(!GetContent::strict(ContentSlug::PrivacyPolicy).not_found_as_empty());
    }

    #[test]
    fn save_targets_the_page_path() {
        let save = SaveContent::new(
            ContentSlug::TermsAndConditions,
            ContentPageDraft {
                title: None,
                content: "Be nice.".into(),
            },
        );
        let request = save.request().expect("request");
        assert_eq!(request.path, "terms-and-conditions");
        assert_eq!(
            save.invalidates(&None),
            vec![Tag::single(ResourceKind::TermsAndConditions)]
        );
    }
}
