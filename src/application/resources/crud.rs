//! Generic list/get/create/update/delete endpoints.

use std::marker::PhantomData;

use mealdesk_api_types::Page;

use crate::cache::{Mutation, Query, ResourceKind, Tag};
use crate::infra::rest::{ApiError, ApiRequest, Payload};

use super::Resource;

/// Paging and search parameters of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Provides `LIST` and one id tag per returned record.
#[derive(Debug, Clone, Hash, Default)]
pub struct List<R> {
    pub params: ListParams,
    _resource: PhantomData<R>,
}

impl<R: Resource> List<R> {
    pub fn new(params: ListParams) -> Self {
        Self {
            params,
            _resource: PhantomData,
        }
    }

    pub fn all() -> Self {
        Self::new(ListParams::default())
    }
}

impl<R: Resource> Query for List<R> {
    type Output = Page<R::Record>;
    const ENDPOINT: &'static str = "list";

    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(R::PATH)
            .query_opt("page", self.params.page)
            .query_opt("limit", self.params.limit)
            .query_opt("search", self.params.search.as_deref())
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_page()
    }

    fn provides(&self, output: Option<&Self::Output>) -> Vec<Tag> {
        let mut tags = vec![Tag::list(R::KIND)];
        if let Some(page) = output {
            tags.extend(
                page.items
                    .iter()
                    .map(|record| Tag::id(R::KIND, R::record_id(record))),
            );
        }
        tags
    }
}

/// One record by id.
#[derive(Debug, Clone, Hash)]
pub struct Get<R> {
    pub id: String,
    _resource: PhantomData<R>,
}

impl<R: Resource> Get<R> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Query for Get<R> {
    type Output = R::Record;
    const ENDPOINT: &'static str = "get";

    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(item_path::<R>(&self.id))
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn provides(&self, _output: Option<&Self::Output>) -> Vec<Tag> {
        vec![Tag::id(R::KIND, self.id.clone())]
    }
}

/// Create a record; invalidates the kind's lists.
#[derive(Debug)]
pub struct Create<R: Resource> {
    pub draft: R::Draft,
}

impl<R: Resource> Create<R> {
    pub fn new(draft: R::Draft) -> Self {
        Self { draft }
    }
}

impl<R: Resource> Mutation for Create<R> {
    /// `None` when the server acknowledges without echoing the record.
    type Output = Option<R::Record>;
    const ENDPOINT: &'static str = "create";

    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        ApiRequest::post(R::PATH).json(&self.draft)
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        vec![Tag::list(R::KIND)]
    }
}

/// Replace a record; invalidates the kind's lists and the record.
#[derive(Debug)]
pub struct Update<R: Resource> {
    pub id: String,
    pub draft: R::Draft,
}

impl<R: Resource> Update<R> {
    pub fn new(id: impl Into<String>, draft: R::Draft) -> Self {
        Self {
            id: id.into(),
            draft,
        }
    }
}

impl<R: Resource> Mutation for Update<R> {
    type Output = Option<R::Record>;
    const ENDPOINT: &'static str = "update";

    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        ApiRequest::put(item_path::<R>(&self.id)).json(&self.draft)
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        vec![Tag::list(R::KIND), Tag::id(R::KIND, self.id.clone())]
    }
}

#[derive(Debug)]
pub struct Delete<R> {
    pub id: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Delete<R> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Mutation for Delete<R> {
    type Output = ();
    const ENDPOINT: &'static str = "delete";

    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        Ok(ApiRequest::delete(item_path::<R>(&self.id)))
    }

    fn decode(&self, _payload: Payload) -> Result<Self::Output, ApiError> {
        Ok(())
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        vec![Tag::list(R::KIND), Tag::id(R::KIND, self.id.clone())]
    }
}

pub(crate) fn item_path<R: Resource>(id: &str) -> String {
    format!("{}/{}", R::PATH, id)
}

#[cfg(test)]
mod tests {
    use mealdesk_api_types::catalog::MealPlanDraft;
    use serde_json::json;

    use super::*;
    use crate::application::resources::{Faqs, MealPlans};
    use crate::cache::TagId;
    use crate::infra::rest::RequestBody;

    #[test]
    fn list_request_carries_only_set_params() {
        let query = List::<Faqs>::new(ListParams::page(2, 20));
        let request = query.request();
        assert_eq!(request.path, "faqs");
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string())
            ]
        );
    }

    #[test]
    fn list_params_change_the_key() {
        let first = List::<Faqs>::new(ListParams::page(1, 10));
        let second = List::<Faqs>::new(ListParams::page(2, 10));
        let searched = List::<Faqs>::new(ListParams::page(1, 10).with_search("hours"));
        assert_ne!(first.key(), second.key());
        assert_ne!(first.key(), searched.key());
        assert_eq!(first.key(), List::<Faqs>::new(ListParams::page(1, 10)).key());
    }

    #[test]
    fn list_and_get_of_different_kinds_do_not_collide() {
        assert_ne!(List::<Faqs>::all().key(), List::<MealPlans>::all().key());
        assert_ne!(Get::<Faqs>::new("x").key(), Get::<MealPlans>::new("x").key());
    }

    #[test]
    fn list_provides_list_and_record_tags() {
        let query = List::<Faqs>::all();
        let page = query
            .decode(Payload::new(json!([
                {"_id": "f1", "question": "Q1", "answer": "A1"},
                {"_id": "f2", "question": "Q2", "answer": "A2"}
            ])))
            .expect("page");
        let tags = query.provides(Some(&page));
        assert_eq!(tags[0], Tag::list(ResourceKind::Faq));
        assert!(tags.contains(&Tag::id(ResourceKind::Faq, "f2")));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn get_provides_its_id() {
        let query = Get::<MealPlans>::new("mp1");
        assert_eq!(query.request().path, "meal-plans/mp1");
        let tags = query.provides(None);
        assert_eq!(tags, vec![Tag::id(ResourceKind::MealPlan, "mp1")]);
    }

    #[test]
    fn create_posts_json_and_invalidates_lists() {
        let mutation = Create::<MealPlans>::new(MealPlanDraft {
            title: "Keto".into(),
            price: 12_000,
            duration_days: 30,
            meals_per_day: 2,
            active: true,
            ..MealPlanDraft::default()
        });
        let request = mutation.request().expect("request");
        assert_eq!(request.method, reqwest::Method::POST);
        assert!(matches!(request.body, RequestBody::Json(ref v) if v["title"] == "Keto"));
        assert_eq!(mutation.invalidates(&None), vec![Tag::list(ResourceKind::MealPlan)]);
    }

    #[test]
    fn create_accepts_empty_acknowledgement() {
        let mutation = Create::<Faqs>::new(Default::default());
        let output = mutation.decode(Payload::default()).expect("decode");
        assert!(output.is_none());
    }

    #[test]
    fn update_and_delete_invalidate_list_and_record() {
        let update = Update::<MealPlans>::new("mp1", MealPlanDraft::default());
        assert_eq!(
            update.request().expect("request").method,
            reqwest::Method::PUT
        );
        let tags = update.invalidates(&None);
        assert!(tags.iter().any(|tag| tag.id == TagId::List));
        assert!(tags.contains(&Tag::id(ResourceKind::MealPlan, "mp1")));

        let delete = Delete::<MealPlans>::new("mp1");
        let request = delete.request().expect("request");
        assert_eq!(request.method, reqwest::Method::DELETE);
        assert_eq!(request.path, "meal-plans/mp1");
        assert_eq!(delete.invalidates(&()).len(), 2);
    }
}
