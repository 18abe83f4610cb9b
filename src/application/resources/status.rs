//! Status changes that are not plain updates.

use mealdesk_api_types::catalog::MealPlan;
use mealdesk_api_types::finance::{Subscription, SubscriptionStatus};
use mealdesk_api_types::orders::{Order, OrderStatus};
use serde_json::json;

use crate::cache::{Mutation, ResourceKind, Tag};
use crate::infra::rest::{ApiError, ApiRequest, Payload};

use super::crud::item_path;
use super::{MealPlans, Orders, Resource, Subscriptions};

fn record_tags<R: Resource>(id: &str) -> Vec<Tag> {
    vec![Tag::list(R::KIND), Tag::id(R::KIND, id)]
}

/// Flip a meal plan between active and inactive.
#[derive(Debug, Clone)]
pub struct ToggleMealPlanStatus {
    pub id: String,
}

impl Mutation for ToggleMealPlanStatus {
    type Output = Option<MealPlan>;
    const ENDPOINT: &'static str = "toggle_status";

    fn kind(&self) -> ResourceKind {
        MealPlans::KIND
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        Ok(ApiRequest::patch(format!(
            "{}/toggle-status",
            item_path::<MealPlans>(&self.id)
        )))
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        record_tags::<MealPlans>(&self.id)
    }
}

#[derive(Debug, Clone)]
pub struct SetSubscriptionStatus {
    pub id: String,
    pub status: SubscriptionStatus,
}

impl Mutation for SetSubscriptionStatus {
    type Output = Option<Subscription>;
    const ENDPOINT: &'static str = "set_status";

    fn kind(&self) -> ResourceKind {
        Subscriptions::KIND
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        ApiRequest::patch(format!("{}/status", item_path::<Subscriptions>(&self.id)))
            .json(&json!({ "status": self.status }))
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        record_tags::<Subscriptions>(&self.id)
    }
}

#[derive(Debug, Clone)]
pub struct SetOrderStatus {
    pub id: String,
    pub status: OrderStatus,
}

impl Mutation for SetOrderStatus {
    type Output = Option<Order>;
    const ENDPOINT: &'static str = "set_status";

    fn kind(&self) -> ResourceKind {
        Orders::KIND
    }

    fn request(&self) -> Result<ApiRequest, ApiError> {
        ApiRequest::patch(format!("{}/status", item_path::<Orders>(&self.id)))
            .json(&json!({ "status": self.status }))
    }

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
        payload.into_data()
    }

    fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
        record_tags::<Orders>(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::rest::RequestBody;

    #[test]
    fn toggle_patches_the_plan() {
        let toggle = ToggleMealPlanStatus { id: "mp1".into() };
        let request = toggle.request().expect("request");
        assert_eq!(request.method, reqwest::Method::PATCH);
        assert_eq!(request.path, "meal-plans/mp1/toggle-status");
        assert!(toggle.invalidates(&None).contains(&Tag::list(ResourceKind::MealPlan)));
    }

    #[test]
    fn status_body_uses_wire_names() {
        let set = SetSubscriptionStatus {
            id: "s1".into(),
            status: SubscriptionStatus::Paused,
        };
        let request = set.request().expect("request");
        assert!(matches!(request.body, RequestBody::Json(ref v) if v["status"] == "paused"));

        let order = SetOrderStatus {
            id: "o1".into(),
            status: OrderStatus::Completed,
        };
        assert_eq!(
            order.invalidates(&None),
            vec![Tag::list(ResourceKind::Order), Tag::id(ResourceKind::Order, "o1")]
        );
    }
}
