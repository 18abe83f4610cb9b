//! Per-resource endpoint definitions.
//!
//! Every back-office resource is a marker type implementing [`Resource`];
//! the generic queries and mutations in [`crud`] turn it into cache-aware
//! endpoints. Singleton content pages and status changes that do not fit
//! plain CRUD live in [`content`] and [`status`].

use std::fmt::Debug;
use std::hash::Hash;

use mealdesk_api_types::catalog::{MealPlan, MealPlanDraft, Menu, MenuDraft, MoreOption, MoreOptionDraft};
use mealdesk_api_types::content::{Faq, FaqDraft};
use mealdesk_api_types::finance::{Expense, ExpenseDraft, Subscription, SubscriptionDraft};
use mealdesk_api_types::locations::{RestaurantLocation, RestaurantLocationDraft};
use mealdesk_api_types::orders::{Order, OrderDraft};
use mealdesk_api_types::people::{Customer, CustomerDraft, Role, RoleDraft, Staff, StaffDraft};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::ResourceKind;

pub mod content;
pub mod crud;
pub mod status;

pub use content::{GetContent, SaveContent};
pub use crud::{Create, Delete, Get, List, ListParams, Update};
pub use status::{SetOrderStatus, SetSubscriptionStatus, ToggleMealPlanStatus};

/// A REST collection with a record type and a draft type.
pub trait Resource: Debug + Clone + Copy + Hash + Default + Send + Sync + 'static {
    const KIND: ResourceKind;
    /// Collection path relative to the API base.
    const PATH: &'static str;

    type Record: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Draft: Debug + Serialize + DeserializeOwned + Send + 'static;

    fn record_id(record: &Self::Record) -> &str;
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct MealPlans;

impl Resource for MealPlans {
    const KIND: ResourceKind = ResourceKind::MealPlan;
    const PATH: &'static str = "meal-plans";
    type Record = MealPlan;
    type Draft = MealPlanDraft;

    fn record_id(record: &MealPlan) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Menus;

impl Resource for Menus {
    const KIND: ResourceKind = ResourceKind::Menu;
    const PATH: &'static str = "menus";
    type Record = Menu;
    type Draft = MenuDraft;

    fn record_id(record: &Menu) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct MoreOptions;

impl Resource for MoreOptions {
    const KIND: ResourceKind = ResourceKind::MoreOption;
    const PATH: &'static str = "more-options";
    type Record = MoreOption;
    type Draft = MoreOptionDraft;

    fn record_id(record: &MoreOption) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Customers;

impl Resource for Customers {
    const KIND: ResourceKind = ResourceKind::Customer;
    const PATH: &'static str = "customers";
    type Record = Customer;
    type Draft = CustomerDraft;

    fn record_id(record: &Customer) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct StaffMembers;

impl Resource for StaffMembers {
    const KIND: ResourceKind = ResourceKind::Staff;
    const PATH: &'static str = "staff";
    type Record = Staff;
    type Draft = StaffDraft;

    fn record_id(record: &Staff) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Roles;

impl Resource for Roles {
    const KIND: ResourceKind = ResourceKind::Role;
    const PATH: &'static str = "roles";
    type Record = Role;
    type Draft = RoleDraft;

    fn record_id(record: &Role) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Expenses;

impl Resource for Expenses {
    const KIND: ResourceKind = ResourceKind::Expense;
    const PATH: &'static str = "expenses";
    type Record = Expense;
    type Draft = ExpenseDraft;

    fn record_id(record: &Expense) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Subscriptions;

impl Resource for Subscriptions {
    const KIND: ResourceKind = ResourceKind::Subscription;
    const PATH: &'static str = "subscriptions";
    type Record = Subscription;
    type Draft = SubscriptionDraft;

    fn record_id(record: &Subscription) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Faqs;

impl Resource for Faqs {
    const KIND: ResourceKind = ResourceKind::Faq;
    const PATH: &'static str = "faqs";
    type Record = Faq;
    type Draft = FaqDraft;

    fn record_id(record: &Faq) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Locations;

impl Resource for Locations {
    const KIND: ResourceKind = ResourceKind::RestaurantLocation;
    const PATH: &'static str = "restaurant-locations";
    type Record = RestaurantLocation;
    type Draft = RestaurantLocationDraft;

    fn record_id(record: &RestaurantLocation) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, Copy, Hash, Default)]
pub struct Orders;

impl Resource for Orders {
    const KIND: ResourceKind = ResourceKind::Order;
    const PATH: &'static str = "orders";
    type Record = Order;
    type Draft = OrderDraft;

    fn record_id(record: &Order) -> &str {
        &record.id
    }
}
