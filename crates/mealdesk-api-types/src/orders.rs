//! POS orders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderType {
    DineIn,
    TakeAway,
    Delivery,
    Online,
    NewMembership,
    MembershipMeal,
}

impl OrderType {
    pub const ALL: [OrderType; 6] = [
        OrderType::DineIn,
        OrderType::TakeAway,
        OrderType::Delivery,
        OrderType::Online,
        OrderType::NewMembership,
        OrderType::MembershipMeal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::DineIn => "DineIn",
            OrderType::TakeAway => "TakeAway",
            OrderType::Delivery => "Delivery",
            OrderType::Online => "Online",
            OrderType::NewMembership => "NewMembership",
            OrderType::MembershipMeal => "MembershipMeal",
        }
    }

    /// Price tier the POS offers by default for this order type.
    pub fn default_price_type(self) -> PriceType {
        match self {
            OrderType::DineIn | OrderType::TakeAway | OrderType::Delivery => PriceType::Restaurant,
            OrderType::Online => PriceType::Online,
            OrderType::NewMembership | OrderType::MembershipMeal => PriceType::Membership,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown order type `{s}`"))
    }
}

/// Price tier applied to order lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Restaurant,
    Online,
    Membership,
}

impl PriceType {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceType::Restaurant => "restaurant",
            PriceType::Online => "online",
            PriceType::Membership => "membership",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restaurant" => Ok(PriceType::Restaurant),
            "online" => Ok(PriceType::Online),
            "membership" => Ok(PriceType::Membership),
            other => Err(format!("unknown price type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item: String,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    pub unit_price: i64,
    #[serde(default)]
    pub options: Vec<String>,
}

impl OrderLine {
    pub fn total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_type: OrderType,
    pub price_type: PriceType,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub total: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_type: OrderType,
    pub price_type: PriceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn total(&self) -> i64 {
        self.lines.iter().map(OrderLine::total).sum()
    }
}
