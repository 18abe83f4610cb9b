//! Cache key and tag definitions.
//!
//! A [`QueryKey`] names one cache entry: the resource kind, the endpoint,
//! the parameter type and a hash of the endpoint parameters. A [`Tag`] names what an entry
//! depends on, so a mutation can invalidate every entry providing it.

use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use mealdesk_api_types::content::ContentSlug;

/// Resource families known to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    MealPlan,
    Menu,
    MoreOption,
    Customer,
    Staff,
    Role,
    Expense,
    Subscription,
    Faq,
    RestaurantLocation,
    Order,
    // Singleton content pages
    PrivacyPolicy,
    TermsAndConditions,
    AboutUs,
    RefundPolicy,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::MealPlan => "MealPlan",
            ResourceKind::Menu => "Menu",
            ResourceKind::MoreOption => "MoreOption",
            ResourceKind::Customer => "Customer",
            ResourceKind::Staff => "Staff",
            ResourceKind::Role => "Role",
            ResourceKind::Expense => "Expense",
            ResourceKind::Subscription => "Subscription",
            ResourceKind::Faq => "Faq",
            ResourceKind::RestaurantLocation => "RestaurantLocation",
            ResourceKind::Order => "Order",
            ResourceKind::PrivacyPolicy => "PrivacyPolicy",
            ResourceKind::TermsAndConditions => "TermsAndConditions",
            ResourceKind::AboutUs => "AboutUs",
            ResourceKind::RefundPolicy => "RefundPolicy",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContentSlug> for ResourceKind {
    fn from(slug: ContentSlug) -> Self {
        match slug {
            ContentSlug::PrivacyPolicy => ResourceKind::PrivacyPolicy,
            ContentSlug::TermsAndConditions => ResourceKind::TermsAndConditions,
            ContentSlug::AboutUs => ResourceKind::AboutUs,
            ContentSlug::RefundPolicy => ResourceKind::RefundPolicy,
        }
    }
}

/// Which slice of a resource kind a tag covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagId {
    /// Every list query of the kind.
    List,
    /// The one record of a singleton kind.
    Single,
    /// A record by server id.
    Id(String),
}

/// Invalidation identity: `(kind, LIST | SINGLE | id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub kind: ResourceKind,
    pub id: TagId,
}

impl Tag {
    pub fn list(kind: ResourceKind) -> Self {
        Self {
            kind,
            id: TagId::List,
        }
    }

    pub fn single(kind: ResourceKind) -> Self {
        Self {
            kind,
            id: TagId::Single,
        }
    }

    pub fn id(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: TagId::Id(id.into()),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            TagId::List => write!(f, "{}:LIST", self.kind),
            TagId::Single => write!(f, "{}:SINGLE", self.kind),
            TagId::Id(id) => write!(f, "{}:{id}", self.kind),
        }
    }
}

/// Identity of one cache entry.
///
/// Two queries with equal parameters produce the same key and therefore
/// share an entry and its in-flight request. Parameters of different types
/// never share a key, so an entry's data always downcasts to its query's
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub endpoint: &'static str,
    pub params_type: TypeId,
    pub params_hash: u64,
}

impl QueryKey {
    pub fn new<P: Hash + 'static>(kind: ResourceKind, endpoint: &'static str, params: &P) -> Self {
        Self {
            kind,
            endpoint,
            params_type: TypeId::of::<P>(),
            params_hash: hash_value(params),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}#{:016x}",
            self.kind, self.endpoint, self.params_hash
        )
    }
}

/// Compute a hash for any hashable value.
pub fn hash_value<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_render_kind_and_id() {
        assert_eq!(Tag::list(ResourceKind::MealPlan).to_string(), "MealPlan:LIST");
        assert_eq!(Tag::single(ResourceKind::AboutUs).to_string(), "AboutUs:SINGLE");
        assert_eq!(Tag::id(ResourceKind::Faq, "f1").to_string(), "Faq:f1");
    }

    #[test]
    fn equal_params_share_a_key() {
        let a = QueryKey::new(ResourceKind::Menu, "list", &(Some(1u32), "x"));
        let b = QueryKey::new(ResourceKind::Menu, "list", &(Some(1u32), "x"));
        assert_eq!(a, b);

        let c = QueryKey::new(ResourceKind::Menu, "list", &(Some(2u32), "x"));
        assert_ne!(a, c);
    }

    #[test]
    fn kind_and_endpoint_distinguish_keys() {
        let list = QueryKey::new(ResourceKind::Menu, "list", &());
        let get = QueryKey::new(ResourceKind::Menu, "get", &());
        let other = QueryKey::new(ResourceKind::Faq, "list", &());
        assert_ne!(list, get);
        assert_ne!(list, other);
    }

    #[test]
    fn parameter_types_distinguish_keys() {
        #[derive(Hash)]
        struct Page(u32);
        #[derive(Hash)]
        struct Offset(u32);

        let page = QueryKey::new(ResourceKind::Menu, "list", &Page(1));
        let offset = QueryKey::new(ResourceKind::Menu, "list", &Offset(1));
        assert_eq!(page.params_hash, offset.params_hash);
        assert_ne!(page, offset);
    }

    #[test]
    fn content_slugs_map_to_their_own_kind() {
        assert_eq!(
            ResourceKind::from(ContentSlug::RefundPolicy),
            ResourceKind::RefundPolicy
        );
        assert_ne!(
            ResourceKind::from(ContentSlug::AboutUs),
            ResourceKind::from(ContentSlug::PrivacyPolicy)
        );
    }
}
