use serde::{Deserialize, Serialize};

/// Uniform response wrapper used by every back-office endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A decoded list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self { items, pagination }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_missing_optional_fields() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).expect("envelope");
        assert_eq!(env.data, vec![1, 2]);
        assert!(env.success.is_none());
        assert!(env.pagination.is_none());
    }

    #[test]
    fn pagination_reports_next_page() {
        let p: Pagination =
            serde_json::from_str(r#"{"page":1,"limit":10,"total":25,"totalPages":3}"#)
                .expect("pagination");
        assert!(p.has_next());
        assert!(
            !Pagination {
                page: 3,
                ..p
            }
            .has_next()
        );
    }
}
