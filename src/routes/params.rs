use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Clone, Copy)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Returns `(page, limit, offset)` with page >= 1 and limit in 1..=100.
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = (page - 1).saturating_mul(limit);
        (page, limit, offset)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreQuery {
    /// Case-insensitive partial match on the store name.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl StoreQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive partial match on the product name.
    pub q: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StoreProductQuery {
    /// Case-insensitive partial match on the product name.
    pub q: Option<String>,
    /// Only listings with stock > 0.
    pub in_stock: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl StoreProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Drop blank search terms so `?q=` behaves like no filter.
pub fn search_term(q: Option<&String>) -> Option<&str> {
    q.map(|s| s.trim()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(Pagination::default().normalize(), (1, 10, 0));
        assert_eq!(
            Pagination {
                page: Some(3),
                limit: Some(20)
            }
            .normalize(),
            (3, 20, 40)
        );
        assert_eq!(
            Pagination {
                page: Some(0),
                limit: Some(1000)
            }
            .normalize(),
            (1, 100, 0)
        );
    }

    #[test]
    fn huge_page_saturates_offset() {
        let (page, limit, offset) = Pagination {
            page: Some(i64::MAX),
            limit: Some(10),
        }
        .normalize();
        assert_eq!((page, limit), (i64::MAX, 10));
        assert_eq!(offset, i64::MAX);
    }

    #[test]
    fn blank_search_is_ignored() {
        let blank = "   ".to_string();
        let term = " leche ".to_string();
        assert_eq!(search_term(Some(&blank)), None);
        assert_eq!(search_term(Some(&term)), Some("leche"));
        assert_eq!(search_term(None), None);
    }
}
