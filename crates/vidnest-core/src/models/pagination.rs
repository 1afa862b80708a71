use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::constants::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
use crate::validation::parse_positive;

/// Raw `page`/`limit` query parameters.
///
/// Values are kept as strings so that junk input falls back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(
            parse_positive(self.page.as_deref(), DEFAULT_PAGE),
            parse_positive(self.limit.as_deref(), DEFAULT_LIMIT),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// `limit` is clamped to `1..=MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Self {
        PageRequest {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)).saturating_mul(i64::from(self.limit))
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

/// One page of results with navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub docs: Vec<T>,
    pub total_docs: i64,
    pub limit: u32,
    pub page: u32,
    pub total_pages: u32,
    /// 1-based position of the first doc of this page in the full result.
    pub paging_counter: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl<T> Paginated<T> {
    pub fn new(docs: Vec<T>, total_docs: i64, request: PageRequest) -> Self {
        let limit = i64::from(request.limit);
        let total_pages = ((total_docs.max(0) + limit - 1) / limit).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let page = request.page;
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Paginated {
            docs,
            total_docs,
            limit: request.limit,
            page,
            total_pages,
            paging_counter: request.offset().saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            limit: self.limit,
            page: self.page,
            total_pages: self.total_pages,
            paging_counter: self.paging_counter,
            has_prev_page: self.has_prev_page,
            has_next_page: self.has_next_page,
            prev_page: self.prev_page,
            next_page: self.next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_and_junk_values() {
        let query = PageQuery {
            page: Some("two".to_string()),
            limit: None,
        };
        assert_eq!(query.to_request(), PageRequest::new(1, 10));
    }

    #[test]
    fn huge_values_are_clamped_without_overflow() {
        let query = PageQuery {
            page: Some(u32::MAX.to_string()),
            limit: Some(u32::MAX.to_string()),
        };
        let request = query.to_request();
        assert_eq!(request.limit, MAX_LIMIT);
        assert_eq!(request.offset(), i64::from(u32::MAX - 1) * i64::from(MAX_LIMIT));

        let page: Paginated<u8> = Paginated::new(vec![], 3, request);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);
        assert_eq!(page.prev_page, Some(u32::MAX - 1));
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page = Paginated::new(vec![1, 2], 25, PageRequest::new(2, 10));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.paging_counter, 11);
        assert_eq!(page.prev_page, Some(1));
        assert_eq!(page.next_page, Some(3));
    }

    #[test]
    fn empty_result_has_single_page() {
        let page: Paginated<u8> = Paginated::new(vec![], 0, PageRequest::default());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
        assert_eq!(page.next_page, None);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalDocs"], 0);
        assert_eq!(json["pagingCounter"], 1);
    }
}
