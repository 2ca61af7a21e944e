//! Paginated responses.

use market_app::pagination::{PageRequest, Paginated};
use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

/// Builds a page request from the `page` and `limit` query parameters.
pub(crate) fn page_request(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
) -> PageRequest {
    PageRequest::new(page.into_inner(), limit.into_inner())
}

/// One page of results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginatedResponse<T: ToSchema + 'static> {
    pub data: Vec<T>,
    pub paginator: Paginator,
}

/// Position of a page within the whole result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Paginator {
    pub data_count: u64,
    pub limit: u32,
    pub page: u32,
    pub page_count: u64,
    pub offset: u64,
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl<T, U> From<Paginated<U>> for PaginatedResponse<T>
where
    T: ToSchema + From<U> + 'static,
{
    fn from(page: Paginated<U>) -> Self {
        let paginator = Paginator {
            data_count: page.data_count,
            limit: page.limit,
            page: page.page,
            page_count: page.page_count,
            offset: page.offset,
            paging_counter: page.paging_counter,
            has_prev_page: page.has_prev_page,
            has_next_page: page.has_next_page,
            prev_page: page.prev_page,
            next_page: page.next_page,
        };

        Self {
            data: page.data.into_iter().map(T::from).collect(),
            paginator,
        }
    }
}
