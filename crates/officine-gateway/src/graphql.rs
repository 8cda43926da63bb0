//! # GraphQL Envelope
//!
//! Read-path response types. The backend answers every query with a
//! `{ data, errors }` envelope; a populated `errors` collection is a
//! failure even when the HTTP status says otherwise.

use serde::Deserialize;

use officine_core::ListPage;

use crate::error::{GatewayError, GatewayResult};

/// One entry of the envelope's `errors` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// The `{ data, errors }` envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T> GraphqlResponse<T> {
    /// Unwraps the envelope, treating any error entry as a failure.
    pub fn into_result(self) -> GatewayResult<T> {
        if let Some(first) = self.errors.first() {
            return Err(GatewayError::Query {
                message: first.message.clone(),
            });
        }
        self.data.ok_or_else(|| GatewayError::Query {
            message: "empty response".to_string(),
        })
    }
}

/// Pagination metadata block of the `*paginated` resolvers.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// `{ metadata, data }` block of a paginated resolver.
#[derive(Debug, Deserialize)]
pub struct PaginatedBlock<T> {
    pub metadata: PageMeta,
    pub data: Vec<T>,
}

impl<T> PaginatedBlock<T> {
    pub fn into_list_page(self) -> ListPage<T> {
        ListPage {
            items: self.data,
            current_page: self.metadata.current_page,
            per_page: self.metadata.per_page,
            total: self.metadata.total,
        }
    }
}
