//! HTTP surface: the public send endpoint, the management API under
//! `/api/notify`, health and the OpenAPI document.

mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
