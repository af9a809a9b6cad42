//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod channels;
pub mod health;
pub mod keys;
pub mod logs;
pub mod platforms;
pub mod send;
