//! Outbound HTTP plumbing shared by webhook dispatch.

pub mod client;

pub use client::HTTP_CLIENT;
