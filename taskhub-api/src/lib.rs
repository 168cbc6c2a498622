//! # TaskHub API Server Library
//!
//! GraphQL API for the TaskHub multi-tenant project tracker.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: HTTP error mapping for the non-GraphQL surface
//! - `tenant`: Tenant resolution from the `X-Organization-Slug` header
//! - `schema`: GraphQL types, queries, and mutations
//! - `routes`: HTTP route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod schema;
pub mod tenant;
