//! # Taskboard API Server Library
//!
//! HTTP layer over the shared board store: configuration, router,
//! session authentication, and route handlers.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers
//! - `response`: Success envelope
//! - `routes`: API route handlers
//! - `seed`: Demo accounts

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod seed;
