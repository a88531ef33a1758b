//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to services,
//! and manages shared state used by asynchronous tasks: configuration, the
//! notification manager, the submission rate limiter and mail delivery.

mod app;
pub mod config;
pub mod mail;
mod rate_limit;
mod runtime;
mod services;
mod state;

pub use crate::runtime::run;
