//! HTTP API: token service, middleware and request handlers

pub mod jwt;
pub mod middleware;
pub mod services;
