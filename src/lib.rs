//! shortmark - personal bookmarks with 3-character short links
//!
//! Users register, log in with JWT bearer tokens and keep a private list of
//! bookmarks. Every bookmark gets a globally unique short code that redirects
//! to its url.
//!
//! # Architecture
//! - `api`: HTTP handlers, routes, bearer auth and request-id middleware
//! - `services`: registration, login, bookmark CRUD and short-code allocation
//! - `storage`: SeaORM backend (SQLite, MySQL, PostgreSQL)
//! - `config`: TOML + environment configuration
//! - `runtime`: server startup and graceful shutdown
//! - `system`: logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
