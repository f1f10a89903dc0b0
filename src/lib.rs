//! Core library for the AgroVista marketing site.
//!
//! This crate exposes the domain types, REST API client, query cache,
//! forms and page services used by the AgroVista web application, plus
//! the actix-web route handlers behind the `server` feature.

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod cache;
#[cfg(feature = "client")]
pub mod domain;
#[cfg(feature = "client")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "client")]
pub mod services;
