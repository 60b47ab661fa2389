//! # Posts API
//!
//! A small REST API for managing blog-style posts (title, body, author)
//! backed by a relational `posts` table.
//!
//! ## Features
//!
//! - **CRUD**: create, read, update, delete and list posts over HTTP
//! - **Repository pattern**: swap between an in-memory backend and a
//!   Diesel/Postgres backend without touching the HTTP layer
//! - **HTTP API**: axum-based JSON endpoints
//!
//! ## Architecture
//!
//! The crate is organized into three logical modules:
//!
//! - [`api`]: Domain types (`Post`, `PostId`, `NewPost`)
//! - [`db`]: Repository trait, storage backends and the service layer
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError carries structured context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
