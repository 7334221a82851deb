//! # Shelf Architecture
//!
//! Shelf keeps a viewer's preference state: the watch-list ("my list"),
//! playback positions ("continue watching"), ratings, reviews, and social items
//! (shares, recommendations, group watches). It is a library that happens to
//! have a CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/shelf)                                         │
//! │  - Parses arguments, renders output, owns stdout/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, parses ids, carries config                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and business rules, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shelf + Storage (shelf.rs, store/)                         │
//! │  - One ListStore per category over one key-value backing    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Instance, Explicitly Shared
//!
//! A process builds exactly one [`shelf::Shelf`] (see [`init::initialize`]).
//! Code that cannot conveniently receive it as a parameter gets it through
//! [`context`], which installs the instance for a scope and fails loudly when
//! used outside one.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic per area
//! - [`shelf`]: The store bundle and its storage keys
//! - [`store`]: Generic list store, repositories, backings
//! - [`context`]: Scoped accessor for shared instances
//! - [`model`]: Entry types, ids and scores
//! - [`config`]: Configuration
//! - [`init`]: Start-up wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod init;
pub mod model;
pub mod shelf;
pub mod store;

#[cfg(test)]
pub mod test_utils;
