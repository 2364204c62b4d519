/// State management module
///
/// This module handles all application state, including:
/// - Proposal and draft data structures (data.rs)
/// - The persistence boundary and its in-memory store (store.rs)
/// - The SQLite proposal catalog (library.rs)
/// - The ordered proposal sequence shown on the dashboard (portfolio.rs)
/// - Transient notifications (notice.rs)
/// - The presentation state controller (presentation.rs)

pub mod data;
pub mod library;
pub mod notice;
pub mod portfolio;
pub mod presentation;
pub mod store;
