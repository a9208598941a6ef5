//! # dialbook-db: Database Layer for Dialbook
//!
//! This crate provides database access for Dialbook. It uses SQLite for
//! local storage with sqlx for async operations, and publishes a live
//! ordered view of the contact collection over a watch channel.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Dialbook Data Flow                          │
//! │                                                                 │
//! │  ContactListState (save / update / delete / toggle favourite)   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 dialbook-db (THIS CRATE)                  │  │
//! │  │                                                           │  │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌──────────────┐   │  │
//! │  │   │  Database   │   │ ContactStore │   │  Migrations  │   │  │
//! │  │   │  (pool.rs)  │◄──│ (repository) │   │  (embedded)  │   │  │
//! │  │   │ SqlitePool  │   │ live query   │   │ 001_init.sql │   │  │
//! │  │   └─────────────┘   └──────┬───────┘   └──────────────┘   │  │
//! │  │                           │ commit → refetch → emit       │  │
//! │  │                           ▼                               │  │
//! │  │          watch channel: ordered Vec<Contact>              │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (WAL mode)                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The contact store with its live ordered query
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dialbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/dialbook.db")).await?;
//!
//! let store = db.contacts();
//! let stored = store.insert(&Contact::new("Ann", "123456789")).await?;
//!
//! let mut live = store.observe_all();
//! let snapshot = live.borrow().clone()?; // favourites first, then name asc
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::contact::{ContactStore, LiveContacts};
