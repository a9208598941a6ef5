//! # dialbook-core: Pure Domain Logic for Dialbook
//!
//! This crate is the foundation of Dialbook. It contains the contact domain
//! type and its validation rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Dialbook Architecture                        │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              Presentation (out of scope)                  │  │
//! │  │    Contact form ──► List view ──► Edit screen             │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │            dialbook-app (ContactListState)                │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │          ★ dialbook-core (THIS CRATE) ★                   │  │
//! │  │                                                           │  │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐            │  │
//! │  │   │   types   │  │ validation │  │   error   │            │  │
//! │  │   │  Contact  │  │   rules    │  │   kinds   │            │  │
//! │  │   └───────────┘  └────────────┘  └───────────┘            │  │
//! │  │                                                           │  │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                   │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │          dialbook-db (SQLite contact store)               │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The [`Contact`] domain type
//! - [`validation`] - Input validation rules (name, phone)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database and file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Store persists what it is given**: Validation lives here for
//!    presentation collaborators; the store itself never invokes it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::Contact;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel id a caller sets on a contact that has never been persisted.
///
/// ## Why a constant?
/// SQLite assigns the real id on first insert. The caller never supplies a
/// meaningful id for a new contact; it passes this sentinel and the store
/// returns the record with its assigned id.
pub const NEW_CONTACT_ID: i64 = 0;

/// Required length of a phone number, in ASCII digits.
pub const PHONE_DIGITS: usize = 9;

/// Maximum length of a contact name, in characters.
///
/// Keeps runaway form input out of the listing; generous enough for any
/// real name.
pub const MAX_NAME_CHARS: usize = 200;
