//! # dialbook-app: Application State for Dialbook
//!
//! The layer a presentation collaborator talks to. It owns the observable
//! contact list state and translates storage errors into distinguishable
//! kinds for display.
//!
//! ## Control Flow
//! ```text
//! Presentation collaborator
//!      │ save / update / delete / toggle favourite
//!      ▼
//! ContactListState ── spawns mutation task ──► ContactStore (dialbook-db)
//!      ▲                                            │ commit
//!      │ republished ordered collection             ▼
//!      └──────────── live query emission ◄──────────┘
//! ```
//!
//! The UI never waits on a mutation's own completion; it reacts to the
//! subsequent live-query emission.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AppError, ErrorCode};
pub use state::{ContactListState, ContactsView, ScreenSelection};
