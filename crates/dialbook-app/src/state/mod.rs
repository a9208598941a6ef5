//! # State Module
//!
//! Observable application state for presentation collaborators.
//!
//! One state holder per logical owner (a screen host). It mirrors the
//! store's live query into its own channel, publishes the active screen
//! selection, and serializes all mutating calls through the store.

mod contacts;

pub use contacts::{ContactListState, ContactsView, ScreenSelection};
