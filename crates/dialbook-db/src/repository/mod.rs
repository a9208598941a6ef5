//! # Repository Module
//!
//! Store implementations for database entities.
//!
//! A store owns SQL for one entity. The contact store additionally owns the
//! live ordered query: every committed mutation re-fetches the collection
//! and publishes it to all subscribers.

pub mod contact;
