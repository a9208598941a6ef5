//! # Contact Store
//!
//! Database operations for contacts, plus the live ordered query.
//!
//! ## Live Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   How the Live Query Works                      │
//! │                                                                 │
//! │  insert / update / delete                                       │
//! │       │                                                         │
//! │       ▼ commit                                                  │
//! │  refetch: SELECT * FROM contacts                                │
//! │           ORDER BY favourite DESC, name ASC, id ASC             │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  watch channel ──► subscriber 1 (list view)                     │
//! │               └──► subscriber 2 (...)                           │
//! │                                                                 │
//! │  Each commit produces exactly one fresh emission of the full    │
//! │  ordered collection. A failed refetch is published in-band as   │
//! │  an Err value - subscribers are never silently starved.         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The watch channel keeps the latest value, so a new subscriber always
//! observes the current collection immediately (at-least-one-emission-
//! after-subscribe), and re-subscribing is cheap and unbounded-safe.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::error::{DbError, DbResult};
use dialbook_core::Contact;

/// The value carried by the live contact view.
///
/// `Ok` holds the complete ordered collection; `Err` signals a storage
/// fault encountered while refreshing the view.
pub type LiveContacts = DbResult<Vec<Contact>>;

/// Listing order reproduced everywhere the collection is fetched.
///
/// Favourites first (DESC on the 0/1 flag), then name ascending under
/// SQLite's BINARY collation. The trailing id keeps equal-key rows stable
/// between emissions.
const ORDERED_SELECT: &str = "SELECT id, name, phone, favourite FROM contacts \
     ORDER BY favourite DESC, name ASC, id ASC";

/// Store for contact database operations.
///
/// ## Usage
/// ```rust,ignore
/// let store = db.contacts();
///
/// let stored = store.insert(&Contact::new("Ann", "123456789")).await?;
/// store.delete(&stored).await?;
///
/// let mut live = store.observe_all();
/// live.changed().await?;
/// let contacts = live.borrow().clone()?;
/// ```
///
/// All handles cloned from the same [`crate::Database`] share one live
/// channel; a commit through any of them notifies every subscriber.
#[derive(Debug, Clone)]
pub struct ContactStore {
    pool: SqlitePool,
    live_tx: Arc<watch::Sender<LiveContacts>>,
}

impl ContactStore {
    /// Creates a new ContactStore over a shared pool and live channel.
    pub(crate) fn new(pool: SqlitePool, live_tx: Arc<watch::Sender<LiveContacts>>) -> Self {
        ContactStore { pool, live_tx }
    }

    /// Inserts a new contact and returns it with its assigned id.
    ///
    /// The caller passes the `NEW_CONTACT_ID` sentinel; SQLite assigns a
    /// fresh unique id (AUTOINCREMENT, never reused). The record is visible
    /// in the live view once this call returns.
    ///
    /// ## Returns
    /// * `Ok(Contact)` - stored record, `id` freshly assigned
    /// * `Err(DbError)` - storage fault; not retried here. A fault from
    ///   the post-commit view refresh also lands here, so `Err` can mean
    ///   the row was committed but the live view could not be refetched -
    ///   that same fault is published in-band to all subscribers.
    pub async fn insert(&self, contact: &Contact) -> DbResult<Contact> {
        debug!(name = %contact.name, "Inserting contact");

        let result = sqlx::query("INSERT INTO contacts (name, phone, favourite) VALUES (?1, ?2, ?3)")
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(contact.favourite)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Contact inserted");

        self.refresh().await?;

        Ok(Contact {
            id,
            ..contact.clone()
        })
    }

    /// Replaces name, phone and favourite for the record with this id.
    ///
    /// ## Returns
    /// * `Ok(())` - update committed, live view refreshed
    /// * `Err(DbError::NotFound)` - no record with this id; since ids are
    ///   never reused this means the record was deleted by another path
    pub async fn update(&self, contact: &Contact) -> DbResult<()> {
        debug!(id = contact.id, "Updating contact");

        let result =
            sqlx::query("UPDATE contacts SET name = ?2, phone = ?3, favourite = ?4 WHERE id = ?1")
                .bind(contact.id)
                .bind(&contact.name)
                .bind(&contact.phone)
                .bind(contact.favourite)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Contact", contact.id));
        }

        self.refresh().await
    }

    /// Deletes the record matching this contact's id.
    ///
    /// Idempotent in effect: deleting an already-absent record reports
    /// `DbError::NotFound`, never a storage fault, and callers are free to
    /// treat it as a no-op.
    pub async fn delete(&self, contact: &Contact) -> DbResult<()> {
        debug!(id = contact.id, "Deleting contact");

        let result = sqlx::query("DELETE FROM contacts WHERE id = ?1")
            .bind(contact.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Contact", contact.id));
        }

        self.refresh().await
    }

    /// Subscribes to the live ordered view of the full collection.
    ///
    /// The receiver immediately holds the current collection and is
    /// notified after every committed mutation. Restartable: call again
    /// for a fresh receiver at any time.
    pub fn observe_all(&self) -> watch::Receiver<LiveContacts> {
        self.live_tx.subscribe()
    }

    /// One-shot fetch of the full collection in listing order.
    pub async fn list_all(&self) -> DbResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(ORDERED_SELECT)
            .fetch_all(&self.pool)
            .await?;

        Ok(contacts)
    }

    /// Counts stored contacts (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Refetches the collection and publishes it to all subscribers.
    ///
    /// Runs after every commit; also callable directly to force a
    /// republish. On a fetch fault the error itself is published, so
    /// observers learn about the fault instead of waiting on a view that
    /// stopped updating.
    pub async fn refresh(&self) -> DbResult<()> {
        match self.list_all().await {
            Ok(contacts) => {
                debug!(count = contacts.len(), "Publishing live contact view");
                let _ = self.live_tx.send_replace(Ok(contacts));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Live view refresh failed");
                let _ = self.live_tx.send_replace(Err(err.clone()));
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn names(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_round_trip() {
        let store = test_db().await.contacts();

        let stored = store.insert(&Contact::new("Ann", "123456789")).await.unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.name, "Ann");
        assert_eq!(stored.phone, "123456789");
        assert!(!stored.favourite);

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![stored]);
    }

    #[tokio::test]
    async fn test_back_to_back_inserts_get_distinct_ids() {
        let store = test_db().await.contacts();

        let a = store.insert(&Contact::new("Ann", "111111111")).await.unwrap();
        let b = store.insert(&Contact::new("Ann", "111111111")).await.unwrap();
        let c = store.insert(&Contact::new("Ann", "111111111")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_listing_order_favourites_first_then_name() {
        let store = test_db().await.contacts();

        // Created in this order on purpose; listing must not depend on it.
        store
            .insert(&Contact::new("Zed", "111111111").with_favourite(true))
            .await
            .unwrap();
        store.insert(&Contact::new("Amy", "222222222")).await.unwrap();
        store
            .insert(&Contact::new("Bob", "333333333").with_favourite(true))
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(names(&all), vec!["Bob", "Zed", "Amy"]);
    }

    #[tokio::test]
    async fn test_update_replaces_mutable_fields() {
        let store = test_db().await.contacts();

        let stored = store.insert(&Contact::new("Ann", "123456789")).await.unwrap();

        let edited = Contact {
            name: "Annie".to_string(),
            phone: "987654321".to_string(),
            ..stored.clone()
        };
        store.update(&edited).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![edited]);
    }

    #[tokio::test]
    async fn test_update_vanished_id_is_not_found() {
        let store = test_db().await.contacts();

        let ghost = Contact {
            id: 41,
            ..Contact::new("Nobody", "000000000")
        };

        let err = store.update(&ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found_never_fault() {
        let store = test_db().await.contacts();

        let stored = store.insert(&Contact::new("Ann", "123456789")).await.unwrap();

        store.delete(&stored).await.unwrap();

        let err = store.delete(&stored).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_live_view_tracks_commits() {
        let store = test_db().await.contacts();
        let mut live = store.observe_all();

        // Subscribing alone yields the current (empty) collection.
        assert!(live.borrow_and_update().clone().unwrap().is_empty());

        let ann = store.insert(&Contact::new("Ann", "123456789")).await.unwrap();
        live.changed().await.unwrap();
        assert_eq!(live.borrow_and_update().clone().unwrap(), vec![ann.clone()]);

        store.delete(&ann).await.unwrap();
        live.changed().await.unwrap();
        assert!(live.borrow_and_update().clone().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_favourite_toggle_matches_fresh_read() {
        let store = test_db().await.contacts();
        let mut live = store.observe_all();

        let amy = store.insert(&Contact::new("Amy", "111111111")).await.unwrap();
        let zed = store.insert(&Contact::new("Zed", "222222222")).await.unwrap();

        store.update(&zed.with_favourite(true)).await.unwrap();
        live.changed().await.unwrap();
        let emitted = live.borrow_and_update().clone().unwrap();
        assert_eq!(names(&emitted), vec!["Zed", "Amy"]);
        assert_eq!(emitted, store.list_all().await.unwrap());

        // Toggle back: position restored, emission consistent with a
        // fresh read again.
        let pinned = emitted[0].clone();
        store.update(&pinned.with_favourite(false)).await.unwrap();
        live.changed().await.unwrap();
        let emitted = live.borrow_and_update().clone().unwrap();
        assert_eq!(names(&emitted), vec!["Amy", "Zed"]);
        assert_eq!(emitted, store.list_all().await.unwrap());
        assert_eq!(emitted, vec![amy, zed]);
    }

    #[tokio::test]
    async fn test_refresh_fault_reaches_subscribers_in_band() {
        let db = test_db().await;
        let store = db.contacts();

        store.insert(&Contact::new("Ann", "123456789")).await.unwrap();

        let mut live = store.observe_all();
        assert!(live.borrow_and_update().clone().is_ok());

        // Storage goes away underneath the store.
        db.close().await;

        let err = store.refresh().await.unwrap_err();
        assert!(!err.is_not_found());

        // The subscriber observes the fault instead of a silently
        // stale view.
        live.changed().await.unwrap();
        assert!(live.borrow_and_update().clone().is_err());
    }

    #[tokio::test]
    async fn test_shared_channel_across_store_handles() {
        let db = test_db().await;
        let writer = db.contacts();
        let reader = db.contacts();

        let mut live = reader.observe_all();
        writer.insert(&Contact::new("Ann", "123456789")).await.unwrap();

        live.changed().await.unwrap();
        assert_eq!(live.borrow().clone().unwrap().len(), 1);
    }
}
