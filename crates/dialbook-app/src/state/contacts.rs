//! # Contact List State
//!
//! The observable state holder behind the contact screens.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     ContactListState                            │
//! │                                                                 │
//! │  Presentation action        Entry point          Effect         │
//! │  ───────────────────        ───────────          ──────         │
//! │  Submit add form ─────────► save() ────────────► spawn insert   │
//! │  Submit edit form ────────► update() ──────────► spawn update   │
//! │  Tap delete ──────────────► delete() ──────────► spawn delete   │
//! │  Tap star ────────────────► set_favourite() ───► spawn update   │
//! │  Navigate ────────────────► select_screen()      (synchronous)  │
//! │                                                                 │
//! │  ContactStore live query ──► forwarder task ──► ContactsView    │
//! │                                                  channel        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fire-and-Forget Mutations
//! Mutations are spawned tasks: the caller is never blocked and the UI
//! reacts to the next live-query emission, not to the mutation's own
//! completion. Each task still returns its result through the
//! `JoinHandle` so tests (or callers that care) can await it. A failed
//! mutation is reported once - logged and carried in the handle - and
//! never retried. Once spawned, a mutation cannot be aborted.
//!
//! ## Edit Target
//! There is deliberately no shared mutable "currently edited contact"
//! field. The navigation event that enters the edit flow carries the
//! target contact as an explicit payload in [`ScreenSelection`], published
//! atomically with the screen id.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use dialbook_core::Contact;
use dialbook_db::{ContactStore, LiveContacts};

use crate::error::AppError;

// =============================================================================
// Published State
// =============================================================================

/// The active screen plus the navigation payload that travels with it.
///
/// `screen` is an opaque identifier; this layer performs no validation of
/// its value. `edit_target` is set only by [`ContactListState::select_edit_screen`]
/// and read once upon entering the edit flow.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSelection {
    /// Opaque identifier of the active screen.
    pub screen: String,

    /// Contact the edit flow should load, when navigating into it.
    pub edit_target: Option<Contact>,
}

/// The latest ordered collection republished from the store.
///
/// Starts empty before the first emission arrives. On a live-query fault
/// the last good collection is kept and the fault is surfaced alongside
/// it, so observers are informed rather than silently starved.
#[derive(Debug, Clone, Default)]
pub struct ContactsView {
    /// Favourites first, then name ascending.
    pub contacts: Vec<Contact>,

    /// Fault from the most recent refresh, if it failed.
    pub fault: Option<AppError>,
}

// =============================================================================
// Contact List State
// =============================================================================

/// Single point of mutation and observation for the contact screens.
///
/// ## Ownership
/// One instance per logical owner. The local `contacts` view is a
/// read-through copy, never authoritative: it is overwritten wholesale on
/// every emission from the store. Dropping the holder cancels the live
/// forwarder; no emissions are delivered after teardown.
#[derive(Debug)]
pub struct ContactListState {
    /// Store handle; cloned into every mutation task.
    store: ContactStore,

    /// Active screen selection, observable by collaborators.
    screen_tx: watch::Sender<ScreenSelection>,

    /// Republished contact collection.
    view_tx: Arc<watch::Sender<ContactsView>>,

    /// The live-query forwarder task, at most one at a time.
    forwarder: Mutex<Option<JoinHandle<()>>>,
}

impl ContactListState {
    /// Creates a state holder over the given store.
    ///
    /// Call [`ContactListState::start_observing`] to begin mirroring the
    /// live query; until then the view stays empty.
    pub fn new(store: ContactStore) -> Self {
        let (screen_tx, _) = watch::channel(ScreenSelection::default());
        let (view_tx, _) = watch::channel(ContactsView::default());

        ContactListState {
            store,
            screen_tx,
            view_tx: Arc::new(view_tx),
            forwarder: Mutex::new(None),
        }
    }

    // -------------------------------------------------------------------------
    // Screen selection
    // -------------------------------------------------------------------------

    /// Sets the active screen. Pure state mutation, no failure mode.
    pub fn select_screen(&self, screen: impl Into<String>) {
        self.screen_tx.send_replace(ScreenSelection {
            screen: screen.into(),
            edit_target: None,
        });
    }

    /// Navigates to an edit flow, carrying the target contact explicitly.
    pub fn select_edit_screen(&self, screen: impl Into<String>, contact: Contact) {
        self.screen_tx.send_replace(ScreenSelection {
            screen: screen.into(),
            edit_target: Some(contact),
        });
    }

    /// The active screen identifier.
    pub fn screen(&self) -> String {
        self.screen_tx.borrow().screen.clone()
    }

    /// The contact carried by the current navigation event, if any.
    pub fn edit_target(&self) -> Option<Contact> {
        self.screen_tx.borrow().edit_target.clone()
    }

    /// Subscribes to screen selection changes.
    pub fn subscribe_screen(&self) -> watch::Receiver<ScreenSelection> {
        self.screen_tx.subscribe()
    }

    // -------------------------------------------------------------------------
    // Contact collection
    // -------------------------------------------------------------------------

    /// Snapshot of the latest republished collection.
    pub fn contacts(&self) -> Vec<Contact> {
        self.view_tx.borrow().contacts.clone()
    }

    /// Subscribes to the republished collection.
    pub fn subscribe_contacts(&self) -> watch::Receiver<ContactsView> {
        self.view_tx.subscribe()
    }

    /// (Re)subscribes to the store's live query.
    ///
    /// Idempotent under repeated calls: a new forwarder replaces - and
    /// aborts - the previous one, so there is at most one active
    /// subscription per holder.
    pub fn start_observing(&self) {
        let mut rx = self.store.observe_all();
        let view_tx = Arc::clone(&self.view_tx);

        // The previous forwarder must be gone before the replacement can
        // publish, so abort it under the lock first.
        let mut slot = self.forwarder.lock().expect("forwarder mutex poisoned");
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        *slot = Some(tokio::spawn(async move {
            loop {
                // The watch channel always holds a value, so a fresh
                // subscriber republishes the current collection right away.
                let emission = rx.borrow_and_update().clone();
                publish(&view_tx, emission);

                if rx.changed().await.is_err() {
                    debug!("Contact store dropped; live forwarding stopped");
                    break;
                }
            }
        }));
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Persists a new contact.
    ///
    /// The live subscription delivers the refreshed collection
    /// asynchronously; there is no synchronous guarantee about when the
    /// view reflects the new row. An `Err` in the handle can also mean
    /// the row was committed but the post-commit view refresh faulted;
    /// that fault reaches observers through the subscription as well.
    pub fn save(&self, contact: Contact) -> JoinHandle<Result<Contact, AppError>> {
        let store = self.store.clone();
        tokio::spawn(async move {
            store.insert(&contact).await.map_err(|err| {
                error!(error = %err, "Saving contact failed");
                AppError::from(err)
            })
        })
    }

    /// Replaces a contact's fields, keyed by id.
    ///
    /// A vanished id is treated as an update racing with another session:
    /// logged and silently dropped, per the store's not-found contract.
    pub fn update(
        &self,
        name: impl Into<String>,
        phone: impl Into<String>,
        id: i64,
        favourite: bool,
    ) -> JoinHandle<Result<(), AppError>> {
        let contact = Contact {
            id,
            name: name.into(),
            phone: phone.into(),
            favourite,
        };
        self.spawn_update(contact)
    }

    /// Deletes a contact. Deleting an already-absent record is a no-op.
    pub fn delete(&self, contact: Contact) -> JoinHandle<Result<(), AppError>> {
        let store = self.store.clone();
        tokio::spawn(async move {
            match store.delete(&contact).await {
                Ok(()) => Ok(()),
                Err(err) if err.is_not_found() => {
                    warn!(id = contact.id, "Delete targeted a vanished contact");
                    Ok(())
                }
                Err(err) => {
                    error!(error = %err, id = contact.id, "Deleting contact failed");
                    Err(AppError::from(err))
                }
            }
        })
    }

    /// Sets the favourite flag on a contact.
    ///
    /// Both toggle directions reduce to the same update path.
    pub fn set_favourite(&self, contact: &Contact, value: bool) -> JoinHandle<Result<(), AppError>> {
        self.spawn_update(contact.with_favourite(value))
    }

    /// Marks a contact as favourite.
    pub fn mark_favourite(&self, contact: &Contact) -> JoinHandle<Result<(), AppError>> {
        self.set_favourite(contact, true)
    }

    /// Removes a contact from favourites.
    pub fn unmark_favourite(&self, contact: &Contact) -> JoinHandle<Result<(), AppError>> {
        self.set_favourite(contact, false)
    }

    fn spawn_update(&self, contact: Contact) -> JoinHandle<Result<(), AppError>> {
        let store = self.store.clone();
        tokio::spawn(async move {
            match store.update(&contact).await {
                Ok(()) => Ok(()),
                Err(err) if err.is_not_found() => {
                    warn!(id = contact.id, "Update targeted a vanished contact");
                    Ok(())
                }
                Err(err) => {
                    error!(error = %err, id = contact.id, "Updating contact failed");
                    Err(AppError::from(err))
                }
            }
        })
    }
}

impl Drop for ContactListState {
    fn drop(&mut self) {
        // Teardown: no emissions after the holder is discarded.
        if let Ok(mut slot) = self.forwarder.lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
    }
}

/// Publishes one store emission into the holder's view channel.
fn publish(view_tx: &watch::Sender<ContactsView>, emission: LiveContacts) {
    match emission {
        Ok(contacts) => {
            view_tx.send_replace(ContactsView {
                contacts,
                fault: None,
            });
        }
        Err(err) => {
            // Keep the last good collection; surface the fault next to it.
            let contacts = view_tx.borrow().contacts.clone();
            view_tx.send_replace(ContactsView {
                contacts,
                fault: Some(AppError::from(err)),
            });
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dialbook_db::{Database, DbConfig};

    async fn test_state() -> ContactListState {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ContactListState::new(db.contacts())
    }

    /// Waits until the republished view satisfies the predicate.
    async fn wait_for_view<F>(rx: &mut watch::Receiver<ContactsView>, predicate: F) -> ContactsView
    where
        F: Fn(&ContactsView) -> bool,
    {
        loop {
            let view = rx.borrow_and_update().clone();
            if predicate(&view) {
                return view;
            }
            rx.changed().await.expect("view channel closed");
        }
    }

    #[tokio::test]
    async fn test_save_reaches_observers_through_live_query() {
        let state = test_state().await;
        state.start_observing();
        let mut rx = state.subscribe_contacts();

        let stored = state
            .save(Contact::new("Ann", "123456789"))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.id > 0);

        let view = wait_for_view(&mut rx, |v| !v.contacts.is_empty()).await;
        assert_eq!(view.contacts, vec![stored]);
        assert!(view.fault.is_none());
        assert_eq!(state.contacts(), view.contacts);
    }

    #[tokio::test]
    async fn test_view_is_empty_before_observing_starts() {
        let state = test_state().await;

        state
            .save(Contact::new("Ann", "123456789"))
            .await
            .unwrap()
            .unwrap();

        // No forwarder yet: the read-through copy stays empty.
        assert!(state.contacts().is_empty());
    }

    #[tokio::test]
    async fn test_screen_selection_carries_edit_target() {
        let state = test_state().await;
        assert_eq!(state.screen(), "");
        assert!(state.edit_target().is_none());

        state.select_screen("list");
        assert_eq!(state.screen(), "list");

        let target = Contact {
            id: 3,
            ..Contact::new("Bob", "987654321")
        };
        state.select_edit_screen("edit", target.clone());
        assert_eq!(state.screen(), "edit");
        assert_eq!(state.edit_target(), Some(target));

        // Navigating elsewhere drops the payload with the event.
        state.select_screen("list");
        assert!(state.edit_target().is_none());
    }

    #[tokio::test]
    async fn test_update_entry_point_replaces_fields() {
        let state = test_state().await;
        state.start_observing();
        let mut rx = state.subscribe_contacts();

        let stored = state
            .save(Contact::new("Ann", "123456789"))
            .await
            .unwrap()
            .unwrap();

        state
            .update("Annie", "987654321", stored.id, stored.favourite)
            .await
            .unwrap()
            .unwrap();

        let view = wait_for_view(&mut rx, |v| {
            v.contacts.first().map(|c| c.name.as_str()) == Some("Annie")
        })
        .await;
        assert_eq!(view.contacts[0].phone, "987654321");
        assert_eq!(view.contacts[0].id, stored.id);
    }

    #[tokio::test]
    async fn test_double_delete_is_silent() {
        let state = test_state().await;

        let stored = state
            .save(Contact::new("Ann", "123456789"))
            .await
            .unwrap()
            .unwrap();

        state.delete(stored.clone()).await.unwrap().unwrap();
        // Second delete races a record that is already gone: still Ok.
        state.delete(stored).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_update_against_vanished_id_is_silent() {
        let state = test_state().await;

        state
            .update("Ghost", "000000000", 99, false)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_favourite_toggle_reorders_view() {
        let state = test_state().await;
        state.start_observing();
        let mut rx = state.subscribe_contacts();

        state
            .save(Contact::new("Amy", "111111111"))
            .await
            .unwrap()
            .unwrap();
        let zed = state
            .save(Contact::new("Zed", "222222222"))
            .await
            .unwrap()
            .unwrap();

        state.mark_favourite(&zed).await.unwrap().unwrap();
        let view = wait_for_view(&mut rx, |v| {
            v.contacts.first().map(|c| c.favourite) == Some(true)
        })
        .await;
        let names: Vec<_> = view.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);

        state.unmark_favourite(&zed).await.unwrap().unwrap();
        let view = wait_for_view(&mut rx, |v| {
            v.contacts.first().map(|c| c.favourite) == Some(false)
        })
        .await;
        let names: Vec<_> = view.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }

    #[tokio::test]
    async fn test_start_observing_is_idempotent() {
        let state = test_state().await;
        state.start_observing();
        state.start_observing();
        let mut rx = state.subscribe_contacts();

        let stored = state
            .save(Contact::new("Ann", "123456789"))
            .await
            .unwrap()
            .unwrap();

        // The replacement forwarder still delivers; the aborted one is gone.
        let view = wait_for_view(&mut rx, |v| !v.contacts.is_empty()).await;
        assert_eq!(view.contacts, vec![stored.clone()]);

        // Restarting with data present republishes the current collection.
        state.start_observing();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().contacts, vec![stored]);
    }

    #[tokio::test]
    async fn test_live_fault_keeps_last_good_collection() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = ContactListState::new(db.contacts());
        state.start_observing();
        let mut rx = state.subscribe_contacts();

        let stored = state
            .save(Contact::new("Ann", "123456789"))
            .await
            .unwrap()
            .unwrap();
        let view = wait_for_view(&mut rx, |v| !v.contacts.is_empty()).await;
        assert!(view.fault.is_none());

        // Storage goes away; the next refresh publishes its fault rather
        // than starving observers.
        db.close().await;
        db.contacts().refresh().await.unwrap_err();

        let view = wait_for_view(&mut rx, |v| v.fault.is_some()).await;
        assert_eq!(view.contacts, vec![stored]);
        assert_eq!(
            view.fault.as_ref().unwrap().code,
            crate::error::ErrorCode::StorageFault
        );
        assert_eq!(state.contacts(), view.contacts);
    }
}
