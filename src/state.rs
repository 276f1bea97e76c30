//! Reveal state.

use crate::error::{Result, RevealError};
use crate::key::Key;
use crate::registry::Registry;
use crate::revealable::{Revealable, RevealableLayout, RevealableOptions};
use core::fmt;
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// A change to a reveal state, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealChange<K> {
    Visibility(bool),
    Current(Option<K>),
    Previous(Option<K>),
    /// The current or previous revealable was laid out again with new geometry.
    Relayout(K),
    Registered(K),
    Unregistered(K),
}

/// The persistable part of a reveal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRevealState<K> {
    pub visible: bool,
    pub current_key: Option<K>,
}

/// A consistent view of the selection at one point in time.
#[derive(Debug, Clone)]
pub struct RevealSnapshot<K> {
    pub visible: bool,
    pub current: Option<Revealable<K>>,
    pub previous: Option<Revealable<K>>,
}

struct Selection<K: Key> {
    visible: bool,
    registry: Registry<K>,
    current: Option<Revealable<K>>,
    previous: Option<Revealable<K>>,
    restore_key: Option<K>,
    did_restore_current: bool,
}

fn key_of<K>(revealable: &Option<Revealable<K>>) -> Option<&K> {
    revealable.as_ref().map(|r| &r.key)
}

impl<K: Key> Selection<K> {
    fn reveal(&mut self, revealable: Revealable<K>) -> Vec<RevealChange<K>> {
        let mut changes = Vec::new();

        if key_of(&self.current) == Some(&revealable.key) {
            // same element again; refresh instead of cross-fading with itself
            self.current = Some(revealable);
        } else {
            let previous = self.current.take();
            if key_of(&self.previous) != key_of(&previous) {
                changes.push(RevealChange::Previous(key_of(&previous).cloned()));
            }
            self.previous = previous;
            changes.push(RevealChange::Current(Some(revealable.key.clone())));
            self.current = Some(revealable);
        }

        if !self.visible {
            self.visible = true;
            changes.push(RevealChange::Visibility(true));
        }
        changes
    }

    fn put(&mut self, revealable: Revealable<K>) -> Vec<RevealChange<K>> {
        let mut changes = Vec::new();
        let key = revealable.key.clone();

        if self.registry.put(revealable.clone()).is_none() {
            changes.push(RevealChange::Registered(key.clone()));
        }

        let mut relayout = false;
        if key_of(&self.current) == Some(&key) {
            self.current = Some(revealable.clone());
            relayout = true;
        }
        if key_of(&self.previous) == Some(&key) {
            self.previous = Some(revealable.clone());
            relayout = true;
        }

        if !self.did_restore_current && self.restore_key.as_ref() == Some(&key) {
            debug!(key = ?key, "restoring current revealable");
            self.did_restore_current = true;
            self.restore_key = None;
            if !relayout {
                changes.push(RevealChange::Current(Some(key.clone())));
            }
            self.current = Some(revealable);
        } else if relayout {
            changes.push(RevealChange::Relayout(key));
        }
        changes
    }

    fn remove(&mut self, key: &K) -> Vec<RevealChange<K>> {
        let mut changes = Vec::new();
        if self.registry.remove(key).is_none() {
            return changes;
        }
        changes.push(RevealChange::Unregistered(key.clone()));

        // the fade-out still reads the current revealable's geometry; it is cleared once the
        // hide animation finishes
        if key_of(&self.current) == Some(key) && self.visible {
            debug!(key = ?key, "current revealable removed, hiding");
            self.visible = false;
            changes.push(RevealChange::Visibility(false));
        }

        if key_of(&self.previous) == Some(key) {
            self.previous = None;
            changes.push(RevealChange::Previous(None));
        }
        changes
    }
}

struct Inner<K: Key> {
    /// Serializes reveal and hide.
    transition: Mutex<()>,
    selection: RwLock<Selection<K>>,
    subscribers: Mutex<Vec<Sender<RevealChange<K>>>>,
}

impl<K: Key> Inner<K> {
    /// Sends changes to all subscribers, dropping disconnected ones.
    ///
    /// Called with the selection write guard held, so subscribers receive changes in the order
    /// they were applied.
    fn emit(&self, changes: Vec<RevealChange<K>>) {
        if changes.is_empty() {
            return;
        }
        self.subscribers
            .lock()
            .retain(|sender| changes.iter().all(|change| sender.send(change.clone()).is_ok()));
    }
}

/// State of a reveal effect: its registered revealables, the current and previous selection,
/// and visibility.
///
/// This is a cheap handle; clones share the same state and may be sent to other threads.
///
/// # Transitions
/// - [`reveal`](Self::reveal) makes a registered revealable current, keeping the former current
///   one as previous so that the two can be cross-faded.
/// - [`hide`](Self::hide) only clears the visibility flag. Current and previous stay populated
///   until the renderer reports the end of the fade-out through
///   [`on_hide_animation_finished`](Self::on_hide_animation_finished).
/// - Removing the current revealable hides the effect; removing the previous one clears it.
pub struct RevealState<K: Key> {
    inner: Arc<Inner<K>>,
}

impl<K: Key> Clone for RevealState<K> {
    fn clone(&self) -> Self {
        RevealState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Key> Default for RevealState<K> {
    fn default() -> Self {
        RevealState::new()
    }
}

impl<K: Key> RevealState<K> {
    /// Creates a hidden state without revealables.
    pub fn new() -> RevealState<K> {
        RevealState::with_restored(false, None)
    }

    /// Creates a state from persisted visibility and current key.
    ///
    /// Geometry is not known until the element is laid out again, so `restore_key` becomes the
    /// current revealable on the first registration under that key. This happens at most once.
    pub fn with_restored(visible: bool, restore_key: Option<K>) -> RevealState<K> {
        RevealState {
            inner: Arc::new(Inner {
                transition: Mutex::new(()),
                selection: RwLock::new(Selection {
                    visible,
                    registry: Registry::new(),
                    current: None,
                    previous: None,
                    restore_key,
                    did_restore_current: false,
                }),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a state from a saved state.
    pub fn restore(saved: SavedRevealState<K>) -> RevealState<K> {
        RevealState::with_restored(saved.visible, saved.current_key)
    }

    /// Returns the persistable part of this state.
    pub fn save(&self) -> SavedRevealState<K> {
        let selection = self.inner.selection.read();
        SavedRevealState {
            visible: selection.visible,
            current_key: key_of(&selection.current).cloned(),
        }
    }

    /// Subscribes to changes.
    ///
    /// Changes are sent in the order they were applied. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<RevealChange<K>> {
        let (sender, receiver) = channel::unbounded();
        self.inner.subscribers.lock().push(sender);
        receiver
    }

    /// Reveals the revealable registered under `key`.
    ///
    /// Revealing the already current revealable does not make it previous; a hidden current
    /// revealable is shown again.
    ///
    /// # Errors
    /// [`RevealError::KeyNotFound`] if no revealable is registered under `key`. Nothing is
    /// changed in that case.
    pub fn reveal(&self, key: &K) -> Result<()> {
        let _transition = self.inner.transition.lock();
        let mut selection = self.inner.selection.write();
        let revealable = match selection.registry.get(key) {
            Some(revealable) => revealable.clone(),
            None => {
                debug!(key = ?key, "cannot reveal unknown key");
                return Err(RevealError::key_not_found(key));
            }
        };
        debug!(key = ?key, previous = ?key_of(&selection.current), "reveal");
        let changes = selection.reveal(revealable);
        self.inner.emit(changes);
        Ok(())
    }

    /// Like [`reveal`](Self::reveal), but returns `false` instead of failing for unknown keys.
    pub fn try_reveal(&self, key: &K) -> bool {
        self.reveal(key).is_ok()
    }

    /// Hides the effect.
    ///
    /// Current and previous revealables are kept for the fade-out.
    pub fn hide(&self) {
        let _transition = self.inner.transition.lock();
        let mut selection = self.inner.selection.write();
        if selection.visible {
            selection.visible = false;
            debug!("hide");
            self.inner.emit(vec![RevealChange::Visibility(false)]);
        }
    }

    /// Clears current and previous revealables once the hide animation has finished.
    ///
    /// Called by the renderer when the overlay alpha reaches zero. Ignored while visible, which
    /// happens when a reveal raced the end of the animation.
    pub fn on_hide_animation_finished(&self) {
        let mut selection = self.inner.selection.write();
        if selection.visible {
            trace!("ignoring stale hide animation completion");
            return;
        }
        let mut changes = Vec::new();
        if selection.current.take().is_some() {
            changes.push(RevealChange::Current(None));
        }
        if selection.previous.take().is_some() {
            changes.push(RevealChange::Previous(None));
        }
        if !changes.is_empty() {
            debug!("hide animation finished");
        }
        self.inner.emit(changes);
    }

    /// Registers or re-registers a revealable after layout.
    pub fn put_revealable(&self, revealable: Revealable<K>) {
        trace!(key = ?revealable.key, layout = ?revealable.layout, "put revealable");
        let mut selection = self.inner.selection.write();
        let changes = selection.put(revealable);
        self.inner.emit(changes);
    }

    /// Registers an element laid out at `layout` under `key`.
    pub fn register(&self, key: K, options: RevealableOptions<K>, layout: RevealableLayout) {
        self.put_revealable(Revealable::new(key, options, layout));
    }

    /// Registers one element under several keys at once.
    pub fn register_keys<I>(&self, keys: I, options: &RevealableOptions<K>, layout: RevealableLayout)
    where
        I: IntoIterator<Item = K>,
    {
        let mut selection = self.inner.selection.write();
        let mut changes = Vec::new();
        for key in keys {
            trace!(key = ?key, layout = ?layout, "put revealable");
            changes.extend(selection.put(Revealable::new(key, options.clone(), layout)));
        }
        self.inner.emit(changes);
    }

    /// Removes a revealable when its element leaves the UI tree.
    ///
    /// Hides the effect if it is the current revealable. Unknown keys are ignored.
    pub fn remove_revealable(&self, key: &K) {
        trace!(key = ?key, "remove revealable");
        let mut selection = self.inner.selection.write();
        let changes = selection.remove(key);
        self.inner.emit(changes);
    }

    /// Removes all keys of an element at once.
    pub fn unregister_keys<'a, I>(&self, keys: I)
    where
        I: IntoIterator<Item = &'a K>,
    {
        let mut selection = self.inner.selection.write();
        let mut changes = Vec::new();
        for key in keys {
            trace!(key = ?key, "remove revealable");
            changes.extend(selection.remove(key));
        }
        self.inner.emit(changes);
    }

    /// Returns `true` if the effect is visible.
    pub fn is_visible(&self) -> bool {
        self.inner.selection.read().visible
    }

    /// Key of the current revealable, if any.
    pub fn current_revealable_key(&self) -> Option<K> {
        key_of(&self.inner.selection.read().current).cloned()
    }

    /// Key of the revealable shown before the current one, while it is fading out.
    pub fn previous_revealable_key(&self) -> Option<K> {
        key_of(&self.inner.selection.read().previous).cloned()
    }

    pub fn current_revealable(&self) -> Option<Revealable<K>> {
        self.inner.selection.read().current.clone()
    }

    pub fn previous_revealable(&self) -> Option<Revealable<K>> {
        self.inner.selection.read().previous.clone()
    }

    /// Keys of all registered revealables.
    pub fn revealable_keys(&self) -> HashSet<K> {
        self.inner.selection.read().registry.keys()
    }

    pub fn contains_revealable(&self, key: &K) -> bool {
        self.inner.selection.read().registry.contains(key)
    }

    pub fn revealable(&self, key: &K) -> Option<Revealable<K>> {
        self.inner.selection.read().registry.get(key).cloned()
    }

    /// Returns visibility, current and previous revealable as read under a single lock.
    pub fn snapshot(&self) -> RevealSnapshot<K> {
        let selection = self.inner.selection.read();
        RevealSnapshot {
            visible: selection.visible,
            current: selection.current.clone(),
            previous: selection.previous.clone(),
        }
    }
}

impl<K: Key> fmt::Debug for RevealState<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let selection = self.inner.selection.read();
        f.debug_struct("RevealState")
            .field("visible", &selection.visible)
            .field("current", &key_of(&selection.current))
            .field("previous", &key_of(&selection.previous))
            .field("revealables", &selection.registry.len())
            .finish()
    }
}
