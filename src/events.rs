//! Events.

use crate::key::Key;
use crate::revealable::{ActualRevealable, OnClick};
use cgmath::Point2;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// A pointer press on the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    /// Press location in the overlay coordinate system.
    pub location: Point2<f64>,
}

impl Press {
    pub fn new(location: Point2<f64>) -> Press {
        Press { location }
    }
}

/// A click listener that receives the key of the clicked revealable.
pub struct ClickListener<K>(Arc<Mutex<dyn FnMut(&K) + Send>>);

impl<K> Clone for ClickListener<K> {
    fn clone(&self) -> Self {
        ClickListener(Arc::clone(&self.0))
    }
}

impl<K: Key> ClickListener<K> {
    pub fn new<F: 'static + FnMut(&K) + Send>(listener: F) -> Self {
        ClickListener(Arc::new(Mutex::new(listener)))
    }

    /// A listener that does nothing.
    pub fn noop() -> Self {
        ClickListener::new(|_| {})
    }

    pub fn call(&self, key: &K) {
        (&mut *self.0.lock())(key)
    }
}

impl<K> fmt::Debug for ClickListener<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ClickListener")
    }
}

/// Where a press landed relative to the current cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressArea {
    Revealable,
    Backdrop,
}

/// The receiver of a press.
#[derive(Debug, Clone)]
pub enum TapRoute<K> {
    /// The revealable's own listener.
    Listener(ClickListener<K>),
    /// The global revealable click callback.
    RevealableClick,
    /// The global overlay click callback.
    OverlayClick,
    /// The press is not intercepted and should reach the content below.
    Passthrough,
}

impl<K: Key> TapRoute<K> {
    /// Classifies a press against the current revealable and resolves its receiver.
    ///
    /// Presses on the backdrop always go to the overlay callback. Presses inside the cutout go
    /// to the revealable's click policy, falling back to the global revealable callback.
    pub fn resolve(revealable: &ActualRevealable<K>, press: Press) -> (PressArea, TapRoute<K>) {
        if !revealable.area.contains(press.location) {
            return (PressArea::Backdrop, TapRoute::OverlayClick);
        }

        let route = match &revealable.on_click {
            Some(OnClick::Listener(listener)) => TapRoute::Listener(listener.clone()),
            Some(OnClick::Passthrough) => TapRoute::Passthrough,
            None => TapRoute::RevealableClick,
        };
        (PressArea::Revealable, route)
    }
}

/// Global click callbacks of an overlay.
#[derive(Debug, Clone)]
pub struct RevealCallbacks<K> {
    /// Called for presses inside the cutout of a revealable without its own click policy.
    pub on_revealable_click: ClickListener<K>,
    /// Called for presses outside the cutout.
    pub on_overlay_click: ClickListener<K>,
}

impl<K: Key> RevealCallbacks<K> {
    pub fn new(on_revealable_click: ClickListener<K>, on_overlay_click: ClickListener<K>) -> Self {
        RevealCallbacks {
            on_revealable_click,
            on_overlay_click,
        }
    }
}

impl<K: Key> Default for RevealCallbacks<K> {
    fn default() -> Self {
        RevealCallbacks::new(ClickListener::noop(), ClickListener::noop())
    }
}
