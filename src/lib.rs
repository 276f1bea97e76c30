//! Reveal effects: dim the screen and cut out one registered element at a time.
//!
//! Elements are registered with a [`RevealState`] under a [`Key`] together with their shape,
//! padding and layout. Revealing a key moves the previously revealed element to a fading-out
//! slot so a [`RevealOverlay`] can cross-fade between the two, and hiding the effect keeps the
//! last element around until the overlay reports that its fade-out finished.
//!
//! Content placed around the reveal area is positioned with an [`OverlayScope`].

pub mod animation;
pub mod arrangement;
pub mod color;
pub mod effect;
mod error;
pub mod events;
mod key;
pub mod padding;
mod rect;
mod registry;
pub mod revealable;
pub mod shape;
mod state;
pub mod unit;

pub use arrangement::OverlayScope;
pub use effect::{Canvas, DimEffect, OverlayConfig, OverlayEffect, OverlayFrame, RevealOverlay};
pub use error::{Result, RevealError};
pub use key::Key;
pub use rect::{IntRect, IntSize, Rect};
pub use revealable::{ActualRevealable, Revealable, RevealableLayout, RevealableOptions};
pub use shape::RevealShape;
pub use state::{RevealChange, RevealSnapshot, RevealState, SavedRevealState};
