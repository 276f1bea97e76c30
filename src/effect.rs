//! Overlay effects and the overlay driver.

use crate::animation::{Tween, TweenSpec};
use crate::arrangement::OverlayScope;
use crate::color::Color;
use crate::events::{Press, PressArea, RevealCallbacks, TapRoute};
use crate::key::Key;
use crate::rect::IntSize;
use crate::revealable::{ActualRevealable, Revealable};
use crate::shape::Outline;
use crate::state::{RevealChange, RevealState};
use crate::unit::{Density, DpOffset, LayoutDirection};
use crossbeam::channel::{Receiver, TryRecvError};
use std::time::Duration;
use tracing::{debug, trace};

/// Drawing primitives of the host toolkit.
pub trait Canvas {
    /// Starts a group whose contents are composited with `alpha`.
    fn push_layer(&mut self, alpha: f64);

    fn pop_layer(&mut self);

    /// Fills the whole overlay.
    fn fill(&mut self, color: Color);

    /// Erases what was drawn inside `outline`, weighted by `alpha`.
    fn cut_out(&mut self, outline: &Outline, alpha: f64);

    fn stroke(&mut self, outline: &Outline, width: f64, color: Color, alpha: f64);
}

/// Visual style of an overlay.
pub trait OverlayEffect {
    /// Animation of the overlay alpha when the effect is shown or hidden.
    fn alpha_spec(&self) -> TweenSpec;

    /// Animation of each revealable's content alpha during a hand-off.
    fn content_alpha_spec(&self) -> TweenSpec;

    /// Draws a frame.
    fn draw<K: Key, C: Canvas + ?Sized>(
        &self,
        frame: &OverlayFrame<K>,
        density: Density,
        direction: LayoutDirection,
        canvas: &mut C,
    );
}

/// Dims everything but the reveal areas.
#[derive(Debug, Clone, PartialEq)]
pub struct DimEffect {
    /// Backdrop color.
    pub color: Color,
    pub alpha: TweenSpec,
    pub content_alpha: TweenSpec,
}

impl Default for DimEffect {
    fn default() -> Self {
        DimEffect {
            color: Color::BLACK.with_alpha(0.8),
            alpha: TweenSpec::default(),
            content_alpha: TweenSpec::default(),
        }
    }
}

impl OverlayEffect for DimEffect {
    fn alpha_spec(&self) -> TweenSpec {
        self.alpha
    }

    fn content_alpha_spec(&self) -> TweenSpec {
        self.content_alpha
    }

    fn draw<K: Key, C: Canvas + ?Sized>(
        &self,
        frame: &OverlayFrame<K>,
        density: Density,
        direction: LayoutDirection,
        canvas: &mut C,
    ) {
        if frame.items.is_empty() || frame.alpha == 0. {
            return;
        }

        canvas.push_layer(frame.alpha);
        canvas.fill(self.color);
        for item in &frame.items {
            let outline = item.revealable.outline(density, direction);
            canvas.cut_out(&outline, item.content_alpha);
            if let Some(border) = item.revealable.border_stroke {
                canvas.stroke(
                    &outline,
                    border.width.to_px(density),
                    border.color,
                    item.content_alpha,
                );
            }
        }
        canvas.pop_layer();
    }
}

/// Rendering context of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayConfig {
    /// Offset of the content's coordinate space within the overlay's.
    pub revealable_offset: DpOffset,
    pub density: Density,
    pub layout_direction: LayoutDirection,
    /// Size of the overlay in pixels; the space available to overlay content.
    pub size: IntSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRole {
    /// Fading out after another revealable was revealed.
    Previous,
    Current,
}

/// One revealable as drawn in a frame.
#[derive(Debug, Clone)]
pub struct OverlayItem<K> {
    pub role: ItemRole,
    pub revealable: ActualRevealable<K>,
    /// Alpha of the cutout and of the overlay content placed around it.
    pub content_alpha: f64,
    /// Positions overlay content around this item's reveal area.
    pub scope: OverlayScope,
}

impl<K> OverlayItem<K> {
    /// Whether overlay content for this item should be placed at all.
    pub fn content_visible(&self) -> bool {
        self.content_alpha > 0.
    }
}

/// Everything needed to draw the overlay at one point in time.
#[derive(Debug, Clone)]
pub struct OverlayFrame<K> {
    pub visible: bool,
    /// Overlay alpha.
    pub alpha: f64,
    /// Items in drawing order: previous first, then current.
    pub items: Vec<OverlayItem<K>>,
}

impl<K> OverlayFrame<K> {
    fn empty() -> OverlayFrame<K> {
        OverlayFrame {
            visible: false,
            alpha: 0.,
            items: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&OverlayItem<K>> {
        self.items.iter().find(|item| item.role == ItemRole::Current)
    }

    pub fn previous(&self) -> Option<&OverlayItem<K>> {
        self.items.iter().find(|item| item.role == ItemRole::Previous)
    }
}

/// Result of a press on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A callback or listener received the press.
    Handled(PressArea),
    /// The press is inside a passthrough revealable and should reach the content below.
    Passthrough,
    /// The effect is not visible; the press is not intercepted.
    Ignored,
}

#[derive(Debug)]
struct ItemHolder<K> {
    key: K,
    content_alpha: Tween,
}

impl<K: Key> ItemHolder<K> {
    /// Keeps the holder for the same key, or starts a new fade for a different one.
    fn sync(
        holder: &mut Option<ItemHolder<K>>,
        revealable: Option<&Revealable<K>>,
        from: f64,
        to: f64,
        spec: TweenSpec,
    ) {
        match revealable {
            None => *holder = None,
            Some(revealable) => {
                if holder.as_ref().map(|h| &h.key) != Some(&revealable.key) {
                    *holder = Some(ItemHolder {
                        key: revealable.key.clone(),
                        content_alpha: Tween::animating(from, to, spec),
                    });
                }
            }
        }
    }
}

/// Drives the overlay of a [`RevealState`]: animates it, produces frames, and routes presses.
///
/// The host calls [`tick`](Self::tick) once per frame and draws the result with
/// [`draw`](Self::draw). [`poll`](Self::poll) tells whether a new frame is needed.
pub struct RevealOverlay<K: Key, E: OverlayEffect = DimEffect> {
    state: RevealState<K>,
    changes: Receiver<RevealChange<K>>,
    effect: E,
    config: OverlayConfig,
    callbacks: RevealCallbacks<K>,
    alpha: Tween,
    current: Option<ItemHolder<K>>,
    previous: Option<ItemHolder<K>>,
    dirty: bool,
}

impl<K: Key> RevealOverlay<K, DimEffect> {
    pub fn new(state: RevealState<K>, callbacks: RevealCallbacks<K>) -> Self {
        RevealOverlay::with_effect(state, DimEffect::default(), callbacks)
    }
}

impl<K: Key, E: OverlayEffect> RevealOverlay<K, E> {
    pub fn with_effect(state: RevealState<K>, effect: E, callbacks: RevealCallbacks<K>) -> Self {
        // a restored visible state starts fully shown
        let alpha = if state.is_visible() { 1. } else { 0. };
        RevealOverlay {
            changes: state.subscribe(),
            state,
            alpha: Tween::new(alpha, effect.alpha_spec()),
            effect,
            config: OverlayConfig::default(),
            callbacks,
            current: None,
            previous: None,
            dirty: true,
        }
    }

    pub fn state(&self) -> &RevealState<K> {
        &self.state
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn config(&self) -> OverlayConfig {
        self.config
    }

    pub fn set_config(&mut self, config: OverlayConfig) {
        if config != self.config {
            self.config = config;
            self.dirty = true;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.alpha.is_running()
            || self.current.iter().any(|h| h.content_alpha.is_running())
            || self.previous.iter().any(|h| h.content_alpha.is_running())
    }

    /// Receives all pending state changes. Returns `true` if a new frame should be rendered.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.dirty;
        loop {
            match self.changes.try_recv() {
                Ok(change) => {
                    trace!(change = ?change, "state change");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed || self.is_animating()
    }

    /// Advances animations by `dt` and returns the frame to draw.
    ///
    /// Reports the end of the hide animation to the state once the overlay has faded out.
    pub fn tick(&mut self, dt: Duration) -> OverlayFrame<K> {
        self.poll();
        self.dirty = false;

        let snapshot = self.state.snapshot();
        self.alpha.animate_to(if snapshot.visible { 1. } else { 0. });

        let spec = self.effect.content_alpha_spec();
        ItemHolder::sync(&mut self.current, snapshot.current.as_ref(), 0., 1., spec);
        ItemHolder::sync(&mut self.previous, snapshot.previous.as_ref(), 1., 0., spec);

        self.alpha.tick(dt);
        for holder in self.current.iter_mut().chain(self.previous.iter_mut()) {
            holder.content_alpha.tick(dt);
        }

        let faded_out = !snapshot.visible && !self.alpha.is_running() && self.alpha.value() == 0.;
        if faded_out && (snapshot.current.is_some() || snapshot.previous.is_some()) {
            debug!("overlay faded out");
            self.state.on_hide_animation_finished();
            self.current = None;
            self.previous = None;
            return OverlayFrame::empty();
        }

        let mut items = Vec::with_capacity(2);
        if let (Some(revealable), Some(holder)) = (&snapshot.previous, &self.previous) {
            items.push(self.item(ItemRole::Previous, revealable, holder.content_alpha.value()));
        }
        if let (Some(revealable), Some(holder)) = (&snapshot.current, &self.current) {
            items.push(self.item(ItemRole::Current, revealable, holder.content_alpha.value()));
        }

        OverlayFrame {
            visible: snapshot.visible,
            alpha: self.alpha.value(),
            items,
        }
    }

    fn item(&self, role: ItemRole, revealable: &Revealable<K>, content_alpha: f64) -> OverlayItem<K> {
        let revealable = self.resolve(revealable);
        let scope = OverlayScope::new(
            revealable.int_area(),
            self.config.size,
            self.config.layout_direction,
        );
        OverlayItem {
            role,
            revealable,
            content_alpha,
            scope,
        }
    }

    fn resolve(&self, revealable: &Revealable<K>) -> ActualRevealable<K> {
        revealable.resolve(
            self.config.density,
            self.config.layout_direction,
            self.config.revealable_offset,
        )
    }

    /// Draws a frame with the overlay's effect.
    pub fn draw<C: Canvas + ?Sized>(&self, frame: &OverlayFrame<K>, canvas: &mut C) {
        self.effect.draw(
            frame,
            self.config.density,
            self.config.layout_direction,
            canvas,
        );
    }

    /// Routes a press to the clicked revealable's listener or to a global callback.
    ///
    /// Presses are only intercepted while the effect is visible; callbacks run without any lock
    /// held and may reveal or hide.
    pub fn press(&self, press: Press) -> PressOutcome {
        let snapshot = self.state.snapshot();
        let current = match (snapshot.visible, snapshot.current) {
            (true, Some(current)) => self.resolve(&current),
            _ => return PressOutcome::Ignored,
        };

        let (area, route) = TapRoute::resolve(&current, press);
        trace!(key = ?current.key, area = ?area, "press");
        match route {
            TapRoute::Listener(listener) => listener.call(&current.key),
            TapRoute::RevealableClick => self.callbacks.on_revealable_click.call(&current.key),
            TapRoute::OverlayClick => self.callbacks.on_overlay_click.call(&current.key),
            TapRoute::Passthrough => return PressOutcome::Passthrough,
        }
        PressOutcome::Handled(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::color::BorderStroke;
    use crate::events::ClickListener;
    use crate::rect::Rect;
    use crate::revealable::{OnClick, RevealableLayout, RevealableOptions};
    use crate::shape::RevealShape;
    use crate::unit::Dp;
    use cgmath::{Point2, Vector2};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    enum Op {
        Push(f64),
        Pop,
        Fill(Color),
        CutOut(Outline, f64),
        Stroke(Outline, f64, f64),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Canvas for Recorder {
        fn push_layer(&mut self, alpha: f64) {
            self.0.push(Op::Push(alpha));
        }
        fn pop_layer(&mut self) {
            self.0.push(Op::Pop);
        }
        fn fill(&mut self, color: Color) {
            self.0.push(Op::Fill(color));
        }
        fn cut_out(&mut self, outline: &Outline, alpha: f64) {
            self.0.push(Op::CutOut(outline.clone(), alpha));
        }
        fn stroke(&mut self, outline: &Outline, width: f64, _color: Color, alpha: f64) {
            self.0.push(Op::Stroke(outline.clone(), width, alpha));
        }
    }

    const FRAME: Duration = Duration::from_millis(50);

    fn effect() -> DimEffect {
        let spec = TweenSpec::new(Duration::from_millis(100), Easing::Linear);
        DimEffect {
            color: Color::BLACK,
            alpha: spec,
            content_alpha: spec,
        }
    }

    fn rect_options() -> RevealableOptions<&'static str> {
        RevealableOptions {
            shape: RevealShape::Rect,
            padding: crate::padding::PaddingValues::all(Dp(0.)),
            ..RevealableOptions::default()
        }
    }

    fn overlay(callbacks: RevealCallbacks<&'static str>) -> RevealOverlay<&'static str> {
        let state = RevealState::new();
        state.register(
            "a",
            rect_options(),
            RevealableLayout::new(Point2::new(0., 0.), Vector2::new(10., 10.)),
        );
        state.register(
            "b",
            rect_options(),
            RevealableLayout::new(Point2::new(50., 50.), Vector2::new(10., 10.)),
        );
        let mut overlay = RevealOverlay::with_effect(state, effect(), callbacks);
        overlay.set_config(OverlayConfig {
            size: IntSize::new(100, 100),
            ..OverlayConfig::default()
        });
        overlay
    }

    #[test]
    fn fades_in_and_out_then_clears_state() {
        let mut overlay = overlay(RevealCallbacks::default());
        assert!(overlay.tick(FRAME).items.is_empty());

        overlay.state().reveal(&"a").unwrap();
        assert!(overlay.poll());
        let frame = overlay.tick(FRAME);
        assert!((frame.alpha - 0.5).abs() < 1e-9);
        assert_eq!(frame.current().map(|i| i.revealable.key), Some("a"));
        let frame = overlay.tick(FRAME);
        assert_eq!(frame.alpha, 1.);
        assert!(!overlay.poll());

        overlay.state().hide();
        let frame = overlay.tick(FRAME);
        assert!(!frame.visible);
        assert_eq!(frame.items.len(), 1);
        assert_eq!(overlay.state().current_revealable_key(), Some("a"));

        let frame = overlay.tick(FRAME);
        assert!(frame.items.is_empty());
        assert_eq!(overlay.state().current_revealable_key(), None);
    }

    #[test]
    fn hand_off_keeps_both_items() {
        let mut overlay = overlay(RevealCallbacks::default());
        overlay.state().reveal(&"a").unwrap();
        overlay.tick(FRAME);
        overlay.tick(FRAME);

        overlay.state().reveal(&"b").unwrap();
        let frame = overlay.tick(FRAME);
        let previous = frame.previous().unwrap();
        let current = frame.current().unwrap();
        assert_eq!(previous.revealable.key, "a");
        assert_eq!(current.revealable.key, "b");
        assert!((previous.content_alpha - 0.5).abs() < 1e-9);
        assert!((current.content_alpha - 0.5).abs() < 1e-9);
        assert_eq!(current.revealable.area, Rect::from_ltrb(50., 50., 60., 60.));

        let frame = overlay.tick(FRAME);
        assert!(!frame.previous().unwrap().content_visible());
        assert!(frame.current().unwrap().content_visible());
    }

    #[test]
    fn draws_previous_before_current() {
        let mut overlay = overlay(RevealCallbacks::default());
        overlay.state().register(
            "a",
            RevealableOptions {
                border_stroke: Some(BorderStroke::new(Dp(2.), Color::BLACK)),
                ..rect_options()
            },
            RevealableLayout::new(Point2::new(0., 0.), Vector2::new(10., 10.)),
        );
        overlay.state().reveal(&"a").unwrap();
        overlay.tick(FRAME);
        overlay.tick(FRAME);
        overlay.state().reveal(&"b").unwrap();
        let frame = overlay.tick(FRAME);

        let mut canvas = Recorder::default();
        overlay.draw(&frame, &mut canvas);
        let a = Outline::Rect(Rect::from_ltrb(0., 0., 10., 10.));
        let b = Outline::Rect(Rect::from_ltrb(50., 50., 60., 60.));
        assert_eq!(
            canvas.0,
            vec![
                Op::Push(1.),
                Op::Fill(Color::BLACK),
                Op::CutOut(a.clone(), 0.5),
                Op::Stroke(a, 2., 0.5),
                Op::CutOut(b, 0.5),
                Op::Pop,
            ]
        );
    }

    #[test]
    fn presses_route_by_area() {
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let revealable_clicks = Arc::clone(&clicks);
        let overlay_clicks = Arc::clone(&clicks);
        let callbacks = RevealCallbacks::new(
            ClickListener::new(move |key: &&'static str| {
                revealable_clicks.lock().push(("revealable", *key))
            }),
            ClickListener::new(move |key: &&'static str| {
                overlay_clicks.lock().push(("overlay", *key))
            }),
        );
        let overlay = overlay(callbacks);

        let inside = Press::new(Point2::new(5., 5.));
        let outside = Press::new(Point2::new(90., 90.));
        assert_eq!(overlay.press(inside), PressOutcome::Ignored);

        overlay.state().reveal(&"a").unwrap();
        assert_eq!(overlay.press(inside), PressOutcome::Handled(PressArea::Revealable));
        assert_eq!(overlay.press(outside), PressOutcome::Handled(PressArea::Backdrop));
        assert_eq!(*clicks.lock(), vec![("revealable", "a"), ("overlay", "a")]);
    }

    #[test]
    fn passthrough_and_listener_policies() {
        let overlay = overlay(RevealCallbacks::default());
        let layout = RevealableLayout::new(Point2::new(0., 0.), Vector2::new(10., 10.));
        overlay.state().register(
            "a",
            RevealableOptions {
                on_click: Some(OnClick::Passthrough),
                ..rect_options()
            },
            layout,
        );
        overlay.state().reveal(&"a").unwrap();
        assert_eq!(overlay.press(Press::new(Point2::new(5., 5.))), PressOutcome::Passthrough);

        let state = overlay.state().clone();
        overlay.state().register(
            "a",
            RevealableOptions {
                on_click: Some(OnClick::Listener(ClickListener::new(move |_: &&'static str| {
                    state.reveal(&"b").unwrap()
                }))),
                ..rect_options()
            },
            layout,
        );
        assert_eq!(
            overlay.press(Press::new(Point2::new(5., 5.))),
            PressOutcome::Handled(PressArea::Revealable)
        );
        assert_eq!(overlay.state().current_revealable_key(), Some("b"));
    }

    #[test]
    fn restored_visible_state_starts_shown() {
        let state = RevealState::with_restored(true, Some("a"));
        let mut overlay = RevealOverlay::with_effect(state, effect(), RevealCallbacks::default());
        assert!(overlay.tick(FRAME).items.is_empty());

        overlay.state().register(
            "a",
            rect_options(),
            RevealableLayout::new(Point2::new(0., 0.), Vector2::new(10., 10.)),
        );
        let frame = overlay.tick(FRAME);
        assert_eq!(frame.alpha, 1.);
        assert_eq!(frame.current().map(|i| i.revealable.key), Some("a"));
    }
}
