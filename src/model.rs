//! View state of the avatar viewer and the zoom/pan transitions driving it.
//! Every transition is a pure function of (state, action); the component only
//! measures the DOM and dispatches.

use std::rc::Rc;
use yew::Reducible;

use crate::state::config::MIN_SCALE;
use crate::state::{pinch_distance, Point, ViewerConfig, Viewport};

/// The interaction currently in progress. Dragging and pinching are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer or single-finger pan. `anchor` is the pointer position minus the offset at start.
    Dragging { anchor: Point },
    /// Two-finger zoom. `baseline` is the last observed distance between the fingers.
    Pinching { baseline: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    ZoomIn,
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::ZoomIn => "zoom-in",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    pub offset: Point,
    pub gesture: Gesture,
    pub config: ViewerConfig,
}

/// Positions are viewport-local; `viewport` is the rect measured when the event fired.
#[derive(Clone, Debug)]
pub enum ViewerAction {
    Wheel { delta_y: f64, cursor: Point, viewport: Viewport },
    PointerDown { pos: Point },
    PointerMove { pos: Point, viewport: Viewport },
    PointerUp,
    PointerLeave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point>, viewport: Viewport },
    TouchEnd,
    Reset,
    Close,
}

impl ViewState {
    /// An invalid config is replaced by the default so scale clamping stays well-formed.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            scale: MIN_SCALE,
            offset: Point::ORIGIN,
            gesture: Gesture::Idle,
            config: config.validated().unwrap_or_default(),
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_SCALE
    }

    /// True while a pan tracks the pointer; renderers should skip easing then.
    pub fn is_interacting(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn cursor(&self) -> Cursor {
        if !self.is_zoomed() {
            Cursor::ZoomIn
        } else if self.is_interacting() {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        }
    }

    pub fn transform_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(MIN_SCALE, self.config.max_scale)
    }

    fn snap_to_identity(&mut self) {
        self.scale = MIN_SCALE;
        self.offset = Point::ORIGIN;
    }

    fn wheel(&mut self, delta_y: f64, cursor: Point, viewport: Viewport) {
        let delta = -delta_y * self.config.wheel_sensitivity;
        let current = self.scale;
        let next = self.clamp_scale(current + delta);
        if next == MIN_SCALE {
            self.snap_to_identity();
            return;
        }
        if next > current {
            // keep the point under the cursor fixed
            let from_center = cursor - viewport.center();
            let factor = (next - current) / current;
            self.offset = self.offset - from_center * factor;
        } else {
            let centering = (current - next) / current;
            self.offset = self.offset * (1.0 - centering);
        }
        self.scale = next;
        if self.config.clamp_after_wheel {
            self.offset = viewport.clamp_offset(self.offset, self.scale);
        }
    }

    fn begin_drag(&mut self, pos: Point) -> bool {
        if !self.is_zoomed() {
            return false;
        }
        self.gesture = Gesture::Dragging { anchor: pos - self.offset };
        true
    }

    fn drag_to(&mut self, pos: Point, viewport: Viewport) -> bool {
        let Gesture::Dragging { anchor } = self.gesture else {
            return false;
        };
        if !self.is_zoomed() {
            return false;
        }
        let next = viewport.clamp_offset(pos - anchor, self.scale);
        if next == self.offset {
            return false;
        }
        self.offset = next;
        true
    }

    fn end_drag(&mut self) -> bool {
        if self.is_interacting() {
            self.gesture = Gesture::Idle;
            true
        } else {
            false
        }
    }

    fn pinch(&mut self, distance: f64) {
        if let Gesture::Pinching { baseline } = self.gesture {
            let delta = (distance - baseline) * self.config.pinch_sensitivity;
            self.scale = self.clamp_scale(self.scale + delta);
            if self.scale == MIN_SCALE {
                self.offset = Point::ORIGIN;
            }
        }
        self.gesture = Gesture::Pinching { baseline: distance };
    }
}

impl Reducible for ViewState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewerAction::*;
        let mut new = (*self).clone();
        match action {
            Wheel { delta_y, cursor, viewport } => new.wheel(delta_y, cursor, viewport),
            PointerDown { pos } => {
                if !new.begin_drag(pos) { return self; }
            }
            PointerMove { pos, viewport } => {
                if !new.drag_to(pos, viewport) { return self; }
            }
            PointerUp | PointerLeave => {
                if !new.end_drag() { return self; }
            }
            TouchStart { touches } => {
                if let Some(d) = pinch_distance(&touches) {
                    new.gesture = Gesture::Pinching { baseline: d };
                } else if let [first] = touches.as_slice() {
                    if !new.begin_drag(*first) { return self; }
                } else {
                    return self;
                }
            }
            TouchMove { touches, viewport } => {
                if let Some(d) = pinch_distance(&touches) {
                    new.pinch(d);
                } else if let [first] = touches.as_slice() {
                    if !new.drag_to(*first, viewport) { return self; }
                } else {
                    return self;
                }
            }
            TouchEnd => {
                if new.gesture == Gesture::Idle { return self; }
                new.gesture = Gesture::Idle;
            }
            Reset => {
                new.snap_to_identity();
                new.end_drag();
            }
            Close => {
                let initial = ViewState::new(new.config);
                if initial == *self {
                    return self;
                }
                return Rc::new(initial);
            }
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn vp() -> Viewport {
        Viewport::new(0.0, 0.0, 400.0, 300.0)
    }

    fn fresh() -> Rc<ViewState> {
        Rc::new(ViewState::new(ViewerConfig::default()))
    }

    fn with(scale: f64, offset: Point) -> Rc<ViewState> {
        Rc::new(ViewState { scale, offset, ..ViewState::new(ViewerConfig::default()) })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn apply(state: Rc<ViewState>, actions: impl IntoIterator<Item = ViewerAction>) -> Rc<ViewState> {
        actions.into_iter().fold(state, |s, a| s.reduce(a))
    }

    fn wheel(delta_y: f64, x: f64, y: f64) -> ViewerAction {
        ViewerAction::Wheel { delta_y, cursor: Point::new(x, y), viewport: vp() }
    }

    fn touch_move(points: &[(f64, f64)]) -> ViewerAction {
        ViewerAction::TouchMove {
            touches: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            viewport: vp(),
        }
    }

    #[test]
    fn wheel_zoom_in_anchors_on_cursor() {
        let s = fresh().reduce(wheel(-100.0, 300.0, 200.0));
        assert!(close(s.scale, 1.2));
        assert!(close(s.offset.x, -20.0));
        assert!(close(s.offset.y, -10.0));
    }

    #[test]
    fn wheel_zoom_out_pulls_offset_toward_center() {
        let s = with(2.0, Point::new(100.0, -50.0)).reduce(wheel(250.0, 0.0, 0.0));
        // 2.0 - 0.5 = 1.5; centering factor 0.25
        assert!(close(s.scale, 1.5));
        assert!(close(s.offset.x, 75.0));
        assert!(close(s.offset.y, -37.5));
    }

    #[test]
    fn wheel_to_minimum_snaps_to_identity() {
        let s = with(1.3, Point::new(-30.0, 12.0)).reduce(wheel(1000.0, 10.0, 10.0));
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.offset, Point::ORIGIN);
    }

    #[test]
    fn wheel_does_not_clamp_offset_by_default() {
        // cursor far outside the viewport drives the offset past max_offset
        let s = fresh().reduce(wheel(-100.0, 5000.0, 150.0));
        assert!(s.offset.x.abs() > vp().max_offset(s.scale).x);
    }

    #[test]
    fn wheel_clamp_is_opt_in() {
        let cfg = ViewerConfig { clamp_after_wheel: true, ..ViewerConfig::default() };
        let s = Rc::new(ViewState::new(cfg)).reduce(wheel(-100.0, 5000.0, 150.0));
        let max = vp().max_offset(s.scale);
        assert!(close(s.offset.x, -max.x));
    }

    #[test]
    fn scale_stays_in_bounds_for_wheel_and_pinch_sequences() {
        let mut s = fresh();
        let deltas = [-900.0, -900.0, -5000.0, 300.0, 12000.0, -40.0, 80.0, -3000.0];
        for (i, d) in deltas.iter().enumerate() {
            s = s.reduce(wheel(*d, 37.0 * i as f64, 400.0 - 20.0 * i as f64));
            assert!(s.scale >= 1.0 && s.scale <= 4.0, "scale {} out of range", s.scale);
        }
        for dist in [50.0, 400.0, 900.0, 10.0, 0.0, 700.0] {
            s = s.reduce(touch_move(&[(0.0, 0.0), (dist, 0.0)]));
            assert!(s.scale >= 1.0 && s.scale <= 4.0, "scale {} out of range", s.scale);
        }
    }

    #[test]
    fn drag_pans_from_anchor() {
        let s = apply(
            with(2.0, Point::new(10.0, 10.0)),
            [
                ViewerAction::PointerDown { pos: Point::new(100.0, 100.0) },
                ViewerAction::PointerMove { pos: Point::new(150.0, 150.0), viewport: vp() },
            ],
        );
        assert_eq!(s.gesture, Gesture::Dragging { anchor: Point::new(90.0, 90.0) });
        assert_eq!(s.offset, Point::new(60.0, 60.0));
        assert_eq!(s.cursor(), Cursor::Grabbing);
        assert!(s.is_interacting());
    }

    #[test]
    fn drag_clamps_to_max_offset() {
        for scale in [1.5, 2.0, 3.7] {
            let s = apply(
                with(scale, Point::ORIGIN),
                [
                    ViewerAction::PointerDown { pos: Point::new(0.0, 0.0) },
                    ViewerAction::PointerMove { pos: Point::new(-9000.0, 9000.0), viewport: vp() },
                ],
            );
            let max = vp().max_offset(scale);
            assert!(s.offset.x.abs() <= max.x + EPS);
            assert!(s.offset.y.abs() <= max.y + EPS);
            assert!(close(s.offset.x, -max.x));
        }
    }

    #[test]
    fn pan_is_noop_at_identity() {
        let s = fresh();
        let after = apply(
            s.clone(),
            [
                ViewerAction::PointerDown { pos: Point::new(10.0, 10.0) },
                ViewerAction::PointerMove { pos: Point::new(80.0, 40.0), viewport: vp() },
                ViewerAction::TouchStart { touches: vec![Point::new(5.0, 5.0)] },
                touch_move(&[(60.0, 60.0)]),
            ],
        );
        assert!(Rc::ptr_eq(&s, &after));
        assert_eq!(after.cursor(), Cursor::ZoomIn);
    }

    #[test]
    fn pointer_up_and_leave_end_drag() {
        for end in [ViewerAction::PointerUp, ViewerAction::PointerLeave] {
            let s = apply(
                with(2.0, Point::ORIGIN),
                [ViewerAction::PointerDown { pos: Point::new(1.0, 1.0) }, end],
            );
            assert_eq!(s.gesture, Gesture::Idle);
            assert_eq!(s.cursor(), Cursor::Grab);
        }
    }

    #[test]
    fn single_touch_pans_like_pointer() {
        let s = apply(
            with(2.0, Point::new(10.0, 10.0)),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(100.0, 100.0)] },
                touch_move(&[(150.0, 150.0)]),
            ],
        );
        assert_eq!(s.offset, Point::new(60.0, 60.0));
    }

    #[test]
    fn pinch_zoom_uses_distance_delta() {
        let s = apply(
            fresh(),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)] },
                touch_move(&[(0.0, 0.0), (150.0, 0.0)]),
            ],
        );
        assert!(close(s.scale, 1.5));
        assert_eq!(s.gesture, Gesture::Pinching { baseline: 150.0 });
        // pinch applies no offset compensation
        assert_eq!(s.offset, Point::ORIGIN);
    }

    #[test]
    fn first_pinch_move_only_records_baseline() {
        let s = fresh().reduce(touch_move(&[(0.0, 0.0), (0.0, 80.0)]));
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.gesture, Gesture::Pinching { baseline: 80.0 });
    }

    #[test]
    fn pinch_to_minimum_recenters() {
        let s = apply(
            with(1.4, Point::new(30.0, -20.0)),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0)] },
                touch_move(&[(0.0, 0.0), (20.0, 0.0)]),
            ],
        );
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.offset, Point::ORIGIN);
    }

    #[test]
    fn second_finger_turns_drag_into_pinch() {
        let s = apply(
            with(2.0, Point::ORIGIN),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(10.0, 10.0)] },
                ViewerAction::TouchStart { touches: vec![Point::new(10.0, 10.0), Point::new(10.0, 70.0)] },
            ],
        );
        assert_eq!(s.gesture, Gesture::Pinching { baseline: 60.0 });
        assert!(!s.is_interacting());
    }

    #[test]
    fn touch_end_clears_gesture() {
        let s = apply(
            with(2.0, Point::ORIGIN),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(0.0, 0.0), Point::new(0.0, 50.0)] },
                ViewerAction::TouchEnd,
            ],
        );
        assert_eq!(s.gesture, Gesture::Idle);
        // remaining finger does not pan without a fresh touch start
        let after = s.clone().reduce(touch_move(&[(40.0, 40.0)]));
        assert!(Rc::ptr_eq(&s, &after));
    }

    #[test]
    fn reset_returns_to_identity_from_any_state() {
        for (scale, offset) in [(1.0, Point::ORIGIN), (2.5, Point::new(-120.0, 33.0)), (4.0, Point::new(600.0, 450.0))] {
            let s = with(scale, offset).reduce(ViewerAction::Reset);
            assert_eq!(s.scale, 1.0);
            assert_eq!(s.offset, Point::ORIGIN);
        }
    }

    #[test]
    fn close_mid_drag_starts_next_session_fresh() {
        let cfg = ViewerConfig { max_scale: 6.0, ..ViewerConfig::default() };
        let s = apply(
            Rc::new(ViewState { scale: 3.0, ..ViewState::new(cfg.clone()) }),
            [
                ViewerAction::PointerDown { pos: Point::new(200.0, 150.0) },
                ViewerAction::PointerMove { pos: Point::new(260.0, 170.0), viewport: vp() },
                ViewerAction::Close,
            ],
        );
        assert_eq!(*s, ViewState::new(cfg));
        assert!(!s.is_interacting());
    }

    #[test]
    fn reset_ends_a_drag_in_progress() {
        let s = apply(
            with(2.0, Point::new(15.0, -5.0)),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(50.0, 50.0)] },
                ViewerAction::Reset,
            ],
        );
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.gesture, Gesture::Idle);
        assert!(!s.is_interacting());
        assert_eq!(s.cursor(), Cursor::ZoomIn);
    }

    #[test]
    fn reset_keeps_pinch_tracking() {
        let s = apply(
            with(2.0, Point::ORIGIN),
            [
                ViewerAction::TouchStart { touches: vec![Point::new(0.0, 0.0), Point::new(0.0, 40.0)] },
                ViewerAction::Reset,
            ],
        );
        assert_eq!(s.gesture, Gesture::Pinching { baseline: 40.0 });
    }

    #[test]
    fn invalid_config_falls_back_to_default() {
        for max_scale in [0.5, f64::NAN, f64::INFINITY] {
            let cfg = ViewerConfig { max_scale, ..ViewerConfig::default() };
            let s = Rc::new(ViewState::new(cfg)).reduce(wheel(-5000.0, 200.0, 150.0));
            assert_eq!(s.config, ViewerConfig::default());
            assert_eq!(s.scale, 4.0);
        }
        let cfg = ViewerConfig { pinch_sensitivity: -1.0, ..ViewerConfig::default() };
        assert_eq!(ViewState::new(cfg).config, ViewerConfig::default());
    }

    #[test]
    fn close_on_initial_state_keeps_same_rc() {
        let s = fresh();
        let after = s.clone().reduce(ViewerAction::Close);
        assert!(Rc::ptr_eq(&s, &after));
    }

    #[test]
    fn wheel_zoom_in_at_max_scale_changes_nothing() {
        let s = with(4.0, Point::new(30.0, -20.0));
        let after = s.clone().reduce(wheel(-100.0, 350.0, 10.0));
        assert_eq!(after.scale, 4.0);
        assert_eq!(after.offset, Point::new(30.0, -20.0));
        assert!(Rc::ptr_eq(&s, &after));
    }

    #[test]
    fn transform_string_matches_state() {
        let s = with(1.5, Point::new(-20.0, 12.5));
        assert_eq!(s.transform_css(), "translate(-20px, 12.5px) scale(1.5)");
        assert_eq!(fresh().transform_css(), "translate(0px, 0px) scale(1)");
    }
}
