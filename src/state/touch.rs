// Double-tap recognition for touch input.
use super::geometry::Point;

/// Longest press that still counts as a tap.
pub const TAP_MAX_MS: f64 = 250.0;
/// Two taps must end within this window.
pub const DOUBLE_TAP_MS: f64 = 300.0;
/// Finger travel beyond this turns a tap into a pan.
pub const TAP_SLOP_PX: f64 = 10.0;
/// Max distance between the two taps of a double tap.
pub const DOUBLE_TAP_SLOP_PX: f64 = 30.0;

#[derive(Clone, Copy, Debug)]
struct Press {
    at_ms: f64,
    pos: Point,
}

#[derive(Default, Debug, Clone)]
pub struct TapTracker {
    press: Option<Press>,
    last_tap: Option<Press>,
}

impl TapTracker {
    pub fn touch_start(&mut self, touches: &[Point], now_ms: f64) {
        match touches {
            [only] => self.press = Some(Press { at_ms: now_ms, pos: *only }),
            _ => {
                // a second finger cancels both the press and any pending tap
                self.press = None;
                self.last_tap = None;
            }
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        let Some(press) = self.press else { return };
        let stayed = matches!(touches, [only] if only.distance(press.pos) <= TAP_SLOP_PX);
        if !stayed {
            self.press = None;
        }
    }

    /// Returns true when this release completes a double tap.
    pub fn touch_end(&mut self, now_ms: f64) -> bool {
        let Some(press) = self.press.take() else {
            return false;
        };
        if now_ms - press.at_ms > TAP_MAX_MS {
            self.last_tap = None;
            return false;
        }
        let tap = Press { at_ms: now_ms, pos: press.pos };
        match self.last_tap.take() {
            Some(prev)
                if tap.at_ms - prev.at_ms <= DOUBLE_TAP_MS
                    && tap.pos.distance(prev.pos) <= DOUBLE_TAP_SLOP_PX =>
            {
                true
            }
            _ => {
                self.last_tap = Some(tap);
                false
            }
        }
    }
}
