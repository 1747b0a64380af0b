use kurbo::{Point, Rect, Vec2};

use crate::{
    motion::DUR_FAST,
    spring::{Spring, Spring2, SpringSpec},
};

/// Pulls an element toward the pointer while it hovers inside the bounds.
///
/// The raw pull is the vector from the element center to the pointer scaled
/// by `pull`; a spring chases that target so the offset stays continuous and
/// returns exactly to zero after the pointer leaves.
#[derive(Clone, Copy, Debug)]
pub struct Magnetic {
    pub pull: f64,
    offset: Spring2,
}

impl Magnetic {
    pub fn new(spec: SpringSpec, pull: f64) -> Self {
        Self {
            pull,
            offset: Spring2::new(spec),
        }
    }

    pub fn pointer_move(&mut self, pointer: Point, bounds: Rect) {
        let center = bounds.center();
        let raw = (pointer - center) * self.pull;
        self.offset.set_target(raw);
    }

    pub fn pointer_leave(&mut self) {
        self.offset.set_target(Vec2::ZERO);
    }

    pub fn step(&mut self, dt: f64) -> bool {
        self.offset.step(dt)
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.value()
    }

    pub fn at_rest(&self) -> bool {
        self.offset.is_settled() && self.offset.value() == Vec2::ZERO
    }
}

impl Default for Magnetic {
    fn default() -> Self {
        Self::new(SpringSpec::gentle(), 0.3)
    }
}

/// 3-D tilt: the element rotates toward the cursor.
///
/// Horizontal pointer offset drives rotation about the vertical axis and
/// vertical offset drives rotation about the horizontal axis, sign-inverted
/// so the near edge dips toward the cursor.
#[derive(Clone, Copy, Debug)]
pub struct Tilt {
    pub intensity_deg: f64,
    rotate_x: Spring,
    rotate_y: Spring,
}

impl Tilt {
    pub fn new(spec: SpringSpec, intensity_deg: f64) -> Self {
        Self {
            intensity_deg,
            rotate_x: Spring::new(spec, 0.0),
            rotate_y: Spring::new(spec, 0.0),
        }
    }

    pub fn pointer_move(&mut self, pointer: Point, bounds: Rect) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let center = bounds.center();
        let dx = pointer.x - center.x;
        let dy = pointer.y - center.y;
        self.rotate_y
            .set_target((dx / bounds.width()) * self.intensity_deg);
        self.rotate_x
            .set_target(-(dy / bounds.height()) * self.intensity_deg);
    }

    pub fn pointer_leave(&mut self) {
        self.rotate_x.set_target(0.0);
        self.rotate_y.set_target(0.0);
    }

    pub fn step(&mut self, dt: f64) -> bool {
        let mx = self.rotate_x.step(dt);
        let my = self.rotate_y.step(dt);
        mx || my
    }

    /// Current rotation in degrees: (about horizontal axis, about vertical axis).
    pub fn rotation_deg(&self) -> (f64, f64) {
        (self.rotate_x.value(), self.rotate_y.value())
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self::new(SpringSpec::gentle(), 15.0)
    }
}

/// Filter strings for the three tinted copies of a split-RGB image.
pub const RGB_RED_FILTER: &str = "brightness(1.5) sepia(1) hue-rotate(-30deg)";
pub const RGB_GREEN_FILTER: &str = "brightness(1.5) sepia(1) hue-rotate(60deg)";
pub const RGB_BLUE_FILTER: &str = "brightness(1.5) sepia(1) hue-rotate(180deg)";
pub const RGB_LAYER_OPACITY: f64 = 0.5;

/// Sampled state of the three channel layers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RgbLayers {
    pub red_x: f64,
    pub green_x: f64,
    pub blue_x: f64,
}

/// Chromatic-aberration illusion: the red and blue copies shift apart
/// horizontally as the pointer moves off-center; the green copy stays fixed.
#[derive(Clone, Copy, Debug)]
pub struct RgbSplit {
    pub intensity: f64,
    offset: Spring,
}

impl RgbSplit {
    pub fn new(spec: SpringSpec, intensity: f64) -> Self {
        Self {
            intensity,
            offset: Spring::new(spec, 0.0),
        }
    }

    pub fn pointer_move(&mut self, pointer: Point, bounds: Rect) {
        let half_w = bounds.width() / 2.0;
        if half_w <= 0.0 {
            return;
        }
        let x_local = pointer.x - bounds.x0;
        let target = ((x_local - half_w) / half_w) * self.intensity;
        self.offset.set_target(target);
    }

    pub fn pointer_leave(&mut self) {
        self.offset.set_target(0.0);
    }

    pub fn step(&mut self, dt: f64) -> bool {
        self.offset.step(dt)
    }

    pub fn layers(&self) -> RgbLayers {
        let offset = self.offset.value();
        RgbLayers {
            red_x: -offset,
            green_x: 0.0,
            blue_x: offset,
        }
    }
}

impl Default for RgbSplit {
    fn default() -> Self {
        Self::new(SpringSpec::gentle(), 5.0)
    }
}

/// Custom cursor follower: a dot plus a blurred glow tracking the raw
/// pointer, both growing while an interactive target is hovered.
#[derive(Clone, Copy, Debug)]
pub struct CursorFollower {
    position: Point,
    over_interactive: bool,
    // 0 = plain cursor, 1 = interactive hover, eased over DUR_FAST.
    hover_t: f64,
}

impl CursorFollower {
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            over_interactive: false,
            hover_t: 0.0,
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        self.position = pointer;
    }

    pub fn set_over_interactive(&mut self, over: bool) {
        self.over_interactive = over;
    }

    pub fn step(&mut self, dt: f64) {
        let dir = if self.over_interactive { 1.0 } else { -1.0 };
        self.hover_t = (self.hover_t + dir * dt / DUR_FAST).clamp(0.0, 1.0);
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn dot_scale(&self) -> f64 {
        1.0 + 0.5 * self.hover_t
    }

    pub fn glow_scale(&self) -> f64 {
        1.0 + 1.0 * self.hover_t
    }

    pub fn glow_opacity(&self) -> f64 {
        0.15 + (0.3 - 0.15) * self.hover_t
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}
