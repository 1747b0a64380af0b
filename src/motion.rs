use std::collections::BTreeMap;

use crate::{
    ease::Ease,
    error::{KineticError, KineticResult},
};

/// Duration presets (seconds) shared by the motion variants.
pub const DUR_INSTANT: f64 = 0.1;
pub const DUR_FAST: f64 = 0.2;
pub const DUR_BASE: f64 = 0.3;
pub const DUR_SLOW: f64 = 0.4;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for kurbo::Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        kurbo::Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Animatable visual property. Transforms never trigger layout; hosts apply
/// them as pure transforms.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MotionProp {
    X,
    Y,
    Scale,
    Rotate,
    RotateX,
    RotateY,
    Opacity,
    Width,
}

/// A named point in an animation: property -> value.
pub type MotionState = BTreeMap<MotionProp, f64>;

pub fn state(props: &[(MotionProp, f64)]) -> MotionState {
    props.iter().copied().collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    None,
    Loop,
    Yoyo,
}

/// A two-state transition: `from` -> `to` over `duration_s`, after `delay_s`.
///
/// Interpolation is only defined when both states name the same property
/// set; `validate` enforces it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Variant {
    pub from: MotionState,
    pub to: MotionState,
    pub duration_s: f64,
    pub delay_s: f64,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl Variant {
    pub fn new(from: MotionState, to: MotionState, duration_s: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_s,
            delay_s: 0.0,
            ease,
            repeat: Repeat::None,
        }
    }

    pub fn with_delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn validate(&self) -> KineticResult<()> {
        if !(self.duration_s > 0.0) || !self.duration_s.is_finite() {
            return Err(KineticError::validation(
                "variant duration_s must be finite and > 0",
            ));
        }
        if self.delay_s < 0.0 || !self.delay_s.is_finite() {
            return Err(KineticError::validation(
                "variant delay_s must be finite and >= 0",
            ));
        }
        if self.from.len() != self.to.len()
            || !self.from.keys().all(|k| self.to.contains_key(k))
        {
            return Err(KineticError::validation(
                "variant from/to must name the same property set",
            ));
        }
        Ok(())
    }

    /// Samples the variant at `elapsed_s` since it was started.
    ///
    /// Before the delay has passed the `from` state is returned unchanged;
    /// past the duration the behavior follows `repeat`.
    pub fn sample(&self, elapsed_s: f64) -> KineticResult<MotionState> {
        self.validate()?;

        let local = elapsed_s - self.delay_s;
        if local <= 0.0 {
            return Ok(self.from.clone());
        }

        let cycles = local / self.duration_s;
        let t = match self.repeat {
            Repeat::None => cycles.min(1.0),
            Repeat::Loop => cycles.fract(),
            Repeat::Yoyo => {
                let pos = cycles % 2.0;
                if pos <= 1.0 {
                    pos
                } else {
                    2.0 - pos
                }
            }
        };

        let te = self.ease.apply(t);
        let mut out = MotionState::new();
        for (prop, a) in &self.from {
            // validate() guarantees the key exists in `to`.
            let b = self.to.get(prop).copied().unwrap_or(*a);
            out.insert(*prop, f64::lerp(a, &b, te));
        }
        Ok(out)
    }

    /// True once a non-repeating variant has fully played out.
    pub fn is_finished(&self, elapsed_s: f64) -> bool {
        self.repeat == Repeat::None && elapsed_s - self.delay_s >= self.duration_s
    }
}

// Preset variants mirroring the editorial motion system.

pub fn slide_in_left() -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0), (MotionProp::X, -60.0)]),
        state(&[(MotionProp::Opacity, 1.0), (MotionProp::X, 0.0)]),
        DUR_BASE,
        Ease::snap(),
    )
}

pub fn slide_in_right() -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0), (MotionProp::X, 60.0)]),
        state(&[(MotionProp::Opacity, 1.0), (MotionProp::X, 0.0)]),
        DUR_BASE,
        Ease::snap(),
    )
}

pub fn slide_up() -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0), (MotionProp::Y, 40.0)]),
        state(&[(MotionProp::Opacity, 1.0), (MotionProp::Y, 0.0)]),
        DUR_BASE,
        Ease::kinetic(),
    )
}

pub fn pop_in() -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0), (MotionProp::Scale, 0.9)]),
        state(&[(MotionProp::Opacity, 1.0), (MotionProp::Scale, 1.0)]),
        DUR_FAST,
        Ease::snap(),
    )
}

pub fn scroll_reveal() -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0), (MotionProp::Y, 30.0)]),
        state(&[(MotionProp::Opacity, 1.0), (MotionProp::Y, 0.0)]),
        DUR_BASE,
        Ease::kinetic(),
    )
}

pub fn page_fade() -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0)]),
        state(&[(MotionProp::Opacity, 1.0)]),
        DUR_BASE,
        Ease::kinetic(),
    )
}

/// Per-child delays for staggered groups: `initial + i * step`.
pub fn stagger_delays(count: usize, step_s: f64, initial_s: f64) -> Vec<f64> {
    (0..count).map(|i| initial_s + i as f64 * step_s).collect()
}

pub const STAGGER_STEP: f64 = 0.08;
pub const STAGGER_INITIAL: f64 = 0.1;

/// Continuous float: y runs 0 -> -offset -> 0 each period, eased in/out.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FloatLoop {
    pub period_s: f64,
    pub y_offset: f64,
}

impl Default for FloatLoop {
    fn default() -> Self {
        Self {
            period_s: 3.0,
            y_offset: 10.0,
        }
    }
}

impl FloatLoop {
    pub fn sample_y(&self, elapsed_s: f64) -> f64 {
        if !(self.period_s > 0.0) {
            return 0.0;
        }
        let phase = (elapsed_s / self.period_s).rem_euclid(1.0);
        let tri = if phase < 0.5 {
            phase * 2.0
        } else {
            2.0 - phase * 2.0
        };
        -self.y_offset * Ease::InOutQuad.apply(tri)
    }
}
