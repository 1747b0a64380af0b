use kurbo::{CubicBez, ParamCurve, Point};

/// Easing curves: normalized time in [0,1] to normalized progress.
///
/// `Bezier` is a CSS-style cubic-bezier through (0,0) and (1,1) with two
/// control points; progress may overshoot [0,1] (used by the bounce preset).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    /// Signature editorial curve: cubic-bezier(0.22, 1, 0.36, 1).
    pub fn kinetic() -> Self {
        Self::Bezier {
            x1: 0.22,
            y1: 1.0,
            x2: 0.36,
            y2: 1.0,
        }
    }

    /// Hard snap curve: cubic-bezier(0.86, 0, 0.07, 1).
    pub fn snap() -> Self {
        Self::Bezier {
            x1: 0.86,
            y1: 0.0,
            x2: 0.07,
            y2: 1.0,
        }
    }

    /// Overshooting bounce curve: cubic-bezier(0.68, -0.55, 0.265, 1.55).
    pub fn bounce() -> Self {
        Self::Bezier {
            x1: 0.68,
            y1: -0.55,
            x2: 0.265,
            y2: 1.55,
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Bezier { x1, y1, x2, y2 } => cubic_bezier_progress(x1, y1, x2, y2, t),
        }
    }
}

/// Evaluates a CSS cubic-bezier at time `x` by inverting the x-component
/// with bisection (x is monotone for control x in [0,1]), then reading y.
fn cubic_bezier_progress(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let curve = CubicBez::new(
        Point::new(0.0, 0.0),
        Point::new(x1, y1),
        Point::new(x2, y2),
        Point::new(1.0, 1.0),
    );

    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = x;
    for _ in 0..48 {
        mid = 0.5 * (lo + hi);
        let px = curve.eval(mid).x;
        if (px - x).abs() < 1e-7 {
            break;
        }
        if px < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve.eval(mid).y
}
