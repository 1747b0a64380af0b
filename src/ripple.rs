use kurbo::{Point, Rect};

use crate::ease::Ease;

/// Ripple lifetime in milliseconds. Cleanup is timer-based and decoupled
/// from animation completion so the active list stays bounded even if an
/// animation callback is missed.
pub const RIPPLE_LIFETIME_MS: u64 = 600;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Ripple {
    pub id: u64,
    /// Top-left of the ripple circle, relative to the element.
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub created_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RippleSample {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Active ripples for one clickable element.
#[derive(Clone, Debug, Default)]
pub struct RippleField {
    ripples: Vec<Ripple>,
    next_id: u64,
}

impl RippleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a ripple centered on the click, sized to cover the whole
    /// element once expanded.
    pub fn click(&mut self, click: Point, bounds: Rect, now_ms: u64) -> u64 {
        let diameter = bounds.width().max(bounds.height());
        let id = self.next_id;
        self.next_id += 1;
        self.ripples.push(Ripple {
            id,
            x: click.x - bounds.x0 - diameter / 2.0,
            y: click.y - bounds.y0 - diameter / 2.0,
            diameter,
            created_ms: now_ms,
        });
        id
    }

    /// Drops every ripple whose lifetime has elapsed. Each record is removed
    /// exactly once, at its own deadline, regardless of later clicks.
    pub fn prune(&mut self, now_ms: u64) {
        self.ripples
            .retain(|r| now_ms.saturating_sub(r.created_ms) < RIPPLE_LIFETIME_MS);
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Scale 0 -> 2 and opacity 1 -> 0 over the lifetime, eased out.
    pub fn sample(&self, now_ms: u64) -> Vec<RippleSample> {
        self.ripples
            .iter()
            .map(|r| {
                let age = now_ms.saturating_sub(r.created_ms) as f64;
                let t = Ease::OutQuad.apply(age / RIPPLE_LIFETIME_MS as f64);
                RippleSample {
                    id: r.id,
                    x: r.x,
                    y: r.y,
                    diameter: r.diameter,
                    scale: 2.0 * t,
                    opacity: 1.0 - t,
                }
            })
            .collect()
    }
}
