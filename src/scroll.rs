use kurbo::Rect;

use crate::{
    ease::Ease,
    error::{KineticError, KineticResult},
};

/// Normalized page scroll progress.
///
/// `content_h <= viewport_h` means there is nothing to scroll: progress is
/// defined as 0, never NaN. O(1) per call so it can run on every scroll event.
pub fn scroll_progress(scroll_y: f64, viewport_h: f64, content_h: f64) -> f64 {
    let max_scroll = content_h - viewport_h;
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_y / max_scroll).clamp(0.0, 1.0)
}

/// Horizontal progress bar scaled on the X axis, anchored at the left edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollProgressBar {
    scale_x: f64,
}

impl ScrollProgressBar {
    pub fn on_scroll(&mut self, scroll_y: f64, viewport_h: f64, content_h: f64) {
        self.scale_x = scroll_progress(scroll_y, viewport_h, content_h);
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealDirection {
    Up,
    Down,
    Left,
    Right,
}

impl RevealDirection {
    /// Starting offset (x, y) for a hidden element.
    fn start_offset(self, magnitude: f64) -> (f64, f64) {
        match self {
            Self::Up => (0.0, magnitude),
            Self::Down => (0.0, -magnitude),
            Self::Left => (magnitude, 0.0),
            Self::Right => (-magnitude, 0.0),
        }
    }
}

/// Entry margin: the element must be this far inside the viewport before the
/// reveal fires.
pub const REVEAL_MARGIN: f64 = 100.0;
pub const REVEAL_OFFSET: f64 = 60.0;
pub const REVEAL_DURATION_S: f64 = 0.6;

/// Sampled visual state of a reveal wrapper.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealSample {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

/// Reveal-on-scroll with fire-once semantics.
///
/// Once triggered the animation plays to completion and the latch stays set:
/// scrolling the element out and back never re-hides it.
#[derive(Clone, Copy, Debug)]
pub struct Reveal {
    pub direction: RevealDirection,
    pub delay_s: f64,
    revealed: bool,
    elapsed_s: f64,
}

impl Reveal {
    pub fn new(direction: RevealDirection) -> Self {
        Self {
            direction,
            delay_s: 0.0,
            revealed: false,
            elapsed_s: 0.0,
        }
    }

    pub fn with_delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s;
        self
    }

    pub fn has_revealed(&self) -> bool {
        self.revealed
    }

    /// Feeds the element's current box and the viewport box; arms the latch
    /// when the element crosses the entry margin.
    pub fn observe(&mut self, element: Rect, viewport: Rect) {
        if self.revealed {
            return;
        }
        let shrunk = Rect::new(
            viewport.x0,
            viewport.y0,
            viewport.x1,
            viewport.y1 - REVEAL_MARGIN,
        );
        if element.y0 < shrunk.y1 && element.y1 > shrunk.y0 {
            self.revealed = true;
            self.elapsed_s = 0.0;
        }
    }

    pub fn step(&mut self, dt: f64) {
        if self.revealed {
            self.elapsed_s += dt;
        }
    }

    pub fn sample(&self) -> RevealSample {
        let (sx, sy) = self.direction.start_offset(REVEAL_OFFSET);
        if !self.revealed {
            return RevealSample {
                x: sx,
                y: sy,
                opacity: 0.0,
            };
        }
        let local = (self.elapsed_s - self.delay_s).max(0.0);
        let t = Ease::kinetic().apply((local / REVEAL_DURATION_S).min(1.0));
        RevealSample {
            x: sx * (1.0 - t),
            y: sy * (1.0 - t),
            opacity: t,
        }
    }
}

/// Maps page scroll progress linearly to a vertical translation.
/// Purely a visual transform; never affects layout.
#[derive(Clone, Copy, Debug)]
pub struct Parallax {
    pub speed: f64,
    pub range: f64,
}

impl Parallax {
    pub fn new(speed: f64, range: f64) -> Self {
        Self { speed, range }
    }

    pub fn offset_y(&self, progress: f64) -> f64 {
        progress.clamp(0.0, 1.0) * self.speed * self.range
    }
}

/// An element's own travel through the viewport: 0 when its top enters from
/// the bottom edge, 1 when its bottom exits past the top edge.
pub fn view_progress(element: Rect, viewport: Rect) -> f64 {
    let total = viewport.height() + element.height();
    if total <= 0.0 {
        return 0.0;
    }
    ((viewport.y1 - element.y0) / total).clamp(0.0, 1.0)
}

/// Monotone piecewise-linear curve over [0,1].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PiecewiseLinear {
    stops: Vec<(f64, f64)>,
}

impl PiecewiseLinear {
    pub fn new(stops: Vec<(f64, f64)>) -> KineticResult<Self> {
        if stops.len() < 2 {
            return Err(KineticError::validation(
                "piecewise curve needs at least two stops",
            ));
        }
        if !stops.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(KineticError::validation(
                "piecewise curve stops must be strictly increasing",
            ));
        }
        Ok(Self { stops })
    }

    pub fn map(&self, t: f64) -> f64 {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        let idx = self.stops.partition_point(|&(x, _)| x <= t);
        let (x0, y0) = self.stops[idx - 1];
        let (x1, y1) = self.stops[idx];
        let f = (t - x0) / (x1 - x0);
        y0 + (y1 - y0) * f
    }
}

/// Reflection curves: opacity peaks mid-travel, the mirrored copy drifts
/// upward as the element scrolls past.
fn reflection_opacity_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        stops: vec![(0.0, 0.0), (0.5, 0.6), (1.0, 0.0)],
    }
}

fn reflection_y_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        stops: vec![(0.0, 20.0), (0.5, 0.0), (1.0, -20.0)],
    }
}

fn section_glow_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        stops: vec![(0.0, 0.0), (0.3, 0.4), (0.7, 0.4), (1.0, 0.0)],
    }
}

fn shine_x_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        stops: vec![(0.0, -100.0), (0.5, 0.0), (1.0, 100.0)],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ReflectionSample {
    pub opacity: f64,
    pub y_offset: f64,
    pub glow: f64,
    pub shine_x: f64,
}

/// Scroll-linked reflection: a flipped, gradient-masked duplicate whose
/// opacity and drift follow the element through the viewport.
#[derive(Clone, Debug)]
pub struct Reflection {
    opacity: PiecewiseLinear,
    y: PiecewiseLinear,
    glow: PiecewiseLinear,
    shine: PiecewiseLinear,
}

impl Reflection {
    pub fn new() -> Self {
        Self {
            opacity: reflection_opacity_curve(),
            y: reflection_y_curve(),
            glow: section_glow_curve(),
            shine: shine_x_curve(),
        }
    }

    pub fn sample(&self, element: Rect, viewport: Rect) -> ReflectionSample {
        let t = view_progress(element, viewport);
        ReflectionSample {
            opacity: self.opacity.map(t),
            y_offset: self.y.map(t),
            glow: self.glow.map(t),
            shine_x: self.shine.map(t),
        }
    }
}

impl Default for Reflection {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset added to scroll_y when resolving the active section, so the
/// highlight flips a little before the section top reaches the viewport top.
pub const SECTION_PROBE_OFFSET: f64 = 100.0;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Resolves which navigation section the probe line currently sits in.
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    spans: Vec<SectionSpan>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new(spans: Vec<SectionSpan>) -> Self {
        Self {
            spans,
            active: None,
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        let probe = scroll_y + SECTION_PROBE_OFFSET;
        for span in &self.spans {
            if probe >= span.top && probe < span.top + span.height {
                self.active = Some(span.id.clone());
                return;
            }
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_and_guards_zero_range() {
        assert_eq!(scroll_progress(0.0, 800.0, 4000.0), 0.0);
        assert_eq!(scroll_progress(3200.0, 800.0, 4000.0), 1.0);
        assert_eq!(scroll_progress(1600.0, 800.0, 4000.0), 0.5);
        assert_eq!(scroll_progress(5000.0, 800.0, 4000.0), 1.0);
        assert_eq!(scroll_progress(-5.0, 800.0, 4000.0), 0.0);
        // Page shorter than the viewport: defined as zero, not NaN.
        assert_eq!(scroll_progress(100.0, 800.0, 600.0), 0.0);
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn progress_bar_tracks_scroll() {
        let mut bar = ScrollProgressBar::default();
        bar.on_scroll(800.0, 800.0, 2400.0);
        assert_eq!(bar.scale_x(), 0.5);
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    #[test]
    fn reveal_fires_once_and_never_resets() {
        let mut r = Reveal::new(RevealDirection::Up);
        // Element far below the fold: hidden at its start offset.
        r.observe(Rect::new(0.0, 2000.0, 100.0, 2100.0), viewport());
        assert!(!r.has_revealed());
        assert_eq!(
            r.sample(),
            RevealSample {
                x: 0.0,
                y: REVEAL_OFFSET,
                opacity: 0.0
            }
        );

        // Element inside the margin-shrunk viewport: latch arms.
        r.observe(Rect::new(0.0, 500.0, 100.0, 600.0), viewport());
        assert!(r.has_revealed());
        for _ in 0..60 {
            r.step(1.0 / 60.0);
        }
        let shown = r.sample();
        assert_eq!(shown.opacity, 1.0);
        assert_eq!(shown.y, 0.0);

        // Leaving and re-entering must not re-trigger.
        r.observe(Rect::new(0.0, 5000.0, 100.0, 5100.0), viewport());
        r.observe(Rect::new(0.0, 500.0, 100.0, 600.0), viewport());
        let again = r.sample();
        assert_eq!(again.opacity, 1.0);
        assert_eq!(again.y, 0.0);
    }

    #[test]
    fn reveal_respects_entry_margin() {
        let mut r = Reveal::new(RevealDirection::Left);
        // Element top just inside the raw viewport but not past the margin.
        r.observe(Rect::new(0.0, 750.0, 100.0, 900.0), viewport());
        assert!(!r.has_revealed());
        r.observe(Rect::new(0.0, 650.0, 100.0, 800.0), viewport());
        assert!(r.has_revealed());
    }

    #[test]
    fn parallax_is_linear_in_progress() {
        let p = Parallax::new(0.5, 1000.0);
        assert_eq!(p.offset_y(0.0), 0.0);
        assert_eq!(p.offset_y(0.5), 250.0);
        assert_eq!(p.offset_y(1.0), 500.0);
        assert_eq!(p.offset_y(2.0), 500.0);
    }

    #[test]
    fn view_progress_covers_enter_to_exit() {
        let vp = viewport();
        let el = Rect::new(0.0, 800.0, 100.0, 1000.0);
        // Top exactly at the bottom edge.
        assert_eq!(view_progress(el, vp), 0.0);
        // Bottom exactly at the top edge.
        let gone = Rect::new(0.0, -200.0, 100.0, 0.0);
        assert_eq!(view_progress(gone, vp), 1.0);
        // Centered: halfway.
        let mid = Rect::new(0.0, 300.0, 100.0, 500.0);
        assert!((view_progress(mid, vp) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn piecewise_rejects_unsorted_stops() {
        assert!(PiecewiseLinear::new(vec![(0.0, 0.0)]).is_err());
        assert!(PiecewiseLinear::new(vec![(0.5, 0.0), (0.5, 1.0)]).is_err());
        assert!(PiecewiseLinear::new(vec![(0.8, 0.0), (0.2, 1.0)]).is_err());
    }

    #[test]
    fn piecewise_interpolates_between_stops() {
        let c = PiecewiseLinear::new(vec![(0.0, 0.0), (0.5, 0.6), (1.0, 0.0)]).unwrap();
        assert_eq!(c.map(0.0), 0.0);
        assert!((c.map(0.25) - 0.3).abs() < 1e-9);
        assert_eq!(c.map(0.5), 0.6);
        assert!((c.map(0.75) - 0.3).abs() < 1e-9);
        assert_eq!(c.map(1.0), 0.0);
        assert_eq!(c.map(-1.0), 0.0);
        assert_eq!(c.map(2.0), 0.0);
    }

    #[test]
    fn reflection_peaks_mid_travel() {
        let refl = Reflection::new();
        let vp = viewport();
        let mid = refl.sample(Rect::new(0.0, 300.0, 100.0, 500.0), vp);
        assert!((mid.opacity - 0.6).abs() < 1e-9);
        assert!(mid.y_offset.abs() < 1e-9);
        let entering = refl.sample(Rect::new(0.0, 800.0, 100.0, 1000.0), vp);
        assert_eq!(entering.opacity, 0.0);
        assert_eq!(entering.y_offset, 20.0);
        assert_eq!(entering.shine_x, -100.0);
    }

    #[test]
    fn section_tracker_uses_probe_offset() {
        let mut t = SectionTracker::new(vec![
            SectionSpan {
                id: "home".into(),
                top: 0.0,
                height: 900.0,
            },
            SectionSpan {
                id: "about".into(),
                top: 900.0,
                height: 700.0,
            },
        ]);
        t.on_scroll(0.0);
        assert_eq!(t.active(), Some("home"));
        // Probe line (scroll + 100) crosses into the next span early.
        t.on_scroll(850.0);
        assert_eq!(t.active(), Some("about"));
        // Scrolling past every span keeps the last active id.
        t.on_scroll(10_000.0);
        assert_eq!(t.active(), Some("about"));
    }
}
