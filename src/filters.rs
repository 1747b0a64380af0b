use std::fmt::Write as _;

use crate::{
    error::{KineticError, KineticResult},
    motion::{DUR_BASE, DUR_SLOW},
};

/// Numeric filter channels interpolated between the resting and hover
/// states. `scale` is the element transform, `pixel` the pixelation cell
/// size (0 = sharp).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterChannels {
    pub contrast: f64,
    pub saturate: f64,
    pub brightness: f64,
    pub grayscale: f64,
    pub scale: f64,
    pub pixel: f64,
}

impl FilterChannels {
    const NEUTRAL: Self = Self {
        contrast: 1.0,
        saturate: 1.0,
        brightness: 1.0,
        grayscale: 0.0,
        scale: 1.0,
        pixel: 0.0,
    };

    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let l = |x: f64, y: f64| x + (y - x) * t;
        Self {
            contrast: l(a.contrast, b.contrast),
            saturate: l(a.saturate, b.saturate),
            brightness: l(a.brightness, b.brightness),
            grayscale: l(a.grayscale, b.grayscale),
            scale: l(a.scale, b.scale),
            pixel: l(a.pixel, b.pixel),
        }
    }
}

/// Static overlay layered on top of the image; part of the look, not
/// animated by hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    None,
    /// Diagonal accent gradient, screen blend, opacity 0.4.
    DuotoneGradient,
    /// 4px radial dot pattern, multiply blend, opacity 0.3.
    HalftoneDots,
    /// Repeating 2px-on/2px-off horizontal lines plus a slow scan band.
    Scanlines,
    /// Stacked accent border layers.
    AccentFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Duotone,
    Halftone,
    Scanline,
    Pixelate,
    Frame,
}

impl FilterKind {
    pub fn rest(self) -> FilterChannels {
        match self {
            Self::Duotone => FilterChannels {
                contrast: 1.2,
                saturate: 0.0,
                ..FilterChannels::NEUTRAL
            },
            Self::Halftone => FilterChannels {
                contrast: 1.3,
                brightness: 1.1,
                ..FilterChannels::NEUTRAL
            },
            Self::Scanline => FilterChannels {
                contrast: 1.2,
                ..FilterChannels::NEUTRAL
            },
            Self::Pixelate => FilterChannels {
                contrast: 1.2,
                saturate: 1.5,
                pixel: 10.0,
                ..FilterChannels::NEUTRAL
            },
            Self::Frame => FilterChannels {
                contrast: 1.2,
                grayscale: 0.2,
                ..FilterChannels::NEUTRAL
            },
        }
    }

    pub fn hover(self) -> FilterChannels {
        match self {
            Self::Duotone => FilterChannels {
                contrast: 1.5,
                saturate: 0.3,
                scale: 1.05,
                ..FilterChannels::NEUTRAL
            },
            Self::Halftone => FilterChannels {
                contrast: 1.5,
                brightness: 1.2,
                scale: 1.1,
                ..FilterChannels::NEUTRAL
            },
            Self::Scanline => FilterChannels {
                contrast: 1.2,
                scale: 1.05,
                ..FilterChannels::NEUTRAL
            },
            Self::Pixelate => FilterChannels {
                contrast: 1.2,
                saturate: 1.5,
                pixel: 0.0,
                ..FilterChannels::NEUTRAL
            },
            Self::Frame => FilterChannels {
                contrast: 1.4,
                grayscale: 0.0,
                scale: 1.05,
                ..FilterChannels::NEUTRAL
            },
        }
    }

    pub fn overlay(self) -> Overlay {
        match self {
            Self::Duotone => Overlay::DuotoneGradient,
            Self::Halftone => Overlay::HalftoneDots,
            Self::Scanline => Overlay::Scanlines,
            Self::Pixelate => Overlay::None,
            Self::Frame => Overlay::AccentFrame,
        }
    }

    /// Hover transition duration in seconds.
    pub fn duration_s(self) -> f64 {
        match self {
            Self::Halftone => DUR_SLOW,
            _ => DUR_BASE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FilterSample {
    pub filter: String,
    pub scale: f64,
    pub pixel: f64,
    pub overlay: Overlay,
}

/// Two-state hover toggle: interpolates between the kind's resting and
/// hover channels over its duration. No timing hazards; the only state is
/// the hover flag and a progress fraction.
#[derive(Clone, Copy, Debug)]
pub struct FilterToggle {
    pub kind: FilterKind,
    rest: FilterChannels,
    hover: FilterChannels,
    hovered: bool,
    t: f64,
}

impl FilterToggle {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            rest: kind.rest(),
            hover: kind.hover(),
            hovered: false,
            t: 0.0,
        }
    }

    /// Overrides the resting pixelation cell size; hover still sharpens to
    /// the kind's hover value.
    pub fn with_pixel_size(mut self, pixel: f64) -> Self {
        self.rest.pixel = pixel;
        self
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn step(&mut self, dt: f64) {
        let dir = if self.hovered { 1.0 } else { -1.0 };
        self.t = (self.t + dir * dt / self.kind.duration_s()).clamp(0.0, 1.0);
    }

    pub fn sample(&self) -> FilterSample {
        let ch = FilterChannels::lerp(&self.rest, &self.hover, self.t);
        FilterSample {
            filter: format_filter(self.kind, &ch),
            scale: ch.scale,
            pixel: ch.pixel,
            overlay: self.kind.overlay(),
        }
    }
}

/// Formats the channels that participate in the kind's look, in a stable
/// order, as a css-style filter string.
fn format_filter(kind: FilterKind, ch: &FilterChannels) -> String {
    let rest = kind.rest();
    let hover = kind.hover();
    let active = |r: f64, h: f64, n: f64| r != n || h != n;

    let mut out = String::new();
    let neutral = FilterChannels::NEUTRAL;
    if active(rest.contrast, hover.contrast, neutral.contrast) {
        let _ = write!(out, "contrast({:.3})", ch.contrast);
    }
    if active(rest.saturate, hover.saturate, neutral.saturate) {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "saturate({:.3})", ch.saturate);
    }
    if active(rest.brightness, hover.brightness, neutral.brightness) {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "brightness({:.3})", ch.brightness);
    }
    if active(rest.grayscale, hover.grayscale, neutral.grayscale) {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "grayscale({:.3})", ch.grayscale);
    }
    out
}

/// Parses a content-supplied filter instance. Kind names are matched laxly
/// (case, dashes, and underscores ignored).
pub fn parse_filter(kind: &str, params: &serde_json::Value) -> KineticResult<FilterToggle> {
    let norm = kind.trim().to_ascii_lowercase().replace(['-', '_'], "");
    if norm.is_empty() {
        return Err(KineticError::validation("filter kind must be non-empty"));
    }

    let kind = match norm.as_str() {
        "duotone" => FilterKind::Duotone,
        "halftone" => FilterKind::Halftone,
        "scanline" | "scanlines" => FilterKind::Scanline,
        "pixelate" | "pixelated" => FilterKind::Pixelate,
        "frame" | "brutalistframe" => FilterKind::Frame,
        _ => {
            return Err(KineticError::validation(format!(
                "unknown filter kind '{kind}'"
            )))
        }
    };

    let mut toggle = FilterToggle::new(kind);
    if kind == FilterKind::Pixelate {
        if let Some(v) = params.get("pixel_size") {
            let n = v
                .as_f64()
                .ok_or_else(|| KineticError::validation("pixel_size must be a number"))?;
            if !n.is_finite() || n <= 0.0 || n > 256.0 {
                return Err(KineticError::validation(
                    "pixel_size must be finite, > 0 and <= 256",
                ));
            }
            toggle = toggle.with_pixel_size(n);
        }
    }

    Ok(toggle)
}

/// Sampled layer offsets/opacities of the hover glitch-image effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlitchImageSample {
    pub main_x: f64,
    pub main_grayscale: f64,
    pub red_x: f64,
    pub red_opacity: f64,
    pub cyan_x: f64,
    pub cyan_opacity: f64,
}

const GLITCH_IMAGE_REST: GlitchImageSample = GlitchImageSample {
    main_x: 0.0,
    main_grayscale: 0.0,
    red_x: 0.0,
    red_opacity: 0.0,
    cyan_x: 0.0,
    cyan_opacity: 0.0,
};

/// Hover-looped distortion: the base image jitters while red and cyan
/// copies flash apart. Everything returns to rest the moment the pointer
/// leaves.
#[derive(Clone, Copy, Debug)]
pub struct GlitchImage {
    hovered: bool,
    elapsed_s: f64,
}

impl GlitchImage {
    const MAIN_PERIOD_S: f64 = 0.4;
    const CHANNEL_PERIOD_S: f64 = 0.2;
    const CYAN_DELAY_S: f64 = 0.1;
    const MAIN_X_KEYS: [f64; 6] = [0.0, -2.0, 2.0, -1.0, 1.0, 0.0];

    pub fn new() -> Self {
        Self {
            hovered: false,
            elapsed_s: 0.0,
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.elapsed_s = 0.0;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn step(&mut self, dt: f64) {
        if self.hovered {
            self.elapsed_s += dt;
        }
    }

    pub fn sample(&self) -> GlitchImageSample {
        if !self.hovered {
            return GLITCH_IMAGE_REST;
        }

        let main_t = (self.elapsed_s / Self::MAIN_PERIOD_S).rem_euclid(1.0);
        let chan_t = (self.elapsed_s / Self::CHANNEL_PERIOD_S).rem_euclid(1.0);
        let cyan_t = ((self.elapsed_s - Self::CYAN_DELAY_S).max(0.0) / Self::CHANNEL_PERIOD_S)
            .rem_euclid(1.0);

        GlitchImageSample {
            main_x: sample_keys(&Self::MAIN_X_KEYS, main_t),
            main_grayscale: tent(main_t) * 0.8,
            red_x: -5.0 * tent(chan_t),
            red_opacity: 0.3 * tent(chan_t),
            cyan_x: 5.0 * tent(cyan_t),
            cyan_opacity: 0.3 * tent(cyan_t),
        }
    }
}

impl Default for GlitchImage {
    fn default() -> Self {
        Self::new()
    }
}

/// 0 -> 1 -> 0 triangle over [0,1].
fn tent(t: f64) -> f64 {
    1.0 - (2.0 * t - 1.0).abs()
}

/// Linear interpolation across an evenly spaced keyframe list.
fn sample_keys(keys: &[f64], t: f64) -> f64 {
    if keys.len() < 2 {
        return keys.first().copied().unwrap_or(0.0);
    }
    let span = (keys.len() - 1) as f64;
    let pos = t.clamp(0.0, 1.0) * span;
    let idx = (pos.floor() as usize).min(keys.len() - 2);
    let f = pos - idx as f64;
    keys[idx] + (keys[idx + 1] - keys[idx]) * f
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn duotone_interpolates_between_states() {
        let mut f = FilterToggle::new(FilterKind::Duotone);
        let rest = f.sample();
        assert_eq!(rest.filter, "contrast(1.200) saturate(0.000)");
        assert_eq!(rest.scale, 1.0);
        assert_eq!(rest.overlay, Overlay::DuotoneGradient);

        f.pointer_enter();
        for _ in 0..60 {
            f.step(DT);
        }
        let hover = f.sample();
        assert_eq!(hover.filter, "contrast(1.500) saturate(0.300)");
        assert!((hover.scale - 1.05).abs() < 1e-9);

        f.pointer_leave();
        for _ in 0..60 {
            f.step(DT);
        }
        assert_eq!(f.sample(), rest);
    }

    #[test]
    fn pixelate_sharpens_on_hover() {
        let mut f = FilterToggle::new(FilterKind::Pixelate);
        assert_eq!(f.sample().pixel, 10.0);
        f.pointer_enter();
        for _ in 0..60 {
            f.step(DT);
        }
        assert_eq!(f.sample().pixel, 0.0);
    }

    #[test]
    fn halftone_uses_slow_duration() {
        let mut f = FilterToggle::new(FilterKind::Halftone);
        f.pointer_enter();
        // After DUR_BASE the slower halftone toggle must still be mid-flight.
        let steps = (DUR_BASE / DT).round() as usize;
        for _ in 0..steps {
            f.step(DT);
        }
        let mid = f.sample();
        assert!(mid.scale > 1.0 && mid.scale < 1.1, "scale {}", mid.scale);
    }

    #[test]
    fn parse_accepts_kind_spellings() {
        let p = serde_json::Value::Null;
        assert!(parse_filter("duotone", &p).is_ok());
        assert!(parse_filter("Brutalist-Frame", &p).is_ok());
        assert!(parse_filter("scan-lines", &p).is_ok());
        assert!(parse_filter("scanlines", &p).is_ok());
        assert!(parse_filter("", &p).is_err());
        assert!(parse_filter("vhs", &p).is_err());
    }

    #[test]
    fn parse_validates_pixel_size() {
        let ok = serde_json::json!({ "pixel_size": 8 });
        assert!(parse_filter("pixelate", &ok).is_ok());
        let bad = serde_json::json!({ "pixel_size": -1 });
        assert!(parse_filter("pixelate", &bad).is_err());
        let huge = serde_json::json!({ "pixel_size": 512 });
        assert!(parse_filter("pixelate", &huge).is_err());
    }

    #[test]
    fn parsed_pixel_size_drives_the_toggle() {
        let p = serde_json::json!({ "pixel_size": 8 });
        let mut f = parse_filter("pixelate", &p).unwrap();
        assert_eq!(f.sample().pixel, 8.0);

        // Hover still sharpens all the way down.
        f.pointer_enter();
        for _ in 0..60 {
            f.step(DT);
        }
        assert_eq!(f.sample().pixel, 0.0);
    }

    #[test]
    fn glitch_image_rests_when_not_hovered() {
        let mut g = GlitchImage::new();
        g.step(1.0);
        assert_eq!(g.sample(), GLITCH_IMAGE_REST);

        g.pointer_enter();
        g.step(0.05);
        let active = g.sample();
        assert!(active.red_opacity > 0.0);
        assert!(active.red_x < 0.0);
        assert!(active.cyan_x >= 0.0);

        g.pointer_leave();
        assert_eq!(g.sample(), GLITCH_IMAGE_REST);
    }

    #[test]
    fn glitch_channels_oppose_each_other() {
        let mut g = GlitchImage::new();
        g.pointer_enter();
        g.step(0.25);
        let s = g.sample();
        assert!(s.red_x <= 0.0);
        assert!(s.cyan_x >= 0.0);
    }

    #[test]
    fn key_sampling_hits_keyframes() {
        let keys = [0.0, -2.0, 2.0];
        assert_eq!(sample_keys(&keys, 0.0), 0.0);
        assert_eq!(sample_keys(&keys, 0.5), -2.0);
        assert_eq!(sample_keys(&keys, 1.0), 2.0);
        assert_eq!(sample_keys(&keys, 0.25), -1.0);
    }
}
