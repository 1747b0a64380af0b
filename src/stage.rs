use std::{cell::RefCell, rc::Rc};

use kurbo::{Point, Rect};

use crate::{
    content::SiteContent,
    dispatch::{DispatchOutcome, UiHost, dispatch_button},
    error::KineticResult,
    events::{Dispatcher, Event, SubscriptionId},
    filters::{FilterKind, FilterSample, FilterToggle, GlitchImage, GlitchImageSample},
    glitch::GlitchText,
    motion::{FloatLoop, MotionProp, MotionState, Variant, state},
    ease::Ease,
    pointer::{CursorFollower, Magnetic, RgbSplit, RgbLayers, Tilt},
    ripple::{RippleField, RippleSample},
    scroll::{
        Parallax, Reflection, ReflectionSample, Reveal, RevealDirection, RevealSample,
        ScrollProgressBar, SectionSpan, SectionTracker,
    },
    spring::SpringSpec,
};

/// Per-word hero headline reveal: y 100 -> 0 with opacity, staggered 0.1 s
/// per word (the original hero animation).
fn hero_word_variant(index: usize) -> Variant {
    Variant::new(
        state(&[(MotionProp::Opacity, 0.0), (MotionProp::Y, 100.0)]),
        state(&[(MotionProp::Opacity, 1.0), (MotionProp::Y, 0.0)]),
        0.6,
        Ease::kinetic(),
    )
    .with_delay(index as f64 * 0.1)
}

/// Accent underline under the name: width 0 -> 100% after the words land.
fn hero_underline_variant() -> Variant {
    Variant::new(
        state(&[(MotionProp::Width, 0.0)]),
        state(&[(MotionProp::Width, 100.0)]),
        0.8,
        Ease::kinetic(),
    )
    .with_delay(0.6)
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct CursorSample {
    pub x: f64,
    pub y: f64,
    pub dot_scale: f64,
    pub glow_scale: f64,
    pub glow_opacity: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ButtonVisual {
    pub label: String,
    pub offset_x: f64,
    pub offset_y: f64,
    pub ripples: Vec<RippleSample>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct CardVisual {
    pub title: String,
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    pub reveal: RevealSample,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct PortraitVisual {
    pub float_y: f64,
    pub filter: FilterSample,
    pub glitch: GlitchImageSample,
    pub reflection: ReflectionSample,
}

/// One sampled frame of the whole landing page: everything a host shell
/// needs to paint, with no retained references into the stage.
#[derive(Clone, Debug, serde::Serialize)]
pub struct StageFrame {
    pub elapsed_s: f64,
    pub progress_bar_scale_x: f64,
    pub active_section: Option<String>,
    pub cursor: CursorSample,
    pub hero_words: Vec<MotionState>,
    pub hero_underline_width: f64,
    pub hero_name: String,
    pub hero_buttons: Vec<ButtonVisual>,
    pub portrait: PortraitVisual,
    pub parallax_y: f64,
    pub section_reveals: Vec<(String, RevealSample)>,
    pub process_cards: Vec<CardVisual>,
    pub skill_reveals: Vec<RevealSample>,
}

/// The landing page: owns every effect instance, wired from content.
///
/// Sections are stacked full-viewport bands; all element geometry is
/// derived from the viewport and the current scroll offset, so the stage
/// never needs a layout engine.
pub struct Stage {
    content: SiteContent,
    viewport_w: f64,
    viewport_h: f64,
    scroll_y: f64,
    elapsed_s: f64,
    menu_open: bool,

    progress_bar: ScrollProgressBar,
    tracker: SectionTracker,
    cursor: CursorFollower,
    parallax: Parallax,

    hero_words: Vec<Variant>,
    hero_underline: Variant,
    hero_name: GlitchText,
    name_inside: bool,
    portrait_inside: bool,
    buttons: Vec<(String, Magnetic, RippleField)>,
    portrait_float: FloatLoop,
    portrait_filter: FilterToggle,
    portrait_glitch: GlitchImage,
    portrait_reflection: Reflection,
    glitch_accum_s: f64,

    section_reveals: Vec<(String, Reveal)>,
    process_cards: Vec<(String, Tilt, Reveal)>,
    skill_reveals: Vec<Reveal>,
}

impl Stage {
    pub fn new(content: SiteContent, viewport_w: f64, viewport_h: f64) -> KineticResult<Self> {
        content.validate()?;

        let hero_words = (0..content.hero.title_words.len())
            .map(hero_word_variant)
            .collect();
        let name_word = content
            .hero
            .title_words
            .last()
            .cloned()
            .unwrap_or_default();

        let buttons = [
            &content.hero.buttons.primary,
            &content.hero.buttons.secondary,
        ]
        .iter()
        .map(|b| {
            (
                b.text.clone(),
                Magnetic::new(SpringSpec::gentle(), 0.3),
                RippleField::new(),
            )
        })
        .collect();

        let section_reveals = content
            .navigation
            .sections
            .iter()
            .skip(1)
            .map(|id| (id.clone(), Reveal::new(RevealDirection::Up)))
            .collect();

        let process_cards = content
            .process
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                (
                    step.title.clone(),
                    Tilt::new(SpringSpec::gentle(), 15.0),
                    Reveal::new(RevealDirection::Up).with_delay(i as f64 * 0.2),
                )
            })
            .collect();

        let skill_reveals = content
            .about
            .skills
            .list
            .iter()
            .enumerate()
            .map(|(i, _)| Reveal::new(RevealDirection::Up).with_delay(i as f64 * 0.1))
            .collect();

        let spans = content
            .navigation
            .sections
            .iter()
            .enumerate()
            .map(|(i, id)| SectionSpan {
                id: id.clone(),
                top: i as f64 * viewport_h,
                height: viewport_h,
            })
            .collect();

        let mut stage = Self {
            hero_words,
            hero_underline: hero_underline_variant(),
            hero_name: GlitchText::new(name_word, 0xC0FFEE),
            name_inside: false,
            portrait_inside: false,
            buttons,
            portrait_float: FloatLoop {
                period_s: 4.0,
                y_offset: 15.0,
            },
            portrait_filter: FilterToggle::new(FilterKind::Frame),
            portrait_glitch: GlitchImage::new(),
            portrait_reflection: Reflection::new(),
            glitch_accum_s: 0.0,
            section_reveals,
            process_cards,
            skill_reveals,
            progress_bar: ScrollProgressBar::default(),
            tracker: SectionTracker::new(spans),
            cursor: CursorFollower::new(),
            parallax: Parallax::new(0.5, viewport_h),
            content,
            viewport_w,
            viewport_h,
            scroll_y: 0.0,
            elapsed_s: 0.0,
            menu_open: false,
        };
        stage.on_scroll(0.0);
        Ok(stage)
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    /// Dispatches a hero button (0 = primary, 1 = secondary) through the
    /// host shell. A scroll dispatch closes an open mobile menu.
    pub fn press_button(&mut self, host: &mut dyn UiHost, index: usize) -> DispatchOutcome {
        let button = if index == 0 {
            &self.content.hero.buttons.primary
        } else {
            &self.content.hero.buttons.secondary
        };
        dispatch_button(host, &mut self.menu_open, button)
    }

    pub fn content_height(&self) -> f64 {
        self.content.navigation.sections.len() as f64 * self.viewport_h
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_w, self.viewport_h)
    }

    /// Page-coordinate band of section `i`.
    fn section_rect(&self, i: usize) -> Rect {
        let top = i as f64 * self.viewport_h;
        Rect::new(0.0, top, self.viewport_w, top + self.viewport_h)
    }

    fn to_screen(&self, page: Rect) -> Rect {
        Rect::new(
            page.x0,
            page.y0 - self.scroll_y,
            page.x1,
            page.y1 - self.scroll_y,
        )
    }

    fn button_rect(&self, index: usize) -> Rect {
        let hero = self.section_rect(0);
        let x0 = 80.0 + index as f64 * 240.0;
        let y0 = hero.y0 + self.viewport_h * 0.62;
        Rect::new(x0, y0, x0 + 200.0, y0 + 56.0)
    }

    fn name_rect(&self) -> Rect {
        let hero = self.section_rect(0);
        Rect::new(80.0, hero.y0 + self.viewport_h * 0.25, 480.0, hero.y0 + self.viewport_h * 0.4)
    }

    fn portrait_rect(&self) -> Rect {
        let hero = self.section_rect(0);
        Rect::new(
            self.viewport_w * 0.55,
            hero.y0 + self.viewport_h * 0.15,
            self.viewport_w * 0.95,
            hero.y0 + self.viewport_h * 0.75,
        )
    }

    fn card_rect(&self, index: usize, count: usize) -> Rect {
        let process = self.section_index("process").map(|i| self.section_rect(i));
        let Some(band) = process else {
            return Rect::ZERO;
        };
        let gap = 24.0;
        let w = (self.viewport_w - gap * (count as f64 + 1.0)) / count as f64;
        let x0 = gap + index as f64 * (w + gap);
        Rect::new(
            x0,
            band.y0 + self.viewport_h * 0.3,
            x0 + w,
            band.y0 + self.viewport_h * 0.75,
        )
    }

    fn section_index(&self, id: &str) -> Option<usize> {
        self.content
            .navigation
            .sections
            .iter()
            .position(|s| s == id)
    }

    fn now_ms(&self) -> u64 {
        (self.elapsed_s * 1000.0) as u64
    }

    /// Routes one host event. Handlers are O(1) in the number of sections.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Scroll { y } => self.on_scroll(y),
            Event::Resize { width, height } => {
                self.viewport_w = width;
                self.viewport_h = height;
                let spans = self
                    .content
                    .navigation
                    .sections
                    .iter()
                    .enumerate()
                    .map(|(i, id)| SectionSpan {
                        id: id.clone(),
                        top: i as f64 * height,
                        height,
                    })
                    .collect();
                self.tracker = SectionTracker::new(spans);
                self.on_scroll(self.scroll_y);
            }
            Event::PointerMove { x, y } | Event::PointerEnter { x, y } => {
                self.on_pointer(Point::new(x, y));
            }
            Event::PointerLeave => self.on_pointer_leave(),
            Event::Click { x, y } => self.on_click(Point::new(x, y)),
            Event::Tick { dt_s } => self.step(dt_s),
        }
    }

    fn on_scroll(&mut self, y: f64) {
        let max = (self.content_height() - self.viewport_h).max(0.0);
        self.scroll_y = y.clamp(0.0, max);
        self.progress_bar
            .on_scroll(self.scroll_y, self.viewport_h, self.content_height());
        self.tracker.on_scroll(self.scroll_y);

        let viewport = self.viewport();
        for i in 1..self.content.navigation.sections.len() {
            let screen = self.to_screen(self.section_rect(i));
            if let Some((_, reveal)) = self.section_reveals.get_mut(i - 1) {
                reveal.observe(screen, viewport);
            }
        }
        let count = self.process_cards.len();
        for i in 0..count {
            let screen = self.to_screen(self.card_rect(i, count));
            self.process_cards[i].2.observe(screen, viewport);
        }
        if let Some(about) = self.section_index("about") {
            let screen = self.to_screen(self.section_rect(about));
            for reveal in &mut self.skill_reveals {
                reveal.observe(screen, viewport);
            }
        }
    }

    fn on_pointer(&mut self, p: Point) {
        self.cursor.pointer_move(p);

        let mut over_interactive = false;
        for i in 0..self.buttons.len() {
            let rect = self.to_screen(self.button_rect(i));
            let (_, magnetic, _) = &mut self.buttons[i];
            if rect.contains(p) {
                over_interactive = true;
                magnetic.pointer_move(p, rect);
            } else {
                magnetic.pointer_leave();
            }
        }
        self.cursor.set_over_interactive(over_interactive);

        // Enter is edge-triggered: only an outside-to-inside transition
        // starts a run, continued movement inside does not.
        let name_inside = self.to_screen(self.name_rect()).contains(p);
        if name_inside && !self.name_inside {
            self.hero_name.pointer_enter();
        }
        self.name_inside = name_inside;

        let portrait_inside = self.to_screen(self.portrait_rect()).contains(p);
        if portrait_inside != self.portrait_inside {
            if portrait_inside {
                self.portrait_filter.pointer_enter();
                self.portrait_glitch.pointer_enter();
            } else {
                self.portrait_filter.pointer_leave();
                self.portrait_glitch.pointer_leave();
            }
        }
        self.portrait_inside = portrait_inside;

        let count = self.process_cards.len();
        for i in 0..count {
            let rect = self.to_screen(self.card_rect(i, count));
            let (_, tilt, _) = &mut self.process_cards[i];
            if rect.contains(p) {
                tilt.pointer_move(p, rect);
            } else {
                tilt.pointer_leave();
            }
        }
    }

    fn on_pointer_leave(&mut self) {
        self.cursor.set_over_interactive(false);
        self.name_inside = false;
        self.portrait_inside = false;
        for (_, magnetic, _) in &mut self.buttons {
            magnetic.pointer_leave();
        }
        self.portrait_filter.pointer_leave();
        self.portrait_glitch.pointer_leave();
        for (_, tilt, _) in &mut self.process_cards {
            tilt.pointer_leave();
        }
    }

    fn on_click(&mut self, p: Point) {
        let now = self.now_ms();
        for i in 0..self.buttons.len() {
            let rect = self.to_screen(self.button_rect(i));
            if rect.contains(p) {
                let (_, _, ripples) = &mut self.buttons[i];
                ripples.click(p, rect, now);
            }
        }
    }

    fn step(&mut self, dt: f64) {
        self.elapsed_s += dt;
        let now = self.now_ms();
        self.cursor.step(dt);
        self.portrait_filter.step(dt);
        self.portrait_glitch.step(dt);
        for (_, magnetic, ripples) in &mut self.buttons {
            magnetic.step(dt);
            ripples.prune(now);
        }
        for (_, reveal) in &mut self.section_reveals {
            reveal.step(dt);
        }
        for (_, tilt, reveal) in &mut self.process_cards {
            tilt.step(dt);
            reveal.step(dt);
        }
        for reveal in &mut self.skill_reveals {
            reveal.step(dt);
        }

        // The glitch runs on its own 30 ms timer, driven off the frame clock.
        self.glitch_accum_s += dt;
        let tick_s = self.hero_name.tick_ms() as f64 / 1000.0;
        while self.glitch_accum_s >= tick_s {
            self.glitch_accum_s -= tick_s;
            self.hero_name.tick();
        }
    }

    pub fn sample(&self) -> KineticResult<StageFrame> {
        let now = self.now_ms();
        let hero_words = self
            .hero_words
            .iter()
            .map(|v| v.sample(self.elapsed_s))
            .collect::<KineticResult<Vec<_>>>()?;
        let underline = self.hero_underline.sample(self.elapsed_s)?;

        let viewport = self.viewport();
        let portrait_screen = self.to_screen(self.portrait_rect());

        Ok(StageFrame {
            elapsed_s: self.elapsed_s,
            progress_bar_scale_x: self.progress_bar.scale_x(),
            active_section: self.tracker.active().map(str::to_string),
            cursor: CursorSample {
                x: self.cursor.position().x,
                y: self.cursor.position().y,
                dot_scale: self.cursor.dot_scale(),
                glow_scale: self.cursor.glow_scale(),
                glow_opacity: self.cursor.glow_opacity(),
            },
            hero_words,
            hero_underline_width: underline
                .get(&MotionProp::Width)
                .copied()
                .unwrap_or(0.0),
            hero_name: self.hero_name.displayed().to_string(),
            hero_buttons: self
                .buttons
                .iter()
                .map(|(label, magnetic, ripples)| ButtonVisual {
                    label: label.clone(),
                    offset_x: magnetic.offset().x,
                    offset_y: magnetic.offset().y,
                    ripples: ripples.sample(now),
                })
                .collect(),
            portrait: PortraitVisual {
                float_y: self.portrait_float.sample_y(self.elapsed_s),
                filter: self.portrait_filter.sample(),
                glitch: self.portrait_glitch.sample(),
                reflection: self.portrait_reflection.sample(portrait_screen, viewport),
            },
            parallax_y: self.parallax.offset_y(self.progress_bar.scale_x()),
            section_reveals: self
                .section_reveals
                .iter()
                .map(|(id, r)| (id.clone(), r.sample()))
                .collect(),
            process_cards: self
                .process_cards
                .iter()
                .map(|(title, tilt, reveal)| {
                    let (rx, ry) = tilt.rotation_deg();
                    CardVisual {
                        title: title.clone(),
                        rotate_x_deg: rx,
                        rotate_y_deg: ry,
                        reveal: reveal.sample(),
                    }
                })
                .collect(),
            skill_reveals: self.skill_reveals.iter().map(|r| r.sample()).collect(),
        })
    }

    /// Subscribes a shared stage to a global event dispatcher. The returned
    /// binding must be detached on teardown; `StageBinding::detach` removes
    /// the listener so nothing leaks past the stage's lifetime.
    pub fn attach(
        stage: Rc<RefCell<Stage>>,
        dispatcher: &mut Dispatcher<Event>,
    ) -> StageBinding {
        let id = dispatcher.subscribe(move |event: &Event| {
            stage.borrow_mut().handle_event(*event);
        });
        StageBinding { id }
    }
}

/// Handle tying a stage subscription to an explicit teardown point.
#[derive(Debug)]
pub struct StageBinding {
    id: SubscriptionId,
}

impl StageBinding {
    pub fn detach(self, dispatcher: &mut Dispatcher<Event>) -> bool {
        dispatcher.unsubscribe(self.id)
    }
}

/// Works gallery: split-RGB plus duotone hover per item, laid out as a
/// vertical list. Lives behind the password gate.
pub struct Gallery {
    items: Vec<(String, RgbSplit, FilterToggle)>,
    viewport_w: f64,
    row_h: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct GalleryItemVisual {
    pub title: String,
    pub layers: RgbLayers,
    pub filter: FilterSample,
}

impl Gallery {
    pub fn new(content: &SiteContent, viewport_w: f64, row_h: f64) -> Self {
        let items = content
            .works
            .as_ref()
            .map(|w| {
                w.items
                    .iter()
                    .map(|item| {
                        (
                            item.title.clone(),
                            RgbSplit::new(SpringSpec::gentle(), 5.0),
                            FilterToggle::new(FilterKind::Duotone),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            items,
            viewport_w,
            row_h,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn row_rect(&self, index: usize) -> Rect {
        let top = index as f64 * self.row_h;
        Rect::new(0.0, top, self.viewport_w, top + self.row_h)
    }

    /// Pointer position in gallery-local coordinates.
    pub fn pointer_move(&mut self, p: Point) {
        for i in 0..self.items.len() {
            let rect = self.row_rect(i);
            let (_, split, filter) = &mut self.items[i];
            if rect.contains(p) {
                split.pointer_move(p, rect);
                filter.pointer_enter();
            } else {
                split.pointer_leave();
                filter.pointer_leave();
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        for (_, split, filter) in &mut self.items {
            split.pointer_leave();
            filter.pointer_leave();
        }
    }

    pub fn step(&mut self, dt: f64) {
        for (_, split, filter) in &mut self.items {
            split.step(dt);
            filter.step(dt);
        }
    }

    pub fn sample(&self) -> Vec<GalleryItemVisual> {
        self.items
            .iter()
            .map(|(title, split, filter)| GalleryItemVisual {
                title: title.clone(),
                layers: split.layers(),
                filter: filter.sample(),
            })
            .collect()
    }
}
