use kinetic::{Event, SiteContent, Stage};

const DT: f64 = 1.0 / 60.0;

fn stage() -> Stage {
    let content = SiteContent::from_json_str(include_str!("data/site.json")).unwrap();
    Stage::new(content, 1280.0, 800.0).unwrap()
}

fn ticks(stage: &mut Stage, n: usize) {
    for _ in 0..n {
        stage.handle_event(Event::Tick { dt_s: DT });
    }
}

#[test]
fn scripted_session_reaches_a_stable_end_state() {
    let mut s = stage();

    // Intro plays out.
    ticks(&mut s, 120);
    let intro = s.sample().unwrap();
    assert_eq!(intro.progress_bar_scale_x, 0.0);
    assert_eq!(intro.active_section.as_deref(), Some("home"));
    assert!(intro.hero_underline_width > 99.0);

    // Scroll down to the process section and let the reveals play.
    s.handle_event(Event::Scroll { y: 1700.0 });
    ticks(&mut s, 120);
    let deep = s.sample().unwrap();
    assert_eq!(deep.active_section.as_deref(), Some("process"));
    assert!(deep.progress_bar_scale_x > 0.5);
    for card in &deep.process_cards {
        assert_eq!(card.reveal.opacity, 1.0);
        assert_eq!(card.reveal.y, 0.0);
    }

    // Scroll back to the top: reveals stay latched, progress returns to 0.
    s.handle_event(Event::Scroll { y: 0.0 });
    ticks(&mut s, 30);
    let back = s.sample().unwrap();
    assert_eq!(back.progress_bar_scale_x, 0.0);
    assert!(back.process_cards.iter().all(|c| c.reveal.opacity == 1.0));
}

#[test]
fn staggered_card_reveals_finish_in_index_order() {
    let mut s = stage();
    s.handle_event(Event::Scroll { y: 1700.0 });
    // Mid-flight: earlier cards are further along than later ones.
    ticks(&mut s, 30);
    let frame = s.sample().unwrap();
    let ops: Vec<f64> = frame.process_cards.iter().map(|c| c.reveal.opacity).collect();
    for pair in ops.windows(2) {
        assert!(pair[0] >= pair[1], "stagger out of order: {ops:?}");
    }
    assert!(ops[0] > ops[ops.len() - 1]);
}

#[test]
fn pointer_session_settles_back_to_rest() {
    let mut s = stage();
    ticks(&mut s, 120);

    // Hover the primary hero button, then click it.
    s.handle_event(Event::PointerMove { x: 180.0, y: 520.0 });
    ticks(&mut s, 60);
    s.handle_event(Event::Click { x: 180.0, y: 520.0 });
    let hot = s.sample().unwrap();
    assert_eq!(hot.cursor.dot_scale, 1.5);
    assert_eq!(hot.hero_buttons[0].ripples.len(), 1);
    assert!(hot.hero_buttons[0].offset_x != 0.0 || hot.hero_buttons[0].offset_y != 0.0);

    // Leave and wait: every transient effect must return exactly to rest.
    s.handle_event(Event::PointerLeave);
    ticks(&mut s, 300);
    let rest = s.sample().unwrap();
    assert_eq!(rest.cursor.dot_scale, 1.0);
    assert_eq!(rest.hero_buttons[0].offset_x, 0.0);
    assert_eq!(rest.hero_buttons[0].offset_y, 0.0);
    assert!(rest.hero_buttons[0].ripples.is_empty());
    for card in &rest.process_cards {
        assert_eq!(card.rotate_x_deg, 0.0);
        assert_eq!(card.rotate_y_deg, 0.0);
    }
}

#[test]
fn resize_rebuilds_section_geometry() {
    let mut s = stage();
    s.handle_event(Event::Scroll { y: 1200.0 });
    assert_eq!(s.sample().unwrap().active_section.as_deref(), Some("about"));

    // Shrink the viewport: the same scroll offset now sits two sections deep.
    s.handle_event(Event::Resize {
        width: 800.0,
        height: 600.0,
    });
    let frame = s.sample().unwrap();
    assert_eq!(frame.active_section.as_deref(), Some("process"));
}

#[test]
fn frames_serialize_to_json() {
    let mut s = stage();
    ticks(&mut s, 10);
    let frame = s.sample().unwrap();
    let json = serde_json::to_value(&frame).unwrap();
    assert!(json["progress_bar_scale_x"].is_number());
    assert_eq!(json["hero_words"].as_array().unwrap().len(), 4);
    assert!(json["portrait"]["filter"]["filter"].is_string());
}

#[test]
fn identical_scripts_produce_identical_frames() {
    let script = |s: &mut Stage| {
        s.handle_event(Event::PointerMove { x: 200.0, y: 250.0 });
        for _ in 0..90 {
            s.handle_event(Event::Tick { dt_s: DT });
        }
        serde_json::to_string(&s.sample().unwrap()).unwrap()
    };
    let a = script(&mut stage());
    let b = script(&mut stage());
    assert_eq!(a, b);
}
