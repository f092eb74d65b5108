use kurbo::{Rect, Size, Vec2};
use showroom_core::{Element, InputEvent, NodeId, PageConfig, PageDirector, Property, SceneGraph, Style};

const DT: f64 = 1.0 / 60.0;

struct Page {
    director: PageDirector,
    title: NodeId,
    cta: NodeId,
    cards: Vec<NodeId>,
    floating: NodeId,
    navbar: NodeId,
}

fn hidden() -> Style {
    Style {
        opacity: 0.0,
        y: 50.0,
        ..Default::default()
    }
}

fn showroom(with_cards: bool) -> Page {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let mut scene = SceneGraph::with_viewport(Size::new(1280.0, 800.0), 4000.0);
    let navbar = scene.add_node(Element::new("nav").with_class("navbar").with_rect(Rect::new(0.0, 0.0, 1280.0, 80.0)));
    let hero = scene.add_node(Element::new("section").with_class("hero").with_rect(Rect::new(0.0, 0.0, 1280.0, 800.0)));
    let bg = scene.add_node(Element::new("div").with_class("hero-bg").with_rect(Rect::new(0.0, 0.0, 1280.0, 800.0)));
    scene.add_child(hero, bg);
    let title = scene.add_node(Element::new("h1").with_class("hero-title").with_style(hidden()));
    scene.add_node(Element::new("p").with_class("hero-subtitle").with_style(hidden()));
    let cta = scene.add_node(
        Element::new("a")
            .with_class("hero-cta")
            .with_rect(Rect::new(540.0, 500.0, 740.0, 560.0))
            .with_style(hidden()),
    );
    let floating = scene.add_node(
        Element::new("div")
            .with_class("floating")
            .with_rect(Rect::new(100.0, 300.0, 160.0, 360.0)),
    );
    scene.add_node(Element::new("section").with_id("fleet").with_rect(Rect::new(0.0, 1200.0, 1280.0, 2400.0)));
    scene.add_node(
        Element::new("h2")
            .with_class("fleet-header")
            .with_rect(Rect::new(0.0, 1200.0, 1280.0, 1300.0))
            .with_style(hidden()),
    );
    let cards = if with_cards {
        (0..3)
            .map(|i| {
                let y = 1400.0 + i as f64 * 300.0;
                scene.add_node(
                    Element::new("article")
                        .with_class("car-card")
                        .with_rect(Rect::new(0.0, y, 400.0, y + 280.0))
                        .with_style(hidden()),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let config = PageConfig {
        seed: Some(42),
        ..Default::default()
    };
    Page {
        director: PageDirector::new(scene, config),
        title,
        cta,
        cards,
        floating,
        navbar,
    }
}

fn run(director: &mut PageDirector, frames: usize) {
    for _ in 0..frames {
        director.tick(DT);
    }
}

fn read(director: &PageDirector, node: NodeId, property: Property) -> f64 {
    director.scene.read(node, property).unwrap_or(f64::NAN)
}

#[test]
fn wheel_input_is_eased_to_the_target() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    assert_eq!(d.dispatch(InputEvent::Wheel { dx: 0.0, dy: 400.0 }), 1);

    let first = d.tick(DT).map(|r| r.scroll.position).unwrap_or_default();
    assert!(first > 0.0 && first < 400.0);
    run(d, 90);
    assert_eq!(d.scroll_state().position, 400.0);
}

#[test]
fn input_before_init_is_ignored() {
    let mut page = showroom(true);
    let d = &mut page.director;
    assert_eq!(d.dispatch(InputEvent::Wheel { dx: 0.0, dy: 400.0 }), 0);
    run(d, 10);
    assert_eq!(d.scroll_state().position, 0.0);
}

#[test]
fn hero_intro_sequences_title_subtitle_and_cta() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();

    run(d, 60);
    assert!(read(d, page.title, Property::Opacity) > 0.0);
    assert_eq!(read(d, page.cta, Property::Opacity), 0.0);

    run(d, 120);
    assert!((read(d, page.title, Property::Opacity) - 1.0).abs() < 1e-9);
    assert!((read(d, page.cta, Property::Opacity) - 1.0).abs() < 1e-9);
    assert!(read(d, page.cta, Property::Y).abs() < 1e-9);
}

#[test]
fn navbar_hides_past_threshold_and_returns_on_scroll_up() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();

    d.scroll_to(50.0, true);
    run(d, 1);
    assert!(!d.navbar_hidden());

    d.scroll_to(150.0, true);
    run(d, 1);
    assert!(d.navbar_hidden());
    run(d, 30);
    assert!((read(d, page.navbar, Property::YPercent) + 100.0).abs() < 1e-9);

    d.scroll_to(140.0, true);
    run(d, 1);
    assert!(!d.navbar_hidden());
    run(d, 30);
    assert!(read(d, page.navbar, Property::YPercent).abs() < 1e-9);
}

#[test]
fn car_cards_reveal_when_the_fleet_enters() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    let reveal = d.animate_car_cards();
    assert!(reveal.is_some());

    run(d, 30);
    assert_eq!(read(d, page.cards[0], Property::Opacity), 0.0);

    d.scroll_to(800.0, true);
    run(d, 90);
    for &card in &page.cards {
        assert!((read(d, card, Property::Opacity) - 1.0).abs() < 1e-9);
        assert!(read(d, card, Property::Y).abs() < 1e-9);
    }
}

#[test]
fn rebuilding_the_card_reveal_replaces_the_previous_one() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    let first = d.animate_car_cards();
    let (timelines, triggers) = (d.timelines().len(), d.triggers().len());

    let second = d.animate_car_cards();
    assert!(second.is_some());
    assert_ne!(first, second);
    assert!(first.and_then(|id| d.timeline(id)).is_none());
    assert_eq!(d.timelines().len(), timelines);
    assert_eq!(d.triggers().len(), triggers);
}

#[test]
fn card_reveal_without_cards_is_a_no_op() {
    let mut page = showroom(false);
    let d = &mut page.director;
    d.init();
    let timelines = d.timelines().len();
    assert!(d.animate_car_cards().is_none());
    assert_eq!(d.timelines().len(), timelines);
}

#[test]
fn removing_a_card_mid_reveal_leaves_the_rest_running() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    d.animate_car_cards();
    d.scroll_to(800.0, true);
    run(d, 10);

    d.scene.destroy_node(page.cards[1]);
    run(d, 90);
    assert!((read(d, page.cards[0], Property::Opacity) - 1.0).abs() < 1e-9);
    assert!((read(d, page.cards[2], Property::Opacity) - 1.0).abs() < 1e-9);
}

#[test]
fn pointer_entry_seeds_a_decay_that_settles() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();

    d.dispatch(InputEvent::PointerMove { x: 100.0, y: 100.0 });
    run(d, 1);
    d.dispatch(InputEvent::PointerMove { x: 140.0, y: 80.0 });
    assert_eq!(d.dispatch(InputEvent::PointerEnter { node: page.floating }), 1);
    run(d, 1);

    let state = d.motion().state(page.floating).unwrap_or_default();
    assert!((state.velocity - Vec2::new(40.0, -20.0)).hypot() < 1e-6);
    assert!((state.decay_offset - Vec2::new(1200.0, -600.0)).hypot() < 1e-6);
    assert!(state.rotation.abs() <= 12.0);

    run(d, 40);
    d.dispatch(InputEvent::PointerMove { x: 150.0, y: 80.0 });
    d.dispatch(InputEvent::PointerEnter { node: page.floating });
    run(d, 1);
    let state = d.motion().state(page.floating).unwrap_or_default();
    assert!((state.decay_offset - Vec2::new(300.0, 0.0)).hypot() < 1e-6);

    run(d, 90);
    let state = d.motion().state(page.floating).unwrap_or_default();
    assert_eq!(state.decay_offset, Vec2::ZERO);
    assert_eq!(read(d, page.floating, Property::X), 0.0);
    assert_eq!(read(d, page.floating, Property::Rotation), 0.0);
}

#[test]
fn magnetic_cta_is_hit_tested_in_viewport_space() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    d.scroll_to(300.0, true);
    run(d, 1);

    // Over the CTA's document rect, which has scrolled away.
    d.dispatch(InputEvent::PointerMove { x: 700.0, y: 530.0 });
    run(d, 20);
    assert_eq!(read(d, page.cta, Property::X), 0.0);

    d.dispatch(InputEvent::PointerMove { x: 700.0, y: 230.0 });
    run(d, 20);
    assert!((read(d, page.cta, Property::X) - 18.0).abs() < 1e-9);
}

#[test]
fn pointer_enter_on_other_elements_is_not_routed() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    assert_eq!(d.dispatch(InputEvent::PointerEnter { node: page.title }), 0);
}

#[test]
fn refresh_is_deferred_after_init() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    run(d, 1);
    assert_eq!(d.triggers().refresh_count(), 1);
    run(d, 40);
    assert_eq!(d.triggers().refresh_count(), 2);

    d.dispatch(InputEvent::ContentResized { height: 5000.0 });
    d.dispatch(InputEvent::Resize { width: 1024.0, height: 700.0 });
    run(d, 1);
    assert_eq!(d.triggers().refresh_count(), 3);
}

#[test]
fn init_is_idempotent_and_teardown_releases_everything() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    let (timelines, triggers) = (d.timelines().len(), d.triggers().len());
    d.init();
    assert_eq!(d.timelines().len(), timelines);
    assert_eq!(d.triggers().len(), triggers);

    d.teardown();
    assert!(!d.is_initialized());
    assert!(d.timelines().is_empty());
    assert!(d.triggers().is_empty());
    assert!(d.motion().is_empty());
    assert_eq!(d.dispatch(InputEvent::Wheel { dx: 0.0, dy: 100.0 }), 0);

    d.init();
    assert_eq!(d.triggers().len(), triggers);
}

#[test]
fn paused_clock_skips_frames() {
    let mut page = showroom(true);
    let d = &mut page.director;
    d.init();
    d.pause();
    assert!(d.tick(DT).is_none());
    d.resume();
    let report = d.tick(DT);
    assert_eq!(report.map(|r| r.frame), Some(1));
}
