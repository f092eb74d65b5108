use kurbo::{Rect, Size};
use showroom_core::scroll::{ScrollConfig, SmoothScroll};
use showroom_core::timeline::{Position, Timeline, TimelineOptions, TweenVars};
use showroom_core::trigger::{
    scrub_progress, Action, Boundary, Edge, ToggleActions, Trigger, TriggerEvent, TriggerMode,
    TriggerRegistry, TriggerState,
};
use showroom_core::{Element, Property, SceneGraph, ScrollState, Style};

fn at(position: f64) -> ScrollState {
    ScrollState {
        position,
        ..Default::default()
    }
}

fn edges(fires: &[showroom_core::trigger::TriggerFire]) -> Vec<(Edge, Action)> {
    fires
        .iter()
        .filter_map(|f| match f.event {
            TriggerEvent::Edge { edge, action } => Some((edge, action)),
            TriggerEvent::Scrub(_) => None,
        })
        .collect()
}

#[test]
fn eased_scroll_converges_monotonically() {
    let mut scroll = SmoothScroll::new(ScrollConfig::default(), Some(3200.0));
    scroll.on_wheel(600.0);
    let mut last = 0.0;
    for _ in 0..90 {
        let state = scroll.update(1.0 / 60.0);
        assert!(state.position >= last);
        last = state.position;
    }
    assert_eq!(last, 600.0);
}

#[test]
fn slow_scroll_fires_each_edge_once() {
    let scene = SceneGraph::with_viewport(Size::new(1280.0, 800.0), 1800.0);
    let mut registry = TriggerRegistry::new();
    registry.register(
        Trigger::new(None, TriggerMode::Toggle(ToggleActions::REPLAY))
            .with_range(Boundary::Scroll(600.0), Boundary::Scroll(800.0)),
    );

    let mut seen = Vec::new();
    for step in 0..=100 {
        seen.extend(edges(&registry.update(&at(step as f64 * 10.0), &scene)));
    }
    assert_eq!(seen, vec![(Edge::Enter, Action::Play), (Edge::Leave, Action::None)]);

    seen.clear();
    for step in (0..=100).rev() {
        seen.extend(edges(&registry.update(&at(step as f64 * 10.0), &scene)));
    }
    assert_eq!(
        seen,
        vec![(Edge::EnterBack, Action::None), (Edge::LeaveBack, Action::Reverse)]
    );
}

#[test]
fn toggle_replay_plays_reverses_and_replays() {
    let mut scene = SceneGraph::with_viewport(Size::new(1280.0, 800.0), 1000.0);
    let card = scene.add_node(Element::new("div").with_style(Style {
        opacity: 0.0,
        ..Default::default()
    }));
    let mut timeline = Timeline::new(TimelineOptions {
        paused: true,
        ..Default::default()
    });
    timeline.to(
        &[card],
        TweenVars::new().to(Property::Opacity, 1.0).duration(1.0),
        Position::Sequential,
    );

    let mut registry = TriggerRegistry::new();
    let id = registry.register(
        Trigger::new(None, TriggerMode::Toggle(ToggleActions::REPLAY))
            .with_range(Boundary::Scroll(600.0), Boundary::Scroll(800.0)),
    );

    let mut drive = |position: f64, timeline: &mut Timeline| {
        for fire in registry.update(&at(position), &scene) {
            if let TriggerEvent::Edge { action, .. } = fire.event {
                timeline.apply(action);
            }
        }
    };

    drive(650.0, &mut timeline);
    timeline.advance(1.0);
    assert_eq!(timeline.progress(), 1.0);

    drive(500.0, &mut timeline);
    assert!(timeline.is_reversed());
    timeline.advance(1.0);
    assert_eq!(timeline.time(), 0.0);

    drive(700.0, &mut timeline);
    assert!(!timeline.is_reversed());
    timeline.advance(0.5);
    timeline.render(&mut scene);
    assert!((timeline.time() - 0.5).abs() < 1e-9);
    assert_eq!(registry.state(id), Some(TriggerState::Active));
}

#[test]
fn scrub_progress_depends_only_on_position() {
    let scene = SceneGraph::with_viewport(Size::new(1280.0, 800.0), 1800.0);
    let mut registry = TriggerRegistry::new();
    registry.register(
        Trigger::new(None, TriggerMode::Scrub)
            .with_range(Boundary::Scroll(600.0), Boundary::Scroll(800.0)),
    );
    let scrub_at = |registry: &mut TriggerRegistry, position: f64| -> Vec<f64> {
        registry
            .update(&at(position), &scene)
            .into_iter()
            .filter_map(|f| match f.event {
                TriggerEvent::Scrub(p) => Some(p),
                TriggerEvent::Edge { .. } => None,
            })
            .collect()
    };

    assert_eq!(scrub_at(&mut registry, 650.0), vec![0.25]);
    assert_eq!(scrub_at(&mut registry, 1000.0), vec![1.0]);
    assert_eq!(scrub_at(&mut registry, 650.0), vec![0.25]);
    assert_eq!(scrub_at(&mut registry, 0.0), vec![0.0]);
    assert_eq!(scrub_progress(700.0, 600.0, 800.0), 0.5);
}

#[test]
fn anchored_ranges_follow_layout_and_skip_detached_targets() {
    let mut scene = SceneGraph::with_viewport(Size::new(1280.0, 800.0), 3000.0);
    let section = scene.add_node(
        Element::new("section").with_rect(Rect::new(0.0, 1000.0, 1280.0, 1400.0)),
    );
    let mut registry = TriggerRegistry::new();
    let id = registry.register(Trigger::new(Some(section), TriggerMode::Toggle(ToggleActions::REPLAY)));

    assert!(registry.update(&at(0.0), &scene).is_empty());
    assert_eq!(registry.range(id), Some((200.0, 1400.0)));

    scene.destroy_node(section);
    assert!(registry.update(&at(500.0), &scene).is_empty());
    assert_eq!(registry.state(id), Some(TriggerState::Before));
}

#[test]
fn staggered_targets_start_at_multiples_of_the_interval() {
    let mut scene = SceneGraph::new();
    let cards: Vec<_> = (0..4)
        .map(|_| scene.add_node(Element::new("div").with_class("car-card")))
        .collect();
    let mut timeline = Timeline::default();
    timeline.to(
        &cards,
        TweenVars::new()
            .to(Property::Opacity, 1.0)
            .duration(0.8)
            .stagger(0.1),
        Position::Sequential,
    );
    for (k, tween) in timeline.tweens().iter().enumerate() {
        assert!((tween.start() - k as f64 * 0.1).abs() < 1e-9);
        assert_eq!(tween.target(), cards[k]);
    }
    assert!((timeline.duration() - 1.1).abs() < 1e-9);
}
