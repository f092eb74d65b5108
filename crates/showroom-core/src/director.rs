use crate::animation::EasingType;
use crate::clock::{DeferredCall, FrameClock, FrameTick};
use crate::config::PageConfig;
use crate::events::{Dispatcher, EventKind, InputEvent, InputState};
use crate::magnetic::MagneticButtons;
use crate::motion::{PointerMotion, PointerTracker};
use crate::navbar::NavbarVisibility;
use crate::scene::SceneGraph;
use crate::scroll::{ScrollState, SmoothScroll};
use crate::timeline::{Position, Timeline, TimelineId, TimelineOptions, Timelines, TweenDefaults, TweenVars, Tweener};
use crate::trigger::{Boundary, ToggleActions, Trigger, TriggerEvent, TriggerFire, TriggerId, TriggerMode, TriggerRegistry};
use crate::types::{NodeId, Property};
use kurbo::{Point, Size};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Summary of one processed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub time: f64,
    pub scroll: ScrollState,
    /// Trigger outcomes applied this frame.
    pub fires: usize,
    pub navbar_hidden: bool,
}

/// Ids of the animations `init` wired up. `None` when the page lacks the section.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageAnimations {
    pub parallax: Option<(TimelineId, TriggerId)>,
    pub hero_intro: Option<TimelineId>,
    pub fleet_header: Option<(TimelineId, TriggerId)>,
    pub card_reveal: Option<(TimelineId, TriggerId)>,
}

/// The page-lifetime controller.
///
/// `PageDirector` owns the scene and every animation subsystem. The host
/// reports input through `dispatch` and drives frames through `tick`; all
/// state changes happen inside `tick`, in a fixed order.
pub struct PageDirector {
    /// The host document.
    pub scene: SceneGraph,
    config: PageConfig,
    clock: FrameClock,
    scroll: SmoothScroll,
    triggers: TriggerRegistry,
    timelines: Timelines,
    tweener: Tweener,
    pointer: PointerTracker,
    motion: PointerMotion,
    magnetic: MagneticButtons,
    navbar: Option<(NodeId, NavbarVisibility)>,
    dispatcher: Dispatcher,
    input: InputState,
    animations: PageAnimations,
    last_scroll: Option<f64>,
    initialized: bool,
}

impl PageDirector {
    /// Creates a director for `scene`. Nothing animates until `init`.
    pub fn new(scene: SceneGraph, config: PageConfig) -> Self {
        let bounds = scene.scroll_container().map(|c| c.limit());
        Self {
            scroll: SmoothScroll::new(config.scroll, bounds),
            motion: PointerMotion::new(config.motion, config.seed),
            magnetic: MagneticButtons::default(),
            scene,
            clock: FrameClock::new(),
            triggers: TriggerRegistry::new(),
            timelines: Timelines::new(),
            tweener: Tweener::new(),
            pointer: PointerTracker::new(),
            navbar: None,
            dispatcher: Dispatcher::new(),
            input: InputState::default(),
            animations: PageAnimations::default(),
            last_scroll: None,
            initialized: false,
            config,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    pub fn timelines(&self) -> &Timelines {
        &self.timelines
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id)
    }

    pub fn motion(&self) -> &PointerMotion {
        &self.motion
    }

    pub fn animations(&self) -> PageAnimations {
        self.animations
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The scroll state published by the last frame.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn navbar_hidden(&self) -> bool {
        self.navbar.map(|(_, nav)| nav.hidden).unwrap_or(false)
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    /// Programmatic scroll, eased unless `immediate`.
    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        self.scroll.scroll_to(target, immediate);
    }

    /// Wires every page animation and input route. Calling it again does nothing.
    #[instrument(level = "info", skip(self))]
    pub fn init(&mut self) {
        if self.initialized {
            debug!("[Page] already initialized");
            return;
        }
        self.install_routes();
        self.init_hero_parallax();
        self.init_hero_intro();
        self.init_fleet_header();
        self.init_navbar();
        self.init_magnetic();
        self.init_floating();
        self.clock.defer(self.config.refresh_delay, DeferredCall::RefreshTriggers);
        self.initialized = true;
        info!(
            triggers = self.triggers.len(),
            timelines = self.timelines.len(),
            floating = self.motion.len(),
            "[Page] initialized"
        );
    }

    fn install_routes(&mut self) {
        let floating: BTreeSet<NodeId> = self
            .scene
            .query_selector_all(&self.config.selectors.floating)
            .into_iter()
            .collect();
        let d = &mut self.dispatcher;
        d.on(
            EventKind::Wheel,
            |e| matches!(e, InputEvent::Wheel { dy, .. } if *dy != 0.0),
            |e, state| {
                if let InputEvent::Wheel { dy, .. } = e {
                    state.wheel += dy;
                }
            },
        );
        d.on_any(EventKind::Touch, |e, state| {
            if let InputEvent::Touch { dy } = e {
                state.touch += dy;
            }
        });
        d.on_any(EventKind::PointerMove, |e, state| {
            if let InputEvent::PointerMove { x, y } = e {
                state.pointer = Some(Point::new(*x, *y));
                state.pointer_exited = false;
            }
        });
        d.on_any(EventKind::PointerExit, |_, state| {
            state.pointer = None;
            state.pointer_exited = true;
        });
        d.on(
            EventKind::PointerEnter,
            move |e| matches!(e, InputEvent::PointerEnter { node } if floating.contains(node)),
            |e, state| {
                if let InputEvent::PointerEnter { node } = e {
                    state.enters.push(*node);
                }
            },
        );
        d.on_any(EventKind::Resize, |e, state| {
            if let InputEvent::Resize { width, height } = e {
                state.viewport = Some(Size::new(*width, *height));
            }
        });
        d.on_any(EventKind::ContentResized, |e, state| {
            if let InputEvent::ContentResized { height } = e {
                state.content_height = Some(*height);
            }
        });
        d.on_any(EventKind::Refresh, |_, state| state.refresh = true);
    }

    fn init_hero_parallax(&mut self) {
        let selectors = &self.config.selectors;
        let (Some(bg), Some(hero)) = (
            self.scene.query_selector(&selectors.hero_bg),
            self.scene.query_selector(&selectors.hero),
        ) else {
            return;
        };
        let mut timeline = Timeline::new(TimelineOptions {
            paused: true,
            ..Default::default()
        });
        timeline.to(
            &[bg],
            TweenVars::new()
                .to(Property::YPercent, self.config.reveal.parallax_y_percent)
                .duration(1.0)
                .ease(EasingType::Linear),
            Position::Sequential,
        );
        let timeline = self.timelines.insert(timeline);
        let trigger = self.triggers.register(
            Trigger::new(Some(hero), TriggerMode::Scrub)
                .with_range(
                    Boundary::Anchor {
                        element: 0.0,
                        viewport: 0.0,
                        offset: 0.0,
                    },
                    Boundary::DEFAULT_END,
                )
                .with_animation(timeline),
        );
        self.animations.parallax = Some((timeline, trigger));
    }

    fn init_hero_intro(&mut self) {
        let selectors = &self.config.selectors;
        let Some(title) = self.scene.query_selector(&selectors.hero_title) else {
            return;
        };
        let subtitle: Vec<NodeId> = self.scene.query_selector(&selectors.hero_subtitle).into_iter().collect();
        let cta: Vec<NodeId> = self.scene.query_selector(&selectors.hero_cta).into_iter().collect();
        let reveal = self.config.reveal;
        let reveal_to = |duration: f64| {
            TweenVars::new()
                .to(Property::Opacity, 1.0)
                .to(Property::Y, 0.0)
                .duration(duration)
        };

        let mut timeline = Timeline::new(TimelineOptions {
            paused: false,
            defaults: TweenDefaults {
                ease: reveal.ease,
                ..Default::default()
            },
        });
        timeline
            .to(
                &[title],
                reveal_to(reveal.title_duration).delay(reveal.title_delay),
                Position::Sequential,
            )
            .to(
                &subtitle,
                reveal_to(reveal.subtitle_duration),
                Position::BeforePreviousEnd(reveal.subtitle_overlap),
            )
            .to(
                &cta,
                reveal_to(reveal.cta_duration),
                Position::BeforePreviousEnd(reveal.cta_overlap),
            );
        self.animations.hero_intro = Some(self.timelines.insert(timeline));
    }

    fn init_fleet_header(&mut self) {
        let Some(header) = self.scene.query_selector(&self.config.selectors.fleet_header) else {
            return;
        };
        let mut timeline = Timeline::new(TimelineOptions {
            paused: true,
            ..Default::default()
        });
        timeline.to(
            &[header],
            TweenVars::new()
                .to(Property::Opacity, 1.0)
                .to(Property::Y, 0.0)
                .duration(self.config.reveal.header_duration),
            Position::Sequential,
        );
        let timeline = self.timelines.insert(timeline);
        let trigger = self.triggers.register(
            Trigger::new(Some(header), TriggerMode::Toggle(ToggleActions::REPLAY))
                .with_range(
                    Boundary::Anchor {
                        element: 0.0,
                        viewport: 0.8,
                        offset: 0.0,
                    },
                    Boundary::Anchor {
                        element: 1.0,
                        viewport: 0.6,
                        offset: 0.0,
                    },
                )
                .with_animation(timeline),
        );
        self.animations.fleet_header = Some((timeline, trigger));
    }

    fn init_navbar(&mut self) {
        self.navbar = self
            .scene
            .query_selector(&self.config.selectors.navbar)
            .map(|id| (id, NavbarVisibility::new(self.config.navbar.threshold)));
    }

    fn init_magnetic(&mut self) {
        let buttons = self.scene.query_selector_all(&self.config.selectors.magnetic);
        self.magnetic = MagneticButtons::new(self.config.magnetic, buttons);
    }

    fn init_floating(&mut self) {
        for node in self.scene.query_selector_all(&self.config.selectors.floating) {
            self.motion.add(node, &self.scene);
        }
    }

    /// (Re)builds the staggered car-card reveal. Call after the card list changes.
    ///
    /// Any previous reveal is killed first. Returns `None` when there are no cards.
    pub fn animate_car_cards(&mut self) -> Option<TimelineId> {
        if let Some((timeline, trigger)) = self.animations.card_reveal.take() {
            self.timelines.kill(timeline);
            self.triggers.unregister(trigger);
        }
        let cards = self.scene.query_selector_all(&self.config.selectors.car_card);
        if cards.is_empty() {
            debug!("[Page] no car cards to reveal");
            return None;
        }
        let reveal = self.config.reveal;
        let mut timeline = Timeline::new(TimelineOptions {
            paused: true,
            ..Default::default()
        });
        timeline.to(
            &cards,
            TweenVars::new()
                .to(Property::Opacity, 1.0)
                .to(Property::Y, 0.0)
                .duration(reveal.card_duration)
                .stagger(reveal.card_stagger)
                .ease(reveal.ease),
            Position::Sequential,
        );
        let fleet = self.scene.query_selector(&self.config.selectors.fleet);
        if fleet.is_none() {
            timeline.play();
        }
        let timeline = self.timelines.insert(timeline);
        let trigger = self.triggers.register(
            Trigger::new(fleet, TriggerMode::Toggle(ToggleActions::REPLAY))
                .with_start(Boundary::Anchor {
                    element: 0.0,
                    viewport: 0.6,
                    offset: 0.0,
                })
                .with_animation(timeline),
        );
        self.animations.card_reveal = Some((timeline, trigger));
        info!(cards = cards.len(), "[Page] car card reveal ready");
        Some(timeline)
    }

    /// Requests a recomputation of every trigger range on the next frame.
    #[instrument(level = "debug", skip(self))]
    pub fn refresh(&mut self) {
        self.triggers.request_refresh();
    }

    /// Reports host input. Only records it; the next `tick` acts on it.
    ///
    /// Returns how many routes handled the event (zero before `init`).
    pub fn dispatch(&mut self, event: InputEvent) -> usize {
        self.dispatcher.dispatch(&event, &mut self.input)
    }

    /// Runs one frame `dt` seconds after the previous one.
    /// Returns `None` while the clock is paused.
    pub fn tick(&mut self, dt: f64) -> Option<FrameReport> {
        let tick = self.clock.tick(dt)?;
        Some(self.run_frame(tick))
    }

    /// Runs one frame at a host timestamp in seconds.
    pub fn tick_at(&mut self, timestamp: f64) -> Option<FrameReport> {
        let tick = self.clock.tick_at(timestamp)?;
        Some(self.run_frame(tick))
    }

    fn run_frame(&mut self, tick: FrameTick) -> FrameReport {
        let dt = tick.delta;

        for call in self.clock.take_due() {
            match call {
                DeferredCall::RefreshTriggers => self.triggers.request_refresh(),
            }
        }

        let input = self.input.drain();
        self.apply_layout(&input);
        if input.wheel != 0.0 {
            self.scroll.on_wheel(input.wheel);
        }
        if input.touch != 0.0 {
            self.scroll.on_touch(input.touch);
        }
        if let Some(p) = input.pointer {
            self.pointer.on_move(p);
        }

        let scroll = self.scroll.update(dt);
        let fires = self.triggers.update(&scroll, &self.scene);
        self.apply_fires(&fires);
        self.update_navbar(scroll.position);

        let velocity = self.pointer.sample(dt);
        for node in &input.enters {
            self.motion.queue_enter(*node);
        }
        self.motion.update(dt, velocity, &mut self.scene);

        if input.pointer.is_some() || input.pointer_exited {
            self.magnetic.on_pointer(input.pointer, scroll.position, &self.scene, &mut self.tweener);
        }

        self.timelines.advance(dt);
        self.timelines.render(&mut self.scene);
        self.tweener.advance(dt);
        self.tweener.render(&mut self.scene);

        FrameReport {
            frame: tick.frame,
            time: tick.time,
            scroll,
            fires: fires.len(),
            navbar_hidden: self.navbar_hidden(),
        }
    }

    fn apply_layout(&mut self, input: &InputState) {
        let mut changed = input.refresh;
        if let Some(viewport) = input.viewport {
            self.scene.set_viewport(viewport);
            changed = true;
        }
        if let Some(height) = input.content_height {
            self.scene.set_content_height(height);
            changed = true;
        }
        if changed {
            let bounds = self.scene.scroll_container().map(|c| c.limit());
            self.scroll.set_bounds(bounds);
            self.triggers.request_refresh();
        }
    }

    fn apply_fires(&mut self, fires: &[TriggerFire]) {
        for fire in fires {
            let Some(timeline) = fire.animation.and_then(|id| self.timelines.get_mut(id)) else {
                continue;
            };
            match fire.event {
                TriggerEvent::Edge { action, .. } => timeline.apply(action),
                TriggerEvent::Scrub(progress) => timeline.set_progress(progress),
            }
        }
    }

    fn update_navbar(&mut self, position: f64) {
        if self.last_scroll == Some(position) {
            return;
        }
        self.last_scroll = Some(position);
        let Some((node, nav)) = self.navbar.as_mut() else {
            return;
        };
        if let Some(hidden) = nav.update(position) {
            let to = if hidden { -100.0 } else { 0.0 };
            self.tweener.to(
                *node,
                Property::YPercent,
                to,
                self.config.navbar.duration,
                EasingType::Power2Out,
            );
            debug!(hidden, position, "[Page] navbar visibility changed");
        }
    }

    /// Releases every route, trigger, timeline and pending timer.
    ///
    /// Styles already written stay on the scene. `init` may be called again.
    pub fn teardown(&mut self) {
        self.dispatcher.clear();
        self.triggers.clear();
        self.timelines.clear();
        self.tweener.clear();
        self.motion.clear();
        self.magnetic.clear();
        self.clock.cancel_deferred();
        self.input = InputState::default();
        self.navbar = None;
        self.animations = PageAnimations::default();
        self.last_scroll = None;
        self.initialized = false;
        info!("[Page] torn down");
    }
}
