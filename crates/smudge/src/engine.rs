//! # SMUDGE Frame Loop
//!
//! ```text
//! Frame N:
//! ┌───────────────────────────────────────────────────────────────┐
//! │ 1. DRAIN SOURCE                                               │
//! │    └─ Quit → stop now, nothing else runs this frame           │
//! │                                                               │
//! │ 2. DISPATCH (arrival order)                                   │
//! │    ├─ stage tracks pointer / focus / size                     │
//! │    └─ listeners move, show and hide drawables                 │
//! │                                                               │
//! │ 3. REDRAW                                                     │
//! │    └─ erase stale footprints, redraw what they touched        │
//! │                                                               │
//! │ 4. TICK                                                       │
//! │    └─ one Tick event; its changes show up next frame          │
//! │                                                               │
//! │ 5. PRESENT + PACE                                             │
//! │    └─ flip, then sleep off the rest of the frame budget       │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use smudge_core::{Drawable, FrameReport, Surface};
use smudge_events::{DispatchReport, Event, EventDispatcher, ListenerId};

use crate::clock::FramePacer;
use crate::config::{ColorScheme, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::source::EventSource;
use crate::stage::{Entity, Stage};
use crate::widget::{Subscription, Widget};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source delivered a Quit event.
    QuitEvent,
    /// A handler called [`Stage::request_quit`].
    Requested,
}

/// Result of one [`Engine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep going.
    Continue,
    /// Stop the loop.
    Stop(StopReason),
}

/// Counters accumulated across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames completed (redrawn and presented).
    pub frames: u64,
    /// Events dispatched, ticks included.
    pub events: u64,
    /// Footprints erased.
    pub erased: u64,
    /// Drawables rendered.
    pub rendered: u64,
    /// Drawables skipped as off-screen.
    pub skipped: u64,
    /// Render callbacks that failed.
    pub render_failures: u64,
    /// Event handlers that failed.
    pub handler_failures: u64,
    /// Frames whose work (sleep excluded) overran the budget.
    pub frames_over_budget: u64,
    /// Sum of frame work time in microseconds.
    pub busy_us_sum: u64,
    /// Longest frame work time in microseconds.
    pub max_busy_us: u64,
}

impl FrameStats {
    fn record_dispatch(&mut self, events: usize, dispatch: &DispatchReport) {
        self.events += events as u64;
        self.handler_failures += dispatch.failures.len() as u64;
    }

    fn record_frame(&mut self, report: &FrameReport, busy: Duration, budget: Option<Duration>) {
        self.frames += 1;
        self.erased += report.erased.len() as u64;
        self.rendered += report.rendered.len() as u64;
        self.skipped += report.skipped.len() as u64;
        self.render_failures += report.failures.len() as u64;

        let busy_us = u64::try_from(busy.as_micros()).unwrap_or(u64::MAX);
        self.busy_us_sum = self.busy_us_sum.saturating_add(busy_us);
        self.max_busy_us = self.max_busy_us.max(busy_us);
        if budget.is_some_and(|budget| busy > budget) {
            self.frames_over_budget += 1;
        }
    }

    /// Average frame work time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_busy_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        (self.busy_us_sum as f64 / self.frames as f64) / 1000.0
    }

    /// Total callback failures of either kind.
    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.render_failures + self.handler_failures
    }
}

/// What [`Engine::run`] returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Why the loop stopped.
    pub reason: StopReason,
    /// Counters since the engine was created.
    pub stats: FrameStats,
}

/// Owns the stage and the dispatcher and drives frames.
pub struct Engine {
    config: EngineConfig,
    stage: Stage,
    dispatcher: EventDispatcher<Stage>,
    pacer: FramePacer,
    stats: FrameStats,
    /// Reused per-frame event buffer.
    inbox: Vec<Event>,
}

impl Engine {
    /// Creates an engine with an empty stage.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the config fails validation.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            stage: Stage::new(config.redraw_config(), config.resolution()),
            dispatcher: EventDispatcher::new(),
            pacer: FramePacer::new(config.window.target_fps),
            stats: FrameStats::default(),
            inbox: Vec::with_capacity(64),
            config,
        })
    }

    /// The configuration the engine was created with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Widget colors.
    #[must_use]
    pub const fn scheme(&self) -> &ColorScheme {
        &self.config.colors
    }

    /// The stage.
    #[must_use]
    pub const fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable access to the stage.
    #[must_use]
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &EventDispatcher<Stage> {
        &self.dispatcher
    }

    /// Mutable access to the dispatcher, e.g. to add callbacks to a spawned
    /// entity's listener.
    #[must_use]
    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher<Stage> {
        &mut self.dispatcher
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Adds a listener and routes its kinds to it.
    pub fn subscribe(&mut self, subscription: Subscription) -> ListenerId {
        let Subscription { listener, kinds } = subscription;
        let id = self.dispatcher.add_listener(listener);
        self.dispatcher.register(id, kinds);
        id
    }

    /// Tracks a drawable and, if given, subscribes its listener.
    pub fn spawn(&mut self, drawable: Drawable, subscription: Option<Subscription>) -> Entity {
        let drawable = self.stage.redraw_mut().add_one(drawable);
        let listener = subscription.map(|s| self.subscribe(s));
        tracing::debug!(%drawable, ?listener, "entity spawned");
        Entity { drawable, listener }
    }

    /// Spawns a widget. Its listener is built after its drawable has an ID.
    pub fn spawn_widget<W: Widget + ?Sized>(&mut self, widget: &mut W) -> Entity {
        let drawable = self.stage.redraw_mut().add_one(widget.drawable());
        let listener = widget.subscription(drawable).map(|s| self.subscribe(s));
        tracing::debug!(%drawable, ?listener, "widget spawned");
        Entity { drawable, listener }
    }

    /// Removes an entity's listener and drawable, returning the drawable.
    ///
    /// Its last footprint stays on the surface; nothing tracks it any more.
    /// Use [`Self::despawn_erased`] to clear it on the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownEntity`] if the drawable is not tracked.
    /// The listener is removed either way.
    pub fn despawn(&mut self, entity: Entity) -> EngineResult<Drawable> {
        self.remove_entity(entity, false)
    }

    /// Like [`Self::despawn`], but the next frame erases the entity's
    /// footprint and repaints whatever it overlapped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownEntity`] if the drawable is not tracked.
    pub fn despawn_erased(&mut self, entity: Entity) -> EngineResult<Drawable> {
        self.remove_entity(entity, true)
    }

    /// Despawns every entity and drops every listener, including ones added
    /// with [`Self::subscribe`]. Footprints stay on the surface.
    ///
    /// Returns the number of drawables dropped.
    pub fn clear(&mut self) -> usize {
        self.dispatcher.clear();
        let dropped = self.stage.redraw_mut().clear().len();
        tracing::debug!(dropped, "entities cleared");
        dropped
    }

    fn remove_entity(&mut self, entity: Entity, erase: bool) -> EngineResult<Drawable> {
        if let Some(listener) = entity.listener {
            self.dispatcher.remove_listener(listener);
        }
        let redraw = self.stage.redraw_mut();
        let removed = if erase {
            redraw.retire_one(entity.drawable)
        } else {
            redraw.remove_one(entity.drawable)
        };
        let drawable = removed.ok_or(EngineError::UnknownEntity(entity.drawable))?;
        tracing::debug!(drawable = %entity.drawable, erase, "entity despawned");
        Ok(drawable)
    }

    /// Runs one frame.
    pub fn step(&mut self, source: &mut dyn EventSource, surface: &mut dyn Surface) -> FrameOutcome {
        let mut inbox = std::mem::take(&mut self.inbox);
        inbox.clear();
        source.poll(&mut inbox);

        let mut dispatch = DispatchReport::default();
        let mut handled = 0;
        let mut quit = false;
        for event in &inbox {
            if event.is_quit() {
                quit = true;
                break;
            }
            self.stage.observe(event);
            dispatch.merge(self.dispatcher.dispatch(event, &mut self.stage));
            handled += 1;
        }
        self.inbox = inbox;

        if quit {
            self.stats.record_dispatch(handled, &dispatch);
            return FrameOutcome::Stop(StopReason::QuitEvent);
        }

        let report = self.stage.redraw_mut().redraw_frame(surface);

        let tick = Event::tick(report.frame, self.pacer.last_delta().as_secs_f32());
        dispatch.merge(self.dispatcher.dispatch(&tick, &mut self.stage));
        handled += 1;

        surface.present();
        let busy = self.pacer.elapsed();
        self.pacer.end_frame();

        self.stats.record_dispatch(handled, &dispatch);
        self.stats.record_frame(&report, busy, self.pacer.budget());

        if self.stage.quit_requested() {
            FrameOutcome::Stop(StopReason::Requested)
        } else {
            FrameOutcome::Continue
        }
    }

    /// Runs frames until the source sends Quit or a handler requests it.
    pub fn run(&mut self, source: &mut dyn EventSource, surface: &mut dyn Surface) -> RunSummary {
        self.stage.clear_quit();
        let bounds = surface.bounds();
        tracing::info!(
            width = bounds.width,
            height = bounds.height,
            target_fps = self.config.window.target_fps,
            drawables = self.stage.redraw().len(),
            "frame loop started"
        );

        loop {
            if let FrameOutcome::Stop(reason) = self.step(source, surface) {
                tracing::info!(
                    ?reason,
                    frames = self.stats.frames,
                    failures = self.stats.failures(),
                    avg_busy_ms = self.stats.avg_busy_ms(),
                    "frame loop stopped"
                );
                return RunSummary {
                    reason,
                    stats: self.stats,
                };
            }
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("stage", &self.stage)
            .field("listeners", &self.dispatcher.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
