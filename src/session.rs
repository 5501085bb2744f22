//! TabView session: the one explicit handle every collaborator shares.
//!
//! The session splits into read-only configuration (`TabViewConfig`,
//! the route list) and shared mutable state (observed cells plus
//! controllers behind locks). Hosts report layout and gestures in,
//! drive the animation clock with [`TabViewSession::tick`], and drain
//! queued [`HostCommand`]s out.
//!
//! Threading: gesture methods and `tick` may run on a dedicated
//! animation thread while the main thread reads state and drains
//! commands. Registered callbacks fire on whichever thread drove the
//! settling call.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::autoscroll::{self, AutoScrollCoordinator};
use crate::carousel::{CarouselController, JumpOutcome, SettleEvent};
use crate::cell::{ObservedIndex, ObservedValue, ObservedValueReader};
use crate::config::{JumpMode, KeyboardDismissMode, TabViewConfig};
use crate::error::TabViewError;
use crate::gesture::{PanClassifier, PanOwner};
use crate::header::{GestureSource, HeaderArbiter};
use crate::indicator::{self, IndicatorGeometry};
use crate::layout::{Layout, LayoutRegistry, TabLayoutEntry};
use crate::motion::ANIMATION_FRAME_INTERVAL;
use crate::render::{self, JumpState, RenderPolicy, SceneTransform};
use crate::route::{Route, Routes};

/// An instruction the engine queues for the host UI to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    DismissKeyboard,
    /// Scroll the tab bar strip to `offset`.
    ScrollTabBar { offset: f64, animated: bool },
    /// Force one route's scroll surface to `offset_y`.
    SyncSceneScroll { route_index: usize, offset_y: f64 },
}

/// Everything a mounted scene needs from the engine.
pub struct SceneProps {
    pub route: Route,
    pub route_index: usize,
    pub layout: Layout,
    /// Read-only view of the animated position, for scene-local effects.
    pub position: ObservedValueReader,
}

type IndexCallback = Box<dyn Fn(usize) + Send + Sync>;
type SwipeCallback = Box<dyn Fn() + Send + Sync>;

pub struct TabViewSession {
    config: TabViewConfig,
    routes: Routes,
    position: ObservedValue,
    committed: ObservedIndex,
    carousel: Mutex<CarouselController>,
    header: Mutex<HeaderArbiter>,
    registry: RwLock<LayoutRegistry>,
    render: Arc<Mutex<RenderPolicy>>,
    autoscroll: Arc<Mutex<AutoScrollCoordinator>>,
    commands: Arc<Mutex<VecDeque<HostCommand>>>,
    classifier: Mutex<PanClassifier>,
    view_layout: Mutex<Layout>,
    tab_bar_width: Mutex<f64>,
    on_index_change: Mutex<Option<IndexCallback>>,
    on_swipe_start: Mutex<Option<SwipeCallback>>,
    on_swipe_end: Mutex<Option<SwipeCallback>>,
}

impl TabViewSession {
    /// Builds a session starting at route index 0.
    pub fn new(routes: Vec<Route>, config: TabViewConfig) -> Result<Self, TabViewError> {
        Self::with_initial_index(routes, config, 0)
    }

    /// Builds a session starting at `initial_index` (clamped into
    /// range).
    pub fn with_initial_index(
        routes: Vec<Route>,
        config: TabViewConfig,
        initial_index: usize,
    ) -> Result<Self, TabViewError> {
        let routes = Routes::new(routes)?;
        let route_count = routes.len();
        let initial_index = initial_index.min(route_count - 1);

        let position = ObservedValue::new(initial_index as f64);
        let committed = ObservedIndex::new(initial_index);
        let carousel = CarouselController::new(position.clone(), committed.clone(), route_count);

        let render = Arc::new(Mutex::new(RenderPolicy::new(
            config.render_mode,
            route_count,
            initial_index,
        )));
        let autoscroll = Arc::new(Mutex::new(AutoScrollCoordinator::new()));
        let commands = Arc::new(Mutex::new(VecDeque::new()));

        // Commit reactions ride the committed cell's notifications, so
        // they observe exactly the values the single writer stored.
        {
            let render = Arc::clone(&render);
            committed.subscribe(move |index| render.lock().mark_visited(index));
        }
        {
            let autoscroll = Arc::clone(&autoscroll);
            committed
                .subscribe(move |index| autoscroll.lock().note_index_change(index, Instant::now()));
        }
        if config.keyboard_dismiss_mode == KeyboardDismissMode::Auto {
            let commands = Arc::clone(&commands);
            committed.subscribe(move |_| commands.lock().push_back(HostCommand::DismissKeyboard));
        }

        // The bar centers a non-zero initial tab once, without waiting
        // for a commit that may never come.
        if initial_index != 0 {
            autoscroll
                .lock()
                .note_index_change(initial_index, Instant::now());
        }

        Ok(Self {
            config,
            header: Mutex::new(HeaderArbiter::new(route_count)),
            registry: RwLock::new(LayoutRegistry::new(route_count)),
            carousel: Mutex::new(carousel),
            position,
            committed,
            render,
            autoscroll,
            commands,
            classifier: Mutex::new(PanClassifier::new()),
            view_layout: Mutex::new(Layout::default()),
            tab_bar_width: Mutex::new(0.0),
            on_index_change: Mutex::new(None),
            on_swipe_start: Mutex::new(None),
            on_swipe_end: Mutex::new(None),
            routes,
        })
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn config(&self) -> &TabViewConfig {
        &self.config
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// The settled, discrete "current" route index.
    pub fn committed_index(&self) -> usize {
        self.committed.get()
    }

    /// Continuous position of the carousel, fractional during motion.
    pub fn animated_position(&self) -> f64 {
        self.position.get()
    }

    pub fn position_reader(&self) -> ObservedValueReader {
        self.position.reader()
    }

    pub fn jump_state(&self) -> Option<JumpState> {
        self.carousel.lock().jump_state()
    }

    pub fn gesture_source(&self) -> GestureSource {
        self.header.lock().source()
    }

    pub fn scene_props(&self, route_index: usize) -> Option<SceneProps> {
        let route = self.routes.get(route_index)?.clone();
        Some(SceneProps {
            route,
            route_index,
            layout: *self.view_layout.lock(),
            position: self.position.reader(),
        })
    }

    // ── Callbacks ────────────────────────────────────────────────────

    pub fn set_on_index_change(&self, callback: impl Fn(usize) + Send + Sync + 'static) {
        *self.on_index_change.lock() = Some(Box::new(callback));
    }

    pub fn set_on_swipe_start(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.on_swipe_start.lock() = Some(Box::new(callback));
    }

    pub fn set_on_swipe_end(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.on_swipe_end.lock() = Some(Box::new(callback));
    }

    // ── Layout reports ───────────────────────────────────────────────

    pub fn set_view_layout(&self, layout: Layout) {
        *self.view_layout.lock() = layout;
    }

    pub fn set_header_height(&self, height: f64) {
        self.header.lock().set_header_height(height);
        self.push_header_sync();
    }

    pub fn set_tab_bar_width(&self, width: f64) {
        *self.tab_bar_width.lock() = width;
    }

    pub fn report_tab_width(&self, route_index: usize, width: f64) {
        self.registry.write().report_tab_width(route_index, width);
    }

    pub fn report_tab_content_width(&self, route_index: usize, width: f64) {
        self.registry
            .write()
            .report_tab_content_width(route_index, width);
    }

    pub fn tab_layout(&self, route_index: usize) -> TabLayoutEntry {
        self.registry.read().entry(route_index)
    }

    fn track_width(&self) -> f64 {
        self.view_layout.lock().width + self.config.scene_container_gap
    }

    // ── Carousel gestures ────────────────────────────────────────────

    pub fn swipe_begin(&self) {
        if !self.config.swipe_enabled {
            return;
        }
        self.carousel.lock().begin_swipe();
        if self.config.keyboard_dismiss_mode == KeyboardDismissMode::OnDrag {
            self.push_command(HostCommand::DismissKeyboard);
        }
        if let Some(callback) = self.on_swipe_start.lock().as_ref() {
            callback();
        }
    }

    pub fn swipe_update(&self, delta_x: f64) {
        if !self.config.swipe_enabled {
            return;
        }
        self.carousel.lock().update_swipe(delta_x, self.track_width());
    }

    pub fn swipe_end(&self, velocity_x: f64) {
        if !self.config.swipe_enabled {
            return;
        }
        self.carousel
            .lock()
            .end_swipe(velocity_x, self.track_width(), Instant::now());
    }

    // ── Jumps ────────────────────────────────────────────────────────

    /// Jumps to the route with `key`. Unknown keys are ignored: the
    /// request may race a route-list update, so it is not an error.
    pub fn jump_to(&self, key: &str) {
        match self.routes.index_of(key) {
            Some(index) => self.jump_to_index(index),
            None => debug!(key, "jump_to ignored: unknown route key"),
        }
    }

    /// Jump by route index, as from a tab-bar tap.
    pub fn jump_to_index(&self, index: usize) {
        let outcome = self
            .carousel
            .lock()
            .jump_to(index, self.config.jump_mode, Instant::now());
        match outcome {
            JumpOutcome::Ignored => {
                debug!(index, "jump ignored: unknown index or already current");
            }
            JumpOutcome::Committed(index) => self.commit(index),
            JumpOutcome::Animating => {
                // Pre-mount the destination so it exists by the time the
                // slide reaches it.
                self.render.lock().mark_visited(index);
            }
        }
    }

    // ── Header collapse gestures ─────────────────────────────────────

    pub fn scene_pan_touch_down(&self, route_index: usize) {
        let focused = route_index == self.committed.get();
        self.header.lock().on_pan_touch_down(focused);
    }

    pub fn scene_pan_begin(&self, route_index: usize) {
        let focused = route_index == self.committed.get();
        self.header.lock().on_pan_start(focused);
    }

    pub fn scene_pan_update(&self, route_index: usize, translation_y: f64) {
        let focused = route_index == self.committed.get();
        self.header.lock().on_pan_change(translation_y, focused);
        self.push_header_sync();
    }

    pub fn scene_pan_end(&self, route_index: usize, velocity_y: f64) {
        let focused = route_index == self.committed.get();
        self.header
            .lock()
            .on_pan_end(velocity_y, Instant::now(), focused);
    }

    pub fn scene_scroll_begin(&self, route_index: usize) {
        let focused = route_index == self.committed.get();
        self.header.lock().on_scroll_begin(focused);
    }

    pub fn scene_scroll(&self, route_index: usize, offset_y: f64) {
        let focused = route_index == self.committed.get();
        self.header.lock().on_scroll(route_index, offset_y, focused);
        self.push_header_sync();
    }

    /// Header collapse progress, 0–100.
    pub fn collapsed_percentage(&self) -> f64 {
        self.header.lock().collapsed_percentage()
    }

    /// Collapsed header height in px (the raw header-collapse value).
    pub fn collapsed_header_height(&self) -> f64 {
        self.header.lock().translate_y()
    }

    pub fn header_translate_y_reader(&self) -> ObservedValueReader {
        self.header.lock().translate_y_reader()
    }

    // ── Raw touch classification ─────────────────────────────────────

    /// Feeds a raw touch-down on scene content.
    pub fn touch_down(&self, x: f64, y: f64) {
        self.classifier.lock().touch_down(x, y);
        self.scene_pan_touch_down(self.committed.get());
    }

    /// Feeds a raw touch move; arbitration decides between swiping the
    /// carousel and dragging the header at the ±10 px thresholds.
    pub fn touch_move(&self, x: f64, y: f64) {
        let header_enabled = self.header.lock().header_height() > 0.0;
        let decided = self.classifier.lock().touch_move(x, y, header_enabled);
        match decided {
            Some(PanOwner::CarouselSwipe) => self.swipe_begin(),
            Some(PanOwner::HeaderDrag) => self.scene_pan_begin(self.committed.get()),
            None => {}
        }

        let classifier = self.classifier.lock();
        let owner = classifier.owner();
        let translation = classifier.translation(x, y);
        drop(classifier);
        if let (Some(owner), Some((dx, dy))) = (owner, translation) {
            match owner {
                PanOwner::CarouselSwipe => self.swipe_update(dx),
                PanOwner::HeaderDrag => self.scene_pan_update(self.committed.get(), dy),
            }
        }
    }

    /// Feeds a raw touch release with the host-measured fling velocity.
    pub fn touch_up(&self, velocity_x: f64, velocity_y: f64) {
        match self.classifier.lock().touch_up() {
            Some(PanOwner::CarouselSwipe) => self.swipe_end(velocity_x),
            Some(PanOwner::HeaderDrag) => self.scene_pan_end(self.committed.get(), velocity_y),
            None => {}
        }
    }

    // ── Render queries ───────────────────────────────────────────────

    /// Whether the scene at `route_index` must be mounted this frame.
    pub fn should_render(&self, route_index: usize) -> bool {
        let jump = self.carousel.lock().jump_state();
        self.render
            .lock()
            .should_render(route_index, self.position.get(), jump)
    }

    /// Records that the host actually mounted a scene (lazy bookkeeping).
    pub fn mark_scene_mounted(&self, route_index: usize) {
        self.render.lock().mark_mounted(route_index);
    }

    /// Per-scene placement for this frame.
    pub fn scene_transform(&self, route_index: usize) -> SceneTransform {
        let track_width = self.track_width();
        let position = self.position.get();
        let mut transform = SceneTransform {
            base_offset: render::scene_base_offset(route_index, track_width),
            carousel_translate_x: render::carousel_translate_x(position, track_width),
            slide_translate_x: 0.0,
            hidden: false,
        };
        if self.config.jump_mode == JumpMode::Smooth {
            if let Some(jump) = self.carousel.lock().jump_state() {
                if route_index == jump.start_index {
                    transform.slide_translate_x =
                        render::smooth_jump_slide(position, jump, track_width);
                }
                transform.hidden = render::hidden_during_jump(route_index, jump);
            }
        }
        transform
    }

    /// Indicator placement interpolated at the current position.
    pub fn indicator_geometry(&self) -> IndicatorGeometry {
        indicator::indicator_geometry(
            self.config.tab_bar_kind,
            &self.registry.read(),
            self.position.get(),
        )
    }

    // ── Tab bar scrolling ────────────────────────────────────────────

    /// Host report that scrolling the bar to an estimated index failed
    /// (tab sizes not yet known). Falls back to an offset-based scroll.
    pub fn scroll_to_index_failed(&self, route_index: usize) {
        let entry = self.registry.read().entry(route_index);
        let bar_width = *self.tab_bar_width.lock();
        self.push_command(HostCommand::ScrollTabBar {
            offset: autoscroll::fallback_offset(entry, bar_width),
            animated: true,
        });
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Advances every active animation to `now` and runs due deferred
    /// work. Returns the next deadline at which the host should call
    /// again, or `None` when everything is idle.
    pub fn tick(&self, now: Instant) -> Option<Instant> {
        let settle = self.carousel.lock().advance(now);
        match settle {
            Some(SettleEvent::Swipe { index }) => {
                self.commit(index);
                if let Some(callback) = self.on_swipe_end.lock().as_ref() {
                    callback();
                }
            }
            Some(SettleEvent::Jump { index }) => self.commit(index),
            None => {}
        }

        {
            let mut header = self.header.lock();
            let decaying = header.is_decaying();
            header.advance(now);
            drop(header);
            if decaying {
                self.push_header_sync();
            }
        }

        self.render.lock().flush_pending();

        let due = self.autoscroll.lock().due(now);
        if let Some(index) = due {
            let entry = self.registry.read().entry(index);
            let bar_width = *self.tab_bar_width.lock();
            self.push_command(HostCommand::ScrollTabBar {
                offset: autoscroll::centered_offset(entry, bar_width),
                animated: true,
            });
        }

        self.next_deadline(now)
    }

    fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let lazy_pending = if self.render.lock().has_pending() {
            Some(now + ANIMATION_FRAME_INTERVAL)
        } else {
            None
        };
        let schedules = [
            self.carousel.lock().schedule(now),
            self.header.lock().schedule(now),
            self.autoscroll.lock().deadline(),
            lazy_pending,
        ];
        let mut deadline = None;
        for schedule in schedules.into_iter().flatten() {
            deadline = Some(match deadline {
                None => schedule,
                Some(current) => schedule.min(current),
            });
        }
        deadline
    }

    /// Takes everything queued for the host since the last drain.
    pub fn drain_commands(&self) -> Vec<HostCommand> {
        self.commands.lock().drain(..).collect()
    }

    // ── Internals ────────────────────────────────────────────────────

    fn push_command(&self, command: HostCommand) {
        self.commands.lock().push_back(command);
    }

    fn push_header_sync(&self) {
        let syncs = self.header.lock().sync_commands(self.committed.get());
        if syncs.is_empty() {
            return;
        }
        let mut commands = self.commands.lock();
        for sync in syncs {
            commands.push_back(HostCommand::SyncSceneScroll {
                route_index: sync.route_index,
                offset_y: sync.offset_y,
            });
        }
    }

    fn commit(&self, index: usize) {
        let previous = self.committed.get();
        if previous == index {
            return;
        }
        debug!(from = previous, to = index, "committed index change");
        self.committed.set(index);
        if let Some(callback) = self.on_index_change.lock().as_ref() {
            callback(index);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
