// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;
use std::sync::Arc;

use drift_camera::{Camera, RecomputeThrottle};
use drift_event_state::gesture::{DragGesture, GestureEvent, PointerId, PointerKind};
use drift_focus::{FocusController, FocusEvent, FocusPhase};
use drift_lattice::{
    Catalog, GridTile, LatticeCoord, TileDimensions, TileLattice, TileRecord, VisibleSet,
    compute_visible,
};
use drift_preload::{AssetLoader, AssetRequest, PreloadReport, preload_all, requests_for};
use drift_timing::TimerQueue;
use kurbo::{Point, Rect, Vec2};

use crate::config::GridConfig;
use crate::error::EngineError;
use crate::render::{OverlayTile, RenderSurface, RenderTile, TileMedia, Viewport};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EngineTimer {
    VideoUpgrade,
}

/// Summary of one [`GridEngine::frame`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// The camera is at rest.
    pub settled: bool,
    /// The camera came to rest during this frame.
    pub became_settled: bool,
    /// A culling pass ran.
    pub culled: bool,
    /// The lattice layer was re-rendered.
    pub rendered_tiles: bool,
    /// Number of visible tiles.
    pub visible: usize,
    /// Focus transition that happened during this frame.
    pub focus: Option<FocusEvent<LatticeCoord>>,
}

/// The grid engine: one instance per mounted view.
///
/// Owns the lattice, the camera, gesture recognition, the focus overlay and
/// the pending timers. The host drives it with input calls and one
/// [`GridEngine::frame`] per animation tick, passing its own clock in
/// milliseconds, and reads state back through the pull accessors.
///
/// Within a frame, physics runs first, then culling, then rendering.
#[derive(Debug)]
pub struct GridEngine {
    config: GridConfig,
    viewport: Viewport,
    lattice: TileLattice,
    camera: Camera,
    throttle: RecomputeThrottle,
    gesture: DragGesture,
    focus: FocusController<LatticeCoord>,
    focused_record: Option<Arc<TileRecord>>,
    timers: TimerQueue<EngineTimer>,
    visible: VisibleSet,
    videos_live: bool,
    tiles_dirty: bool,
    overlay_shown: bool,
    revealed: bool,
    destroyed: bool,
}

impl GridEngine {
    /// Creates an engine for `catalog` in `viewport`.
    pub fn create(
        catalog: Catalog,
        config: GridConfig,
        viewport: Viewport,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let dims = config.layout.dimensions(viewport.size)?;
        let lattice = TileLattice::new(catalog, dims, config.assignment, config.seed);
        let mut throttle = RecomputeThrottle::new(&config.physics);
        throttle.force();
        let mut focus = FocusController::new(config.focus);
        focus.set_viewport(viewport.rect());
        log::debug!(
            "grid created: {} records, tile {:?}, viewport {:?}",
            lattice.catalog().len(),
            dims.size(),
            viewport.size
        );
        Ok(Self {
            camera: Camera::new(config.physics),
            gesture: DragGesture::new(config.gesture),
            config,
            viewport,
            lattice,
            throttle,
            focus,
            focused_record: None,
            timers: TimerQueue::new(),
            visible: VisibleSet::default(),
            videos_live: false,
            tiles_dirty: true,
            overlay_shown: false,
            revealed: false,
            destroyed: false,
        })
    }

    /// Parses the catalog and config documents and creates an engine.
    pub fn from_json(
        catalog_json: &str,
        config_json: &str,
        viewport: Viewport,
    ) -> Result<Self, EngineError> {
        let catalog = Catalog::from_json(catalog_json)?;
        let config = GridConfig::from_json(config_json)?;
        Self::create(catalog, config, viewport)
    }

    /// Tears the engine down.
    ///
    /// Pending timers are cancelled and focus and gesture state are dropped.
    /// Afterwards [`GridEngine::frame`] fails with [`EngineError::Destroyed`]
    /// and input is ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.timers.clear();
        self.focus.reset();
        self.focused_record = None;
        self.gesture.reset();
        self.visible = VisibleSet::default();
        self.lattice.clear_cache();
        self.destroyed = true;
        log::debug!("grid destroyed");
    }

    /// Returns `true` after [`GridEngine::destroy`].
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Config in use.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current tile dimensions.
    #[must_use]
    pub fn dimensions(&self) -> TileDimensions {
        self.lattice.dimensions()
    }

    /// Assets to preload before the first reveal.
    #[must_use]
    pub fn asset_requests(&self) -> Vec<AssetRequest> {
        requests_for(self.lattice.catalog())
    }

    /// Preloads the catalog's assets and marks the grid revealed.
    ///
    /// Failed assets do not hold the reveal back.
    pub async fn preload<L: AssetLoader>(&mut self, loader: &L) -> PreloadReport {
        let requests = self.asset_requests();
        let report = preload_all(loader, &requests).await;
        self.revealed = true;
        report
    }

    /// Returns `true` once the initial preload settled.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns `true` while a camera drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.camera.is_dragging()
    }

    /// Returns `true` when the camera is at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.camera.is_settled()
    }

    /// Whether the host should suppress native scrolling and selection.
    #[must_use]
    pub fn suppress_native(&self) -> bool {
        self.gesture.suppress_native() || self.focus.blocks_input()
    }

    /// Current camera translation.
    #[must_use]
    pub fn camera_offset(&self) -> Vec2 {
        self.camera.camera_offset()
    }

    /// Focused lattice slot, if any.
    #[must_use]
    pub fn focused_coord(&self) -> Option<LatticeCoord> {
        self.focus.focused()
    }

    /// Focused tile, if any.
    #[must_use]
    pub fn focused_tile(&self) -> Option<&Rc<GridTile>> {
        self.focus.focused().and_then(|coord| self.lattice.peek(coord))
    }

    /// Focus phase.
    #[must_use]
    pub fn focus_phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    /// Tiles found by the latest culling pass.
    #[must_use]
    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    /// Returns `true` once video tiles are allowed to play.
    #[must_use]
    pub fn videos_live(&self) -> bool {
        self.videos_live
    }

    /// Earliest pending timer deadline, for hosts that sleep between frames.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Screen-space bounds of `coord` under the current camera.
    #[must_use]
    pub fn screen_rect(&self, coord: LatticeCoord) -> Rect {
        self.lattice.tile_rect(coord) + self.camera.camera_offset()
    }

    /// Lattice slot under the screen point `pos`.
    ///
    /// Answered from lattice geometry, so it holds between a resize and the
    /// next culling pass.
    #[must_use]
    pub fn hit_test(&self, pos: Point) -> Option<LatticeCoord> {
        self.lattice.coord_at(pos - self.camera.camera_offset())
    }

    /// Applies a new viewport.
    ///
    /// Tile dimensions are re-derived; if they change, the tile cache is
    /// dropped and the next frame culls against fresh tiles. An in-flight
    /// focus animation keeps running and is retargeted once the camera is at
    /// rest.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }
        let dims = self.config.layout.dimensions(viewport.size)?;
        self.viewport = viewport;
        if self.lattice.set_dimensions(dims) {
            self.visible = VisibleSet::default();
            // The focused slot keeps the record the overlay is showing.
            if let (Some(coord), Some(record)) = (self.focus.focused(), &self.focused_record) {
                self.lattice.pin(coord, Arc::clone(record));
            }
        }
        self.throttle.force();
        self.tiles_dirty = true;
        self.focus.set_viewport(viewport.rect());
        if self.camera.is_settled() {
            self.retrack_focus();
        }
        log::debug!("resized to {:?}, tile {:?}", viewport.size, dims.size());
        Ok(())
    }

    /// Handles a pointer or touch press.
    pub fn pointer_down(&mut self, id: PointerId, kind: PointerKind, pos: Point, now: u64) {
        if self.ignore_input("pointer_down") {
            return;
        }
        self.gesture.pointer_down(id, kind, pos, now);
    }

    /// Handles pointer or touch motion.
    pub fn pointer_move(&mut self, id: PointerId, pos: Point, now: u64) {
        if self.ignore_input("pointer_move") {
            return;
        }
        for event in self.gesture.pointer_move(id, pos, now) {
            self.apply_gesture(event);
        }
    }

    /// Handles a pointer or touch release.
    ///
    /// A release that completes a tap may change focus; the transition is
    /// returned.
    pub fn pointer_up(&mut self, id: PointerId, now: u64) -> Option<FocusEvent<LatticeCoord>> {
        if self.ignore_input("pointer_up") {
            return None;
        }
        let event = self.gesture.pointer_up(id, now)?;
        self.apply_gesture(event)
    }

    /// Handles a cancelled pointer or touch.
    pub fn pointer_cancel(&mut self, id: PointerId, now: u64) {
        if self.ignore_input("pointer_cancel") {
            return;
        }
        if let Some(event) = self.gesture.pointer_cancel(id, now) {
            self.apply_gesture(event);
        }
    }

    /// Advances the engine by one animation tick and renders into `surface`.
    pub fn frame(
        &mut self,
        now: u64,
        surface: &mut impl RenderSurface,
    ) -> Result<FrameReport, EngineError> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }

        let step = self.camera.step(now);
        self.throttle.record(step.travel);
        if step.became_settled {
            // One last pass at the resting position.
            if self.throttle.accumulated() > 0.0 {
                self.throttle.force();
            }
            self.retrack_focus();
        }
        self.update_video_timer(step.settled, now);

        let focus = self.focus.advance(now, step.settled);
        if let Some(event) = focus {
            self.on_focus_event(event);
        }

        if self.visible.is_empty() {
            self.throttle.force();
        }
        let culled = self.throttle.poll(now);
        if culled {
            let next = compute_visible(
                &mut self.lattice,
                self.camera.camera_offset(),
                self.viewport.size,
                self.config.cull_buffer,
            );
            if !next.is_equivalent(&self.visible) {
                self.tiles_dirty = true;
            }
            self.visible = next;
        }

        surface.apply_camera(self.viewport.snap_vec(self.camera.camera_offset()));
        let rendered_tiles = self.tiles_dirty;
        if rendered_tiles {
            let tiles = self.render_tiles();
            surface.render_tiles(&tiles);
            self.tiles_dirty = false;
        }
        self.render_overlay(now, surface);

        Ok(FrameReport {
            settled: step.settled,
            became_settled: step.became_settled,
            culled,
            rendered_tiles,
            visible: self.visible.len(),
            focus,
        })
    }

    fn ignore_input(&self, what: &str) -> bool {
        if self.destroyed {
            log::warn!("{what} after destroy ignored");
        }
        self.destroyed
    }

    fn apply_gesture(&mut self, event: GestureEvent) -> Option<FocusEvent<LatticeCoord>> {
        match event {
            GestureEvent::DragStart { anchor, time } => {
                if self.focus.blocks_input() {
                    log::trace!("drag ignored under focus overlay");
                    return None;
                }
                self.camera.begin_drag(anchor, time);
                self.downgrade_videos();
                None
            }
            GestureEvent::DragMove { delta, time } => {
                if self.camera.is_dragging() {
                    self.camera.drag_by(delta, time);
                }
                None
            }
            GestureEvent::DragEnd { time } => {
                if self.camera.is_dragging() {
                    self.camera.end_drag(time);
                }
                None
            }
            GestureEvent::Tap { pos, time } => self.tap(pos, time),
        }
    }

    fn tap(&mut self, pos: Point, now: u64) -> Option<FocusEvent<LatticeCoord>> {
        let event = match self.focus.phase() {
            FocusPhase::Open => self.focus.dismiss(now, self.camera.is_settled()),
            FocusPhase::Opening | FocusPhase::Closing => None,
            FocusPhase::Idle => {
                let tile = self.lattice.resolve(self.hit_test(pos)?);
                let origin = self.screen_rect(tile.coord());
                let event = self.focus.click(tile.coord(), origin, self.viewport.rect(), now);
                if event.is_some() {
                    self.focused_record = Some(Arc::clone(tile.record()));
                }
                event
            }
        }?;
        self.on_focus_event(event);
        Some(event)
    }

    fn on_focus_event(&mut self, event: FocusEvent<LatticeCoord>) {
        match event {
            FocusEvent::Opening(_) => self.tiles_dirty = true,
            FocusEvent::Closed(_) => {
                self.focused_record = None;
                self.tiles_dirty = true;
            }
            FocusEvent::Opened(_) | FocusEvent::CloseDeferred(_) | FocusEvent::Closing(_) => {}
        }
    }

    fn retrack_focus(&mut self) {
        if let Some(coord) = self.focus.focused() {
            let rect = self.screen_rect(coord);
            self.focus.retrack(rect);
        }
    }

    fn update_video_timer(&mut self, settled: bool, now: u64) {
        if !settled {
            self.downgrade_videos();
            return;
        }
        let key = EngineTimer::VideoUpgrade;
        if !self.videos_live && !self.timers.is_pending(&key) {
            self.timers.schedule(key, now + self.config.video_upgrade_delay_ms);
        }
        for fired in self.timers.pop_due(now) {
            match fired {
                EngineTimer::VideoUpgrade => {
                    log::debug!("camera at rest; upgrading video tiles");
                    self.videos_live = true;
                    self.tiles_dirty = true;
                }
            }
        }
    }

    fn downgrade_videos(&mut self) {
        self.timers.cancel(&EngineTimer::VideoUpgrade);
        if self.videos_live {
            log::debug!("camera moving; downgrading video tiles to posters");
            self.videos_live = false;
            self.tiles_dirty = true;
        }
    }

    fn render_tiles(&self) -> Vec<RenderTile> {
        let focused = self.focus.focused();
        self.visible
            .iter()
            .map(|tile| {
                RenderTile::new(
                    tile,
                    &self.viewport,
                    self.videos_live,
                    focused == Some(tile.coord()),
                )
            })
            .collect()
    }

    fn render_overlay(&mut self, now: u64, surface: &mut impl RenderSurface) {
        let overlay = self.focus.focused().zip(self.focus.overlay_rect(now));
        let Some((coord, rect)) = overlay else {
            if self.overlay_shown {
                surface.render_overlay(None);
                self.overlay_shown = false;
            }
            return;
        };
        let Some(record) = self.focused_record.as_deref() else {
            return;
        };
        let tile = OverlayTile {
            coord,
            rect: self.viewport.snap_rect(rect),
            media: TileMedia::for_record(record, self.videos_live),
            label: record.label(),
            progress: self.focus.progress(now),
        };
        surface.render_overlay(Some(&tile));
        self.overlay_shown = true;
    }
}
