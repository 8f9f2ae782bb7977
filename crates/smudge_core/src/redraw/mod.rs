//! # Redraw Manager
//!
//! Owns every tracked drawable and redraws them with a dirty-rectangle pass
//! instead of clearing the surface.
//!
//! ```text
//! redraw_frame():
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ 1. viewport = surface bounds + margin                            │
//! │ 2. movers: link any new overlaps (no global recompute)           │
//! │    erase retired footprints, schedule their old neighbors        │
//! │ 3. for D in live set (registration order):                       │
//! │    ├─ off-viewport → skip (stale on-screen footprint: erase)     │
//! │    ├─ erase D.last_drawn_rect (kept until D renders again)       │
//! │    ├─ schedule every neighbor N; unlink N if no longer colliding │
//! │    └─ schedule D if visible                                      │
//! │ 4. dedup schedule by identity, render_now each visible entry     │
//! │    (a failed render leaves its rect as the footprint to erase)   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Erases all happen in steps 2-3 and renders all happen in step 4, so every
//! stale footprint is cleared before anything is drawn on top of it.

mod graph;

use std::collections::{HashMap, HashSet};

use crate::color::Color;
use crate::drawable::{Drawable, DrawableId};
use crate::error::{RenderError, SceneResult};
use crate::geometry::Rect;
use crate::surface::Surface;

use graph::CollisionGraph;

/// Default viewport margin in pixels.
pub const DEFAULT_VIEWPORT_MARGIN: i32 = 50;

/// Redraw behavior settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawConfig {
    /// Pixels added on each side of the surface bounds before the off-screen
    /// test, so drawables straddling the edge are still redrawn.
    pub viewport_margin: i32,
    /// Color used to erase stale footprints.
    pub background: Color,
}

impl Default for RedrawConfig {
    fn default() -> Self {
        Self {
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            background: Color::BLACK,
        }
    }
}

/// A render callback that failed during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    /// The drawable whose callback failed.
    pub id: DrawableId,
    /// What it reported.
    pub error: RenderError,
}

/// What one `redraw_frame` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number (0-based).
    pub frame: u64,
    /// Stale footprints erased, in order.
    pub erased: Vec<Rect>,
    /// Drawables rendered successfully, in order.
    pub rendered: Vec<DrawableId>,
    /// Drawables skipped as off-screen.
    pub skipped: Vec<DrawableId>,
    /// Collision edges discovered for drawables that moved.
    pub edges_added: usize,
    /// Collision edges dropped because the rects separated.
    pub edges_removed: usize,
    /// Render callbacks that failed.
    pub failures: Vec<RenderFailure>,
}

impl FrameReport {
    /// Returns true if no render callback failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A tracked drawable plus the rect its collision edges were computed for.
struct Tracked {
    drawable: Drawable,
    indexed_rect: Rect,
}

/// Owns the live drawables and their collision graph.
pub struct RedrawManager {
    config: RedrawConfig,
    /// Drawables indexed by ID.
    tracked: HashMap<DrawableId, Tracked>,
    /// Registration order; defines base redraw order.
    live_set: Vec<DrawableId>,
    graph: CollisionGraph,
    /// Footprints of retired drawables, erased on the next frame.
    pending_erase: Vec<Rect>,
    /// Former neighbors of retired drawables, repainted on the next frame.
    pending_repaint: Vec<DrawableId>,
    next_id: u64,
    frame: u64,
}

impl RedrawManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new(config: RedrawConfig) -> Self {
        Self {
            config,
            tracked: HashMap::with_capacity(256),
            live_set: Vec::with_capacity(256),
            graph: CollisionGraph::with_capacity(256),
            pending_erase: Vec::new(),
            pending_repaint: Vec::new(),
            next_id: 1,
            frame: 0,
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &RedrawConfig {
        &self.config
    }

    /// Replaces the erase color.
    pub fn set_background(&mut self, background: Color) {
        self.config.background = background;
    }

    /// Replaces the viewport margin.
    pub fn set_viewport_margin(&mut self, margin: i32) {
        self.config.viewport_margin = margin;
    }

    /// Starts tracking drawables and returns their assigned IDs in order.
    ///
    /// Each drawable's collision set is computed once here against every
    /// already-tracked drawable, and the new drawable is added to each
    /// colliding neighbor's set.
    pub fn add<I>(&mut self, drawables: I) -> Vec<DrawableId>
    where
        I: IntoIterator<Item = Drawable>,
    {
        drawables.into_iter().map(|d| self.add_one(d)).collect()
    }

    /// Starts tracking a single drawable.
    pub fn add_one(&mut self, drawable: Drawable) -> DrawableId {
        let id = DrawableId::new(self.next_id);
        self.next_id += 1;

        let rect = drawable.rect();
        let neighbors: Vec<DrawableId> = self
            .live_set
            .iter()
            .copied()
            .filter(|other| {
                self.tracked
                    .get(other)
                    .is_some_and(|t| t.drawable.rect().collides(&rect))
            })
            .collect();

        tracing::debug!(%id, ?rect, neighbors = neighbors.len(), "drawable added");

        self.graph.insert(id, neighbors);
        self.tracked.insert(
            id,
            Tracked {
                drawable,
                indexed_rect: rect,
            },
        );
        self.live_set.push(id);

        self.debug_validate();
        id
    }

    /// Stops tracking drawables and hands them back.
    ///
    /// IDs that are not tracked are ignored.
    pub fn remove<I>(&mut self, ids: I) -> Vec<Drawable>
    where
        I: IntoIterator<Item = DrawableId>,
    {
        ids.into_iter().filter_map(|id| self.remove_one(id)).collect()
    }

    /// Stops tracking one drawable. Returns `None` if it was not tracked.
    pub fn remove_one(&mut self, id: DrawableId) -> Option<Drawable> {
        let tracked = self.tracked.remove(&id)?;
        self.graph.remove(id);
        self.live_set.retain(|&other| other != id);

        tracing::debug!(%id, "drawable removed");
        self.debug_validate();
        Some(tracked.drawable)
    }

    /// Stops tracking one drawable and erases its footprint on the next
    /// frame, repainting whatever it overlapped.
    ///
    /// Returns `None` if it was not tracked.
    pub fn retire_one(&mut self, id: DrawableId) -> Option<Drawable> {
        let neighbors = self.graph.neighbors(id).map(<[_]>::to_vec).unwrap_or_default();
        let drawable = self.remove_one(id)?;
        if let Some(stale) = drawable.last_drawn_rect() {
            self.pending_erase.push(stale);
            self.pending_repaint.extend(neighbors);
        }
        Some(drawable)
    }

    /// Stops tracking everything, in registration order.
    ///
    /// Footprints stay on the surface, as with [`Self::remove`].
    pub fn clear(&mut self) -> Vec<Drawable> {
        let ids = self.live_set.clone();
        self.pending_erase.clear();
        self.pending_repaint.clear();
        self.remove(ids)
    }

    /// Returns a tracked drawable.
    #[must_use]
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.tracked.get(&id).map(|t| &t.drawable)
    }

    /// Returns mutable access to a tracked drawable.
    ///
    /// Rect and visibility changes take effect on the next redraw.
    #[must_use]
    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut Drawable> {
        self.tracked.get_mut(&id).map(|t| &mut t.drawable)
    }

    /// Returns true if the ID is tracked.
    #[must_use]
    pub fn contains(&self, id: DrawableId) -> bool {
        self.tracked.contains_key(&id)
    }

    /// Number of tracked drawables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_set.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_set.is_empty()
    }

    /// Tracked IDs in registration order.
    #[must_use]
    pub fn ids(&self) -> &[DrawableId] {
        &self.live_set
    }

    /// Drawables currently recorded as colliding with `id`.
    #[must_use]
    pub fn collision_set(&self, id: DrawableId) -> Option<&[DrawableId]> {
        self.graph.neighbors(id)
    }

    /// Number of undirected collision edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of frames redrawn so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Checks the collision graph invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> SceneResult<()> {
        self.graph.validate(&self.live_set)
    }

    /// Erases stale footprints and redraws everything they touched.
    ///
    /// Call once per frame, after every event for the frame has been
    /// dispatched. A failing render callback is logged and reported; the
    /// rest of the frame still draws.
    pub fn redraw_frame(&mut self, surface: &mut dyn Surface) -> FrameReport {
        let viewport = surface.bounds().expand(self.config.viewport_margin);
        let mut report = FrameReport {
            frame: self.frame,
            edges_added: self.link_movers(),
            ..FrameReport::default()
        };

        let mut schedule: Vec<DrawableId> = Vec::with_capacity(self.live_set.len() * 2);

        for stale in self.pending_erase.drain(..) {
            surface.fill_rect(stale, self.config.background);
            report.erased.push(stale);
        }
        schedule.append(&mut self.pending_repaint);

        for index in 0..self.live_set.len() {
            let id = self.live_set[index];
            let Some(tracked) = self.tracked.get_mut(&id) else {
                continue;
            };
            let drawable = &mut tracked.drawable;
            let rect = drawable.rect();
            let on_screen = rect.collides(&viewport);

            if !on_screen {
                // A footprint left behind on screen still has to go.
                let stale_on_screen = drawable
                    .last_drawn_rect()
                    .is_some_and(|stale| stale.collides(&viewport));
                if !stale_on_screen {
                    report.skipped.push(id);
                    continue;
                }
            }

            let visible = drawable.is_visible();
            if let Some(stale) = drawable.last_drawn_rect() {
                surface.fill_rect(stale, self.config.background);
                report.erased.push(stale);
                // Kept until the render replaces it, so a failed render still
                // gets erased next frame.
                if !(visible && on_screen) {
                    drawable.forget_footprint();
                }
            }

            let neighbors = self.graph.neighbors(id).map(<[_]>::to_vec).unwrap_or_default();
            for neighbor in neighbors {
                schedule.push(neighbor);

                let still_colliding = self
                    .tracked
                    .get(&neighbor)
                    .is_some_and(|t| t.drawable.rect().collides(&rect));
                if !still_colliding && self.graph.unlink(id, neighbor) {
                    tracing::trace!(%id, %neighbor, "collision edge dropped");
                    report.edges_removed += 1;
                }
            }

            if visible && on_screen {
                schedule.push(id);
            }
        }

        for id in dedup_keep_last(schedule) {
            let Some(tracked) = self.tracked.get_mut(&id) else {
                continue;
            };
            if !tracked.drawable.is_visible() {
                continue;
            }
            match tracked.drawable.render_now(surface) {
                Ok(()) => report.rendered.push(id),
                Err(error) => {
                    // The callback may have drawn part of itself first.
                    let rect = tracked.drawable.rect();
                    tracked.drawable.mark_footprint(rect);
                    tracing::warn!(%id, %error, "render callback failed");
                    report.failures.push(RenderFailure { id, error });
                }
            }
        }

        tracing::trace!(
            frame = self.frame,
            erased = report.erased.len(),
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            "frame redrawn"
        );

        self.frame += 1;
        self.debug_validate();
        report
    }

    /// Links every drawable whose rect changed since its edges were computed
    /// to any tracked drawable it now collides with.
    ///
    /// Separations are handled by the scan in `redraw_frame`; this only adds.
    fn link_movers(&mut self) -> usize {
        let movers: Vec<(DrawableId, Rect)> = self
            .live_set
            .iter()
            .filter_map(|id| {
                let tracked = self.tracked.get(id)?;
                let rect = tracked.drawable.rect();
                (rect != tracked.indexed_rect).then_some((*id, rect))
            })
            .collect();

        let mut added = 0;
        for (id, rect) in movers {
            for index in 0..self.live_set.len() {
                let other = self.live_set[index];
                if other == id {
                    continue;
                }
                let collides = self
                    .tracked
                    .get(&other)
                    .is_some_and(|t| t.drawable.rect().collides(&rect));
                if collides && self.graph.link(id, other) {
                    tracing::trace!(%id, %other, "collision edge discovered");
                    added += 1;
                }
            }
            if let Some(tracked) = self.tracked.get_mut(&id) {
                tracked.indexed_rect = rect;
            }
        }
        added
    }

    fn debug_validate(&self) {
        debug_assert!(
            self.live_set.iter().all(|id| self.graph.contains(*id)),
            "live set and collision graph disagree"
        );
        if cfg!(debug_assertions) {
            if let Err(error) = self.validate() {
                panic!("collision graph invariant violated: {error}");
            }
        }
    }
}

impl Default for RedrawManager {
    fn default() -> Self {
        Self::new(RedrawConfig::default())
    }
}

/// Removes duplicates, keeping each ID at its last position.
///
/// For opaque draws the final pixels match drawing every duplicate, since the
/// last draw of each drawable is what survives. Stacking therefore follows the
/// order drawables were last scheduled in, not registration order: a drawable
/// rescheduled by a later neighbor paints over everything scheduled before it.
fn dedup_keep_last(schedule: Vec<DrawableId>) -> Vec<DrawableId> {
    let mut seen = HashSet::with_capacity(schedule.len());
    let mut order: Vec<DrawableId> = schedule
        .into_iter()
        .rev()
        .filter(|id| seen.insert(*id))
        .collect();
    order.reverse();
    order
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::surface::{PixelSurface, RecordingSurface, SurfaceOp};

    /// A drawable that fills its rect with `color` and logs its renders.
    fn tile(rect: Rect, color: Color, log: &Rc<RefCell<Vec<Rect>>>) -> Drawable {
        let log = Rc::clone(log);
        Drawable::with_render(rect, move |surface, rect| {
            surface.fill_rect(rect, color);
            log.borrow_mut().push(rect);
            Ok(())
        })
    }

    fn set(manager: &RedrawManager, id: DrawableId) -> Vec<DrawableId> {
        manager.collision_set(id).map(<[_]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn test_add_builds_symmetric_sets() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();

        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), Color::WHITE, &log),
        ]);
        let (a, b) = (ids[0], ids[1]);

        assert_eq!(set(&manager, a), vec![b]);
        assert_eq!(set(&manager, b), vec![a]);
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn test_remove_prunes_and_ignores_untracked() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), Color::WHITE, &log),
            tile(Rect::new(8, 8, 10, 10), Color::WHITE, &log),
        ]);

        let removed = manager.remove([ids[1], DrawableId::new(999)]);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].rect(), Rect::new(5, 5, 10, 10));

        assert_eq!(manager.ids(), &[ids[0], ids[2]]);
        assert_eq!(set(&manager, ids[0]), vec![ids[2]]);
        assert_eq!(set(&manager, ids[2]), vec![ids[0]]);
        assert!(manager.collision_set(ids[1]).is_none());
        assert!(manager.validate().is_ok());

        // Removing twice is a no-op.
        assert!(manager.remove_one(ids[1]).is_none());
    }

    #[test]
    fn test_removed_drawable_can_be_readded() {
        let mut manager = RedrawManager::default();
        let first = manager.add_one(Drawable::new(Rect::new(0, 0, 10, 10)));
        let drawable = manager.remove_one(first).expect("tracked");

        let second = manager.add_one(drawable);
        assert_ne!(first, second);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_separation_updates_graph_and_erases_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(200, 200);

        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), Color::WHITE, &log),
        ]);
        let (a, b) = (ids[0], ids[1]);

        manager.redraw_frame(&mut surface);
        surface.clear();

        manager
            .get_mut(b)
            .expect("tracked")
            .set_rect(Rect::new(100, 100, 10, 10));
        let report = manager.redraw_frame(&mut surface);

        assert!(set(&manager, a).is_empty());
        assert!(set(&manager, b).is_empty());
        assert_eq!(report.edges_removed, 1);
        assert_eq!(surface.fills_of(Rect::new(0, 0, 10, 10)), 2); // erase + redraw of A
        assert_eq!(surface.fills_of(Rect::new(5, 5, 10, 10)), 1); // B's stale footprint
        assert_eq!(report.erased, vec![Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10)]);
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn test_erase_precedes_render() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        let id = manager.add_one(tile(Rect::new(10, 10, 5, 5), Color::WHITE, &log));
        manager.redraw_frame(&mut surface);
        surface.clear();

        manager.get_mut(id).expect("tracked").move_to(12, 12);
        manager.redraw_frame(&mut surface);

        let ops = surface.ops();
        let erase = ops
            .iter()
            .position(|op| *op == SurfaceOp::Fill { rect: Rect::new(10, 10, 5, 5), color: Color::BLACK })
            .expect("stale footprint erased");
        let draw = ops
            .iter()
            .position(|op| *op == SurfaceOp::Fill { rect: Rect::new(12, 12, 5, 5), color: Color::WHITE })
            .expect("redrawn at new position");
        assert!(erase < draw);
    }

    #[test]
    fn test_off_screen_drawable_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        let far = manager.add_one(tile(Rect::new(500, 500, 10, 10), Color::WHITE, &log));
        let report = manager.redraw_frame(&mut surface);

        assert_eq!(report.skipped, vec![far]);
        assert!(surface.ops().is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_margin_keeps_edge_straddlers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        // Entirely off-surface but inside the 50px margin.
        let near = manager.add_one(tile(Rect::new(120, 20, 10, 10), Color::WHITE, &log));
        let report = manager.redraw_frame(&mut surface);

        assert_eq!(report.rendered, vec![near]);
    }

    #[test]
    fn test_leaving_viewport_erases_stale_footprint() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        let id = manager.add_one(tile(Rect::new(10, 10, 10, 10), Color::WHITE, &log));
        manager.redraw_frame(&mut surface);
        surface.clear();

        manager.get_mut(id).expect("tracked").move_to(1000, 1000);
        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.erased, vec![Rect::new(10, 10, 10, 10)]);
        assert!(report.rendered.is_empty());

        // Once erased, it is skipped outright.
        surface.clear();
        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.skipped, vec![id]);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_invisible_is_erased_not_rendered() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        let id = manager.add_one(tile(Rect::new(10, 10, 10, 10), Color::WHITE, &log));
        manager.redraw_frame(&mut surface);
        manager.get_mut(id).expect("tracked").set_visible(false);
        log.borrow_mut().clear();
        surface.clear();

        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.erased, vec![Rect::new(10, 10, 10, 10)]);
        assert!(report.rendered.is_empty());
        assert!(log.borrow().is_empty());

        // Nothing left to erase on later frames.
        let report = manager.redraw_frame(&mut surface);
        assert!(report.erased.is_empty());
    }

    #[test]
    fn test_visibility_toggle_is_idempotent() {
        let build = || {
            let log = Rc::new(RefCell::new(Vec::new()));
            let mut manager = RedrawManager::default();
            let ids = manager.add([
                tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
                tile(Rect::new(5, 5, 10, 10), Color::WHITE, &log),
            ]);
            (manager, ids)
        };

        let (mut plain, _) = build();
        let (mut toggled, ids) = build();
        let drawable = toggled.get_mut(ids[1]).expect("tracked");
        drawable.set_visible(false);
        drawable.set_visible(true);

        let mut s1 = RecordingSurface::new(100, 100);
        let mut s2 = RecordingSurface::new(100, 100);
        assert_eq!(
            plain.redraw_frame(&mut s1).rendered,
            toggled.redraw_frame(&mut s2).rendered
        );
        assert_eq!(s1.ops(), s2.ops());
    }

    #[test]
    fn test_schedule_is_deduplicated() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), Color::WHITE, &log),
            tile(Rect::new(8, 0, 10, 10), Color::WHITE, &log),
        ]);
        let report = manager.redraw_frame(&mut surface);

        assert_eq!(report.rendered, ids);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_moving_onto_neighbor_links_and_avoids_ghosting() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = PixelSurface::new(100, 100, Color::BLACK);
        let red = Color::rgb(255, 0, 0);
        let green = Color::rgb(0, 255, 0);

        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), red, &log),
            tile(Rect::new(40, 40, 10, 10), green, &log),
        ]);
        let (a, b) = (ids[0], ids[1]);
        manager.redraw_frame(&mut surface);
        assert!(manager.collision_set(a).is_some_and(<[_]>::is_empty));

        // B slides onto A: the edge appears.
        manager.get_mut(b).expect("tracked").move_to(5, 5);
        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.edges_added, 1);
        assert_eq!(set(&manager, a), vec![b]);

        // B leaves again: A is redrawn over B's erased footprint.
        manager.get_mut(b).expect("tracked").move_to(60, 60);
        manager.redraw_frame(&mut surface);

        assert!(surface.region_is(Rect::new(0, 0, 10, 10), red));
        assert!(surface.region_is(Rect::new(60, 60, 10, 10), green));
        assert!(surface.region_is(Rect::new(10, 10, 5, 5), Color::BLACK));
        assert!(surface.region_is(Rect::new(40, 40, 10, 10), Color::BLACK));
    }

    #[test]
    fn test_failing_render_does_not_abort_frame() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = RecordingSurface::new(100, 100);

        let broken = manager.add_one(Drawable::with_render(Rect::new(0, 0, 5, 5), |_, _| {
            Err(RenderError::MissingAsset("font.ttf".into()))
        }));
        let fine = manager.add_one(tile(Rect::new(20, 20, 5, 5), Color::WHITE, &log));

        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.rendered, vec![fine]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, broken);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_z_order_follows_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = PixelSurface::new(50, 50, Color::BLACK);
        let top = Color::rgb(0, 0, 255);

        manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), top, &log),
        ]);
        manager.redraw_frame(&mut surface);
        manager.redraw_frame(&mut surface);

        assert_eq!(surface.pixel(7, 7), Some(top));
    }

    #[test]
    fn test_stacking_follows_last_schedule() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = PixelSurface::new(50, 50, Color::BLACK);
        let blue = Color::rgb(0, 0, 255);

        // C overlaps only A, so A is rescheduled after B.
        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), blue, &log),
            tile(Rect::new(-5, -5, 6, 6), Color::ROSE, &log),
        ]);
        let report = manager.redraw_frame(&mut surface);

        assert_eq!(report.rendered, vec![ids[1], ids[0], ids[2]]);
        assert_eq!(surface.pixel(7, 7), Some(Color::WHITE));
    }

    #[test]
    fn test_failed_render_is_erased_next_frame() {
        let mut manager = RedrawManager::default();
        let mut surface = PixelSurface::new(100, 100, Color::BLACK);
        let failing = Rc::new(RefCell::new(false));

        let flag = Rc::clone(&failing);
        let id = manager.add_one(Drawable::with_render(Rect::new(30, 30, 5, 5), move |surface, rect| {
            surface.fill_rect(rect, Color::WHITE);
            if *flag.borrow() {
                return Err(RenderError::failed("half drawn"));
            }
            Ok(())
        }));
        manager.redraw_frame(&mut surface);

        *failing.borrow_mut() = true;
        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            manager.get(id).and_then(Drawable::last_drawn_rect),
            Some(Rect::new(30, 30, 5, 5))
        );

        *failing.borrow_mut() = false;
        manager.get_mut(id).expect("tracked").move_to(60, 60);
        let report = manager.redraw_frame(&mut surface);

        assert_eq!(report.erased, vec![Rect::new(30, 30, 5, 5)]);
        assert!(surface.region_is(Rect::new(30, 30, 5, 5), Color::BLACK));
        assert!(surface.region_is(Rect::new(60, 60, 5, 5), Color::WHITE));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::new(RedrawConfig {
            viewport_margin: i32::MAX,
            ..RedrawConfig::default()
        });
        let mut surface = RecordingSurface::new(100, 100);

        let near = manager.add_one(tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log));
        let far = manager.add_one(tile(Rect::new(i32::MAX - 5, 0, 10, 10), Color::WHITE, &log));
        let low = manager.add_one(tile(Rect::new(i32::MIN, i32::MIN, 10, 10), Color::WHITE, &log));
        assert!(set(&manager, near).is_empty());

        manager.get_mut(far).expect("tracked").move_by(i32::MAX, 0);
        manager.get_mut(low).expect("tracked").move_by(i32::MIN, i32::MIN);
        let report = manager.redraw_frame(&mut surface);

        assert!(report.is_clean());
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn test_retire_erases_footprint_and_repaints_neighbors() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let mut surface = PixelSurface::new(100, 100, Color::BLACK);
        let blue = Color::rgb(0, 0, 255);

        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), blue, &log),
        ]);
        manager.redraw_frame(&mut surface);

        let retired = manager.retire_one(ids[1]).expect("tracked");
        assert_eq!(retired.rect(), Rect::new(5, 5, 10, 10));
        assert!(manager.retire_one(ids[1]).is_none());

        let report = manager.redraw_frame(&mut surface);
        assert_eq!(report.erased[0], Rect::new(5, 5, 10, 10));
        assert!(surface.region_is(Rect::new(0, 0, 10, 10), Color::WHITE));
        assert!(surface.region_is(Rect::new(10, 10, 5, 5), Color::BLACK));
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn test_clear_drops_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = RedrawManager::default();
        let ids = manager.add([
            tile(Rect::new(0, 0, 10, 10), Color::WHITE, &log),
            tile(Rect::new(5, 5, 10, 10), Color::WHITE, &log),
        ]);

        let dropped = manager.clear();
        assert_eq!(dropped.len(), 2);
        assert!(manager.is_empty());
        assert_eq!(manager.edge_count(), 0);
        assert!(!manager.contains(ids[0]));

        // IDs are not reused.
        let next = manager.add_one(tile(Rect::new(0, 0, 1, 1), Color::WHITE, &log));
        assert!(!ids.contains(&next));
    }

    #[test]
    fn test_dedup_keep_last() {
        let id = DrawableId::new;
        assert_eq!(
            dedup_keep_last(vec![id(2), id(1), id(1), id(2)]),
            vec![id(1), id(2)]
        );
    }
}
