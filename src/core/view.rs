use crate::{
    animation::{AnimationFrame, Easing, ZoomAnimator},
    core::{
        config::{InteractionOptions, InteractionProfile, ViewOptions},
        constants::{DEFAULT_RESOLUTION, EPSILON},
        envelope::Envelope,
        geo::Point,
        resolutions::{derive_from_box, ResolutionLadder},
        viewport::Viewport,
    },
    input::{
        events::{EventManager, InputEvent, ViewEvent},
        gestures::{Action, GestureContext, GestureController},
    },
    layers::{FeatureInfoMap, FeatureInfoReply, Layer, LayerManager},
    rendering::Renderer,
    runtime::{DispatchHandle, DispatchQueue},
    spatial::{HitTestResult, HitTester},
    DataFetchError, Result,
};
use std::{sync::Arc, time::Duration};

/// Interactive map view.
///
/// Owns the viewport, the gesture and animation state, and the layers. All
/// methods must be called from one interaction thread; other threads reach
/// the controller through [`ViewController::dispatch_handle`].
///
/// Notifications are queued and delivered by [`ViewController::process_events`].
pub struct ViewController {
    viewport: Viewport,
    options: ViewOptions,
    interaction: InteractionOptions,
    layers: LayerManager,
    gestures: GestureController,
    animator: ZoomAnimator,
    hit_tester: HitTester,
    /// Resolution the running ladder zoom is heading to
    zoom_target: Option<f64>,
    event_manager: EventManager,
    dispatch: DispatchQueue,
    envelope_override: Option<Envelope>,
    /// Layers queried on hover; `None` means every visible layer
    hover_layers: Option<Vec<String>>,
    /// Layers queried on release; `None` means every visible layer
    info_layers: Option<Vec<String>>,
    error_message: Option<String>,
    invalid: bool,
    viewport_initialized: bool,
    hover_active: bool,
}

impl ViewController {
    pub fn new(options: ViewOptions) -> Self {
        let interaction = options.interaction.resolve();
        Self {
            viewport: Viewport::new(),
            gestures: GestureController::new(interaction.gestures.clone()),
            animator: ZoomAnimator::with_easing(interaction.animation.zoom_easing),
            hit_tester: HitTester::new(interaction.hit_test.tolerance_pixels),
            interaction,
            options,
            layers: LayerManager::new(),
            zoom_target: None,
            event_manager: EventManager::new(),
            dispatch: DispatchQueue::new(),
            envelope_override: None,
            hover_layers: None,
            info_layers: None,
            error_message: None,
            invalid: true,
            viewport_initialized: false,
            hover_active: false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn interaction(&self) -> &InteractionOptions {
        &self.interaction
    }

    /// Switches the interaction profile; a running animation keeps its easing
    pub fn set_interaction_profile(&mut self, profile: InteractionProfile) {
        self.interaction = profile.resolve();
        self.gestures.set_config(self.interaction.gestures.clone());
        self.animator.set_easing(self.interaction.animation.zoom_easing);
        self.hit_tester = HitTester::new(self.interaction.hit_test.tolerance_pixels);
        self.options.interaction = profile;
    }

    pub fn set_zoom_easing<E: Easing + 'static>(&mut self, easing: E) {
        self.animator.set_easing(easing);
    }

    pub fn resolutions(&self) -> &ResolutionLadder {
        &self.options.resolutions
    }

    pub fn set_resolutions(&mut self, resolutions: ResolutionLadder) {
        self.options.resolutions = resolutions;
    }

    // --- layers ----------------------------------------------------------------------------

    pub fn add_layer(&mut self, layer: Arc<dyn Layer>) -> Result<()> {
        self.layers.add_layer(layer)?;
        self.try_initialize();
        self.invalidate();
        Ok(())
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Arc<dyn Layer>> {
        let removed = self.layers.remove_layer(name);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    /// Restricts hover hit testing (`MouseInfoOver`) to the named layers.
    /// Priority follows layer order, not the order of `names`.
    pub fn set_hover_layers(&mut self, names: Option<Vec<String>>) {
        self.hover_layers = names;
    }

    pub fn hover_layers(&self) -> Option<&[String]> {
        self.hover_layers.as_deref()
    }

    /// Restricts release hit testing (`MouseInfoUp`) to the named layers
    pub fn set_info_layers(&mut self, names: Option<Vec<String>>) {
        self.info_layers = names;
    }

    pub fn info_layers(&self) -> Option<&[String]> {
        self.info_layers.as_deref()
    }

    fn queryable_layers(&self, names: Option<&[String]>) -> Vec<Arc<dyn Layer>> {
        match names {
            Some(names) => self.layers.visible_layers_named(names),
            None => self.layers.visible_layers(),
        }
    }

    /// Data extent: the explicit override if set, otherwise the union of
    /// the layer envelopes
    pub fn envelope(&self) -> Option<Envelope> {
        self.envelope_override
            .or_else(|| self.layers.envelope())
            .filter(Envelope::is_initialized)
    }

    pub fn set_envelope(&mut self, envelope: Option<Envelope>) {
        self.envelope_override = envelope;
        self.try_initialize();
    }

    // --- lifecycle -------------------------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.viewport_initialized
    }

    /// Seeds center and resolution from the envelope once the surface has a
    /// size. Safe to call repeatedly; returns whether the view is initialized.
    pub fn try_initialize(&mut self) -> bool {
        if self.viewport_initialized {
            return true;
        }
        let width = self.viewport.width;
        if !width.is_finite() || width <= 0.0 {
            return false;
        }

        if !self.viewport.resolution().is_finite() || !self.viewport.center.is_finite() {
            let Some(envelope) = self.envelope() else {
                return false;
            };
            if !self.viewport.resolution().is_finite() {
                let resolution = if envelope.width().abs() > EPSILON {
                    envelope.width() / width
                } else {
                    // No data extent yet; start at a neutral scale
                    DEFAULT_RESOLUTION
                };
                self.viewport.set_resolution(resolution);
            }
            if !self.viewport.center.is_finite() {
                self.viewport.set_center(envelope.centroid());
            }
        }

        self.viewport.render_multiplier = 1.0;
        self.viewport_initialized = true;
        log::debug!(
            "Viewport initialized at {:?}, resolution {}",
            self.viewport.center,
            self.viewport.resolution()
        );
        self.event_manager.emit(ViewEvent::ViewportInitialized {
            viewport: self.viewport,
        });
        self.invalidate();
        true
    }

    /// Surface size changed. Interrupts a running zoom animation until the
    /// next tick.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
        self.try_initialize();
        self.animator.pause();
        self.refresh();
    }

    // --- navigation ------------------------------------------------------------------------

    pub fn zoom_locked(&self) -> bool {
        self.options.zoom_locked
    }

    pub fn set_zoom_locked(&mut self, locked: bool) {
        self.options.zoom_locked = locked;
    }

    /// Resolution the pending ladder zoom is heading to, if any
    pub fn zoom_target(&self) -> Option<f64> {
        self.zoom_target
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// One ladder step finer, anchored at the surface middle
    pub fn zoom_in(&mut self) {
        self.zoom_step(true);
    }

    /// One ladder step coarser, anchored at the surface middle
    pub fn zoom_out(&mut self) {
        self.zoom_step(false);
    }

    fn zoom_step(&mut self, zoom_in: bool) {
        if self.options.zoom_locked || !self.viewport.is_initialized() {
            return;
        }
        let base = self.zoom_target.unwrap_or_else(|| self.viewport.resolution());
        let target = if zoom_in {
            self.options.resolutions.zoom_in(base)
        } else {
            self.options.resolutions.zoom_out(base)
        };
        if target == base {
            return;
        }
        let middle = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        self.start_zoom(target, middle);
    }

    /// Fits the world box spanned by two corners. Boxes without area are
    /// ignored; the resulting resolution is clipped to the ladder.
    pub fn zoom_to_box(&mut self, begin: Point, end: Point) -> bool {
        if !begin.is_finite() || !end.is_finite() {
            return false;
        }
        if (end.x - begin.x).abs() <= 0.0 || (end.y - begin.y).abs() <= 0.0 {
            log::debug!("Ignoring zoom to empty box {:?} {:?}", begin, end);
            return false;
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return false;
        }

        let (x, y, resolution) = derive_from_box(
            begin.x,
            begin.y,
            end.x,
            end.y,
            self.viewport.width,
            self.viewport.height,
        );
        let resolution = self.options.resolutions.clip_to_extremes(resolution);

        self.animator.stop();
        self.zoom_target = None;
        self.viewport.set_center(Point::new(x, y));
        self.viewport.set_resolution(resolution);
        self.try_initialize();
        self.emit_view_changed(true);
        self.invalidate();
        true
    }

    /// Shows the whole data envelope. An envelope without area (a single
    /// point) cannot be fitted and leaves the view untouched.
    pub fn zoom_to_full_extent(&mut self) -> bool {
        let Some(envelope) = self.envelope() else {
            return false;
        };
        let (width, height) = (self.viewport.width, self.viewport.height);
        if !(width > 0.0 && height > 0.0) {
            return false;
        }

        let resolution = (envelope.width() / width).max(envelope.height() / height);
        if !(resolution.is_finite() && resolution > 0.0) {
            log::debug!("Ignoring full extent of degenerate envelope {:?}", envelope);
            return false;
        }
        self.animator.stop();
        self.zoom_target = None;
        self.viewport.set_resolution(resolution);
        self.viewport.set_center(envelope.centroid());
        self.try_initialize();
        self.emit_view_changed(false);
        self.invalidate();
        true
    }

    /// Pans by a screen-space delta
    pub fn pan(&mut self, delta: Point) -> bool {
        if !self.viewport.pan_by(delta) {
            return false;
        }
        self.emit_view_changed(false);
        self.invalidate();
        true
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            return;
        }
        self.viewport.set_rotation(degrees);
        self.emit_view_changed(false);
        self.invalidate();
    }

    fn start_zoom(&mut self, target: f64, anchor: Point) {
        self.zoom_target = Some(target);
        let duration = self.interaction.animation.zoom_duration();
        if duration.is_zero() {
            self.animator.stop();
            self.zoom_target = None;
            self.apply_resolution(target, anchor);
        } else {
            self.animator
                .start(self.viewport.resolution(), target, duration, anchor);
        }
    }

    fn apply_resolution(&mut self, resolution: f64, anchor: Point) -> bool {
        let resolution = self.options.resolutions.clip_to_extremes(resolution);
        let scale = self.viewport.resolution() / resolution;
        if !self.viewport.transform(anchor, anchor, scale) {
            return false;
        }
        // Pin the exact value; res / (res / r) can be off by an ulp
        self.viewport.set_resolution(resolution);
        self.emit_view_changed(false);
        self.invalidate();
        true
    }

    fn apply_frame(&mut self, frame: AnimationFrame) {
        self.apply_resolution(frame.resolution, frame.anchor);
        if frame.finished {
            log::trace!("Zoom animation finished at {}", frame.resolution);
            self.zoom_target = None;
        }
    }

    // --- input -----------------------------------------------------------------------------

    /// Arms the one-shot box-zoom mode: the next drag selects a zoom box
    pub fn set_zoom_to_box_mode(&mut self, enabled: bool) {
        self.gestures.set_box_zoom_mode(enabled);
    }

    pub fn is_box_zoom_mode(&self) -> bool {
        self.gestures.is_box_zoom_mode()
    }

    /// Screen rectangle of the box selection being dragged, for drawing
    pub fn box_selection(&self) -> Option<Envelope> {
        self.gestures.box_selection()
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn handle_input(&mut self, input: InputEvent) {
        if let InputEvent::Resize { width, height } = input {
            self.resize(width, height);
            return;
        }

        let ctx = GestureContext {
            viewport: &self.viewport,
            resolutions: &self.options.resolutions,
            zoom_target: self.zoom_target,
            zoom_locked: self.options.zoom_locked,
        };
        let actions = self.gestures.handle_event(&input, &ctx);

        for action in actions {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Transform {
                current,
                previous,
                delta_scale,
            } => {
                if self.viewport.transform(current, previous, delta_scale) {
                    self.emit_view_changed(true);
                    self.invalidate();
                }
            }
            Action::Hover(position) => self.update_hover(position),
            Action::Released { position, click } => {
                if click && self.event_manager.has_listeners("featureinfo") {
                    self.request_feature_info(position);
                }
                let result = self.info_hit_test(position);
                self.event_manager.emit(ViewEvent::MouseInfoUp { result });
                self.emit_view_changed(true);
            }
            Action::ZoomToBox { begin, end } => {
                if !self.viewport.is_initialized() {
                    return;
                }
                let begin = self.viewport.screen_to_world(begin);
                let end = self.viewport.screen_to_world(end);
                self.zoom_to_box(begin, end);
            }
            Action::AnimateZoom { target, anchor } => self.start_zoom(target, anchor),
            Action::Refresh => self.refresh(),
            Action::Leave => {
                if self.hover_active {
                    self.hover_active = false;
                    self.event_manager.emit(ViewEvent::MouseInfoLeave);
                }
            }
        }
    }

    // --- hit testing -----------------------------------------------------------------------

    /// Nearest feature under a screen position across `layers`, in order
    pub fn hit_test(&self, screen_point: Point, layers: &[Arc<dyn Layer>]) -> Option<HitTestResult> {
        let envelope = self.envelope().unwrap_or_else(Envelope::empty);
        self.hit_tester
            .find_nearest(screen_point, layers, &self.viewport, &envelope)
    }

    /// Hit test against the release (info) layers
    pub fn info_hit_test(&self, screen_point: Point) -> Option<HitTestResult> {
        let layers = self.queryable_layers(self.info_layers.as_deref());
        self.hit_test(screen_point, &layers)
    }

    /// Hit test against the hover layers
    pub fn hover_hit_test(&self, screen_point: Point) -> Option<HitTestResult> {
        let layers = self.queryable_layers(self.hover_layers.as_deref());
        self.hit_test(screen_point, &layers)
    }

    fn update_hover(&mut self, position: Point) {
        match self.hover_hit_test(position) {
            Some(HitTestResult {
                layer_name,
                feature,
            }) => {
                self.hover_active = true;
                self.event_manager
                    .emit(ViewEvent::MouseInfoOver { layer_name, feature });
            }
            None if self.hover_active => {
                self.hover_active = false;
                self.event_manager.emit(ViewEvent::MouseInfoLeave);
            }
            None => {}
        }
    }

    /// Asks every layer with a feature-info source about `position`.
    /// Replies arrive as [`ViewEvent::FeatureInfo`] after a dispatch drain.
    pub fn request_feature_info(&self, position: Point) {
        for layer in self.layers.layers() {
            if let Some(source) = layer.feature_info_source() {
                let reply = FeatureInfoReply::new(layer.name().to_string(), self.dispatch.handle());
                source.request_feature_info(&self.viewport, position, reply);
            }
        }
    }

    pub fn deliver_feature_info(&mut self, info: FeatureInfoMap) {
        self.event_manager.emit(ViewEvent::FeatureInfo(info));
    }

    // --- data and errors -------------------------------------------------------------------

    /// Outcome of an asynchronous data load. Failures become the current
    /// error message; success schedules a redraw.
    pub fn data_changed(&mut self, result: std::result::Result<(), DataFetchError>) {
        match result {
            Ok(()) => self.invalidate(),
            Err(error) => {
                let message = error.to_string();
                log::warn!("Data fetch failed: {}", message);
                self.error_message = Some(message.clone());
                self.event_manager
                    .emit(ViewEvent::ErrorMessageChanged(message));
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // --- frame loop ------------------------------------------------------------------------

    pub fn dispatch_handle(&self) -> DispatchHandle {
        self.dispatch.handle()
    }

    /// Runs every task posted from other threads; returns how many ran
    pub fn drain_dispatch(&mut self) -> usize {
        let tasks = self.dispatch.take_pending();
        let count = tasks.len();
        for task in tasks {
            task(self);
        }
        count
    }

    /// Paint-tick housekeeping: retries initialization, runs posted tasks
    /// and advances the zoom animation by one step.
    pub fn tick(&mut self, delta: Duration) {
        self.try_initialize();
        self.drain_dispatch();

        if !self.viewport.is_initialized() {
            return;
        }
        if let Some(frame) = self.animator.advance(delta) {
            self.apply_frame(frame);
        }
    }

    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalid
    }

    /// Forces a redraw and tells listeners the view may have changed
    pub fn refresh(&mut self) {
        self.emit_view_changed(false);
        self.invalidate();
    }

    /// Draws through `renderer` when initialized and something changed.
    /// Returns whether a frame was drawn.
    pub fn render_frame<R: Renderer>(&mut self, renderer: &mut R, surface: &mut R::Surface) -> bool {
        if !self.try_initialize() || !self.invalid {
            return false;
        }
        let layers = self.layers.visible_layers();
        renderer.render(surface, &self.viewport, &layers, self.options.background);
        self.invalid = false;
        true
    }

    // --- events ----------------------------------------------------------------------------

    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&ViewEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn off(&mut self, event_type: &str) {
        self.event_manager.off(event_type);
    }

    pub fn process_events(&mut self) -> Vec<ViewEvent> {
        self.event_manager.process_events()
    }

    fn emit_view_changed(&mut self, user_action: bool) {
        if !self.viewport_initialized {
            return;
        }
        self.event_manager.emit(ViewEvent::ViewChanged {
            viewport: self.viewport,
            user_action,
        });
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(ViewOptions::default())
    }
}

impl std::fmt::Debug for ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("viewport", &self.viewport)
            .field("zoom_target", &self.zoom_target)
            .field("layers", &self.layers)
            .field("gestures", &self.gestures.state())
            .field("animating", &self.animator.is_animating())
            .field("initialized", &self.viewport_initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{Feature, MemoryLayer};

    const EPS: f64 = 1e-9;

    fn options() -> ViewOptions {
        ViewOptions {
            resolutions: ResolutionLadder::new(vec![1.0, 2.0, 4.0, 8.0, 16.0]).unwrap(),
            ..ViewOptions::default()
        }
    }

    /// 100x100 surface over a 400x400 envelope centered at the origin: resolution 4
    fn view() -> ViewController {
        let mut view = ViewController::new(options());
        view.set_envelope(Some(Envelope::from_coords(-200.0, -200.0, 200.0, 200.0)));
        view.resize(100.0, 100.0);
        view.process_events();
        view
    }

    #[test]
    fn test_initializes_from_envelope_once_sized() {
        let mut view = ViewController::new(options());
        view.set_envelope(Some(Envelope::from_coords(0.0, 0.0, 300.0, 100.0)));
        assert!(!view.is_initialized());

        view.resize(150.0, 50.0);
        assert!(view.is_initialized());
        assert_eq!(view.viewport().resolution(), 2.0);
        assert_eq!(view.viewport().center, Point::new(150.0, 50.0));

        let events = view.process_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ViewEvent::ViewportInitialized { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_zero_width_envelope_uses_default_resolution() {
        let mut view = ViewController::new(options());
        view.set_envelope(Some(Envelope::from_coords(5.0, 5.0, 5.0, 5.0)));
        view.resize(100.0, 100.0);
        assert_eq!(view.viewport().resolution(), DEFAULT_RESOLUTION);
        assert_eq!(view.viewport().center, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_uninitialized_until_envelope_known() {
        let mut view = ViewController::new(options());
        view.resize(100.0, 100.0);
        assert!(!view.is_initialized());
        view.zoom_in();
        view.tick(Duration::from_millis(16));
        assert!(!view.viewport().is_initialized());

        view.add_layer(Arc::new(MemoryLayer::with_features(
            "poi",
            vec![Feature::point("a", 0.0, 0.0), Feature::point("b", 200.0, 0.0)],
        )))
        .unwrap();
        assert!(view.is_initialized());
        assert_eq!(view.viewport().resolution(), 2.0);
    }

    #[test]
    fn test_zoom_in_animates_to_next_step() {
        let mut view = view();
        view.zoom_in();
        assert_eq!(view.zoom_target(), Some(2.0));

        view.tick(Duration::from_millis(500));
        let mid = view.viewport().resolution();
        assert!(mid < 4.0 && mid > 2.0);

        view.tick(Duration::from_millis(500));
        assert!((view.viewport().resolution() - 2.0).abs() < EPS);
        assert_eq!(view.zoom_target(), None);
        // Anchored at the middle
        assert!(view.viewport().center.distance_to(&Point::new(0.0, 0.0)) < EPS);
    }

    #[test]
    fn test_repeated_zoom_in_chains_from_target() {
        let mut view = view();
        view.zoom_in();
        view.zoom_in();
        assert_eq!(view.zoom_target(), Some(1.0));
        view.zoom_in();
        assert_eq!(view.zoom_target(), Some(1.0));
    }

    #[test]
    fn test_zoom_locked_blocks_steps() {
        let mut view = view();
        view.set_zoom_locked(true);
        view.zoom_in();
        view.zoom_out();
        assert_eq!(view.zoom_target(), None);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_instant_profile_jumps() {
        let mut view = view();
        view.set_interaction_profile(InteractionProfile::Instant);
        view.zoom_out();
        assert_eq!(view.viewport().resolution(), 8.0);
        assert_eq!(view.zoom_target(), None);
    }

    #[test]
    fn test_zoom_to_box_clips_to_ladder() {
        let mut view = view();
        assert!(view.zoom_to_box(Point::new(0.0, 0.0), Point::new(10.0, 5.0)));
        assert_eq!(view.viewport().resolution(), 1.0);
        assert_eq!(view.viewport().center, Point::new(5.0, 2.5));
    }

    #[test]
    fn test_zoom_to_degenerate_box_is_ignored() {
        let mut view = view();
        let before = *view.viewport();
        assert!(!view.zoom_to_box(Point::new(3.0, 0.0), Point::new(3.0, 50.0)));
        assert_eq!(*view.viewport(), before);
        assert!(view.process_events().is_empty());
    }

    #[test]
    fn test_zoom_to_box_cancels_animation() {
        let mut view = view();
        view.zoom_out();
        assert!(view.is_animating());
        view.zoom_to_box(Point::new(0.0, 0.0), Point::new(200.0, 100.0));
        assert!(!view.is_animating());
        assert_eq!(view.zoom_target(), None);
        assert_eq!(view.viewport().resolution(), 2.0);
    }

    #[test]
    fn test_zoom_to_full_extent() {
        let mut view = view();
        view.zoom_to_box(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(view.zoom_to_full_extent());
        assert_eq!(view.viewport().resolution(), 4.0);
        assert_eq!(view.viewport().center, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_full_extent_of_point_envelope_is_ignored() {
        let mut view = view();
        view.pan(Point::new(10.0, 20.0));
        view.process_events();
        let before = *view.viewport();

        view.set_envelope(Some(Envelope::from_coords(5.0, 5.0, 5.0, 5.0)));
        assert!(!view.zoom_to_full_extent());
        assert_eq!(*view.viewport(), before);
        assert!(view.process_events().is_empty());
    }

    #[test]
    fn test_resize_emits_one_view_changed() {
        let mut view = view();
        view.resize(200.0, 100.0);
        let changes = view
            .process_events()
            .iter()
            .filter(|e| matches!(e, ViewEvent::ViewChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    fn view_with_two_layers() -> ViewController {
        let mut view = view();
        view.add_layer(Arc::new(MemoryLayer::with_features(
            "roads",
            vec![Feature::point("r", 0.0, 0.0)],
        )))
        .unwrap();
        view.add_layer(Arc::new(MemoryLayer::with_features(
            "poi",
            vec![Feature::point("p", 0.0, 0.0)],
        )))
        .unwrap();
        view
    }

    #[test]
    fn test_hover_layers_limit_hover_hits() {
        let mut view = view_with_two_layers();
        view.set_hover_layers(Some(vec!["poi".to_string()]));

        let middle = Point::new(50.0, 50.0);
        assert_eq!(view.hover_hit_test(middle).unwrap().layer_name, "poi");
        // Release queries stay on every visible layer
        assert_eq!(view.info_hit_test(middle).unwrap().layer_name, "roads");

        view.set_hover_layers(Some(Vec::new()));
        assert!(view.hover_hit_test(middle).is_none());
    }

    #[test]
    fn test_info_layers_limit_release_hits() {
        let mut view = view_with_two_layers();
        view.set_info_layers(Some(vec!["poi".to_string()]));
        assert_eq!(
            view.info_hit_test(Point::new(50.0, 50.0)).unwrap().layer_name,
            "poi"
        );
        view.set_info_layers(None);
        assert_eq!(
            view.info_hit_test(Point::new(50.0, 50.0)).unwrap().layer_name,
            "roads"
        );
    }

    #[test]
    fn test_resize_pauses_animation_for_one_tick() {
        let mut view = view();
        view.zoom_in();
        view.tick(Duration::from_millis(100));
        let before = view.viewport().resolution();

        view.resize(120.0, 100.0);
        view.tick(Duration::from_millis(100));
        assert_eq!(view.viewport().resolution(), before);

        view.tick(Duration::from_millis(100));
        assert!(view.viewport().resolution() < before);
    }

    #[test]
    fn test_pan_emits_view_changed() {
        let mut view = view();
        assert!(view.pan(Point::new(10.0, 0.0)));
        assert_eq!(view.viewport().center, Point::new(-40.0, 0.0));
        assert!(matches!(
            view.process_events().as_slice(),
            [ViewEvent::ViewChanged { user_action: false, .. }]
        ));
    }

    #[test]
    fn test_data_changed_error_messages() {
        let mut view = view();
        view.data_changed(Err(DataFetchError::Cancelled));
        assert_eq!(view.error_message(), Some("Cancelled"));

        view.data_changed(Err(DataFetchError::Other {
            kind: "ParseError".to_string(),
            message: "bad tile".to_string(),
        }));
        assert_eq!(view.error_message(), Some("ParseError: bad tile"));

        let changes = view
            .process_events()
            .into_iter()
            .filter(|e| matches!(e, ViewEvent::ErrorMessageChanged(_)))
            .count();
        assert_eq!(changes, 2);
    }

    #[test]
    fn test_render_frame_only_when_invalid() {
        struct Counter;
        impl Renderer for Counter {
            type Surface = Vec<usize>;

            fn render(
                &mut self,
                surface: &mut Self::Surface,
                _viewport: &Viewport,
                layers: &[Arc<dyn Layer>],
                _background: crate::rendering::Color,
            ) {
                surface.push(layers.len());
            }
        }

        let mut view = view();
        let mut frames = Vec::new();
        assert!(view.render_frame(&mut Counter, &mut frames));
        assert!(!view.render_frame(&mut Counter, &mut frames));
        view.data_changed(Ok(()));
        assert!(view.render_frame(&mut Counter, &mut frames));
        assert_eq!(frames, vec![0, 0]);
    }

    #[test]
    fn test_render_frame_skipped_before_initialization() {
        struct Never;
        impl Renderer for Never {
            type Surface = ();

            fn render(
                &mut self,
                _surface: &mut (),
                _viewport: &Viewport,
                _layers: &[Arc<dyn Layer>],
                _background: crate::rendering::Color,
            ) {
                panic!("rendered before initialization");
            }
        }

        let mut view = ViewController::new(options());
        assert!(!view.render_frame(&mut Never, &mut ()));
    }

    #[test]
    fn test_rotation_emits_view_changed() {
        let mut view = view();
        view.set_rotation(450.0);
        assert_eq!(view.viewport().rotation(), 90.0);
        assert_eq!(view.process_events().len(), 1);
    }
}
