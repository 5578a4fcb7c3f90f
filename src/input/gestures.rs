//! Pointer, wheel, key and touch interpretation
//!
//! [`GestureController`] turns raw [`InputEvent`]s into [`Action`]s. It never
//! touches the viewport itself; the view controller applies the actions so
//! that every state change goes through one place.

use crate::{
    core::{
        config::GestureConfig, envelope::Envelope, geo::Point, resolutions::ResolutionLadder,
        viewport::Viewport,
    },
    input::events::{InputEvent, KeyRole, MouseButton, PointerSource},
};

/// Press-tracking state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Primary button held; moves pan the view
    Panning { previous: Point, anchor: Point },
    /// Primary button held in box-zoom mode; moves resize the selection
    BoxSelecting { anchor: Point, current: Point },
}

/// What the view controller should do in response to an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Keep the world point under `previous` under `current`, scaling the
    /// resolution by `1 / delta_scale`
    Transform {
        current: Point,
        previous: Point,
        delta_scale: f64,
    },
    /// Hover hit test at a screen position
    Hover(Point),
    /// Pan gesture ended; `click` when it ended where it started
    Released { position: Point, click: bool },
    /// Fit the screen rectangle spanned by two corners
    ZoomToBox { begin: Point, end: Point },
    /// Animate to `target` keeping `anchor` fixed on screen
    AnimateZoom { target: f64, anchor: Point },
    /// Full redraw after a touch gesture
    Refresh,
    /// Pointer left the surface
    Leave,
}

/// Read-only view state the controller needs to interpret an event
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub viewport: &'a Viewport,
    pub resolutions: &'a ResolutionLadder,
    /// Resolution the running zoom animation is heading to
    pub zoom_target: Option<f64>,
    pub zoom_locked: bool,
}

/// Snaps near-identity and degenerate (non-positive) pinch scales to 1.0
pub fn normalize_scale(scale: f64, epsilon: f64, zoom_locked: bool) -> f64 {
    if zoom_locked || !scale.is_finite() {
        return 1.0;
    }
    if scale < epsilon || (scale - 1.0).abs() <= epsilon {
        return 1.0;
    }
    scale
}

#[derive(Debug, Clone)]
pub struct GestureController {
    pub enabled: bool,
    config: GestureConfig,
    state: GestureState,
    /// A `KeyRole::BoxZoom` key is held
    box_modifier: bool,
    /// Box-zoom requested programmatically; cleared by the next commit
    box_mode_once: bool,
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            enabled: true,
            config,
            state: GestureState::Idle,
            box_modifier: false,
            box_mode_once: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_box_zoom_mode(&self) -> bool {
        self.box_modifier || self.box_mode_once
    }

    /// Arms or disarms the one-shot box-zoom mode
    pub fn set_box_zoom_mode(&mut self, enabled: bool) {
        self.box_mode_once = enabled;
        self.discard_selection_if_mode_exited();
    }

    /// Normalized screen rectangle of the selection being dragged
    pub fn box_selection(&self) -> Option<Envelope> {
        match self.state {
            GestureState::BoxSelecting { anchor, current } => {
                Some(Envelope::from_corners(anchor, current))
            }
            _ => None,
        }
    }

    /// Forgets any press in progress
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &GestureContext<'_>) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }

        match *event {
            InputEvent::PointerDown {
                position,
                button,
                source,
            } => {
                if Self::is_primary_mouse(button, source) {
                    self.on_press(position);
                }
                Vec::new()
            }
            InputEvent::PointerMove { position, source } => {
                if source == PointerSource::Mouse {
                    self.on_move(position)
                } else {
                    Vec::new()
                }
            }
            InputEvent::PointerUp {
                position,
                button,
                source,
            } => {
                if Self::is_primary_mouse(button, source) {
                    self.on_release(position)
                } else {
                    Vec::new()
                }
            }
            InputEvent::PointerLeave => {
                self.state = GestureState::Idle;
                vec![Action::Leave]
            }
            InputEvent::Wheel { delta, position } => self.on_wheel(delta, position, ctx),
            InputEvent::Manipulation {
                origin,
                translation,
                scale,
            } => {
                if !self.config.touch_manipulation {
                    return Vec::new();
                }
                let mean = (scale.x + scale.y) / 2.0;
                let delta_scale = normalize_scale(mean, self.config.scale_epsilon, ctx.zoom_locked);
                vec![Action::Transform {
                    current: origin.add(&translation),
                    previous: origin,
                    delta_scale,
                }]
            }
            InputEvent::ManipulationCompleted => vec![Action::Refresh],
            InputEvent::KeyDown { key } => {
                if key.role() == KeyRole::BoxZoom {
                    self.box_modifier = true;
                }
                Vec::new()
            }
            InputEvent::KeyUp { key } => {
                if key.role() == KeyRole::BoxZoom {
                    self.box_modifier = false;
                    self.discard_selection_if_mode_exited();
                }
                Vec::new()
            }
            InputEvent::Resize { .. } => Vec::new(),
        }
    }

    fn is_primary_mouse(button: MouseButton, source: PointerSource) -> bool {
        button == MouseButton::Left && source == PointerSource::Mouse
    }

    fn on_press(&mut self, position: Point) {
        self.state = if self.is_box_zoom_mode() {
            GestureState::BoxSelecting {
                anchor: position,
                current: position,
            }
        } else {
            GestureState::Panning {
                previous: position,
                anchor: position,
            }
        };
    }

    fn on_move(&mut self, position: Point) -> Vec<Action> {
        let box_mode = self.is_box_zoom_mode();
        match &mut self.state {
            GestureState::Idle if box_mode => Vec::new(),
            GestureState::Idle => vec![Action::Hover(position)],
            GestureState::Panning { previous, .. } => {
                if !self.config.drag_pan {
                    return Vec::new();
                }
                let action = Action::Transform {
                    current: position,
                    previous: *previous,
                    delta_scale: 1.0,
                };
                *previous = position;
                vec![action]
            }
            GestureState::BoxSelecting { current, .. } => {
                *current = position;
                Vec::new()
            }
        }
    }

    fn on_release(&mut self, position: Point) -> Vec<Action> {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => Vec::new(),
            GestureState::Panning { anchor, .. } => vec![Action::Released {
                position,
                click: anchor == position,
            }],
            GestureState::BoxSelecting { anchor, .. } => {
                self.box_mode_once = false;
                vec![Action::ZoomToBox {
                    begin: anchor,
                    end: position,
                }]
            }
        }
    }

    fn on_wheel(&mut self, delta: f64, position: Point, ctx: &GestureContext<'_>) -> Vec<Action> {
        if !self.config.wheel_zoom
            || ctx.zoom_locked
            || !ctx.viewport.is_initialized()
            || delta == 0.0
            || !delta.is_finite()
        {
            return Vec::new();
        }

        let base = ctx.zoom_target.unwrap_or_else(|| ctx.viewport.resolution());
        let target = if delta > 0.0 {
            ctx.resolutions.zoom_in(base)
        } else {
            ctx.resolutions.zoom_out(base)
        };

        if target == base {
            log::trace!("Wheel zoom at ladder end ({})", base);
            return Vec::new();
        }

        vec![Action::AnimateZoom {
            target,
            anchor: position,
        }]
    }

    fn discard_selection_if_mode_exited(&mut self) {
        if !self.is_box_zoom_mode() && matches!(self.state, GestureState::BoxSelecting { .. }) {
            log::debug!("Box zoom mode exited; discarding selection");
            self.state = GestureState::Idle;
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
