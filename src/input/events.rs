use crate::{
    core::{geo::Point, viewport::Viewport},
    layers::{Feature, FeatureInfoMap},
    prelude::{HashMap, VecDeque},
    spatial::HitTestResult,
};
use serde::{Deserialize, Serialize};

/// Host input, already translated to screen pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Button press
    PointerDown {
        position: Point,
        button: MouseButton,
        source: PointerSource,
    },
    /// Pointer moved, pressed or not
    PointerMove {
        position: Point,
        source: PointerSource,
    },
    /// Button release
    PointerUp {
        position: Point,
        button: MouseButton,
        source: PointerSource,
    },
    /// Pointer left the surface
    PointerLeave,
    /// Scroll wheel; positive delta zooms in
    Wheel { delta: f64, position: Point },
    /// Multi-touch delta relative to the previous manipulation event
    Manipulation {
        origin: Point,
        translation: Point,
        scale: Point,
    },
    ManipulationCompleted,
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    /// Surface size changed
    Resize { width: f64, height: f64 },
}

/// Device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerSource {
    #[default]
    Mouse,
    Stylus,
    /// Promoted touch; real touch gestures arrive as `Manipulation`
    Touch,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    LeftCtrl,
    RightCtrl,
    LeftShift,
    RightShift,
    LeftAlt,
    RightAlt,
    Escape,
    Plus,
    Minus,
    Other(u32),
}

/// What a key means to the view, resolved once when the key is translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Held to drag a zoom rectangle instead of panning
    BoxZoom,
    None,
}

impl KeyCode {
    pub fn role(self) -> KeyRole {
        match self {
            KeyCode::LeftCtrl | KeyCode::RightCtrl => KeyRole::BoxZoom,
            _ => KeyRole::None,
        }
    }
}

/// Notifications emitted by the view controller
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Center, resolution, rotation or size changed
    ViewChanged {
        viewport: Viewport,
        user_action: bool,
    },
    ViewportInitialized { viewport: Viewport },
    /// Pointer is over a feature
    MouseInfoOver { layer_name: String, feature: Feature },
    /// Pointer left the last reported feature
    MouseInfoLeave,
    /// Hit test at a pointer release
    MouseInfoUp { result: Option<HitTestResult> },
    FeatureInfo(FeatureInfoMap),
    ErrorMessageChanged(String),
}

impl ViewEvent {
    /// Listener key for this event
    pub fn kind(&self) -> &'static str {
        match self {
            ViewEvent::ViewChanged { .. } => "viewchanged",
            ViewEvent::ViewportInitialized { .. } => "viewportinitialized",
            ViewEvent::MouseInfoOver { .. } => "mouseinfoover",
            ViewEvent::MouseInfoLeave => "mouseinfoleave",
            ViewEvent::MouseInfoUp { .. } => "mouseinfoup",
            ViewEvent::FeatureInfo(_) => "featureinfo",
            ViewEvent::ErrorMessageChanged(_) => "errormessagechanged",
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&ViewEvent) + Send + Sync>;

/// Queues view notifications and hands them to listeners keyed by
/// [`ViewEvent::kind`]
#[derive(Default)]
pub struct EventManager {
    listeners: HashMap<String, Vec<EventCallback>>,
    event_queue: VecDeque<ViewEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&ViewEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Removes every listener for `event_type`
    pub fn off(&mut self, event_type: &str) {
        self.listeners.remove(event_type);
    }

    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listeners
            .get(event_type)
            .is_some_and(|callbacks| !callbacks.is_empty())
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: ViewEvent) {
        log::trace!("Queued {}", event.kind());
        self.event_queue.push_back(event);
    }

    /// Runs listeners for every queued event and returns the events
    pub fn process_events(&mut self) -> Vec<ViewEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .field("pending", &self.event_queue.len())
            .finish()
    }
}
