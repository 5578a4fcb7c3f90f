pub mod events;
pub mod gestures;

pub use events::{
    EventManager, InputEvent, KeyCode, KeyRole, MouseButton, PointerSource, ViewEvent,
};
pub use gestures::{Action, GestureContext, GestureController, GestureState};
