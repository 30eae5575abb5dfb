//! Platform abstraction layer
//!
//! Normalizes device input into engine intents:
//! - Keyboard codes to held/edge intents
//! - Touch pointer sequences to classified gestures

pub mod gesture;
pub mod input;

pub use gesture::{Gesture, GestureClassifier, ShipPose};
pub use input::{HeldIntents, Intent, IntentFrame, Key, KeyboardMapper};
