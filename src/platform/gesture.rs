//! Touch gesture classification
//!
//! Turns one pointer-down / move* / up sequence into at most one control
//! action. Drags that start on the ship steer continuously (thrust or
//! rotate); short taps fire; long still presses jump through hyperspace.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::{Intent, IntentFrame};
use crate::{angle_between, cartesian_to_polar, normalize_angle};

/// Touches closer than this to the ship steer it
pub const SHIP_TOUCH_RADIUS: f32 = 50.0;
/// Movement beyond this counts as a drag
pub const DRAG_THRESHOLD: f32 = 15.0;
/// Presses longer than this become hyperspace
pub const HOLD_MS: u64 = 500;
/// Drags within this angle of the heading thrust
pub const THRUST_CONE: f32 = std::f32::consts::FRAC_PI_2;
/// Scale applied to the angular drag around the ship
pub const ROTATE_SENSITIVITY: f32 = 0.2;

/// Final classification of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Rotate,
    Thrust,
    Fire,
    Hyperspace,
}

/// Where the ship is when a sample arrives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub pos: Vec2,
    pub heading: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    /// No drag beyond the threshold yet
    Undecided,
    Thrust,
    /// Last sampled angle of the pointer around the ship
    Rotate { last_angle: f32 },
    /// Dragged away from the ship: nothing to do
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    start: Vec2,
    start_ms: u64,
    near_ship: bool,
    /// Pointer angle around the ship at touch-down
    start_angle: f32,
    mode: DragMode,
}

/// Pointer gesture state machine (one pointer)
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    touch: Option<Touch>,
    pending_rotation: f32,
    pending: Vec<Intent>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.touch.is_some()
    }

    /// True while a locked thrust drag is in progress
    pub fn is_thrusting(&self) -> bool {
        matches!(self.touch, Some(Touch { mode: DragMode::Thrust, .. }))
    }

    pub fn pointer_down(&mut self, pos: Vec2, time_ms: u64, ship: ShipPose) {
        let (distance, angle) = cartesian_to_polar(pos - ship.pos);
        self.touch = Some(Touch {
            start: pos,
            start_ms: time_ms,
            near_ship: distance < SHIP_TOUCH_RADIUS,
            start_angle: angle,
            mode: DragMode::Undecided,
        });
    }

    pub fn pointer_move(&mut self, pos: Vec2, ship: ShipPose) {
        let Some(touch) = self.touch.as_mut() else {
            return;
        };

        let drag = pos - touch.start;
        if touch.mode == DragMode::Undecided {
            if drag.length() <= DRAG_THRESHOLD {
                return;
            }
            // First sample beyond the threshold locks the gesture
            touch.mode = if !touch.near_ship {
                DragMode::Ignored
            } else if angle_between(drag.y.atan2(drag.x), ship.heading) < THRUST_CONE {
                DragMode::Thrust
            } else {
                DragMode::Rotate {
                    last_angle: touch.start_angle,
                }
            };
            log::debug!("Gesture locked as {:?}", touch.mode);
        }

        if let DragMode::Rotate { last_angle } = touch.mode {
            let (_, angle) = cartesian_to_polar(pos - ship.pos);
            self.pending_rotation += normalize_angle(angle - last_angle) * ROTATE_SENSITIVITY;
            touch.mode = DragMode::Rotate { last_angle: angle };
        }
    }

    /// End the gesture and return its classification
    pub fn pointer_up(&mut self, time_ms: u64) -> Option<Gesture> {
        let touch = self.touch.take()?;
        let held_ms = time_ms.saturating_sub(touch.start_ms);

        let gesture = match touch.mode {
            DragMode::Thrust => Some(Gesture::Thrust),
            DragMode::Rotate { .. } => Some(Gesture::Rotate),
            DragMode::Ignored => None,
            DragMode::Undecided if held_ms > HOLD_MS => Some(Gesture::Hyperspace),
            DragMode::Undecided => Some(Gesture::Fire),
        };

        match gesture {
            Some(Gesture::Fire) => self.pending.extend([Intent::Fire, Intent::Confirm]),
            Some(Gesture::Hyperspace) => self.pending.push(Intent::Hyperspace),
            _ => {}
        }
        log::debug!("Gesture released after {} ms: {:?}", held_ms, gesture);
        gesture
    }

    /// Drop the active gesture without classifying it
    pub fn cancel(&mut self) {
        self.touch = None;
    }

    /// Intents produced since the last call
    ///
    /// A tap also confirms, so touch-only players can leave the menus.
    pub fn take_frame(&mut self) -> IntentFrame {
        let mut frame = IntentFrame {
            rotate_delta: std::mem::take(&mut self.pending_rotation),
            edges: std::mem::take(&mut self.pending),
            ..Default::default()
        };
        frame.held.set(Intent::Thrust, self.is_thrusting());
        frame
    }
}
