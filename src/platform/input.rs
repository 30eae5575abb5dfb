//! Normalized control intents
//!
//! Devices never talk to the engine directly. Keyboard and touch layers
//! translate their raw events into an [`IntentFrame`] once per frame, and the
//! game routes that frame according to the active screen.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Device-agnostic control signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Hyperspace,
    Confirm,
    /// Uppercase A-Z
    Letter(char),
    Backspace,
}

impl Intent {
    /// Bit in [`HeldIntents`] for intents that can be held
    pub const fn hold_bit(self) -> Option<u8> {
        match self {
            Intent::RotateLeft => Some(HeldIntents::ROTATE_LEFT),
            Intent::RotateRight => Some(HeldIntents::ROTATE_RIGHT),
            Intent::Thrust => Some(HeldIntents::THRUST),
            Intent::Fire => Some(HeldIntents::FIRE),
            Intent::Hyperspace => Some(HeldIntents::HYPERSPACE),
            Intent::Confirm | Intent::Letter(_) | Intent::Backspace => None,
        }
    }
}

/// Bitflags for intents that stay active while held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldIntents {
    pub bits: u8,
}

impl HeldIntents {
    pub const ROTATE_LEFT: u8 = 1 << 0;
    pub const ROTATE_RIGHT: u8 = 1 << 1;
    pub const THRUST: u8 = 1 << 2;
    pub const FIRE: u8 = 1 << 3;
    pub const HYPERSPACE: u8 = 1 << 4;

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn contains(&self, intent: Intent) -> bool {
        intent.hold_bit().is_some_and(|bit| self.bits & bit != 0)
    }

    #[inline]
    pub fn set(&mut self, intent: Intent, held: bool) {
        if let Some(bit) = intent.hold_bit() {
            if held {
                self.bits |= bit;
            } else {
                self.bits &= !bit;
            }
        }
    }

    /// Holds in `self` that are not in `other`
    #[inline]
    pub const fn without(self, other: HeldIntents) -> HeldIntents {
        HeldIntents {
            bits: self.bits & !other.bits,
        }
    }

    /// Holds present in both
    #[inline]
    pub const fn intersect(self, other: HeldIntents) -> HeldIntents {
        HeldIntents {
            bits: self.bits & other.bits,
        }
    }

    #[inline]
    pub const fn union(self, other: HeldIntents) -> HeldIntents {
        HeldIntents {
            bits: self.bits | other.bits,
        }
    }
}

/// Intents collected for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentFrame {
    /// Intents active for the whole frame
    pub held: HeldIntents,
    /// Continuous rotation from a drag gesture (radians)
    pub rotate_delta: f32,
    /// One-shot intents in arrival order
    pub edges: Vec<Intent>,
}

impl IntentFrame {
    pub fn holding(intents: &[Intent]) -> Self {
        let mut frame = Self::default();
        for intent in intents {
            frame.held.set(*intent, true);
        }
        frame
    }

    pub fn pressed(intents: &[Intent]) -> Self {
        Self {
            edges: intents.to_vec(),
            ..Default::default()
        }
    }

    /// True if the intent was raised as a one-shot this frame
    pub fn has_edge(&self, intent: Intent) -> bool {
        self.edges.contains(&intent)
    }

    /// Fold another source's frame into this one
    pub fn merge(&mut self, other: IntentFrame) {
        self.held = self.held.union(other.held);
        self.rotate_delta += other.rotate_delta;
        self.edges.extend(other.edges);
    }

    /// Gameplay controls for one tick; one-shot fire/hyperspace (taps) count
    /// as held for this tick only
    pub fn to_tick_input(&self) -> TickInput {
        let active = |intent: Intent| self.held.contains(intent) || self.has_edge(intent);
        TickInput {
            rotate_left: active(Intent::RotateLeft),
            rotate_right: active(Intent::RotateRight),
            thrust: active(Intent::Thrust),
            fire: active(Intent::Fire),
            hyperspace: active(Intent::Hyperspace),
            rotate_delta: self.rotate_delta,
        }
    }
}

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Backspace,
    /// `KeyA`..`KeyZ`, stored uppercase
    Letter(char),
}

impl Key {
    /// Parse a DOM-style key code (`"ArrowLeft"`, `"KeyQ"`, ...)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "Space" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "Backspace" => Some(Key::Backspace),
            _ => {
                let letter = code.strip_prefix("Key")?;
                let mut chars = letter.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Some(Key::Letter(c.to_ascii_uppercase()))
                    }
                    _ => None,
                }
            }
        }
    }

    /// Intent this key keeps active while down
    pub fn held_intent(self) -> Option<Intent> {
        match self {
            Key::ArrowLeft => Some(Intent::RotateLeft),
            Key::ArrowRight => Some(Intent::RotateRight),
            Key::ArrowUp => Some(Intent::Thrust),
            Key::ArrowDown => Some(Intent::Hyperspace),
            Key::Space => Some(Intent::Fire),
            Key::Enter | Key::Backspace | Key::Letter(_) => None,
        }
    }

    /// Intent raised once when the key goes down
    pub fn edge_intent(self) -> Option<Intent> {
        match self {
            Key::Space | Key::Enter => Some(Intent::Confirm),
            Key::Backspace => Some(Intent::Backspace),
            Key::Letter(c) => Some(Intent::Letter(c)),
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => None,
        }
    }
}

/// Keyboard state to intent translation
#[derive(Debug, Clone, Default)]
pub struct KeyboardMapper {
    down: Vec<Key>,
    edges: Vec<Intent>,
}

impl KeyboardMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns false for keys the game ignores
    ///
    /// Auto-repeat presses of a key that is already down raise no new edge.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        if self.down.contains(&key) {
            return true;
        }
        self.down.push(key);
        if let Some(intent) = key.edge_intent() {
            self.edges.push(intent);
        }
        true
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.down.retain(|k| *k != key);
        }
    }

    pub fn held(&self) -> HeldIntents {
        let mut held = HeldIntents::empty();
        for intent in self.down.iter().filter_map(|k| k.held_intent()) {
            held.set(intent, true);
        }
        held
    }

    /// Current holds plus the edges raised since the last call
    pub fn take_frame(&mut self) -> IntentFrame {
        IntentFrame {
            held: self.held(),
            rotate_delta: 0.0,
            edges: std::mem::take(&mut self.edges),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("ArrowUp"), Some(Key::ArrowUp));
        assert_eq!(Key::from_code("KeyQ"), Some(Key::Letter('Q')));
        assert_eq!(Key::from_code("KeyQQ"), None);
        assert_eq!(Key::from_code("Key1"), None);
        assert_eq!(Key::from_code("ShiftLeft"), None);
    }

    #[test]
    fn test_space_is_held_fire_and_edge_confirm() {
        let mut keys = KeyboardMapper::new();
        keys.key_down("Space");
        let frame = keys.take_frame();
        assert!(frame.held.contains(Intent::Fire));
        assert_eq!(frame.edges, vec![Intent::Confirm]);

        // Still held next frame, but the confirm is not repeated
        let frame = keys.take_frame();
        assert!(frame.held.contains(Intent::Fire));
        assert!(frame.edges.is_empty());
    }

    #[test]
    fn test_autorepeat_raises_no_new_edges() {
        let mut keys = KeyboardMapper::new();
        keys.key_down("KeyA");
        keys.key_down("KeyA");
        assert_eq!(keys.take_frame().edges, vec![Intent::Letter('A')]);
        keys.key_up("KeyA");
        keys.key_down("KeyA");
        assert_eq!(keys.take_frame().edges, vec![Intent::Letter('A')]);
    }

    #[test]
    fn test_arrows_map_to_holds() {
        let mut keys = KeyboardMapper::new();
        for code in ["ArrowLeft", "ArrowUp", "ArrowDown"] {
            keys.key_down(code);
        }
        let input = keys.take_frame().to_tick_input();
        assert!(input.rotate_left && input.thrust && input.hyperspace);
        assert!(!input.rotate_right && !input.fire);

        keys.key_up("ArrowUp");
        assert!(!keys.take_frame().to_tick_input().thrust);
    }

    #[test]
    fn test_tap_edges_fire_for_one_tick() {
        let frame = IntentFrame::pressed(&[Intent::Fire]);
        assert!(frame.to_tick_input().fire);
        assert!(!IntentFrame::default().to_tick_input().fire);
    }

    #[test]
    fn test_held_set_algebra() {
        let a = IntentFrame::holding(&[Intent::Fire, Intent::Thrust]).held;
        let b = IntentFrame::holding(&[Intent::Fire]).held;
        assert!(a.without(b).contains(Intent::Thrust));
        assert!(!a.without(b).contains(Intent::Fire));
        assert_eq!(a.intersect(b), b);
        assert!(HeldIntents::empty().is_empty());
    }
}
