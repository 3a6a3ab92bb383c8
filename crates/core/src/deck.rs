//! Flashcard deck rotation and pointer-gesture state machines.
//!
//! The deck order *is* the state: the active card is always the head of
//! `order`, and a committed swipe moves it to the tail. There is no
//! separate index counter that could drift out of sync with the rendered
//! stack. Dots address cards by their stable original index, which never
//! changes as the deck rotates.

//
// ─── DECK ROTATION ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign used for direction-dependent exit transforms.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Circular deck over `len` cards, addressed by stable original index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardDeck {
    order: Vec<usize>,
    flipped: bool,
}

impl FlashcardDeck {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
            flipped: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Stable index of the active (front) card.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Current deck order, head first. Values are stable indices.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Tap on the active card: show the other face.
    pub fn toggle_flip(&mut self) {
        if !self.order.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Commit a swipe: rotate the active card to the tail. The direction
    /// only shapes the exit animation; both directions advance the deck.
    /// The incoming card always starts on its front face.
    pub fn swipe(&mut self, _direction: SwipeDirection) {
        if self.order.len() > 1 {
            self.order.rotate_left(1);
        }
        self.flipped = false;
    }

    /// Jump directly to the card with the given stable index, preserving
    /// the circular order. Returns `false` (and changes nothing) when the
    /// card is already active or the index is unknown.
    pub fn jump_to(&mut self, stable_index: usize) -> bool {
        if self.active() == Some(stable_index) {
            return false;
        }
        let Some(pos) = self.order.iter().position(|&idx| idx == stable_index) else {
            return false;
        };
        self.order.rotate_left(pos);
        self.flipped = false;
        true
    }
}

//
// ─── POINTER GESTURES ──────────────────────────────────────────────────────────
//

/// Movement below this, on both axes, still counts as a tap.
pub const DRAG_SLOP_PX: f64 = 10.0;
/// Horizontal displacement required to commit a swipe on release.
pub const SWIPE_COMMIT_PX: f64 = 80.0;

const ROTATE_DEG_PER_PX: f64 = 0.05;
const OPACITY_FLOOR: f64 = 0.5;
const OPACITY_FALLOFF_PX: f64 = 300.0;

/// Visual state of the active card while a gesture is live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub translate_x: f64,
    pub rotate_deg: f64,
    pub opacity: f64,
}

impl CardTransform {
    #[must_use]
    pub fn resting() -> Self {
        Self {
            translate_x: 0.0,
            rotate_deg: 0.0,
            opacity: 1.0,
        }
    }

    #[must_use]
    fn for_delta(dx: f64) -> Self {
        Self {
            translate_x: dx,
            rotate_deg: dx * ROTATE_DEG_PER_PX,
            opacity: (1.0 - dx.abs() / OPACITY_FALLOFF_PX).max(OPACITY_FLOOR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pointer down, no movement past the slop yet.
    Pressed,
    /// Moved past the slop without horizontal dominance.
    Dragging,
    /// Horizontal movement dominates; the card follows the pointer.
    Swiping,
}

/// What a completed gesture means for the deck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// No meaningful movement: flip the active card.
    Tap,
    /// Swipe passed the commit threshold.
    Commit(SwipeDirection),
    /// Movement happened but did not commit: restore the resting transform.
    SpringBack,
}

/// Tracks one pointer interaction from press to release. Mouse and touch
/// handlers both feed this; there is exactly one gesture model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    phase: GesturePhase,
    origin: (f64, f64),
    delta: (f64, f64),
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            origin: (0.0, 0.0),
            delta: (0.0, 0.0),
        }
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.phase = GesturePhase::Pressed;
        self.origin = (x, y);
        self.delta = (0.0, 0.0);
    }

    /// Advance the gesture. Returns the live transform to apply while the
    /// card is being swiped, `None` otherwise.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<CardTransform> {
        if self.phase == GesturePhase::Idle {
            return None;
        }
        let dx = x - self.origin.0;
        let dy = y - self.origin.1;
        self.delta = (dx, dy);

        match self.phase {
            GesturePhase::Pressed | GesturePhase::Dragging => {
                if dx.abs() > DRAG_SLOP_PX && dx.abs() > dy.abs() {
                    self.phase = GesturePhase::Swiping;
                } else if dx.abs() > DRAG_SLOP_PX || dy.abs() > DRAG_SLOP_PX {
                    self.phase = GesturePhase::Dragging;
                }
            }
            // Swipe supersedes drag: once swiping, stay swiping.
            GesturePhase::Swiping | GesturePhase::Idle => {}
        }

        (self.phase == GesturePhase::Swiping).then(|| CardTransform::for_delta(dx))
    }

    /// Finish the gesture and reset to idle. Returns `None` when no
    /// gesture was in progress (a stray release).
    pub fn release(&mut self) -> Option<GestureOutcome> {
        let outcome = match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Pressed => Some(GestureOutcome::Tap),
            GesturePhase::Dragging => Some(GestureOutcome::SpringBack),
            GesturePhase::Swiping => {
                let dx = self.delta.0;
                if dx.abs() > SWIPE_COMMIT_PX {
                    let direction = if dx < 0.0 {
                        SwipeDirection::Left
                    } else {
                        SwipeDirection::Right
                    };
                    Some(GestureOutcome::Commit(direction))
                } else {
                    Some(GestureOutcome::SpringBack)
                }
            }
        };
        *self = Self::new();
        outcome
    }

    /// Abandon the gesture without an outcome (pointer left the stack).
    pub fn cancel(&mut self) {
        *self = Self::new();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
