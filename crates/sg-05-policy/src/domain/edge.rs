//! Press detection on a sampled input.

/// Sampled level of the toggle input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputLevel {
    /// Button held down (line pulled low).
    Pressed,
    /// Button up (line idle high).
    #[default]
    Released,
}

/// Turns a stream of levels into press events.
///
/// A press is the transition Released → Pressed. Holding the button yields
/// exactly one press; releasing yields none.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    last: InputLevel,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample. Returns true on a press edge.
    pub fn observe(&mut self, level: InputLevel) -> bool {
        let pressed = self.last == InputLevel::Released && level == InputLevel::Pressed;
        self.last = level;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InputLevel::{Pressed, Released};

    #[test]
    fn test_held_button_is_one_press() {
        let mut edge = EdgeDetector::new();
        let presses = [Released, Pressed, Pressed, Pressed, Released]
            .into_iter()
            .filter(|level| edge.observe(*level))
            .count();
        assert_eq!(presses, 1);
    }

    #[test]
    fn test_two_separate_presses() {
        let mut edge = EdgeDetector::new();
        let seen: Vec<bool> = [Pressed, Released, Pressed]
            .into_iter()
            .map(|level| edge.observe(level))
            .collect();
        assert_eq!(seen, vec![true, false, true]);
    }

    #[test]
    fn test_release_is_not_a_press() {
        let mut edge = EdgeDetector::new();
        assert!(!edge.observe(Released));
        assert!(!edge.observe(Released));
    }
}
