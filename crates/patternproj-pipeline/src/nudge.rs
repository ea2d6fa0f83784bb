//! Arrow-key nudging that speeds up while a key is held.

use crate::NudgeOptions;
use patternproj_core::{Real, Vec2};

/// Arrow key directions, in screen orientation (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Unit step on screen.
    pub fn direction(self) -> Vec2 {
        match self {
            ArrowKey::Up => Vec2::new(0.0, -1.0),
            ArrowKey::Down => Vec2::new(0.0, 1.0),
            ArrowKey::Left => Vec2::new(-1.0, 0.0),
            ArrowKey::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Step sequencer for held keys.
///
/// Each key-down (including auto-repeat) calls [`press`](Self::press);
/// key-up calls [`release`](Self::release), which restarts the sequence.
#[derive(Debug, Clone)]
pub struct NudgeAccelerator {
    steps: Vec<Real>,
    repeats_per_step: u32,
    repeats: u32,
}

impl NudgeAccelerator {
    pub fn new(options: &NudgeOptions) -> Self {
        let steps = if options.steps.is_empty() {
            vec![1.0]
        } else {
            options.steps.clone()
        };
        Self {
            steps,
            repeats_per_step: options.repeats_per_step.max(1),
            repeats: 0,
        }
    }

    /// Current step multiplier, then advance.
    pub fn press(&mut self) -> Real {
        let idx = (self.repeats / self.repeats_per_step) as usize;
        let step = self.steps[idx.min(self.steps.len() - 1)];
        self.repeats = self.repeats.saturating_add(1);
        step
    }

    /// Offset for one key event: `direction * step * unit`.
    pub fn offset(&mut self, key: ArrowKey, unit: Real) -> Vec2 {
        key.direction() * (self.press() * unit)
    }

    pub fn release(&mut self) {
        self.repeats = 0;
    }
}

impl Default for NudgeAccelerator {
    fn default() -> Self {
        Self::new(&NudgeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerates_through_steps_and_resets() {
        let mut acc = NudgeAccelerator::new(&NudgeOptions {
            steps: vec![1.0, 3.0, 5.0, 10.0],
            repeats_per_step: 2,
        });
        let seen: Vec<Real> = (0..10).map(|_| acc.press()).collect();
        assert_eq!(
            seen,
            vec![1.0, 1.0, 3.0, 3.0, 5.0, 5.0, 10.0, 10.0, 10.0, 10.0]
        );
        acc.release();
        assert_eq!(acc.press(), 1.0);
    }

    #[test]
    fn offset_follows_key_direction() {
        let mut acc = NudgeAccelerator::default();
        assert_eq!(acc.offset(ArrowKey::Up, 0.5), Vec2::new(0.0, -0.5));
        assert_eq!(acc.offset(ArrowKey::Right, 2.0), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn empty_step_list_falls_back_to_unit_step() {
        let mut acc = NudgeAccelerator::new(&NudgeOptions {
            steps: vec![],
            repeats_per_step: 0,
        });
        assert_eq!(acc.press(), 1.0);
        assert_eq!(acc.press(), 1.0);
    }
}
