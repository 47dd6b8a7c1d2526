//! Scroll direction tracking
//!
//! Every scroll event is compared against the previous one. There is no
//! hysteresis: a single pixel is enough to flip direction, and an event at
//! an unchanged offset counts as moving up.

/// Vertical scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollDirection {
    /// Offset increased
    Down,
    /// Offset decreased or stayed the same
    #[default]
    Up,
}

impl ScrollDirection {
    /// Direction of travel from `previous` to `current`
    pub fn between(previous: i32, current: i32) -> Self {
        if current > previous {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }
}

/// Scroll position and direction, updated on every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Offset of the most recent event
    pub position: i32,
    /// Offset of the event before it
    pub previous_position: i32,
    /// Direction between the two
    pub direction: ScrollDirection,
}

impl ScrollState {
    /// Start tracking from a known offset
    pub fn at(position: i32) -> Self {
        Self {
            position,
            previous_position: position,
            direction: ScrollDirection::Up,
        }
    }

    /// Record a new scroll offset and return the direction of travel
    pub fn observe(&mut self, position: i32) -> ScrollDirection {
        self.direction = ScrollDirection::between(self.position, position);
        self.previous_position = self.position;
        self.position = position;
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between() {
        assert_eq!(ScrollDirection::between(0, 1), ScrollDirection::Down);
        assert_eq!(ScrollDirection::between(1, 0), ScrollDirection::Up);
        assert_eq!(ScrollDirection::between(300, 300), ScrollDirection::Up);
    }

    #[test]
    fn test_observe_sequence() {
        let mut state = ScrollState::default();
        assert_eq!(state.observe(100), ScrollDirection::Down);
        assert_eq!(state.previous_position, 0);
        assert_eq!(state.position, 100);

        assert_eq!(state.observe(99), ScrollDirection::Up);
        assert_eq!(state.observe(99), ScrollDirection::Up);
        assert_eq!(state.observe(100), ScrollDirection::Down);
        assert_eq!(state.previous_position, 99);
    }

    #[test]
    fn test_direction_matches_every_consecutive_pair() {
        let positions = [0, 5, 5, 3, 400, 401, 0, -10, 20];
        let mut state = ScrollState::at(positions[0]);
        for pair in positions.windows(2) {
            let expected = if pair[1] > pair[0] {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            };
            assert_eq!(state.observe(pair[1]), expected, "{:?}", pair);
        }
    }
}
