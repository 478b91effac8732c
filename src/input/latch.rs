/// Edge-triggered latch turning a held key into a single toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleLatch {
    #[default]
    Armed,
    Fired,
}

impl ToggleLatch {
    /// Feeds the current key state; returns `true` exactly once per press
    ///
    /// The latch fires on a press while armed and re-arms only after the key
    /// has been seen released.
    pub fn update(&mut self, pressed: bool) -> bool {
        match (*self, pressed) {
            (ToggleLatch::Armed, true) => {
                *self = ToggleLatch::Fired;
                true
            }
            (ToggleLatch::Fired, false) => {
                *self = ToggleLatch::Armed;
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_for_many_frames_fires_once() {
        let mut latch = ToggleLatch::default();
        let fired = (0..120).filter(|_| latch.update(true)).count();
        assert_eq!(fired, 1);
        assert_eq!(latch, ToggleLatch::Fired);
    }

    #[test]
    fn rearms_after_release() {
        let mut latch = ToggleLatch::default();
        assert!(latch.update(true));
        assert!(!latch.update(true));
        assert!(!latch.update(false));
        assert_eq!(latch, ToggleLatch::Armed);
        assert!(latch.update(true));
    }

    #[test]
    fn idle_latch_never_fires() {
        let mut latch = ToggleLatch::default();
        assert!((0..10).all(|_| !latch.update(false)));
    }
}
