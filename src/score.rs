//! Session score.

/// Kill counter for one session. 64 bits wide, so frame rate times session
/// length can never realistically wrap it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score(u64);

impl Score {
    pub fn new() -> Score {
        Score(0)
    }

    pub fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}
