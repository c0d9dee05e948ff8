//! Cooldown - Timed latch advanced by the host's tick

/// Blocks an action until `remaining` reaches zero
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f64,
}

impl Cooldown {
    pub fn new() -> Self {
        Cooldown { remaining: 0.0 }
    }

    /// Block for `seconds` from now
    pub fn start(&mut self, seconds: f64) {
        self.remaining = seconds.max(0.0);
    }

    pub fn tick(&mut self, delta: f64) {
        self.remaining = (self.remaining - delta).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds until ready
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_cycle() {
        let mut cooldown = Cooldown::new();
        assert!(cooldown.is_ready());

        cooldown.start(1.0);
        assert!(!cooldown.is_ready());

        cooldown.tick(0.6);
        assert!(!cooldown.is_ready());
        assert!((cooldown.remaining() - 0.4).abs() < 1e-9);

        cooldown.tick(0.6);
        assert!(cooldown.is_ready());
        assert!((cooldown.remaining() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_start_is_ready() {
        let mut cooldown = Cooldown::new();
        cooldown.start(-3.0);
        assert!(cooldown.is_ready());
    }
}
