/// Wall-clock timestamp in milliseconds, as reported by the host
/// (`Date.now()` / `performance.now()` in the browser).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Millis(pub f64);

impl Millis {
    pub fn as_secs(self) -> f64 {
        self.0 / 1000.0
    }

    pub fn after(self, delay_ms: f64) -> Self {
        Millis(self.0 + delay_ms)
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Millis) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Millis;

    #[test]
    fn elapsed_is_clamped_at_zero() {
        assert_eq!(Millis(1500.0).since(Millis(500.0)), 1000.0);
        assert_eq!(Millis(500.0).since(Millis(1500.0)), 0.0);
    }

    #[test]
    fn converts_to_seconds() {
        assert_eq!(Millis(2500.0).as_secs(), 2.5);
        assert_eq!(Millis(100.0).after(50.0), Millis(150.0));
    }
}
