//! Count-up animation for result numbers.

use std::time::Duration;

/// Duration of the total score and percentile count-up.
pub const SCORE_ANIMATION: Duration = Duration::from_millis(1500);

/// Duration of the per-subject net count-up.
pub const NET_ANIMATION: Duration = Duration::from_millis(1000);

/// Cubic ease-out: fast start, slow finish. `t` is expected in `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// A number counting from `start` to `end` over `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberAnimation {
    pub start: f64,
    pub end: f64,
    pub duration: Duration,
    pub suffix: String,
}

impl NumberAnimation {
    pub fn new(start: f64, end: f64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            suffix: String::new(),
        }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        self.start + (self.end - self.start) * ease_out_cubic(self.progress(elapsed))
    }

    /// The value formatted with two decimals and the suffix.
    pub fn label_at(&self, elapsed: Duration) -> String {
        format!("{:.2}{}", self.value_at(elapsed), self.suffix)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Labels sampled every `step`, always ending on the final value.
    pub fn frames(&self, step: Duration) -> Vec<String> {
        let mut frames = Vec::new();
        if step.is_zero() {
            frames.push(self.label_at(self.duration));
            return frames;
        }
        let mut elapsed = Duration::ZERO;
        while !self.is_finished(elapsed) {
            frames.push(self.label_at(elapsed));
            elapsed += step;
        }
        frames.push(self.label_at(self.duration));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn value_clamps_after_duration() {
        let anim = NumberAnimation::new(0.0, 412.35, SCORE_ANIMATION);
        assert_eq!(anim.value_at(Duration::ZERO), 0.0);
        assert_eq!(anim.value_at(Duration::from_secs(5)), 412.35);
        assert_eq!(anim.label_at(Duration::from_secs(5)), "412.35");
    }

    #[test]
    fn percentile_label_has_suffix() {
        let anim = NumberAnimation::new(0.0, 87.5, SCORE_ANIMATION).with_suffix("%");
        assert_eq!(anim.label_at(SCORE_ANIMATION), "87.50%");
        assert_eq!(anim.label_at(Duration::ZERO), "0.00%");
    }

    #[test]
    fn frames_end_on_target() {
        let anim = NumberAnimation::new(0.0, 12.0, NET_ANIMATION);
        let frames = anim.frames(Duration::from_millis(250));
        assert_eq!(frames.len(), 5);
        assert_eq!(frames.first().unwrap(), "0.00");
        assert_eq!(frames.last().unwrap(), "12.00");
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let anim = NumberAnimation::new(5.0, 10.0, Duration::ZERO);
        assert_eq!(anim.value_at(Duration::ZERO), 10.0);
        assert_eq!(anim.frames(Duration::from_millis(16)), vec!["10.00"]);
    }
}
