//! Timed text notice.

/// Text shown over the level until its duration runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    text: String,
    duration: f64,
    elapsed: f64,
}

impl Banner {
    /// Creates a visible banner.
    #[must_use]
    pub const fn new(text: String, duration: f64) -> Self {
        Self {
            text,
            duration,
            elapsed: 0.0,
        }
    }

    /// Displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `true` until the duration has elapsed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Advances the banner clock.
    pub fn update(&mut self, elapsed: f64) {
        if self.is_visible() {
            self.elapsed += elapsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_after_its_duration() {
        let mut banner = Banner::new("Level 1 Begin".to_owned(), 2.0);
        banner.update(1.5);
        assert!(banner.is_visible());
        banner.update(0.5);
        assert!(!banner.is_visible());
    }
}
