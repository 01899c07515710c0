//! Typewriter progress over a single message.

/// Time-driven count of visible characters for the current message.
///
/// Lengths are measured in `char`s so multi-byte text (the Spanish table has
/// plenty) never splits a code point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRevealState {
    progress: f32,
    target: String,
    length: usize,
    complete: bool,
}

impl TextRevealState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the reveal. A different `full_text` restarts it from zero.
    pub fn update(&mut self, delta_seconds: f32, full_text: &str, chars_per_second: f32) {
        if self.target != full_text {
            self.target = full_text.to_owned();
            self.length = full_text.chars().count();
            self.progress = 0.0;
            self.complete = false;
        }

        if self.complete {
            return;
        }

        self.progress += chars_per_second.max(0.0) * delta_seconds.max(0.0);
        if self.progress >= self.length as f32 {
            self.progress = self.length as f32;
            self.complete = true;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Skips the rest of the typing for the current message.
    pub fn force_complete(&mut self) {
        self.progress = self.length as f32;
        self.complete = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prefix of the target text that is currently revealed.
    pub fn visible_text(&self) -> &str {
        let visible = self.progress.floor() as usize;
        match self.target.char_indices().nth(visible) {
            Some((byte_index, _)) => &self.target[..byte_index],
            None => &self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f32 = 50.0;

    #[test]
    fn progress_is_monotonic_and_terminates() {
        let text = "Fresh catch from the northern reefs, friend!";
        let mut reveal = TextRevealState::new();
        let delta = 1.0 / 60.0;
        let max_updates = (text.chars().count() as f32 / (RATE * delta)).ceil() as usize;

        let mut previous = 0.0;
        for _ in 0..max_updates {
            reveal.update(delta, text, RATE);
            assert!(reveal.progress >= previous);
            assert!(reveal.progress <= text.chars().count() as f32);
            previous = reveal.progress;
        }

        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), text);
    }

    #[test]
    fn new_text_restarts_the_reveal() {
        let mut reveal = TextRevealState::new();
        reveal.update(10.0, "first", RATE);
        assert!(reveal.is_complete());

        reveal.update(0.03, "second line", RATE);
        assert!(!reveal.is_complete());
        assert_eq!(reveal.visible_text(), "s");
    }

    #[test]
    fn empty_text_completes_on_first_update() {
        let mut reveal = TextRevealState::new();
        reveal.update(0.0, "", RATE);
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), "");
    }

    #[test]
    fn force_complete_is_idempotent() {
        let mut reveal = TextRevealState::new();
        reveal.update(0.01, "Anchors aweigh", RATE);
        assert!(!reveal.is_complete());

        reveal.force_complete();
        let once = reveal.clone();
        reveal.force_complete();

        assert_eq!(reveal, once);
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), "Anchors aweigh");
    }

    #[test]
    fn visible_text_respects_char_boundaries() {
        let mut reveal = TextRevealState::new();
        reveal.update(0.07, "¡Buenos días!", RATE);
        assert_eq!(reveal.visible_text(), "¡Bu");
    }
}
