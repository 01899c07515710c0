//! Smoothed 0–255 opacity shared by the interaction hint and the dialogue box.

const OPAQUE: f32 = 255.0;
const TRANSPARENT: f32 = 0.0;
/// Distance at which the value snaps onto its target.
const SNAP_DISTANCE: f32 = 0.5;

/// Exponentially approaches either fully visible or fully hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeValue {
    value: f32,
    target: f32,
    rate: f32,
}

impl FadeValue {
    /// Creates a hidden fade that approaches its target at `rate` per second.
    pub fn new(rate: f32) -> Self {
        Self {
            value: TRANSPARENT,
            target: TRANSPARENT,
            rate: rate.max(0.0),
        }
    }

    pub fn set_target(&mut self, visible: bool) {
        self.target = if visible { OPAQUE } else { TRANSPARENT };
    }

    /// Moves the value toward the target, scaled by the frame delta.
    pub fn update(&mut self, delta_seconds: f32) {
        if delta_seconds <= 0.0 {
            return;
        }

        let step = (self.rate * delta_seconds).min(1.0);
        self.value += (self.target - self.value) * step;
        self.value = self.value.clamp(TRANSPARENT, OPAQUE);

        if (self.target - self.value).abs() < SNAP_DISTANCE {
            self.value = self.target;
        }
    }

    /// Hides immediately without animating.
    pub fn reset(&mut self) {
        self.value = TRANSPARENT;
        self.target = TRANSPARENT;
    }

    pub fn alpha(&self) -> u8 {
        self.value.round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_monotonically_toward_visible() {
        let mut fade = FadeValue::new(3.0);
        fade.set_target(true);

        let mut previous_gap = OPAQUE;
        for _ in 0..240 {
            fade.update(1.0 / 60.0);
            let gap = (OPAQUE - fade.value).abs();
            assert!(gap <= previous_gap);
            assert!((TRANSPARENT..=OPAQUE).contains(&fade.value));
            previous_gap = gap;
        }

        assert_eq!(fade.value, OPAQUE);
        assert_eq!(fade.alpha(), 255);
    }

    #[test]
    fn fades_back_out_to_zero() {
        let mut fade = FadeValue::new(3.0);
        fade.set_target(true);
        fade.update(10.0);
        assert_eq!(fade.value, OPAQUE);

        fade.set_target(false);
        let mut previous = fade.value;
        for _ in 0..240 {
            fade.update(1.0 / 30.0);
            assert!(fade.value <= previous);
            previous = fade.value;
        }
        assert_eq!(fade.value, TRANSPARENT);
    }

    #[test]
    fn long_frames_never_leave_range() {
        let mut fade = FadeValue::new(50.0);
        fade.set_target(true);
        fade.update(5.0);
        assert_eq!(fade.value, OPAQUE);

        fade.set_target(false);
        fade.update(5.0);
        assert_eq!(fade.value, TRANSPARENT);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut fade = FadeValue::new(3.0);
        fade.set_target(true);
        fade.update(0.0);
        fade.update(-1.0);
        assert_eq!(fade.value, TRANSPARENT);
        assert_eq!(fade.target, OPAQUE);
    }
}
