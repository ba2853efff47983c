const PERIOD_SECS: f64 = 2.0;
const START_RADIUS: f32 = 45.0;
const END_RADIUS: f32 = 65.0;
const START_OPACITY: f32 = 0.8;
const END_OPACITY: f32 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct PulseFrame {
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug)]
pub(in crate::app) struct PulseAnimator {
    started_at: f64,
    cancelled: bool,
}

fn ease_cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let back = -2.0 * t + 2.0;
        1.0 - back * back * back / 2.0
    }
}

impl PulseAnimator {
    pub(in crate::app) fn start(now: f64) -> Self {
        Self {
            started_at: now,
            cancelled: false,
        }
    }

    pub(in crate::app) fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub(in crate::app) fn sample(&self, now: f64) -> Option<PulseFrame> {
        if self.cancelled {
            return None;
        }

        let elapsed = (now - self.started_at).max(0.0);
        let t = ease_cubic_in_out((elapsed.rem_euclid(PERIOD_SECS) / PERIOD_SECS) as f32);
        Some(PulseFrame {
            radius: START_RADIUS + (END_RADIUS - START_RADIUS) * t,
            opacity: START_OPACITY + (END_OPACITY - START_OPACITY) * t,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn cycle_starts_small_and_opaque_and_grows_while_fading() {
        let pulse = PulseAnimator::start(10.0);
        let first = pulse.sample(10.0).expect("active");
        assert!(close(first.radius, 45.0));
        assert!(close(first.opacity, 0.8));

        let middle = pulse.sample(11.0).expect("active");
        assert!(close(middle.radius, 55.0));
        assert!(close(middle.opacity, 0.4));

        let late = pulse.sample(11.99).expect("active");
        assert!(late.radius > 64.9 && late.opacity < 0.01);
    }

    #[test]
    fn repeats_by_snapping_back_to_the_start() {
        let pulse = PulseAnimator::start(0.0);
        for cycle in 1..5 {
            let frame = pulse.sample(cycle as f64 * 2.0).expect("active");
            assert!(close(frame.radius, 45.0));
            assert!(close(frame.opacity, 0.8));
        }
        assert_eq!(pulse.sample(0.5), pulse.sample(6.5));
    }

    #[test]
    fn cancelled_pulse_produces_no_frames() {
        let mut pulse = PulseAnimator::start(0.0);
        pulse.cancel();
        assert!(pulse.sample(0.0).is_none());
        assert!(pulse.sample(100.0).is_none());
    }
}
