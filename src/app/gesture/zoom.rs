use eframe::egui::Vec2;

// local = translate + world * scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ViewTransform {
    pub translate: Vec2,
    pub scale: f32,
}

impl ViewTransform {
    pub(in crate::app) const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    pub(in crate::app) fn apply(self, world: Vec2) -> Vec2 {
        self.translate + world * self.scale
    }

    pub(in crate::app) fn invert(self, local: Vec2) -> Vec2 {
        (local - self.translate) / self.scale
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Default)]
pub(in crate::app) struct ZoomController {
    transform: ViewTransform,
}

impl ZoomController {
    pub(in crate::app) const MIN_SCALE: f32 = 0.3;
    pub(in crate::app) const MAX_SCALE: f32 = 4.0;
    const WHEEL_SENSITIVITY: f32 = 0.002;

    pub(in crate::app) fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub(in crate::app) fn scale_to(&mut self, anchor: Vec2, requested: f32) {
        if !requested.is_finite() {
            return;
        }

        let world_anchor = self.transform.invert(anchor);
        let scale = requested.clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        self.transform = ViewTransform {
            translate: anchor - world_anchor * scale,
            scale,
        };
    }

    pub(in crate::app) fn on_wheel(&mut self, anchor: Vec2, scroll_y: f32) {
        if scroll_y.abs() <= f32::EPSILON {
            return;
        }
        let factor = 2.0_f32.powf(scroll_y * Self::WHEEL_SENSITIVITY);
        self.scale_to(anchor, self.transform.scale * factor);
    }

    pub(in crate::app) fn on_pinch(&mut self, anchor: Vec2, zoom_factor: f32) {
        if (zoom_factor - 1.0).abs() <= f32::EPSILON || zoom_factor <= 0.0 {
            return;
        }
        self.scale_to(anchor, self.transform.scale * zoom_factor);
    }

    pub(in crate::app) fn on_pan(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.transform.translate += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn starts_at_identity() {
        let zoom = ZoomController::default();
        assert_eq!(zoom.transform(), ViewTransform::IDENTITY);
        assert_eq!(zoom.transform().apply(vec2(12.0, 34.0)), vec2(12.0, 34.0));
    }

    #[test]
    fn scale_is_always_clamped() {
        let mut zoom = ZoomController::default();
        for scroll in [10_000.0, 250.0, -3.0, -90_000.0, 1e9, -1e9] {
            zoom.on_wheel(vec2(300.0, 200.0), scroll);
            let scale = zoom.transform().scale;
            assert!(
                (ZoomController::MIN_SCALE..=ZoomController::MAX_SCALE).contains(&scale),
                "scale {scale} after scroll {scroll}"
            );
        }

        zoom.on_pinch(vec2(0.0, 0.0), 1e6);
        assert_eq!(zoom.transform().scale, ZoomController::MAX_SCALE);
        zoom.on_pinch(vec2(0.0, 0.0), 1e-6);
        assert_eq!(zoom.transform().scale, ZoomController::MIN_SCALE);
        zoom.scale_to(vec2(0.0, 0.0), f32::INFINITY);
        assert_eq!(zoom.transform().scale, ZoomController::MIN_SCALE);
    }

    #[test]
    fn zoom_keeps_the_anchor_point_fixed() {
        let mut zoom = ZoomController::default();
        zoom.on_pan(vec2(40.0, -10.0));
        let anchor = vec2(320.0, 180.0);
        let world_before = zoom.transform().invert(anchor);

        zoom.on_wheel(anchor, 300.0);
        assert!(zoom.transform().scale > 1.0);
        let world_after = zoom.transform().invert(anchor);
        assert!((world_before - world_after).length() < 1e-3);
    }

    #[test]
    fn pan_translates_without_scaling() {
        let mut zoom = ZoomController::default();
        zoom.on_pan(vec2(15.0, 25.0));
        zoom.on_pan(vec2(-5.0, 5.0));
        assert_eq!(zoom.transform().translate, vec2(10.0, 30.0));
        assert_eq!(zoom.transform().scale, 1.0);
    }

    #[test]
    fn invert_round_trips_apply() {
        let transform = ViewTransform {
            translate: vec2(-30.0, 12.5),
            scale: 2.5,
        };
        let world = vec2(140.0, -60.0);
        assert!((transform.invert(transform.apply(world)) - world).length() < 1e-4);
    }
}
