use re_log::debug_assert;

use crate::datatypes::Float32;

use super::Radius;

impl Radius {
    pub const ZERO: Self = Self(Float32(0.0));

    /// One ui point. Ui points are stored negated.
    pub const ONE_UI_POINTS: Self = Self(Float32(-1.0));

    /// `radius` must be non-negative.
    #[inline]
    pub fn new_scene_units(radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "Negative scene radius {radius}");
        Self(Float32(radius))
    }

    /// `radius` must be non-negative.
    #[inline]
    pub fn new_ui_points(radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "Negative ui radius {radius}");
        Self(Float32(-radius))
    }

    /// The radius, if it is expressed in scene units.
    #[inline]
    pub fn scene_units(&self) -> Option<f32> {
        // -0.0 is zero ui points.
        self.0.is_sign_positive().then_some(self.0.0)
    }

    /// The radius, if it is expressed in ui points.
    #[inline]
    pub fn ui_points(&self) -> Option<f32> {
        self.0.is_sign_negative().then_some(-self.0.0)
    }
}

impl From<f32> for Radius {
    /// Plain floats are scene units.
    #[inline]
    fn from(radius: f32) -> Self {
        Self(Float32(radius))
    }
}
