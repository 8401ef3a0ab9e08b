use crate::defaults;

/// Normalized position of `value` inside `start..end`.
///
/// Degenerate or inverted ranges always report `0.0`.
pub fn normalized_value_percent(value: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return 0.0;
    }

    ((value - start) / span).clamp(0.0, 1.0)
}

/// Current value and the `[minimum, maximum]` bounds it is pinned to.
///
/// Every mutation re-clamps the stored value, so reading [`ValueModel::value`]
/// never observes an out-of-range number. When `maximum <= minimum` the value
/// is pinned to `minimum`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueModel {
    value: f32,
    minimum: f32,
    maximum: f32,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self {
            value: defaults::VALUE,
            minimum: defaults::MINIMUM_VALUE,
            maximum: defaults::MAXIMUM_VALUE,
        }
    }
}

impl ValueModel {
    pub fn new(value: f32, minimum: f32, maximum: f32) -> Self {
        let mut model = Self::default();
        model.set_range(minimum, maximum);
        model.set_value(value);
        model
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// The signed width of the range, `maximum - minimum`.
    pub fn span(&self) -> f32 {
        self.maximum - self.minimum
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Store `value` clamped into the range, returns the stored value.
    ///
    /// `NaN` is rejected and leaves the current value untouched.
    pub fn set_value(&mut self, value: f32) -> f32 {
        if value.is_nan() {
            tracing::warn!("ignoring NaN slider value, keeping {}", self.value);
            return self.value;
        }

        self.value = self.clamp(value);
        self.value
    }

    /// Set only the lower bound.
    ///
    /// Setting the bounds one at a time may pass through an inverted range,
    /// so this only traces it; use [`ValueModel::set_range`] to get a warning.
    pub fn set_minimum(&mut self, minimum: f32) {
        if minimum.is_nan() {
            tracing::warn!("ignoring NaN minimum value, keeping {}", self.minimum);
            return;
        }

        self.minimum = minimum;
        self.trace_if_inverted();
        self.value = self.clamp(self.value);
    }

    /// Set only the upper bound, see [`ValueModel::set_minimum`].
    pub fn set_maximum(&mut self, maximum: f32) {
        if maximum.is_nan() {
            tracing::warn!("ignoring NaN maximum value, keeping {}", self.maximum);
            return;
        }

        self.maximum = maximum;
        self.trace_if_inverted();
        self.value = self.clamp(self.value);
    }

    /// Set both bounds at once, warning when the result is inverted.
    ///
    /// Returns `true` when the range was inverted.
    pub fn set_range(&mut self, minimum: f32, maximum: f32) -> bool {
        if minimum.is_nan() || maximum.is_nan() {
            tracing::warn!(
                "ignoring NaN slider range, keeping {}..{}",
                self.minimum,
                self.maximum
            );
            return false;
        }

        self.minimum = minimum;
        self.maximum = maximum;
        self.value = self.clamp(self.value);

        let inverted = self.is_inverted();
        if inverted {
            tracing::warn!(
                "slider range is inverted ({} > {}), value pinned to minimum",
                self.minimum,
                self.maximum
            );
        }
        inverted
    }

    /// Normalized 0..1 position of the current value.
    pub fn percent(&self) -> f32 {
        normalized_value_percent(self.value, self.minimum, self.maximum)
    }

    /// The value that sits at `percent` (0..1) of the range.
    pub fn value_at_percent(&self, percent: f32) -> f32 {
        if self.is_degenerate() {
            return self.minimum;
        }

        self.minimum + percent.clamp(0.0, 1.0) * self.span()
    }

    fn clamp(&self, value: f32) -> f32 {
        // Apply the minimum last so an inverted range pins to the minimum.
        value.min(self.maximum).max(self.minimum)
    }

    fn is_inverted(&self) -> bool {
        self.maximum < self.minimum
    }

    fn trace_if_inverted(&self) {
        if self.is_inverted() {
            tracing::trace!("slider range {}..{} is inverted", self.minimum, self.maximum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "expected {a} ~= {b}");
    }

    #[test]
    fn defaults_to_unit_range() {
        let model = ValueModel::default();
        approx_eq(model.value(), 0.0);
        approx_eq(model.minimum(), 0.0);
        approx_eq(model.maximum(), 1.0);
    }

    #[test]
    fn set_value_clamps_out_of_range_input() {
        let mut model = ValueModel::new(0.0, -5.0, 5.0);
        approx_eq(model.set_value(12.0), 5.0);
        approx_eq(model.set_value(-12.0), -5.0);
        approx_eq(model.set_value(1.5), 1.5);
    }

    #[test]
    fn changing_bounds_reclamps_immediately() {
        let mut model = ValueModel::new(0.8, 0.0, 1.0);
        model.set_maximum(0.5);
        approx_eq(model.value(), 0.5);

        model.set_minimum(0.7);
        // inverted range pins to the minimum
        approx_eq(model.value(), 0.7);
        assert!(model.is_degenerate());
        approx_eq(model.percent(), 0.0);
        approx_eq(model.value_at_percent(0.9), 0.7);
    }

    #[test]
    fn set_range_reports_only_a_final_inversion() {
        let mut model = ValueModel::default();
        assert!(!model.set_range(10.0, 20.0));
        approx_eq(model.value(), 10.0);
        approx_eq(model.maximum(), 20.0);

        assert!(model.set_range(5.0, 1.0));
        approx_eq(model.value(), 5.0);

        assert!(!model.set_range(f32::NAN, 3.0));
        approx_eq(model.minimum(), 5.0);
    }

    #[test]
    fn tiny_ranges_are_not_degenerate() {
        let model = ValueModel::new(5e-9, 0.0, 1e-8);
        assert!(!model.is_degenerate());
        assert!((model.percent() - 0.5).abs() < 1e-3);
        assert!((model.value_at_percent(1.0) - 1e-8).abs() < 1e-12);
    }

    #[test]
    fn nan_is_rejected() {
        let mut model = ValueModel::new(0.25, 0.0, 1.0);
        model.set_value(f32::NAN);
        approx_eq(model.value(), 0.25);

        model.set_minimum(f32::NAN);
        model.set_maximum(f32::NAN);
        approx_eq(model.minimum(), 0.0);
        approx_eq(model.maximum(), 1.0);
    }

    #[test]
    fn percent_maps_into_unit_interval() {
        let model = ValueModel::new(25.0, 0.0, 100.0);
        approx_eq(model.percent(), 0.25);
        approx_eq(model.value_at_percent(0.5), 50.0);
        approx_eq(normalized_value_percent(10.0, 5.0, 5.0), 0.0);
        approx_eq(normalized_value_percent(150.0, 0.0, 100.0), 1.0);
    }

    proptest! {
        #[test]
        fn set_value_always_lands_inside_the_range(
            min in -1000.0f32..1000.0,
            width in 0.0f32..1000.0,
            value in proptest::num::f32::NORMAL | proptest::num::f32::INFINITE,
        ) {
            let mut model = ValueModel::new(min, min, min + width);
            model.set_value(value);
            prop_assert!(model.minimum() <= model.value());
            prop_assert!(model.value() <= model.maximum());
        }
    }
}
