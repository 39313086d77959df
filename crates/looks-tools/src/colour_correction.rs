//! The colour-correction tool.
//!
//! Combines a [`TemperatureAndTint`] stage with a [`ColorControls`] stage:
//!
//! | Parameter | Native field | Default table |
//! |-----------|--------------|---------------|
//! | Brightness | `color_controls.brightness` | linear `0.01`, `[-100, 100]` |
//! | Contrast | `color_controls.contrast` | piecewise `0 / 1 / 2`, `[-100, 100]` |
//! | Saturation | `color_controls.saturation` | linear `0.01`, `[0, 200]` |
//! | Warmth | `temperature.input_neutral` (kelvin) | linear `65`, `[0, 100]` |
//!
//! Warmth describes the light the photo was taken under. The target neutral
//! stays at daylight, so lowering warmth tells the filter the source was warm
//! and the image is corrected cooler. At the default (6500 K) the stage is the
//! identity.

use crate::{Icon, Parameter, ParameterTable, Parameterized, Tool, ToolError, ToolResult};
use looks_ops::{ColorControls, CompositeFilter, Neutral, TemperatureAndTint};
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

/// Brightness, contrast, saturation and warmth in one tool.
#[derive(Debug, Clone)]
pub struct ColourCorrection {
    icon: Icon,
    table: Arc<ParameterTable>,
    temperature: TemperatureAndTint,
    color_controls: ColorControls,
}

impl Default for ColourCorrection {
    fn default() -> Self {
        Self::new()
    }
}

impl ColourCorrection {
    /// Display name.
    pub const NAME: &'static str = "Colour";

    /// Icon asset.
    pub const ICON: &'static str = "tools/colour";

    /// Tool with the default parameter table.
    pub fn new() -> Self {
        Self::with_table(Arc::new(ParameterTable::default()))
    }

    /// Tool with a custom, already validated table, starting at each
    /// parameter's default.
    pub fn with_table(table: Arc<ParameterTable>) -> Self {
        let mut tool = Self {
            icon: Icon::new(Self::ICON),
            table,
            temperature: TemperatureAndTint::default(),
            color_controls: ColorControls::default(),
        };
        tool.apply_defaults();
        tool
    }

    /// Parameter table in use.
    pub fn table(&self) -> &Arc<ParameterTable> {
        &self.table
    }

    /// Current white-balance stage.
    pub fn temperature(&self) -> &TemperatureAndTint {
        &self.temperature
    }

    /// Current brightness/contrast/saturation stage.
    pub fn color_controls(&self) -> &ColorControls {
        &self.color_controls
    }

    /// Resets both stages to identity, then moves every parameter onto its
    /// table default so values stay inside the table's range.
    fn apply_defaults(&mut self) {
        self.temperature = TemperatureAndTint::default();
        self.color_controls = ColorControls::default();
        for parameter in Parameter::ALL {
            let spec = self.table.spec(parameter);
            let value = spec.default_value(self.native(parameter));
            let native = spec.to_native(value) as f32;
            self.write_native(parameter, native);
        }
    }

    fn write_native(&mut self, parameter: Parameter, native: f32) {
        match parameter {
            Parameter::Brightness => self.color_controls.brightness = native,
            Parameter::Contrast => self.color_controls.contrast = native,
            Parameter::Saturation => self.color_controls.saturation = native,
            Parameter::Warmth => {
                self.temperature.input_neutral = Neutral {
                    temperature: native,
                    tint: self.temperature.input_neutral.tint,
                }
            }
        }
    }

    fn native(&self, parameter: Parameter) -> f64 {
        let native = match parameter {
            Parameter::Brightness => self.color_controls.brightness,
            Parameter::Contrast => self.color_controls.contrast,
            Parameter::Saturation => self.color_controls.saturation,
            Parameter::Warmth => self.temperature.input_neutral.temperature,
        };
        native as f64
    }
}

impl Parameterized for ColourCorrection {
    fn all_parameters(&self) -> &[Parameter] {
        &Parameter::ALL
    }

    fn value(&self, parameter: Parameter) -> f64 {
        self.table.spec(parameter).to_normalized(self.native(parameter))
    }

    fn min_value(&self, parameter: Parameter) -> f64 {
        self.table.spec(parameter).min
    }

    fn max_value(&self, parameter: Parameter) -> f64 {
        self.table.spec(parameter).max
    }

    fn set_value(&mut self, value: f64, parameter: Parameter) -> ToolResult<f64> {
        if value.is_nan() {
            return Err(ToolError::NotFinite(parameter));
        }
        let spec = self.table.spec(parameter);
        let applied = spec.clamp(value);
        if applied != value {
            warn!(%parameter, value, applied, "value out of range, clamped");
        }
        let native = spec.to_native(applied) as f32;
        self.write_native(parameter, native);
        trace!(%parameter, applied, native, "ColourCorrection::set_value");
        Ok(applied)
    }

    fn reset(&mut self) {
        self.apply_defaults();
        debug!("ColourCorrection reset");
    }
}

impl Tool for ColourCorrection {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn icon(&self) -> &Icon {
        &self.icon
    }

    fn filter(&self) -> CompositeFilter {
        CompositeFilter::new(Self::NAME)
            .then(self.temperature)
            .then(self.color_controls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use looks_core::{Image, PixelLayout};
    use crate::ParameterSpec;
    use looks_ops::Filter;
    use std::collections::BTreeMap;

    #[test]
    fn test_defaults_are_identity() {
        let tool = ColourCorrection::new();
        assert!(tool.filter().is_identity());
        assert_relative_eq!(tool.value(Parameter::Brightness), 0.0);
        assert_relative_eq!(tool.value(Parameter::Contrast), 0.0);
        assert_relative_eq!(tool.value(Parameter::Saturation), 100.0);
        assert_relative_eq!(tool.value(Parameter::Warmth), 100.0);
    }

    #[test]
    fn test_linear_roundtrip_over_range() {
        let mut tool = ColourCorrection::new();
        for p in [Parameter::Brightness, Parameter::Saturation, Parameter::Warmth] {
            let (min, max) = (tool.min_value(p), tool.max_value(p));
            for step in 0..=20 {
                let v = min + (max - min) * step as f64 / 20.0;
                tool.set_value(v, p).unwrap();
                assert_relative_eq!(tool.value(p), v, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_contrast_piecewise() {
        let mut tool = ColourCorrection::new();
        tool.set_value(0.0, Parameter::Contrast).unwrap();
        assert_eq!(tool.color_controls().contrast, 1.0);
        tool.set_value(100.0, Parameter::Contrast).unwrap();
        assert_relative_eq!(tool.color_controls().contrast, 2.0);
        tool.set_value(-100.0, Parameter::Contrast).unwrap();
        assert_relative_eq!(tool.color_controls().contrast, 0.0);
        tool.set_value(-50.0, Parameter::Contrast).unwrap();
        assert_relative_eq!(tool.color_controls().contrast, 0.5);
        tool.set_value(50.0, Parameter::Contrast).unwrap();
        assert_relative_eq!(tool.color_controls().contrast, 1.5);
        assert_relative_eq!(tool.value(Parameter::Contrast), 50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_brightness_scale() {
        let mut tool = ColourCorrection::new();
        tool.set_value(50.0, Parameter::Brightness).unwrap();
        assert_relative_eq!(tool.color_controls().brightness, 0.5);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let mut tool = ColourCorrection::new();
        assert_eq!(tool.set_value(-400.0, Parameter::Saturation).unwrap(), 0.0);
        assert_eq!(tool.color_controls().saturation, 0.0);
        assert_eq!(tool.set_value(f64::INFINITY, Parameter::Brightness).unwrap(), 100.0);
    }

    #[test]
    fn test_nan_rejected() {
        let mut tool = ColourCorrection::new();
        tool.set_value(20.0, Parameter::Brightness).unwrap();
        assert_eq!(
            tool.set_value(f64::NAN, Parameter::Brightness),
            Err(ToolError::NotFinite(Parameter::Brightness))
        );
        assert_relative_eq!(tool.value(Parameter::Brightness), 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_warmth_sets_input_neutral_only() {
        let mut tool = ColourCorrection::new();
        tool.set_value(50.0, Parameter::Warmth).unwrap();
        assert_relative_eq!(tool.temperature().input_neutral.temperature, 3250.0);
        assert_eq!(tool.temperature().target_neutral, Neutral::default());
        assert!(!tool.filter().is_identity());
    }

    #[test]
    fn test_reset() {
        let mut tool = ColourCorrection::new();
        tool.set_value(30.0, Parameter::Contrast).unwrap();
        tool.set_value(10.0, Parameter::Warmth).unwrap();
        tool.reset();
        assert!(tool.filter().is_identity());
    }

    fn custom_table() -> Arc<ParameterTable> {
        let mut specs: BTreeMap<Parameter, ParameterSpec> = ParameterTable::default().into();
        specs.insert(Parameter::Warmth, ParameterSpec::linear(0.0, 100.0, 50.0));
        specs.insert(Parameter::Contrast, ParameterSpec::piecewise(-100.0, 100.0, 0.0, 1.5, 3.0));
        Arc::new(ParameterTable::from_specs(specs).unwrap())
    }

    #[test]
    fn test_custom_table_defaults_within_bounds() {
        let mut tool = ColourCorrection::with_table(custom_table());
        for p in Parameter::ALL {
            let v = tool.value(p);
            assert!(v >= tool.min_value(p) && v <= tool.max_value(p), "{p} = {v}");
        }
        assert_relative_eq!(tool.value(Parameter::Warmth), 100.0);
        assert_relative_eq!(tool.temperature().input_neutral.temperature, 5000.0);
        assert_relative_eq!(tool.value(Parameter::Contrast), 0.0);
        assert_relative_eq!(tool.color_controls().contrast, 1.5);

        tool.set_value(20.0, Parameter::Warmth).unwrap();
        tool.set_value(-60.0, Parameter::Contrast).unwrap();
        tool.reset();
        assert_relative_eq!(tool.value(Parameter::Warmth), 100.0);
        assert_relative_eq!(tool.value(Parameter::Contrast), 0.0);
    }

    #[test]
    fn test_filter_order_and_apply() {
        let mut tool = ColourCorrection::new();
        assert_eq!(tool.filter().names(), vec!["TemperatureAndTint", "ColorControls"]);
        tool.set_value(10.0, Parameter::Brightness).unwrap();
        let img = Image::filled(2, 2, PixelLayout::Rgb, &[0.2, 0.2, 0.2]).unwrap();
        let out = tool.apply(&img).unwrap();
        assert_relative_eq!(out.pixel(1, 1)[0], 0.3, epsilon = 1e-5);
    }

    #[test]
    fn test_gray_input_fails() {
        let tool = ColourCorrection::new();
        let img = Image::new(2, 2, PixelLayout::Gray);
        assert!(tool.apply(&img).is_err());
    }

    #[test]
    fn test_metadata() {
        let tool = ColourCorrection::new();
        assert_eq!(tool.name(), "Colour");
        assert_eq!(tool.icon().as_str(), "tools/colour");
        assert_eq!(tool.all_parameters(), &Parameter::ALL);
    }
}
