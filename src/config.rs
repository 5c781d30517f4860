//! Chart geometry configuration.

use crate::geometry::Point;

/// Pixel margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Left margin.
    pub left: f32,
}

/// Geometry constants of one chart.
///
/// Defaults match the reference chart: a 1020x500 surface, 250px reserved on
/// the right for the legend, band paddings 0.1 (age) and 0.2 (sex).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Overall surface width in pixels.
    pub width: f32,
    /// Overall surface height in pixels.
    pub height: f32,
    /// Margins around the plot area.
    pub margin: Margin,
    /// Horizontal space reserved for the legend inside the plot area.
    pub legend_area: f32,
    /// Legend swatch side length.
    pub legend_swatch: f32,
    /// Spacing between legend rows and between swatch and label.
    pub legend_spacing: f32,
    /// Vertical offset of the legend from the top of the plot area.
    pub legend_y: f32,
    /// Padding fraction between age bands.
    pub age_padding: f32,
    /// Padding fraction between sex sub-bands (tighter than age).
    pub sex_padding: f32,
    /// Fixed offset of the tooltip from the pointer.
    pub tooltip_offset: Point,
    /// Requested tick count for the value axis.
    pub value_tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1020.0,
            height: 500.0,
            margin: Margin { top: 20.0, right: 20.0, bottom: 30.0, left: 40.0 },
            legend_area: 250.0,
            legend_swatch: 18.0,
            legend_spacing: 4.0,
            legend_y: 50.0,
            age_padding: 0.1,
            sex_padding: 0.2,
            tooltip_offset: Point::new(20.0, 20.0),
            value_tick_count: 10,
        }
    }
}

impl ChartConfig {
    /// Create a configuration with the reference defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall surface dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the legend reserved width.
    #[must_use]
    pub fn legend_area(mut self, area: f32) -> Self {
        self.legend_area = area;
        self
    }

    /// Set the tooltip pointer offset.
    #[must_use]
    pub fn tooltip_offset(mut self, offset: Point) -> Self {
        self.tooltip_offset = offset;
        self
    }

    /// Plot area width (surface minus horizontal margins).
    #[must_use]
    pub fn plot_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    /// Plot area height (surface minus vertical margins).
    #[must_use]
    pub fn plot_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Horizontal extent available to the age bands.
    #[must_use]
    pub fn band_extent(&self) -> f32 {
        self.plot_width() - self.legend_area
    }

    /// Top-left corner of the legend, in plot coordinates.
    #[must_use]
    pub fn legend_origin(&self) -> Point {
        Point::new(self.plot_width() - self.legend_area, self.legend_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_defaults() {
        let config = ChartConfig::default();
        assert_relative_eq!(config.plot_width(), 960.0);
        assert_relative_eq!(config.plot_height(), 450.0);
        assert_relative_eq!(config.band_extent(), 710.0);
        assert_relative_eq!(config.legend_origin().x, 710.0);
        assert_relative_eq!(config.legend_origin().y, 50.0);
    }

    #[test]
    fn test_builder_setters() {
        let config = ChartConfig::new().dimensions(800.0, 400.0).legend_area(200.0);
        assert_relative_eq!(config.plot_width(), 740.0);
        assert_relative_eq!(config.band_extent(), 540.0);
    }
}
