//! Scale functions for data-to-pixel mappings.
//!
//! Three scale kinds cover the chart: a band scale for categorical positions
//! (age groups and the nested sex sub-bands), a linear scale for counts, and
//! an ordinal scale mapping school levels to palette colors.

use crate::color::Rgba;
use crate::data::SexCategory;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// The range may be inverted (start greater than stop), which is how counts
/// map to y pixels with larger values higher on the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain min equals domain max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Round tick values covering the domain, aiming for `count` ticks.
    ///
    /// Steps are powers of ten times 1, 2, or 5, so axis labels land on
    /// round numbers.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        let span = hi - lo;
        if span <= 0.0 || count == 0 {
            return vec![lo];
        }

        let raw_step = span / count as f32;
        let power = raw_step.log10().floor();
        let base = 10.0_f32.powf(power);
        let err = raw_step / base;
        let step = base
            * if err >= 50.0_f32.sqrt() {
                10.0
            } else if err >= 10.0_f32.sqrt() {
                5.0
            } else if err >= 2.0_f32.sqrt() {
                2.0
            } else {
                1.0
            };

        let mut ticks = Vec::new();
        let mut tick = (lo / step).ceil() * step;
        while tick <= hi + step * 1e-3 {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Band scale: categorical-to-pixel mapping allocating an equal-width
/// interval per category with uniform padding between bands.
///
/// step = extent / max(1, n - padding + 2 * padding), bandwidth =
/// step * (1 - padding), bands centered in the leftover space.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f32,
    step: f32,
    bandwidth: f32,
    kind: &'static str,
}

impl BandScale {
    /// Create a band scale over `domain`, spread across `range`, with the
    /// same inner and outer padding fraction.
    ///
    /// `kind` names the categorical field for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty or padding is not in [0, 1).
    pub fn new(
        domain: Vec<String>,
        range: (f32, f32),
        padding: f32,
        kind: &'static str,
    ) -> Result<Self> {
        if domain.is_empty() {
            return Err(Error::ScaleDomain(format!("band scale over {kind} has empty domain")));
        }
        if !(0.0..1.0).contains(&padding) {
            return Err(Error::ScaleDomain(format!("band padding {padding} outside [0, 1)")));
        }

        let n = domain.len() as f32;
        let extent = range.1 - range.0;
        let step = extent / (n - padding + 2.0 * padding).max(1.0);
        let bandwidth = step * (1.0 - padding);
        // Center the bands in whatever the steps do not cover.
        let start = range.0 + (extent - step * (n - padding)) * 0.5;

        Ok(Self { domain, start, step, bandwidth, kind })
    }

    /// Pixel position of the leading edge of a category's band.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedCategory`] for values outside the domain.
    pub fn position(&self, key: &str) -> Result<f32> {
        self.domain
            .iter()
            .position(|v| v.as_str() == key)
            .map(|i| self.start + self.step * i as f32)
            .ok_or_else(|| Error::unrecognized(self.kind, key))
    }

    /// Width of each band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// The ordered category domain.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Ordinal scale mapping school levels to palette colors.
///
/// The palette recycles when the domain is longer than the color range.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    colors: Vec<Rgba>,
}

impl OrdinalScale {
    /// Create an ordinal scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the color range is empty.
    pub fn new(domain: Vec<String>, colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("ordinal scale requires at least one color".to_string()));
        }
        Ok(Self { domain, colors })
    }

    /// Color for one domain value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedCategory`] for values outside the domain.
    pub fn color(&self, value: &str) -> Result<Rgba> {
        self.domain
            .iter()
            .position(|v| v.as_str() == value)
            .map(|i| self.colors[i % self.colors.len()])
            .ok_or_else(|| Error::unrecognized("level", value))
    }

    /// The ordered domain.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// The four scales of one rendered frame.
///
/// Rebuilt on every filter change except for `value`, whose domain maximum is
/// fixed at construction from the all-years rollup pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    /// Age bracket to outer band position.
    pub age: BandScale,
    /// Sex code to sub-band position within one age band.
    pub sex: BandScale,
    /// Count to y pixel (inverted range).
    pub value: LinearScale,
    /// Level to fill color for male-coded stacks.
    pub male: OrdinalScale,
    /// Level to fill color for female-coded stacks.
    pub female: OrdinalScale,
}

impl ScaleSet {
    /// Fill color for a (sex, level) pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedCategory`] when either value is outside
    /// its domain; there is deliberately no fallback color.
    pub fn fill(&self, sex: &str, level: &str) -> Result<Rgba> {
        match SexCategory::from_code(sex)? {
            SexCategory::MaleCoded => self.male.color(level),
            SexCategory::FemaleCoded => self.female.color(level),
        }
    }
}
