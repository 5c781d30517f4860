//! Pixel layout: stacked segments, axes, and the legend.
//!
//! Pure functions from stack geometry and scales to drawable rectangles. No
//! side effects; identical inputs produce identical output, so a re-run after
//! a filter change is safe to diff against the previous frame.

use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::data::SexCategory;
use crate::draw::{Axis, AxisTick, Orientation};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::scale::{Scale, ScaleSet};
use crate::stack::{SegmentId, StackSeries};

/// One stacked segment resolved to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    /// Identity used for pointer-event registration.
    pub id: SegmentId,
    /// Pixel rectangle in plot coordinates.
    pub rect: Rect,
    /// Fill color from the per-sex palette.
    pub fill: Rgba,
}

/// One legend row: a swatch, optionally with a label to its right.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Swatch rectangle in plot coordinates.
    pub swatch: Rect,
    /// Swatch fill.
    pub fill: Rgba,
    /// Label anchor and text; only the second column carries labels.
    pub label: Option<(Point, String)>,
}

/// Complete legend geometry: column headers plus swatch rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendGeometry {
    /// One header per sex column, in sub-band order.
    pub headers: Vec<(Point, String)>,
    /// Swatch rows, male column first.
    pub entries: Vec<LegendEntry>,
}

/// Suffix appended to second-column legend labels.
pub const LEGEND_LABEL_SUFFIX: &str = " SCHOOL";

/// Resolve stacked segments to pixel rectangles.
///
/// For each segment: `x = age(age) + sex(sex)`, `y = value(top)`,
/// `width = sex.bandwidth()`, `height = value(base) - value(top)`. Height is
/// never negative because `top >= base` and the value range is inverted.
///
/// Ids are assigned in level-major order, matching [`crate::stack::flatten`].
///
/// # Errors
///
/// Returns [`crate::Error::UnrecognizedCategory`] if a segment carries a sex,
/// age, or level outside the scale domains.
pub fn layout(series: &[StackSeries], scales: &ScaleSet) -> Result<Vec<SegmentGeometry>> {
    let mut geometry = Vec::new();
    for segment in series.iter().flat_map(|s| &s.segments) {
        let x = scales.age.position(&segment.age)? + scales.sex.position(&segment.sex)?;
        let y_top = scales.value.scale(segment.top as f32);
        let y_base = scales.value.scale(segment.base as f32);
        geometry.push(SegmentGeometry {
            id: SegmentId(geometry.len()),
            rect: Rect::new(x, y_top, scales.sex.bandwidth(), y_base - y_top),
            fill: scales.fill(&segment.sex, &segment.level)?,
        });
    }
    Ok(geometry)
}

/// Build the bottom (age) and left (value) axes.
///
/// Age ticks sit at band centers, one per category. Value ticks are the
/// round numbers the linear scale picks, mapped to y offsets.
#[must_use]
pub fn axis_layout(scales: &ScaleSet, config: &ChartConfig) -> (Axis, Axis) {
    let age_axis = Axis {
        orientation: Orientation::Bottom,
        ticks: scales
            .age
            .domain()
            .iter()
            .filter_map(|age| {
                // Positions of domain members never fail.
                let pos = scales.age.position(age).ok()?;
                Some(AxisTick {
                    offset: pos + scales.age.bandwidth() / 2.0,
                    label: age.clone(),
                })
            })
            .collect(),
        label: "Age".to_string(),
    };

    let value_axis = Axis {
        orientation: Orientation::Left,
        ticks: scales
            .value
            .ticks(config.value_tick_count)
            .into_iter()
            .map(|v| AxisTick { offset: scales.value.scale(v), label: format!("{v}") })
            .collect(),
        label: "No. of teachers".to_string(),
    };

    (age_axis, value_axis)
}

/// Build legend geometry: one swatch row per (sex category, level) pair
/// arranged in two columns, the second column labeled with the level name
/// plus [`LEGEND_LABEL_SUFFIX`].
///
/// # Errors
///
/// Returns [`crate::Error::UnrecognizedCategory`] if the sex domain holds a
/// value outside the two recognized categories.
pub fn legend_layout(scales: &ScaleSet, config: &ChartConfig) -> Result<LegendGeometry> {
    let origin = config.legend_origin();
    let swatch = config.legend_swatch;
    let spacing = config.legend_spacing;

    let headers = scales
        .sex
        .domain()
        .iter()
        .enumerate()
        .map(|(i, code)| {
            (origin.offset((2.0 * swatch + spacing) * i as f32, 0.0), code.clone())
        })
        .collect();

    let mut entries = Vec::new();
    for code in scales.sex.domain() {
        let category = SexCategory::from_code(code)?;
        let (column_x, ordinal) = match category {
            SexCategory::MaleCoded => (0.0, &scales.male),
            SexCategory::FemaleCoded => (2.0 * swatch, &scales.female),
        };
        for (i, level) in ordinal.domain().iter().enumerate() {
            let top_left =
                origin.offset(column_x, i as f32 * (swatch + spacing) + spacing);
            let label = match category {
                SexCategory::MaleCoded => None,
                SexCategory::FemaleCoded => Some((
                    top_left.offset(swatch + spacing, swatch - spacing),
                    format!("{level}{LEGEND_LABEL_SUFFIX}"),
                )),
            };
            entries.push(LegendEntry {
                swatch: Rect::new(top_left.x, top_left.y, swatch, swatch),
                fill: ordinal.color(level)?,
                label,
            });
        }
    }

    Ok(LegendGeometry { headers, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, level_order};
    use crate::color::{FEMALE_PALETTE, MALE_PALETTE};
    use crate::data::Row;
    use crate::scale::{BandScale, LinearScale, OrdinalScale};
    use crate::stack::build_stacks;
    use approx::assert_relative_eq;

    fn reference_rows() -> Vec<Row> {
        vec![
            Row::new("1996", "MF", "25-29", "PRIMARY", 10),
            Row::new("1996", "MF", "25-29", "SECONDARY", 5),
            Row::new("1996", "F", "25-29", "PRIMARY", 8),
        ]
    }

    fn scales_for(rows: &[Row], max_total: f32, config: &ChartConfig) -> ScaleSet {
        let levels = level_order(rows, Some("1996"));
        ScaleSet {
            age: BandScale::new(
                vec!["25-29".into()],
                (0.0, config.band_extent()),
                config.age_padding,
                "age",
            )
            .unwrap(),
            sex: BandScale::new(
                vec!["MF".into(), "F".into()],
                (0.0, 300.0),
                config.sex_padding,
                "sex",
            )
            .unwrap(),
            value: LinearScale::new((0.0, max_total), (config.plot_height(), 0.0)).unwrap(),
            male: OrdinalScale::new(levels.clone(), MALE_PALETTE.to_vec()).unwrap(),
            female: OrdinalScale::new(levels, FEMALE_PALETTE.to_vec()).unwrap(),
        }
    }

    #[test]
    fn test_layout_geometry() {
        let rows = reference_rows();
        let config = ChartConfig::default();
        let scales = scales_for(&rows, 15.0, &config);
        let rollups = aggregate(&rows, Some("1996")).unwrap();
        let series = build_stacks(&rollups, &level_order(&rows, Some("1996")));

        let geometry = layout(&series, &scales).unwrap();
        assert_eq!(geometry.len(), 3);

        // Heights are proportional to counts and never negative.
        let unit = config.plot_height() / 15.0;
        assert_relative_eq!(geometry[0].rect.height, 10.0 * unit, epsilon = 1e-3);
        assert_relative_eq!(geometry[1].rect.height, 8.0 * unit, epsilon = 1e-3);
        assert_relative_eq!(geometry[2].rect.height, 5.0 * unit, epsilon = 1e-3);
        assert!(geometry.iter().all(|g| g.rect.height >= 0.0));

        // The SECONDARY segment sits directly on top of MF PRIMARY.
        assert_relative_eq!(
            geometry[2].rect.y + geometry[2].rect.height,
            geometry[0].rect.y,
            epsilon = 1e-3
        );
        assert_relative_eq!(geometry[2].rect.x, geometry[0].rect.x, epsilon = 1e-3);

        // Widths all equal the sex bandwidth.
        for g in &geometry {
            assert_relative_eq!(g.rect.width, scales.sex.bandwidth(), epsilon = 1e-3);
        }

        // Fills come from the per-sex palettes.
        assert_eq!(geometry[0].fill, MALE_PALETTE[0]);
        assert_eq!(geometry[1].fill, FEMALE_PALETTE[0]);
        assert_eq!(geometry[2].fill, MALE_PALETTE[1]);
    }

    #[test]
    fn test_layout_idempotent() {
        let rows = reference_rows();
        let config = ChartConfig::default();
        let scales = scales_for(&rows, 15.0, &config);
        let rollups = aggregate(&rows, Some("1996")).unwrap();
        let series = build_stacks(&rollups, &level_order(&rows, Some("1996")));

        let first = layout(&series, &scales).unwrap();
        let second = layout(&series, &scales).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_rejects_unknown_age() {
        let rows = reference_rows();
        let config = ChartConfig::default();
        let scales = scales_for(&rows, 15.0, &config);

        let other = vec![Row::new("1996", "MF", "60-64", "PRIMARY", 1)];
        let rollups = aggregate(&other, Some("1996")).unwrap();
        let series = build_stacks(&rollups, &level_order(&other, Some("1996")));
        assert!(layout(&series, &scales).is_err());
    }

    #[test]
    fn test_axis_layout() {
        let rows = reference_rows();
        let config = ChartConfig::default();
        let scales = scales_for(&rows, 8500.0, &config);

        let (age_axis, value_axis) = axis_layout(&scales, &config);
        assert_eq!(age_axis.orientation, Orientation::Bottom);
        assert_eq!(age_axis.ticks.len(), 1);
        assert_eq!(age_axis.ticks[0].label, "25-29");
        assert_eq!(age_axis.label, "Age");

        assert_eq!(value_axis.orientation, Orientation::Left);
        assert_eq!(value_axis.label, "No. of teachers");
        // Round tick labels, zero at the bottom of the plot.
        assert_eq!(value_axis.ticks[0].label, "0");
        assert_relative_eq!(value_axis.ticks[0].offset, config.plot_height());
        assert_eq!(value_axis.ticks[1].label, "1000");
    }

    #[test]
    fn test_legend_two_columns_second_labeled() {
        let rows = reference_rows();
        let config = ChartConfig::default();
        let scales = scales_for(&rows, 15.0, &config);

        let legend = legend_layout(&scales, &config).unwrap();
        assert_eq!(legend.headers.len(), 2);
        assert_eq!(legend.headers[0].1, "MF");
        assert_eq!(legend.headers[1].1, "F");
        assert_relative_eq!(
            legend.headers[1].0.x - legend.headers[0].0.x,
            2.0 * config.legend_swatch + config.legend_spacing
        );

        // Two levels per column.
        assert_eq!(legend.entries.len(), 4);
        let male: Vec<&LegendEntry> =
            legend.entries.iter().filter(|e| e.label.is_none()).collect();
        let female: Vec<&LegendEntry> =
            legend.entries.iter().filter(|e| e.label.is_some()).collect();
        assert_eq!(male.len(), 2);
        assert_eq!(female.len(), 2);

        // Female column offset by two swatch widths, labels suffixed.
        assert_relative_eq!(
            female[0].swatch.x - male[0].swatch.x,
            2.0 * config.legend_swatch
        );
        let (_, text) = female[0].label.as_ref().unwrap();
        assert_eq!(text, "PRIMARY SCHOOL");

        // Rows spaced swatch + spacing apart.
        assert_relative_eq!(
            male[1].swatch.y - male[0].swatch.y,
            config.legend_swatch + config.legend_spacing
        );
    }
}
