//! The chart: state, events, and the interaction state machine.
//!
//! [`Chart`] owns the only mutable state in the pipeline. External events
//! (year selection, pointer enter/move/leave) arrive one at a time through
//! [`Chart::handle`]; each is fully processed before the next, so no two
//! aggregation passes ever interleave. Recomputing geometry is separated from
//! emitting draw commands, so the whole pipeline is testable without a
//! drawing surface.

use crate::aggregate::{aggregate, global_max_total, level_order};
use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::data::{distinct_in_order, distinct_years, Row, Rollup, SexCategory};
use crate::draw::{Canvas, DrawCommand, TooltipSink, TooltipUpdate};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::layout::{axis_layout, layout, legend_layout, LegendGeometry, SegmentGeometry};
use crate::scale::{BandScale, LinearScale, OrdinalScale, ScaleSet};
use crate::stack::{build_stacks, flatten, SegmentId, StackedSegment};

/// External events the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The year selector changed.
    FilterChanged(String),
    /// The pointer entered a registered segment rectangle.
    PointerEnter(SegmentId),
    /// The pointer moved while over the chart.
    PointerMove(Point),
    /// The pointer left the hovered segment.
    PointerLeave,
}

/// Hover half of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// No segment hovered; tooltip hidden.
    #[default]
    Idle,
    /// Pointer over one segment; tooltip visible.
    Hovering(SegmentId),
}

/// Everything recomputed by a filter change, as one immutable snapshot.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Rollups for the selected year.
    pub rollups: Vec<Rollup>,
    /// Canonical level ordering shared by stacks, colors, and legend.
    pub level_order: Vec<String>,
    /// Flattened segments in id order.
    pub segments: Vec<StackedSegment>,
    /// Pixel geometry, parallel to `segments`.
    pub geometry: Vec<SegmentGeometry>,
    /// Legend geometry.
    pub legend: LegendGeometry,
    /// Scales used to produce this frame.
    pub scales: ScaleSet,
}

impl Frame {
    /// A segment and its owning rollup, if `id` belongs to this frame.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<(&StackedSegment, &Rollup)> {
        let segment = self.segments.get(id.0)?;
        let rollup = self.rollups.get(segment.rollup_index)?;
        Some((segment, rollup))
    }
}

/// The chart's single mutable state value.
///
/// Written only by [`Chart::handle`]; everything else reads a fully-formed
/// snapshot.
#[derive(Debug, Clone)]
pub struct ChartState {
    /// Currently selected year.
    pub selected_year: String,
    /// Snapshot for the selected year.
    pub frame: Frame,
    /// Hover half of the state machine.
    pub hover: HoverState,
    /// Last pointer position seen, for tooltip placement on enter.
    pub pointer: Point,
}

/// Interactive grouped-and-stacked bar chart.
#[derive(Debug)]
pub struct Chart {
    rows: Vec<Row>,
    config: ChartConfig,
    years: Vec<String>,
    global_max: u64,
    state: ChartState,
}

impl Chart {
    /// Build a chart from pre-parsed rows.
    ///
    /// The value-scale maximum is fixed here from the all-years rollup pass,
    /// and the earliest year becomes the initial selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDefaultYear`] for an empty dataset, or any error
    /// the first render pass raises (unrecognized categories, for instance).
    pub fn new(rows: Vec<Row>, config: ChartConfig) -> Result<Self> {
        let years = distinct_years(&rows);
        let default_year = years.first().cloned().ok_or(Error::NoDefaultYear)?;
        let global_max = global_max_total(&rows)?;

        let frame = compute_frame(&rows, &default_year, global_max, &config)?;
        Ok(Self {
            rows,
            config,
            years,
            global_max,
            state: ChartState {
                selected_year: default_year,
                frame,
                hover: HoverState::Idle,
                pointer: Point::ORIGIN,
            },
        })
    }

    /// The distinct years available to the filter selector, ascending.
    #[must_use]
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Fixed maximum of the value-scale domain.
    #[must_use]
    pub fn global_max_total(&self) -> u64 {
        self.global_max
    }

    /// Emit the full draw-command sequence for the current frame.
    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.draw(DrawCommand::Clear);

        let (age_axis, value_axis) = axis_layout(&self.state.frame.scales, &self.config);
        canvas.draw(DrawCommand::Axis(age_axis));
        canvas.draw(DrawCommand::Axis(value_axis));

        for g in &self.state.frame.geometry {
            canvas.draw(DrawCommand::FillRect { id: g.id, rect: g.rect, fill: g.fill });
        }

        let legend = &self.state.frame.legend;
        for (position, text) in &legend.headers {
            canvas.draw(DrawCommand::LegendLabel { position: *position, text: text.clone() });
        }
        for entry in &legend.entries {
            canvas.draw(DrawCommand::LegendSwatch { rect: entry.swatch, fill: entry.fill });
            if let Some((position, text)) = &entry.label {
                canvas.draw(DrawCommand::LegendLabel {
                    position: *position,
                    text: text.clone(),
                });
            }
        }
    }

    /// Process one event, emitting draw commands and tooltip updates.
    ///
    /// Pointer events referencing a segment the current frame does not know
    /// (stale after a filter change) are ignored.
    ///
    /// # Errors
    ///
    /// `FilterChanged` for a year with no rows fails with
    /// [`Error::EmptyDataset`]; years offered by [`Chart::years`] never do.
    pub fn handle(
        &mut self,
        event: ChartEvent,
        canvas: &mut impl Canvas,
        tooltips: &mut impl TooltipSink,
    ) -> Result<()> {
        match event {
            ChartEvent::FilterChanged(year) => {
                let frame = compute_frame(&self.rows, &year, self.global_max, &self.config)?;
                self.state.selected_year = year;
                self.state.frame = frame;
                self.state.hover = HoverState::Idle;
                tooltips.tooltip(TooltipUpdate::hidden());
                self.render(canvas);
            }
            ChartEvent::PointerEnter(id) => {
                let update = match self.state.frame.segment(id) {
                    Some((segment, rollup)) => self.tooltip_for(segment, rollup)?,
                    None => return Ok(()),
                };
                if let HoverState::Hovering(previous) = self.state.hover {
                    if previous != id {
                        canvas.draw(DrawCommand::ClearHighlight { id: previous });
                    }
                }
                self.state.hover = HoverState::Hovering(id);
                canvas.draw(DrawCommand::HighlightSegment {
                    id,
                    overlay: Rgba::HOVER_OVERLAY,
                });
                tooltips.tooltip(update);
            }
            ChartEvent::PointerMove(position) => {
                self.state.pointer = position;
                if let HoverState::Hovering(id) = self.state.hover {
                    if let Some((segment, rollup)) = self.state.frame.segment(id) {
                        let update = self.tooltip_for(segment, rollup)?;
                        tooltips.tooltip(update);
                    }
                }
            }
            ChartEvent::PointerLeave => {
                if let HoverState::Hovering(id) = self.state.hover {
                    canvas.draw(DrawCommand::ClearHighlight { id });
                    self.state.hover = HoverState::Idle;
                    tooltips.tooltip(TooltipUpdate::hidden());
                }
            }
        }
        Ok(())
    }

    /// Tooltip content for one segment and its owning rollup.
    fn tooltip_for(&self, segment: &StackedSegment, rollup: &Rollup) -> Result<TooltipUpdate> {
        let category = SexCategory::from_code(&segment.sex)?;
        let offset = self.config.tooltip_offset;

        Ok(TooltipUpdate {
            visible: true,
            position: self.state.pointer.offset(offset.x, offset.y),
            label: format!("{} SCHOOL", segment.level),
            count_line: format!("{} {} teachers", segment.count(), category.noun()),
            total_line: format!("{} in total", rollup.total),
        })
    }
}

/// Run the aggregate -> stack -> scale -> layout pipeline for one year.
///
/// Pure except for allocation; the caller installs the result as the new
/// frame snapshot.
fn compute_frame(
    rows: &[Row],
    year: &str,
    global_max: u64,
    config: &ChartConfig,
) -> Result<Frame> {
    let rollups = aggregate(rows, Some(year))?;
    let levels = level_order(rows, Some(year));

    let filtered = || rows.iter().filter(|r| r.year == year);
    let ages = distinct_in_order(filtered(), |r| r.age.as_str());
    let sexes = distinct_in_order(filtered(), |r| r.sex.as_str());

    let age = BandScale::new(ages, (0.0, config.band_extent()), config.age_padding, "age")?;
    let sex = BandScale::new(sexes, (0.0, age.bandwidth()), config.sex_padding, "sex")?;
    // An all-zero dataset is valid; clamp so the value domain keeps a span
    // and the bars render with zero height.
    let value =
        LinearScale::new((0.0, global_max.max(1) as f32), (config.plot_height(), 0.0))?;
    let male = OrdinalScale::new(levels.clone(), SexCategory::MaleCoded.palette().to_vec())?;
    let female =
        OrdinalScale::new(levels.clone(), SexCategory::FemaleCoded.palette().to_vec())?;
    let scales = ScaleSet { age, sex, value, male, female };

    let series = build_stacks(&rollups, &levels);
    let segments = flatten(&series);
    let geometry = layout(&series, &scales)?;
    let legend = legend_layout(&scales, config)?;

    Ok(Frame { rollups, level_order: levels, segments, geometry, legend, scales })
}
