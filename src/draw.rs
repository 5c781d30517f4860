//! Draw command vocabulary and the external surface traits.
//!
//! The pipeline never draws; it emits an ordered sequence of [`DrawCommand`]
//! values into a [`Canvas`] and tooltip updates into a [`TooltipSink`]. The
//! host owns the rendering technology and the pointer-event plumbing.

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::stack::SegmentId;

/// Side of the plot an axis attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal axis under the plot area.
    Bottom,
    /// Vertical axis left of the plot area.
    Left,
}

/// One tick mark: pixel offset along the axis plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Offset from the axis origin, in pixels.
    pub offset: f32,
    /// Tick label text.
    pub label: String,
}

/// Axis geometry ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Which side of the plot this axis attaches to.
    pub orientation: Orientation,
    /// Tick marks in axis order.
    pub ticks: Vec<AxisTick>,
    /// Axis title.
    pub label: String,
}

/// One drawing instruction for the surface.
///
/// `FillRect` doubles as the pointer-event registration for its segment: the
/// host must route enter/move/leave events on that rectangle back to the
/// chart tagged with the same [`SegmentId`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Remove everything drawn for the previous frame.
    Clear,
    /// Fill one stacked-segment rectangle and register it for pointer events.
    FillRect {
        /// Identity the host reports pointer events under.
        id: SegmentId,
        /// Pixel rectangle in plot coordinates.
        rect: Rect,
        /// Fill color.
        fill: Rgba,
    },
    /// Draw an axis with its ticks and title.
    Axis(Axis),
    /// Draw one legend swatch.
    LegendSwatch {
        /// Swatch rectangle in plot coordinates.
        rect: Rect,
        /// Swatch fill (also used for the stroke).
        fill: Rgba,
    },
    /// Draw one legend text (column header or entry label).
    LegendLabel {
        /// Text anchor position in plot coordinates.
        position: Point,
        /// Label text.
        text: String,
    },
    /// Overlay the hovered segment.
    HighlightSegment {
        /// Segment to overlay.
        id: SegmentId,
        /// Overlay color.
        overlay: Rgba,
    },
    /// Restore the hovered segment's original fill.
    ClearHighlight {
        /// Segment to restore.
        id: SegmentId,
    },
}

/// Receiver of ordered draw commands.
pub trait Canvas {
    /// Accept one draw command.
    fn draw(&mut self, command: DrawCommand);
}

/// Recording canvas: any `Vec<DrawCommand>` collects the emitted commands.
impl Canvas for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Tooltip state pushed to the host on every transition that changes it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipUpdate {
    /// Whether the tooltip should be shown.
    pub visible: bool,
    /// Screen position (pointer plus the configured offset).
    pub position: Point,
    /// Heading, e.g. "SECONDARY SCHOOL".
    pub label: String,
    /// Segment line, e.g. "5 male teachers".
    pub count_line: String,
    /// Group line, e.g. "15 in total".
    pub total_line: String,
}

impl TooltipUpdate {
    /// A hidden tooltip with empty content.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            position: Point::ORIGIN,
            label: String::new(),
            count_line: String::new(),
            total_line: String::new(),
        }
    }
}

/// Receiver of tooltip updates.
pub trait TooltipSink {
    /// Accept one tooltip update.
    fn tooltip(&mut self, update: TooltipUpdate);
}

/// Recording sink: any `Vec<TooltipUpdate>` collects the updates.
impl TooltipSink for Vec<TooltipUpdate> {
    fn tooltip(&mut self, update: TooltipUpdate) {
        self.push(update);
    }
}
