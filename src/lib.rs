//! # bandstack
//!
//! Aggregation, stacking, and layout pipeline for an interactive grouped-and-
//! stacked bar chart, plus the interaction state machine that drives
//! re-aggregation and tooltip display.
//!
//! The crate turns flat observation rows (teacher counts by year, age
//! bracket, sex, and school level) into concrete pixel geometry: rollups per
//! (sex, age) group, zero-offset stacks over the school-level ordering, band
//! and linear scales, and bar/legend/axis rectangles. Rendering, CSV parsing,
//! and event dispatch stay outside: the chart emits [`draw::DrawCommand`]
//! values into a [`draw::Canvas`] and tooltip updates into a
//! [`draw::TooltipSink`], and consumes discrete [`chart::ChartEvent`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use bandstack::prelude::*;
//!
//! let rows = vec![
//!     Row::new("1996", "MF", "25-29", "PRIMARY", 10),
//!     Row::new("1996", "MF", "25-29", "SECONDARY", 5),
//!     Row::new("1996", "F", "25-29", "PRIMARY", 8),
//! ];
//!
//! let mut chart = Chart::new(rows, ChartConfig::default())?;
//! let mut canvas: Vec<DrawCommand> = Vec::new();
//! chart.render(&mut canvas);
//!
//! let mut tooltips: Vec<TooltipUpdate> = Vec::new();
//! chart.handle(ChartEvent::PointerEnter(SegmentId(2)), &mut canvas, &mut tooltips)?;
//! assert_eq!(tooltips[0].label, "SECONDARY SCHOOL");
//! # Ok::<(), bandstack::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serde derives on the public data-model types

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the per-sex level palettes.
pub mod color;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Data model: rows, sex categories, rollups.
pub mod data;

/// Grouping and rollup of raw rows.
pub mod aggregate;

/// Zero-offset stacking over the level order.
pub mod stack;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Layout and Interaction Modules
// ============================================================================

/// Chart geometry configuration.
pub mod config;

/// Pixel layout of segments, axes, and legend.
pub mod layout;

/// Draw command vocabulary and surface traits.
pub mod draw;

/// Chart state and the interaction state machine.
pub mod chart;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for bandstack operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use bandstack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{Chart, ChartEvent, ChartState, Frame, HoverState};
    pub use crate::color::Rgba;
    pub use crate::config::ChartConfig;
    pub use crate::data::{Row, Rollup, RollupKey, SexCategory};
    pub use crate::draw::{Axis, Canvas, DrawCommand, TooltipSink, TooltipUpdate};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Point, Rect};
    pub use crate::scale::{BandScale, LinearScale, OrdinalScale, Scale, ScaleSet};
    pub use crate::stack::{SegmentId, StackedSegment};
}
