//! Zero-offset stacking of rollups over the level order.

use crate::data::Rollup;

/// Identifier of one stacked segment within the current frame.
///
/// Indexes the flattened, level-major segment list produced by
/// [`flatten`]; draw commands register rectangles under this id and pointer
/// events reference it. Ids are only valid until the next filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentId(pub usize);

/// One segment of a stacked bar, in data units.
///
/// `base <= top` always holds (strict for non-zero counts); a level absent
/// from a rollup emits no segment at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackedSegment {
    /// Raw sex code of the owning rollup.
    pub sex: String,
    /// Age bracket of the owning rollup.
    pub age: String,
    /// School level this segment represents.
    pub level: String,
    /// Cumulative count below this segment.
    pub base: u64,
    /// Cumulative count including this segment.
    pub top: u64,
    /// Index of the owning rollup in the aggregation output.
    pub rollup_index: usize,
}

impl StackedSegment {
    /// Count contributed by this segment alone.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.top - self.base
    }
}

/// All segments of one school level, across rollups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSeries {
    /// The level shared by every segment in this series.
    pub level: String,
    /// Segments in rollup order.
    pub segments: Vec<StackedSegment>,
}

/// Build one series per level, cumulating counts over `level_order`.
///
/// The stack is zero-offset: the first level present in a rollup bases at 0,
/// and consecutive present levels abut exactly. The top of a stack reflects
/// the per-level counts, which under the duplicate-row overwrite policy may
/// fall short of the rollup's raw total.
#[must_use]
pub fn build_stacks(rollups: &[Rollup], level_order: &[String]) -> Vec<StackSeries> {
    level_order
        .iter()
        .map(|level| StackSeries {
            level: level.clone(),
            segments: rollups
                .iter()
                .enumerate()
                .filter_map(|(rollup_index, rollup)| {
                    let count = rollup.level_count(level)?;
                    let base: u64 = level_order
                        .iter()
                        .take_while(|l| *l != level)
                        .filter_map(|l| rollup.level_count(l))
                        .map(u64::from)
                        .sum();
                    Some(StackedSegment {
                        sex: rollup.key.sex.clone(),
                        age: rollup.key.age.clone(),
                        level: level.clone(),
                        base,
                        top: base + u64::from(count),
                        rollup_index,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Flatten series into the level-major segment list that [`SegmentId`]
/// indexes. Layout and the interaction controller both iterate in this order.
#[must_use]
pub fn flatten(series: &[StackSeries]) -> Vec<StackedSegment> {
    series.iter().flat_map(|s| s.segments.iter().cloned()).collect()
}
