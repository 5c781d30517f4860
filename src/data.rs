//! Data model: raw observation rows, sex categories, and rollup records.

use std::collections::BTreeMap;

use crate::color::{Rgba, FEMALE_PALETTE, MALE_PALETTE};
use crate::error::{Error, Result};

/// One observation: teacher count for a (year, sex, age, level) combination.
///
/// Rows are produced by an external data provider with the count already
/// converted to an integer; the pipeline never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Reporting year, e.g. "1996".
    pub year: String,
    /// Raw sex code, "MF" (male-coded) or "F" (female-coded).
    pub sex: String,
    /// Age bracket, e.g. "25-29".
    pub age: String,
    /// School level, e.g. "PRIMARY".
    pub level: String,
    /// Number of teachers; non-negative by construction.
    pub count: u32,
}

impl Row {
    /// Create a new row.
    #[must_use]
    pub fn new(year: &str, sex: &str, age: &str, level: &str, count: u32) -> Self {
        Self {
            year: year.to_string(),
            sex: sex.to_string(),
            age: age.to_string(),
            level: level.to_string(),
            count,
        }
    }
}

/// The two recognized sex categories of the source data.
///
/// Any other raw value is rejected with [`Error::UnrecognizedCategory`]
/// rather than falling through to an undefined color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SexCategory {
    /// "MF" in the source data.
    MaleCoded,
    /// "F" in the source data.
    FemaleCoded,
}

impl SexCategory {
    /// Parse a raw sex code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedCategory`] for anything but "MF" or "F".
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "MF" => Ok(SexCategory::MaleCoded),
            "F" => Ok(SexCategory::FemaleCoded),
            other => Err(Error::unrecognized("sex", other)),
        }
    }

    /// The raw code this category was parsed from.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            SexCategory::MaleCoded => "MF",
            SexCategory::FemaleCoded => "F",
        }
    }

    /// Noun used in tooltip text ("male" / "female").
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            SexCategory::MaleCoded => "male",
            SexCategory::FemaleCoded => "female",
        }
    }

    /// Ordered fill palette for this category, indexed by level order.
    #[must_use]
    pub const fn palette(self) -> &'static [Rgba] {
        match self {
            SexCategory::MaleCoded => &MALE_PALETTE,
            SexCategory::FemaleCoded => &FEMALE_PALETTE,
        }
    }
}

/// Grouping key of a rollup.
///
/// `year` is populated only in the all-years pass used to derive the global
/// value-scale maximum; the per-year view groups by (sex, age) alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollupKey {
    /// Year component, present only when aggregating across all years.
    pub year: Option<String>,
    /// Raw sex code.
    pub sex: String,
    /// Age bracket.
    pub age: String,
}

/// Aggregated record for one [`RollupKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rollup {
    /// Grouping key.
    pub key: RollupKey,
    /// Count per school level. Duplicate rows for the same level overwrite
    /// earlier ones (last write wins).
    pub per_level_count: BTreeMap<String, u32>,
    /// Sum of `count` over every raw row in the group. Summed from raw rows,
    /// not from `per_level_count`, so duplicates still contribute here.
    pub total: u64,
}

impl Rollup {
    /// Count for one level, if that level occurs in this group.
    #[must_use]
    pub fn level_count(&self, level: &str) -> Option<u32> {
        self.per_level_count.get(level).copied()
    }
}

/// Distinct years, ascending. The first entry is the default selection.
#[must_use]
pub fn distinct_years(rows: &[Row]) -> Vec<String> {
    let mut years: Vec<String> = Vec::new();
    for row in rows {
        if !years.contains(&row.year) {
            years.push(row.year.clone());
        }
    }
    years.sort();
    years
}

/// Distinct values of one field in first-appearance order.
pub(crate) fn distinct_in_order<'a, F>(rows: impl Iterator<Item = &'a Row>, field: F) -> Vec<String>
where
    F: Fn(&Row) -> &str,
{
    let mut out: Vec<String> = Vec::new();
    for row in rows {
        let value = field(row);
        if !out.iter().any(|v| v.as_str() == value) {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_category_parse() {
        assert_eq!(SexCategory::from_code("MF").unwrap(), SexCategory::MaleCoded);
        assert_eq!(SexCategory::from_code("F").unwrap(), SexCategory::FemaleCoded);
        assert!(matches!(
            SexCategory::from_code("X"),
            Err(Error::UnrecognizedCategory { kind: "sex", .. })
        ));
    }

    #[test]
    fn test_sex_category_nouns_and_codes() {
        assert_eq!(SexCategory::MaleCoded.noun(), "male");
        assert_eq!(SexCategory::FemaleCoded.noun(), "female");
        assert_eq!(SexCategory::MaleCoded.code(), "MF");
    }

    #[test]
    fn test_distinct_years_sorted() {
        let rows = vec![
            Row::new("2001", "MF", "25-29", "PRIMARY", 1),
            Row::new("1996", "MF", "25-29", "PRIMARY", 1),
            Row::new("2001", "F", "30-34", "PRIMARY", 1),
        ];
        assert_eq!(distinct_years(&rows), vec!["1996", "2001"]);
    }

    #[test]
    fn test_distinct_in_order_first_appearance() {
        let rows = vec![
            Row::new("1996", "MF", "30-34", "PRIMARY", 1),
            Row::new("1996", "F", "25-29", "PRIMARY", 1),
            Row::new("1996", "MF", "30-34", "SECONDARY", 1),
        ];
        let ages = distinct_in_order(rows.iter(), |r| r.age.as_str());
        assert_eq!(ages, vec!["30-34", "25-29"]);
    }
}
