//! Column sorting for the grid view-model.

use std::cmp::Ordering;
use std::str::FromStr;

use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::{GridError, Result};
use crate::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column and direction the grid is sorted by. No column keeps fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Stable sort of `rows`. Rows missing the column always go last.
    pub fn apply(&self, rows: &mut [Record]) {
        let Some(column) = self.column.as_deref() else {
            return;
        };
        rows.sort_by(|a, b| {
            match (a.column_value(column), b.column_value(column)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => {
                    let ordering = compare_values(&x, &y);
                    match self.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                }
            }
        });
    }
}

/// Parses `Column` or `Column:asc|desc`.
impl FromStr for SortSpec {
    type Err = GridError;

    fn from_str(raw: &str) -> Result<Self> {
        let (column, direction) = match raw.split_once(':') {
            Some((column, direction)) => (
                column,
                SortDirection::from_str(direction.trim()).map_err(|_| {
                    GridError::validation(format!("unknown sort direction '{}'", direction))
                })?,
            ),
            None => (raw, SortDirection::Asc),
        };

        let column = column.trim();
        if column.is_empty() {
            return Err(GridError::validation("sort column must not be empty"));
        }
        Ok(Self::by(column, direction))
    }
}

// Numbers sort before strings, strings before booleans.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rows: &[Record]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_numeric_column_descending() {
        let mut rows = vec![
            Record::new(1).with_field("Quantity", 3),
            Record::new(2).with_field("Quantity", 12),
            Record::new(3).with_field("Quantity", 7),
        ];
        SortSpec::by("Quantity", SortDirection::Desc).apply(&mut rows);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let mut rows = vec![
            Record::new(1),
            Record::new(2).with_field("Requester", "Bernard"),
            Record::new(3).with_field("Requester", "Adam"),
        ];

        SortSpec::by("Requester", SortDirection::Asc).apply(&mut rows);
        assert_eq!(ids(&rows), vec![3, 2, 1]);

        SortSpec::by("Requester", SortDirection::Desc).apply(&mut rows);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_is_stable_and_default_is_noop() {
        let mut rows = vec![
            Record::new(5).with_statuses("Pending", None),
            Record::new(1).with_statuses("Pending", None),
        ];
        SortSpec::default().apply(&mut rows);
        assert_eq!(ids(&rows), vec![5, 1]);

        SortSpec::by("StoreRequestStatus", SortDirection::Asc).apply(&mut rows);
        assert_eq!(ids(&rows), vec![5, 1]);
    }

    #[test]
    fn test_parse_sort_spec() {
        assert_eq!(
            "Id:DESC".parse::<SortSpec>().unwrap(),
            SortSpec::by("Id", SortDirection::Desc)
        );
        assert_eq!(
            "Project".parse::<SortSpec>().unwrap(),
            SortSpec::by("Project", SortDirection::Asc)
        );
        assert!("Id:sideways".parse::<SortSpec>().is_err());
        assert!(":asc".parse::<SortSpec>().is_err());
    }
}
