//! Variant expansion of forecast rows
//!
//! Every raw forecast row (one entity at one date) becomes three rows sharing
//! the same date: the farmed position, holding both tokens, and holding only
//! token A. Rows are grouped per entity in first-seen order so series and
//! legend order are deterministic.

use crate::table::{Cell, ColumnIndex, RawTable, Result, TableError};
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// Columns every forecast table must provide
pub const REQUIRED_FIELDS: [&str; 6] = ["Name", "Date", "Value", "HODL", "Only A", "APR"];

/// Header of the derived table
pub const DERIVED_HEADER: [&str; 4] = ["Date", "Name", "Value", "APR"];

/// One of the three time series derived per entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Value of the liquidity-pool position
    Farm,
    /// Value of holding both tokens instead
    Hodl,
    /// Value of holding only token A
    OnlyA,
}

impl Variant {
    /// All variants in emission order
    pub const ALL: [Variant; 3] = [Variant::Farm, Variant::Hodl, Variant::OnlyA];

    pub fn suffix(&self) -> &'static str {
        match self {
            Variant::Farm => " Farm",
            Variant::Hodl => " HODL",
            Variant::OnlyA => " Only A",
        }
    }

    /// Full series name for an entity, e.g. "LUNA/UST LP Farm"
    pub fn label(&self, entity: &str) -> String {
        format!("{}{}", entity, self.suffix())
    }
}

/// A derived time-series row
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRow {
    pub date: Cell,
    pub name: String,
    pub value: f64,
    /// APR of the farm; exactly 0.0 on HODL and Only A rows
    pub apr: f64,
}

impl VariantRow {
    fn to_cells(&self) -> Vec<Cell> {
        vec![
            self.date.clone(),
            Cell::Text(self.name.clone()),
            Cell::Number(self.value),
            Cell::Number(self.apr),
        ]
    }
}

/// Derived rows under the synthetic `Date, Name, Value, APR` header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTable {
    pub rows: Vec<VariantRow>,
}

impl DerivedTable {
    /// Row count including the header
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Header and rows as a dataset source
    pub fn to_source(&self) -> Vec<Vec<Cell>> {
        let mut source = Vec::with_capacity(self.row_count());
        source.push(DERIVED_HEADER.iter().map(|&h| Cell::from(h)).collect());
        source.extend(self.rows.iter().map(VariantRow::to_cells));
        source
    }
}

/// Result of variant expansion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedSeries {
    /// Entity names in order of first appearance
    pub entities: Vec<String>,
    pub table: DerivedTable,
}

/// Receives the derived data once expansion completes
pub trait SeriesObserver {
    fn observe(&self, entities: &[String], table: &DerivedTable);
}

impl<F> SeriesObserver for F
where
    F: Fn(&[String], &DerivedTable),
{
    fn observe(&self, entities: &[String], table: &DerivedTable) {
        self(entities, table)
    }
}

/// Logs derived data through `tracing`
pub struct TracingObserver;

impl SeriesObserver for TracingObserver {
    fn observe(&self, entities: &[String], table: &DerivedTable) {
        info!(?entities, rows = table.row_count(), "derived forecast series");
        for row in &table.rows {
            trace!(date = %row.date, name = %row.name, value = row.value, apr = row.apr, "derived row");
        }
    }
}

/// Expand a forecast table into Farm / HODL / Only A rows
///
/// Fails with `MissingField` before reading any row if one of
/// `REQUIRED_FIELDS` is absent.
pub fn derive_series(
    table: &RawTable,
    observer: Option<&dyn SeriesObserver>,
) -> Result<DerivedSeries> {
    let index = ColumnIndex::new(table);
    let cols = index.resolve_all(&REQUIRED_FIELDS)?;
    let (name_idx, date_idx, value_idx, hodl_idx, only_a_idx, apr_idx) =
        (cols[0], cols[1], cols[2], cols[3], cols[4], cols[5]);

    let mut entities: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<VariantRow>> = Vec::new();
    let mut group_of: HashMap<String, usize> = HashMap::new();

    for (i, row) in table.rows().iter().enumerate() {
        let row_no = i + 1;
        let name = row[name_idx].to_string();
        let date = row[date_idx].clone();
        let value = numeric(row, value_idx, row_no, "Value")?;
        let hodl = numeric(row, hodl_idx, row_no, "HODL")?;
        let only_a = numeric(row, only_a_idx, row_no, "Only A")?;
        let apr = numeric(row, apr_idx, row_no, "APR")?;

        let group = match group_of.get(&name) {
            Some(&g) => g,
            None => {
                entities.push(name.clone());
                groups.push(Vec::new());
                group_of.insert(name.clone(), groups.len() - 1);
                groups.len() - 1
            }
        };

        let emitted = [
            (Variant::Farm, value, apr),
            (Variant::Hodl, hodl, 0.0),
            (Variant::OnlyA, only_a, 0.0),
        ];
        groups[group].extend(
            emitted
                .into_iter()
                .map(|(variant, value, apr)| VariantRow {
                    date: date.clone(),
                    name: variant.label(&name),
                    value,
                    apr,
                }),
        );
    }

    let table = DerivedTable {
        rows: groups.into_iter().flatten().collect(),
    };

    debug!(
        entities = entities.len(),
        derived_rows = table.rows.len(),
        "variant expansion complete"
    );

    if let Some(observer) = observer {
        observer.observe(&entities, &table);
    }

    Ok(DerivedSeries { entities, table })
}

fn numeric(row: &[Cell], idx: usize, row_no: usize, field: &str) -> Result<f64> {
    row[idx].as_f64().ok_or_else(|| TableError::InvalidCell {
        row: row_no,
        field: field.to_string(),
        reason: format!("expected a number, got '{}'", row[idx]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn forecast_table(rows: &str) -> RawTable {
        let json = format!(
            r#"[["Name","Date","Value","HODL","Only A","Only B","APR"]{}]"#,
            rows
        );
        RawTable::from_json_str(&json).unwrap()
    }

    #[test]
    fn test_three_rows_per_input_row() {
        let table = forecast_table(
            r#",["A","d1",10,11,12,13,50],["B","d1",20,21,22,23,60],["A","d2",30,31,32,33,40]"#,
        );
        let derived = derive_series(&table, None).unwrap();
        assert_eq!(derived.table.row_count(), 1 + 3 * 3);
        assert_eq!(derived.table.to_source().len(), 10);
    }

    #[test]
    fn test_rows_grouped_by_first_seen_entity() {
        let table = forecast_table(
            r#",["B","d1",1,2,3,0,9],["A","d1",4,5,6,0,8],["B","d2",7,8,9,0,7]"#,
        );
        let derived = derive_series(&table, None).unwrap();

        assert_eq!(derived.entities, vec!["B".to_string(), "A".to_string()]);

        let names: Vec<&str> = derived.table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "B Farm", "B HODL", "B Only A", "B Farm", "B HODL", "B Only A", "A Farm",
                "A HODL", "A Only A"
            ]
        );
        assert_eq!(derived.table.rows[3].date, Cell::from("d2"));
        assert_eq!(derived.table.rows[3].value, 7.0);
    }

    #[test]
    fn test_apr_only_on_farm_rows() {
        let table = forecast_table(r#",["A","d1",10,11,12,13,50],["A","d2",10,11,12,13,45.5]"#);
        let derived = derive_series(&table, None).unwrap();

        for row in &derived.table.rows {
            if row.name.ends_with(" Farm") {
                assert!(row.apr != 0.0);
            } else {
                assert_eq!(row.apr, 0.0);
            }
        }
        assert_eq!(derived.table.rows[1].value, 11.0);
        assert_eq!(derived.table.rows[2].value, 12.0);
    }

    #[test]
    fn test_missing_required_field() {
        let table =
            RawTable::from_json_str(r#"[["Name","Date","Value","HODL","APR"],["A","d",1,2,3]]"#)
                .unwrap();
        let err = derive_series(&table, None).unwrap_err();
        assert!(matches!(err, TableError::MissingField { ref field, .. } if field == "Only A"));
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let table = forecast_table(r#",["A","d1","lots",11,12,13,50]"#);
        let err = derive_series(&table, None).unwrap_err();
        assert!(matches!(err, TableError::InvalidCell { row: 1, ref field, .. } if field == "Value"));
    }

    #[test]
    fn test_header_only_table() {
        let table = forecast_table("");
        let derived = derive_series(&table, None).unwrap();
        assert!(derived.entities.is_empty());
        assert_eq!(derived.table.row_count(), 1);
    }

    #[test]
    fn test_observer_receives_result() {
        let seen = RefCell::new(None);
        let observer = |entities: &[String], table: &DerivedTable| {
            *seen.borrow_mut() = Some((entities.to_vec(), table.rows.len()));
        };

        let table = forecast_table(r#",["A","d1",1,2,3,4,5]"#);
        derive_series(&table, Some(&observer)).unwrap();

        assert_eq!(seen.into_inner(), Some((vec!["A".to_string()], 3)));
    }

    #[test]
    fn test_variant_labels() {
        assert_eq!(Variant::Farm.label("X"), "X Farm");
        assert_eq!(Variant::Hodl.label("X"), "X HODL");
        assert_eq!(Variant::OnlyA.label("X"), "X Only A");
    }
}
