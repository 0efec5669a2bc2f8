use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float64Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, TimeUnit, TimestampMillisecondType};
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::{DataError, ParseError};
use super::model::{Column, Table, Value};

/// Column coerced to datetime after every load.
pub const MATCH_DATE_COLUMN: &str = "match_date";

// ---------------------------------------------------------------------------
// Reader seam
// ---------------------------------------------------------------------------

/// Turns a resolved file into a [`Table`].
pub trait TableReader {
    fn read(&self, path: &Path) -> Result<Table, DataError>;
}

/// Reads tables from disk, dispatching on the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl TableReader for FileReader {
    fn read(&self, path: &Path) -> Result<Table, DataError> {
        load_file(path)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – any flat Parquet file (pandas, polars and arrow writers)
/// * `.csv`     – header row, one record per line, column types inferred
pub fn load_file(path: &Path) -> Result<Table, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "parquet" => load_parquet(path),
        "csv" => load_csv(path),
        _ => {
            return Err(DataError::UnsupportedType {
                path: path.to_path_buf(),
                extension: ext,
            })
        }
    };
    parsed.map_err(|e| DataError::malformed(path, e))
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Coerce the `match_date` column (if any) to datetimes. Cells that cannot
/// be parsed become [`Value::Null`]; rows are never dropped.
pub fn normalize(mut table: Table) -> Table {
    if let Some(col) = table.column_mut(MATCH_DATE_COLUMN) {
        let mut bad = 0usize;
        for value in &mut col.values {
            let coerced = coerce_datetime(value);
            if coerced.is_null() && !value.is_null() {
                bad += 1;
            }
            *value = coerced;
        }
        if bad > 0 {
            log::warn!("{bad} unparseable '{MATCH_DATE_COLUMN}' value(s) set to null");
        }
    }
    table
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

fn coerce_datetime(value: &Value) -> Value {
    match value {
        Value::DateTime(d) => Value::DateTime(*d),
        Value::String(s) => parse_datetime(s).map_or(Value::Null, Value::DateTime),
        _ => Value::Null,
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Each column gets one type: integer if every non-empty cell parses as an
/// integer, else float, else bool, else string. Empty cells are null.
fn load_csv(path: &Path) -> Result<Table, ParseError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (col_idx, cells) in raw.iter_mut().enumerate() {
            cells.push(record.get(col_idx).unwrap_or("").to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| Column::new(name, infer_column(&cells)))
        .collect();
    Ok(Table::from_columns(columns))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsvType {
    Integer,
    Float,
    Bool,
    String,
}

fn is_missing(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null")
}

fn infer_column(cells: &[String]) -> Vec<Value> {
    let present = || cells.iter().map(|c| c.trim()).filter(|c| !is_missing(c));

    let kind = if present().all(|c| c.parse::<i64>().is_ok()) {
        CsvType::Integer
    } else if present().all(|c| c.parse::<f64>().is_ok()) {
        CsvType::Float
    } else if present().all(|c| c.eq_ignore_ascii_case("true") || c.eq_ignore_ascii_case("false")) {
        CsvType::Bool
    } else {
        CsvType::String
    };

    cells
        .iter()
        .map(|cell| {
            let c = cell.trim();
            if is_missing(c) {
                return Value::Null;
            }
            match kind {
                CsvType::Integer => c.parse().map_or(Value::Null, Value::Integer),
                CsvType::Float => c.parse().map_or(Value::Null, Value::Float),
                CsvType::Bool => Value::Bool(c.eq_ignore_ascii_case("true")),
                CsvType::String => Value::String(cell.clone()),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file. Record batches are concatenated column-wise.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table, ParseError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), Vec::new()))
        .collect();

    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            column.values.extend(arrow_values(array)?);
        }
    }

    Ok(Table::from_columns(columns))
}

// -- Parquet / Arrow helpers --

/// Convert one Arrow column to cell values, widening to the types
/// [`Value`] knows about.
fn arrow_values(col: &Arc<dyn Array>) -> Result<Vec<Value>, ParseError> {
    let n = col.len();
    let values = match col.data_type() {
        DataType::Boolean => {
            let arr = col.as_boolean();
            collect_values(arr, n, |row| Value::Bool(BooleanArray::value(arr, row)))
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => {
            let widened = cast(col, &DataType::Int64)?;
            let arr = widened.as_primitive::<arrow::datatypes::Int64Type>();
            collect_values(arr, n, |row| Value::Integer(Int64Array::value(arr, row)))
        }
        DataType::UInt64 | DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let widened = cast(col, &DataType::Float64)?;
            let arr = widened.as_primitive::<arrow::datatypes::Float64Type>();
            collect_values(arr, n, |row| Value::Float(Float64Array::value(arr, row)))
        }
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View | DataType::Dictionary(_, _) => {
            let strings = cast(col, &DataType::Utf8)?;
            let arr = strings.as_string::<i32>();
            collect_values(arr, n, |row| {
                Value::String(StringArray::value(arr, row).to_string())
            })
        }
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let millis = cast(col, &DataType::Timestamp(TimeUnit::Millisecond, None))?;
            let arr = millis.as_primitive::<TimestampMillisecondType>();
            collect_values(arr, n, |row| {
                DateTime::from_timestamp_millis(arr.value(row))
                    .map_or(Value::Null, |d| Value::DateTime(d.naive_utc()))
            })
        }
        // Times, decimals and anything exotic are kept as their display text.
        _ => {
            let mut out = Vec::with_capacity(n);
            for row in 0..n {
                if col.is_null(row) {
                    out.push(Value::Null);
                } else {
                    out.push(Value::String(array_value_to_string(col, row)?));
                }
            }
            out
        }
    };
    Ok(values)
}

fn collect_values(arr: &dyn Array, n: usize, value_at: impl Fn(usize) -> Value) -> Vec<Value> {
    (0..n)
        .map(|row| if arr.is_null(row) { Value::Null } else { value_at(row) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use arrow::array::{Date32Array, Int32Array};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    #[test]
    fn csv_columns_get_one_inferred_type() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("clubs_silver.csv");
        std::fs::write(
            &path,
            "club_id,club_name,founded,active\n418,Real Madrid,1902,true\n131.0,Barcelona,,false\n",
        )
        .unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names(), vec!["club_id", "club_name", "founded", "active"]);
        // one float cell turns the whole id column into floats
        assert_eq!(table.row(0).get("club_id"), Some(&Value::Float(418.0)));
        assert_eq!(
            table.row(1).get("club_name"),
            Some(&Value::String("Barcelona".into()))
        );
        assert_eq!(table.row(0).get("founded"), Some(&Value::Integer(1902)));
        assert_eq!(table.row(1).get("founded"), Some(&Value::Null));
        assert_eq!(table.row(1).get("active"), Some(&Value::Bool(false)));
    }

    #[test]
    fn parquet_is_read_with_widened_types() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("matchday_overview_gold.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("matchday", DataType::Int32, false),
            Field::new("home_club_name", DataType::Utf8, true),
            Field::new("match_date", DataType::Date32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("Sevilla FC"), None])),
                // 2025-08-15 is day 20315 since the epoch
                Arc::new(Date32Array::from(vec![Some(20315), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(1).get("matchday"), Some(&Value::Integer(2)));
        assert_eq!(
            table.row(0).get("home_club_name"),
            Some(&Value::String("Sevilla FC".into()))
        );
        assert_eq!(table.row(1).get("home_club_name"), Some(&Value::Null));
        let expected = NaiveDate::from_ymd_opt(2025, 8, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(table.row(0).get("match_date"), Some(&Value::DateTime(expected)));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = load_file(Path::new("/nowhere/clubs_silver.xlsx")).unwrap_err();
        match err {
            DataError::UnsupportedType { extension, .. } => assert_eq!(extension, "xlsx"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn corrupt_parquet_is_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("club_match_kpis_gold.parquet");
        std::fs::write(&path, b"definitely not parquet").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            DataError::Malformed {
                source: ParseError::Parquet(_),
                ..
            }
        ));
    }

    #[test]
    fn unparseable_match_date_becomes_null_without_dropping_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("matchday_overview_gold.csv");
        std::fs::write(
            &path,
            "match_id,match_date\n1,2025-08-15\n2,not a date\n3,2025-08-17 21:00:00\n",
        )
        .unwrap();

        let table = normalize(load_file(&path).unwrap());
        assert_eq!(table.len(), 3);
        let dates = &table.column(MATCH_DATE_COLUMN).unwrap().values;
        assert_eq!(
            dates[0].as_datetime().map(|d| d.date()),
            NaiveDate::from_ymd_opt(2025, 8, 15)
        );
        assert_eq!(dates[1], Value::Null);
        assert_eq!(
            dates[2].as_datetime().map(|d| d.format("%H:%M").to_string()),
            Some("21:00".to_string())
        );
    }

    #[test]
    fn normalize_leaves_tables_without_match_date_alone() {
        let table = Table::from_columns(vec![Column::new(
            "season",
            vec![Value::String("2025-26".into())],
        )]);
        assert_eq!(normalize(table.clone()), table);
    }
}
