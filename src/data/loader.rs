use std::path::Path;

use arrow::array::{Array, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use crate::error::DataLoadError;

use super::model::{LaunchRecord, Outcome, RecordStore};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

/// A required input column and the header spellings accepted for it.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Name reported in errors.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Column {
    fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        self.aliases.iter().any(|a| *a == header)
    }
}

pub const LAUNCH_SITE: Column = Column {
    name: "Launch Site",
    aliases: &["Launch Site", "launchSite", "launch_site"],
};
pub const PAYLOAD_MASS: Column = Column {
    name: "Payload Mass (kg)",
    aliases: &["Payload Mass (kg)", "payloadMassKg", "payload_mass_kg"],
};
pub const OUTCOME_CLASS: Column = Column {
    name: "class",
    aliases: &["class", "outcomeClass", "outcome_class"],
};
pub const BOOSTER_CATEGORY: Column = Column {
    name: "Booster Version Category",
    aliases: &[
        "Booster Version Category",
        "boosterVersionCategory",
        "booster_version_category",
    ],
};

const REQUIRED: [Column; 4] = [LAUNCH_SITE, PAYLOAD_MASS, OUTCOME_CLASS, BOOSTER_CATEGORY];

/// Position of each required column, in `REQUIRED` order.
fn locate(headers: &[&str]) -> Result<[usize; 4], DataLoadError> {
    let mut idx = [0usize; 4];
    for (slot, col) in idx.iter_mut().zip(REQUIRED.iter()) {
        *slot = headers
            .iter()
            .position(|h| col.matches(h))
            .ok_or(DataLoadError::MissingColumn(col.name))?;
    }
    Ok(idx)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch record table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; extra columns ignored
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – one column per field, any numeric/string physical type
pub fn load_file(path: &Path) -> Result<RecordStore, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    RecordStore::from_records(records)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DataLoadError + '_ {
    move |source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// -- Cell parsing shared by all formats --

fn parse_payload(row: usize, raw: &str) -> Result<f64, DataLoadError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(valid_payload)
        .ok_or_else(|| invalid(row, PAYLOAD_MASS, raw))
}

fn valid_payload(v: f64) -> Option<f64> {
    (v.is_finite() && v >= 0.0).then_some(v)
}

fn parse_outcome(row: usize, raw: &str) -> Result<Outcome, DataLoadError> {
    Outcome::parse(raw).ok_or_else(|| invalid(row, OUTCOME_CLASS, raw))
}

fn parse_label(row: usize, col: Column, raw: &str) -> Result<String, DataLoadError> {
    let s = raw.trim();
    if s.is_empty() {
        Err(invalid(row, col, raw))
    } else {
        Ok(s.to_string())
    }
}

fn invalid(row: usize, col: Column, raw: impl ToString) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column: col.name,
        value: raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, DataLoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    read_csv(file)
}

/// Parse CSV from any reader. Rows are numbered from 0, excluding the header.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Vec<LaunchRecord>, DataLoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let headers: Vec<&str> = headers.iter().collect();
    let [site_idx, mass_idx, class_idx, booster_idx] = locate(&headers)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("");

        records.push(LaunchRecord {
            launch_site: parse_label(row, LAUNCH_SITE, cell(site_idx))?,
            payload_mass_kg: parse_payload(row, cell(mass_idx))?,
            outcome: parse_outcome(row, cell(class_idx))?,
            booster_version_category: parse_label(row, BOOSTER_CATEGORY, cell(booster_idx))?,
        });
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Vec<LaunchRecord>, DataLoadError> {
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_str(text)?;

    rows.iter()
        .enumerate()
        .map(|(row, obj)| -> Result<LaunchRecord, DataLoadError> {
            let field = |col: Column| {
                obj.iter()
                    .find(|(k, _)| col.matches(k))
                    .map(|(_, v)| v)
                    .ok_or(DataLoadError::MissingColumn(col.name))
            };

            let payload = field(PAYLOAD_MASS)?;
            let payload_mass_kg = match payload {
                JsonValue::Number(n) => n.as_f64().and_then(valid_payload),
                JsonValue::String(s) => s.trim().parse::<f64>().ok().and_then(valid_payload),
                _ => None,
            }
            .ok_or_else(|| invalid(row, PAYLOAD_MASS, payload))?;

            let class = field(OUTCOME_CLASS)?;
            let outcome = match class {
                JsonValue::Number(n) => n.as_f64().and_then(Outcome::from_class),
                JsonValue::Bool(true) => Some(Outcome::Success),
                JsonValue::Bool(false) => Some(Outcome::Failure),
                JsonValue::String(s) => Outcome::parse(s),
                _ => None,
            }
            .ok_or_else(|| invalid(row, OUTCOME_CLASS, class))?;

            Ok(LaunchRecord {
                launch_site: json_label(row, LAUNCH_SITE, field(LAUNCH_SITE)?)?,
                payload_mass_kg,
                outcome,
                booster_version_category: json_label(
                    row,
                    BOOSTER_CATEGORY,
                    field(BOOSTER_CATEGORY)?,
                )?,
            })
        })
        .collect()
}

fn json_label(row: usize, col: Column, val: &JsonValue) -> Result<String, DataLoadError> {
    match val {
        JsonValue::String(s) => parse_label(row, col, s),
        other => Err(invalid(row, col, other)),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Physical types are normalised with Arrow casts: labels to Utf8, payload
/// and class to Float64 (booleans cast to 0/1).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, DataLoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let schema = batch.schema();
        let [site_idx, mass_idx, class_idx, booster_idx] = locate_fields(&schema)?;

        let sites = cast(batch.column(site_idx), &DataType::Utf8)?;
        let masses = cast(batch.column(mass_idx), &DataType::Float64)?;
        let classes = cast(batch.column(class_idx), &DataType::Float64)?;
        let boosters = cast(batch.column(booster_idx), &DataType::Utf8)?;

        let sites = sites.as_string::<i32>();
        let masses = masses.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();
        let boosters = boosters.as_string::<i32>();

        for i in 0..batch.num_rows() {
            let row = records.len();
            let mass = float_cell(masses, i);
            let class = float_cell(classes, i);
            records.push(LaunchRecord {
                launch_site: string_cell(row, LAUNCH_SITE, sites, i)?,
                payload_mass_kg: mass
                    .and_then(valid_payload)
                    .ok_or_else(|| invalid(row, PAYLOAD_MASS, describe(mass)))?,
                outcome: class
                    .and_then(Outcome::from_class)
                    .ok_or_else(|| invalid(row, OUTCOME_CLASS, describe(class)))?,
                booster_version_category: string_cell(row, BOOSTER_CATEGORY, boosters, i)?,
            });
        }
    }
    Ok(records)
}

fn locate_fields(schema: &Schema) -> Result<[usize; 4], DataLoadError> {
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    locate(&names)
}

fn float_cell(arr: &Float64Array, i: usize) -> Option<f64> {
    (!arr.is_null(i)).then(|| arr.value(i))
}

fn string_cell(row: usize, col: Column, arr: &StringArray, i: usize) -> Result<String, DataLoadError> {
    if arr.is_null(i) {
        return Err(invalid(row, col, "<null>"));
    }
    parse_label(row, col, arr.value(i))
}

fn describe(v: Option<f64>) -> String {
    v.map_or_else(|| "<null>".to_string(), |v| v.to_string())
}
