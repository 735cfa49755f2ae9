use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, SchemaError};
use super::model::{
    RawEmployee, AGE, ENVIRONMENT_SATISFACTION, GENDER, MARITAL_STATUS, MONTHLY_INCOME,
    REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw employee rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row, comma or tab delimited (recommended)
/// * `.json`         – `[{ "Age": 41, "MonthlyIncome": 5993, ... }, ...]`
/// * `.parquet`      – one column per field
///
/// Extra columns are ignored in every format.
pub fn load_file(path: &Path) -> Result<Vec<RawEmployee>, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

/// Shared per-row checks applied after parsing, whatever the format.
fn validate(raw: RawEmployee, row: usize) -> Result<RawEmployee, SchemaError> {
    let invalid = |message: String| SchemaError::InvalidRow { row, message };

    if !raw.monthly_income.is_finite() {
        return Err(invalid(format!(
            "{MONTHLY_INCOME} is not a finite number ({})",
            raw.monthly_income
        )));
    }
    let gender = raw.gender.trim();
    if gender.is_empty() {
        return Err(invalid(format!("{GENDER} is empty")));
    }
    let marital_status = raw.marital_status.trim();
    if marital_status.is_empty() {
        return Err(invalid(format!("{MARITAL_STATUS} is empty")));
    }

    Ok(RawEmployee {
        gender: gender.to_string(),
        marital_status: marital_status.to_string(),
        ..raw
    })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Layout: header row with column names, one employee per row.
/// The five required columns may appear in any order among other columns.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawEmployee>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::io(path, e))?;
    read_delimited(file, delimiter)
}

pub fn read_delimited<R: std::io::Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<RawEmployee>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SchemaError::Malformed(format!("reading header row: {e}")))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SchemaError::MissingColumn(column).into());
        }
    }

    let mut employees = Vec::new();
    for (row, result) in reader.deserialize::<RawEmployee>().enumerate() {
        let raw = result.map_err(|e| SchemaError::InvalidRow {
            row,
            message: e.to_string(),
        })?;
        employees.push(validate(raw, row)?);
    }

    Ok(employees)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Age": 41, "MonthlyIncome": 5993, "Gender": "Female",
///     "MaritalStatus": "Single", "EnvironmentSatisfaction": 2 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawEmployee>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Vec<RawEmployee>, DataError> {
    let root: JsonValue =
        serde_json::from_str(text).map_err(|e| SchemaError::Malformed(e.to_string()))?;

    let records = root
        .as_array()
        .ok_or_else(|| SchemaError::Malformed("expected a top-level JSON array".into()))?;

    let mut employees = Vec::with_capacity(records.len());

    for (row, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| SchemaError::InvalidRow {
            row,
            message: "not a JSON object".into(),
        })?;

        let field = |name: &'static str| {
            obj.get(name)
                .filter(|v| !v.is_null())
                .ok_or_else(|| SchemaError::InvalidRow {
                    row,
                    message: format!("missing '{name}'"),
                })
        };
        let wrong = |name: &str, expected: &str, v: &JsonValue| SchemaError::InvalidRow {
            row,
            message: format!("'{name}' is not {expected}: {v}"),
        };

        let age = field(AGE)?;
        let income = field(MONTHLY_INCOME)?;
        let gender = field(GENDER)?;
        let marital = field(MARITAL_STATUS)?;
        let env = field(ENVIRONMENT_SATISFACTION)?;

        let raw = RawEmployee {
            age: age.as_i64().ok_or_else(|| wrong(AGE, "an integer", age))?,
            monthly_income: income
                .as_f64()
                .ok_or_else(|| wrong(MONTHLY_INCOME, "a number", income))?,
            gender: gender
                .as_str()
                .ok_or_else(|| wrong(GENDER, "a string", gender))?
                .to_string(),
            marital_status: marital
                .as_str()
                .ok_or_else(|| wrong(MARITAL_STATUS, "a string", marital))?
                .to_string(),
            environment_satisfaction: env
                .as_i64()
                .ok_or_else(|| wrong(ENVIRONMENT_SATISFACTION, "an integer", env))?,
        };
        employees.push(validate(raw, row)?);
    }

    Ok(employees)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing employee data.
///
/// Expected schema:
/// - `Age`, `EnvironmentSatisfaction`: any integer type
/// - `MonthlyIncome`: any numeric type
/// - `Gender`, `MaritalStatus`: Utf8, LargeUtf8 or dictionary-encoded strings
///   (what Pandas writes for `category` columns)
fn load_parquet(path: &Path) -> Result<Vec<RawEmployee>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| SchemaError::Malformed(format!("reading parquet metadata: {e}")))?;

    let schema = builder.schema().clone();
    for column in REQUIRED_COLUMNS {
        if schema.index_of(column).is_err() {
            return Err(SchemaError::MissingColumn(column).into());
        }
    }

    let reader = builder
        .build()
        .map_err(|e| SchemaError::Malformed(format!("building parquet reader: {e}")))?;

    let mut employees = Vec::new();
    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| SchemaError::Malformed(format!("reading parquet record batch: {e}")))?;
        let offset = employees.len();
        read_batch(&batch, offset, &mut employees)?;
    }

    Ok(employees)
}

fn read_batch(
    batch: &RecordBatch,
    offset: usize,
    out: &mut Vec<RawEmployee>,
) -> Result<(), DataError> {
    let age = integer_column(batch, AGE)?;
    let income = numeric_column(batch, MONTHLY_INCOME)?;
    let gender = string_column(batch, GENDER)?;
    let marital = string_column(batch, MARITAL_STATUS)?;
    let env = integer_column(batch, ENVIRONMENT_SATISFACTION)?;

    let age = downcast::<Int64Array>(&age, AGE)?;
    let income = downcast::<Float64Array>(&income, MONTHLY_INCOME)?;
    let gender = downcast::<StringArray>(&gender, GENDER)?;
    let marital = downcast::<StringArray>(&marital, MARITAL_STATUS)?;
    let env = downcast::<Int64Array>(&env, ENVIRONMENT_SATISFACTION)?;

    for i in 0..batch.num_rows() {
        let row = offset + i;
        let columns: [(&str, &dyn Array); 5] = [
            (AGE, age),
            (MONTHLY_INCOME, income),
            (GENDER, gender),
            (MARITAL_STATUS, marital),
            (ENVIRONMENT_SATISFACTION, env),
        ];
        if let Some((name, _)) = columns.iter().find(|(_, col)| col.is_null(i)) {
            return Err(SchemaError::InvalidRow {
                row,
                message: format!("'{name}' is null"),
            }
            .into());
        }

        let raw = RawEmployee {
            age: age.value(i),
            monthly_income: income.value(i),
            gender: gender.value(i).to_string(),
            marital_status: marital.value(i).to_string(),
            environment_satisfaction: env.value(i),
        };
        out.push(validate(raw, row)?);
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column<'b>(
    batch: &'b RecordBatch,
    name: &'static str,
) -> Result<&'b Arc<dyn Array>, SchemaError> {
    batch
        .column_by_name(name)
        .ok_or(SchemaError::MissingColumn(name))
}

fn type_error(name: &'static str, data_type: &DataType) -> SchemaError {
    SchemaError::ColumnType {
        column: name,
        data_type: format!("{data_type:?}"),
    }
}

fn cast_to(
    col: &Arc<dyn Array>,
    name: &'static str,
    to: &DataType,
) -> Result<Arc<dyn Array>, SchemaError> {
    cast(col.as_ref(), to).map_err(|_| type_error(name, col.data_type()))
}

/// Integer column widened to Int64. Float columns are rejected rather than truncated.
fn integer_column(batch: &RecordBatch, name: &'static str) -> Result<Arc<dyn Array>, SchemaError> {
    let col = column(batch, name)?;
    if !col.data_type().is_integer() {
        return Err(type_error(name, col.data_type()));
    }
    cast_to(col, name, &DataType::Int64)
}

fn numeric_column(batch: &RecordBatch, name: &'static str) -> Result<Arc<dyn Array>, SchemaError> {
    let col = column(batch, name)?;
    if !col.data_type().is_numeric() {
        return Err(type_error(name, col.data_type()));
    }
    cast_to(col, name, &DataType::Float64)
}

fn string_column(batch: &RecordBatch, name: &'static str) -> Result<Arc<dyn Array>, SchemaError> {
    let col = column(batch, name)?;
    let is_text = match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => true,
        DataType::Dictionary(_, value) => {
            matches!(value.as_ref(), DataType::Utf8 | DataType::LargeUtf8)
        }
        _ => false,
    };
    if !is_text {
        return Err(type_error(name, col.data_type()));
    }
    cast_to(col, name, &DataType::Utf8)
}

fn downcast<'b, T: Array + 'static>(
    col: &'b Arc<dyn Array>,
    name: &'static str,
) -> Result<&'b T, SchemaError> {
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| type_error(name, col.data_type()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{DictionaryArray, Float64Array, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Int32Type, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    const CSV: &str = "\
EmployeeNumber,Age,Gender,MonthlyIncome,MaritalStatus,EnvironmentSatisfaction
1, 41,Female,5993,Single,2
2,49,Male,5130.5,Married,3
3,37,Male,2090,Single,4
";

    fn write_temp(suffix: &str, contents: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = write_temp(".csv", CSV.as_bytes());
        let rows = load_file(file.path()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            RawEmployee {
                age: 41,
                monthly_income: 5993.0,
                gender: "Female".into(),
                marital_status: "Single".into(),
                environment_satisfaction: 2,
            }
        );
        assert_eq!(rows[1].monthly_income, 5130.5);
    }

    #[test]
    fn loads_tab_delimited() {
        let tsv = CSV.replace(',', "\t");
        let file = write_temp(".tsv", tsv.as_bytes());
        assert_eq!(load_file(file.path()).unwrap().len(), 3);
    }

    #[test]
    fn missing_column_is_schema_error() {
        let csv = "Age,MonthlyIncome,Gender,EnvironmentSatisfaction\n30,100,F,1\n";
        let err = read_delimited(csv.as_bytes(), b',').unwrap_err();
        assert!(matches!(
            err,
            DataError::Schema(SchemaError::MissingColumn("MaritalStatus"))
        ));
    }

    #[test]
    fn non_numeric_age_is_schema_error() {
        let csv = "Age,MonthlyIncome,Gender,MaritalStatus,EnvironmentSatisfaction\n\
                   30,100,F,Single,1\n\
                   thirty,100,F,Single,1\n";
        let err = read_delimited(csv.as_bytes(), b',').unwrap_err();
        assert!(matches!(
            err,
            DataError::Schema(SchemaError::InvalidRow { row: 1, .. })
        ));
    }

    #[test]
    fn empty_category_and_nan_income_are_rejected() {
        let csv = "Age,MonthlyIncome,Gender,MaritalStatus,EnvironmentSatisfaction\n30,100, ,Single,1\n";
        assert!(matches!(
            read_delimited(csv.as_bytes(), b','),
            Err(DataError::Schema(SchemaError::InvalidRow { row: 0, .. }))
        ));

        let csv = "Age,MonthlyIncome,Gender,MaritalStatus,EnvironmentSatisfaction\n30,NaN,F,Single,1\n";
        assert!(matches!(
            read_delimited(csv.as_bytes(), b','),
            Err(DataError::Schema(SchemaError::InvalidRow { row: 0, .. }))
        ));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("employees.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/employees.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn parses_json_records() {
        let json = r#"[
            {"Age": 41, "MonthlyIncome": 5993, "Gender": "Female", "MaritalStatus": "Single", "EnvironmentSatisfaction": 2, "Department": "Sales"},
            {"Age": 49, "MonthlyIncome": 5130.5, "Gender": "Male", "MaritalStatus": "Married", "EnvironmentSatisfaction": 3}
        ]"#;
        let rows = parse_json(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].age, 41);
        assert_eq!(rows[1].monthly_income, 5130.5);
        assert_eq!(rows[1].marital_status, "Married");
    }

    #[test]
    fn json_missing_or_mistyped_fields() {
        let missing = r#"[{"Age": 41, "MonthlyIncome": 5993, "Gender": "Female", "EnvironmentSatisfaction": 2}]"#;
        assert!(matches!(
            parse_json(missing),
            Err(DataError::Schema(SchemaError::InvalidRow { row: 0, .. }))
        ));

        let mistyped = r#"[{"Age": "41", "MonthlyIncome": 5993, "Gender": "Female", "MaritalStatus": "Single", "EnvironmentSatisfaction": 2}]"#;
        assert!(matches!(
            parse_json(mistyped),
            Err(DataError::Schema(SchemaError::InvalidRow { row: 0, .. }))
        ));

        assert!(matches!(
            parse_json(r#"{"Age": 41}"#),
            Err(DataError::Schema(SchemaError::Malformed(_)))
        ));
    }

    fn write_parquet(batch: &RecordBatch) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer =
            ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_parquet_with_dictionary_strings() {
        let gender: DictionaryArray<Int32Type> = vec!["Female", "Male"].into_iter().collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new(AGE, DataType::Int32, false),
            Field::new(MONTHLY_INCOME, DataType::Int64, false),
            Field::new(GENDER, gender.data_type().clone(), false),
            Field::new(MARITAL_STATUS, DataType::Utf8, false),
            Field::new(ENVIRONMENT_SATISFACTION, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![41, 49])),
                Arc::new(Int64Array::from(vec![5993, 5130])),
                Arc::new(gender),
                Arc::new(StringArray::from(vec!["Single", "Married"])),
                Arc::new(Int64Array::from(vec![2, 3])),
            ],
        )
        .unwrap();
        let file = write_parquet(&batch);

        let rows = load_file(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].age, 49);
        assert_eq!(rows[1].gender, "Male");
        assert_eq!(rows[0].monthly_income, 5993.0);
    }

    #[test]
    fn parquet_float_age_is_rejected() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(AGE, DataType::Float64, false),
            Field::new(MONTHLY_INCOME, DataType::Float64, false),
            Field::new(GENDER, DataType::Utf8, false),
            Field::new(MARITAL_STATUS, DataType::Utf8, false),
            Field::new(ENVIRONMENT_SATISFACTION, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![41.5])),
                Arc::new(Float64Array::from(vec![5993.0])),
                Arc::new(StringArray::from(vec!["Female"])),
                Arc::new(StringArray::from(vec!["Single"])),
                Arc::new(Int64Array::from(vec![2])),
            ],
        )
        .unwrap();
        let file = write_parquet(&batch);

        assert!(matches!(
            load_file(file.path()),
            Err(DataError::Schema(SchemaError::ColumnType { column: "Age", .. }))
        ));
    }
}
