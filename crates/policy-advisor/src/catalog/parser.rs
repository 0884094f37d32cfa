use super::normalizer::non_blank;
use super::record::{PolicyRecord, PolicyType};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PolicyRecord>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row_number = index as u64 + 1;
        let row = row.map_err(|err| row_error(row_number, err))?;
        records.push(row.into_record(row_number)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Policy_Type")]
    policy_type: String,
    #[serde(rename = "Coverage_Lakhs")]
    coverage_lakhs: f64,
    #[serde(rename = "Premium_INR")]
    premium_inr: f64,
    #[serde(rename = "Age", deserialize_with = "whole_years")]
    age: u32,
    #[serde(rename = "Region", default)]
    region: Option<String>,
}

impl CatalogRow {
    fn into_record(self, row: u64) -> Result<PolicyRecord, CatalogError> {
        let policy_type = self
            .policy_type
            .parse::<PolicyType>()
            .map_err(|err| CatalogError::Malformed {
                row,
                reason: err.to_string(),
            })?;

        let record = PolicyRecord {
            policy_type,
            coverage_lakhs: self.coverage_lakhs,
            premium_inr: self.premium_inr,
            age: self.age,
            region: non_blank(self.region),
        };

        match record.invariant_violation() {
            Some(reason) => Err(CatalogError::Malformed { row, reason }),
            None => Ok(record),
        }
    }
}

/// Accepts `35` as well as spreadsheet exports such as `35.0`.
fn whole_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(serde::de::Error::custom(format!(
            "age must be a whole number of years, found {value}"
        )))
    }
}

fn row_error(row: u64, err: csv::Error) -> CatalogError {
    match err.kind() {
        csv::ErrorKind::Io(io) => CatalogError::Io(io.to_string()),
        _ => CatalogError::Malformed {
            row,
            reason: err.to_string(),
        },
    }
}
