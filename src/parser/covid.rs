use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};

use super::normalize::{classify, SourceKey};
use super::record::CountryRecord;

/// Sub-object holding a country's totals
const TOTALS_KEY: &str = "All";

/// Rows extracted from the epidemiological response
#[derive(Debug, Default)]
pub struct CovidBatch {
    pub records: Vec<CountryRecord>,
    /// Stored country names in insertion order
    pub country_names: Vec<String>,
}

impl CovidBatch {
    fn push(&mut self, record: CountryRecord) {
        self.country_names.push(record.country_name.clone());
        self.records.push(record);
    }
}

/// Parse the epidemiological API response body
pub fn parse_covid_json(raw: &str) -> Result<CovidBatch> {
    let json: Value = serde_json::from_str(raw).context("Failed to parse epidemiological JSON")?;
    let entries = json
        .as_object()
        .context("Epidemiological response is not a JSON object")?;

    let mut batch = CovidBatch::default();

    for (key, entry) in entries {
        match classify(key) {
            SourceKey::Aggregate => continue,
            SourceKey::Composite(composite) => {
                let regions = as_object(entry, key)?;
                for (sub_key, stats) in regions {
                    if !composite.contains(sub_key) {
                        continue;
                    }
                    let stats = as_object(stats, sub_key)?;
                    batch.push(extract_record(sub_key.clone(), stats)?);
                }
            }
            SourceKey::Country(name) => {
                let totals = as_object(entry, key)?
                    .get(TOTALS_KEY)
                    .and_then(Value::as_object)
                    .ok_or_else(|| anyhow!("Entry '{}' has no '{}' object", key, TOTALS_KEY))?;
                batch.push(extract_record(name.into_owned(), totals)?);
            }
        }
    }

    Ok(batch)
}

fn as_object<'a>(value: &'a Value, key: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| anyhow!("Entry '{}' is not a JSON object", key))
}

fn extract_record(country_name: String, stats: &Map<String, Value>) -> Result<CountryRecord> {
    let field = |name: &'static str| Field {
        country: &country_name,
        name,
        value: stats.get(name).filter(|v| !v.is_null()),
    };

    let positives = field("confirmed").required_integer()?;
    let deaths = field("deaths").required_integer()?;
    let population = field("population").integer()?;
    let location = field("location").text()?;
    let life_expectancy = field("life_expectancy").text_or_number()?;

    Ok(CountryRecord {
        country_name,
        population,
        location,
        life_expectancy,
        positives,
        deaths,
    })
}

/// A statistics value of one entry; absent and `null` are both `None`
struct Field<'a> {
    country: &'a str,
    name: &'static str,
    value: Option<&'a Value>,
}

impl Field<'_> {
    fn wrong_type(&self, expected: &str) -> anyhow::Error {
        anyhow!(
            "'{}' field '{}' is not {}: {}",
            self.country,
            self.name,
            expected,
            self.value.map(Value::to_string).unwrap_or_default()
        )
    }

    /// Integers may arrive as integral floats, e.g. `1.5e7`
    fn integer(&self) -> Result<Option<i64>> {
        let Some(value) = self.value else {
            return Ok(None);
        };
        if let Some(i) = value.as_i64() {
            return Ok(Some(i));
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
            _ => Err(self.wrong_type("an integer")),
        }
    }

    fn required_integer(&self) -> Result<i64> {
        match self.integer()? {
            Some(i) => Ok(i),
            None => bail!("'{}' has no integer '{}'", self.country, self.name),
        }
    }

    fn text(&self) -> Result<Option<String>> {
        match self.value {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.wrong_type("a string")),
        }
    }

    /// Decimals arrive as either strings or numbers and are stored as text
    fn text_or_number(&self) -> Result<Option<String>> {
        match self.value {
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::String(_)) | None => self.text(),
            Some(_) => Err(self.wrong_type("a string or number")),
        }
    }
}
