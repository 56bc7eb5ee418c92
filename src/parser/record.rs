use crate::schema::{TableSchema, COMPETITIONS, COVID19};

/// A single SQL parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// A record that maps onto one row of a known table
pub trait TableRow {
    fn schema() -> &'static TableSchema;

    /// Values in the schema's column order
    fn values(&self) -> Vec<SqlValue>;
}

/// One row of `Covid19`
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub country_name: String,
    pub population: Option<i64>,
    pub location: Option<String>,
    pub life_expectancy: Option<String>,
    pub positives: i64,
    pub deaths: i64,
}

impl TableRow for CountryRecord {
    fn schema() -> &'static TableSchema {
        &COVID19
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.country_name.as_str().into(),
            self.population.into(),
            self.location.as_deref().into(),
            self.life_expectancy.as_deref().into(),
            self.positives.into(),
            self.deaths.into(),
        ]
    }
}

/// One row of `Competitions`
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionRecord {
    pub league_id: i64,
    pub country_name: String,
    pub league_name: Option<String>,
    /// `None` when the competition has no current season
    pub current_matchday: Option<i64>,
}

impl TableRow for CompetitionRecord {
    fn schema() -> &'static TableSchema {
        &COMPETITIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.league_id.into(),
            self.country_name.as_str().into(),
            self.league_name.as_deref().into(),
            self.current_matchday.into(),
        ]
    }
}
