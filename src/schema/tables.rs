//! Table schema definitions for the two persisted datasets

use super::types::*;

pub static COVID19: TableSchema = TableSchema {
    name: "Covid19",
    columns: &[
        Column::required("country_name", ColumnType::Varchar(50)),
        Column::new("population", ColumnType::Integer),
        Column::new("location", ColumnType::Varchar(50)),
        Column::new("life_expectancy", ColumnType::Varchar(10)),
        Column::required("positives", ColumnType::Integer),
        Column::required("deaths", ColumnType::Integer),
    ],
    primary_key: &["country_name"],
    foreign_keys: &[],
};

pub static COMPETITIONS: TableSchema = TableSchema {
    name: "Competitions",
    columns: &[
        Column::required("league_id", ColumnType::Integer),
        Column::required("country_name", ColumnType::Varchar(50)),
        Column::new("league_name", ColumnType::Varchar(50)),
        Column::new("currentMatchday", ColumnType::Integer),
    ],
    primary_key: &["league_id", "country_name"],
    foreign_keys: &[ForeignKey::new("country_name", "Covid19")],
};

/// All tables in creation order (FK parents first)
pub static ALL_TABLES: &[&TableSchema] = &[&COVID19, &COMPETITIONS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_created_before_children() {
        for (idx, table) in ALL_TABLES.iter().enumerate() {
            for dep in table.dependencies() {
                let parent_idx = ALL_TABLES
                    .iter()
                    .position(|t| t.name == dep)
                    .expect("FK parent must be a known table");
                assert!(parent_idx < idx, "{} created before {}", table.name, dep);
            }
        }
    }

    #[test]
    fn test_primary_keys_reference_declared_columns() {
        for table in ALL_TABLES {
            let names = table.column_names();
            for pk in table.primary_key {
                assert!(names.contains(pk), "{}.{} not declared", table.name, pk);
            }
        }
    }
}
