use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INT".to_string(),
            ColumnType::Varchar(len) => format!("VARCHAR({})", len),
        };
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };

        columns.push(format!("    {} {}{}", col.name, sql_type, null_constraint));
    }

    if !schema.primary_key.is_empty() {
        columns.push(format!("    PRIMARY KEY ({})", schema.primary_key.join(", ")));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate a parameterised INSERT covering every column
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{COMPETITIONS, COVID19};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&COVID19);
        assert!(sql.starts_with("CREATE TABLE Covid19 ("));
        assert!(sql.contains("country_name VARCHAR(50) NOT NULL"));
        assert!(sql.contains("population INT,"));
        assert!(sql.contains("life_expectancy VARCHAR(10),"));
        assert!(sql.contains("positives INT NOT NULL"));
        assert!(sql.contains("PRIMARY KEY (country_name)"));
        assert!(!sql.contains("IF NOT EXISTS"));
    }

    #[test]
    fn test_generate_create_table_with_foreign_key() {
        let sql = generate_create_table(&COMPETITIONS);
        assert!(sql.contains("currentMatchday INT"));
        assert!(sql.contains("PRIMARY KEY (league_id, country_name)"));
        assert!(sql.contains("FOREIGN KEY (country_name) REFERENCES Covid19(country_name)"));
    }

    #[test]
    fn test_generate_insert() {
        assert_eq!(
            generate_insert(&COMPETITIONS),
            "INSERT INTO Competitions (league_id, country_name, league_name, currentMatchday) \
             VALUES (?, ?, ?, ?)"
        );
    }
}
