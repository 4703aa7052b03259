use calc_core::StoreError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Row, TypeInfo, ValueRef};

/// Get a decimal value from a row, handling both INTEGER and REAL SQLite types.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, StoreError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| StoreError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                StoreError::Database(format!("Failed to get INTEGER from '{}': {}", column, e))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                StoreError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                StoreError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        "NULL" => Ok(Decimal::ZERO),
        _ => Err(StoreError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

/// Convert a Decimal to f64 for SQLite storage.
pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> sqlx::sqlite::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query(
            "CREATE TABLE test_decimals (
                id INTEGER PRIMARY KEY,
                int_value INTEGER,
                real_value REAL,
                text_value TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");
        pool
    }

    #[tokio::test]
    async fn test_get_decimal_from_integer() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, int_value) VALUES (1, 12345)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT int_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        let result = get_decimal(&row, "int_value");

        assert_eq!(result, Ok(dec!(12345)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_real() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, real_value) VALUES (1, 72.3)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT real_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        let result = get_decimal(&row, "real_value");

        assert_eq!(result, Ok(dec!(72.3)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_null_returns_zero() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, real_value) VALUES (1, NULL)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT real_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        let result = get_decimal(&row, "real_value");

        assert_eq!(result, Ok(Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_get_decimal_unexpected_type() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, text_value) VALUES (1, 'not a number')")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT text_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        let result = get_decimal(&row, "text_value");

        assert_eq!(
            result,
            Err(StoreError::Database(
                "Unexpected type 'TEXT' for column 'text_value'".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_get_decimal_column_not_found() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id) VALUES (1)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT id FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        let result = get_decimal(&row, "nonexistent_column");

        assert!(result.is_err());
        assert!(matches!(result, Err(StoreError::Database(msg)) if msg.starts_with("Column 'nonexistent_column' not found:")));
    }

    #[test]
    fn test_decimal_to_f64_round_trip() {
        assert_eq!(decimal_to_f64(dec!(72.3)), 72.3);
        assert_eq!(decimal_to_f64(dec!(-3.5)), -3.5);
        assert_eq!(decimal_to_f64(Decimal::ZERO), 0.0);
    }
}
