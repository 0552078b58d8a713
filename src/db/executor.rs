use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tokio_postgres::types::Type;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, error};

use crate::config::DatabaseConfig;

/// Failure raised by the database driver during connection or execution.
/// Server-side errors carry their SQLSTATE code and any detail/hint the
/// server attached; connection-level failures only have a message.
#[derive(Debug, Clone, Serialize)]
pub struct DbError {
    pub message: String,
    pub code: Option<String>,
    pub detail: Option<String>,
    pub hint: Option<String>,
}

impl DbError {
    pub fn from_pg_error(err: &tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            Self {
                message: db_err.message().to_string(),
                code: Some(db_err.code().code().to_string()),
                detail: db_err.detail().map(|s| s.to_string()),
                hint: db_err.hint().map(|s| s.to_string()),
            }
        } else {
            Self {
                message: err.to_string(),
                code: None,
                detail: None,
                hint: None,
            }
        }
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} (SQLSTATE {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for DbError {}

/// Tabular result of a successful execution. Zero rows is a valid success
/// and serializes as an empty `rows` array.
#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    pub execution_time_ms: u64,
}

impl QueryResult {
    pub fn empty(execution_time_ms: u64) -> Self {
        Self {
            columns: vec![],
            rows: vec![],
            row_count: 0,
            execution_time_ms,
        }
    }
}

/// Runs SQL text against PostgreSQL and materializes the full result set.
/// Each call dials its own connection and drops it afterwards; there is no
/// pooling, no transaction management, and no parameterization — the text
/// is executed exactly as the translator produced it.
pub struct QueryExecutor {
    config: DatabaseConfig,
}

impl QueryExecutor {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub async fn execute(&self, sql: &str) -> Result<QueryResult, DbError> {
        let start = Instant::now();

        let (client, connection) =
            tokio_postgres::connect(&self.config.connection_string(), NoTls)
                .await
                .map_err(|e| DbError::from_pg_error(&e))?;

        // The connection future drives the socket; it resolves once the
        // client is dropped at the end of this call.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("Database connection error: {}", e);
            }
        });

        let rows = client
            .query(sql.trim(), &[])
            .await
            .map_err(|e| DbError::from_pg_error(&e))?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!("Query returned {} rows in {}ms", rows.len(), elapsed_ms);

        Ok(materialize(&rows, elapsed_ms))
    }
}

fn materialize(rows: &[Row], execution_time_ms: u64) -> QueryResult {
    let Some(first_row) = rows.first() else {
        return QueryResult::empty(execution_time_ms);
    };

    let columns: Vec<String> = first_row
        .columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();

    let mut result_rows: Vec<Vec<Value>> = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| extract_value(row, i, col.type_()))
            .collect();
        result_rows.push(cells);
    }

    let row_count = result_rows.len();

    QueryResult {
        columns,
        rows: result_rows,
        row_count,
        execution_time_ms,
    }
}

/// Converts one cell to a JSON scalar. NULL becomes `null`; types without a
/// JSON-friendly mapping fall back to a `<typename>` placeholder rather
/// than failing the whole result.
fn extract_value(row: &Row, idx: usize, ty: &Type) -> Value {
    match *ty {
        Type::BOOL => opt_to_value(row.try_get::<_, Option<bool>>(idx), Value::Bool),
        Type::INT2 => opt_to_value(row.try_get::<_, Option<i16>>(idx), |v| Value::from(v)),
        Type::INT4 => opt_to_value(row.try_get::<_, Option<i32>>(idx), |v| Value::from(v)),
        Type::INT8 => opt_to_value(row.try_get::<_, Option<i64>>(idx), |v| Value::from(v)),
        Type::FLOAT4 => opt_to_value(row.try_get::<_, Option<f32>>(idx), |v| {
            Value::from(v as f64)
        }),
        Type::FLOAT8 => opt_to_value(row.try_get::<_, Option<f64>>(idx), Value::from),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            opt_to_value(row.try_get::<_, Option<String>>(idx), Value::String)
        }
        Type::TIMESTAMP => opt_to_value(row.try_get::<_, Option<NaiveDateTime>>(idx), |v| {
            Value::String(v.to_string())
        }),
        Type::TIMESTAMPTZ => opt_to_value(row.try_get::<_, Option<DateTime<Utc>>>(idx), |v| {
            Value::String(v.to_rfc3339())
        }),
        Type::DATE => opt_to_value(row.try_get::<_, Option<NaiveDate>>(idx), |v| {
            Value::String(v.to_string())
        }),
        Type::TIME => opt_to_value(row.try_get::<_, Option<NaiveTime>>(idx), |v| {
            Value::String(v.to_string())
        }),
        Type::JSON | Type::JSONB => {
            opt_to_value(row.try_get::<_, Option<Value>>(idx), |v| v)
        }
        _ => match row.try_get::<_, Option<String>>(idx) {
            Ok(Some(s)) => Value::String(s),
            Ok(None) => Value::Null,
            Err(_) => Value::String(format!("<{}>", ty.name())),
        },
    }
}

fn opt_to_value<T>(
    cell: Result<Option<T>, tokio_postgres::Error>,
    f: impl FnOnce(T) -> Value,
) -> Value {
    match cell {
        Ok(Some(v)) => f(v),
        Ok(None) => Value::Null,
        Err(e) => {
            error!("Failed to decode cell: {}", e);
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_success_with_zero_rows() {
        let result = QueryResult::empty(12);
        assert_eq!(result.row_count, 0);
        assert!(result.rows.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rows"], serde_json::json!([]));
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["execution_time_ms"], 12);
    }

    #[test]
    fn test_db_error_display_includes_sqlstate() {
        let err = DbError {
            message: "syntax error at or near \"SELEC\"".to_string(),
            code: Some("42601".to_string()),
            detail: None,
            hint: None,
        };
        assert_eq!(
            err.to_string(),
            "syntax error at or near \"SELEC\" (SQLSTATE 42601)"
        );
    }

    #[test]
    fn test_db_error_display_without_code() {
        let err = DbError {
            message: "connection refused".to_string(),
            code: None,
            detail: None,
            hint: None,
        };
        assert_eq!(err.to_string(), "connection refused");
    }
}
