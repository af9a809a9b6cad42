use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let (entity, field) = info
                    .table_name()
                    .zip(info.column_name())
                    .map(|(t, c)| (t.to_string(), c.to_string()))
                    .or_else(|| {
                        info.constraint_name()
                            .and_then(Self::split_constraint_name)
                    })
                    .unwrap_or_else(|| ("resource".to_string(), "unknown".to_string()));

                AppError::Duplicate {
                    entity,
                    field,
                    value: info.details().unwrap_or_default().to_string(),
                }
            }
            DatabaseErrorKind::NotNullViolation => AppError::Validation {
                field: info.column_name().unwrap_or("unknown").to_string(),
                reason: "Field is required".to_string(),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(info.message().to_string()),
            },
        }
    }

    /// Splits a PostgreSQL constraint name of the form `{table}_{column}_key`.
    ///
    /// Table names in this schema are two words (`notify_key`, `notify_channel`),
    /// so the first two segments name the table.
    pub fn split_constraint_name(constraint: &str) -> Option<(String, String)> {
        let trimmed = constraint
            .strip_suffix("_key")
            .or_else(|| constraint.strip_suffix("_unique"))?;
        let mut parts = trimmed.splitn(3, '_');
        let first = parts.next()?;
        let second = parts.next()?;
        let column = parts.next()?;
        Some((format!("{}_{}", first, second), column.to_string()))
    }
}
