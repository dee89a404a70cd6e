//! Conversions from external infrastructure errors into domain errors.

use presensi_domain::PresensiError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PresensiError);

impl From<InfraError> for PresensiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PresensiError> for InfraError {
    fn from(value: PresensiError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPresensiError {
    fn into_presensi(self) -> PresensiError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → PresensiError */
/* -------------------------------------------------------------------------- */

/// `SQLITE_CONSTRAINT_UNIQUE`
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;
/// `SQLITE_CONSTRAINT_PRIMARYKEY`
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;

impl IntoPresensiError for SqlError {
    fn into_presensi(self) -> PresensiError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        PresensiError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        PresensiError::Database("database is locked".into())
                    }
                    (
                        ErrorCode::ConstraintViolation,
                        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY,
                    ) => PresensiError::Conflict(format!("unique constraint violation: {message}")),
                    _ => PresensiError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => PresensiError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                PresensiError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                PresensiError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => PresensiError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => PresensiError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_presensi())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → PresensiError */
/* -------------------------------------------------------------------------- */

impl IntoPresensiError for r2d2::Error {
    fn into_presensi(self) -> PresensiError {
        PresensiError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_presensi())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
