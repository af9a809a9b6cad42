//! Single-character status flags shared by the notify tables.
//!
//! The columns store `'0'` / `'1'` and the JSON API exposes the same codes.

use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Status of a key, platform or channel record
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "0")]
    Active,
    #[serde(rename = "1")]
    Disabled,
}

impl diesel::query_builder::QueryId for RecordStatus {
    type QueryId = RecordStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for RecordStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            RecordStatus::Active => "0",
            RecordStatus::Disabled => "1",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for RecordStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "0" => Ok(RecordStatus::Active),
            "1" => Ok(RecordStatus::Disabled),
            _ => Err(format!("Unrecognized status: {}", s).into()),
        }
    }
}

/// Outcome recorded on a send log row
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum SendStatus {
    #[serde(rename = "0")]
    Success,
    #[serde(rename = "1")]
    Failed,
}

impl SendStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            SendStatus::Success
        } else {
            SendStatus::Failed
        }
    }
}

impl diesel::query_builder::QueryId for SendStatus {
    type QueryId = SendStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for SendStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            SendStatus::Success => "0",
            SendStatus::Failed => "1",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for SendStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "0" => Ok(SendStatus::Success),
            "1" => Ok(SendStatus::Failed),
            _ => Err(format!("Unrecognized send status: {}", s).into()),
        }
    }
}

/// Whether a channel takes part in default fan-out. Note the inverted codes:
/// `'1'` means yes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum DefaultFlag {
    #[serde(rename = "1")]
    Yes,
    #[default]
    #[serde(rename = "0")]
    No,
}

impl diesel::query_builder::QueryId for DefaultFlag {
    type QueryId = DefaultFlag;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for DefaultFlag {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            DefaultFlag::Yes => "1",
            DefaultFlag::No => "0",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for DefaultFlag {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "1" => Ok(DefaultFlag::Yes),
            "0" => Ok(DefaultFlag::No),
            _ => Err(format!("Unrecognized default flag: {}", s).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_serialize_as_flags() {
        assert_eq!(serde_json::to_string(&RecordStatus::Active).unwrap(), "\"0\"");
        assert_eq!(serde_json::to_string(&SendStatus::Failed).unwrap(), "\"1\"");
        assert_eq!(serde_json::to_string(&DefaultFlag::Yes).unwrap(), "\"1\"");
        let parsed: RecordStatus = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(parsed, RecordStatus::Disabled);
    }

    #[test]
    fn test_send_status_from_success() {
        assert_eq!(SendStatus::from_success(true), SendStatus::Success);
        assert_eq!(SendStatus::from_success(false), SendStatus::Failed);
    }
}
