//! Typed UUID wrappers.
//!
//! `Id<T>` wraps a `uuid::Uuid` so a `ProblemId` can never be passed where a
//! `ProgressId` is expected. New ids are time-ordered v7 UUIDs.
//!
//! ```compile_fail
//! use server_core::common::{ProblemId, ProgressId};
//!
//! let problem_id = ProblemId::new();
//! let progress_id: ProgressId = problem_id;
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

#[repr(transparent)]
pub struct Id<T>(Uuid, PhantomData<fn() -> T>);

impl<T> Id<T> {
    pub fn new() -> Self {
        Self(Uuid::now_v7(), PhantomData)
    }

    /// Parse an id sent as a string in a request body or path.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?, PhantomData))
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(|uuid| Self(uuid, PhantomData))
    }
}

// Stored as Postgres UUID columns.

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <Uuid as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <Uuid as Type<Postgres>>::compatible(ty)
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <Uuid as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <Uuid as Decode<Postgres>>::decode(value).map(|uuid| Self(uuid, PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Problem;

    type ProblemId = Id<Problem>;

    #[test]
    fn test_new_ids_are_unique_v7() {
        let id1 = ProblemId::new();
        let id2 = ProblemId::new();
        assert_ne!(id1, id2);
        assert_eq!(id1.0.get_version_num(), 7);
    }

    #[test]
    fn test_parse_accepts_display_output() {
        let id = ProblemId::new();
        assert_eq!(ProblemId::parse(&format!(" {} ", id)).unwrap(), id);
        assert_eq!(id.to_string().parse::<ProblemId>().unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_object_ids() {
        assert!(ProblemId::parse("507f1f77bcf86cd799439011").is_err());
        assert!(ProblemId::parse("").is_err());
    }

    #[test]
    fn test_serializes_as_plain_uuid_string() {
        let id = ProblemId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let parsed: ProblemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_debug_includes_type_name() {
        let debug = format!("{:?}", ProblemId::new());
        assert!(debug.contains("Problem"));
    }
}
