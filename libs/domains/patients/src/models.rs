use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor, value::MapAccessDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A stored patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Store-assigned identifier
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(id: i32, input: CreatePatient) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            address: input.address,
            phone: input.phone,
            email: input.email,
            created_at: Utc::now(),
        }
    }
}

/// DTO for creating a new patient.
///
/// Decodes only from a JSON object. Missing fields decode as empty strings
/// and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(default)]
pub struct CreatePatient {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CreatePatientFields {
    first_name: String,
    last_name: String,
    address: String,
    phone: String,
    email: String,
}

impl<'de> Deserialize<'de> for CreatePatient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CreatePatientVisitor)
    }
}

struct CreatePatientVisitor;

impl<'de> Visitor<'de> for CreatePatientVisitor {
    type Value = CreatePatient;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a patient object")
    }

    // No visit_seq: positional arrays are rejected
    fn visit_map<A>(self, map: A) -> Result<CreatePatient, A::Error>
    where
        A: MapAccess<'de>,
    {
        let fields = CreatePatientFields::deserialize(MapAccessDeserializer::new(map))?;
        Ok(CreatePatient {
            first_name: fields.first_name,
            last_name: fields.last_name,
            address: fields.address,
            phone: fields.phone,
            email: fields.email,
        })
    }
}
