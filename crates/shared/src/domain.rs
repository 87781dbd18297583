use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employment status as reported by the backend (`estado`).
///
/// Unknown values are kept verbatim so they still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnVacation,
    Other(String),
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "activo",
            Self::Inactive => "inactivo",
            Self::OnVacation => "vacaciones",
            Self::Other(raw) => raw,
        }
    }

    /// Visual class used for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Active => "success",
            Self::Inactive => "danger",
            Self::OnVacation => "warning",
            Self::Other(_) => "secondary",
        }
    }
}

impl From<String> for EmployeeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "activo" => Self::Active,
            "inactivo" => Self::Inactive,
            "vacaciones" => Self::OnVacation,
            _ => Self::Other(value),
        }
    }
}

impl From<EmployeeStatus> for String {
    fn from(value: EmployeeStatus) -> Self {
        match value {
            EmployeeStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "horario_laboral")]
    pub work_schedule: String,
    #[serde(rename = "estado")]
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "nivel_estudio")]
    pub education_level: String,
    #[serde(
        rename = "fecha_nacimiento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<BirthDate>,
    #[serde(rename = "domicilio", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// `fecha_nacimiento` as sent by the backend. ISO dates are parsed; any other
/// text is kept verbatim so one odd row never fails a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BirthDate {
    Date(NaiveDate),
    Raw(String),
}

impl BirthDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
