//! Patient demographics, problem list, and screening history.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::time::age_in_years;

/// An entry on a patient's problem list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_code: Option<String>,
    pub active: bool,
}

impl Problem {
    /// Creates an active problem.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icd10_code: None,
            active: true,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.icd10_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn resolved(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether this is an active diabetes diagnosis, matched by name or by
    /// an ICD-10 E11 code.
    #[must_use]
    pub fn is_diabetes(&self) -> bool {
        if !self.active {
            return false;
        }
        self.name.to_lowercase().contains("diabetes")
            || self
                .icd10_code
                .as_deref()
                .is_some_and(|code| code.starts_with("E11"))
    }
}

/// A patient on the clinic's panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<Problem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_colonoscopy_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_a1c_date: Option<Date>,
}

impl Patient {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: Date,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            phone: None,
            email: None,
            problems: Vec::new(),
            last_colonoscopy_date: None,
            last_a1c_date: None,
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_problem(mut self, problem: Problem) -> Self {
        self.problems.push(problem);
        self
    }

    #[must_use]
    pub fn with_last_colonoscopy(mut self, date: Date) -> Self {
        self.last_colonoscopy_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_last_a1c(mut self, date: Date) -> Self {
        self.last_a1c_date = Some(date);
        self
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in completed years at the given instant.
    #[must_use]
    pub fn age_on(&self, now: OffsetDateTime) -> i64 {
        age_in_years(self.date_of_birth, now.date())
    }

    #[must_use]
    pub fn has_active_diabetes(&self) -> bool {
        self.problems.iter().any(Problem::is_diabetes)
    }
}
