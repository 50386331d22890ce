//! Student entity and its addressable fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A student record. `id` is assigned by the store on first persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Student {
            id: None,
            name: name.into(),
            email: None,
            birth_date: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}

/// Student attributes that can be sorted on or placed in a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    Id,
    Name,
    Email,
    BirthDate,
}

impl StudentField {
    pub const ALL: [StudentField; 4] = [
        StudentField::Id,
        StudentField::Name,
        StudentField::Email,
        StudentField::BirthDate,
    ];

    /// Accepts the JSON property name or the column name.
    pub fn from_property(property: &str) -> Option<Self> {
        match property.trim() {
            "id" => Some(StudentField::Id),
            "name" => Some(StudentField::Name),
            "email" => Some(StudentField::Email),
            "birthDate" | "birth_date" => Some(StudentField::BirthDate),
            _ => None,
        }
    }

    pub fn property(self) -> &'static str {
        match self {
            StudentField::Id => "id",
            StudentField::Name => "name",
            StudentField::Email => "email",
            StudentField::BirthDate => "birthDate",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            StudentField::Id => "id",
            StudentField::Name => "name",
            StudentField::Email => "email",
            StudentField::BirthDate => "birth_date",
        }
    }

    /// Display text for reports. Missing values render empty.
    pub fn display(self, student: &Student) -> String {
        match self {
            StudentField::Id => student.id.map(|id| id.to_string()).unwrap_or_default(),
            StudentField::Name => student.name.clone(),
            StudentField::Email => student.email.clone().unwrap_or_default(),
            StudentField::BirthDate => student
                .birth_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Text fields order case-insensitively in every store.
    pub fn is_text(self) -> bool {
        matches!(self, StudentField::Name | StudentField::Email)
    }

    /// Ascending comparison with missing values last, the PostgreSQL default.
    pub fn compare(self, a: &Student, b: &Student) -> Ordering {
        match self {
            StudentField::Id => nulls_last(&a.id, &b.id),
            StudentField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            StudentField::Email => nulls_last(
                &a.email.as_deref().map(str::to_lowercase),
                &b.email.as_deref().map(str::to_lowercase),
            ),
            StudentField::BirthDate => nulls_last(&a.birth_date, &b.birth_date),
        }
    }
}

impl std::fmt::Display for StudentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.property())
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
