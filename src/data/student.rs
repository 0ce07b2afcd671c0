use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub id: Uuid,
    pub full_name: String,
    pub class: String,
    pub roll_number: String,
    pub section: String,
    pub email: String,
    pub phone: String,
    pub created_at: Timestamp,
}

/// The editable half of a [`StudentRecord`], as submitted by a form or a CSV row.
///
/// Missing fields deserialise to empty strings so that they surface as validation
/// errors rather than as deserialisation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentDraft {
    pub full_name: String,
    pub class: String,
    pub roll_number: String,
    pub section: String,
    pub email: String,
    pub phone: String,
}

impl StudentRecord {
    pub fn new(id: Uuid, draft: StudentDraft, created_at: Timestamp) -> Self {
        let StudentDraft {
            full_name,
            class,
            roll_number,
            section,
            email,
            phone,
        } = draft;

        Self {
            id,
            full_name,
            class,
            roll_number,
            section,
            email,
            phone,
            created_at,
        }
    }

    /// Replaces every editable field, leaving `id` and `created_at` alone.
    pub fn apply(&mut self, draft: StudentDraft) {
        let StudentDraft {
            full_name,
            class,
            roll_number,
            section,
            email,
            phone,
        } = draft;

        self.full_name = full_name;
        self.class = class;
        self.roll_number = roll_number;
        self.section = section;
        self.email = email;
        self.phone = phone;
    }

    pub fn to_draft(&self) -> StudentDraft {
        StudentDraft {
            full_name: self.full_name.clone(),
            class: self.class.clone(),
            roll_number: self.roll_number.clone(),
            section: self.section.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn text_fields(&self) -> [&str; 6] {
        StudentField::ALL.map(|field| self.get(field))
    }

    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::FullName => &self.full_name,
            StudentField::Class => &self.class,
            StudentField::RollNumber => &self.roll_number,
            StudentField::Section => &self.section,
            StudentField::Email => &self.email,
            StudentField::Phone => &self.phone,
        }
    }
}

impl StudentDraft {
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::FullName => &self.full_name,
            StudentField::Class => &self.class,
            StudentField::RollNumber => &self.roll_number,
            StudentField::Section => &self.section,
            StudentField::Email => &self.email,
            StudentField::Phone => &self.phone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    FullName,
    Class,
    RollNumber,
    Section,
    Email,
    Phone,
}

impl StudentField {
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Class,
        Self::RollNumber,
        Self::Section,
        Self::Email,
        Self::Phone,
    ];

    /// Name used in field-error mappings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Class => "class",
            Self::RollNumber => "rollNumber",
            Self::Section => "section",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Name of the HTML input, matching the serde names on [`StudentDraft`].
    pub const fn form_name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Class => "class",
            Self::RollNumber => "roll_number",
            Self::Section => "section",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Class => "Class",
            Self::RollNumber => "Roll Number",
            Self::Section => "Section",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

impl Display for StudentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
