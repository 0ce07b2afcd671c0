use crate::data::student::{StudentDraft, StudentField, StudentRecord};
use regex::Regex;
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    sync::LazyLock,
};
use uuid::Uuid;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

//`\d` would also accept non-ascii digits
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("phone regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
    MustBeUnique,
}

impl FieldError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::InvalidEmail => "Invalid email",
            Self::InvalidPhone => "Invalid phone",
            Self::MustBeUnique => "Must be unique",
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Field-error mapping. Empty means the draft is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<StudentField, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: StudentField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StudentField, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    fn insert(&mut self, field: StudentField, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Checks a draft against every rule at once, never stopping at the first failure.
///
/// `exclude_id` names the record being edited, so that it may keep its own roll number.
pub fn validate(
    draft: &StudentDraft,
    existing: &[StudentRecord],
    exclude_id: Option<Uuid>,
) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for field in [StudentField::FullName, StudentField::Class, StudentField::Section] {
        if draft.get(field).trim().is_empty() {
            errors.insert(field, FieldError::Required);
        }
    }

    if !EMAIL_REGEX.is_match(&draft.email) {
        errors.insert(StudentField::Email, FieldError::InvalidEmail);
    }

    if !PHONE_REGEX.is_match(&draft.phone) {
        errors.insert(StudentField::Phone, FieldError::InvalidPhone);
    }

    if draft.roll_number.trim().is_empty() {
        errors.insert(StudentField::RollNumber, FieldError::Required);
    } else if existing
        .iter()
        .any(|student| student.roll_number == draft.roll_number && Some(student.id) != exclude_id)
    {
        errors.insert(StudentField::RollNumber, FieldError::MustBeUnique);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn valid_draft() -> StudentDraft {
        StudentDraft {
            full_name: "John Smith".into(),
            class: "10".into(),
            roll_number: "101".into(),
            section: "A".into(),
            email: "john@example.org".into(),
            phone: "12345678901".into(),
        }
    }

    fn existing_with_roll(roll_number: &str) -> (Uuid, Vec<StudentRecord>) {
        let id = Uuid::new_v4();
        let draft = StudentDraft {
            roll_number: roll_number.into(),
            ..valid_draft()
        };
        (id, vec![StudentRecord::new(id, draft, Timestamp::now())])
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&valid_draft(), &[], None).is_empty());
    }

    #[test]
    fn blank_required_fields_are_reported_together() {
        let draft = StudentDraft {
            full_name: "   ".into(),
            class: String::new(),
            section: "\t".into(),
            ..valid_draft()
        };

        let errors = validate(&draft, &[], None);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(StudentField::FullName), Some(FieldError::Required));
        assert_eq!(errors.get(StudentField::Class), Some(FieldError::Required));
        assert_eq!(errors.get(StudentField::Section), Some(FieldError::Required));
        assert_eq!(errors.get(StudentField::RollNumber), None);
    }

    #[test]
    fn empty_draft_fails_every_field() {
        let errors = validate(&StudentDraft::default(), &[], None);

        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(StudentField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get(StudentField::Phone), Some(FieldError::InvalidPhone));
        assert_eq!(errors.get(StudentField::RollNumber), Some(FieldError::Required));
    }

    #[test]
    fn email_shape() {
        for good in ["a@b.c", "john.smith@school.example.org", "x+y@d.io"] {
            let draft = StudentDraft {
                email: good.into(),
                ..valid_draft()
            };
            assert_eq!(validate(&draft, &[], None).get(StudentField::Email), None, "{good}");
        }

        for bad in ["", "plain", "a@b", "@b.c", "a@.c", "a b@c.d", "a@b.c ", "a@@b.c"] {
            let draft = StudentDraft {
                email: bad.into(),
                ..valid_draft()
            };
            assert_eq!(
                validate(&draft, &[], None).get(StudentField::Email),
                Some(FieldError::InvalidEmail),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn phone_must_be_eleven_digits() {
        for (phone, ok) in [
            ("12345678901", true),
            ("1234567890", false),
            ("123456789012", false),
            ("1234567890a", false),
            (" 12345678901", false),
            ("", false),
            ("١٢٣٤٥٦٧٨٩٠١", false),
        ] {
            let draft = StudentDraft {
                phone: phone.into(),
                ..valid_draft()
            };
            let error = validate(&draft, &[], None).get(StudentField::Phone);
            assert_eq!(error.is_none(), ok, "{phone:?}");
        }
    }

    #[test]
    fn roll_number_must_be_unique_unless_excluded() {
        let (id, existing) = existing_with_roll("101");

        let errors = validate(&valid_draft(), &existing, None);
        assert_eq!(
            errors.get(StudentField::RollNumber),
            Some(FieldError::MustBeUnique)
        );

        let errors = validate(&valid_draft(), &existing, Some(id));
        assert_eq!(errors.get(StudentField::RollNumber), None);

        let errors = validate(&valid_draft(), &existing, Some(Uuid::new_v4()));
        assert_eq!(
            errors.get(StudentField::RollNumber),
            Some(FieldError::MustBeUnique)
        );
    }

    #[test]
    fn roll_number_uniqueness_is_case_sensitive() {
        let (_, existing) = existing_with_roll("r-101");
        let draft = StudentDraft {
            roll_number: "R-101".into(),
            ..valid_draft()
        };

        assert!(validate(&draft, &existing, None).is_empty());
    }

    #[test]
    fn blank_roll_number_is_required_not_duplicate() {
        let (_, existing) = existing_with_roll("  ");
        let draft = StudentDraft {
            roll_number: "  ".into(),
            ..valid_draft()
        };

        assert_eq!(
            validate(&draft, &existing, None).get(StudentField::RollNumber),
            Some(FieldError::Required)
        );
    }

    #[test]
    fn display_lists_fields_in_order() {
        let draft = StudentDraft {
            full_name: String::new(),
            phone: "123".into(),
            ..valid_draft()
        };

        assert_eq!(
            validate(&draft, &[], None).to_string(),
            "fullName: Required, phone: Invalid phone"
        );
    }
}
