use crate::{
    data::{
        student::{StudentDraft, StudentRecord},
        validation::{FieldErrors, validate},
    },
    error::{MissingStudentSnafu, RollbookResult, ValidationSnafu},
};
use jiff::Timestamp;
use snafu::OptionExt;
use uuid::Uuid;

/// The ordered collection of student records, newest first.
///
/// Every mutation is validated up front and is all-or-nothing.
#[derive(Debug, Default)]
pub struct StudentStore {
    records: Vec<StudentRecord>,
}

impl StudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing collection, which is assumed to already be newest-first.
    pub const fn with_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn validate(&self, draft: &StudentDraft, exclude_id: Option<Uuid>) -> FieldErrors {
        validate(draft, &self.records, exclude_id)
    }

    pub fn create(&mut self, draft: StudentDraft) -> RollbookResult<Uuid> {
        let errors = self.validate(&draft, None);
        if !errors.is_empty() {
            debug!(%errors, "Rejected new student");
            return ValidationSnafu { errors }.fail();
        }

        let id = self.fresh_id();
        self.records
            .insert(0, StudentRecord::new(id, draft, Timestamp::now()));

        info!(%id, "Created student");
        Ok(id)
    }

    pub fn update(&mut self, id: Uuid, draft: StudentDraft) -> RollbookResult<()> {
        let errors = self.validate(&draft, Some(id));
        let record = self
            .records
            .iter_mut()
            .find(|student| student.id == id)
            .context(MissingStudentSnafu { id })?;

        if !errors.is_empty() {
            debug!(%id, %errors, "Rejected student update");
            return ValidationSnafu { errors }.fail();
        }

        record.apply(draft);
        info!(%id, "Updated student");
        Ok(())
    }

    /// Removes the record if it exists. Absent ids are not an error.
    pub fn delete(&mut self, id: Uuid) -> Option<StudentRecord> {
        let index = self.records.iter().position(|student| student.id == id)?;
        let removed = self.records.remove(index);

        info!(%id, "Deleted student");
        Some(removed)
    }

    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&StudentRecord> {
        self.records.iter().find(|student| student.id == id)
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                break id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{student::StudentField, validation::FieldError},
        error::RollbookError,
    };

    fn draft(roll_number: &str) -> StudentDraft {
        StudentDraft {
            full_name: format!("Student {roll_number}"),
            class: "10".into(),
            roll_number: roll_number.into(),
            section: "A".into(),
            email: format!("s{roll_number}@example.org"),
            phone: "12345678901".into(),
        }
    }

    fn ids(store: &StudentStore) -> Vec<Uuid> {
        store.list().iter().map(|s| s.id).collect()
    }

    #[test]
    fn create_prepends() {
        let mut store = StudentStore::new();
        let first = store.create(draft("1")).unwrap();
        let second = store.create(draft("2")).unwrap();

        assert_eq!(ids(&store), [second, first]);
        assert_ne!(first, second);

        let newest = &store.list()[0];
        assert_eq!(newest.roll_number, "2");
        assert!(newest.created_at >= store.list()[1].created_at);
    }

    #[test]
    fn invalid_create_does_not_mutate() {
        let mut store = StudentStore::new();
        store.create(draft("1")).unwrap();

        let err = store.create(draft("1")).unwrap_err();
        let RollbookError::Validation { errors } = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            errors.get(StudentField::RollNumber),
            Some(FieldError::MustBeUnique)
        );
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_preserves_identity_and_position() {
        let mut store = StudentStore::new();
        let oldest = store.create(draft("1")).unwrap();
        let target = store.create(draft("2")).unwrap();
        let newest = store.create(draft("3")).unwrap();
        let before = store.get(target).unwrap().clone();

        let mut changed = draft("2");
        changed.full_name = "Renamed".into();
        changed.section = "C".into();
        store.update(target, changed.clone()).unwrap();

        assert_eq!(ids(&store), [newest, target, oldest]);
        let after = store.get(target).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.to_draft(), changed);
    }

    #[test]
    fn update_may_take_a_freed_roll_number_but_not_a_taken_one() {
        let mut store = StudentStore::new();
        let a = store.create(draft("1")).unwrap();
        store.create(draft("2")).unwrap();

        assert!(matches!(
            store.update(a, draft("2")),
            Err(RollbookError::Validation { .. })
        ));
        assert_eq!(store.get(a).unwrap().roll_number, "1");

        store.update(a, draft("7")).unwrap();
        assert_eq!(store.get(a).unwrap().roll_number, "7");
    }

    #[test]
    fn update_of_missing_id_is_not_found() {
        let mut store = StudentStore::new();
        store.create(draft("1")).unwrap();
        let missing = Uuid::new_v4();

        let err = store.update(missing, draft("9")).unwrap_err();
        assert!(matches!(err, RollbookError::MissingStudent { id } if id == missing));

        let err = store.update(missing, StudentDraft::default()).unwrap_err();
        assert!(matches!(err, RollbookError::MissingStudent { .. }));
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = StudentStore::new();
        let a = store.create(draft("1")).unwrap();
        let b = store.create(draft("2")).unwrap();

        assert!(store.delete(Uuid::new_v4()).is_none());
        assert_eq!(store.list().len(), 2);

        let removed = store.delete(a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(ids(&store), [b]);

        assert!(store.delete(a).is_none());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn deleted_roll_number_can_be_reused() {
        let mut store = StudentStore::new();
        let a = store.create(draft("1")).unwrap();
        store.delete(a);

        assert!(store.create(draft("1")).is_ok());
    }

    #[test]
    fn injected_records_are_used() {
        let existing = StudentRecord::new(Uuid::new_v4(), draft("42"), Timestamp::UNIX_EPOCH);
        let mut store = StudentStore::with_records(vec![existing.clone()]);

        assert_eq!(store.list(), [existing]);
        assert!(!store.validate(&draft("42"), None).is_empty());
        assert!(store.create(draft("42")).is_err());
    }

    #[test]
    fn list_is_stable_without_mutation() {
        let mut store = StudentStore::new();
        store.create(draft("1")).unwrap();
        store.create(draft("2")).unwrap();

        assert_eq!(store.list(), store.list());
    }
}
