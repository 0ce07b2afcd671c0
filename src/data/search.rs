use crate::data::student::StudentRecord;

/// Keeps the records where any text field contains `query`, ignoring case.
///
/// An empty query keeps everything. Order is preserved.
pub fn filter<'a>(records: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    let query = query.to_lowercase();

    records
        .iter()
        .filter(|student| {
            student
                .text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}
