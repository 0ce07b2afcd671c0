use crate::{
    data::{
        store::StudentStore,
        student::{StudentDraft, StudentRecord},
        validation::FieldErrors,
    },
    error::{CsvFlushSnafu, CsvSnafu, MultipartSnafu, RollbookError, RollbookResult},
    maud_conveniences::{escape, render_table, subtitle, title},
    routes::sse::SseEvent,
    state::RollbookState,
};
use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
};
use jiff::Timestamp;
use maud::{Markup, html};
use serde::Serialize;
use snafu::ResultExt;
use uuid::Uuid;

pub async fn get_import_export_page(State(state): State<RollbookState>) -> Markup {
    state.render(html! {
        div class="max-w-4xl w-full flex flex-col gap-8" {
            div class="flex flex-row items-center justify-between" {
                (title("Import / Export"))
                a href="/" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Back"}
            }

            div class="rounded shadow-xl flex flex-col p-4 bg-gray-800" {
                (subtitle("Export Students"))
                a href="/export/students.csv" download class="bg-pink-600 hover:bg-pink-700 font-bold py-2 px-4 rounded self-start" {
                    "Download as CSV"
                }
            }

            div class="rounded shadow-xl flex flex-col p-4 bg-gray-800" {
                (subtitle("Import Students"))

                div id="import_students_form" {
                    (render_table(
                        html! { h3 class="text-lg font-semibold mb-2" {"CSV Format"} },
                        ["Column", "Example"],
                        [
                            ["full_name", "John Smith"],
                            ["class", "10"],
                            ["roll_number", "101"],
                            ["section", "A"],
                            ["email", "john@example.org"],
                            ["phone", "01234567890"],
                        ]
                        .into_iter()
                        .map(|row| row.map(escape))
                        .collect()
                    ))
                    p class="italic" {"Rows are checked exactly like the form, so roll numbers must be unique."}
                    br;

                    form hx-put="/import/students" hx-swap="innerHTML" hx-target="#import_students_form" hx-encoding="multipart/form-data" {
                        label for="students_csv" class="block text-sm font-medium text-gray-400 mb-2" {"Upload Students CSV"}
                        input multiple type="file" name="students_csv" id="students_csv" accept=".csv" class="block w-full text-sm text-gray-300 file:mr-4 file:py-2 file:px-4 file:rounded file:border-0 file:text-sm file:font-semibold file:bg-violet-50 file:text-violet-700 hover:file:bg-violet-100 mb-4";

                        button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded" {
                            "Import Students"
                        }
                    }
                }
            }
        }
    })
}

#[derive(Serialize)]
struct CsvExportRow<'a> {
    id: Uuid,
    created_at: Timestamp,
    full_name: &'a str,
    class: &'a str,
    roll_number: &'a str,
    section: &'a str,
    email: &'a str,
    phone: &'a str,
}

impl<'a> From<&'a StudentRecord> for CsvExportRow<'a> {
    fn from(student: &'a StudentRecord) -> Self {
        Self {
            id: student.id,
            created_at: student.created_at,
            full_name: &student.full_name,
            class: &student.class,
            roll_number: &student.roll_number,
            section: &student.section,
            email: &student.email,
            phone: &student.phone,
        }
    }
}

pub fn students_to_csv(students: &[StudentRecord]) -> RollbookResult<Vec<u8>> {
    let mut output = vec![];
    {
        let mut writer = csv::Writer::from_writer(&mut output);
        for student in students {
            writer
                .serialize(CsvExportRow::from(student))
                .context(CsvSnafu)?;
        }
        writer.flush().context(CsvFlushSnafu)?;
    }
    Ok(output)
}

pub async fn get_students_csv(
    State(state): State<RollbookState>,
) -> RollbookResult<impl IntoResponse> {
    let csv = students_to_csv(state.students().await.list())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"students.csv\"",
            ),
        ],
        csv,
    ))
}

#[derive(Debug)]
pub struct RejectedRow {
    pub line: u64,
    pub errors: FieldErrors,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub added: usize,
    pub rejected: Vec<RejectedRow>,
    pub syntax_errors: Vec<RollbookError>,
}

/// Feeds every row through [`StudentStore::create`], so later rows see earlier ones.
pub fn import_students_csv(store: &mut StudentStore, bytes: &[u8], report: &mut ImportReport) {
    let mut rdr = csv::Reader::from_reader(bytes);
    let headers = match rdr.headers() {
        Ok(headers) => headers.clone(),
        Err(source) => {
            report.syntax_errors.push(RollbookError::Csv { source });
            return;
        }
    };

    for row in rdr.records() {
        let row = match row {
            Ok(row) => row,
            Err(source) => {
                report.syntax_errors.push(RollbookError::Csv { source });
                continue;
            }
        };
        let line = row.position().map_or(0, csv::Position::line);

        let draft: StudentDraft = match row.deserialize(Some(&headers)) {
            Ok(draft) => draft,
            Err(source) => {
                report.syntax_errors.push(RollbookError::Csv { source });
                continue;
            }
        };

        match store.create(draft) {
            Ok(_) => report.added += 1,
            Err(RollbookError::Validation { errors }) => {
                report.rejected.push(RejectedRow { line, errors });
            }
            Err(e) => report.syntax_errors.push(e),
        }
    }
}

pub async fn put_import_students(
    State(state): State<RollbookState>,
    mut multipart: Multipart,
) -> RollbookResult<Markup> {
    let mut report = ImportReport::default();

    while let Some(field) = multipart.next_field().await.context(MultipartSnafu)? {
        let bytes = field.bytes().await.context(MultipartSnafu)?;
        import_students_csv(&mut *state.students_mut().await, &bytes, &mut report);
    }

    info!(
        added = report.added,
        rejected = report.rejected.len(),
        syntax_errors = report.syntax_errors.len(),
        "Imported students CSV"
    );
    if report.added > 0 {
        state.send_sse_event(SseEvent::CrudStudent);
    }

    Ok(render_import_report(&report))
}

fn render_import_report(report: &ImportReport) -> Markup {
    html! {
        div class="flex flex-col gap-4" {
            p class="text-green-400 font-semibold" {"Added " (report.added) " student(s)."}

            @if !report.rejected.is_empty() {
                (render_table(
                    html! { h3 class="text-lg font-semibold mb-2" {"Rejected Rows"} },
                    ["Line", "Problems"],
                    report.rejected
                        .iter()
                        .map(|RejectedRow { line, errors }| [escape(line.to_string()), escape(errors.to_string())])
                        .collect()
                ))
            }

            @if !report.syntax_errors.is_empty() {
                div {
                    h3 class="text-lg font-semibold mb-2" {"Unreadable Rows"}
                    ul class="list-disc list-inside text-red-400" {
                        @for error in &report.syntax_errors {
                            li {(error.to_string())}
                        }
                    }
                }
            }

            a href="/" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded self-start" {"Back to Students"}
        }
    }
}
