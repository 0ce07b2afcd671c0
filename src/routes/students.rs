use crate::{
    config::RuntimeConfiguration,
    data::{
        IdForm,
        search::filter,
        student::{StudentDraft, StudentField, StudentRecord},
        validation::FieldErrors,
    },
    error::{MissingStudentSnafu, RollbookError, RollbookResult},
    maud_conveniences::{form_element, id_vals, input_classes},
    routes::sse::SseEvent,
    state::RollbookState,
};
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::OptionExt;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    search: String,
}

pub async fn internal_get_students(
    State(state): State<RollbookState>,
    Query(SearchQuery { search }): Query<SearchQuery>,
) -> Markup {
    let students = state.students().await;
    let matching = filter(students.list(), &search);

    html! {
        @if matching.is_empty() {
            div class="p-8 text-center text-gray-400" {
                @if search.is_empty() {
                    p class="text-lg" {"No students yet"}
                    p class="text-sm text-gray-500" {"Add your first student using the button above"}
                } @else {
                    p class="text-lg" {"No matching students found"}
                }
            }
        } @else {
            ul class="divide-y divide-gray-700" {
                @for student in matching {
                    (render_student(state.config(), student))
                }
            }
        }
    }
}

fn render_student(config: &RuntimeConfiguration, student: &StudentRecord) -> Markup {
    html! {
        li class="p-4 hover:bg-gray-700" {
            div class="flex flex-col sm:flex-row sm:items-center justify-between gap-4" {
                div class="flex-1" {
                    h3 class="text-lg font-medium" {(student.full_name)}
                    div class="mt-1 grid grid-cols-1 sm:grid-cols-2 gap-x-4 gap-y-1 text-sm text-gray-400" {
                        p {"Class: " (student.class)}
                        p {"Roll Number: " (student.roll_number)}
                        p {"Section: " (student.section)}
                        p {"Email: " (student.email)}
                        p {"Phone: " (student.phone)}
                        p {"Added: " (config.display_timestamp(student.created_at))}
                    }
                }
                div class="flex items-center gap-2" {
                    button hx-get="/internal/students/form" hx-vals=(id_vals(student.id)) hx-target="#student_form" class="bg-indigo-600 hover:bg-indigo-800 font-bold py-1 px-3 rounded" {
                        "Edit"
                    }
                    button hx-delete="/students" hx-vals=(id_vals(student.id)) hx-confirm="Are you sure you want to delete this student?" hx-swap="none" class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" {
                        "Delete"
                    }
                }
            }
        }
    }
}

#[derive(Deserialize)]
pub struct FormQuery {
    id: Option<Uuid>,
}

pub async fn internal_get_student_form(
    State(state): State<RollbookState>,
    Query(FormQuery { id }): Query<FormQuery>,
) -> RollbookResult<Markup> {
    let draft = match id {
        Some(id) => state
            .students()
            .await
            .get(id)
            .context(MissingStudentSnafu { id })?
            .to_draft(),
        None => StudentDraft::default(),
    };

    Ok(render_student_form(
        state.config().sections(),
        id,
        &draft,
        &FieldErrors::default(),
    ))
}

pub async fn internal_get_close_student_form() -> Markup {
    html! {}
}

/// The add/edit form. `editing` switches it from creating to updating that record.
pub fn render_student_form(
    sections: &[String],
    editing: Option<Uuid>,
    draft: &StudentDraft,
    errors: &FieldErrors,
) -> Markup {
    let create_url = editing.is_none().then_some("/internal/students/form");
    let update_url = editing.map(|id| format!("/internal/students/form?id={id}"));

    html! {
        div class="bg-gray-800 rounded-2xl shadow-xl overflow-hidden" {
            form novalidate hx-put=[create_url] hx-post=[update_url] hx-target="#student_form" class="p-6" {
                div class="grid grid-cols-1 md:grid-cols-2 gap-6" {
                    (text_input(StudentField::FullName, "text", "Full Name", draft, errors))
                    (text_input(StudentField::Class, "text", "Class/Grade", draft, errors))
                    (text_input(StudentField::RollNumber, "text", "Roll Number", draft, errors))
                    (section_select(sections, draft, errors))
                    (text_input(StudentField::Email, "email", "Email Address", draft, errors))
                    (text_input(StudentField::Phone, "tel", "Phone Number", draft, errors))
                }

                div class="mt-6 flex justify-end gap-3" {
                    button type="button" hx-get="/internal/students/close_form" hx-target="#student_form" class="border border-gray-500 hover:bg-gray-700 py-2 px-4 rounded" {
                        "Cancel"
                    }
                    button type="submit" class="bg-indigo-600 hover:bg-indigo-800 font-bold py-2 px-4 rounded" {
                        @if editing.is_some() {
                            "Update Student"
                        } @else {
                            "Add Student"
                        }
                    }
                }
            }
        }
    }
}

fn text_input(
    field: StudentField,
    kind: &'static str,
    placeholder: &'static str,
    draft: &StudentDraft,
    errors: &FieldErrors,
) -> Markup {
    let error = errors.get(field);

    form_element(
        field.form_name(),
        field.label(),
        error,
        html! {
            input type=(kind) name=(field.form_name()) id=(field.form_name()) value=(draft.get(field)) placeholder=(placeholder) class=(input_classes(error));
        },
    )
}

fn section_select(sections: &[String], draft: &StudentDraft, errors: &FieldErrors) -> Markup {
    let field = StudentField::Section;
    let error = errors.get(field);
    let current = draft.get(field);
    //imported records can carry a section that isn't configured
    let unlisted = (!current.is_empty() && !sections.iter().any(|s| s == current)).then_some(current);

    form_element(
        field.form_name(),
        field.label(),
        error,
        html! {
            select name=(field.form_name()) id=(field.form_name()) class=(input_classes(error)) {
                option value="" disabled selected[current.is_empty()] {"Select Section"}
                @for section in sections {
                    option value=(section) selected[section == current] {"Section " (section)}
                }
                @if let Some(unlisted) = unlisted {
                    option value=(unlisted) selected {"Section " (unlisted)}
                }
            }
        },
    )
}

fn changed_response(state: &RollbookState) -> Response {
    state.send_sse_event(SseEvent::CrudStudent);
    ([("HX-Trigger", SseEvent::CrudStudent.name())], html! {}).into_response()
}

pub async fn internal_put_new_student(
    State(state): State<RollbookState>,
    Form(draft): Form<StudentDraft>,
) -> RollbookResult<Response> {
    let result = state.students_mut().await.create(draft.clone());

    match result {
        Ok(_) => Ok(changed_response(&state)),
        Err(RollbookError::Validation { errors }) => {
            Ok(render_student_form(state.config().sections(), None, &draft, &errors).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn internal_post_edit_student(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
    Form(draft): Form<StudentDraft>,
) -> RollbookResult<Response> {
    let result = state.students_mut().await.update(id, draft.clone());

    match result {
        Ok(()) => Ok(changed_response(&state)),
        Err(RollbookError::Validation { errors }) => Ok(render_student_form(
            state.config().sections(),
            Some(id),
            &draft,
            &errors,
        )
        .into_response()),
        Err(e) => Err(e),
    }
}

/// Unconditional - the page asks for confirmation before sending this.
pub async fn delete_student(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> Response {
    let removed = state.students_mut().await.delete(id);

    if removed.is_some() {
        changed_response(&state)
    } else {
        debug!(%id, "Asked to delete a student that doesn't exist");
        html! {}.into_response()
    }
}
