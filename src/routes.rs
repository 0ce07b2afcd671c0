use crate::{
    routes::{
        import_export::{get_import_export_page, get_students_csv, put_import_students},
        index::get_index_route,
        sse::sse_feed,
        students::{
            delete_student, internal_get_close_student_form, internal_get_student_form,
            internal_get_students, internal_post_edit_student, internal_put_new_student,
        },
    },
    state::RollbookState,
};
use axum::{
    Router,
    routing::{delete, get, put},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod import_export;
pub mod index;
pub mod sse;
pub mod students;

pub fn router(state: RollbookState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", delete(delete_student))
        .route("/import_export", get(get_import_export_page))
        .route("/export/students.csv", get(get_students_csv))
        .route("/import/students", put(put_import_students))
        .route("/internal/students", get(internal_get_students))
        .route(
            "/internal/students/form",
            get(internal_get_student_form)
                .put(internal_put_new_student)
                .post(internal_post_edit_student),
        )
        .route(
            "/internal/students/close_form",
            get(internal_get_close_student_form),
        )
        .route("/sse_feed", get(sse_feed))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
