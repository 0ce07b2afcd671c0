use crate::data::validation::FieldErrors;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use uuid::Uuid;

pub type RollbookResult<T> = Result<T, RollbookError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RollbookError {
    #[snafu(display("Student failed validation: {}", errors))]
    Validation { errors: FieldErrors },
    #[snafu(display("Unable to find student with UUID: {}", id))]
    MissingStudent { id: Uuid },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to find timezone {:?}", name))]
    ParseTimezone { source: jiff::Error, name: String },
    #[snafu(display("No sections were configured in `{}`", name))]
    NoSections { name: &'static str },
    #[snafu(display("Error with multipart form input"))]
    Multipart {
        source: axum::extract::multipart::MultipartError,
    },
    #[snafu(display("Error with CSVs"))]
    Csv { source: csv::Error },
    #[snafu(display("Error flushing CSV output"))]
    CsvFlush { source: std::io::Error },
}

impl IntoResponse for RollbookError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const UE: StatusCode = StatusCode::UNPROCESSABLE_ENTITY; //failed validation

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Rollbook Error"}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::Validation { .. } => UE,
            Self::MissingStudent { .. } => NF,
            Self::BadEnvVar { .. } => ISE,
            Self::ParseTimezone { .. } => ISE,
            Self::NoSections { .. } => ISE,
            Self::Multipart { source } => source.status(),
            Self::Csv { .. } => BI,
            Self::CsvFlush { .. } => ISE,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
