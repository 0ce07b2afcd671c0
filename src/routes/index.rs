use crate::{maud_conveniences::title, state::RollbookState};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RollbookState>) -> Markup {
    state.render(html! {
        div sse-connect="/sse_feed" class="max-w-4xl w-full" {
            div class="text-center mb-12" {
                (title("Student Records Management"))
                p class="text-gray-400 text-lg" {"Manage your student records efficiently"}
            }

            div class="flex flex-col sm:flex-row items-center justify-evenly mb-4 gap-2" {
                button hx-get="/internal/students/form" hx-target="#student_form" class="w-full sm:w-2/5 bg-indigo-600 hover:bg-indigo-800 font-bold py-3 px-6 rounded" {
                    "Add New Student"
                }
                input type="search" id="search" name="search" placeholder="Search students..." hx-get="/internal/students" hx-trigger="input changed delay:200ms, search" hx-target="#student_list" class="w-full sm:w-2/5 py-2 px-4 rounded border bg-gray-700 border-gray-600 focus:outline-none";
                a href="/import_export" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                    "Import / Export"
                }
            }

            div id="student_form" class="mb-8" {}
            div id="student_list" hx-get="/internal/students" hx-trigger="load, crud_student from:body, sse:crud_student" hx-include="#search" class="bg-gray-800 rounded-2xl shadow-xl overflow-hidden" {}
        }
    })
}
