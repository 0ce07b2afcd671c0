use crate::data::validation::FieldError;
use maud::{Escaper, Markup, PreEscaped, Render, html};
use std::fmt::Write;
use uuid::Uuid;

pub const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700";

pub fn render_table<const N: usize>(
    overall_title: Markup,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="container mx-auto" {
            (overall_title)
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in items {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn escape(s: impl AsRef<str>) -> PreEscaped<String> {
    let mut output = String::new();
    Escaper::new(&mut output).write_str(s.as_ref()).unwrap(); //this method always succeeds - strange api!
    PreEscaped(output)
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-4xl font-extrabold mb-2 text-indigo-300" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold mb-4" {(s)}
    }
}

/// Label, input and the field's validation message underneath.
pub fn form_element(
    name: &'static str,
    label: &'static str,
    error: Option<FieldError>,
    input: Markup,
) -> Markup {
    html! {
        div {
            label for=(name) class="block text-gray-300 text-sm font-bold mb-2" {(label)}
            (input)
            @if let Some(error) = error {
                p class="mt-1 text-xs text-red-400" {(error.message())}
            }
        }
    }
}

pub fn input_classes(error: Option<FieldError>) -> String {
    let border = if error.is_some() {
        "border-red-400"
    } else {
        "border-gray-600"
    };
    format!("{INPUT_CLASSES} {border}")
}

/// JSON for `hx-vals` carrying a single id.
pub fn id_vals(id: Uuid) -> String {
    format!("{{\"id\": \"{id}\"}}")
}
