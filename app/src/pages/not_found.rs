use dioxus::prelude::*;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        h1 { class: "text-2xl font-semibold", "404 - Page not found" }
        p { "Nothing lives at /{path}." }
    }
}
