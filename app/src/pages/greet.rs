use dioxus::prelude::*;

/// Greeting page parameterized by the path segment
#[component]
pub fn Greet(name: String) -> Element {
    rsx! {
        p { class: "text-lg", "Hello, {name}!" }
    }
}
