use dioxus::prelude::*;

/// Labelled wrapper around a native text input
#[component]
pub fn Input(
    #[props(into)] id: String,
    #[props(into)] value: String,
    #[props(default = "text".to_string())] kind: String,
    oninput: EventHandler<FormEvent>,
    children: Element,
) -> Element {
    rsx! {
        div { class: "grid gap-1",
            label { class: "text-sm font-medium", r#for: "{id}",
                {children}
            }
            input {
                class: "border-2 border-black rounded px-3 py-2",
                id: "{id}",
                name: "{id}",
                r#type: "{kind}",
                value: "{value}",
                oninput: move |event| oninput.call(event),
            }
        }
    }
}
