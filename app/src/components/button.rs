use dioxus::prelude::*;

/// Styled wrapper around a native button
#[component]
pub fn Button(
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "px-4 py-2 rounded border-2 border-black bg-white font-medium
                    hover:bg-gray-100 disabled:opacity-50 disabled:cursor-not-allowed",
            r#type: "button",
            disabled: disabled,
            onclick: move |event| onclick.call(event),
            {children}
        }
    }
}
