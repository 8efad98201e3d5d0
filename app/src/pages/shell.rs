use dioxus::prelude::*;

use crate::route::Route;

/// Application shell wrapping every page
#[component]
pub fn Shell() -> Element {
    rsx! {
        main { class: "max-w-2xl mx-auto px-4 py-8",
            Outlet::<Route> {}
        }
    }
}
