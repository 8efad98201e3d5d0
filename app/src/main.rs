use dioxus::prelude::*;

mod bridge;
mod components;
mod pages;
mod route;

use route::Route;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Script { src: asset!("/assets/bridge.js") }
        Router::<Route> {}
    }
}
