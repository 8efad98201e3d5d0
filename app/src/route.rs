use dioxus::prelude::*;

use crate::pages::{Greet, Home, NotFound, Shell};

/// Static table mapping URL paths to page components
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/greet/:name")]
    Greet { name: String },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
