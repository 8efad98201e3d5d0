use dioxus::prelude::*;

use giftcard_sdk::types::ValidatorBundle;

use crate::components::GiftCard;

const BLUEPRINT: &str = include_str!("../../assets/plutus.json");

/// Landing page: hands the raw validator pair from the bundled blueprint
/// to the interactive island
#[component]
pub fn Home() -> Element {
    match ValidatorBundle::from_blueprint(BLUEPRINT) {
        Ok(validators) => rsx! {
            div {
                h1 { class: "text-2xl font-semibold", "One Shot" }
                h2 { class: "text-lg text-gray-600",
                    "Make a one shot minting and lock contract"
                }
                GiftCard { validators }
            }
        },
        Err(error) => rsx! {
            p { class: "text-red-700", "Failed to load validator blueprint: {error}" }
        },
    }
}
