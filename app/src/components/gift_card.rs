use std::sync::Arc;

use dioxus::prelude::*;

use giftcard_sdk::core::constants::explorer_tx_url;
use giftcard_sdk::provider::BlockfrostProvider;
use giftcard_sdk::types::{Network, ValidatorBundle};
use giftcard_sdk::{GiftCardFlow, Session};

use crate::bridge::{Cip30Connector, LucidBridge};
use crate::components::{Button, Input};

const NETWORK: Network = Network::Preprod;
const WALLET_NAME: &str = "eternl";

/// Interactive island: collects credentials and parameters, then drives
/// the lock/redeem sequence. Sequencing itself is enforced by the SDK
/// flow; the signals here only gate the controls and surface progress.
#[component]
pub fn GiftCard(validators: ValidatorBundle) -> Element {
    let mut api_key = use_signal(String::new);
    let mut token_name = use_signal(String::new);
    let mut gift_ada = use_signal(String::new);
    let mut flow = use_signal(GiftCardFlow::new);
    let mut waiting_lock = use_signal(|| false);
    let mut waiting_unlock = use_signal(|| false);
    let mut notice = use_signal(|| Option::<String>::None);

    let on_connect = move |_: MouseEvent| {
        spawn(async move {
            notice.set(None);
            let result = connect_session(api_key()).await;
            match result {
                Ok(session) => {
                    let mut current = flow();
                    match current.establish(session) {
                        Ok(()) => flow.set(current),
                        Err(error) => notice.set(Some(error.to_string())),
                    }
                }
                Err(error) => notice.set(Some(error.to_string())),
            }
        });
    };

    let on_derive = {
        let validators = validators.clone();
        move |_: MouseEvent| {
            let validators = validators.clone();
            spawn(async move {
                notice.set(None);
                let mut current = flow();
                match current.derive_parameters(&token_name(), &validators).await {
                    Ok(_) => flow.set(current),
                    Err(error) => notice.set(Some(error.to_string())),
                }
            });
        }
    };

    let on_lock = move |_: MouseEvent| {
        spawn(async move {
            notice.set(None);
            waiting_lock.set(true);
            let mut current = flow();
            match current.lock(&gift_ada()).await {
                Ok(_) => flow.set(current),
                Err(error) => notice.set(Some(describe(error))),
            }
            waiting_lock.set(false);
        });
    };

    let on_redeem = move |_: MouseEvent| {
        spawn(async move {
            notice.set(None);
            waiting_unlock.set(true);
            let mut current = flow();
            match current.redeem().await {
                Ok(_) => flow.set(current),
                Err(error) => notice.set(Some(describe(error))),
            }
            waiting_unlock.set(false);
        });
    };

    let has_session = flow.read().session().is_some();
    let applied = flow.read().applied().cloned();
    let lock_tx = flow.read().lock_tx().cloned();
    let unlock_tx = flow.read().unlock_tx().cloned();

    rsx! {
        div {
            if !has_session {
                div { class: "mt-10 grid grid-cols-1 gap-y-8",
                    Input {
                        id: "provider-key",
                        kind: "password".to_string(),
                        value: api_key(),
                        oninput: move |event: FormEvent| api_key.set(event.value()),
                        "Blockfrost API Key"
                    }
                    Button { onclick: on_connect, "Connect Provider & Wallet" }
                }
            } else {
                div { class: "mt-10 grid grid-cols-1 gap-y-8",
                    Input {
                        id: "token-name",
                        value: token_name(),
                        oninput: move |event: FormEvent| token_name.set(event.value()),
                        "Token Name"
                    }
                    if !token_name().is_empty() && lock_tx.is_none() {
                        Button { onclick: on_derive, "Make Contracts" }
                    }
                }
            }

            if let Some(applied) = &applied {
                h3 { class: "mt-4 mb-2", "Redeem" }
                pre { class: "bg-gray-200 p-2 rounded overflow-x-auto",
                    "{applied.spend_script.cbor_hex}"
                }

                h3 { class: "mt-4 mb-2", "Gift Card" }
                pre { class: "bg-gray-200 p-2 rounded overflow-x-auto",
                    "{applied.mint_script.cbor_hex}"
                }

                div { class: "mt-10 grid grid-cols-1 gap-y-8",
                    Input {
                        id: "gift-ada",
                        value: gift_ada(),
                        oninput: move |event: FormEvent| gift_ada.set(event.value()),
                        "ADA Amount"
                    }

                    Button {
                        disabled: waiting_lock() || lock_tx.is_some(),
                        onclick: on_lock,
                        if waiting_lock() { "Waiting for Tx..." } else { "Create Gift Card (Locks ADA)" }
                    }

                    if let Some(hash) = &lock_tx {
                        h3 { class: "mt-4 mb-2", "ADA Locked" }
                        a {
                            class: "mb-2 underline break-all",
                            target: "_blank",
                            href: explorer_tx_url(NETWORK, hash.as_str()),
                            "{hash}"
                        }
                        Button {
                            disabled: waiting_unlock() || unlock_tx.is_some(),
                            onclick: on_redeem,
                            if waiting_unlock() { "Waiting for Tx..." } else { "Redeem Gift Card (Unlocks ADA)" }
                        }
                    }

                    if let Some(hash) = &unlock_tx {
                        h3 { class: "mt-4 mb-2", "ADA Unlocked" }
                        a {
                            class: "mb-2 underline break-all",
                            target: "_blank",
                            href: explorer_tx_url(NETWORK, hash.as_str()),
                            "{hash}"
                        }
                    }
                }
            }

            if let Some(message) = notice() {
                p { class: "mt-4 text-red-700", "{message}" }
            }
        }
    }
}

/// Two-phase handshake: provider connect, then wallet authorization
async fn connect_session(api_key: String) -> giftcard_sdk::Result<Session> {
    let bridge = LucidBridge::attach()?;
    bridge.init(NETWORK, &api_key).await?;

    let provider = Arc::new(BlockfrostProvider::new(NETWORK, api_key));
    let session = Session::builder()
        .with_network(NETWORK)
        .with_provider(provider)
        .with_engine(bridge.clone())
        .with_assembler(bridge.clone())
        .connect()
        .await?;

    let connector = Cip30Connector::new(WALLET_NAME, bridge);
    session.bind_wallet(&connector).await
}

fn describe(error: giftcard_sdk::GiftCardError) -> String {
    if error.is_retryable() {
        format!("{error} (safe to retry)")
    } else {
        error.to_string()
    }
}
