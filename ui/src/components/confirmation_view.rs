use dioxus::prelude::*;

use super::app::Route;
use super::app_state::use_app_state;

#[component]
pub fn ConfirmationView() -> Element {
    let app_state = use_app_state();
    let nav = use_navigator();

    let state = app_state.read();
    let confirmation = state.session.confirmation();
    let warning = state.last_notification.as_ref().and_then(|s| s.warning());
    drop(state);

    let Some(c) = confirmation else {
        return rsx! {
            div { class: "not-found",
                h2 { "Order not found" }
                p { "We couldn't find a card you've sent." }
                button {
                    onclick: move |_| { nav.push(Route::Home {}); },
                    "Back to Home"
                }
            }
        };
    };

    let card = c.record.draft_snapshot.clone();
    let card_path = format!("/card/{}", c.record.card_id);

    rsx! {
        div { class: "confirmation-view",
            h2 { "🎉 Your card is on its way!" }
            p { "We've sent your card by {c.delivery_method} to {c.delivery_address}." }
            if let Some(w) = warning {
                div { class: "warning-banner", "{w}" }
            }
            div { class: "card-summary",
                p { "To: {card.recipient_name}" }
                p { "From: {card.sender_name}" }
                p { class: "card-message", "\"{card.message}\"" }
            }
            div { class: "share-link",
                label { "Share link:" }
                a { href: "{card_path}", "{c.card_url}" }
            }
            div { class: "actions",
                button {
                    onclick: move |_| { nav.push(Route::SelectCard {}); },
                    "Send Another Card"
                }
                button {
                    onclick: move |_| { nav.push(Route::Home {}); },
                    "Back to Home"
                }
            }
        }
    }
}
