use dioxus::prelude::*;

use cardpost_common::draft::Draft;
use cardpost_common::flip::{CardFace, FlipCard};
use cardpost_common::template;

use super::app_state::use_app_state;
use super::timers::sleep;

/// Flip-open card shared by the preview and recipient pages.
#[component]
pub fn FlipCardView(draft: Draft) -> Element {
    let app_state = use_app_state();
    let mut card = use_signal(|| app_state.read().session.flip_card());

    let Ok(template) = template::lookup(draft.template_id) else {
        return rsx! { p { class: "card-error", "This card design is no longer available." } };
    };

    let state = card.read().state();
    let transform = state.css_transform();

    let on_click = move |_| {
        let Some(token) = card.write().click() else {
            return;
        };
        let delay = card.read().delay();
        spawn(async move {
            sleep(delay).await;
            card.write().settle(token);
        });
    };

    rsx! {
        div { class: "flip-card",
            onclick: on_click,
            div {
                class: "flip-card-body",
                style: "transform: {transform}; transition: transform 0.6s;",
                match state.face() {
                    CardFace::Front => rsx! {
                        div { class: "card-front bg-gradient-to-br {template.theme}",
                            span { class: "card-emoji", "{template.emoji}" }
                            h2 { "Happy Birthday" }
                            h3 { "{draft.recipient_name}!" }
                            p { class: "card-hint", "Click to open" }
                        }
                    },
                    CardFace::Message => rsx! {
                        div { class: "card-inside",
                            p { class: "card-greeting", "Dear {draft.recipient_name}," }
                            p { class: "card-message", "{draft.message}" }
                            p { class: "card-signature", "With love, {draft.sender_name}" }
                        }
                    },
                }
            }
        }
    }
}
