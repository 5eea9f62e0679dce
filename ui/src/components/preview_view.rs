use dioxus::prelude::*;

use cardpost_common::template;
use cardpost_common::CardError;

use super::app::Route;
use super::app_state::use_app_state;
use super::flip_card::FlipCardView;

#[component]
pub fn PreviewView(template_segment: String) -> Element {
    let app_state = use_app_state();
    let nav = use_navigator();

    let preview = template::parse_route_id(&template_segment)
        .and_then(|t| app_state.read().session.preview(t.id));

    let preview = match preview {
        Ok(p) => p,
        Err(CardError::DraftMissing) => {
            return rsx! {
                div { class: "not-found",
                    h2 { "Nothing to preview yet" }
                    p { "Customize a card first." }
                    button {
                        onclick: move |_| {
                            nav.push(Route::Customize { id: template_segment.clone() });
                        },
                        "Customize"
                    }
                }
            };
        }
        Err(e) => {
            return rsx! {
                div { class: "not-found",
                    h2 { "Card design not found" }
                    p { "{e}" }
                    button {
                        onclick: move |_| { nav.push(Route::SelectCard {}); },
                        "Choose a Design"
                    }
                }
            };
        }
    };

    let template = preview.template;
    let draft = preview.draft;
    let id = template.id.to_string();
    let edit_id = id.clone();

    rsx! {
        div { class: "preview-view",
            h2 { "Preview Your Card" }
            FlipCardView { draft: draft.clone() }
            div { class: "card-summary",
                p { "Design: {template.emoji} {template.name}" }
                p { "To: {draft.recipient_name}" }
                p { "From: {draft.sender_name}" }
            }
            div { class: "actions",
                button {
                    onclick: move |_| { nav.push(Route::Customize { id: edit_id.clone() }); },
                    "Edit"
                }
                button {
                    class: "primary",
                    onclick: move |_| { nav.push(Route::SendCard { id: id.clone() }); },
                    "Send Card"
                }
            }
        }
    }
}
