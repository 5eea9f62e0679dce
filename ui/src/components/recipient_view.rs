use dioxus::prelude::*;

use cardpost_common::recipient::RecipientView;

use super::app::Route;
use super::app_state::use_app_state;
use super::flip_card::FlipCardView;
use super::timers::sleep;

#[component]
pub fn RecipientCardView(card_id: String) -> Element {
    let app_state = use_app_state();
    let nav = use_navigator();
    let mut view = use_signal(|| RecipientView::Loading);
    let mut lookup = use_signal(|| None::<Task>);

    // Re-run when the route's card id changes. A lookup still waiting for
    // the previous id is cancelled so it cannot overwrite the new card.
    use_effect(use_reactive!(|card_id| {
        if let Some(stale) = lookup.write().take() {
            stale.cancel();
        }
        view.set(RecipientView::Loading);
        let task = spawn(async move {
            let delay = app_state.read().session.config().recipient_loading_delay();
            sleep(delay).await;
            let resolved = app_state.read().session.open_card(&card_id);
            view.set(resolved);
        });
        lookup.set(Some(task));
    }));

    match view.read().clone() {
        RecipientView::Loading => rsx! {
            div { class: "recipient-loading",
                div { class: "spinner" }
                p { "Opening your card..." }
            }
        },
        RecipientView::NotFound => rsx! {
            div { class: "not-found",
                h2 { "Card not found" }
                p { "This card link may be wrong or the card is no longer available." }
                button {
                    onclick: move |_| { nav.push(Route::Home {}); },
                    "Create Your Own Card"
                }
            }
        },
        RecipientView::Ready { card, template } => rsx! {
            div { class: "recipient-view bg-gradient-to-br {template.theme}",
                h2 { "{card.draft.sender_name} sent you a card!" }
                FlipCardView { draft: card.draft.clone() }
                button {
                    onclick: move |_| { nav.push(Route::Home {}); },
                    "Create Your Own Card"
                }
            }
        },
    }
}
