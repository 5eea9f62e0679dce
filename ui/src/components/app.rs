use dioxus::prelude::*;

use super::app_state::AppState;
use super::card_selection::CardSelection;
use super::confirmation_view::ConfirmationView;
use super::customize_view::CustomizeView;
use super::home_view::HomeView;
use super::preview_view::PreviewView;
use super::recipient_view::RecipientCardView;
use super::send_view::SendView;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/select-card")]
    SelectCard {},
    #[route("/customize/:id")]
    Customize { id: String },
    #[route("/preview/:id")]
    Preview { id: String },
    #[route("/send/:id")]
    SendCard { id: String },
    #[route("/confirm")]
    Confirm {},
    #[end_layout]
    #[route("/card/:card_id")]
    Card { card_id: String },
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(AppState::new()));

    rsx! { Router::<Route> {} }
}

#[component]
fn AppLayout() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "cardpost-app",
            header { class: "app-header",
                h1 {
                    onclick: move |_| { nav.push(Route::Home {}); },
                    "🎉 Cardpost"
                }
                nav {
                    button {
                        onclick: move |_| { nav.push(Route::SelectCard {}); },
                        "Create a Card"
                    }
                }
            }
            main {
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! { HomeView {} }
}

#[component]
fn SelectCard() -> Element {
    rsx! { CardSelection {} }
}

/// Route component: customization screen for the template in the URL.
#[component]
fn Customize(id: String) -> Element {
    rsx! { CustomizeView { template_segment: id } }
}

#[component]
fn Preview(id: String) -> Element {
    rsx! { PreviewView { template_segment: id } }
}

#[component]
fn SendCard(id: String) -> Element {
    rsx! { SendView { template_segment: id } }
}

#[component]
fn Confirm() -> Element {
    rsx! { ConfirmationView {} }
}

/// Route component: what the recipient sees when opening a shared link.
/// Rendered without the sender-side header.
#[component]
fn Card(card_id: String) -> Element {
    rsx! { RecipientCardView { card_id } }
}
