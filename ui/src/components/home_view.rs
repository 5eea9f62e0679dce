use dioxus::prelude::*;

use cardpost_common::template;

use super::app::Route;

#[component]
pub fn HomeView() -> Element {
    let nav = use_navigator();
    let showcase: Vec<_> = template::all().iter().take(4).collect();

    rsx! {
        div { class: "home-view",
            section { class: "hero",
                h2 { "Send a birthday card in minutes" }
                p { "Pick a design, write a message and share a card that flips open for the birthday person." }
                button {
                    class: "primary",
                    onclick: move |_| { nav.push(Route::SelectCard {}); },
                    "Create Your Card"
                }
            }
            section { class: "showcase",
                for t in showcase {
                    div { key: "{t.id}", class: "showcase-card bg-gradient-to-br {t.theme}",
                        span { class: "card-emoji", "{t.emoji}" }
                        p { "{t.name}" }
                    }
                }
            }
            section { class: "how-it-works",
                h3 { "How it works" }
                ol {
                    li { "Choose one of our card designs" }
                    li { "Personalize it with names and a message" }
                    li { "Preview the card and send it by email or SMS" }
                }
            }
        }
    }
}
