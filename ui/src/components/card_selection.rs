use dioxus::prelude::*;

use cardpost_common::template;

use super::app::Route;

#[component]
pub fn CardSelection() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "card-selection",
            h2 { "Choose Your Card Design" }
            div { class: "template-grid",
                for t in template::all().iter() {
                    button {
                        key: "{t.id}",
                        class: "template-tile bg-gradient-to-br {t.theme}",
                        onclick: {
                            let id = t.id;
                            move |_| { nav.push(Route::Customize { id: id.to_string() }); }
                        },
                        span { class: "card-emoji", "{t.emoji}" }
                        p { class: "template-name", "{t.name}" }
                    }
                }
            }
        }
    }
}
