use dioxus::prelude::*;

use cardpost_common::draft::DraftForm;
use cardpost_common::message::suggest_message;
use cardpost_common::template;

use super::app::Route;
use super::app_state::use_app_state;

#[component]
pub fn CustomizeView(template_segment: String) -> Element {
    let mut app_state = use_app_state();
    let nav = use_navigator();
    let found = template::parse_route_id(&template_segment).ok();

    let mut form = use_signal(move || {
        found
            .and_then(|t| app_state.read().session.customization(t.id).ok())
            .map(|(_, form)| form)
            .unwrap_or_default()
    });
    let mut save_error = use_signal(|| None::<String>);

    // Moving between designs keeps this component mounted; reload the form
    // for the new route's template.
    use_effect(use_reactive!(|template_segment| {
        let prefilled = template::parse_route_id(&template_segment)
            .ok()
            .and_then(|t| app_state.peek().session.customization(t.id).ok())
            .map(|(_, form)| form)
            .unwrap_or_default();
        form.set(prefilled);
        save_error.set(None);
    }));

    let can_submit = use_memo(move || {
        let f = form.read();
        !f.recipient_name.trim().is_empty()
            && !f.sender_name.trim().is_empty()
            && !f.active_message().trim().is_empty()
    });

    let Some(template) = found else {
        return rsx! {
            div { class: "not-found",
                h2 { "Card design not found" }
                button {
                    onclick: move |_| { nav.push(Route::SelectCard {}); },
                    "Choose a Design"
                }
            }
        };
    };
    let template_id = template.id;

    let submit = move |_| {
        let submitted: DraftForm = form.read().clone();
        let result = app_state
            .write()
            .session
            .save_customization(template_id, submitted);
        match result {
            Ok(_) => {
                save_error.set(None);
                nav.push(Route::Preview {
                    id: template_id.to_string(),
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save draft");
                save_error.set(Some(format!("Could not save your card: {e}. Please try again.")));
            }
        }
    };

    let f = form.read().clone();

    rsx! {
        div { class: "customize-view",
            div { class: "template-banner bg-gradient-to-br {template.theme}",
                span { class: "card-emoji", "{template.emoji}" }
                h2 { "Customize \"{template.name}\"" }
            }

            div { class: "form-group",
                label { "Recipient's name:" }
                input {
                    r#type: "text",
                    placeholder: "Who is the birthday person?",
                    value: "{f.recipient_name}",
                    oninput: move |evt| form.write().recipient_name = evt.value(),
                }
            }

            div { class: "form-group",
                label { "Your name:" }
                input {
                    r#type: "text",
                    placeholder: "Sign the card",
                    value: "{f.sender_name}",
                    oninput: move |evt| form.write().sender_name = evt.value(),
                }
            }

            div { class: "form-group",
                label {
                    input {
                        r#type: "checkbox",
                        checked: f.use_ai,
                        onchange: move |evt| {
                            let mut w = form.write();
                            w.use_ai = evt.checked();
                            if w.use_ai && w.ai_message.is_empty() {
                                w.ai_message = suggest_message(&mut rand::thread_rng()).to_string();
                            }
                        },
                    }
                    " Use a suggested message"
                }
            }

            if f.use_ai {
                div { class: "form-group ai-message",
                    p { class: "message-preview", "{f.ai_message}" }
                    button {
                        onclick: move |_| {
                            form.write().ai_message =
                                suggest_message(&mut rand::thread_rng()).to_string();
                        },
                        "Generate New"
                    }
                }
            } else {
                div { class: "form-group",
                    label { "Your message:" }
                    textarea {
                        placeholder: "Write something from the heart...",
                        value: "{f.custom_message}",
                        oninput: move |evt| form.write().custom_message = evt.value(),
                    }
                }
            }

            if let Some(err) = save_error.read().as_ref() {
                div { class: "error-banner", "{err}" }
            }

            div { class: "actions",
                button {
                    onclick: move |_| { nav.push(Route::SelectCard {}); },
                    "Back"
                }
                button {
                    class: "primary",
                    disabled: !can_submit(),
                    onclick: submit,
                    "Preview Card"
                }
            }
        }
    }
}
