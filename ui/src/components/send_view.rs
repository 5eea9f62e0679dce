use dioxus::prelude::*;

use cardpost_common::checkout::{
    format_card_number, format_expiry_date, format_price, CheckoutField, CheckoutForm,
    PaymentMethod,
};
use cardpost_common::delivery::ContactMethod;
use cardpost_common::session::notify_delivery;
use cardpost_common::CardError;

use super::app::Route;
use super::app_state::use_app_state;
use super::email_client::AppNotifier;
use super::timers::deadline;

#[component]
pub fn SendView(template_segment: String) -> Element {
    let mut app_state = use_app_state();
    let nav = use_navigator();
    let mut form = use_signal(CheckoutForm::default);
    let mut invalid = use_signal(Vec::<CheckoutField>::new);
    let mut submitting = use_signal(|| false);
    let mut send_error = use_signal(|| None::<String>);

    // The stored draft decides what is being sent; the route id is only used
    // for the back link.
    let summary = match app_state.read().session.order_summary() {
        Ok(summary) => summary,
        Err(CardError::DraftMissing) => {
            return rsx! {
                div { class: "not-found",
                    h2 { "Card data not found" }
                    p { "Please customize a card before sending it." }
                    button {
                        onclick: move |_| { nav.push(Route::SelectCard {}); },
                        "Back to Card Selection"
                    }
                }
            };
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored draft cannot be sent");
            return rsx! {
                div { class: "not-found",
                    h2 { "Card design not found" }
                    p { "{e}" }
                    button {
                        onclick: move |_| { nav.push(Route::SelectCard {}); },
                        "Back to Card Selection"
                    }
                }
            };
        }
    };
    let template = summary.template;
    let draft = summary.draft.clone();

    let submit = move |_| {
        if *submitting.read() {
            return;
        }
        let checkout = form.read().clone();
        let bad = checkout.validate();
        if !bad.is_empty() {
            invalid.set(bad);
            return;
        }
        invalid.set(Vec::new());
        send_error.set(None);
        submitting.set(true);

        let request = checkout.send_request();
        let result = {
            let mut state = app_state.write();
            let draft = state.session.current_draft();
            state
                .session
                .send(draft.as_ref(), &request, &mut rand::thread_rng())
        };
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(error = %e, "send failed");
                send_error.set(Some(format!("We couldn't send your card: {e}.")));
                submitting.set(false);
                return;
            }
        };

        let config = app_state.read().session.config().clone();
        spawn(async move {
            let notifier = AppNotifier::from_config(&config);
            let status = notify_delivery(
                &config,
                &record,
                &notifier,
                deadline(config.notification_timeout()),
            )
            .await;
            app_state.write().last_notification = Some(status);
            submitting.set(false);
            nav.push(Route::Confirm {});
        });
    };

    let f = form.read().clone();
    let bad = invalid.read().clone();
    let is_submitting = *submitting.read();

    rsx! {
        div { class: "send-view",
            h2 { "Send Your {template.name} Card" }

            section { class: "order-summary",
                h3 { "Order Summary" }
                div { class: "summary-line",
                    span { "Birthday Card" }
                    span { "{format_price(summary.card_price_cents)}" }
                }
                div { class: "summary-line",
                    span { "Digital Delivery" }
                    span { "Free" }
                }
                div { class: "summary-line total",
                    span { "Total" }
                    span { "{format_price(summary.total_cents())}" }
                }
                div { class: "card-details",
                    h4 { "Card Details" }
                    p { "To: {draft.recipient_name}" }
                    p { "From: {draft.sender_name}" }
                    p { "Design: {template.emoji} {template.name}" }
                }
            }

            section { class: "contact",
                h3 { "How should we deliver it?" }
                div { class: "toggle",
                    button {
                        class: if f.contact_method == ContactMethod::Email { "selected" } else { "" },
                        onclick: move |_| form.write().contact_method = ContactMethod::Email,
                        "Email"
                    }
                    button {
                        class: if f.contact_method == ContactMethod::Phone { "selected" } else { "" },
                        onclick: move |_| form.write().contact_method = ContactMethod::Phone,
                        "SMS"
                    }
                }
                match f.contact_method {
                    ContactMethod::Email => rsx! {
                        div { class: "form-group",
                            label { "Recipient's email:" }
                            input {
                                r#type: "email",
                                placeholder: "friend@example.com",
                                value: "{f.recipient_email}",
                                oninput: move |evt| form.write().recipient_email = evt.value(),
                            }
                        }
                    },
                    ContactMethod::Phone => rsx! {
                        div { class: "form-group",
                            label { "Recipient's phone:" }
                            input {
                                r#type: "tel",
                                placeholder: "(555) 123-4567",
                                value: "{f.recipient_phone}",
                                oninput: move |evt| form.write().recipient_phone = evt.value(),
                            }
                        }
                    },
                }
            }

            section { class: "payment",
                h3 { "Payment" }
                div { class: "toggle",
                    for method in PaymentMethod::all().iter().copied() {
                        button {
                            key: "{method.value()}",
                            class: if f.payment_method == method { "selected" } else { "" },
                            onclick: move |_| form.write().payment_method = method,
                            "{method.label()}"
                        }
                    }
                }
                if f.payment_method == PaymentMethod::Card {
                    div { class: "form-group",
                        label { "Card number:" }
                        input {
                            r#type: "text",
                            placeholder: "1234 5678 9012 3456",
                            maxlength: "19",
                            value: "{f.card_number}",
                            oninput: move |evt| form.write().card_number = format_card_number(&evt.value()),
                        }
                    }
                    div { class: "form-group",
                        label { "Cardholder name:" }
                        input {
                            r#type: "text",
                            value: "{f.cardholder_name}",
                            oninput: move |evt| form.write().cardholder_name = evt.value(),
                        }
                    }
                    div { class: "form-row",
                        div { class: "form-group",
                            label { "Expiry:" }
                            input {
                                r#type: "text",
                                placeholder: "MM/YY",
                                maxlength: "5",
                                value: "{f.expiry_date}",
                                oninput: move |evt| form.write().expiry_date = format_expiry_date(&evt.value()),
                            }
                        }
                        div { class: "form-group",
                            label { "CVV:" }
                            input {
                                r#type: "text",
                                maxlength: "4",
                                value: "{f.cvv}",
                                oninput: move |evt| form.write().cvv = evt.value(),
                            }
                        }
                    }
                } else {
                    p { class: "wallet-note", "You'll confirm with {f.payment_method.label()} when you send." }
                }
            }

            section { class: "billing",
                h3 { "Billing address" }
                div { class: "form-group",
                    label { "Address:" }
                    input {
                        r#type: "text",
                        value: "{f.billing_address}",
                        oninput: move |evt| form.write().billing_address = evt.value(),
                    }
                }
                div { class: "form-row",
                    div { class: "form-group",
                        label { "City:" }
                        input {
                            r#type: "text",
                            value: "{f.city}",
                            oninput: move |evt| form.write().city = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { "State:" }
                        input {
                            r#type: "text",
                            value: "{f.state}",
                            oninput: move |evt| form.write().state = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { "ZIP:" }
                        input {
                            r#type: "text",
                            value: "{f.zip_code}",
                            oninput: move |evt| form.write().zip_code = evt.value(),
                        }
                    }
                }
            }

            if !bad.is_empty() {
                div { class: "field-errors",
                    p { "Please check:" }
                    ul {
                        for field in bad.iter() {
                            li { key: "{field}", "{field}" }
                        }
                    }
                }
            }

            if let Some(err) = send_error.read().as_ref() {
                div { class: "error-banner",
                    "{err} "
                    button { onclick: submit, "Try again" }
                }
            }

            div { class: "actions",
                button {
                    onclick: move |_| {
                        nav.push(Route::Preview { id: template_segment.clone() });
                    },
                    "Back"
                }
                button {
                    class: "primary",
                    disabled: is_submitting,
                    onclick: submit,
                    if is_submitting { "Sending..." } else { "Send Card" }
                }
            }
        }
    }
}
