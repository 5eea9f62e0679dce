//! Send-screen form handling: contact, payment and billing fields.
//!
//! Purely cosmetic. Nothing here is charged or sent anywhere, and none of it
//! feeds the card lifecycle beyond the [`SendRequest`] it produces.

use std::fmt;

use crate::delivery::{ContactMethod, SendRequest};
use crate::draft::Draft;
use crate::template::Template;

/// Keep only ASCII digits.
fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a card number as it is typed: `4111111111111111` becomes
/// `4111 1111 1111 1111`.
///
/// Takes the digits of `input`; if they form a run of at least four, the first
/// sixteen are grouped in fours. Shorter input is returned as bare digits.
pub fn format_card_number(input: &str) -> String {
    let v = digits(input);
    if v.len() < 4 {
        return v;
    }
    let run = &v[..v.len().min(16)];
    run.as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an expiry date as `MM/YY` while typing.
pub fn format_expiry_date(input: &str) -> String {
    let v = digits(input);
    if v.len() >= 2 {
        let year_end = v.len().min(4);
        format!("{}/{}", &v[..2], &v[2..year_end])
    } else {
        v
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Card,
    Apple,
    Google,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Card, PaymentMethod::Apple, PaymentMethod::Google]
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit Card",
            PaymentMethod::Apple => "Apple Pay",
            PaymentMethod::Google => "Google Pay",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Apple => "apple",
            PaymentMethod::Google => "google",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.value() == value)
    }
}

/// A form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    RecipientEmail,
    RecipientPhone,
    CardNumber,
    CardholderName,
    ExpiryDate,
    Cvv,
    BillingAddress,
    City,
    State,
    ZipCode,
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutField::RecipientEmail => "recipient email address",
            CheckoutField::RecipientPhone => "recipient phone number",
            CheckoutField::CardNumber => "card number",
            CheckoutField::CardholderName => "cardholder name",
            CheckoutField::ExpiryDate => "expiry date",
            CheckoutField::Cvv => "CVV",
            CheckoutField::BillingAddress => "billing address",
            CheckoutField::City => "city",
            CheckoutField::State => "state",
            CheckoutField::ZipCode => "ZIP code",
        };
        f.write_str(name)
    }
}

/// Every field of the send screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub contact_method: ContactMethod,
    pub recipient_email: String,
    pub recipient_phone: String,
    pub payment_method: PaymentMethod,
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_date: String,
    pub cvv: String,
    pub billing_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.trim().split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

impl CheckoutForm {
    /// Fields that are missing or malformed, in display order. Empty means
    /// the form can be submitted.
    pub fn validate(&self) -> Vec<CheckoutField> {
        let mut bad = Vec::new();
        match self.contact_method {
            ContactMethod::Email if !looks_like_email(&self.recipient_email) => {
                bad.push(CheckoutField::RecipientEmail)
            }
            ContactMethod::Phone if digits(&self.recipient_phone).len() < 6 => {
                bad.push(CheckoutField::RecipientPhone)
            }
            _ => {}
        }
        if self.payment_method == PaymentMethod::Card {
            if digits(&self.card_number).len() < 12 {
                bad.push(CheckoutField::CardNumber);
            }
            if self.cardholder_name.trim().is_empty() {
                bad.push(CheckoutField::CardholderName);
            }
            if !valid_expiry(&self.expiry_date) {
                bad.push(CheckoutField::ExpiryDate);
            }
            let cvv = digits(&self.cvv);
            if !(3..=4).contains(&cvv.len()) {
                bad.push(CheckoutField::Cvv);
            }
        }
        for (value, field) in [
            (&self.billing_address, CheckoutField::BillingAddress),
            (&self.city, CheckoutField::City),
            (&self.state, CheckoutField::State),
            (&self.zip_code, CheckoutField::ZipCode),
        ] {
            if value.trim().is_empty() {
                bad.push(field);
            }
        }
        bad
    }

    /// The contact details to hand to the send step.
    pub fn send_request(&self) -> SendRequest {
        SendRequest {
            contact_method: self.contact_method,
            recipient_email: self.recipient_email.trim().to_string(),
            recipient_phone: self.recipient_phone.trim().to_string(),
        }
    }
}

/// Price of one card, in cents. Digital delivery is free.
pub const CARD_PRICE_CENTS: u32 = 100;

/// Render cents as dollars, e.g. `100` as `$1.00`.
pub fn format_price(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// The order summary panel of the send screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub template: &'static Template,
    pub draft: Draft,
    pub card_price_cents: u32,
    pub delivery_price_cents: u32,
}

impl OrderSummary {
    pub fn new(template: &'static Template, draft: Draft) -> Self {
        Self {
            template,
            draft,
            card_price_cents: CARD_PRICE_CENTS,
            delivery_price_cents: 0,
        }
    }

    pub fn total_cents(&self) -> u32 {
        self.card_price_cents + self.delivery_price_cents
    }
}

fn valid_expiry(s: &str) -> bool {
    let v = digits(s);
    if v.len() != 4 {
        return false;
    }
    matches!(v[..2].parse::<u8>(), Ok(1..=12))
}
