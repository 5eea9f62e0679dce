//! WASM HTTP client for the EmailJS REST API.
//!
//! Sends the birthday notification through the account configured via the
//! `CARDPOST_EMAILJS_*` compile-time variables.

use serde::Serialize;

use cardpost_common::config::EmailServiceConfig;
use cardpost_common::notification::{EmailNotification, LogOnlyNotifier, Notifier};
use cardpost_common::{AppConfig, NotificationError};

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailNotification,
}

pub struct EmailJsNotifier {
    config: EmailServiceConfig,
}

impl EmailJsNotifier {
    pub fn new(config: EmailServiceConfig) -> Self {
        Self { config }
    }
}

impl Notifier for EmailJsNotifier {
    async fn send_email(&self, email: &EmailNotification) -> Result<(), NotificationError> {
        let body = serde_json::to_string(&SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: email,
        })
        .map_err(|e| NotificationError::Rejected(e.to_string()))?;
        post_json(EMAILJS_SEND_URL, &body).await.map(|_| ())
    }

    fn notifier_name(&self) -> &str {
        "emailjs"
    }
}

/// The notifier the app uses: EmailJS when configured, otherwise log-only.
pub enum AppNotifier {
    EmailJs(EmailJsNotifier),
    LogOnly(LogOnlyNotifier),
}

impl AppNotifier {
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.email {
            Some(email) => AppNotifier::EmailJs(EmailJsNotifier::new(email.clone())),
            None => AppNotifier::LogOnly(LogOnlyNotifier),
        }
    }
}

impl Notifier for AppNotifier {
    async fn send_email(&self, email: &EmailNotification) -> Result<(), NotificationError> {
        match self {
            AppNotifier::EmailJs(n) => n.send_email(email).await,
            AppNotifier::LogOnly(n) => n.send_email(email).await,
        }
    }

    fn notifier_name(&self) -> &str {
        match self {
            AppNotifier::EmailJs(n) => n.notifier_name(),
            AppNotifier::LogOnly(n) => n.notifier_name(),
        }
    }
}

// ─── HTTP helpers (WASM) ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
async fn post_json(url: &str, body: &str) -> Result<String, NotificationError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let unavailable = |what: &str, e: wasm_bindgen::JsValue| {
        NotificationError::Unavailable(format!("{what}: {e:?}"))
    };

    let opts = web_sys::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web_sys::RequestMode::Cors);
    opts.set_body(&wasm_bindgen::JsValue::from_str(body));

    let request = web_sys::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| unavailable("create request", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| unavailable("set header", e))?;

    let window =
        web_sys::window().ok_or_else(|| NotificationError::Unavailable("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| unavailable("fetch", e))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| NotificationError::Unavailable("response is not a Response".into()))?;

    let text = JsFuture::from(resp.text().map_err(|e| unavailable("read body", e))?)
        .await
        .map_err(|e| unavailable("read body", e))?
        .as_string()
        .unwrap_or_default();

    let status = resp.status();
    if status >= 400 {
        return Err(NotificationError::Rejected(format!("HTTP {status}: {text}")));
    }
    Ok(text)
}

// Non-WASM stub for type checking
#[cfg(not(target_family = "wasm"))]
async fn post_json(_url: &str, _body: &str) -> Result<String, NotificationError> {
    Err(NotificationError::Unavailable(
        "EmailJS client only available in WASM".into(),
    ))
}
