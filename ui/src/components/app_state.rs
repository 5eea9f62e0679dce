use dioxus::prelude::*;

use cardpost_common::config::{
    ENV_EMAILJS_PUBLIC_KEY, ENV_EMAILJS_SERVICE_ID, ENV_EMAILJS_TEMPLATE_ID, ENV_FLIP_DELAY_MS,
    ENV_NOTIFY_TIMEOUT_MS, ENV_ORIGIN, ENV_RECIPIENT_LOADING_MS,
};
use cardpost_common::notification::NotificationStatus;
use cardpost_common::{AppConfig, CardSession};

use super::local_store::LocalStore;

/// Values baked in at build time (`CARDPOST_* dx build`).
fn compile_time_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_ORIGIN => option_env!("CARDPOST_ORIGIN"),
        ENV_FLIP_DELAY_MS => option_env!("CARDPOST_FLIP_DELAY_MS"),
        ENV_RECIPIENT_LOADING_MS => option_env!("CARDPOST_RECIPIENT_LOADING_MS"),
        ENV_NOTIFY_TIMEOUT_MS => option_env!("CARDPOST_NOTIFY_TIMEOUT_MS"),
        ENV_EMAILJS_SERVICE_ID => option_env!("CARDPOST_EMAILJS_SERVICE_ID"),
        ENV_EMAILJS_TEMPLATE_ID => option_env!("CARDPOST_EMAILJS_TEMPLATE_ID"),
        ENV_EMAILJS_PUBLIC_KEY => option_env!("CARDPOST_EMAILJS_PUBLIC_KEY"),
        _ => None,
    };
    value.map(String::from)
}

#[cfg(target_family = "wasm")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_family = "wasm"))]
fn page_origin() -> Option<String> {
    None
}

/// Load the app config. Without an explicit origin, links point at the page
/// the app is served from.
pub fn load_config() -> AppConfig {
    let mut config = AppConfig::from_lookup(compile_time_env).unwrap_or_else(|e| {
        tracing::error!(error = %e, "bad build-time config, using defaults");
        AppConfig::default()
    });
    if compile_time_env(ENV_ORIGIN).is_none() {
        if let Some(origin) = page_origin() {
            config.origin = origin;
        }
    }
    config
}

/// State shared by every page.
pub struct AppState {
    pub session: CardSession<LocalStore>,
    /// Outcome of the last notification attempt, shown on the confirmation page.
    pub last_notification: Option<NotificationStatus>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: CardSession::new(LocalStore, load_config()),
            last_notification: None,
        }
    }
}

pub fn use_app_state() -> Signal<AppState> {
    use_context::<Signal<AppState>>()
}
