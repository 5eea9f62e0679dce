pub mod app;
pub mod app_state;
pub mod card_selection;
pub mod confirmation_view;
pub mod customize_view;
pub mod email_client;
pub mod flip_card;
pub mod home_view;
pub mod local_store;
pub mod preview_view;
pub mod recipient_view;
pub mod send_view;
pub mod timers;
