pub mod card_id;
pub mod checkout;
pub mod config;
pub mod delivery;
pub mod draft;
pub mod error;
pub mod flip;
pub mod message;
pub mod notification;
pub mod recipient;
pub mod session;
pub mod storage;
pub mod template;

pub use config::AppConfig;
pub use error::{CardError, ConfigError, NotificationError, StorageError};
pub use session::{CardPreview, CardSession, SendOutcome};
