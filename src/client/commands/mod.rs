//! Async action creators. Each one makes a single request and dispatches the
//! outcome; nothing is retried.

pub mod auth;
pub mod post;
pub mod profile;

use super::alert::AlertType;
use super::api_client::ApiError;
use super::store::Store;

/// One danger alert per message carried by `err`.
fn alert_failure(store: &mut Store, err: &ApiError) {
    log::warn!("⚠️ Request failed: {}", err);
    for msg in err.messages() {
        store.set_alert(msg, AlertType::Danger);
    }
}
