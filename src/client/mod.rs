//! Client-side state container mirroring the server resources
//! (session, alerts, posts, profiles). Actions flow through pure reducers
//! into a `Store` owned by the caller.

pub mod actions;
pub mod alert;
pub mod api_client;
pub mod commands;
pub mod reducers;
pub mod store;

pub use actions::{Action, ErrorPayload};
pub use alert::{Alert, AlertType};
pub use api_client::{ApiClient, ApiError};
pub use reducers::AppState;
pub use store::Store;
