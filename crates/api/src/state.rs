use std::sync::Arc;

use strategist_mailer::ContactSender;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: strategist_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Contact form relay. `None` when SMTP is not configured.
    pub contact_sender: Option<Arc<dyn ContactSender>>,
}
