use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, error, spotify, types::PkceToken};

pub async fn auth(config: Config, shared_state: Arc<Mutex<Option<PkceToken>>>) {
    if let Err(e) = spotify::auth::auth(config, shared_state).await {
        error!("Authentication failed: {}", e);
    }
}
