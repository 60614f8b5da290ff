mod error;
mod settings;
mod store;

pub use error::SetupError;
pub use settings::Settings;
pub use store::FileSessionStore;

use std::sync::Arc;

use metazapp_api::SessionStore;

/// Load configuration and open the on-disk session store.
///
/// Called once at startup, before the terminal is taken over.
pub fn init() -> Result<(Settings, Arc<dyn SessionStore>), SetupError> {
    let settings = Settings::new()?;
    settings.validate().map_err(SetupError::Configuration)?;

    let store = FileSessionStore::new()?;
    Ok((settings, Arc::new(store)))
}
