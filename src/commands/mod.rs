pub mod auth;
pub mod calendar;
pub mod comments;
pub mod import;
pub mod pets;

use anyhow::{Context as _, Result};
use petcare_core::api::ApiClient;
use petcare_core::config::PetcareConfig;
use petcare_core::date::DisplayZone;
use petcare_core::models::User;
use petcare_core::session::Session;

/// Everything a command needs, loaded once at startup.
pub struct Context {
    pub config: PetcareConfig,
    pub session: Session,
    pub zone: DisplayZone,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = PetcareConfig::load().context("Failed to load config")?;
        let zone = config.zone()?;
        let session = Session::restore(&config).context("Failed to restore session")?;
        log::debug!("Using server {}", config.api_url);

        Ok(Context {
            config,
            session,
            zone,
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.config, &self.session)?)
    }

    pub fn require_user(&self) -> Result<&User> {
        Ok(self.session.require_user()?)
    }
}
