//! Configuration loading.
//!
//! Every field is overridable via a `BUDGET_`-prefixed environment
//! variable. `database_url` deliberately has no default: earlier
//! incarnations of this app fell back to a broken literal for the
//! database name, so loading now fails fast instead.
//!
//! The session secret and the admin bypass pair default to the values
//! the original deployment shipped with. They are weak by design and
//! kept for compatibility; override them in any real deployment.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub session_secret: String,
    pub admin_identifier: String,
    pub admin_password: String,
}

impl Config {
    /// Resolve configuration from the environment over built-in defaults.
    /// Errors when a required value (the database URL) is absent.
    pub fn load() -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("BUDGET_"))
            .join(Serialized::default("listen_addr", DEFAULT_LISTEN_ADDR))
            .join(Serialized::default("loglevel", "info"))
            .join(Serialized::default("session_secret", "proj3"))
            .join(Serialized::default("admin_identifier", "admin"))
            .join(Serialized::default("admin_password", "intexfun"))
            .extract()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            loglevel: "info".to_string(),
            session_secret: "proj3".to_string(),
            admin_identifier: "admin".to_string(),
            admin_password: "intexfun".to_string(),
        }
    }
}
