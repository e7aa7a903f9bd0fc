//! Environment configuration.
//!
//! Both credential sets are optional: missing storage credentials put the
//! app into a read-only demo mode (empty lists, no auth), and a missing
//! extraction key only disables the admin "publish with AI" feature.
//! Neither absence is a startup failure.

use gateway::GatewayConfig;

pub struct Config {
    /// Hosted backend credentials (`SUPABASE_URL` + `SUPABASE_ANON_KEY`).
    pub storage: Option<GatewayConfig>,
    /// Extraction service credential (`GEMINI_API_KEY`).
    pub gemini_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            storage: GatewayConfig::from_env(),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}
