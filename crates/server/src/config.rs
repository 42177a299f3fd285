use client::{ApiContext, Mode};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Parser)]
#[clap(author, version, about)]
pub struct ServerConfig {
    #[clap(long, default_value = "127.0.0.1:3000")]
    pub(crate) bind: String,
    /// OAuth client id of the REST app
    #[clap(long, env = "PAYREST_CLIENT_ID")]
    pub(crate) client_id: String,
    /// OAuth client secret of the REST app
    #[clap(long, env = "PAYREST_CLIENT_SECRET", hide_env_values = true)]
    pub(crate) client_secret: String,
    /// `sandbox` or `live`
    #[clap(long, env = "PAYREST_MODE", default_value = "sandbox")]
    pub(crate) mode: Mode,
    /// Base url overriding the one implied by the mode
    #[clap(long, env = "PAYREST_ENDPOINT")]
    pub(crate) endpoint: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            mode: Mode::Sandbox,
            endpoint: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind(self, bind: impl Into<String>) -> Self {
        Self {
            bind: bind.into(),
            ..self
        }
    }

    #[must_use]
    pub fn credentials(
        self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..self
        }
    }

    #[must_use]
    pub fn mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    #[must_use]
    pub fn endpoint(self, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..self
        }
    }

    pub fn parse() -> Self {
        Parser::parse()
    }

    pub(crate) fn api_context(&self) -> ApiContext {
        let context = ApiContext::new(&self.client_id, &self.client_secret, self.mode);
        match &self.endpoint {
            Some(endpoint) => context.endpoint(endpoint),
            None => context,
        }
    }
}
