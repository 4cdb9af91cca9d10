//! Session identity, resolved once at startup.

use crate::errors::ClientError;
use crate::models::User;
use serde::Deserialize;
use tracing::{info, warn};

/// Identifier used when no host environment is present.
pub const FALLBACK_USER_ID: i64 = 999_999;

/// The embedding platform's in-app SDK surface.
pub trait HostEnvironment {
    /// Readiness signal, sent once before use.
    fn ready(&mut self);
    /// Request full-screen presentation.
    fn expand(&mut self);
    fn user(&self) -> Option<User>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Host,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    user: User,
    source: IdentitySource,
}

impl Session {
    /// Runs the host bootstrap and reads its user, or falls back to
    /// [`FALLBACK_USER_ID`] when there is no host at all.
    ///
    /// A host that supplies no user is an error rather than a silent fallback.
    pub fn resolve(host: Option<&mut dyn HostEnvironment>) -> Result<Self, ClientError> {
        let Some(host) = host else {
            info!(user_id = FALLBACK_USER_ID, "no host environment, using fallback identity");
            return Ok(Self::standalone());
        };

        host.ready();
        host.expand();
        match host.user() {
            Some(user) => {
                info!(user_id = user.id, "resolved identity from host environment");
                Ok(Self {
                    user,
                    source: IdentitySource::Host,
                })
            }
            None => {
                warn!("host environment is present but exposes no user");
                Err(ClientError::MissingUser)
            }
        }
    }

    pub fn standalone() -> Self {
        Self {
            user: User { id: FALLBACK_USER_ID },
            source: IdentitySource::Fallback,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn source(&self) -> IdentitySource {
        self.source
    }

    pub fn is_embedded(&self) -> bool {
        self.source == IdentitySource::Host
    }
}

#[derive(Debug, Deserialize)]
struct InitDataUser {
    id: i64,
}

/// Host environment reconstructed from the launch data the platform hands
/// to an embedded app (url-encoded pairs, `user` holding a JSON object).
#[derive(Debug, Clone, Default)]
pub struct EmbeddedHost {
    user: Option<User>,
    ready: bool,
    expanded: bool,
}

impl EmbeddedHost {
    pub fn new(user: Option<User>) -> Self {
        Self {
            user,
            ready: false,
            expanded: false,
        }
    }

    pub fn from_init_data(raw: &str) -> Result<Self, ClientError> {
        let raw = raw.trim_start_matches(['#', '?']);
        let user = url::form_urlencoded::parse(raw.as_bytes())
            .find(|(key, _)| key == "user")
            .map(|(_, value)| {
                serde_json::from_str::<InitDataUser>(&value)
                    .map(|parsed| User { id: parsed.id })
                    .map_err(|err| ClientError::InitData(format!("user field: {err}")))
            })
            .transpose()?;
        Ok(Self::new(user))
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

impl HostEnvironment for EmbeddedHost {
    fn ready(&mut self) {
        self.ready = true;
    }

    fn expand(&mut self) {
        self.expanded = true;
    }

    fn user(&self) -> Option<User> {
        self.user
    }
}
