// ============================================================================
// SESSION MODEL - Token + identidad + roles del usuario autenticado
// ============================================================================

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles conocidos por el dashboard. Conjunto cerrado: cualquier otro string
/// que mande el backend se descarta al parsear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN", alias = "ADMIN")]
    Admin,
    #[serde(rename = "ROLE_USER", alias = "USER")]
    User,
}

impl Role {
    /// Parsear un rol tal y como lo emite Spring Security (`ROLE_ADMIN`) o sin prefijo
    pub fn parse(raw: &str) -> Option<Role> {
        let normalized = raw.trim().to_ascii_uppercase();
        match normalized.strip_prefix("ROLE_").unwrap_or(&normalized) {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

/// Parsear una lista de roles crudos, descartando los desconocidos
pub fn parse_roles<I, S>(raw: I) -> BTreeSet<Role>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|r| {
            let parsed = Role::parse(r.as_ref());
            if parsed.is_none() {
                log::warn!("⚠️ [SESSION] Rol desconocido ignorado: {}", r.as_ref());
            }
            parsed
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
}

impl User {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

/// Sesión autenticada. La ausencia de sesión es `Option<Session>::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            user,
            expires_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Un token sin `exp` no caduca en el cliente
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }

    /// Valor del header Authorization
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
