use crate::errors::AuthError;
use crate::models::{parse_roles, Credentials, Session, User};
use crate::services::api_client::ApiClient;
use crate::services::http::HttpClient;
use crate::services::token::decode_claims;

/// Login contra el backend y construcción de la sesión.
///
/// Los roles se toman, por orden, del body de login, de los claims del token
/// o de `GET /users/me`. Si nada los aporta la sesión queda como usuario normal.
pub async fn authenticate<C: HttpClient>(
    api: &ApiClient<C>,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    let credentials = credentials.normalized().ok_or(AuthError::MissingCredentials)?;

    let login = api.login(&credentials).await?;
    let claims = decode_claims(&login.token).unwrap_or_default();

    let mut username = login.username.clone().or(claims.subject.clone());
    let mut raw_roles = login.roles.clone().filter(|r| !r.is_empty()).unwrap_or_default();
    if raw_roles.is_empty() {
        raw_roles = claims.roles.clone();
    }

    if raw_roles.is_empty() {
        log::info!("🔍 [AUTH] Token sin roles, consultando perfil...");
        match api.current_user(&login.token).await {
            Ok(profile) => {
                raw_roles = profile.roles;
                username = username.or(Some(profile.username));
            }
            Err(e) => log::warn!("⚠️ [AUTH] No se pudo leer el perfil, sesión sin roles: {}", e),
        }
    }

    let user = User {
        username: username.unwrap_or_else(|| credentials.username.clone()),
        roles: parse_roles(raw_roles),
    };
    log::info!(
        "✅ [AUTH] Login correcto: {} ({})",
        user.username,
        if user.is_admin() { "admin" } else { "user" }
    );

    Ok(Session::new(login.token, user, claims.expires_at))
}
