pub mod auth;
pub mod session;
pub mod stats;

pub use auth::{Credentials, CurrentUserResponse, LoginResponse};
pub use session::{parse_roles, Role, Session, User};
pub use stats::{AdminMetrics, StatsSummary};
