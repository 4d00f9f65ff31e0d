// ============================================================================
// ROUTER - Rutas del cliente, guard de autenticación e historial
// ============================================================================

pub mod route;
pub mod guard;
pub mod history;

pub use guard::{GuardState, Navigation, RouteGuard};
pub use route::Route;
