pub mod dashboard_viewmodel;
pub mod login_viewmodel;

pub use dashboard_viewmodel::{DashboardModel, DashboardViewModel, StatsState};
pub use login_viewmodel::{LoginForm, LoginViewModel};
