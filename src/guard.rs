use crate::routes::{Requirement, Route};
use crate::types::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

/// Decides whether `user` may open `route`, or where to send them instead.
pub fn check(route: Route, user: Option<&User>) -> Access {
    match (route.requirement(), user) {
        (Requirement::Public, _) => Access::Granted,
        (Requirement::Authenticated | Requirement::Admin, None) => Access::Redirect(Route::Login),
        (Requirement::Authenticated, Some(_)) => Access::Granted,
        (Requirement::Admin, Some(u)) if u.is_admin() => Access::Granted,
        (Requirement::Admin, Some(_)) => Access::Redirect(Route::Home),
    }
}
