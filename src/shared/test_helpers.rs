#[cfg(test)]
use crate::features::auth::model::{AuthenticatedUser, Role};

#[cfg(test)]
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Router,
};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_test_user(role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        role,
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    create_test_user(Role::Admin)
}

#[cfg(test)]
async fn inject_user_middleware(
    State(user): State<AuthenticatedUser>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Wrap a router so every request carries the given authenticated user,
/// standing in for the real token middleware.
#[cfg(test)]
pub fn with_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn_with_state(
        user,
        inject_user_middleware,
    ))
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    with_auth(router, create_admin_user())
}
