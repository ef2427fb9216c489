use std::ops::Deref;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    app_state::AppState,
    domain::{
        models::{AuthToken, User, UserId},
        WorklogError,
    },
    routes::ApiError,
};

/// A custom Axum extractor that resolves the `Authorization: Bearer` token
/// to the authenticated [`User`]. Returns 401 Unauthorized if the header is
/// missing, uses another scheme, or carries an unknown token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    user: User,
}

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Not authenticated"))?;

        let app_state = AppState::from_ref(state);
        let user = app_state
            .auth_service
            .authenticate(&AuthToken::new(bearer.token()))
            .await
            .map_err(|_| ApiError::unauthorized("Not authenticated"))?;

        Ok(AuthUser {
            id: user.id.clone(),
            user,
        })
    }
}

/// Like [`AuthUser`], but also requires the admin role. Non-admins get 401.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl Deref for AdminUser {
    type Target = AuthUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            tracing::debug!(user_id = %user.id, "admin route refused");
            return Err(WorklogError::Forbidden.into());
        }

        Ok(AdminUser(user))
    }
}
