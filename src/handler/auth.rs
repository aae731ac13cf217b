use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{FilterUserDto, LoginUserDto, UserData, UserLoginResponseDto, UserResponseDto},
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new().route("/login", post(login)).route(
        "/me",
        get(get_me).layer(axum::middleware::from_fn(crate::middleware::auth)),
    )
}

fn wrong_credentials() -> HttpError {
    HttpError::bad_request(ErrorMessage::WrongCredentials.to_string())
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(wrong_credentials)?;

    let password_matches =
        password::compare(&body.password, &user.password).map_err(|_| wrong_credentials())?;

    if !password_matches {
        return Err(wrong_credentials());
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to set cookie"))?,
    );

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
        user: FilterUserDto::filter_user(&user),
    });

    Ok((headers, response))
}

pub async fn get_me(
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user.user),
        },
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn wrong_credentials_is_a_bad_request() {
        let err = wrong_credentials();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, ErrorMessage::WrongCredentials.to_string());
    }
}
