use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        ChangePasswordDto, FilterUserDto, Response, UpdateUserDto, UserData, UserListQueryDto,
        UserListResponseDto, UserResponseDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    utils::password,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_users).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
            })),
        )
        .route("/me/password", put(change_password))
        .route("/:user_id", get(get_user).put(update_user))
        .route(
            "/:user_id",
            delete(delete_user).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager])
            })),
        )
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<UserListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .get_users(query.role, query.search.as_deref())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = UserListResponseDto {
        status: "success".to_string(),
        results: users.len(),
        users,
    };

    Ok(Json(response))
}

pub async fn get_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if caller.user.id != user_id && !caller.user.role.is_privileged() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let user = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    };

    Ok(Json(response))
}

pub async fn update_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if caller.user.id != user_id && caller.user.role != UserRole::Manager {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let user = app_state
        .db_client
        .update_user_profile(user_id, body.name.as_deref(), body.phone.as_deref())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    };

    Ok(Json(response))
}

pub async fn change_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Json(body): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let old_matches = password::compare(&body.old_password, &caller.user.password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !old_matches {
        return Err(HttpError::forbidden("Old password is incorrect"));
    }

    let hashed = password::hash(&body.new_password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(caller.user.id, hashed)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Password updated successfully".to_string(),
    }))
}

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if caller.user.id == user_id {
        return Err(HttpError::bad_request("You cannot delete your own account"));
    }

    let deleted = app_state
        .db_client
        .delete_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("User not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "User deleted successfully".to_string(),
    }))
}
