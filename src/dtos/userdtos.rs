use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usermodel::{User, UserRole, UserWithUnit};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(
        length(min = 1, message = "New password is required"),
        length(min = 6, message = "New password must be at least 6 characters")
    )]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserListQueryDto {
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub unit_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            email: user.email.to_owned(),
            name: user.name.to_owned(),
            role: user.role.to_str().to_string(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            unit_id: user.unit_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<UserWithUnit>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub user: FilterUserDto,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_user_drops_the_password() {
        let user = User {
            id: Uuid::new_v4(),
            email: "tenant@rentora.ph".to_string(),
            password: "hashed-secret".to_string(),
            name: "Ana Dela Cruz".to_string(),
            role: UserRole::Tenant,
            phone: Some("09171234567".to_string()),
            address: None,
            unit_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let filtered = FilterUserDto::filter_user(&user);
        assert_eq!(filtered.email, user.email);
        assert_eq!(filtered.role, "tenant");

        let json = serde_json::to_string(&filtered).unwrap();
        assert!(!json.contains("hashed-secret"));
        assert!(json.contains("createdAt"));
    }
}
