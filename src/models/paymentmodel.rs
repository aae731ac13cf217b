use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Manual,
    Paymongo,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub amount: BigDecimal,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub paymongo_link_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment row joined with its bill, tenant, and unit for listings.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct PaymentWithContext {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub amount: BigDecimal,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub paymongo_link_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tenant_id: Uuid,
    pub bill_type: String,
    pub bill_amount: BigDecimal,
    pub bill_description: Option<String>,
    pub tenant_name: String,
    pub tenant_email: String,
    pub unit_number: Option<String>,
    pub building: Option<String>,
}
