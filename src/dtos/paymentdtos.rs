use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::paymentmodel::{Payment, PaymentStatus, PaymentWithContext};

#[derive(Debug, Deserialize)]
pub struct PaymentQueryDto {
    pub tenant_id: Option<Uuid>,
    pub bill_id: Option<Uuid>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCheckoutDto {
    pub bill_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentDto {
    pub bill_id: Uuid,
    pub amount: BigDecimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusDto {
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponseDto {
    pub status: String,
    pub checkout_url: String,
    pub payment_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponseDto {
    pub status: String,
    pub confirmed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentListResponseDto {
    pub status: String,
    pub payments: Vec<PaymentWithContext>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct PaymentDetailResponseDto {
    pub status: String,
    pub payment: PaymentWithContext,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponseDto {
    pub status: String,
    pub message: String,
    pub payment: Payment,
}
