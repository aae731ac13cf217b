use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{billdb::BillExt, paymentdb::PaymentExt},
    dtos::paymentdtos::{
        CheckoutResponseDto, CreateCheckoutDto, PaymentDetailResponseDto, PaymentListResponseDto,
        PaymentQueryDto, PaymentResponseDto, RecordPaymentDto, UpdatePaymentStatusDto,
        VerifyPaymentResponseDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::{billmodel::BillStatus, paymentmodel::PaymentStatus, usermodel::UserRole},
    service::paymongo::PayMongoClient,
    utils::currency::peso_to_centavos,
    AppState,
};

pub fn payments_handler() -> Router {
    Router::new()
        .route("/", get(get_payments))
        .route(
            "/",
            post(record_manual_payment).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
            })),
        )
        .route(
            "/paymongo-create",
            post(create_checkout).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Tenant])
            })),
        )
        .route("/verify/:payment_id", get(verify_payment))
        .route(
            "/:payment_id/status",
            put(update_payment_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
            })),
        )
        .route("/:payment_id", get(get_payment))
}

fn gateway(app_state: &AppState) -> Result<&PayMongoClient, HttpError> {
    app_state
        .paymongo
        .as_ref()
        .ok_or_else(|| HttpError::server_error("Online payments are not configured"))
}

pub async fn get_payments(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Query(query): Query<PaymentQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let tenant_id = if caller.user.role == UserRole::Tenant {
        Some(caller.user.id)
    } else {
        query.tenant_id
    };

    let payments = app_state
        .db_client
        .get_payments(tenant_id, query.bill_id, query.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaymentListResponseDto {
        status: "success".to_string(),
        results: payments.len(),
        payments,
    }))
}

pub async fn get_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    if caller.user.role == UserRole::Tenant && payment.tenant_id != caller.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    Ok(Json(PaymentDetailResponseDto {
        status: "success".to_string(),
        payment,
    }))
}

pub async fn create_checkout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateCheckoutDto>,
) -> Result<impl IntoResponse, HttpError> {
    let paymongo = gateway(&app_state)?;

    let bill = app_state
        .db_client
        .get_bill_row(body.bill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Bill not found"))?;

    if bill.tenant_id != caller.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    if bill.status == BillStatus::Paid {
        return Err(HttpError::bad_request("Bill is already paid"));
    }

    let amount_centavos = peso_to_centavos(&bill.amount)
        .ok_or_else(|| HttpError::bad_request("Bill amount is not payable"))?;

    if amount_centavos < 100 {
        return Err(HttpError::bad_request(
            "Bill amount must be at least PHP 1.00",
        ));
    }

    let description = bill
        .description
        .clone()
        .unwrap_or_else(|| format!("{} bill payment", bill.bill_type));

    // One open link per bill. When a pending gateway payment exists we hand
    // back its checkout page instead of opening a second one.
    let pending = app_state
        .db_client
        .get_pending_gateway_payment(bill.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(payment) = pending {
        let checkout_url = match payment.paymongo_link_id.as_deref() {
            Some(link_id) => match paymongo.get_link(link_id).await {
                Ok(link) => link.checkout_url,
                Err(_) => {
                    let link = paymongo
                        .create_link(amount_centavos, &description)
                        .await
                        .map_err(|e| HttpError::server_error(e.to_string()))?;
                    link.checkout_url
                }
            },
            None => {
                let link = paymongo
                    .create_link(amount_centavos, &description)
                    .await
                    .map_err(|e| HttpError::server_error(e.to_string()))?;
                link.checkout_url
            }
        };

        return Ok(Json(CheckoutResponseDto {
            status: "success".to_string(),
            checkout_url,
            payment_id: payment.id,
            message: "A checkout link for this bill is already open".to_string(),
        }));
    }

    let link = paymongo
        .create_link(amount_centavos, &description)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let payment = app_state
        .db_client
        .save_gateway_payment(bill.id, &bill.amount, &link.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(CheckoutResponseDto {
        status: "success".to_string(),
        checkout_url: link.checkout_url,
        payment_id: payment.id,
        message: "Checkout link created".to_string(),
    }))
}

pub async fn verify_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let paymongo = gateway(&app_state)?;

    let payment = app_state
        .db_client
        .get_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    if caller.user.role == UserRole::Tenant && payment.tenant_id != caller.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let link_id = payment
        .paymongo_link_id
        .as_deref()
        .ok_or_else(|| HttpError::bad_request("Payment has no checkout link to verify"))?;

    // The gateway is always re-queried, even for payments already marked
    // completed, so the response reflects the provider's current state.
    let link = paymongo
        .get_link(link_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if link.status == "paid" {
        app_state
            .db_client
            .complete_gateway_payment(payment.id, payment.bill_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        return Ok(Json(VerifyPaymentResponseDto {
            status: "success".to_string(),
            confirmed: true,
            message: "Payment confirmed".to_string(),
            gateway_status: Some(link.status),
        }));
    }

    Ok(Json(VerifyPaymentResponseDto {
        status: "success".to_string(),
        confirmed: false,
        message: "Payment not yet completed".to_string(),
        gateway_status: Some(link.status),
    }))
}

pub async fn record_manual_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RecordPaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.amount <= BigDecimal::from(0) {
        return Err(HttpError::bad_request("Amount must be greater than zero"));
    }

    let bill = app_state
        .db_client
        .get_bill_row(body.bill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Bill not found"))?;

    let transaction_id = format!("MANUAL-{}", Utc::now().timestamp_millis());

    let payment = app_state
        .db_client
        .save_manual_payment(bill.id, &body.amount, &transaction_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaymentResponseDto {
        status: "success".to_string(),
        message: "Payment recorded successfully".to_string(),
        payment,
    }))
}

pub async fn update_payment_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(payment_id): Path<Uuid>,
    Json(body): Json<UpdatePaymentStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .update_payment_status(payment_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    let message = match payment.status {
        PaymentStatus::Completed => "Payment marked completed and bill settled",
        _ => "Payment status updated",
    };

    Ok(Json(PaymentResponseDto {
        status: "success".to_string(),
        message: message.to_string(),
        payment,
    }))
}
