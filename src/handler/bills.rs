use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::billdb::BillExt,
    dtos::{
        billdtos::{
            BillDetailResponseDto, BillListResponseDto, BillQueryDto, BillResponseDto,
            GenerateBillsResponseDto, UpdateBillDto,
        },
        userdtos::Response,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    utils::dates::last_day_of_month,
    AppState,
};

pub fn bills_handler() -> Router {
    Router::new()
        .route("/", get(get_bills))
        .route(
            "/generate-monthly",
            post(generate_monthly_bills).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
            })),
        )
        .route("/:bill_id", get(get_bill))
        .route(
            "/:bill_id",
            put(update_bill).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
            })),
        )
        .route(
            "/:bill_id",
            delete(delete_bill).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager])
            })),
        )
}

pub async fn get_bills(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Query(query): Query<BillQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Tenants only ever see their own rows, whatever they ask for.
    let tenant_id = if caller.user.role == UserRole::Tenant {
        Some(caller.user.id)
    } else {
        query.tenant_id
    };

    let bills = app_state
        .db_client
        .get_bills(tenant_id, query.status, query.month, query.year)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BillListResponseDto {
        status: "success".to_string(),
        results: bills.len(),
        bills,
    }))
}

pub async fn get_bill(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(bill_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bill = app_state
        .db_client
        .get_bill(bill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Bill not found"))?;

    if caller.user.role == UserRole::Tenant && bill.tenant_id != caller.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    Ok(Json(BillDetailResponseDto {
        status: "success".to_string(),
        bill,
    }))
}

/// Creates one Rent bill per occupying tenant for the month of `today`,
/// due on its last calendar day. Tenants already billed for that month
/// are skipped, so re-runs are safe.
async fn run_monthly_generation(
    db: &(impl BillExt + Sync),
    today: chrono::NaiveDate,
) -> Result<(usize, usize), sqlx::Error> {
    let month = today.month() as i32;
    let year = today.year();
    let due_date = last_day_of_month(year, today.month());

    let rent_roll = db.get_rent_roll().await?;
    let total_tenants = rent_roll.len();
    let mut created = 0usize;

    for entry in rent_roll {
        if db.rent_bill_exists(entry.tenant_id, month, year).await? {
            continue;
        }

        let description = format!(
            "Monthly rent for {} unit {} ({}/{})",
            entry.building, entry.unit_number, month, year
        );

        db.save_rent_bill(entry.tenant_id, &entry.rent_amount, &description, due_date)
            .await?;

        created += 1;
    }

    Ok((created, total_tenants))
}

async fn delete_bill_checked(
    db: &(impl BillExt + Sync),
    bill_id: Uuid,
) -> Result<(), HttpError> {
    let has_payments = db
        .bill_has_payments(bill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if has_payments {
        return Err(HttpError::bad_request(
            "Cannot delete a bill that has recorded payments",
        ));
    }

    let deleted = db
        .delete_bill(bill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Bill not found"));
    }

    Ok(())
}

pub async fn generate_monthly_bills(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (created, total_tenants) =
        run_monthly_generation(app_state.db_client.as_ref(), Utc::now().date_naive())
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(GenerateBillsResponseDto {
        status: "success".to_string(),
        message: format!("Generated {} rent bills", created),
        created,
        total_tenants,
    }))
}

pub async fn update_bill(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bill_id): Path<Uuid>,
    Json(body): Json<UpdateBillDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bill = app_state
        .db_client
        .update_bill(
            bill_id,
            body.bill_type.as_deref(),
            body.amount,
            body.description.as_deref(),
            body.due_date,
            body.status,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Bill not found"))?;

    Ok(Json(BillResponseDto {
        status: "success".to_string(),
        message: "Bill updated successfully".to_string(),
        bill,
    }))
}

pub async fn delete_bill(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bill_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    delete_bill_checked(app_state.db_client.as_ref(), bill_id).await?;

    Ok(Json(Response {
        status: "success",
        message: "Bill deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::billmodel::{Bill, BillStatus, BillWithTenant, RentRollEntry};

    #[derive(Default)]
    struct FakeBillStore {
        rent_roll: Vec<RentRollEntry>,
        bills: Mutex<Vec<Bill>>,
        bills_with_payments: HashSet<Uuid>,
    }

    impl FakeBillStore {
        fn with_rent_roll(rent_roll: Vec<RentRollEntry>) -> Self {
            FakeBillStore {
                rent_roll,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl BillExt for FakeBillStore {
        async fn get_bills(
            &self,
            _tenant_id: Option<Uuid>,
            _status: Option<BillStatus>,
            _month: Option<i32>,
            _year: Option<i32>,
        ) -> Result<Vec<BillWithTenant>, sqlx::Error> {
            unimplemented!()
        }

        async fn get_bill(&self, _bill_id: Uuid) -> Result<Option<BillWithTenant>, sqlx::Error> {
            unimplemented!()
        }

        async fn get_bill_row(&self, _bill_id: Uuid) -> Result<Option<Bill>, sqlx::Error> {
            unimplemented!()
        }

        async fn get_rent_roll(&self) -> Result<Vec<RentRollEntry>, sqlx::Error> {
            Ok(self.rent_roll.clone())
        }

        async fn rent_bill_exists(
            &self,
            tenant_id: Uuid,
            month: i32,
            year: i32,
        ) -> Result<bool, sqlx::Error> {
            let bills = self.bills.lock().unwrap();
            Ok(bills.iter().any(|bill| {
                bill.tenant_id == tenant_id
                    && bill.bill_type == "Rent"
                    && bill.due_date.month() as i32 == month
                    && bill.due_date.year() == year
            }))
        }

        async fn save_rent_bill(
            &self,
            tenant_id: Uuid,
            amount: &BigDecimal,
            description: &str,
            due_date: NaiveDate,
        ) -> Result<Bill, sqlx::Error> {
            let bill = Bill {
                id: Uuid::new_v4(),
                tenant_id,
                bill_type: "Rent".to_string(),
                amount: amount.clone(),
                description: Some(description.to_string()),
                due_date,
                status: BillStatus::Unpaid,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.bills.lock().unwrap().push(bill.clone());
            Ok(bill)
        }

        async fn update_bill(
            &self,
            _bill_id: Uuid,
            _bill_type: Option<&str>,
            _amount: Option<BigDecimal>,
            _description: Option<&str>,
            _due_date: Option<NaiveDate>,
            _status: Option<BillStatus>,
        ) -> Result<Option<Bill>, sqlx::Error> {
            unimplemented!()
        }

        async fn bill_has_payments(&self, bill_id: Uuid) -> Result<bool, sqlx::Error> {
            Ok(self.bills_with_payments.contains(&bill_id))
        }

        async fn delete_bill(&self, bill_id: Uuid) -> Result<u64, sqlx::Error> {
            let mut bills = self.bills.lock().unwrap();
            let before = bills.len();
            bills.retain(|bill| bill.id != bill_id);
            Ok((before - bills.len()) as u64)
        }
    }

    fn roll_entry(unit_number: &str) -> RentRollEntry {
        RentRollEntry {
            tenant_id: Uuid::new_v4(),
            rent_amount: BigDecimal::from(18000),
            unit_number: unit_number.to_string(),
            building: "A".to_string(),
        }
    }

    #[tokio::test]
    async fn monthly_generation_bills_each_occupied_unit_once() {
        let store = FakeBillStore::with_rent_roll(vec![roll_entry("101"), roll_entry("102")]);
        let today = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();

        let (created, total) = run_monthly_generation(&store, today).await.unwrap();
        assert_eq!((created, total), (2, 2));

        let bills = store.bills.lock().unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert!(bills.iter().all(|bill| bill.due_date == due));
        assert!(bills.iter().all(|bill| bill.status == BillStatus::Unpaid));
    }

    #[tokio::test]
    async fn monthly_generation_is_idempotent() {
        let store = FakeBillStore::with_rent_roll(vec![roll_entry("101"), roll_entry("102")]);
        let today = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();

        let (first, _) = run_monthly_generation(&store, today).await.unwrap();
        assert_eq!(first, 2);

        let (second, total) = run_monthly_generation(&store, today).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(total, 2);
        assert_eq!(store.bills.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bills_with_payments_cannot_be_deleted() {
        let mut store = FakeBillStore::with_rent_roll(vec![roll_entry("101")]);
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        run_monthly_generation(&store, today).await.unwrap();

        let bill_id = store.bills.lock().unwrap()[0].id;
        store.bills_with_payments.insert(bill_id);

        let err = delete_bill_checked(&store, bill_id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(store.bills.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_bill_is_not_found() {
        let store = FakeBillStore::default();

        let err = delete_bill_checked(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
