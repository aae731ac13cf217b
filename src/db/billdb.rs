use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::billmodel::{Bill, BillStatus, BillWithTenant, RentRollEntry};

const BILL_COLUMNS: &str =
    "id, tenant_id, bill_type, amount, description, due_date, status, created_at, updated_at";

#[async_trait]
pub trait BillExt {
    async fn get_bills(
        &self,
        tenant_id: Option<Uuid>,
        status: Option<BillStatus>,
        month: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<BillWithTenant>, sqlx::Error>;

    async fn get_bill(&self, bill_id: Uuid) -> Result<Option<BillWithTenant>, sqlx::Error>;

    async fn get_bill_row(&self, bill_id: Uuid) -> Result<Option<Bill>, sqlx::Error>;

    /// Tenants that currently occupy a unit, with their unit's rent.
    async fn get_rent_roll(&self) -> Result<Vec<RentRollEntry>, sqlx::Error>;

    /// Whether the tenant already has a Rent bill due in the given month.
    async fn rent_bill_exists(
        &self,
        tenant_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<bool, sqlx::Error>;

    async fn save_rent_bill(
        &self,
        tenant_id: Uuid,
        amount: &BigDecimal,
        description: &str,
        due_date: NaiveDate,
    ) -> Result<Bill, sqlx::Error>;

    async fn update_bill(
        &self,
        bill_id: Uuid,
        bill_type: Option<&str>,
        amount: Option<BigDecimal>,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        status: Option<BillStatus>,
    ) -> Result<Option<Bill>, sqlx::Error>;

    async fn bill_has_payments(&self, bill_id: Uuid) -> Result<bool, sqlx::Error>;

    async fn delete_bill(&self, bill_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl BillExt for DBClient {
    async fn get_bills(
        &self,
        tenant_id: Option<Uuid>,
        status: Option<BillStatus>,
        month: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<BillWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, BillWithTenant>(
            r#"
            SELECT b.id, b.tenant_id, b.bill_type, b.amount, b.description, b.due_date,
                   b.status, b.created_at, b.updated_at,
                   u.name AS tenant_name, u.email AS tenant_email, u.phone AS tenant_phone,
                   un.unit_number, un.building
            FROM bills b
            JOIN users u ON b.tenant_id = u.id
            LEFT JOIN units un ON u.unit_id = un.id
            WHERE ($1::uuid IS NULL OR b.tenant_id = $1)
              AND ($2::bill_status IS NULL OR b.status = $2)
              AND ($3::int IS NULL OR EXTRACT(MONTH FROM b.due_date) = $3)
              AND ($4::int IS NULL OR EXTRACT(YEAR FROM b.due_date) = $4)
            ORDER BY b.due_date DESC, b.created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(status)
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bill(&self, bill_id: Uuid) -> Result<Option<BillWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, BillWithTenant>(
            r#"
            SELECT b.id, b.tenant_id, b.bill_type, b.amount, b.description, b.due_date,
                   b.status, b.created_at, b.updated_at,
                   u.name AS tenant_name, u.email AS tenant_email, u.phone AS tenant_phone,
                   un.unit_number, un.building
            FROM bills b
            JOIN users u ON b.tenant_id = u.id
            LEFT JOIN units un ON u.unit_id = un.id
            WHERE b.id = $1
            "#,
        )
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_bill_row(&self, bill_id: Uuid) -> Result<Option<Bill>, sqlx::Error> {
        sqlx::query_as::<_, Bill>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE id = $1"
        ))
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_rent_roll(&self) -> Result<Vec<RentRollEntry>, sqlx::Error> {
        sqlx::query_as::<_, RentRollEntry>(
            r#"
            SELECT u.id AS tenant_id, un.rent_amount, un.unit_number, un.building
            FROM users u
            INNER JOIN units un ON u.unit_id = un.id
            WHERE u.role = 'tenant'::user_role
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn rent_bill_exists(
        &self,
        tenant_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<bool, sqlx::Error> {
        let existing: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM bills
            WHERE tenant_id = $1
              AND EXTRACT(MONTH FROM due_date) = $2
              AND EXTRACT(YEAR FROM due_date) = $3
              AND bill_type = 'Rent'
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(existing.is_some())
    }

    async fn save_rent_bill(
        &self,
        tenant_id: Uuid,
        amount: &BigDecimal,
        description: &str,
        due_date: NaiveDate,
    ) -> Result<Bill, sqlx::Error> {
        sqlx::query_as::<_, Bill>(&format!(
            r#"
            INSERT INTO bills (tenant_id, bill_type, amount, description, due_date, status)
            VALUES ($1, 'Rent', $2, $3, $4, 'unpaid'::bill_status)
            RETURNING {BILL_COLUMNS}
            "#
        ))
        .bind(tenant_id)
        .bind(amount)
        .bind(description)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_bill(
        &self,
        bill_id: Uuid,
        bill_type: Option<&str>,
        amount: Option<BigDecimal>,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        status: Option<BillStatus>,
    ) -> Result<Option<Bill>, sqlx::Error> {
        sqlx::query_as::<_, Bill>(&format!(
            r#"
            UPDATE bills
            SET bill_type = COALESCE($2, bill_type),
                amount = COALESCE($3, amount),
                description = COALESCE($4, description),
                due_date = COALESCE($5, due_date),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BILL_COLUMNS}
            "#
        ))
        .bind(bill_id)
        .bind(bill_type)
        .bind(amount)
        .bind(description)
        .bind(due_date)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn bill_has_payments(&self, bill_id: Uuid) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE bill_id = $1")
            .bind(bill_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn delete_bill(&self, bill_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1")
            .bind(bill_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
