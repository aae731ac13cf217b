use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::maintenancemodel::{
    MaintenanceRequest, MaintenanceWithTenant, RequestPriority, RequestStatus,
};

const REQUEST_COLUMNS: &str = "id, tenant_id, title, description, priority, status, \
     staff_notes, created_at, updated_at";

const REQUEST_JOIN: &str = r#"
    SELECT m.id, m.tenant_id, m.title, m.description, m.priority, m.status,
           m.staff_notes, m.created_at, m.updated_at,
           u.name AS tenant_name, u.email AS tenant_email, u.phone AS tenant_phone,
           un.unit_number, un.building, un.floor
    FROM maintenance_requests m
    JOIN users u ON m.tenant_id = u.id
    LEFT JOIN units un ON u.unit_id = un.id
"#;

#[async_trait]
pub trait MaintenanceExt {
    async fn get_maintenance_requests(
        &self,
        tenant_id: Option<Uuid>,
        status: Option<RequestStatus>,
        priority: Option<RequestPriority>,
    ) -> Result<Vec<MaintenanceWithTenant>, sqlx::Error>;

    async fn get_maintenance_request(
        &self,
        request_id: Uuid,
    ) -> Result<Option<MaintenanceWithTenant>, sqlx::Error>;

    async fn save_maintenance_request(
        &self,
        tenant_id: Uuid,
        title: &str,
        description: &str,
        priority: Option<RequestPriority>,
    ) -> Result<MaintenanceRequest, sqlx::Error>;

    /// Tenant-side edit: only the title and description may change.
    async fn update_maintenance_request_details(
        &self,
        request_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error>;

    /// Staff-side edit: everything, including workflow status and notes.
    async fn update_maintenance_request(
        &self,
        request_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        priority: Option<RequestPriority>,
        status: Option<RequestStatus>,
        staff_notes: Option<&str>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error>;

    async fn delete_maintenance_request(&self, request_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl MaintenanceExt for DBClient {
    async fn get_maintenance_requests(
        &self,
        tenant_id: Option<Uuid>,
        status: Option<RequestStatus>,
        priority: Option<RequestPriority>,
    ) -> Result<Vec<MaintenanceWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceWithTenant>(&format!(
            r#"
            {REQUEST_JOIN}
            WHERE ($1::uuid IS NULL OR m.tenant_id = $1)
              AND ($2::request_status IS NULL OR m.status = $2)
              AND ($3::request_priority IS NULL OR m.priority = $3)
            ORDER BY m.created_at DESC
            "#
        ))
        .bind(tenant_id)
        .bind(status)
        .bind(priority)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_maintenance_request(
        &self,
        request_id: Uuid,
    ) -> Result<Option<MaintenanceWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceWithTenant>(&format!(
            "{REQUEST_JOIN} WHERE m.id = $1"
        ))
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_maintenance_request(
        &self,
        tenant_id: Uuid,
        title: &str,
        description: &str,
        priority: Option<RequestPriority>,
    ) -> Result<MaintenanceRequest, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceRequest>(&format!(
            r#"
            INSERT INTO maintenance_requests (tenant_id, title, description, priority, status)
            VALUES ($1, $2, $3, COALESCE($4, 'medium'::request_priority), 'pending'::request_status)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(tenant_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_maintenance_request_details(
        &self,
        request_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceRequest>(&format!(
            r#"
            UPDATE maintenance_requests
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_maintenance_request(
        &self,
        request_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        priority: Option<RequestPriority>,
        status: Option<RequestStatus>,
        staff_notes: Option<&str>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceRequest>(&format!(
            r#"
            UPDATE maintenance_requests
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                staff_notes = COALESCE($6, staff_notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(status)
        .bind(staff_notes)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_maintenance_request(&self, request_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(request_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
