use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::unitmodel::{Unit, UnitMaintenanceStatus, UnitStatus, UnitWithTenant};

const UNIT_COLUMNS: &str = "id, unit_number, floor, building, unit_type, rent_amount, status, \
     maintenance_status, bedrooms, bathrooms, area_sqft, description, amenities, images, \
     created_at, updated_at";

#[derive(Debug, Default)]
pub struct NewUnit {
    pub unit_number: String,
    pub floor: i32,
    pub building: String,
    pub unit_type: Option<String>,
    pub rent_amount: Option<BigDecimal>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<BigDecimal>,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub images: Option<String>,
    pub maintenance_status: Option<UnitMaintenanceStatus>,
}

#[derive(Debug, Default)]
pub struct UnitChanges {
    pub unit_number: Option<String>,
    pub floor: Option<i32>,
    pub building: Option<String>,
    pub unit_type: Option<String>,
    pub rent_amount: Option<BigDecimal>,
    pub maintenance_status: Option<UnitMaintenanceStatus>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<BigDecimal>,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub images: Option<String>,
}

#[async_trait]
pub trait UnitExt {
    async fn get_units(
        &self,
        building: Option<&str>,
        floor: Option<i32>,
        status: Option<UnitStatus>,
    ) -> Result<Vec<UnitWithTenant>, sqlx::Error>;

    async fn get_unit(&self, unit_id: Uuid) -> Result<Option<UnitWithTenant>, sqlx::Error>;

    async fn save_unit(&self, unit: NewUnit) -> Result<Unit, sqlx::Error>;

    /// Partial update; occupancy status is deliberately not updatable here,
    /// only the assignment operations flip it.
    async fn update_unit(
        &self,
        unit_id: Uuid,
        changes: UnitChanges,
    ) -> Result<Option<Unit>, sqlx::Error>;

    async fn unit_has_tenants(&self, unit_id: Uuid) -> Result<bool, sqlx::Error>;

    async fn delete_unit(&self, unit_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl UnitExt for DBClient {
    async fn get_units(
        &self,
        building: Option<&str>,
        floor: Option<i32>,
        status: Option<UnitStatus>,
    ) -> Result<Vec<UnitWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, UnitWithTenant>(
            r#"
            SELECT u.id, u.unit_number, u.floor, u.building, u.unit_type, u.rent_amount,
                   u.status, u.maintenance_status, u.bedrooms, u.bathrooms, u.area_sqft,
                   u.description, u.amenities, u.images, u.created_at, u.updated_at,
                   t.id AS tenant_id, t.name AS tenant_name,
                   t.email AS tenant_email, t.phone AS tenant_phone
            FROM units u
            LEFT JOIN users t ON u.id = t.unit_id AND t.role = 'tenant'::user_role
            WHERE ($1::text IS NULL OR u.building = $1)
              AND ($2::int IS NULL OR u.floor = $2)
              AND ($3::unit_status IS NULL OR u.status = $3)
            ORDER BY u.building, u.floor, u.unit_number
            "#,
        )
        .bind(building)
        .bind(floor)
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_unit(&self, unit_id: Uuid) -> Result<Option<UnitWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, UnitWithTenant>(
            r#"
            SELECT u.id, u.unit_number, u.floor, u.building, u.unit_type, u.rent_amount,
                   u.status, u.maintenance_status, u.bedrooms, u.bathrooms, u.area_sqft,
                   u.description, u.amenities, u.images, u.created_at, u.updated_at,
                   t.id AS tenant_id, t.name AS tenant_name,
                   t.email AS tenant_email, t.phone AS tenant_phone
            FROM units u
            LEFT JOIN users t ON u.id = t.unit_id AND t.role = 'tenant'::user_role
            WHERE u.id = $1
            "#,
        )
        .bind(unit_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_unit(&self, unit: NewUnit) -> Result<Unit, sqlx::Error> {
        sqlx::query_as::<_, Unit>(&format!(
            r#"
            INSERT INTO units
                (unit_number, floor, building, unit_type, rent_amount, bedrooms,
                 bathrooms, area_sqft, description, amenities, images, maintenance_status)
            VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 0), COALESCE($7, 0),
                    COALESCE($8, 0), $9, $10, $11, COALESCE($12, 'none'::unit_maintenance_status))
            RETURNING {UNIT_COLUMNS}
            "#
        ))
        .bind(unit.unit_number)
        .bind(unit.floor)
        .bind(unit.building)
        .bind(unit.unit_type)
        .bind(unit.rent_amount)
        .bind(unit.bedrooms)
        .bind(unit.bathrooms)
        .bind(unit.area_sqft)
        .bind(unit.description)
        .bind(unit.amenities)
        .bind(unit.images)
        .bind(unit.maintenance_status)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_unit(
        &self,
        unit_id: Uuid,
        changes: UnitChanges,
    ) -> Result<Option<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(&format!(
            r#"
            UPDATE units
            SET unit_number = COALESCE($2, unit_number),
                floor = COALESCE($3, floor),
                building = COALESCE($4, building),
                unit_type = COALESCE($5, unit_type),
                rent_amount = COALESCE($6, rent_amount),
                maintenance_status = COALESCE($7, maintenance_status),
                bedrooms = COALESCE($8, bedrooms),
                bathrooms = COALESCE($9, bathrooms),
                area_sqft = COALESCE($10, area_sqft),
                description = COALESCE($11, description),
                amenities = COALESCE($12, amenities),
                images = COALESCE($13, images),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {UNIT_COLUMNS}
            "#
        ))
        .bind(unit_id)
        .bind(changes.unit_number)
        .bind(changes.floor)
        .bind(changes.building)
        .bind(changes.unit_type)
        .bind(changes.rent_amount)
        .bind(changes.maintenance_status)
        .bind(changes.bedrooms)
        .bind(changes.bathrooms)
        .bind(changes.area_sqft)
        .bind(changes.description)
        .bind(changes.amenities)
        .bind(changes.images)
        .fetch_optional(&self.pool)
        .await
    }

    async fn unit_has_tenants(&self, unit_id: Uuid) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE unit_id = $1")
            .bind(unit_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn delete_unit(&self, unit_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(unit_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
