pub mod billdb;
pub mod dashboarddb;
pub mod db;
pub mod maintenancedb;
pub mod paymentdb;
pub mod unitdb;
pub mod userdb;
