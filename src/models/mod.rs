pub mod billmodel;
pub mod maintenancemodel;
pub mod paymentmodel;
pub mod unitmodel;
pub mod usermodel;
