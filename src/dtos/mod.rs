pub mod billdtos;
pub mod dashboarddtos;
pub mod maintenancedtos;
pub mod paymentdtos;
pub mod tenantdtos;
pub mod unitdtos;
pub mod userdtos;
