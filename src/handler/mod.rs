pub mod auth;
pub mod bills;
pub mod dashboard;
pub mod maintenance;
pub mod payments;
pub mod tenants;
pub mod units;
pub mod users;
