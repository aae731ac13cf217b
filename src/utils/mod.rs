pub mod currency;
pub mod dates;
pub mod password;
pub mod token;
