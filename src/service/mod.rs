pub mod paymongo;
