// src/repositories/postgres/mod.rs

pub mod coupon;
pub mod user;

pub use coupon::PostgresCouponStore;
pub use user::{UserRepo, UserRepository};
