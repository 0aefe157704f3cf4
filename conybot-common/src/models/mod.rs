pub mod coupon;
pub mod game;
pub mod user;

pub use coupon::{Coupon, CouponSource};
pub use game::{GameChoice, GameResult, GameReward};
pub use user::AppUser;
