// src/lib.rs

pub mod chat;
pub mod db;
pub mod persona;
pub mod repositories;
pub mod services;

pub use conybot_common::error::Error;
pub use db::Database;
