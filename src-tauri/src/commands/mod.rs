pub mod config;
pub mod enterprise;
pub mod recommend;
pub mod reports;
