pub mod enterprise;
pub mod recommend;
