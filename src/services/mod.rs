pub mod booking;
pub mod catalog;
pub mod pricing;
pub mod slots;
pub mod store;
pub mod teams;
