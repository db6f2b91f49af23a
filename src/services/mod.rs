// src/services/mod.rs
pub mod as_of;
pub mod extract;
pub mod page;
pub mod store;
