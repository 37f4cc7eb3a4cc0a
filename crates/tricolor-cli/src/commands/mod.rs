pub mod align;
pub mod batch;
pub mod config;
pub mod info;
