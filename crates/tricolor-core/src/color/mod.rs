pub mod lab;
pub mod process;
