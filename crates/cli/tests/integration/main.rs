mod common;
mod log_tests;
mod store_tests;
