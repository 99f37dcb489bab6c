#[path = "../common/mod.rs"]
mod common;

mod cli_tests;
mod scenario_tests;
