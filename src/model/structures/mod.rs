pub mod algorithm;
pub mod playlist;
pub mod rating_config;
pub mod rating_inputs;
pub mod validation_result;
