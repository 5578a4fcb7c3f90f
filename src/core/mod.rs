pub mod config;
pub mod constants;
pub mod envelope;
pub mod geo;
pub mod resolutions;
pub mod view;
pub mod viewport;
