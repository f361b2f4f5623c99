pub mod preference_controller;

pub use preference_controller::configure;
