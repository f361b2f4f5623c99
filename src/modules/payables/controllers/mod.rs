pub mod payables_controller;

pub use payables_controller::configure;
