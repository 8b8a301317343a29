pub mod registry;
pub mod settings;
