pub mod constants;
pub mod core;
pub mod events;
pub mod registry;
