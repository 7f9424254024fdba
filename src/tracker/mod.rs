pub mod collaborators;
pub mod factory;
pub mod headless;
pub mod identity;
pub mod session;
pub mod store;
