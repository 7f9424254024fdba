pub mod record;
pub mod view;
pub mod workout;
