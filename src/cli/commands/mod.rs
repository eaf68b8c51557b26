pub mod diff;
pub mod schema;
