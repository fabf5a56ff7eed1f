pub mod analyze;
pub mod dispatch;
pub mod log;
pub mod schema;
pub mod shared;
pub mod tree;
pub mod validate;
