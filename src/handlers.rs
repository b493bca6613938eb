pub mod note;

pub use crate::db::Pool;
