pub mod repo;

pub use repo::init_schema;
