// storage/mod.rs
// Database operations module

pub mod executor;
pub mod insert;
pub mod offset;
pub mod pool;
pub mod repository;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use executor::{PgExecutor, SqlExecutor, SqlValue, Statement};
pub use insert::{insert_statement, insert_status};
pub use offset::{get_last_offset, last_offset_statement};
pub use pool::init_db_pool;
pub use repository::{StatusRepository, StatusStore};
pub use schema::{
    create_index_statement, create_phrase_type_statement, create_response_status_type_statement,
    create_table_schema, create_table_statement, create_type_schema, type_exists_statement,
};
