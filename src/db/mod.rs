pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::RecordStore;
