pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::MemoryShowStore;
pub use repository::ShowRepository;
pub use store::{DatabaseError, ShowStore};
