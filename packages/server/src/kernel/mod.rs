//! Kernel module - server infrastructure and dependencies.

pub mod error;
pub mod mongo_store;
pub mod query;
pub mod test_dependencies;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use mongo_store::MongoDocumentStore;
pub use query::{CompiledFilter, Condition, Document, FieldCount, Filter, INTERNAL_ID_FIELD};
pub use test_dependencies::{InMemoryDocumentStore, UnavailableDocumentStore};
pub use traits::*;
