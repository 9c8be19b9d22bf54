pub mod backend;
pub mod error;

pub use crate::backend::DataStore;
use std::sync::Arc;

pub type StoreHandle = Arc<dyn DataStore + Send + Sync>;
