pub mod store;

pub use store::{AppContext, StoreClient, StoreError};
