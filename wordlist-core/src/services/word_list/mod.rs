pub mod error;
pub mod normalize;
pub mod search;
pub mod store;
pub mod validate;

pub use error::{EditError, ValidationError};
pub use store::WordListStore;
