// HTTP routes
pub mod download;
pub mod health;
pub mod index;
pub mod search;

pub use download::*;
pub use health::*;
pub use index::*;
pub use search::*;
