pub mod connector;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use connector::*;
pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use traits::*;
