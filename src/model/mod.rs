pub mod branch;
pub mod category;
pub mod product;

pub use branch::*;
pub use category::*;
pub use product::*;

/// Store-generated primary key shared by every resource
pub type Id = i32;
