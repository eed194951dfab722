pub mod branch_handlers;
pub mod category_handlers;
pub mod error;
pub mod handlers;
pub mod product_handlers;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use routes::*;
