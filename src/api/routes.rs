use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{self, AppState};
use crate::api::{branch_handlers, category_handlers, product_handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>(state: AppState<S>) -> Router {
    // Cross-origin requests are allowed from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness
        .route("/", get(handlers::index))
        // Branches
        .route(
            "/api/branches",
            get(branch_handlers::list_branches::<S>).post(branch_handlers::create_branch::<S>),
        )
        .route(
            "/api/branches/:id",
            put(branch_handlers::update_branch::<S>)
                .delete(branch_handlers::delete_branch::<S>),
        )
        // Categories
        .route(
            "/api/categories",
            get(category_handlers::list_categories::<S>)
                .post(category_handlers::create_category::<S>),
        )
        .route(
            "/api/categories/:id",
            get(category_handlers::get_category::<S>)
                .put(category_handlers::update_category::<S>)
                .delete(category_handlers::delete_category::<S>),
        )
        // Products
        .route(
            "/api/products",
            get(product_handlers::list_products::<S>).post(product_handlers::create_product::<S>),
        )
        .route(
            "/api/products/:id",
            put(product_handlers::update_product::<S>)
                .delete(product_handlers::delete_product::<S>),
        )
        .layer(cors)
        .with_state(state)
}
