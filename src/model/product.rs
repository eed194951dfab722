use crate::model::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub cost: Decimal,
    pub price: Decimal,
    pub category_id: Id,
    pub branch_id: Id,
}

/// Full field set accepted by create and update. Amounts may arrive as
/// JSON numbers or strings; they are always written back as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub cost: Decimal,
    pub price: Decimal,
    pub category_id: Id,
    pub branch_id: Id,
}

/// Product row as returned by the listing, with the referenced
/// category and branch names resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductListing {
    pub id: Id,
    pub name: String,
    pub cost: Decimal,
    pub price: Decimal,
    pub category_name: String,
    pub branch_name: String,
}

impl Product {
    pub fn from_payload(id: Id, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            cost: payload.cost,
            price: payload.price,
            category_id: payload.category_id,
            branch_id: payload.branch_id,
        }
    }
}
