use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Branch {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub logo: String, // URL of the branch logo
}

/// Full field set accepted by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub logo: String,
}

impl Branch {
    pub fn from_payload(id: Id, payload: BranchPayload) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            logo: payload.logo,
        }
    }
}
