use serde::{Deserialize, Serialize};

/// Dashboard user account. Held by the store only; there is no HTTP surface for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Fields supplied when creating a user; the store assigns the id.
#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
