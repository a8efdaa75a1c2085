use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An authenticated caller.
///
/// `role` is the coarse identity role (e.g. `admin`); fine-grained capabilities come
/// from permission grants, not from this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    pub id: i64,
    pub role: Option<String>,
}

impl Actor {
    pub fn new(id: i64, role: Option<String>) -> Self {
        Self { id, role }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}
