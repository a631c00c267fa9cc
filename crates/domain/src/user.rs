use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    /// Identifier handed out by the external identity provider
    pub external_id: String,
}

impl User {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            external_id: external_id.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
