use uuid::Uuid;

use crate::identified::Identifiable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
}

impl Contact {
    /// New contact with a fresh random id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::new(),
        }
    }
}

impl Identifiable for Contact {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}
