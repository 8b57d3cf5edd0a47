use crate::features::add_contact::{AddContactState, Contact};
use crate::identified::IdentifiedVec;
use crate::mvi::FeatureState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactsState {
    /// Add-contact flow; `None` when not presented.
    pub add_contact: Option<AddContactState>,
    pub contacts: IdentifiedVec<Contact>,
}

impl FeatureState for ContactsState {}
