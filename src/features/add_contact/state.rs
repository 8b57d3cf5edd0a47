use super::contact::Contact;
use crate::mvi::FeatureState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddContactState {
    /// Contact being edited.
    pub contact: Contact,
}

impl FeatureState for AddContactState {}
