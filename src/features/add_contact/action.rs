use super::contact::Contact;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum AddContactAction {
    CancelButtonTapped,
    SaveButtonTapped,
    SetName(String),
    /// Messages for whoever presented this feature.
    Delegate(Delegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delegate {
    SaveContact(Contact),
}

impl Action for AddContactAction {}
