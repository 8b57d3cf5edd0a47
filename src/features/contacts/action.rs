use crate::compose::PresentationAction;
use crate::features::add_contact::AddContactAction;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum ContactsAction {
    AddButtonTapped,
    AddContact(PresentationAction<AddContactAction>),
}

impl Action for ContactsAction {}
