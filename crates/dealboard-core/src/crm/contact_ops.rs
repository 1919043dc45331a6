//! Contact operations for the Crm.

use super::{ChangeEvent, Crm};
use crate::{
    error::Result,
    models::{Contact, ContactFilter},
    params::{CreateContact, Delete, Id, SearchContacts, UpdateContact},
};

impl Crm {
    /// Adds a contact created by the acting user.
    pub async fn create_contact(&self, params: &CreateContact) -> Result<Contact> {
        let params = params.clone();
        let user = self.user.clone();

        let contact = self
            .with_db(move |db| db.create_contact(&params, user.as_deref()))
            .await?;
        self.notify(ChangeEvent::Contacts);
        Ok(contact)
    }

    /// Retrieves a contact by its ID.
    pub async fn get_contact(&self, params: &Id) -> Result<Option<Contact>> {
        let id = params.id;
        self.with_db(move |db| db.get_contact(id)).await
    }

    /// Lists contacts by name, optionally filtered.
    pub async fn list_contacts_filtered(&self, filter: Option<ContactFilter>) -> Result<Vec<Contact>> {
        self.with_db(move |db| db.list_contacts(filter.as_ref())).await
    }

    /// Searches contacts by name or company.
    pub async fn search_contacts(&self, params: &SearchContacts) -> Result<Vec<Contact>> {
        self.list_contacts_filtered(Some(ContactFilter::from(params)))
            .await
    }

    /// Updates the given fields of a contact.
    pub async fn update_contact(&self, params: &UpdateContact) -> Result<Contact> {
        let params = params.clone();

        let contact = self.with_db(move |db| db.update_contact(&params)).await?;
        self.notify(ChangeEvent::Contacts);
        Ok(contact)
    }

    /// Permanently deletes a contact together with its deals and diary.
    pub async fn delete_contact(&self, params: &Delete) -> Result<()> {
        params.validate()?;
        let id = params.id;

        self.with_db(move |db| db.delete_contact(id)).await?;
        self.notify(ChangeEvent::Contacts);
        self.notify(ChangeEvent::Deals);
        Ok(())
    }
}
