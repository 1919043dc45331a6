//! Deal operations for the Crm.

use super::{ChangeEvent, Crm};
use crate::{
    error::{CrmError, Result},
    models::{Contact, Deal, DealFilter},
    params::{CreateDeal, Delete, Id, ListDeals, MoveDeal, UpdateDeal},
    store::DealStore,
};

impl Crm {
    /// Creates a deal for an existing contact.
    pub async fn create_deal(&self, params: &CreateDeal) -> Result<Deal> {
        let params = params.clone();
        let user = self.user.clone();

        let deal = self
            .with_db(move |db| db.create_deal(&params, user.as_deref()))
            .await?;
        self.notify(ChangeEvent::Deals);
        Ok(deal)
    }

    /// Retrieves a deal by its ID.
    pub async fn get_deal(&self, params: &Id) -> Result<Option<Deal>> {
        let id = params.id;
        self.with_db(move |db| db.get_deal(id)).await
    }

    /// Lists deals newest first, optionally filtered.
    pub async fn list_deals(&self, filter: Option<DealFilter>) -> Result<Vec<Deal>> {
        self.with_db(move |db| db.list_deals(filter.as_ref())).await
    }

    /// Lists deals matching the list parameters.
    pub async fn list_deals_matching(&self, params: &ListDeals) -> Result<Vec<Deal>> {
        self.list_deals(Some(DealFilter::from(params))).await
    }

    /// Updates the given fields of a deal.
    pub async fn update_deal_fields(&self, params: &UpdateDeal) -> Result<Deal> {
        let params = params.clone();

        let deal = self.with_db(move |db| db.update_deal(&params)).await?;
        self.notify(ChangeEvent::Deals);
        Ok(deal)
    }

    /// Replaces a deal record wholesale, keyed by its ID.
    pub async fn replace_deal(&self, deal: &Deal) -> Result<Deal> {
        let deal = deal.clone();

        let stored = self.with_db(move |db| db.replace_deal(&deal)).await?;
        self.notify(ChangeEvent::Deals);
        Ok(stored)
    }

    /// Moves a deal to another stage. Any stage may follow any other.
    pub async fn move_deal(&self, params: &MoveDeal) -> Result<Deal> {
        let current = self
            .get_deal(&Id { id: params.id })
            .await?
            .ok_or(CrmError::DealNotFound { id: params.id })?;

        if current.stage == params.stage {
            return Ok(current);
        }
        self.replace_deal(&current.with_stage(params.stage)).await
    }

    /// Permanently deletes a deal and its diary.
    pub async fn delete_deal(&self, params: &Delete) -> Result<()> {
        params.validate()?;
        let id = params.id;

        self.with_db(move |db| db.delete_deal(id)).await?;
        self.notify(ChangeEvent::Deals);
        Ok(())
    }
}

impl DealStore for Crm {
    async fn list_deals(&self) -> Result<Vec<Deal>> {
        Crm::list_deals(self, None).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.list_contacts_filtered(None).await
    }

    async fn update_deal(&self, deal: &Deal) -> Result<Deal> {
        self.replace_deal(deal).await
    }
}
