//! Diary operations for the Crm.

use super::{ChangeEvent, Crm};
use crate::{
    error::Result,
    models::{Activity, ActivitySubject},
    params::AddActivity,
};

impl Crm {
    /// Logs a note against a contact or deal.
    pub async fn add_activity(&self, params: &AddActivity) -> Result<Activity> {
        let params = params.clone();
        let user = self.user.clone();

        let activity = self
            .with_db(move |db| db.add_activity(&params, user.as_deref()))
            .await?;
        self.notify(ChangeEvent::Activities);
        Ok(activity)
    }

    /// Lists a contact's or deal's diary, newest first.
    pub async fn list_activities(&self, subject: ActivitySubject) -> Result<Vec<Activity>> {
        self.with_db(move |db| db.list_activities(subject)).await
    }

    /// Removes one entry from a diary.
    pub async fn delete_activity(&self, subject: ActivitySubject, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_activity(subject, id))
            .await?;
        self.notify(ChangeEvent::Activities);
        Ok(())
    }
}
