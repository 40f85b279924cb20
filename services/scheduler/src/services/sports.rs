//! Sport catalog

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{SchedulerError, SchedulerResult},
    models::{Sport, SportInput},
    store::SportStore,
};

#[derive(Clone)]
pub struct SportService<P> {
    sports: P,
}

impl<P: SportStore> SportService<P> {
    pub fn new(sports: P) -> Self {
        Self { sports }
    }

    pub async fn list(&self) -> SchedulerResult<Vec<Sport>> {
        Ok(self.sports.list().await?)
    }

    /// Add a sport; names are unique ignoring case
    pub async fn add(&self, input: SportInput) -> SchedulerResult<Sport> {
        let name = required_name(&input)?;

        if self.sports.find_by_name_ignore_case(&name).await?.is_some() {
            warn!(name = %name, "Rejected duplicate sport");
            return Err(SchedulerError::DuplicateName);
        }

        let sport = Sport::new(name);
        self.sports.insert(&sport).await?;
        info!(sport_id = %sport.id, name = %sport.name, "Sport added");

        Ok(sport)
    }

    /// Rename a sport. Sessions keep the name they were created with.
    pub async fn rename(&self, id: Uuid, input: SportInput) -> SchedulerResult<Sport> {
        let name = required_name(&input)?;
        let mut sport = self
            .sports
            .find_by_id(id)
            .await?
            .ok_or(SchedulerError::SportNotFound)?;

        if let Some(other) = self.sports.find_by_name_ignore_case(&name).await? {
            if other.id != sport.id {
                warn!(sport_id = %id, name = %name, "Rejected rename onto existing sport");
                return Err(SchedulerError::DuplicateName);
            }
        }

        sport.name = name;
        sport.updated_at = Utc::now();
        if !self.sports.save(&sport).await? {
            return Err(SchedulerError::SportNotFound);
        }

        info!(sport_id = %id, name = %sport.name, "Sport renamed");
        Ok(sport)
    }

    /// Remove a sport. Sessions referring to it by name are left alone.
    pub async fn delete(&self, id: Uuid) -> SchedulerResult<()> {
        if !self.sports.delete(id).await? {
            return Err(SchedulerError::SportNotFound);
        }

        info!(sport_id = %id, "Sport deleted");
        Ok(())
    }
}

fn required_name(input: &SportInput) -> SchedulerResult<String> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(SchedulerError::Validation("Sport name is required".to_string()));
    }
    Ok(name.to_string())
}
