//! Actors service

use validator::Validate;

use crate::{
    error::AppResult,
    models::actor::{Actor, CreateActor},
    repository::Repository,
};

#[derive(Clone)]
pub struct ActorsService {
    repository: Repository,
}

impl ActorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Actor>> {
        self.repository.actors.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Actor> {
        self.repository.actors.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateActor) -> AppResult<Actor> {
        data.validate()?;
        self.repository.actors.create(data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.actors.delete(id).await
    }
}
