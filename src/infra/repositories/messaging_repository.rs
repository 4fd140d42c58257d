//! Message and notification repositories.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{message, notification};
use crate::domain::{Message, Notification};
use crate::errors::{AppError, AppResult};

/// Data access contract for messages. Intentionally has no update
/// operation: messages are immutable once written.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, sender_id: Uuid, receiver_id: Uuid, content: String)
        -> AppResult<Message>;

    /// All messages addressed to the given user, oldest first.
    async fn list_for_receiver(&self, receiver_id: Uuid) -> AppResult<Vec<Message>>;
}

/// Data access contract for notifications.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, content: String) -> AppResult<Notification>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Set the read flag. The false → true transition is the only one;
    /// callers skip the write when the flag is already set.
    async fn mark_read(&self, id: Uuid) -> AppResult<Notification>;

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;
}

/// SeaORM-backed message store.
pub struct MessageStore {
    db: DatabaseConnection,
}

impl MessageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for MessageStore {
    async fn create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        let active_model = message::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            content: Set(content),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Message::from(model))
    }

    async fn list_for_receiver(&self, receiver_id: Uuid) -> AppResult<Vec<Message>> {
        let models = message::Entity::find()
            .filter(message::Column::ReceiverId.eq(receiver_id))
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Message::from).collect())
    }
}

/// SeaORM-backed notification store.
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn create(&self, user_id: Uuid, content: String) -> AppResult<Notification> {
        let active_model = notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            content: Set(content),
            read: Set(false),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Notification::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let model = notification::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Notification::from))
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Notification> {
        let existing = notification::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: notification::ActiveModel = existing.into();
        active.read = Set(true);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Notification::from(model))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let models = notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_asc(notification::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Notification::from).collect())
    }
}
