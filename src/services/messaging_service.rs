//! Messaging service - user-to-user messages and system notifications.
//!
//! Inbox and notification reads are scoped: the caller id always comes
//! from the authenticated request context, passed in explicitly.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Message, Notification};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Messaging service trait for dependency injection.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Send a message; both ends must resolve to existing users.
    /// Messages are immutable afterwards.
    async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<Message>;

    /// Messages where the given user is the receiver, oldest first
    async fn inbox(&self, user_id: Uuid) -> AppResult<Vec<Message>>;

    /// Record a system notification for a user
    async fn notify(&self, user_id: Uuid, content: String) -> AppResult<Notification>;

    /// Mark a notification as read. Idempotent: re-marking an
    /// already-read notification is a no-op, not an error. The caller
    /// must own the notification.
    async fn mark_notification_read(
        &self,
        caller_id: Uuid,
        notification_id: Uuid,
    ) -> AppResult<Notification>;

    /// All notifications (read and unread) for a user, oldest first
    async fn notifications_for(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;
}

/// Concrete implementation of MessagingService using Unit of Work.
pub struct MessagingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MessagingManager<U> {
    /// Create new messaging service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn require_user(&self, id: Uuid) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> MessagingService for MessagingManager<U> {
    async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        self.require_user(sender_id).await?;
        self.require_user(receiver_id).await?;

        self.uow
            .messages()
            .create(sender_id, receiver_id, content)
            .await
    }

    async fn inbox(&self, user_id: Uuid) -> AppResult<Vec<Message>> {
        self.uow.messages().list_for_receiver(user_id).await
    }

    async fn notify(&self, user_id: Uuid, content: String) -> AppResult<Notification> {
        self.require_user(user_id).await?;

        self.uow.notifications().create(user_id, content).await
    }

    async fn mark_notification_read(
        &self,
        caller_id: Uuid,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        let notification = self
            .uow
            .notifications()
            .find_by_id(notification_id)
            .await?
            .ok_or_not_found()?;

        if notification.user_id != caller_id {
            return Err(AppError::Forbidden);
        }

        if notification.read {
            return Ok(notification);
        }

        self.uow.notifications().mark_read(notification_id).await
    }

    async fn notifications_for(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        self.uow.notifications().list_for_user(user_id).await
    }
}
