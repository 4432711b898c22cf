//! `PostgreSQL` implementation of the `MessageRepository` port using Diesel.
//!
//! Read-state updates run as a single conditional `UPDATE`, and unread
//! counts use the database's own `GROUP BY`, so both stay consistent under
//! concurrent callers without application-level locking.

mod models;
mod schema;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::direct_message::{
    domain::{
        DirectMessage, MessageDomainError, MessageId, MessageText, PersistedMessageData,
        UnreadCounts, UserId,
    },
    error::StorageError,
    ports::repository::{MessageRepository, StorageResult},
};
use models::{DirectMessageRow, NewDirectMessageRow};
use schema::direct_messages;

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL` implementation of [`MessageRepository`].
///
/// Uses Diesel with r2d2 connection pooling. The pool is an explicit handle
/// owned by the repository: open it at process start and drop it at
/// shutdown.
///
/// # Example
///
/// ```ignore
/// use diesel::r2d2::{ConnectionManager, Pool};
/// use diesel::PgConnection;
/// use postbox::direct_message::adapters::postgres::PostgresMessageRepository;
///
/// let manager = ConnectionManager::<PgConnection>::new("postgres://...");
/// let pool = Pool::builder().build(manager).expect("pool");
/// let repo = PostgresMessageRepository::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    /// Creates a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Checks out a connection and runs `operation` on tokio's blocking
    /// pool, since Diesel calls are synchronous.
    async fn with_connection<F, T>(&self, operation: F) -> StorageResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|err| StorageError::connection(format!("pool checkout failed: {err}")))?;
            operation(&mut conn)
        })
        .await
        .map_err(|err| StorageError::connection(format!("blocking task failed: {err}")))?
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn append(&self, message: &DirectMessage) -> StorageResult<()> {
        let message_id = message.id();
        let new_row = to_new_row(message);

        self.with_connection(move |conn| {
            diesel::insert_into(direct_messages::table)
                .values(&new_row)
                .execute(conn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StorageError::DuplicateMessage(message_id)
                    }
                    other => StorageError::database(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> StorageResult<Vec<DirectMessage>> {
        self.with_connection(|conn| {
            // Identifiers are UUIDv7, so id order is creation order.
            let rows = direct_messages::table
                .order(direct_messages::id.asc())
                .select(DirectMessageRow::as_select())
                .load::<DirectMessageRow>(conn)
                .map_err(StorageError::database)?;

            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }

    async fn conversation_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> StorageResult<Vec<DirectMessage>> {
        let first = a.as_str().to_owned();
        let second = b.as_str().to_owned();

        self.with_connection(move |conn| {
            let rows = direct_messages::table
                .filter(
                    direct_messages::sender_id
                        .eq(&first)
                        .and(direct_messages::receiver_id.eq(&second))
                        .or(direct_messages::sender_id
                            .eq(&second)
                            .and(direct_messages::receiver_id.eq(&first))),
                )
                .order((direct_messages::sent_at.asc(), direct_messages::id.asc()))
                .select(DirectMessageRow::as_select())
                .load::<DirectMessageRow>(conn)
                .map_err(StorageError::database)?;

            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }

    async fn mark_read(&self, sender_id: &UserId, receiver_id: &UserId) -> StorageResult<u64> {
        let sender = sender_id.as_str().to_owned();
        let receiver = receiver_id.as_str().to_owned();

        self.with_connection(move |conn| {
            let updated = diesel::update(
                direct_messages::table
                    .filter(direct_messages::sender_id.eq(&sender))
                    .filter(direct_messages::receiver_id.eq(&receiver))
                    .filter(direct_messages::read.eq(false)),
            )
            .set(direct_messages::read.eq(true))
            .execute(conn)
            .map_err(StorageError::database)?;

            u64::try_from(updated).map_err(|e| StorageError::serialization(e.to_string()))
        })
        .await
    }

    async fn unread_counts_for(&self, receiver_id: &UserId) -> StorageResult<UnreadCounts> {
        let receiver = receiver_id.as_str().to_owned();

        self.with_connection(move |conn| {
            let groups: Vec<(String, i64)> = direct_messages::table
                .filter(direct_messages::receiver_id.eq(&receiver))
                .filter(direct_messages::read.eq(false))
                .group_by(direct_messages::sender_id)
                .select((direct_messages::sender_id, diesel::dsl::count_star()))
                .load(conn)
                .map_err(StorageError::database)?;

            let parsed = groups
                .into_iter()
                .map(|(sender, count)| {
                    let sender_id = UserId::parse(&sender)
                        .map_err(|e| StorageError::serialization(e.to_string()))?;
                    let tally = u64::try_from(count)
                        .map_err(|e| StorageError::serialization(e.to_string()))?;
                    Ok((sender_id, tally))
                })
                .collect::<StorageResult<Vec<_>>>()?;

            Ok(UnreadCounts::from_grouped(parsed))
        })
        .await
    }
}

fn to_new_row(message: &DirectMessage) -> NewDirectMessageRow {
    NewDirectMessageRow {
        id: message.id().into_inner(),
        sender_id: message.sender_id().as_str().to_owned(),
        receiver_id: message.receiver_id().as_str().to_owned(),
        text: message.text().as_str().to_owned(),
        sent_at: message.sent_at(),
        read: message.is_read(),
    }
}

fn row_to_message(row: DirectMessageRow) -> StorageResult<DirectMessage> {
    let DirectMessageRow {
        id,
        sender_id,
        receiver_id,
        text,
        sent_at,
        read,
    } = row;

    let ser_err = |e: MessageDomainError| StorageError::serialization(e.to_string());

    let data = PersistedMessageData {
        id: MessageId::from_uuid(id),
        sender_id: UserId::parse(&sender_id).map_err(ser_err)?,
        receiver_id: UserId::parse(&receiver_id).map_err(ser_err)?,
        text: MessageText::new(text).map_err(ser_err)?,
        sent_at,
        read,
    };
    Ok(DirectMessage::from_persisted(data))
}
