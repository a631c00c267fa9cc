use super::IContactMethodRepo;
use reminder_sync_domain::{ContactChannel, ContactMethod, ID};
use sqlx::{FromRow, PgPool};

pub struct PostgresContactMethodRepo {
    pool: PgPool,
}

impl PostgresContactMethodRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactMethodRaw {
    contact_method_id: i64,
    user_id: i64,
    channel: String,
    value: String,
}

impl ContactMethodRaw {
    fn into_domain(self) -> anyhow::Result<ContactMethod> {
        Ok(ContactMethod {
            id: self.contact_method_id.into(),
            user_id: self.user_id.into(),
            channel: self.channel.parse::<ContactChannel>()?,
            value: self.value,
        })
    }
}

#[async_trait::async_trait]
impl IContactMethodRepo for PostgresContactMethodRepo {
    async fn insert(&self, contact_method: &ContactMethod) -> anyhow::Result<ID> {
        let (contact_method_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO contact_methods(user_id, channel, value)
            VALUES($1, $2, $3)
            RETURNING contact_method_id
            "#,
        )
        .bind(contact_method.user_id.inner())
        .bind(contact_method.channel.to_string())
        .bind(&contact_method.value)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact_method_id.into())
    }

    async fn find(&self, contact_method_id: &ID) -> anyhow::Result<Option<ContactMethod>> {
        sqlx::query_as::<_, ContactMethodRaw>(
            r#"
            SELECT * FROM contact_methods AS c
            WHERE c.contact_method_id = $1
            "#,
        )
        .bind(contact_method_id.inner())
        .fetch_optional(&self.pool)
        .await?
        .map(|c| c.into_domain())
        .transpose()
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        contact_method_id: &ID,
    ) -> anyhow::Result<Option<ContactMethod>> {
        sqlx::query_as::<_, ContactMethodRaw>(
            r#"
            SELECT * FROM contact_methods AS c
            WHERE c.user_id = $1 AND
            c.contact_method_id = $2
            "#,
        )
        .bind(user_id.inner())
        .bind(contact_method_id.inner())
        .fetch_optional(&self.pool)
        .await?
        .map(|c| c.into_domain())
        .transpose()
    }

    async fn delete(&self, contact_method_id: &ID) -> anyhow::Result<Option<ContactMethod>> {
        sqlx::query_as::<_, ContactMethodRaw>(
            r#"
            DELETE FROM contact_methods AS c
            WHERE c.contact_method_id = $1
            RETURNING *
            "#,
        )
        .bind(contact_method_id.inner())
        .fetch_optional(&self.pool)
        .await?
        .map(|c| c.into_domain())
        .transpose()
    }
}
