use crate::data::database::Database;
use crate::data::models::user::{NewUser, ResetTokenChange, UpdateUser, User};
use crate::data::repos::traits::repository::{Repository, UserRepository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct UserRepo {
    db: Database,
}

impl UserRepo {
    pub fn new(db: Database) -> Self {
        UserRepo { db }
    }
}

#[async_trait]
impl UserRepository for UserRepo {
    async fn get_by_email(&self, email_query: &str) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{email, users};

        let mut conn = self.db.get_connection().await?;

        users
            .filter(email.eq(email_query))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn set_reset_token(
        &self,
        id: i32,
        change: ResetTokenChange,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.get_connection().await?;

        diesel::update(users.filter(user_id.eq(id)))
            .set(&change)
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepo {
    type Id = i32;
    type Item = User;
    type NewItem = NewUser;
    type UpdateForm = UpdateUser;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.get_connection().await?;

        users
            .order(user_id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.get_connection().await?;

        users
            .filter(user_id.eq(id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(users)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                users
                    .filter(user_id.eq(new_id))
                    .select(User::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(users.filter(user_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                users
                    .filter(user_id.eq(id))
                    .select(User::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(users.filter(user_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
