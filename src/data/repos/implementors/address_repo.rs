use crate::data::database::Database;
use crate::data::models::address::{Address, NewAddress, UpdateAddress};
use crate::data::repos::traits::repository::{AddressRepository, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct AddressRepo {
    db: Database,
}

impl AddressRepo {
    pub fn new(db: Database) -> Self {
        AddressRepo { db }
    }
}

#[async_trait]
impl AddressRepository for AddressRepo {
    async fn get_by_user_id(&self, user_id_query: i32) -> Result<Vec<Address>, result::Error> {
        use crate::data::models::schema::addresses::dsl::{address_id, addresses, user_id};

        let mut conn = self.db.get_connection().await?;

        addresses
            .filter(user_id.eq(user_id_query))
            .order(address_id.asc())
            .select(Address::as_select())
            .load(&mut conn)
            .await
    }
}

#[async_trait]
impl Repository for AddressRepo {
    type Id = i32;
    type Item = Address;
    type NewItem = NewAddress;
    type UpdateForm = UpdateAddress;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error> {
        use crate::data::models::schema::addresses::dsl::{address_id, addresses};

        let mut conn = self.db.get_connection().await?;

        addresses
            .order(address_id.asc())
            .select(Address::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::addresses::dsl::{address_id, addresses};

        let mut conn = self.db.get_connection().await?;

        addresses
            .filter(address_id.eq(id))
            .select(Address::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::addresses::dsl::{address_id, addresses};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(addresses)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                addresses
                    .filter(address_id.eq(new_id))
                    .select(Address::as_select())
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
        use crate::data::models::schema::addresses::dsl::{address_id, addresses};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(addresses.filter(address_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                addresses
                    .filter(address_id.eq(id))
                    .select(Address::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::addresses::dsl::{address_id, addresses};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(addresses.filter(address_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
