use crate::data::database::Database;
use crate::data::models::shipment::{NewShipment, Shipment, UpdateShipment};
use crate::data::repos::traits::repository::{Repository, ShipmentRepository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct ShipmentRepo {
    db: Database,
}

impl ShipmentRepo {
    pub fn new(db: Database) -> Self {
        ShipmentRepo { db }
    }
}

#[async_trait]
impl ShipmentRepository for ShipmentRepo {
    async fn get_by_order_id(&self, order_id_query: i32) -> Result<Option<Shipment>, result::Error> {
        use crate::data::models::schema::shipments::dsl::{order_id, shipments};

        let mut conn = self.db.get_connection().await?;

        shipments
            .filter(order_id.eq(order_id_query))
            .select(Shipment::as_select())
            .first(&mut conn)
            .await
            .optional()
    }
}

#[async_trait]
impl Repository for ShipmentRepo {
    type Id = i32;
    type Item = Shipment;
    type NewItem = NewShipment;
    type UpdateForm = UpdateShipment;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error> {
        use crate::data::models::schema::shipments::dsl::{shipment_id, shipments};

        let mut conn = self.db.get_connection().await?;

        shipments
            .order(shipment_id.asc())
            .select(Shipment::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::shipments::dsl::{shipment_id, shipments};

        let mut conn = self.db.get_connection().await?;

        shipments
            .filter(shipment_id.eq(id))
            .select(Shipment::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::shipments::dsl::{shipment_id, shipments};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(shipments)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                shipments
                    .filter(shipment_id.eq(new_id))
                    .select(Shipment::as_select())
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
        use crate::data::models::schema::shipments::dsl::{shipment_id, shipments};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(shipments.filter(shipment_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                shipments
                    .filter(shipment_id.eq(id))
                    .select(Shipment::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::shipments::dsl::{shipment_id, shipments};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(shipments.filter(shipment_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
