use crate::data::database::Database;
use crate::data::models::product::{
    NewProduct, NewProductImage, Product, ProductImage, UpdateProduct,
};
use crate::data::repos::traits::repository::{ProductRepository, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct ProductRepo {
    db: Database,
}

impl ProductRepo {
    pub fn new(db: Database) -> Self {
        ProductRepo { db }
    }
}

#[async_trait]
impl ProductRepository for ProductRepo {
    async fn get_by_slug(&self, slug_query: &str) -> Result<Option<Product>, result::Error> {
        use crate::data::models::schema::products::dsl::{products, slug};

        let mut conn = self.db.get_connection().await?;

        products
            .filter(slug.eq(slug_query))
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn get_by_category_id(
        &self,
        category_id_query: i32,
    ) -> Result<Vec<Product>, result::Error> {
        use crate::data::models::schema::products::dsl::{category_id, product_id, products};

        let mut conn = self.db.get_connection().await?;

        products
            .filter(category_id.eq(category_id_query))
            .order(product_id.asc())
            .select(Product::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_images(&self, product_id_query: i32) -> Result<Vec<ProductImage>, result::Error> {
        use crate::data::models::schema::product_images::dsl::{
            image_id, is_primary, product_id, product_images,
        };

        let mut conn = self.db.get_connection().await?;

        product_images
            .filter(product_id.eq(product_id_query))
            .order((is_primary.desc(), image_id.asc()))
            .select(ProductImage::as_select())
            .load(&mut conn)
            .await
    }

    async fn replace_images(
        &self,
        product_id_query: i32,
        images: Vec<NewProductImage>,
    ) -> Result<Vec<ProductImage>, result::Error> {
        use crate::data::models::schema::product_images::dsl::{
            image_id, is_primary, product_id, product_images,
        };

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(product_images.filter(product_id.eq(product_id_query)))
                    .execute(connection)
                    .await?;

                if !images.is_empty() {
                    diesel::insert_into(product_images)
                        .values(&images)
                        .execute(connection)
                        .await?;
                }

                product_images
                    .filter(product_id.eq(product_id_query))
                    .order((is_primary.desc(), image_id.asc()))
                    .select(ProductImage::as_select())
                    .load(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = i32;
    type Item = Product;
    type NewItem = NewProduct;
    type UpdateForm = UpdateProduct;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = self.db.get_connection().await?;

        products
            .order(product_id.asc())
            .select(Product::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = self.db.get_connection().await?;

        products
            .filter(product_id.eq(id))
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(products)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                products
                    .filter(product_id.eq(new_id))
                    .select(Product::as_select())
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
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(products.filter(product_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                products
                    .filter(product_id.eq(id))
                    .select(Product::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(products.filter(product_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
