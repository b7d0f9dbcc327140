use crate::data::models::product::{
    NewProduct, NewProductImage, Product, ProductDetails, ProductImage, UpdateProduct,
};
use crate::data::repos::traits::repository::{CategoryRepository, ProductRepository};
use crate::services::errors::{ProductServiceError, is_foreign_key_violation, is_unique_violation};
use crate::services::media::MediaStorage;
use crate::utils::slug::slugify;
use bigdecimal::{BigDecimal, Zero};
use diesel::result;
use std::sync::Arc;

/// Fields of a new product; the slug is derived from the name.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub weight: BigDecimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ChangeProduct {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub weight: Option<BigDecimal>,
    pub stock: Option<i32>,
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    media: MediaStorage,
}

fn invalid(message: &str) -> ProductServiceError {
    ProductServiceError::InvalidInput(message.to_string())
}

fn check_numbers(
    price: Option<&BigDecimal>,
    weight: Option<&BigDecimal>,
    stock: Option<i32>,
) -> Result<(), ProductServiceError> {
    if price.is_some_and(|p| *p < BigDecimal::zero()) {
        return Err(invalid("Price cannot be negative"));
    }
    if weight.is_some_and(|w| *w <= BigDecimal::zero()) {
        return Err(invalid("Weight must be greater than zero"));
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(invalid("Stock cannot be negative"));
    }
    Ok(())
}

fn slug_for(name: &str) -> Result<String, ProductServiceError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(invalid("Product name must contain letters or digits"));
    }
    Ok(slug)
}

fn on_write_error(e: result::Error) -> ProductServiceError {
    if is_unique_violation(&e) {
        ProductServiceError::DuplicateSlug
    } else if is_foreign_key_violation(&e) {
        ProductServiceError::CategoryNotFound
    } else {
        e.into()
    }
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        media: MediaStorage,
    ) -> Self {
        ProductService {
            products,
            categories,
            media,
        }
    }

    async fn details(&self, product: Product) -> Result<ProductDetails, ProductServiceError> {
        let mut images = self.products.get_images(product.product_id).await?;
        images.sort_by_key(|i| (!i.is_primary, i.image_id));
        Ok(ProductDetails { product, images })
    }

    async fn details_for(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<ProductDetails>, ProductServiceError> {
        let mut list = Vec::with_capacity(products.len());
        for product in products {
            list.push(self.details(product).await?);
        }
        Ok(list)
    }

    async fn ensure_category(&self, category_id: i32) -> Result<(), ProductServiceError> {
        match self.categories.get_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ProductServiceError::CategoryNotFound),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<ProductDetails>, ProductServiceError> {
        let products = self.products.get_all().await?;
        self.details_for(products).await
    }

    pub async fn get_by_id(&self, product_id: i32) -> Result<ProductDetails, ProductServiceError> {
        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)?;
        self.details(product).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductDetails, ProductServiceError> {
        let product = self
            .products
            .get_by_slug(slug)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)?;
        self.details(product).await
    }

    pub async fn get_by_category_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<ProductDetails>, ProductServiceError> {
        let category = self
            .categories
            .get_by_slug(slug)
            .await?
            .ok_or(ProductServiceError::CategoryNotFound)?;

        let products = self.products.get_by_category_id(category.category_id).await?;
        self.details_for(products).await
    }

    pub async fn create(&self, input: CreateProduct) -> Result<ProductDetails, ProductServiceError> {
        let name = input.name.trim().to_string();
        let slug = slug_for(&name)?;
        check_numbers(Some(&input.price), Some(&input.weight), Some(input.stock))?;
        self.ensure_category(input.category_id).await?;

        let product = self
            .products
            .add(NewProduct {
                category_id: input.category_id,
                name,
                slug,
                description: input.description,
                price: input.price,
                weight: input.weight,
                stock: input.stock,
            })
            .await
            .map_err(on_write_error)?;

        tracing::info!(product_id = product.product_id, slug = %product.slug, "Product created");
        Ok(ProductDetails {
            product,
            images: Vec::new(),
        })
    }

    pub async fn update(
        &self,
        product_id: i32,
        input: ChangeProduct,
    ) -> Result<ProductDetails, ProductServiceError> {
        check_numbers(input.price.as_ref(), input.weight.as_ref(), input.stock)?;
        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        let (name, slug) = match input.name {
            Some(name) => {
                let name = name.trim().to_string();
                let slug = slug_for(&name)?;
                (Some(name), Some(slug))
            }
            None => (None, None),
        };

        let form = UpdateProduct {
            category_id: input.category_id,
            name,
            slug,
            description: input.description,
            price: input.price,
            weight: input.weight,
            stock: input.stock,
        };

        let product = self
            .products
            .update(product_id, form)
            .await
            .map_err(on_write_error)?
            .ok_or(ProductServiceError::ProductNotFound)?;

        self.details(product).await
    }

    /// Deletes the product and its stored image files.
    pub async fn delete(&self, product_id: i32) -> Result<(), ProductServiceError> {
        let images = self.products.get_images(product_id).await?;

        match self.products.delete(product_id).await {
            Ok(true) => {}
            Ok(false) => return Err(ProductServiceError::ProductNotFound),
            Err(e) if is_foreign_key_violation(&e) => return Err(ProductServiceError::ProductInUse),
            Err(e) => return Err(e.into()),
        }

        self.remove_files(&images).await;
        tracing::info!(product_id, "Product deleted");
        Ok(())
    }

    /// Replaces every image of the product. The first upload becomes the
    /// primary image.
    pub async fn upload_images(
        &self,
        product_id: i32,
        uploads: Vec<UploadedImage>,
    ) -> Result<ProductDetails, ProductServiceError> {
        if uploads.is_empty() {
            return Err(invalid("At least one image is required"));
        }

        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)?;

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            match self.media.save(&upload.file_name, &upload.bytes).await {
                Ok(name) => stored.push(name),
                Err(e) => {
                    self.remove_names(&stored).await;
                    return Err(e.into());
                }
            }
        }

        let new_images = stored
            .iter()
            .enumerate()
            .map(|(index, name)| NewProductImage {
                product_id,
                image: name.clone(),
                is_primary: index == 0,
            })
            .collect();

        let previous = self.products.get_images(product_id).await?;
        let images = match self.products.replace_images(product_id, new_images).await {
            Ok(images) => images,
            Err(e) => {
                self.remove_names(&stored).await;
                return Err(e.into());
            }
        };

        self.remove_files(&previous).await;
        tracing::info!(product_id, count = images.len(), "Product images replaced");

        self.details(product).await
    }

    async fn remove_files(&self, images: &[ProductImage]) {
        let names: Vec<String> = images.iter().map(|i| i.image.clone()).collect();
        self.remove_names(&names).await;
    }

    async fn remove_names(&self, names: &[String]) {
        for name in names {
            if let Err(e) = self.media.remove(name).await {
                tracing::warn!(file_name = %name, error = %e, "Failed to remove image file");
            }
        }
    }
}
