use crate::data::models::category::{Category, NewCategory, UpdateCategory};
use crate::data::repos::traits::repository::CategoryRepository;
use crate::services::errors::{CategoryServiceError, is_foreign_key_violation, is_unique_violation};
use crate::utils::slug::slugify;
use diesel::result;
use std::sync::Arc;

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

fn slug_for(name: &str) -> Result<String, CategoryServiceError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(CategoryServiceError::InvalidInput(
            "Category name must contain letters or digits".to_string(),
        ));
    }
    Ok(slug)
}

fn on_write_error(e: result::Error) -> CategoryServiceError {
    if is_unique_violation(&e) {
        CategoryServiceError::DuplicateSlug
    } else {
        e.into()
    }
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        CategoryService { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_id(&self, category_id: i32) -> Result<Category, CategoryServiceError> {
        self.repo
            .get_by_id(category_id)
            .await?
            .ok_or(CategoryServiceError::CategoryNotFound)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Category, CategoryServiceError> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or(CategoryServiceError::CategoryNotFound)
    }

    /// Creates a category whose slug is derived from its name.
    pub async fn create(&self, name: &str) -> Result<Category, CategoryServiceError> {
        let name = name.trim().to_string();
        let slug = slug_for(&name)?;

        let category = self
            .repo
            .add(NewCategory { name, slug })
            .await
            .map_err(on_write_error)?;

        tracing::info!(category_id = category.category_id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        category_id: i32,
        name: Option<&str>,
    ) -> Result<Category, CategoryServiceError> {
        let form = match name {
            Some(name) => UpdateCategory {
                name: Some(name.trim().to_string()),
                slug: Some(slug_for(name)?),
            },
            None => UpdateCategory::default(),
        };

        self.repo
            .update(category_id, form)
            .await
            .map_err(on_write_error)?
            .ok_or(CategoryServiceError::CategoryNotFound)
    }

    pub async fn delete(&self, category_id: i32) -> Result<(), CategoryServiceError> {
        match self.repo.delete(category_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(CategoryServiceError::CategoryNotFound),
            Err(e) if is_foreign_key_violation(&e) => Err(CategoryServiceError::CategoryInUse),
            Err(e) => Err(e.into()),
        }
    }
}
