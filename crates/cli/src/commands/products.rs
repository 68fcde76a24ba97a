//! Product management commands.

use std::path::Path;

use clementine_core::ProductId;
use clementine_dashboard::Outcome;
use clementine_dashboard::assets::AssetUrlResolver;
use clementine_dashboard::store::ImageUpload;
use thiserror::Error;

use crate::{AdminDashboard, EditFields};

/// Errors specific to reading an image file off disk.
#[derive(Debug, Error)]
pub enum ImageFileError {
    /// The file could not be read.
    #[error("Failed to read image file: {0}")]
    Read(#[from] std::io::Error),

    /// The extension does not map to a supported image type.
    #[error("Unsupported image extension: {0}")]
    UnsupportedExtension(String),
}

/// List products.
pub async fn list(dashboard: &mut AdminDashboard) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_products().await?;

    let products = dashboard.products();
    if products.is_empty() {
        println!("No products.");
        return Ok(());
    }

    for product in products {
        println!(
            "{}  {:<32} ${:>10}  stock {:>4}",
            product.id, product.name, product.price, product.stock_quantity,
        );
    }
    Ok(())
}

/// Show one product in detail, including its resolved image URL.
pub async fn show(
    dashboard: &mut AdminDashboard,
    resolver: &AssetUrlResolver,
    id: &ProductId,
) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_products().await?;
    dashboard.select_product(id)?;

    let Some(product) = dashboard.selected_product() else {
        return Ok(());
    };

    println!("Id           {}", product.id);
    println!("Name         {}", product.name);
    println!("Price        ${}", product.price);
    println!("Stock        {}", product.stock_quantity);
    if let Some(description) = &product.description {
        println!("Description  {description}");
    }
    if !product.tags.is_empty() {
        println!("Tags         {}", product.tags);
    }
    if let Some(reference) = &product.image {
        println!("Image        {}", resolver.url_for(reference)?);
    }
    Ok(())
}

/// Edit a product: stage the given fields, then save in one partial patch.
pub async fn edit(
    dashboard: &mut AdminDashboard,
    id: &ProductId,
    fields: EditFields,
) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_products().await?;
    dashboard.begin_product_edit(id)?;

    if let Some(name) = fields.name {
        dashboard.edit_name(name)?;
    }
    if let Some(description) = fields.description {
        dashboard.edit_description(description)?;
    }
    if let Some(price) = fields.price {
        dashboard.edit_price(price)?;
    }
    if let Some(stock) = fields.stock {
        dashboard.edit_stock_quantity(stock)?;
    }
    if let Some(path) = fields.image {
        dashboard.stage_image(read_image(&path)?)?;
    }

    dashboard.save_product().await?;
    Ok(())
}

/// Delete a product (confirmation required).
pub async fn delete(
    dashboard: &mut AdminDashboard,
    id: &ProductId,
) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_products().await?;
    if dashboard.delete_product(id).await? == Outcome::Cancelled {
        println!("Cancelled.");
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<ImageUpload, ImageFileError> {
    let content_type = content_type_for(path)?;
    let filename = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    let bytes = std::fs::read(path)?;

    Ok(ImageUpload {
        filename,
        content_type: content_type.to_string(),
        bytes,
    })
}

fn content_type_for(path: &Path) -> Result<&'static str, ImageFileError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(ImageFileError::UnsupportedExtension(extension)),
    }
}
