//! One-shot commands: list, delete, categories.

use std::io::Write;

use tracing::info;

use shelfview_catalog::{CatalogConfig, LoadOutcome, RemoveOutcome};
use shelfview_core::ProductId;

use super::{ViewArgs, apply, connect};
use crate::render;

/// Print one page of the derived list.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdout is closed.
pub async fn list(config: &CatalogConfig, args: &ViewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let controller = connect(config)?;
    controller.initialize().await;
    let view = apply(&controller, args).await;

    let notices = controller.take_notices().await;
    let mut out = std::io::stdout().lock();
    render::notices(&mut out, &notices)?;
    if args.json {
        render::json(&mut out, &view)?;
    } else {
        render::view(&mut out, &view)?;
    }
    out.flush()?;
    Ok(())
}

/// Delete one product, then print the resulting page.
///
/// # Errors
///
/// Returns an error if the catalog could not be loaded or the delete failed.
pub async fn delete(
    config: &CatalogConfig,
    id: &str,
    args: &ViewArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = connect(config)?;
    if controller.initialize().await == LoadOutcome::Failed {
        let notices = controller.take_notices().await;
        render::notices(&mut std::io::stdout().lock(), &notices)?;
        return Err("catalog unavailable; nothing deleted".into());
    }
    apply(&controller, args).await;

    let id = ProductId::new(id.trim());
    info!(product_id = %id, "Deleting product");
    let outcome = controller.remove(&id).await;
    let view = controller.view().await;

    let notices = controller.take_notices().await;
    let mut out = std::io::stdout().lock();
    render::notices(&mut out, &notices)?;
    if args.json {
        render::json(&mut out, &view)?;
    } else {
        render::view(&mut out, &view)?;
    }
    out.flush()?;

    match outcome {
        RemoveOutcome::Removed => Ok(()),
        RemoveOutcome::AlreadyAbsent => {
            info!(product_id = %id, "Product was not in the loaded catalog");
            Ok(())
        }
        RemoveOutcome::Failed => Err(format!("failed to delete product {id}").into()),
    }
}

/// Print every category of the catalog.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdout is closed.
pub async fn categories(config: &CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let controller = connect(config)?;
    controller.initialize().await;
    let view = controller.view().await;

    let notices = controller.take_notices().await;
    let mut out = std::io::stdout().lock();
    render::notices(&mut out, &notices)?;
    render::categories(&mut out, &view.available_categories)?;
    out.flush()?;
    Ok(())
}
