//! CLI command implementations.

pub mod browse;
pub mod list;

use clap::Args;

use shelfview_catalog::{
    CatalogConfig, CatalogController, CatalogView, DetailRoute, HttpCatalogClient, Navigator,
};
use shelfview_core::{ProductId, SortOption};

/// Controller type used by every command.
pub type Controller = CatalogController<HttpCatalogClient, TerminalNavigator>;

/// View parameters shared by `list` and `delete`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive title search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category to show (case-insensitive); empty shows all
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Sort order (`none`, `price_asc`, `price_desc`, `title_asc`, `title_desc`)
    #[arg(long, default_value = "none")]
    pub sort: SortOption,

    /// Page to show (clamped to the available pages)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

/// Navigator that reports the detail route in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn open_detail(&self, id: &ProductId) {
        tracing::info!(route = %DetailRoute::for_product(id), "Opening product detail");
    }
}

/// Build a controller for the configured catalog service.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn connect(config: &CatalogConfig) -> Result<Controller, Box<dyn std::error::Error>> {
    let client = HttpCatalogClient::new(config)?;
    Ok(CatalogController::with_navigator(client, TerminalNavigator))
}

/// Apply command-line view parameters in pipeline order, page last.
pub async fn apply(controller: &Controller, args: &ViewArgs) -> CatalogView {
    controller.set_category(args.category.as_str()).await;
    controller.set_search_term(args.search.as_str()).await;
    controller.set_sort(args.sort).await;
    controller.go_to_page(args.page).await
}
