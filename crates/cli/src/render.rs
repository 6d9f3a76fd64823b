//! Plain-text and JSON rendering of the catalog view.

use std::io::{self, Write};

use shelfview_catalog::{CatalogView, LoadState, Notice};
use shelfview_core::Product;

/// Label for the empty category selection.
const ALL_CATEGORIES: &str = "All Categories";

/// Titles longer than this are cut with an ellipsis.
const TITLE_WIDTH: usize = 40;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn product_row(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(
        out,
        "{:>6}  {:<width$}  {:<20}  {:>10}",
        product.id.as_str(),
        truncate(&product.title, TITLE_WIDTH),
        truncate(&product.category, 20),
        product.price,
        width = TITLE_WIDTH,
    )
}

/// Write queued notices, one per line.
pub fn notices(out: &mut impl Write, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        let marker = if notice.is_failure() { "!" } else { "*" };
        writeln!(out, "{marker} {notice}")?;
    }
    Ok(())
}

/// Write the current page with pagination and category lines.
pub fn view(out: &mut impl Write, view: &CatalogView) -> io::Result<()> {
    if view.load_state == LoadState::FetchFailed {
        writeln!(out, "Catalog unavailable.")?;
    }

    if view.page_items.is_empty() {
        writeln!(out, "No products found.")?;
    } else {
        writeln!(
            out,
            "{:>6}  {:<width$}  {:<20}  {:>10}",
            "ID",
            "TITLE",
            "CATEGORY",
            "PRICE",
            width = TITLE_WIDTH,
        )?;
        for product in &view.page_items {
            product_row(out, product)?;
        }
    }

    writeln!(
        out,
        "Page {} of {} ({} matching){}{}",
        view.current_page,
        view.total_pages.max(1),
        view.qualifying_count,
        if view.has_previous { "  [prev]" } else { "" },
        if view.has_next { "  [next]" } else { "" },
    )?;
    categories(out, &view.available_categories)
}

/// Write the category selector line.
pub fn categories(out: &mut impl Write, categories: &[String]) -> io::Result<()> {
    write!(out, "Categories: {ALL_CATEGORIES}")?;
    for category in categories {
        write!(out, ", {category}")?;
    }
    writeln!(out)
}

/// Write one product with every field.
pub fn detail(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(out, "#{} {}", product.id, product.title)?;
    writeln!(out, "  Category: {}", product.category)?;
    writeln!(out, "  Price:    {}", product.price)?;
    if !product.image.is_empty() {
        writeln!(out, "  Image:    {}", product.image)?;
    }
    if !product.description.is_empty() {
        writeln!(out, "  {}", product.description)?;
    }
    Ok(())
}

/// Write the view as pretty JSON.
pub fn json(out: &mut impl Write, view: &CatalogView) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view).map_err(io::Error::other)?;
    writeln!(out)
}
