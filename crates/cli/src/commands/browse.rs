//! Interactive session.
//!
//! Reads one command per line from stdin and redraws the page after each.
//! Deletes run in the background so the view stays usable while the service
//! answers; their notices show up on the next redraw.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use shelfview_catalog::{CatalogConfig, RemoveOutcome};
use shelfview_core::{ProductId, SortOption};

use super::{Controller, connect};
use crate::render;

const HELP: &str = "\
Commands:
  search <text>      filter titles (empty clears)
  category <name>    filter category (empty shows all)
  sort <option>      none, price_asc, price_desc, title_asc, title_desc
  page <n>           jump to page n
  next | prev        move one page
  delete <id>        delete a product
  open <id>          show product detail
  reload             fetch the catalog again
  help               show this text
  quit               leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// `search <text>`: filter titles; empty clears.
    Search(String),
    /// `category <name>`: filter category; empty shows all.
    Category(String),
    /// `sort <option>`
    Sort(SortOption),
    /// `page <n>`
    Page(usize),
    /// `next`
    Next,
    /// `prev`
    Previous,
    /// `delete <id>`: runs in the background.
    Delete(ProductId),
    /// `open <id>`: print the product and notify the navigator.
    Open(ProductId),
    /// `reload`: fetch the catalog again.
    Reload,
    /// `help`
    Help,
    /// `quit`, or end of input.
    Quit,
    /// Blank line; just redraw.
    Redraw,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a message suitable for the user if the line is not a command.
pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_lowercase().as_str() {
        "" => BrowseCommand::Redraw,
        "search" | "s" => BrowseCommand::Search(rest.to_string()),
        "category" | "c" => BrowseCommand::Category(rest.to_string()),
        "sort" => BrowseCommand::Sort(rest.parse::<SortOption>().map_err(|e| e.to_string())?),
        "page" | "p" => BrowseCommand::Page(
            rest.parse::<usize>()
                .map_err(|_| format!("not a page number: {rest:?}"))?,
        ),
        "next" | "n" => BrowseCommand::Next,
        "prev" | "previous" => BrowseCommand::Previous,
        "delete" | "d" | "rm" => BrowseCommand::Delete(required_id(rest)?),
        "open" | "o" => BrowseCommand::Open(required_id(rest)?),
        "reload" => BrowseCommand::Reload,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(command)
}

fn required_id(rest: &str) -> Result<ProductId, String> {
    if rest.is_empty() {
        Err("a product id is required".to_string())
    } else {
        Ok(ProductId::new(rest))
    }
}

/// Run the interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdin/stdout fail.
pub async fn run(config: &CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let controller = connect(config)?;
    controller.initialize().await;
    redraw(&controller, None).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: JoinSet<RemoveOutcome> = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        // Reap finished deletes so the set does not grow unbounded
        while let Some(done) = pending.try_join_next() {
            report_delete(done);
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                redraw(&controller, Some(&message)).await?;
                continue;
            }
        };

        match command {
            BrowseCommand::Search(term) => {
                controller.set_search_term(term).await;
            }
            BrowseCommand::Category(category) => {
                controller.set_category(category).await;
            }
            BrowseCommand::Sort(option) => {
                controller.set_sort(option).await;
            }
            BrowseCommand::Page(page) => {
                controller.go_to_page(page).await;
            }
            BrowseCommand::Next => {
                controller.next_page().await;
            }
            BrowseCommand::Previous => {
                controller.previous_page().await;
            }
            BrowseCommand::Delete(id) => {
                info!(product_id = %id, "Deleting product");
                let controller = controller.clone();
                pending.spawn(async move { controller.remove(&id).await });
            }
            BrowseCommand::Open(id) => {
                open(&controller, &id).await?;
                continue;
            }
            BrowseCommand::Reload => {
                controller.initialize().await;
            }
            BrowseCommand::Help => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{HELP}")?;
                out.flush()?;
                continue;
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Redraw => {}
        }

        redraw(&controller, None).await?;
    }

    if !pending.is_empty() {
        info!(count = pending.len(), "Waiting for pending deletes");
        while let Some(done) = pending.join_next().await {
            report_delete(done);
        }
        redraw(&controller, None).await?;
    }
    Ok(())
}

/// Log how a background delete ended. Returns `None` if the task died.
fn report_delete(done: Result<RemoveOutcome, JoinError>) -> Option<RemoveOutcome> {
    match done {
        Ok(outcome) => {
            debug!(?outcome, "Background delete finished");
            Some(outcome)
        }
        Err(e) => {
            warn!(error = %e, "Background delete task failed");
            None
        }
    }
}

async fn open(controller: &Controller, id: &ProductId) -> std::io::Result<()> {
    let opened = controller.open_detail(id).await;
    let product = if opened {
        controller.products().await.into_iter().find(|p| p.id == *id)
    } else {
        None
    };

    let mut out = std::io::stdout().lock();
    match product {
        Some(product) => render::detail(&mut out, &product)?,
        None => writeln!(out, "No product with id {id}.")?,
    }
    out.flush()
}

async fn redraw(controller: &Controller, error: Option<&str>) -> std::io::Result<()> {
    let view = controller.view().await;
    let notices = controller.take_notices().await;

    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    render::notices(&mut out, &notices)?;
    if let Some(message) = error {
        writeln!(out, "! {message}")?;
    }
    render::view(&mut out, &view)?;
    write!(out, "> ")?;
    out.flush()
}
