//! Synchronous controller state and its transitions.
//!
//! Everything here runs under the controller's lock and never awaits. The
//! async wrapper in the parent module performs network calls outside the
//! lock and then applies their results through these methods.

use std::collections::HashSet;

use serde::Serialize;

use shelfview_core::{DerivedView, Product, ProductId, SortOption, ViewParameters, derive};

use crate::notice::Notice;

/// Lifecycle of the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// `initialize` has not been called.
    #[default]
    Uninitialized,
    /// A catalog fetch is in flight.
    Loading,
    /// The catalog is loaded; parameter changes and removals re-derive the view.
    Ready,
    /// The last fetch failed; the list is empty until the next `initialize`.
    FetchFailed,
}

/// Result of an `initialize` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The catalog was stored.
    Loaded {
        /// Number of products received.
        count: usize,
    },
    /// The fetch failed; a notice was queued.
    Failed,
    /// A newer `initialize` started meanwhile; this result was discarded.
    Superseded,
}

/// Result of a `remove` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The service confirmed and the product left the local list.
    Removed,
    /// The service confirmed but the product was already gone locally.
    AlreadyAbsent,
    /// The service call failed; the local list is untouched.
    Failed,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    /// Products on the current page.
    pub page_items: Vec<Product>,
    /// One-based page shown.
    pub current_page: usize,
    /// Total pages; zero when nothing qualifies.
    pub total_pages: usize,
    /// Products surviving the category filter and search.
    pub qualifying_count: usize,
    /// Every category of the loaded catalog, first-seen order.
    pub available_categories: Vec<String>,
    /// Whether "previous" should be enabled.
    pub has_previous: bool,
    /// Whether "next" should be enabled.
    pub has_next: bool,
    /// Where the list is in its lifecycle.
    pub load_state: LoadState,
    /// Parameters the view was derived with.
    pub params: ViewParameters,
}

/// Mutable state owned by the controller.
#[derive(Debug)]
pub(crate) struct ControllerState {
    pub(crate) load_state: LoadState,
    load_generation: u64,
    /// Deletes confirmed while the current load is in flight.
    deleted_during_load: HashSet<ProductId>,
    pub(crate) raw: Vec<Product>,
    pub(crate) params: ViewParameters,
    view: DerivedView,
    notices: Vec<Notice>,
}

impl Default for ControllerState {
    fn default() -> Self {
        let params = ViewParameters::default();
        let view = derive(&[], &params);
        Self {
            load_state: LoadState::Uninitialized,
            load_generation: 0,
            deleted_during_load: HashSet::new(),
            raw: Vec::new(),
            params,
            view,
            notices: Vec::new(),
        }
    }
}

impl ControllerState {
    /// Recompute the view and write the clamped page back.
    fn rederive(&mut self) {
        self.view = derive(&self.raw, &self.params);
        self.params.current_page = self.view.current_page;
    }

    pub(crate) fn snapshot(&self) -> CatalogView {
        CatalogView {
            page_items: self.view.page_items.clone(),
            current_page: self.view.current_page,
            total_pages: self.view.total_pages,
            qualifying_count: self.view.qualifying_count,
            available_categories: self.view.available_categories.clone(),
            has_previous: self.view.has_previous(),
            has_next: self.view.has_next(),
            load_state: self.load_state,
            params: self.params.clone(),
        }
    }

    /// Enter `Loading` and return the generation that owns this load.
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.load_state = LoadState::Loading;
        self.deleted_during_load.clear();
        self.load_generation
    }

    /// Whether a load started as `generation` may still apply its result.
    fn owns_load(&self, generation: u64) -> bool {
        self.load_generation == generation && self.load_state == LoadState::Loading
    }

    /// Store a fetched catalog.
    ///
    /// The response may predate a delete confirmed while it was in flight, so
    /// those ids are dropped from it.
    pub(crate) fn finish_load(
        &mut self,
        generation: u64,
        mut products: Vec<Product>,
    ) -> LoadOutcome {
        if !self.owns_load(generation) {
            return LoadOutcome::Superseded;
        }
        let count = products.len();
        let deleted = std::mem::take(&mut self.deleted_during_load);
        products.retain(|p| !deleted.contains(&p.id));
        self.raw = products;
        self.load_state = LoadState::Ready;
        self.rederive();
        LoadOutcome::Loaded { count }
    }

    pub(crate) fn fail_load(&mut self, generation: u64, message: String) -> LoadOutcome {
        if !self.owns_load(generation) {
            return LoadOutcome::Superseded;
        }
        self.raw.clear();
        self.deleted_during_load.clear();
        self.load_state = LoadState::FetchFailed;
        self.notices.push(Notice::FetchFailed { message });
        self.rederive();
        LoadOutcome::Failed
    }

    /// Apply a confirmed delete. Removes at most one record.
    pub(crate) fn confirm_remove(&mut self, id: &ProductId) -> RemoveOutcome {
        if self.load_state == LoadState::Loading {
            self.deleted_during_load.insert(id.clone());
        }
        let Some(position) = self.raw.iter().position(|p| p.id == *id) else {
            return RemoveOutcome::AlreadyAbsent;
        };
        self.raw.remove(position);
        self.notices.push(Notice::Deleted { id: id.clone() });
        self.rederive();
        RemoveOutcome::Removed
    }

    pub(crate) fn reject_remove(&mut self, id: &ProductId, message: String) -> RemoveOutcome {
        self.notices.push(Notice::DeleteFailed {
            id: id.clone(),
            message,
        });
        RemoveOutcome::Failed
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.params.search_term = term;
        self.rederive();
    }

    pub(crate) fn set_category(&mut self, category: String) {
        self.params.selected_category = category;
        self.rederive();
    }

    pub(crate) fn set_sort(&mut self, option: SortOption) {
        self.params.sort_option = option;
        self.rederive();
    }

    pub(crate) fn go_to_page(&mut self, page: usize) {
        self.params.current_page = page.clamp(1, self.view.total_pages.max(1));
        self.rederive();
    }

    pub(crate) const fn current_page(&self) -> usize {
        self.params.current_page
    }

    pub(crate) fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn catalog(n: i64) -> Vec<Product> {
        (1..=n)
            .map(|i| {
                let category = if i % 2 == 0 { "B" } else { "A" };
                Product::new(i, format!("Item {i}"), category, Decimal::from(i))
            })
            .collect()
    }

    fn loaded(n: i64) -> ControllerState {
        let mut state = ControllerState::default();
        let generation = state.begin_load();
        state.finish_load(generation, catalog(n));
        state
    }

    #[test]
    fn test_default_state_is_renderable() {
        let state = ControllerState::default();
        let view = state.snapshot();
        assert_eq!(view.load_state, LoadState::Uninitialized);
        assert!(view.page_items.is_empty());
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn test_finish_load_moves_to_ready() {
        let state = loaded(7);
        let view = state.snapshot();
        assert_eq!(view.load_state, LoadState::Ready);
        assert_eq!(view.page_items.len(), 5);
        assert_eq!(view.total_pages, 2);
        assert!(view.has_next);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut state = ControllerState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        assert_eq!(state.finish_load(second, catalog(3)), LoadOutcome::Loaded { count: 3 });
        assert_eq!(state.finish_load(first, catalog(9)), LoadOutcome::Superseded);
        assert_eq!(state.raw.len(), 3);
    }

    #[test]
    fn test_delete_confirmed_during_reload_stays_deleted() {
        let mut state = loaded(7);
        let generation = state.begin_load();

        assert_eq!(
            state.confirm_remove(&ProductId::from(3)),
            RemoveOutcome::Removed
        );
        // The reload response was produced before the delete.
        assert_eq!(
            state.finish_load(generation, catalog(7)),
            LoadOutcome::Loaded { count: 7 }
        );
        assert_eq!(state.raw.len(), 6);
        assert!(state.raw.iter().all(|p| p.id != ProductId::from(3)));
    }

    #[test]
    fn test_delete_before_reload_does_not_filter_it() {
        let mut state = loaded(7);
        state.confirm_remove(&ProductId::from(3));

        let generation = state.begin_load();
        state.finish_load(generation, catalog(7));
        assert_eq!(state.raw.len(), 7);
    }

    #[test]
    fn test_load_result_after_leaving_loading_is_discarded() {
        let mut state = ControllerState::default();
        let generation = state.begin_load();
        state.finish_load(generation, catalog(2));
        assert_eq!(
            state.fail_load(generation, "late".to_string()),
            LoadOutcome::Superseded
        );
        assert_eq!(state.load_state, LoadState::Ready);
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_fail_load_empties_list_and_notifies() {
        let mut state = ControllerState::default();
        let generation = state.begin_load();
        assert_eq!(
            state.fail_load(generation, "connection refused".to_string()),
            LoadOutcome::Failed
        );
        assert_eq!(state.load_state, LoadState::FetchFailed);
        assert!(state.raw.is_empty());
        assert_eq!(
            state.take_notices(),
            [Notice::FetchFailed {
                message: "connection refused".to_string()
            }]
        );
    }

    #[test]
    fn test_filter_change_clamps_page() {
        let mut state = loaded(7);
        state.go_to_page(2);
        assert_eq!(state.current_page(), 2);

        // Category A holds items 1, 3, 5, 7: one page.
        state.set_category("a".to_string());
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.snapshot().page_items.len(), 4);
    }

    #[test]
    fn test_search_and_sort_keep_page_when_in_range() {
        let mut state = loaded(12);
        state.go_to_page(2);
        state.set_sort(SortOption::PriceDesc);
        assert_eq!(state.current_page(), 2);
        state.set_search_term("item".to_string());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut state = loaded(7);
        state.go_to_page(99);
        assert_eq!(state.current_page(), 2);
        state.go_to_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_confirm_remove_removes_exactly_one() {
        let mut state = loaded(7);
        let before = state.raw.clone();

        assert_eq!(
            state.confirm_remove(&ProductId::from(3)),
            RemoveOutcome::Removed
        );

        let expected: Vec<Product> = before
            .into_iter()
            .filter(|p| p.id != ProductId::from(3))
            .collect();
        assert_eq!(state.raw, expected);
        assert_eq!(
            state.take_notices(),
            [Notice::Deleted {
                id: ProductId::from(3)
            }]
        );
    }

    #[test]
    fn test_confirm_remove_twice_is_idempotent() {
        let mut state = loaded(7);
        state.confirm_remove(&ProductId::from(3));
        state.take_notices();

        assert_eq!(
            state.confirm_remove(&ProductId::from(3)),
            RemoveOutcome::AlreadyAbsent
        );
        assert_eq!(state.raw.len(), 6);
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_remove_on_last_page_clamps() {
        let mut state = loaded(6);
        state.go_to_page(2);
        state.confirm_remove(&ProductId::from(6));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.snapshot().total_pages, 1);
    }

    #[test]
    fn test_reject_remove_leaves_list_untouched() {
        let mut state = loaded(7);
        let before = state.raw.clone();
        let view_before = state.snapshot();

        assert_eq!(
            state.reject_remove(&ProductId::from(2), "boom".to_string()),
            RemoveOutcome::Failed
        );
        assert_eq!(state.raw, before);
        assert_eq!(state.snapshot(), view_before);
    }
}
