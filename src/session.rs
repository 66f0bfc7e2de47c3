//! One list instance: interaction state, fetching, formatting, view
//! resolution and record navigation wired together.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{Config, Defaults, ListConfig};
use crate::fetch::{
    DataFetchOrchestrator, DataSource, FetchConfig, FetchOutcome, FetchSnapshot, ListQuery, Record,
};
use crate::formatting::{ConditionalFormatter, StyleFragment};
use crate::preference::{PreferenceStore, ViewPreferences};
use crate::ui::list::{ListIntent, ListReducer, ListState};
use crate::ui::mvi::Reducer;
use crate::ui::navigation::{NavigationController, NavigationEffect, NavigationState};
use crate::view::{resolve, PrecedenceChain, ResolvedViewSchema, ViewType};

/// Host-level settings for a session.
#[derive(Clone)]
pub struct SessionOptions {
    pub defaults: Defaults,
    pub preferences: ViewPreferences,
    /// Whether the user may read records; decides the click behaviour when
    /// the list has no navigation config.
    pub can_read: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            preferences: ViewPreferences::disabled(),
            can_read: true,
        }
    }
}

impl SessionOptions {
    /// Options from the application config, persisting through `store` when
    /// `persist_view_type` is on.
    pub fn from_config(config: &Config, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            defaults: config.defaults.clone(),
            preferences: ViewPreferences::new(store, config.defaults.persist_view_type),
            can_read: true,
        }
    }
}

pub struct ListSession {
    config: ListConfig,
    state: ListState,
    fetcher: DataFetchOrchestrator,
    preferences: ViewPreferences,
    preference_key: String,
    navigation: NavigationController,
}

impl ListSession {
    pub fn new(config: ListConfig, source: Arc<dyn DataSource>, options: SessionOptions) -> Self {
        let preferences = options.preferences;
        let preference_key = preferences.key(&config.object_name, config.view_id.as_deref());

        let view_type = preferences
            .load(&preference_key)
            .or_else(|| {
                config
                    .default_named_view
                    .as_deref()
                    .and_then(|id| config.named_view(id))
                    .map(|view| view.view_type)
            })
            .or(config.default_view)
            .unwrap_or(options.defaults.default_view);

        let fetcher = DataFetchOrchestrator::new(
            source,
            FetchConfig {
                require_schema: options.defaults.require_schema,
                page_size: Some(options.defaults.page_size),
            },
        );
        let navigation = NavigationController::new(&config.object_name, config.navigation.clone())
            .with_read_permission(options.can_read);

        tracing::debug!(
            object = %config.object_name,
            view_type = %view_type,
            "List session created"
        );

        Self {
            state: ListState::initial(&config, view_type),
            config,
            fetcher,
            preferences,
            preference_key,
            navigation,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn query(&self) -> ListQuery {
        self.state.query(&self.config)
    }

    /// Shared handle to the orchestrator, for fetching from another task.
    pub fn fetcher(&self) -> DataFetchOrchestrator {
        self.fetcher.clone()
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        self.fetcher.snapshot()
    }

    pub fn records(&self) -> Vec<Record> {
        self.fetcher.records()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    /// Fetch with the current query.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetcher.fetch(&self.query()).await
    }

    /// Reduce `intent` into the state. Returns the new query when it differs
    /// from the previous one, meaning a refetch is due.
    pub fn apply(&mut self, intent: ListIntent) -> Option<ListQuery> {
        let before = self.query();
        let previous_view = self.state.view_type;

        let state = std::mem::take(&mut self.state);
        self.state = ListReducer::reduce(state, intent);

        if self.state.view_type != previous_view {
            tracing::info!(
                object = %self.config.object_name,
                from = %previous_view,
                to = %self.state.view_type,
                "View type switched"
            );
            self.preferences
                .save(&self.preference_key, self.state.view_type);
        }

        let after = self.query();
        (after != before).then_some(after)
    }

    /// Apply `intent` and refetch if the query changed.
    pub async fn dispatch(&mut self, intent: ListIntent) -> Option<FetchOutcome> {
        let query = self.apply(intent)?;
        Some(self.fetcher.fetch(&query).await)
    }

    /// Switch to named view `id`, or back to the plain list with `None`.
    pub async fn select_named_view(&mut self, id: Option<&str>) -> Option<FetchOutcome> {
        let view = id.and_then(|id| self.config.named_view(id));
        if id.is_some() && view.is_none() {
            tracing::warn!(
                object = %self.config.object_name,
                view = ?id,
                "Unknown named view"
            );
            return None;
        }

        let intent = ListIntent::SelectNamedView {
            id: id.map(str::to_string),
            view_type: view.map_or(self.state.view_type, |view| view.view_type),
            sort: self.config.base_sort(id),
        };
        self.dispatch(intent).await
    }

    /// Schema for the active view type, without instance overrides.
    pub fn resolved_view(&self) -> ResolvedViewSchema {
        self.resolved_view_with(None)
    }

    /// Schema for the active view type with fields set on the rendered
    /// view instance taking precedence.
    pub fn resolved_view_with(&self, instance: Option<&Map<String, Value>>) -> ResolvedViewSchema {
        let named_view = self
            .state
            .named_view
            .as_deref()
            .and_then(|id| self.config.named_view(id));
        let chain = PrecedenceChain::new(&self.config)
            .named_view(named_view)
            .instance(instance);
        resolve(self.state.view_type, &chain)
    }

    pub fn view_type(&self) -> ViewType {
        self.state.view_type
    }

    /// Row styles for the current records, in record order.
    pub fn styles(&self) -> Vec<StyleFragment> {
        let formatter = ConditionalFormatter::new(&self.config.conditional_formatting);
        self.records()
            .iter()
            .map(|record| formatter.style_for(record))
            .collect()
    }

    pub fn style_for(&self, record: &Record) -> StyleFragment {
        ConditionalFormatter::new(&self.config.conditional_formatting).style_for(record)
    }

    pub fn row_click(&mut self, record: Record) -> Option<NavigationEffect> {
        self.navigation.record_click(record)
    }

    pub fn close_detail(&mut self) {
        self.navigation.close();
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigation.state()
    }
}
