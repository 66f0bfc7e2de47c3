//! Layered option lookup with an explicit precedence order.

use serde_json::{Map, Value};

/// Where a resolved option value came from, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LayerSource {
    /// Fields set directly on the active view instance.
    Instance,
    /// `options.<type>` of the active named view.
    NamedView,
    /// `options.<type>` of the list configuration.
    ListOptions,
    /// Type-specific fields placed flat on the list configuration.
    ListFlat,
    /// Built-in per-type fallback.
    Fallback,
}

/// Ordered stack of option maps. Lookups return the first layer that sets
/// the key; `null` counts as unset.
#[derive(Debug, Clone, Default)]
pub struct ConfigLayers {
    layers: Vec<(LayerSource, Map<String, Value>)>,
}

impl ConfigLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer. Layers must be pushed in precedence order; pushing a
    /// higher-precedence source after a lower one re-sorts the stack.
    pub fn push(&mut self, source: LayerSource, layer: Map<String, Value>) {
        self.layers.push((source, layer));
        self.layers.sort_by_key(|(source, _)| *source);
    }

    pub fn with(mut self, source: LayerSource, layer: Map<String, Value>) -> Self {
        self.push(source, layer);
        self
    }

    pub fn get(&self, key: &str) -> Option<(&Value, LayerSource)> {
        self.layers.iter().find_map(|(source, layer)| {
            layer
                .get(key)
                .filter(|value| !value.is_null())
                .map(|value| (value, *source))
        })
    }

    /// Every non-null value for `key`, highest precedence first.
    pub fn candidates<'a>(
        &'a self,
        key: &'a str,
    ) -> impl Iterator<Item = (&'a Value, LayerSource)> + 'a {
        self.layers.iter().filter_map(move |(source, layer)| {
            layer
                .get(key)
                .filter(|value| !value.is_null())
                .map(|value| (value, *source))
        })
    }

    /// Flatten into one map where each key takes its highest-precedence
    /// value.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = Map::new();
        for (_, layer) in self.layers.iter().rev() {
            for (key, value) in layer {
                if !value.is_null() {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        merged
    }
}
