use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginInfo};
use crate::render::DrawingSurface;

use super::BarSeries;

/// Host-side plugin registry.
///
/// Plugins are keyed by id and dispatched in registration order.
#[derive(Default)]
pub struct PluginHost {
    plugins: IndexMap<String, Box<dyn ChartPlugin>>,
}

impl PluginHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin with unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugins.contains_key(&plugin_id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.insert(plugin_id, plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        self.plugins.shift_remove(plugin_id).is_some()
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }

    #[must_use]
    pub fn plugin_infos(&self) -> Vec<PluginInfo> {
        self.plugins.values().map(|plugin| plugin.info()).collect()
    }

    /// Every plugin's option fragment deep-merged in registration order.
    #[must_use]
    pub fn default_options(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());
        for plugin in self.plugins.values() {
            merge_json(&mut merged, plugin.default_options());
        }
        merged
    }

    /// Runs every plugin's option hook. The first failure aborts.
    pub fn finalize_options(&mut self, series: &mut [BarSeries]) -> ChartResult<()> {
        for plugin in self.plugins.values_mut() {
            plugin.on_options_finalized(series)?;
        }
        Ok(())
    }

    /// Runs every plugin's draw hook.
    ///
    /// A failing plugin does not stop later plugins; the first error is
    /// returned once all have run.
    pub fn draw(
        &mut self,
        series: &[BarSeries],
        surface: &mut dyn DrawingSurface,
    ) -> ChartResult<()> {
        let mut first_error = None;
        for (plugin_id, plugin) in &mut self.plugins {
            if let Err(err) = plugin.on_draw(series, surface) {
                warn!(plugin = %plugin_id, error = %err, "plugin draw failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

fn merge_json(target: &mut Value, fragment: Value) {
    match (target, fragment) {
        (Value::Object(target), Value::Object(fragment)) => {
            for (key, value) in fragment {
                match target.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, fragment) => *target = fragment,
    }
}
