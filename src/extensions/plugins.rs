use serde::Serialize;
use serde_json::Value;

use crate::api::BarSeries;
use crate::error::ChartResult;
use crate::render::DrawingSurface;

/// Name and version a plugin advertises to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Hook interface the host calls on every registered plugin.
///
/// The host owns control flow: it finalizes series options once, then calls
/// `on_draw` on each redraw. Plugins only react.
pub trait ChartPlugin {
    fn id(&self) -> &str;

    fn info(&self) -> PluginInfo;

    /// Option fragment merged into the host's option schema.
    fn default_options(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }

    /// Called after the host has merged and defaulted series options.
    fn on_options_finalized(&mut self, series: &mut [BarSeries]) -> ChartResult<()>;

    /// Called during the host's draw phase, after series geometry is final.
    fn on_draw(
        &mut self,
        series: &[BarSeries],
        surface: &mut dyn DrawingSurface,
    ) -> ChartResult<()>;
}
