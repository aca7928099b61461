use std::cell::RefCell;
use std::rc::Rc;

use bar_numbers::api::{BarSeries, PluginHost};
use bar_numbers::core::{DataPoint, PlotAxes, PlotOffset, Viewport};
use bar_numbers::extensions::bar_numbers::{BarNumbersOptions, BarNumbersPlugin};
use bar_numbers::extensions::{ChartPlugin, PluginInfo};
use bar_numbers::render::{DrawingSurface, FrameSurface};
use bar_numbers::{ChartError, ChartResult};
use serde_json::json;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    calls: Rc<RefCell<Vec<String>>>,
    fail_draw: bool,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, calls: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            id: id.into(),
            calls,
            fail_draw: false,
        }
    }

    fn failing(mut self) -> Self {
        self.fail_draw = true;
        self
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: "recorder",
            version: "0.0",
        }
    }

    fn on_options_finalized(&mut self, series: &mut [BarSeries]) -> ChartResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("{}:finalize:{}", self.id, series.len()));
        Ok(())
    }

    fn on_draw(
        &mut self,
        series: &[BarSeries],
        _surface: &mut dyn DrawingSurface,
    ) -> ChartResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("{}:draw:{}", self.id, series.len()));
        if self.fail_draw {
            return Err(ChartError::Backend("boom".to_owned()));
        }
        Ok(())
    }
}

fn surface() -> FrameSurface {
    let axes =
        PlotAxes::from_domains((0.0, 10.0), (0.0, 100.0), Viewport::new(100, 200)).expect("axes");
    FrameSurface::new(axes, Viewport::new(100, 200), PlotOffset::default())
}

#[test]
fn hooks_dispatch_in_registration_order() {
    let calls = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut host = PluginHost::new();
    host.register_plugin(Box::new(RecordingPlugin::new("a", calls.clone())))
        .expect("register a");
    host.register_plugin(Box::new(RecordingPlugin::new("b", calls.clone())))
        .expect("register b");

    let mut series = vec![BarSeries::new(vec![DataPoint::new(0.0, 1.0)])];
    host.finalize_options(&mut series).expect("finalize");
    host.draw(&series, &mut surface()).expect("draw");

    assert_eq!(
        *calls.borrow(),
        vec!["a:finalize:1", "b:finalize:1", "a:draw:1", "b:draw:1"]
    );
}

#[test]
fn duplicate_plugin_ids_are_rejected() {
    let calls = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut host = PluginHost::new();
    host.register_plugin(Box::new(RecordingPlugin::new("dupe", calls.clone())))
        .expect("first plugin");
    let err = host
        .register_plugin(Box::new(RecordingPlugin::new("dupe", calls)))
        .expect_err("duplicate must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn empty_plugin_id_is_rejected() {
    let mut host = PluginHost::new();
    let err = host
        .register_plugin(Box::new(BarNumbersPlugin::new().with_id("")))
        .expect_err("empty id must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn unregister_plugin_stops_dispatch() {
    let calls = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut host = PluginHost::new();
    host.register_plugin(Box::new(RecordingPlugin::new("to-remove", calls.clone())))
        .expect("register");
    assert_eq!(host.plugin_count(), 1);
    assert!(host.has_plugin("to-remove"));

    assert!(host.unregister_plugin("to-remove"));
    assert!(!host.unregister_plugin("to-remove"));
    assert_eq!(host.plugin_count(), 0);

    host.draw(&[], &mut surface()).expect("draw");
    assert!(calls.borrow().is_empty());
}

#[test]
fn failing_draw_does_not_skip_later_plugins() {
    let calls = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut host = PluginHost::new();
    host.register_plugin(Box::new(RecordingPlugin::new("bad", calls.clone()).failing()))
        .expect("register bad");
    host.register_plugin(Box::new(RecordingPlugin::new("good", calls.clone())))
        .expect("register good");

    let err = host.draw(&[], &mut surface()).expect_err("first error surfaces");
    assert!(matches!(err, ChartError::Backend(_)));
    assert_eq!(*calls.borrow(), vec!["bad:draw:0", "good:draw:0"]);
}

#[test]
fn bar_numbers_plugin_advertises_name_and_defaults() {
    let plugin = BarNumbersPlugin::new();
    assert_eq!(plugin.id(), "barnumbers-enhanced");
    assert_eq!(
        plugin.info(),
        PluginInfo {
            name: "barnumbers-enhanced",
            version: "1.0",
        }
    );

    let mut host = PluginHost::new();
    host.register_plugin(Box::new(plugin)).expect("register");
    assert_eq!(
        host.default_options(),
        json!({ "bars": { "numbers": { "show": false, "threshold": false, "yOffset": 0 } } })
    );
    assert_eq!(host.plugin_infos().len(), 1);
}

#[test]
fn host_draws_bar_numbers_end_to_end() {
    let mut host = PluginHost::new();
    host.register_plugin(Box::new(BarNumbersPlugin::new()))
        .expect("register");

    let mut series = vec![
        BarSeries::new(vec![DataPoint::new(0.0, 10.0), DataPoint::new(1.0, 20.0)])
            .with_numbers(BarNumbersOptions::shown()),
    ];
    host.finalize_options(&mut series).expect("finalize");

    let mut surface = surface();
    host.draw(&series, &mut surface).expect("draw");
    let frame = surface.into_frame();
    assert_eq!(frame.strings().collect::<Vec<_>>(), vec!["10", "20"]);
}

#[test]
fn finalize_rejects_invalid_series_options() {
    let mut host = PluginHost::new();
    host.register_plugin(Box::new(BarNumbersPlugin::new()))
        .expect("register");

    let mut series = vec![
        BarSeries::new(vec![DataPoint::new(0.0, 1.0)])
            .with_numbers(BarNumbersOptions::shown().with_threshold(f64::NAN)),
    ];
    let err = host
        .finalize_options(&mut series)
        .expect_err("nan threshold must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
