use bar_numbers::ChartError;
use bar_numbers::api::{BarOptions, StackMode};
use bar_numbers::extensions::bar_numbers::{
    AlignSpec, BarNumbersOptions, BarNumbersOverrides, DEFAULT_LABEL_FONT, Threshold, number_text,
};
use bar_numbers::render::Color;

#[test]
fn defaults_keep_labels_off() {
    let options = BarNumbersOptions::default();
    assert!(!options.show);
    assert_eq!(options.threshold, Threshold::Disabled);
    assert_eq!(options.x_offset, 0.0);
    assert_eq!(options.y_offset, 0.0);
    assert_eq!(options.font, DEFAULT_LABEL_FONT);
    assert_eq!(options.font_color, Color::BLACK);
    assert!(options.x_align.is_auto());
    assert!(options.y_align.is_auto());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let options = BarNumbersOptions::from_json_str(r#"{ "show": true, "threshold": 0.25 }"#)
        .expect("parse");
    assert!(options.show);
    assert_eq!(options.threshold, Threshold::Fraction(0.25));
    assert_eq!(options.font, DEFAULT_LABEL_FONT);
}

#[test]
fn json_accepts_host_option_shapes() {
    let input = r##"{
        "show": true,
        "xAlign": 0.5,
        "yAlign": null,
        "xOffset": -2,
        "yOffset": 4,
        "font": "bold 11px serif",
        "fontColor": "#f00",
        "threshold": false
    }"##;
    let options = BarNumbersOptions::from_json_str(input).expect("parse");
    assert!(matches!(options.x_align, AlignSpec::Offset(value) if value == 0.5));
    assert!(options.y_align.is_auto());
    assert_eq!(options.x_offset, -2.0);
    assert_eq!(options.y_offset, 4.0);
    assert_eq!(options.font_color, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(options.threshold, Threshold::Disabled);
}

#[test]
fn json_round_trip_preserves_serializable_fields() {
    let options = BarNumbersOptions::shown()
        .with_threshold(0.4)
        .with_offsets(1.0, 2.0)
        .with_x_align(AlignSpec::Offset(3.0))
        .with_font_color(Color::from_hex("#10203080").expect("color"));
    let json = options.to_json_pretty().expect("serialize");
    let parsed = BarNumbersOptions::from_json_str(&json).expect("parse");

    assert_eq!(parsed.threshold, options.threshold);
    assert_eq!(parsed.x_offset, 1.0);
    assert_eq!(parsed.y_offset, 2.0);
    assert!(matches!(parsed.x_align, AlignSpec::Offset(value) if value == 3.0));
    assert_eq!(parsed.font_color.to_hex(), "#10203080");
}

#[test]
fn transforms_and_formatters_are_not_serialized() {
    let options = BarNumbersOptions::shown()
        .with_y_align(AlignSpec::transform(|y| y * 0.9))
        .with_formatter(|value| format!("${value}"));
    let json = options.to_json_pretty().expect("serialize");
    assert!(!json.contains("yAlign"));
    assert!(!json.contains("formatter"));
}

#[test]
fn invalid_documents_are_rejected() {
    for input in [
        r#"{ "threshold": true }"#,
        r#"{ "threshold": -0.5 }"#,
        r##"{ "fontColor": "#12345" }"##,
        r##"{ "fontColor": "#+f+f+f" }"##,
        r#"{ "fontColor": "reddish" }"#,
        r#"{ "fontColor": "rgb(256, 0, 0)" }"#,
        r#"{ "font": "  " }"#,
        r#"{ "show": "yes" }"#,
    ] {
        let err = BarNumbersOptions::from_json_str(input).expect_err(input);
        assert!(matches!(err, ChartError::InvalidData(_)), "{input}");
    }
}

#[test]
fn overrides_replace_only_set_fields() {
    let base = BarNumbersOptions::shown()
        .with_threshold(0.5)
        .with_font("9px monospace");
    let overrides =
        BarNumbersOverrides::from_json_str(r#"{ "yOffset": 5, "threshold": false }"#)
            .expect("parse");
    let merged = overrides.apply_to(&base);

    assert!(merged.show);
    assert_eq!(merged.font, "9px monospace");
    assert_eq!(merged.y_offset, 5.0);
    assert_eq!(merged.threshold, Threshold::Disabled);
}

#[test]
fn override_formatter_is_carried_over() {
    let overrides = BarNumbersOverrides {
        formatter: Some(std::sync::Arc::new(|value: f64| format!("{value:.2}"))),
        ..BarNumbersOverrides::default()
    };
    let merged = overrides.apply_to(&BarNumbersOptions::shown());
    assert_eq!(merged.format_value(1.5), "1.50");
}

#[test]
fn default_text_is_base_ten_display() {
    let options = BarNumbersOptions::shown();
    assert_eq!(options.format_value(5.0), "5");
    assert_eq!(options.format_value(2.5), "2.5");
    assert_eq!(options.format_value(-12.0), "-12");
}

#[test]
fn default_text_switches_to_exponent_form_at_extreme_magnitudes() {
    let options = BarNumbersOptions::shown();
    assert_eq!(options.format_value(1e21), "1e+21");
    assert_eq!(options.format_value(-2.5e22), "-2.5e+22");
    assert_eq!(options.format_value(1e-7), "1e-7");
    assert_eq!(options.format_value(1.5e-7), "1.5e-7");
    assert_eq!(options.format_value(1e20), "100000000000000000000");
    assert_eq!(options.format_value(0.000001), "0.000001");
    assert_eq!(options.format_value(-0.0), "0");
    assert_eq!(options.format_value(f64::INFINITY), "Infinity");
}

#[test]
fn font_color_accepts_colorspec_forms() {
    let options = BarNumbersOptions::from_json_str(r#"{ "fontColor": "rgba(255, 0, 0, 0.5)" }"#)
        .expect("rgba");
    assert_eq!(options.font_color, Color::rgba(1.0, 0.0, 0.0, 0.5));

    let options = BarNumbersOptions::from_json_str(r#"{ "fontColor": "Navy" }"#).expect("name");
    assert_eq!(options.font_color.to_hex(), "#000080");
}

#[test]
fn identity_formatter_matches_no_formatter() {
    let plain = BarNumbersOptions::shown();
    let identity = BarNumbersOptions::shown().with_formatter(number_text);
    for value in [0.0, 1.0, 2.5, -3.75, 1e21, 1e-9, 123_456.789] {
        assert_eq!(plain.format_value(value), identity.format_value(value));
    }
}

#[test]
fn threshold_cut_off_requires_positive_fraction() {
    assert_eq!(Threshold::Fraction(0.5).min_show(20.0), Some(10.0));
    assert_eq!(Threshold::Fraction(0.0).min_show(20.0), None);
    assert_eq!(Threshold::Disabled.min_show(20.0), None);
}

#[test]
fn bar_options_parse_with_nested_numbers_and_stack_modes() {
    let bars: BarOptions = serde_json::from_str(
        r#"{ "barWidth": 0.5, "horizontal": true, "numbers": { "show": true } }"#,
    )
    .expect("parse");
    assert_eq!(bars.bar_width, 0.5);
    assert!(bars.horizontal);
    assert!(bars.numbers.show);
    bars.validate().expect("valid");

    let off: StackMode = serde_json::from_str("false").expect("false");
    let null: StackMode = serde_json::from_str("null").expect("null");
    let on: StackMode = serde_json::from_str("true").expect("true");
    let keyed: StackMode = serde_json::from_str(r#""group-a""#).expect("key");
    let numbered: StackMode = serde_json::from_str("2").expect("number");
    assert!(!off.is_active());
    assert!(!null.is_active());
    assert!(on.is_active());
    assert_eq!(keyed, StackMode::group("group-a"));
    assert!(numbered.is_active());
}

#[test]
fn non_positive_bar_width_is_rejected() {
    let bars = BarOptions {
        bar_width: 0.0,
        ..BarOptions::default()
    };
    assert!(matches!(bars.validate(), Err(ChartError::InvalidData(_))));
}
