use super::*;
use serde_json::json;

fn approx(a: ColorDef, b: ColorDef) -> bool {
    [(a.r, b.r), (a.g, b.g), (a.b, b.b), (a.a, b.a)]
        .iter()
        .all(|(x, y)| (x - y).abs() < 2.5e-3)
}

#[test]
fn parses_hex_forms() {
    let c: ColorDef = "#ff0000".parse().unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = "#0000ff80".parse().unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    let short: ColorDef = "#f80".parse().unwrap();
    assert_eq!(short, "#ff8800".parse::<ColorDef>().unwrap());

    let short_alpha: ColorDef = "#0f08".parse().unwrap();
    assert!((short_alpha.a - (136.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn rejects_malformed_colors() {
    for bad in ["#12345", "#zz0000", "#", "red", "rgb(1, 2, 3)", "hsl(1, 2)", "hsl(a, 50%, 50%)"] {
        assert!(bad.parse::<ColorDef>().is_err(), "{bad}");
    }
    assert!(serde_json::from_value::<ColorDef>(json!([0.1, 0.2, 0.3])).is_err());
}

#[test]
fn parses_hsl_comma_and_space_syntax() {
    let comma: ColorDef = "hsl(120, 100%, 50%)".parse().unwrap();
    assert!(approx(comma, ColorDef::rgba(0.0, 1.0, 0.0, 1.0)));

    let space: ColorDef = "HSL(120deg 100% 50% / 50%)".parse().unwrap();
    assert!(approx(space, ColorDef::rgba(0.0, 1.0, 0.0, 0.5)));

    let legacy: ColorDef = "hsla(240, 100%, 50%, 0.25)".parse().unwrap();
    assert!(approx(legacy, ColorDef::rgba(0.0, 0.0, 1.0, 0.25)));
}

#[test]
fn serializes_as_hex_and_reads_back() {
    let c: ColorDef = "hsl(200, 60%, 40%)".parse().unwrap();
    let text = serde_json::to_value(c).unwrap();
    let hex = text.as_str().unwrap();
    assert!(hex.starts_with('#') && hex.len() == 9, "{hex}");
    let back: ColorDef = serde_json::from_value(text.clone()).unwrap();
    assert!(approx(back, c));
}

#[test]
fn hsl_primaries() {
    let red = Hsl { h: 0.0, s: 100.0, l: 50.0 }.to_rgba8_premul();
    assert_eq!(red, Rgba8Premul { r: 255, g: 0, b: 0, a: 255 });

    let green = Hsl { h: 480.0, s: 100.0, l: 50.0 }.to_rgba8_premul();
    assert_eq!(green, Rgba8Premul { r: 0, g: 255, b: 0, a: 255 });

    let grey = Hsl { h: 200.0, s: 0.0, l: 50.0 }.to_rgba8_premul();
    assert_eq!(grey, Rgba8Premul { r: 128, g: 128, b: 128, a: 255 });
}

#[test]
fn translucent_color_is_premultiplied() {
    let c: ColorDef = "#ff000080".parse().unwrap();
    assert_eq!(c.to_rgba8_premul(), Rgba8Premul { r: 128, g: 0, b: 0, a: 128 });
}
