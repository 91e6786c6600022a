use approx::assert_relative_eq;
use archery_trends::core::{
    AthleteResults, Color, RawResult, Theme, ThemeColors, align, palette_for, series_styles,
};

#[test]
fn light_palette_matches_reference_colors() {
    let expected = [
        "rgb(124, 58, 237)",
        "rgb(249, 115, 22)",
        "rgb(59, 130, 246)",
        "rgb(16, 185, 129)",
        "rgb(236, 72, 153)",
    ];
    for (index, css) in expected.iter().enumerate() {
        assert_eq!(palette_for(index, Theme::Light).to_css(), *css);
    }
}

#[test]
fn dark_palette_matches_reference_colors() {
    let expected = [
        "rgb(167, 139, 250)",
        "rgb(251, 146, 60)",
        "rgb(96, 165, 250)",
        "rgb(52, 211, 153)",
        "rgb(251, 113, 133)",
    ];
    for (index, css) in expected.iter().enumerate() {
        assert_eq!(palette_for(index, Theme::Dark).to_css(), *css);
    }
}

#[test]
fn palette_wraps_after_five_series() {
    for theme in [Theme::Light, Theme::Dark] {
        for index in 0..5 {
            assert_eq!(palette_for(index, theme), palette_for(index + 5, theme));
            assert_eq!(palette_for(index, theme), palette_for(index + 10, theme));
        }
    }
    assert_ne!(palette_for(0, Theme::Light), palette_for(0, Theme::Dark));
}

#[test]
fn series_styles_follow_series_order() {
    let chart = align(
        &[
            AthleteResults::new("a", "A", vec![RawResult::new("2024-01-01", 1.0)]),
            AthleteResults::new("b", "B", vec![RawResult::new("2024-01-02", 2.0)]),
        ],
        false,
    );

    let styles = series_styles(&chart, Theme::Dark);

    assert_eq!(styles.len(), 2);
    assert_eq!(styles[0].athlete_id, "a");
    assert_eq!(styles[1].border_color, palette_for(1, Theme::Dark));
    assert_relative_eq!(styles[0].background_color.alpha, 32.0 / 255.0);
    assert_relative_eq!(styles[0].tension, 0.1);
    assert_relative_eq!(styles[0].border_width, 2.0);
    assert!(styles[0].background_color.to_css().starts_with("rgba(167, 139, 250, "));
}

#[test]
fn theme_chrome_colors() {
    let light = ThemeColors::for_theme(Theme::Light);
    let dark = ThemeColors::for_theme(Theme::Dark);
    assert_eq!(light.text.to_css(), "rgb(31, 41, 55)");
    assert_eq!(light.background.to_css(), "rgb(255, 255, 255)");
    assert_eq!(dark.grid.to_css(), "rgb(55, 65, 81)");
    assert_relative_eq!(dark.background.alpha, 0.0);
}

#[test]
fn color_validation_rejects_out_of_range_channels() {
    assert!(Color::rgb(0.5, 0.5, 0.5).validate().is_ok());
    let err = Color::rgba(1.5, 0.0, 0.0, 1.0)
        .validate()
        .expect_err("red out of range");
    assert!(format!("{err}").contains("red"));
    assert!(Color::rgb(f64::NAN, 0.0, 0.0).validate().is_err());
}

#[test]
fn theme_from_dark_mode_flag() {
    assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
    assert_eq!(Theme::from_dark_mode(false), Theme::Light);
    assert!(Theme::Dark.is_dark());
}
