use std::collections::{BTreeMap, BTreeSet};

use archery_trends::core::{
    AthleteResults, Metric, NormalizedDate, RawResult, SeriesAligner, Theme, ZeroValuePolicy,
    align, normalize_result_date, palette_for,
};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid base date")
}

fn date_text_strategy() -> impl Strategy<Value = String> {
    (0u64..800, 0u8..4).prop_map(|(offset, style)| {
        let date = base_date() + Days::new(offset);
        match style {
            0 => date.format("%d/%m/%Y").to_string(),
            1 => date.format("%Y-%m-%d").to_string(),
            2 => date.format("%d-%m-%Y").to_string(),
            _ => "not a date".to_owned(),
        }
    })
}

fn score_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (1.0f64..720.0).prop_map(Some),
        1 => Just(Some(0.0)),
        1 => Just(Some(f64::NAN)),
        1 => Just(None),
    ]
}

fn result_strategy() -> impl Strategy<Value = RawResult> {
    (date_text_strategy(), score_strategy()).prop_map(|(date, score)| RawResult {
        date: Some(date),
        score,
        ..RawResult::default()
    })
}

fn athletes_strategy() -> impl Strategy<Value = Vec<AthleteResults>> {
    prop::collection::vec(prop::collection::vec(result_strategy(), 0..25), 0..6).prop_map(
        |sets| {
            sets.into_iter()
                .enumerate()
                .map(|(index, results)| {
                    AthleteResults::new(format!("id-{index}"), format!("Athlete {index}"), results)
                })
                .collect()
        },
    )
}

fn expected_values(set: &AthleteResults) -> BTreeMap<NormalizedDate, Option<f64>> {
    let mut values = BTreeMap::new();
    for result in &set.results {
        let Some(date) = result.date.as_deref().and_then(normalize_result_date) else {
            continue;
        };
        let value = result.score.filter(|score| !score.is_nan() && *score != 0.0);
        values.insert(date, value);
    }
    values
}

proptest! {
    #[test]
    fn aligned_series_share_the_label_axis(sets in athletes_strategy()) {
        let chart = align(&sets, false);

        prop_assert_eq!(chart.series.len(), sets.len());
        prop_assert_eq!(chart.dates.len(), chart.labels.len());
        for series in &chart.series {
            prop_assert_eq!(series.values.len(), chart.labels.len());
        }
        prop_assert!(chart.validate().is_ok());
    }

    #[test]
    fn axis_is_sorted_union_of_parseable_dates(sets in athletes_strategy()) {
        let chart = align(&sets, false);

        let expected: BTreeSet<NormalizedDate> = sets
            .iter()
            .flat_map(|set| set.results.iter())
            .filter_map(|result| result.date.as_deref().and_then(normalize_result_date))
            .collect();
        let expected: Vec<NormalizedDate> = expected.into_iter().collect();
        prop_assert_eq!(&chart.dates, &expected);

        let labels: Vec<String> = expected.iter().map(|date| date.display_label()).collect();
        prop_assert_eq!(chart.labels, labels);
    }

    #[test]
    fn values_follow_last_write_per_date(sets in athletes_strategy()) {
        let chart = align(&sets, false);

        for (set, series) in sets.iter().zip(&chart.series) {
            prop_assert_eq!(&series.athlete_id, &set.athlete_id);
            let expected = expected_values(set);
            for (date, value) in chart.dates.iter().zip(&series.values) {
                prop_assert_eq!(*value, expected.get(date).copied().flatten());
            }
            let expected_points = expected.values().filter(|value| value.is_some()).count();
            prop_assert_eq!(series.point_count(), expected_points);
        }
    }

    #[test]
    fn preserve_policy_keeps_zero_scores(sets in athletes_strategy()) {
        let gaps = align(&sets, false);
        let preserved = SeriesAligner::new()
            .with_zero_value_policy(ZeroValuePolicy::Preserve)
            .align(&sets, Metric::Score);

        prop_assert_eq!(&gaps.labels, &preserved.labels);
        for (gap_series, kept_series) in gaps.series.iter().zip(&preserved.series) {
            for (gap, kept) in gap_series.values.iter().zip(&kept_series.values) {
                match kept {
                    Some(value) if *value == 0.0 => prop_assert_eq!(*gap, None),
                    other => prop_assert_eq!(gap, other),
                }
            }
        }
    }

    #[test]
    fn palette_cycles_every_five(index in 0usize..10_000, dark in any::<bool>()) {
        let theme = Theme::from_dark_mode(dark);
        prop_assert_eq!(palette_for(index, theme), palette_for(index % 5, theme));
        prop_assert!(palette_for(index, theme).validate().is_ok());
    }
}
