use perfectbrew_core::{
    AdjustmentCategory, CoffeeDescriptor, FlavorTag, KnowledgeBase, Process, RoastLevel,
};
use perfectbrew_engine::feedback::{BrewTimeMatch, FlowRate, FollowedRecipe};
use perfectbrew_engine::{Diagnostician, ExtractionDirection, FeedbackRecord, TargetCalculator};
use proptest::prelude::*;

fn arb_roast() -> impl Strategy<Value = RoastLevel> {
    prop_oneof![
        Just(RoastLevel::Light),
        Just(RoastLevel::Medium),
        Just(RoastLevel::Dark),
    ]
}

fn arb_process() -> impl Strategy<Value = Process> {
    prop_oneof![
        Just(Process::Washed),
        Just(Process::Natural),
        Just(Process::Honey),
        Just(Process::Anaerobic),
        Just(Process::Other),
    ]
}

fn arb_variety() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "Geisha",
            "Pink Bourbon",
            "Bourbon",
            "SL28",
            "Ethiopian Heirloom",
            "Pacamara",
            "",
        ])
        .prop_map(String::from),
        "[a-zA-Z ]{0,12}",
    ]
}

fn arb_coffee() -> impl Strategy<Value = CoffeeDescriptor> {
    (
        arb_variety(),
        arb_process(),
        arb_roast(),
        prop::option::of(0u32..3000),
        prop::sample::subsequence(FlavorTag::ALL.to_vec(), 0..8),
    )
        .prop_map(|(variety, process, roast, altitude, tags)| {
            let altitude = altitude.map(|m| format!("{m} masl")).unwrap_or_default();
            CoffeeDescriptor::new("Sample")
                .with_variety(variety)
                .with_process(process)
                .with_roast(roast)
                .with_altitude(altitude)
                .with_tags(&tags)
        })
}

fn arb_method() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "V60",
        "Chemex",
        "AeroPress",
        "French Press",
        "Espresso",
        "V60 Kasuya",
        "Kalita Wave",
        "",
    ])
}

fn arb_feedback() -> impl Strategy<Value = FeedbackRecord> {
    let slider = || prop::option::of(0.0f64..=5.0);
    let defect = prop::option::of(prop::sample::select(vec![
        "None (Balanced)",
        "Sour/Tart",
        "Bitter/Dry",
        "Weak/Watery",
        "Strong/Heavy",
        "Hollow",
        "Smoky",
    ]));
    let body = prop::option::of(prop::sample::select(vec!["Light", "Medium", "Full", "medio"]));
    let followed = prop::option::of(prop_oneof![
        Just(FollowedRecipe::Yes),
        Just(FollowedRecipe::Mostly),
        Just(FollowedRecipe::No),
    ]);
    let brew_time = prop::option::of(prop_oneof![
        Just(BrewTimeMatch::AsExpected),
        Just(BrewTimeMatch::TooLong),
        Just(BrewTimeMatch::TooShort),
    ]);
    let flow = prop::option::of(prop_oneof![
        Just(FlowRate::Normal),
        Just(FlowRate::TooFast),
        Just(FlowRate::TooSlow),
    ]);

    (slider(), slider(), slider(), body, defect, followed, brew_time, flow).prop_map(
        |(acidity, sweetness, bitterness, body, defect, followed, brew_time, flow)| FeedbackRecord {
            acidity_level: acidity,
            sweetness_level: sweetness,
            bitterness_level: bitterness,
            body: body.map(String::from),
            defect: defect.map(String::from),
            followed_recipe: followed,
            brew_time,
            flow_rate: flow,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn target_scalars_stay_in_unit_range(coffee in arb_coffee()) {
        let kb = KnowledgeBase::builtin();
        let t = TargetCalculator::new(&kb).compute(&coffee);
        for v in [t.clarity, t.acidity, t.sweetness, t.body] {
            prop_assert!((0.0..=1.0).contains(&v), "{v} out of range for {coffee:?}");
        }
    }

    #[test]
    fn confidence_is_bounded(
        coffee in prop::option::of(arb_coffee()),
        method in arb_method(),
        fb in arb_feedback(),
    ) {
        let result = Diagnostician::default().diagnose(coffee.as_ref(), method, &fb);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert_eq!(result.confidence, result.unified.confidence);
    }

    #[test]
    fn adjustments_sorted_by_rank(
        coffee in prop::option::of(arb_coffee()),
        method in arb_method(),
        fb in arb_feedback(),
    ) {
        let result = Diagnostician::default().diagnose(coffee.as_ref(), method, &fb);
        let ranks: Vec<u32> = result.unified.adjustments.iter().map(|a| a.rank).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");
        prop_assert!(ranks.iter().all(|&r| r >= 1));
        prop_assert!(result.unified.adjustments.iter().all(|a| a.impact_percent <= 100));
        prop_assert_eq!(result.recommendations.len(), result.unified.adjustments.len());
    }

    #[test]
    fn adjustments_follow_a_single_direction(
        coffee in prop::option::of(arb_coffee()),
        method in arb_method(),
        fb in arb_feedback(),
    ) {
        use AdjustmentCategory::*;

        let result = Diagnostician::default().diagnose(coffee.as_ref(), method, &fb);
        let items = &result.unified.adjustments;

        match result.direction() {
            ExtractionDirection::Increase => {
                prop_assert!(items.iter().all(|a| matches!(a.category, Grind | Temperature | Time | Technique)));
                prop_assert!(items.iter().all(|a| !a.suggested_change.contains("coarser")
                    && !a.suggested_change.starts_with("Lower")
                    && !a.suggested_change.starts_with("Reduce")));
            }
            ExtractionDirection::Decrease => {
                prop_assert!(items.iter().all(|a| matches!(a.category, Grind | Temperature | Time | Technique)));
                prop_assert!(items.iter().all(|a| !a.suggested_change.contains("finer")
                    && !a.suggested_change.starts_with("Increase")
                    && !a.suggested_change.starts_with("Extend")));
            }
            ExtractionDirection::AdjustStrength => {
                prop_assert!(items.iter().all(|a| matches!(a.category, Dose | Ratio)));
                prop_assert_eq!(items.len(), 2);
            }
            ExtractionDirection::ImproveTechnique => {
                prop_assert!(!items.is_empty());
                prop_assert!(items.iter().all(|a| a.category == Technique));
            }
            ExtractionDirection::Balanced => {
                prop_assert!(items.len() <= 1);
                prop_assert!(items.iter().all(|a| a.category == Grind && a.suggested_change.contains("1 click")));
                if coffee.is_none() {
                    prop_assert!(items.is_empty());
                }
            }
        }
    }

    #[test]
    fn dimension_advice_never_contradicts_direction(
        coffee in arb_coffee(),
        method in arb_method(),
        fb in arb_feedback(),
    ) {
        let result = Diagnostician::default().diagnose(Some(&coffee), method, &fb);
        for rec in &result.dimension_recommendations {
            prop_assert_ne!(rec.current_level.as_str(), "Perfect");
            match result.direction() {
                ExtractionDirection::Decrease => {
                    prop_assert!(!rec.advice.contains("more extraction"), "{}", rec.advice);
                }
                ExtractionDirection::Increase => {
                    prop_assert!(!rec.advice.contains("pull back on extraction"), "{}", rec.advice);
                }
                _ => {}
            }
        }
    }
}
