use super::*;

#[test]
fn defaults_favor_rarity_and_uniqueness() {
    let opts = GenerateOpts::default();
    assert!(opts.respect_rarity);
    assert!(opts.avoid_duplicates);
    assert_eq!(opts.overflow, OverflowPolicy::Reject);
    assert_eq!(opts.sampling, SamplingStrategy::Cumulative);
    assert_eq!(opts.max_duplicate_streak, DEFAULT_MAX_DUPLICATE_STREAK);
    opts.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let opts: GenerateOpts = serde_json::from_str(r#"{ "size": 10, "seed": 42 }"#).unwrap();
    assert_eq!(opts, GenerateOpts::new(10, 42));
}

#[test]
fn strategy_and_policy_use_snake_case() {
    let opts: GenerateOpts = serde_json::from_str(
        r#"{
            "overflow": "clamp",
            "sampling": { "kind": "stochastic_acceptance", "max_attempts": 8 }
        }"#,
    )
    .unwrap();
    assert_eq!(opts.overflow, OverflowPolicy::Clamp);
    assert_eq!(
        opts.sampling,
        SamplingStrategy::StochasticAcceptance { max_attempts: 8 }
    );
}

#[test]
fn zero_attempt_budget_is_rejected() {
    let opts = GenerateOpts {
        sampling: SamplingStrategy::StochasticAcceptance { max_attempts: 0 },
        ..GenerateOpts::default()
    };
    assert!(matches!(
        opts.validate(),
        Err(LayerforgeError::Validation(_))
    ));
}

#[test]
fn zero_duplicate_streak_is_rejected() {
    let opts = GenerateOpts {
        max_duplicate_streak: 0,
        ..GenerateOpts::default()
    };
    assert!(opts.validate().is_err());
}
