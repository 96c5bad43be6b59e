use breadwinner_game::{
    AUTO_BAKER_ID, GameEvent, GameSession, MINIMUM_WAGE_ID, OVEN_ID, PurchaseError,
};

#[test]
fn ten_clicks_fund_the_first_baker() {
    let mut session = GameSession::new();
    for _ in 0..10 {
        session.click();
    }
    assert_eq!(session.state().loaves(), 10);

    let receipt = session.purchase(AUTO_BAKER_ID).expect("affordable");
    assert_eq!(receipt.cost, 10);
    assert_eq!(receipt.new_count, 1);
    assert!(session.state().balance.abs() < f64::EPSILON);
    assert_eq!(
        session.ledger().find(AUTO_BAKER_ID).expect("catalog entry").current_cost(),
        12
    );
}

#[test]
fn automatic_production_accumulates_while_clicking_stops() {
    let mut session = GameSession::new();
    for _ in 0..10 {
        session.click();
    }
    session.purchase(AUTO_BAKER_ID).expect("affordable");

    // One baker bakes 0.2/s; five seconds is exactly one loaf.
    let produced = session.tick(5.0);
    assert!((produced - 1.0).abs() < 1e-12);
    assert_eq!(session.state().loaves(), 1);
    assert!((session.state().lifetime_total - 11.0).abs() < 1e-9);
}

#[test]
fn oven_raises_the_click_yield() {
    let mut session = GameSession::new();
    for _ in 0..100 {
        session.click();
    }
    session.purchase(OVEN_ID).expect("affordable");
    assert!((session.state().per_click_yield - 2.0).abs() < f64::EPSILON);

    let granted = session.click();
    assert!((granted - 2.0).abs() < f64::EPSILON);
}

#[test]
fn wage_hike_grants_retro_bonus_and_rewrites_baker_effect() {
    let mut session = GameSession::new();
    // Fund three bakers (10 + 12 + 14 loaves) plus the wage hike.
    for _ in 0..600 {
        session.click();
    }
    for _ in 0..3 {
        session.purchase(AUTO_BAKER_ID).expect("affordable");
    }
    let rate_before = session.state().per_time_yield;
    assert!((rate_before - 0.6).abs() < 1e-12);
    session.drain_events();

    let receipt = session.purchase(MINIMUM_WAGE_ID).expect("affordable");
    assert_eq!(receipt.retargeted.as_deref(), Some(AUTO_BAKER_ID));
    // Three bakers at +0.3 each, on top of their original 0.6.
    assert!((session.state().per_time_yield - 1.5).abs() < 1e-12);

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::EffectRetargeted {
        source: MINIMUM_WAGE_ID.to_string(),
        target: AUTO_BAKER_ID.to_string(),
    }));

    // Every baker hired after the hike earns the stronger rate.
    let rate_before_hire = session.state().per_time_yield;
    session.purchase(AUTO_BAKER_ID).expect("affordable");
    assert!((session.state().per_time_yield - rate_before_hire - 0.5).abs() < 1e-12);
}

#[test]
fn rejected_purchases_are_idempotent() {
    let mut session = GameSession::new();
    session.click();
    let before = session.snapshot();

    for _ in 0..5 {
        let err = session.purchase(AUTO_BAKER_ID).unwrap_err();
        assert!(matches!(err, PurchaseError::InsufficientFunds { .. }));
    }
    assert_eq!(session.snapshot(), before);
}

#[test]
fn purchases_never_touch_lifetime_total() {
    let mut session = GameSession::new();
    for _ in 0..160 {
        session.click();
    }
    let lifetime = session.state().lifetime_total;
    session.purchase(AUTO_BAKER_ID).expect("affordable");
    session.purchase(OVEN_ID).expect("affordable");
    assert!((session.state().lifetime_total - lifetime).abs() < f64::EPSILON);
    assert!(session.state().lifetime_total >= session.state().balance);
}
