mod common;

use common::{dual_digital, leg, vanilla};
use hedgeblotter::domain::{
    Condition, Decimal, Direction, Logic, PayoffType, PriceSnapshot, Side, Ticker, Trade,
};
use hedgeblotter::engine::{describe, describe_exotic, describe_vanilla, rooting_for};
use hedgeblotter::DataError;

fn px(v: &str) -> Decimal {
    Decimal::parse_amount(v).unwrap()
}

#[test]
fn test_buy_call_in_the_money_boundary() {
    let trade = vanilla("T1", Side::Buy, PayoffType::Call, 100);

    let above = describe_vanilla(&trade, Some(px("105")));
    assert_eq!(above.is_in_the_money, Some(true));
    assert_eq!(
        above.text,
        "Buyer needs SPY to be above 100 at expiry. Currently 105 (5 above strike): in the money."
    );

    let below = describe_vanilla(&trade, Some(px("95")));
    assert_eq!(below.is_in_the_money, Some(false));
    assert!(below.text.ends_with("Currently 95 (5 below strike): out of the money."));

    // Strict inequality: sitting on the strike is not in the money.
    let at = describe_vanilla(&trade, Some(px("100.00")));
    assert_eq!(at.is_in_the_money, Some(false));
    assert!(at.text.ends_with("Currently 100 (at strike): out of the money."));
}

#[test]
fn test_direction_for_all_four_combinations() {
    let cases = [
        (Side::Buy, PayoffType::Call, "Buyer needs SPY to be above 100 at expiry."),
        (Side::Buy, PayoffType::Put, "Buyer needs SPY to be below 100 at expiry."),
        (Side::Sell, PayoffType::Call, "Seller needs SPY to be below 100 at expiry."),
        (Side::Sell, PayoffType::Put, "Seller needs SPY to be above 100 at expiry."),
    ];
    for (side, payoff, expected) in cases {
        let trade: Trade = vanilla("T", side, payoff, 100).into();
        let d = describe(&trade, None).unwrap();
        assert_eq!(d.text, expected);
        assert_eq!(d.is_in_the_money, None);
    }
}

#[test]
fn test_call_spread_names_the_short_strike() {
    let mut trade = vanilla("CS1", Side::Buy, PayoffType::CallSpread, 600);
    trade.strike2 = Some(px("650"));

    let d = describe_vanilla(&trade, Some(px("620")));
    assert_eq!(
        d.text,
        "Buyer needs SPY to be above 600 at expiry (call spread, short strike 650). \
Currently 620 (20 above strike): in the money."
    );
    assert_eq!(d.is_in_the_money, Some(true));

    let sold: Trade = vanilla("PS1", Side::Sell, PayoffType::PutSpread, 550).into();
    let d = describe(&sold, None).unwrap();
    assert_eq!(d.text, "Seller needs SPY to be above 550 at expiry (put spread).");
    assert_eq!(
        rooting_for(&sold, &Ticker::new("SPY")).unwrap().direction,
        Direction::Above
    );
}

#[test]
fn test_sell_put_at_strike_is_out_of_the_money() {
    let trade = vanilla("T", Side::Sell, PayoffType::Put, 100);
    assert_eq!(
        describe_vanilla(&trade, Some(px("100"))).is_in_the_money,
        Some(false)
    );
    assert_eq!(
        describe_vanilla(&trade, Some(px("100.01"))).is_in_the_money,
        Some(true)
    );
}

#[test]
fn test_dual_digital_both_legs_true() {
    let trade = dual_digital("DD1", Side::Buy, Logic::And);
    let prices = PriceSnapshot::new()
        .with_price("SPX", px("4600"))
        .with_price("VIX", px("18"));

    let d = describe_exotic(&trade, Some(&prices)).unwrap();
    assert_eq!(d.is_in_the_money, Some(true));
    assert!(d.text.contains("SPX above 4500 and VIX below 20"));
    assert_eq!(
        d.text,
        "Buyer needs SPX above 4500 and VIX below 20 to hold at expiry. \
Currently SPX at 4600 (met), VIX at 18 (met): condition holds, in the money."
    );
    assert!(d.lookup_errors.is_empty());
}

#[test]
fn test_dual_digital_and_versus_or() {
    let prices = PriceSnapshot::new()
        .with_price("SPX", px("4600"))
        .with_price("VIX", px("25"));

    let and = describe_exotic(&dual_digital("DD", Side::Buy, Logic::And), Some(&prices)).unwrap();
    assert_eq!(and.is_in_the_money, Some(false));

    let or = describe_exotic(&dual_digital("DD", Side::Buy, Logic::Or), Some(&prices)).unwrap();
    assert_eq!(or.is_in_the_money, Some(true));
    assert!(or.text.contains("SPX above 4500 or VIX below 20"));
}

#[test]
fn test_dual_digital_seller_polarity() {
    let prices = PriceSnapshot::new()
        .with_price("SPX", px("4600"))
        .with_price("VIX", px("18"));

    let d = describe_exotic(&dual_digital("DD", Side::Sell, Logic::And), Some(&prices)).unwrap();
    assert!(d.text.starts_with("Seller needs SPX above 4500 and VIX below 20 to fail at expiry."));
    assert_eq!(d.is_in_the_money, Some(false));
}

#[test]
fn test_missing_leg_price_degrades_to_text_only() {
    let trade: Trade = dual_digital("DD", Side::Buy, Logic::And).into();
    let prices = PriceSnapshot::new().with_price("SPX", px("4600"));

    let d = describe(&trade, Some(&prices)).unwrap();
    assert_eq!(d.is_in_the_money, None);
    assert_eq!(d.text, "Buyer needs SPX above 4500 and VIX below 20 to hold at expiry.");
    assert_eq!(d.lookup_errors.len(), 1);
    assert_eq!(d.lookup_errors[0].ticker, Ticker::new("VIX"));
    assert_eq!(d.lookup_errors[0].trade_id.as_str(), "DD");
}

#[test]
fn test_leg_count_is_a_data_error() {
    let mut trade = dual_digital("DD", Side::Buy, Logic::And);
    trade.legs.push(leg("NDX", Condition::AtOrAbove, 15000));

    match describe_exotic(&trade, None) {
        Err(DataError::LegCount { found, .. }) => assert_eq!(found, 3),
        other => panic!("Expected LegCount, got {:?}", other),
    }

    trade.legs.clear();
    assert!(matches!(
        describe(&trade.into(), None),
        Err(DataError::LegCount { found: 0, .. })
    ));
}

#[test]
fn test_inclusive_condition_verb_and_evaluation() {
    let mut trade = dual_digital("DD", Side::Buy, Logic::And);
    trade.legs = vec![
        leg("SPX", Condition::AtOrAbove, 4500),
        leg("VIX", Condition::AtOrBelow, 20),
    ];
    let prices = PriceSnapshot::new()
        .with_price("SPX", px("4500"))
        .with_price("VIX", px("20"));

    let d = describe_exotic(&trade, Some(&prices)).unwrap();
    assert!(d.text.contains("SPX at or above 4500 and VIX at or below 20"));
    assert_eq!(d.is_in_the_money, Some(true));
}

#[test]
fn test_rooting_for_each_underlying() {
    let call: Trade = vanilla("V", Side::Buy, PayoffType::Call, 600).into();
    let r = rooting_for(&call, &Ticker::new("SPY US Equity")).unwrap();
    assert_eq!(r.direction, Direction::Above);
    assert_eq!(r.to_string(), "Rooting for SPY US Equity to go HIGHER");
    assert!(rooting_for(&call, &Ticker::new("QQQ")).is_none());

    let sold: Trade = dual_digital("DD", Side::Sell, Logic::And).into();
    assert_eq!(
        rooting_for(&sold, &Ticker::new("VIX")).unwrap().direction,
        Direction::Above
    );
    let bought: Trade = dual_digital("DD", Side::Buy, Logic::And).into();
    assert_eq!(
        rooting_for(&bought, &Ticker::new("VIX")).unwrap().to_string(),
        "Rooting for VIX to go LOWER"
    );
}

#[test]
fn test_description_serializes_without_empty_errors() {
    let trade = vanilla("T1", Side::Buy, PayoffType::Call, 100);
    let d = describe_vanilla(&trade, Some(px("105")));
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["trade_id"], "T1");
    assert_eq!(json["is_in_the_money"], true);
    assert!(json.get("lookup_errors").is_none());
}
