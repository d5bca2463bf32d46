mod common;

use common::{date, dual_digital, vanilla};
use hedgeblotter::domain::{Decimal, Logic, PayoffType, PriceSeries, PriceSnapshot, Side, Ticker, Trade};
use hedgeblotter::engine::{expire_worthless, summarize, unwind};
use hedgeblotter::report::{build_report, referenced_tickers, render_text};
use hedgeblotter::{MockPriceSource, PriceSource, PriceSourceError};

fn blotter() -> (Vec<hedgeblotter::VanillaTrade>, Vec<hedgeblotter::ExoticTrade>) {
    let v = vec![
        vanilla("T1", Side::Buy, PayoffType::Call, 600),
        vanilla("T3", Side::Sell, PayoffType::Put, 550),
    ];
    let e = vec![
        dual_digital("T1", Side::Buy, Logic::And),
        dual_digital("T2", Side::Sell, Logic::Or),
    ];
    (v, e)
}

#[tokio::test]
async fn test_report_with_batched_prices() {
    let (v, e) = blotter();
    let source = MockPriceSource::new()
        .with_price("SPY US Equity", Decimal::from(610))
        .with_price("SPX", Decimal::from(4600))
        .with_price("VIX", Decimal::from(18));

    let tickers = referenced_tickers(&v, &e);
    assert_eq!(
        tickers,
        vec![
            Ticker::new("SPY US Equity"),
            Ticker::new("SPY"),
            Ticker::new("SPX"),
            Ticker::new("VIX"),
        ]
    );

    let prices = source.fetch_current(&tickers).await.unwrap();
    let report = build_report(&v, &e, &[], Some(&prices), None).unwrap();

    assert_eq!(report.reconciliation.matched.len(), 1);
    assert_eq!(report.reconciliation.vanilla_only.len(), 1);
    assert_eq!(report.reconciliation.exotic_only.len(), 1);
    assert_eq!(report.trades.len(), 4);

    let t1_vanilla = &report.trades[0];
    assert_eq!(t1_vanilla.description.is_in_the_money, Some(true));
    assert_eq!(t1_vanilla.rooting, vec!["Rooting for SPY US Equity to go HIGHER"]);

    // Sold OR digital with both legs true: the seller is losing.
    let t2 = &report.trades[3];
    assert_eq!(t2.trade_id.as_str(), "T2");
    assert_eq!(t2.description.is_in_the_money, Some(false));
    assert_eq!(
        t2.rooting,
        vec!["Rooting for SPX to go LOWER", "Rooting for VIX to go HIGHER"]
    );

    let text = render_text(&report);
    assert!(text.contains("Matched: 1 | Vanilla only: 1 | Exotic only: 1"));
    assert!(text.contains("  = T1"));
    assert!(text.contains("  > T2"));
}

#[tokio::test]
async fn test_report_from_history_as_of_date() {
    let (v, e) = blotter();
    let spx = PriceSeries::new(
        Ticker::new("SPX"),
        vec![
            (date(2025, 3, 3), Decimal::from(4400)),
            (date(2025, 3, 4), Decimal::from(4600)),
        ],
    );
    let source = MockPriceSource::new().with_history(spx);

    let tickers = referenced_tickers(&v, &e);
    let history = source
        .fetch_history(&tickers, date(2025, 1, 1), date(2025, 3, 31))
        .await
        .unwrap();
    let prices = PriceSnapshot::from_series(&history, Some(date(2025, 3, 3)));

    let report = build_report(&v, &e, &[], Some(&prices), Some(date(2025, 3, 3))).unwrap();

    // VIX has no history, so neither digital can be evaluated.
    for view in report.trades.iter().filter(|t| t.source.to_string() == "exotic") {
        assert_eq!(view.description.is_in_the_money, None);
        assert_eq!(view.description.lookup_errors.len(), 1);
    }
    // SPY has no history either.
    assert_eq!(report.trades[0].description.lookup_errors.len(), 1);
    assert!(render_text(&report).contains("As of: 2025-03-03"));
}

#[tokio::test]
async fn test_price_source_failure_surfaces() {
    let source = MockPriceSource::new().failing("terminal offline");
    let err = source.fetch_current(&[Ticker::new("SPX")]).await.unwrap_err();
    assert!(matches!(err, PriceSourceError::Unavailable(_)));
}

#[test]
fn test_report_json_shape() {
    let (v, e) = blotter();
    let report = build_report(&v, &e, &[], None, None).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["total_live_trades"], 4);
    assert_eq!(json["reconciliation"]["matched"][0]["trade_id"], "T1");
    assert_eq!(json["trades"][0]["description"]["is_in_the_money"], serde_json::Value::Null);
}

#[test]
fn test_summary_includes_closed_trades() {
    let (v, e) = blotter();
    let closed = vec![
        unwind(
            Trade::from(vanilla("OLD-1", Side::Buy, PayoffType::Call, 500)),
            date(2025, 2, 1),
            Decimal::from(150),
            None,
        )
        .unwrap(),
        expire_worthless(
            Trade::from(dual_digital("OLD-2", Side::Buy, Logic::And)),
            date(2025, 12, 19),
        )
        .unwrap(),
    ];

    let s = summarize(&v, &e, &closed);
    assert_eq!(s.live_vanilla_trades, 2);
    assert_eq!(s.live_exotic_trades, 2);
    assert_eq!(s.contracts, Decimal::from(200));
    assert_eq!(s.notional_mm, Decimal::from(10));
    assert_eq!(s.cost_usd, Decimal::from(40_000));
    assert_eq!(s.trade_history_count, 2);
    // 150 x 100 contracts - 10,000 cost, then -10,000 for the expired digital.
    assert_eq!(s.realized_pnl_usd, Decimal::from(-5_000));
}
