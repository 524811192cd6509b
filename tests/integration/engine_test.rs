//! End-to-end tests for the engine facade

use chrono::{Duration, Utc};
use linemaven::bets::Bet;
use linemaven::compare::MarketComparison;
use linemaven::config::Config;
use linemaven::engine::OddsEngine;
use linemaven::injury::{InjuryBoard, InjuryRecord, InjuryStatus};
use linemaven::odds::{OddsQuote, Side};
use linemaven::store::{SnapshotStore, StoreError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn engine() -> OddsEngine {
    OddsEngine::new(
        Arc::new(SnapshotStore::new()),
        Arc::new(InjuryBoard::new()),
        &Config::default(),
    )
    .unwrap()
}

fn quote(
    bookmaker: &str,
    side: Side,
    price: Decimal,
    observed_at: chrono::DateTime<Utc>,
) -> OddsQuote {
    OddsQuote::from_decimal(
        "g1",
        "total",
        "145.5",
        side,
        bookmaker,
        dec!(145.5),
        price,
        observed_at,
    )
    .unwrap()
}

#[tokio::test]
async fn test_quote_to_sized_pick_flow() {
    let engine = engine();
    let now = Utc::now();

    engine
        .ingest(quote("alpha", Side::Over, dec!(2.10), now))
        .await
        .unwrap();
    engine
        .ingest(quote("beta", Side::Over, dec!(1.95), now))
        .await
        .unwrap();
    engine
        .ingest(quote("beta", Side::Under, dec!(2.15), now))
        .await
        .unwrap();

    // Comparator: best over is alpha, and the cross-book pair arbs.
    let comparison = engine
        .compare_bookmakers("g1", "total", "145.5")
        .await
        .unwrap();
    let MarketComparison::TwoWay(two_way) = comparison else {
        panic!("expected a two-way market");
    };
    let arb = two_way.arbitrage.expect("2.10/2.15 should arb");
    assert_eq!(arb.margin.round_dp(3), dec!(0.059));

    // Score the best over price against the model.
    let best_over = engine
        .get_current_odds("g1", "total", "145.5", Some("alpha"))
        .await
        .unwrap();
    let pick = engine
        .score_pick(&best_over, dec!(0.52), dec!(72), None)
        .unwrap();
    assert!(pick.positive_ev);
    assert_eq!(pick.ev_percentage.round_dp(1), dec!(9.2));

    // Size it: b = 1.10, f = (1.10 * 0.52 - 0.48) / 1.10.
    let sized = engine.size_bet(&pick).unwrap();
    assert!(sized.is_bet());
    assert_eq!(sized.kelly_fraction.round_dp(4), dec!(0.0836));

    // A single-leg parlay reproduces the pick exactly.
    let card = engine.combine_parlay(vec![pick.clone()]).unwrap();
    assert_eq!(card.combined_probability, pick.model_probability);
    assert_eq!(card.combined_decimal_odds, pick.quote.decimal_price);
    assert_eq!(card.combined_ev, pick.ev_percentage);

    // Bet lifecycle: no CLV until close, then positive when the market
    // moves toward the bettor.
    let mut bet = Bet::place(best_over, dec!(100)).unwrap();
    assert!(engine.compute_clv(&bet).is_none());
    bet.close(quote("alpha", Side::Over, dec!(2.00), now + Duration::hours(1)))
        .unwrap();
    let clv = engine.compute_clv(&bet).unwrap();
    assert_eq!(clv.round_dp(2), dec!(2.38));
}

#[tokio::test]
async fn test_movement_tracking_and_ordering() {
    let engine = engine();
    let now = Utc::now();

    engine
        .ingest(quote("alpha", Side::Over, dec!(1.9091), now - Duration::seconds(20)))
        .await
        .unwrap();
    engine
        .ingest(quote("alpha", Side::Over, dec!(1.9524), now))
        .await
        .unwrap();

    // A late quote is rejected without touching history.
    let err = engine
        .ingest(quote("alpha", Side::Over, dec!(1.80), now - Duration::seconds(60)))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::OutOfOrder { .. }));

    let movements = engine
        .get_movements("g1", "total", "145.5", "alpha", now - Duration::hours(1))
        .await;
    assert_eq!(movements.len(), 2);
    assert!(movements[0].prev_price.is_none());
    assert_eq!(movements[0].price_delta, dec!(0));
    assert_eq!(movements[1].price_delta, dec!(0.0433));
    assert_eq!(movements[1].odds_delta, 5);
}

#[tokio::test]
async fn test_stale_quotes_are_not_current() {
    let engine = engine();
    let stale = Utc::now() - Duration::minutes(30);

    engine
        .ingest(quote("alpha", Side::Over, dec!(1.9091), stale))
        .await
        .unwrap();

    // Default freshness window is two minutes.
    let current = engine
        .get_current_odds("g1", "total", "145.5", Some("alpha"))
        .await;
    assert!(current.is_none());
    let across_books = engine.get_current_odds("g1", "total", "145.5", None).await;
    assert!(across_books.is_none());
}

#[tokio::test]
async fn test_injury_gate_on_listings() {
    let engine = engine();
    let now = Utc::now();
    let q = quote("alpha", Side::Over, dec!(2.0), now);
    engine.ingest(q.clone()).await.unwrap();

    engine
        .record_injury(InjuryRecord {
            player_id: "star-guard".to_string(),
            status: InjuryStatus::Out,
            is_starter: true,
            probability: dec!(0.95),
            updated_at: now,
        })
        .await;
    engine
        .record_injury(InjuryRecord {
            player_id: "backup-wing".to_string(),
            status: InjuryStatus::Doubtful,
            is_starter: false,
            probability: dec!(0.6),
            updated_at: now,
        })
        .await;

    let on_out = engine
        .score_pick(&q, dec!(0.6), dec!(80), Some("star-guard".to_string()))
        .unwrap();
    let on_doubtful = engine
        .score_pick(&q, dec!(0.6), dec!(80), Some("backup-wing".to_string()))
        .unwrap();
    let clean = engine.score_pick(&q, dec!(0.6), dec!(80), None).unwrap();

    let surfaced = engine
        .surface_picks(vec![on_out, on_doubtful.clone(), clean])
        .await;
    // The OUT-dependent pick is gone, not down-weighted.
    assert_eq!(surfaced.len(), 2);
    assert_eq!(surfaced[0].pick.id, on_doubtful.id);
    assert_eq!(surfaced[0].advisory, Some(InjuryStatus::Doubtful));
    assert!(surfaced[1].advisory.is_none());
}
