//! Betting game integration tests.
//!
//! These tests drive whole rounds through the public API and check that
//! wallets, round histories and configuration agree across games.

use arcade_sim::core::config::{BalloonConfig, BalloonDifficulty, CrashConfig, PlinkoRisk};
use arcade_sim::games::balloons::PumpOutcome;
use arcade_sim::games::cock_fight::Side;
use arcade_sim::games::color_prediction::{Color, Pick};
use arcade_sim::games::crash::{BetSlot, CrashEvent, CrashPhase};
use arcade_sim::{
    ArcadeConfig, ArcadeError, BalloonGame, BettingGame, CockFightGame, ColorPredictionGame, CrashGame, GameKind,
    Outcome, PlinkoGame,
};

/// Starting balance plus the net of every recorded round.
fn assert_books_balance(game: &dyn BettingGame, starting: f64) {
    let expected = starting + game.recent_net();
    assert!(
        (game.balance() - expected).abs() < 1e-6,
        "{}: balance {} != {}",
        game.kind(),
        game.balance(),
        expected
    );
}

// =============================================================================
// Crash games
// =============================================================================

/// Test that the same seed replays the same crash points.
#[test]
fn test_crash_rounds_replay_from_seed() {
    let mut a = CrashGame::new(CrashConfig::aviator(), 77).unwrap();
    let mut b = CrashGame::new(CrashConfig::aviator(), 77).unwrap();

    for _ in 0..10 {
        let ra = a.play_round(10.0, Some(1.5)).unwrap();
        let rb = b.play_round(10.0, Some(1.5)).unwrap();
        assert_eq!(ra, rb);
    }
    assert_eq!(
        a.crash_history().iter().collect::<Vec<_>>(),
        b.crash_history().iter().collect::<Vec<_>>()
    );
}

/// Test that every crash profile keeps its multiplier under its cap.
#[test]
fn test_crash_profiles_respect_cap() {
    for config in [CrashConfig::aviator(), CrashConfig::jet_x(), CrashConfig::pushpa()] {
        let cap = config.cap;
        let mut game = CrashGame::new(config.with_starting_balance(1_000_000.0), 5).unwrap();
        for _ in 0..50 {
            game.play_round(1.0, None).unwrap();
        }
        assert!(game.crash_history().iter().all(|m| *m <= cap && *m >= 1.0));
    }
}

/// Test that a fixed target either wins exactly at the target or loses.
#[test]
fn test_crash_target_cash_out() {
    let mut game = CrashGame::new(CrashConfig::aviator(), 12).unwrap();
    for _ in 0..15 {
        let record = game.play_round(10.0, Some(2.0)).unwrap();
        match record.outcome() {
            Outcome::Win => assert!(record.settlement.multiplier >= 2.0),
            Outcome::Loss => assert_eq!(record.settlement.payout, 0.0),
        }
    }
    assert_books_balance(&game, 3000.0);
}

/// Test the manual round: countdown, two slots, one cashed, one lost.
#[test]
fn test_crash_two_slots_manual_round() {
    let config = CrashConfig::aviator().with_countdown(2);
    let mut game = CrashGame::new(config, 3).unwrap();

    game.place_bet(BetSlot::First, 100.0).unwrap();
    game.place_bet(BetSlot::Second, 50.0).unwrap();
    assert_eq!(game.balance(), 2850.0);

    assert_eq!(game.tick_second(), CrashEvent::Counting(1));
    assert_eq!(game.tick_second(), CrashEvent::TookOff);
    assert_eq!(game.phase(), CrashPhase::Flying);

    // Cash out slot 1 right away at 1.00x.
    let record = game.cash_out(BetSlot::First).unwrap();
    assert_eq!(record.settlement.payout, 100.0);

    while !matches!(game.tick(), CrashEvent::Ended { .. }) {}
    assert!(matches!(game.phase(), CrashPhase::Crashed | CrashPhase::FlewAway));
    assert_eq!(game.balance(), 2950.0);
    assert_eq!(game.recent_wins(), 1);
    assert_eq!(game.rounds().len(), 2);

    assert!(matches!(
        game.place_bet(BetSlot::First, 1.0),
        Err(ArcadeError::WrongPhase(_))
    ));
    game.next_round().unwrap();
    assert_eq!(game.phase(), CrashPhase::Waiting);
}

// =============================================================================
// Other betting games
// =============================================================================

/// Test that balloons pop or cash out and the books stay balanced.
#[test]
fn test_balloon_session() {
    let config = BalloonConfig {
        history_len: 30,
        ..BalloonConfig::default()
    };
    let mut game = BalloonGame::new(config, 8).unwrap();
    game.set_difficulty(BalloonDifficulty::Easy).unwrap();
    game.set_bet(10.0).unwrap();

    for _ in 0..30 {
        game.select_target(1.55).unwrap();
        game.start().unwrap();
        loop {
            match game.pump().unwrap() {
                PumpOutcome::Inflated(_) => continue,
                PumpOutcome::Popped | PumpOutcome::AutoCashedOut(_) => break,
            }
        }
        assert!(!game.is_active());
    }
    assert_books_balance(&game, 1000.0);
}

/// Test that color and cock-fight bets settle once per draw.
#[test]
fn test_period_games_settle_once() {
    let mut colors = ColorPredictionGame::new(Default::default(), 1).unwrap();
    let mut fights = CockFightGame::new(Default::default(), 1).unwrap();

    for round in 0..8 {
        colors.place_bet(Pick::Color(Color::Red), 10.0).unwrap();
        colors.draw();

        fights.place_bet(Side::Blue, 10.0).unwrap();
        fights.fight().unwrap();
        fights.next_round().unwrap();

        assert_eq!(colors.rounds().len(), round + 1);
        assert_eq!(fights.rounds().len(), round + 1);
    }
    assert_books_balance(&colors, 2000.0);
    assert_books_balance(&fights, 1000.0);
}

/// Test that plinko winnings are floored and the books stay balanced.
#[test]
fn test_plinko_session() {
    let mut game = PlinkoGame::new(Default::default(), 4).unwrap();
    game.set_risk(PlinkoRisk::High);
    for _ in 0..10 {
        let drop = game.drop_ball(3.0).unwrap();
        assert_eq!(drop.winnings.fract(), 0.0);
    }
    assert_books_balance(&game, 1000.0);
}

/// Test that different games report their kinds through the trait.
#[test]
fn test_trait_objects() {
    let games: Vec<Box<dyn BettingGame>> = vec![
        Box::new(CrashGame::new(CrashConfig::jet_x(), 1).unwrap()),
        Box::new(CrashGame::new(CrashConfig::pushpa(), 1).unwrap()),
        Box::new(BalloonGame::new(Default::default(), 1).unwrap()),
        Box::new(PlinkoGame::new(Default::default(), 1).unwrap()),
    ];
    let kinds: Vec<GameKind> = games.iter().map(|g| g.kind()).collect();
    assert_eq!(
        kinds,
        vec![GameKind::JetX, GameKind::Pushpa, GameKind::Balloons, GameKind::Plinko]
    );
    assert!(games.iter().all(|g| g.rounds().is_empty() && g.recent_net() == 0.0));
}

// =============================================================================
// Configuration
// =============================================================================

/// Test that a partial JSON document fills the rest from defaults.
#[test]
fn test_config_from_partial_json() {
    let config = ArcadeConfig::from_json(
        r#"{
            "plinko": { "rows": 12, "risk": "high" },
            "balloons": { "difficulty": "medium" },
            "cock_fight": { "countdown_secs": 5 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.plinko.rows, 12);
    assert_eq!(config.plinko.risk, PlinkoRisk::High);
    assert_eq!(config.plinko.starting_balance, 1000.0);
    assert_eq!(config.balloons.difficulty, BalloonDifficulty::Medium);
    assert_eq!(config.cock_fight.countdown_secs, 5);
    assert_eq!(config.aviator, CrashConfig::aviator());

    let mut fights = CockFightGame::new(config.cock_fight, 2).unwrap();
    for _ in 0..4 {
        fights.tick_second();
    }
    assert_eq!(fights.countdown(), 1);
}

/// Test that invalid values are rejected after parsing.
#[test]
fn test_config_rejects_invalid_values() {
    let err = ArcadeConfig::from_json(r#"{ "plinko": { "rows": 30 } }"#).unwrap_err();
    assert!(matches!(err, ArcadeError::InvalidConfig(_)));

    let err = ArcadeConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, ArcadeError::InvalidConfig(_)));
}

/// Test that the default configuration survives a JSON round trip.
#[test]
fn test_config_json_round_trip() {
    let config = ArcadeConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed = ArcadeConfig::from_json(&json).unwrap();

    assert_eq!(parsed.plinko, config.plinko);
    assert_eq!(parsed.match3, config.match3);
    assert_eq!(parsed.balloons, config.balloons);
    assert_eq!(parsed.jet_x.kind, GameKind::JetX);
    assert_eq!(parsed.pushpa.tiers.len(), config.pushpa.tiers.len());
    assert_eq!(parsed.color_prediction.first_period, 312089);
}
