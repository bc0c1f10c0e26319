//! Property tests for invariants that must hold for any seed or input.

use arcade_sim::core::config::{BalloonDifficulty, CrashConfig, PlinkoRisk};
use arcade_sim::games::crash::sample_crash_point;
use arcade_sim::games::minesweeper::BoardLayout;
use arcade_sim::games::plinko::simulate_drop;
use arcade_sim::{BalloonGame, BettingGame, CrashGame, GameRng, Minesweeper, PlinkoGame};
use proptest::prelude::*;

fn arb_crash_config() -> impl Strategy<Value = CrashConfig> {
    (
        prop_oneof![
            Just(CrashConfig::aviator()),
            Just(CrashConfig::jet_x()),
            Just(CrashConfig::pushpa()),
        ],
        2.0f64..200.0,
    )
        .prop_map(|(config, cap)| config.with_cap(cap))
}

fn arb_difficulty() -> impl Strategy<Value = BalloonDifficulty> {
    prop_oneof![
        Just(BalloonDifficulty::Easy),
        Just(BalloonDifficulty::Medium),
        Just(BalloonDifficulty::Hard),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Crash points never exceed the configured cap and never go below 1.
    #[test]
    fn prop_crash_point_within_cap(config in arb_crash_config(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        for _ in 0..100 {
            let point = sample_crash_point(&config, &mut rng);
            prop_assert!(point.value >= 1.0);
            prop_assert!(point.value <= config.cap, "{} over cap {}", point.value, config.cap);
        }
    }

    /// The balance never goes negative however the player bets.
    #[test]
    fn prop_crash_balance_non_negative(
        seed in any::<u64>(),
        bets in prop::collection::vec((1.0f64..2000.0, prop::option::of(1.01f64..20.0)), 1..20),
    ) {
        let mut game = CrashGame::new(CrashConfig::aviator(), seed).unwrap();
        for (amount, target) in bets {
            let before = game.balance();
            match game.play_round(amount, target) {
                Ok(record) => prop_assert!(record.settlement.payout >= 0.0),
                Err(_) => prop_assert_eq!(game.balance(), before),
            }
            prop_assert!(game.balance() >= 0.0);
        }
    }

    /// Balloon multipliers stay under the difficulty's ceiling.
    #[test]
    fn prop_balloon_multiplier_capped(
        seed in any::<u64>(),
        difficulty in arb_difficulty(),
        pumps in 1usize..60,
    ) {
        let mut game = BalloonGame::new(Default::default(), seed).unwrap();
        game.set_difficulty(difficulty).unwrap();
        game.set_bet(10.0).unwrap();
        game.start().unwrap();
        for _ in 0..pumps {
            if game.pump().is_err() || !game.is_active() {
                break;
            }
            prop_assert!(game.multiplier() <= difficulty.risk().max_multiplier);
        }
        prop_assert!(game.balance() >= 0.0);
    }

    /// Plinko always lands in a slot of the current table.
    #[test]
    fn prop_plinko_slot_in_table(seed in any::<u64>(), rows in 8usize..=16) {
        let mut rng = GameRng::new(seed);
        for risk in [PlinkoRisk::Low, PlinkoRisk::Medium, PlinkoRisk::High] {
            let slots = risk.multipliers().len();
            prop_assert!(simulate_drop(rows, slots, &mut rng).slot < slots);
        }
    }

    /// Plinko never pays out more than the table's best multiplier.
    #[test]
    fn prop_plinko_payout_bounded(seed in any::<u64>(), amount in 1.0f64..100.0) {
        let mut game = PlinkoGame::new(Default::default(), seed).unwrap();
        let drop = game.drop_ball(amount).unwrap();
        prop_assert!(drop.winnings <= amount * 5.6);
        prop_assert!(game.balance() >= 0.0);
    }

    /// Every cell's count equals the mines around it.
    #[test]
    fn prop_minesweeper_counts(
        seed in any::<u64>(),
        rows in 2usize..20,
        cols in 2usize..20,
        density in 0.0f64..0.9,
    ) {
        let mines = ((rows * cols) as f64 * density) as usize;
        let layout = BoardLayout::custom(rows, cols, mines).unwrap();
        let mut rng = GameRng::new(seed);
        let game = Minesweeper::new(layout, &mut rng).unwrap();
        let board = game.board();

        prop_assert_eq!(board.iter().filter(|(_, c)| c.is_mine).count(), mines);
        for (pos, cell) in board.iter() {
            let around = board.neighbors8(pos).iter().filter(|n| board[**n].is_mine).count();
            prop_assert_eq!(cell.neighbor_mines as usize, around);
        }
    }
}
