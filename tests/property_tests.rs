//! Progression properties over seeded random matches.

use chase_tag::core::{
    Match, MatchRules, MatchStatus, Player, PlayerId, RoundCandidate, TeamSide,
};
use chase_tag::error::MatchError;
use chase_tag::rules::score::recompute_scores;
use chase_tag::rules::ProgressionEngine;
use chase_tag::sim::{MatchSimulator, SimRng};
use proptest::prelude::*;

fn solo() -> Match {
    Match::one_v_one(Player::new(PlayerId::new(1), "Ann"), Player::new(PlayerId::new(2), "Bo"))
        .unwrap()
}

fn teams(red: u64, blue: u64) -> Match {
    Match::team(
        TeamSide::new("Red", (0..red).map(|i| Player::new(PlayerId::new(i), format!("r{i}")))),
        TeamSide::new(
            "Blue",
            (100..100 + blue).map(|i| Player::new(PlayerId::new(i), format!("b{i}"))),
        ),
    )
    .unwrap()
}

fn any_match() -> impl Strategy<Value = Match> {
    prop_oneof![
        Just(solo()),
        (1u64..=4, 1u64..=4).prop_map(|(red, blue)| teams(red, blue)),
    ]
}

fn simulate(m: &Match, seed: u64, evasion: f64, limit: usize) -> Match {
    MatchSimulator::default()
        .with_evasion_probability(evasion)
        .play_rounds(m, limit, &mut SimRng::new(seed))
        .unwrap()
}

proptest! {
    /// Recomputing twice changes nothing, and agrees with the append path.
    #[test]
    fn prop_recompute_idempotent(
        m in any_match(),
        seed in any::<u64>(),
        evasion in 0.0f64..=1.0,
        limit in 0usize..20,
    ) {
        let engine = ProgressionEngine::default();
        let played = simulate(&m, seed, evasion, limit);

        let once = engine.recompute(&played);
        prop_assert_eq!(&once, &played);
        prop_assert_eq!(engine.recompute(&once), once);
    }

    /// Stored scores always equal a replay over the round list.
    #[test]
    fn prop_scores_derivable(
        m in any_match(),
        seed in any::<u64>(),
        evasion in 0.0f64..=1.0,
        limit in 0usize..20,
    ) {
        let played = simulate(&m, seed, evasion, limit);
        let replayed = recompute_scores(played.kind(), played.rounds());
        prop_assert_eq!(&replayed, played.scores());
    }

    /// Regulation 1v1 rounds repeat round 0's pairing on even indices and
    /// swap it on odd ones.
    #[test]
    fn prop_one_v_one_alternation(seed in any::<u64>(), evasion in 0.0f64..=1.0) {
        let played = simulate(&solo(), seed, evasion, 6);
        let cap = MatchRules::one_v_one().round_cap;
        let first = played.rounds()[0].clone();

        for (i, round) in played.rounds().iter().enumerate().take(cap) {
            let expected = if i % 2 == 0 { first.evader } else { first.chaser };
            prop_assert_eq!(round.evader, expected);
        }
    }

    /// In regulation, an escaped evader evades again and a tagger evades next.
    #[test]
    fn prop_team_continuation(
        red in 1u64..=4,
        blue in 1u64..=4,
        seed in any::<u64>(),
        evasion in 0.0f64..=1.0,
    ) {
        let played = simulate(&teams(red, blue), seed, evasion, 18);
        let cap = MatchRules::team().round_cap;
        let rounds = played.rounds();

        for k in 1..rounds.len().min(cap) {
            let (prev, round) = (&rounds[k - 1], &rounds[k]);
            let expected = if prev.is_evasion() { prev.evader } else { prev.chaser };
            prop_assert_eq!(round.evader, expected);
        }
    }

    /// Once completed, every proposal is refused as locked.
    #[test]
    fn prop_completion_is_final(
        m in any_match(),
        seed in any::<u64>(),
        evasion in 0.0f64..=1.0,
    ) {
        let engine = ProgressionEngine::default();
        let done = MatchSimulator::default()
            .with_evasion_probability(evasion)
            .play(&m, &mut SimRng::new(seed))
            .unwrap();
        prop_assert!(done.is_completed());
        prop_assert!(done.winner().is_some());

        let rounds = done.rounds();
        let last = &rounds[rounds.len() - 1];
        for candidate in [
            RoundCandidate::evaded(last.evader, last.chaser),
            RoundCandidate::evaded(last.chaser, last.evader),
            RoundCandidate::tagged(last.chaser, last.evader, 1.0),
        ] {
            prop_assert_eq!(engine.propose_round(&done, candidate), Err(MatchError::MatchLocked));
        }
    }

    /// Status only moves forward while rounds are appended.
    #[test]
    fn prop_status_monotonic(
        m in any_match(),
        seed in any::<u64>(),
        evasion in 0.0f64..=1.0,
    ) {
        let sim = MatchSimulator::default().with_evasion_probability(evasion);
        let mut rng = SimRng::new(seed);
        let rank = |status: MatchStatus| match status {
            MatchStatus::InProgress => 0,
            MatchStatus::SuddenDeath => 1,
            MatchStatus::Completed(_) => 2,
        };

        let mut current = m;
        while let Some(candidate) = sim.next_candidate(&current, &mut rng) {
            let next = sim.engine().propose_round(&current, candidate).unwrap();
            prop_assert!(rank(next.status()) >= rank(current.status()));
            current = next;
        }
        prop_assert!(current.is_completed());
    }

    /// Undoing the last round of a finished match lands on the state the
    /// append path reached one round earlier.
    #[test]
    fn prop_delete_last_round_undoes_append(
        m in any_match(),
        seed in any::<u64>(),
        evasion in 0.0f64..=1.0,
    ) {
        let engine = ProgressionEngine::default();
        let sim = MatchSimulator::default().with_evasion_probability(evasion);
        let mut rng = SimRng::new(seed);

        let mut history = vec![m];
        while let Some(candidate) = sim.next_candidate(&history[history.len() - 1], &mut rng) {
            let next = engine.propose_round(&history[history.len() - 1], candidate).unwrap();
            history.push(next);
        }

        let done = &history[history.len() - 1];
        let undone = engine.delete_last_round(done).unwrap();
        prop_assert_eq!(&undone, &history[history.len() - 2]);
    }
}
