//! Match progression scenarios driven through the public engine.

use chase_tag::core::{
    Match, MatchResult, MatchStatus, Player, PlayerId, RoundCandidate, Side, TeamSide, DRAW,
};
use chase_tag::error::{MatchError, RoleViolation};
use chase_tag::rules::ProgressionEngine;

fn p(id: u64) -> PlayerId {
    PlayerId::new(id)
}

fn solo() -> Match {
    Match::one_v_one(Player::new(p(1), "Ann"), Player::new(p(2), "Bo")).unwrap()
}

fn red_blue() -> Match {
    Match::team(
        TeamSide::new("Red", [Player::new(p(1), "r1"), Player::new(p(2), "r2")]),
        TeamSide::new("Blue", [Player::new(p(3), "b1"), Player::new(p(4), "b2")]),
    )
    .unwrap()
}

fn play(engine: &ProgressionEngine, m: Match, rounds: impl IntoIterator<Item = RoundCandidate>) -> Match {
    rounds
        .into_iter()
        .fold(m, |m, candidate| engine.propose_round(&m, candidate).unwrap())
}

// =============================================================================
// 1v1
// =============================================================================

#[test]
fn test_one_v_one_early_win() {
    let engine = ProgressionEngine::default();
    let m = play(
        &engine,
        solo(),
        [
            RoundCandidate::evaded(p(2), p(1)),
            RoundCandidate::tagged(p(1), p(2), 5.0),
            RoundCandidate::evaded(p(2), p(1)),
        ],
    );

    assert_eq!((m.team1_score(), m.team2_score()), (2, 0));
    assert_eq!(m.status(), MatchStatus::Completed(MatchResult::Winner(Side::One)));
    assert_eq!(m.winner(), Some("Ann"));

    let err = engine
        .propose_round(&m, RoundCandidate::evaded(p(1), p(2)))
        .unwrap_err();
    assert_eq!(err, MatchError::MatchLocked);
}

#[test]
fn test_one_v_one_rejects_repeated_evader() {
    let engine = ProgressionEngine::default();
    let m = play(&engine, solo(), [RoundCandidate::evaded(p(2), p(1))]);

    let err = engine
        .propose_round(&m, RoundCandidate::tagged(p(2), p(1), 3.0))
        .unwrap_err();
    assert_eq!(err, MatchError::InvalidRoundRole(RoleViolation::WrongAlternation));
    assert_eq!(err.to_string(), "invalid player roles for this round");
    assert_eq!(m.round_count(), 1);
}

#[test]
fn test_one_v_one_leader_chased_third_round() {
    let engine = ProgressionEngine::default();
    let m = play(
        &engine,
        solo(),
        [
            RoundCandidate::tagged(p(1), p(2), 2.0),
            RoundCandidate::evaded(p(2), p(1)),
            RoundCandidate::tagged(p(1), p(2), 11.0),
        ],
    );

    assert_eq!((m.team1_score(), m.team2_score()), (1, 0));
    assert_eq!(m.winner(), Some("Ann"));
}

#[test]
fn test_one_v_one_leader_evaded_third_round_plays_on() {
    let engine = ProgressionEngine::default();
    let m = play(
        &engine,
        solo(),
        [
            RoundCandidate::evaded(p(2), p(1)),
            RoundCandidate::tagged(p(1), p(2), 5.0),
            RoundCandidate::tagged(p(2), p(1), 9.0),
        ],
    );
    assert_eq!(m.status(), MatchStatus::InProgress);

    let m = engine
        .propose_round(&m, RoundCandidate::evaded(p(1), p(2)))
        .unwrap();
    assert_eq!(m.status(), MatchStatus::SuddenDeath);
}

#[test]
fn test_one_v_one_sudden_death_longer_time_wins() {
    let engine = ProgressionEngine::default();
    let m = play(
        &engine,
        solo(),
        [
            RoundCandidate::evaded(p(2), p(1)),
            RoundCandidate::evaded(p(1), p(2)),
            RoundCandidate::tagged(p(2), p(1), 3.0),
            RoundCandidate::tagged(p(1), p(2), 4.0),
        ],
    );
    assert!(m.is_sudden_death());
    assert!(m.is_locked());

    // Alternation is lifted: Bo may evade again.
    let m = play(
        &engine,
        m,
        [
            RoundCandidate::tagged(p(1), p(2), 7.0),
            RoundCandidate::tagged(p(2), p(1), 12.0),
        ],
    );
    assert_eq!(m.round_count(), 6);
    assert_eq!(m.winner(), Some("Ann"));
}

#[test]
fn test_one_v_one_sudden_death_tie_is_draw() {
    let engine = ProgressionEngine::default();
    let m = play(
        &engine,
        solo(),
        [
            RoundCandidate::evaded(p(2), p(1)),
            RoundCandidate::evaded(p(1), p(2)),
            RoundCandidate::tagged(p(2), p(1), 3.0),
            RoundCandidate::tagged(p(1), p(2), 4.0),
            RoundCandidate::evaded(p(2), p(1)),
            RoundCandidate::evaded(p(1), p(2)),
        ],
    );

    assert_eq!(m.result(), Some(MatchResult::Draw));
    assert_eq!(m.winner(), Some(DRAW));
    assert_eq!((m.team1_score(), m.team2_score()), (2, 2));
}

// =============================================================================
// Team
// =============================================================================

/// Sixteen rounds ending 4-4: each side escapes once and is tagged once per
/// four rounds.
fn tied_regulation() -> Vec<RoundCandidate> {
    (0..4)
        .flat_map(|_| {
            [
                RoundCandidate::evaded(p(3), p(1)),
                RoundCandidate::tagged(p(3), p(1), 8.0),
                RoundCandidate::evaded(p(1), p(3)),
                RoundCandidate::tagged(p(1), p(3), 8.0),
            ]
        })
        .collect()
}

#[test]
fn test_team_sudden_death_draw() {
    let engine = ProgressionEngine::default();
    let m = play(&engine, red_blue(), tied_regulation());
    assert_eq!(m.round_count(), 16);
    assert_eq!((m.team1_score(), m.team2_score()), (4, 4));
    assert_eq!(m.status(), MatchStatus::SuddenDeath);

    let m = engine
        .propose_round(&m, RoundCandidate::evaded(p(4), p(2)))
        .unwrap();
    assert_eq!(m.status(), MatchStatus::SuddenDeath);

    let m = engine
        .propose_round(&m, RoundCandidate::evaded(p(2), p(4)))
        .unwrap();
    assert_eq!(m.winner(), Some(DRAW));
    assert_eq!((m.team1_score(), m.team2_score()), (5, 5));
}

#[test]
fn test_team_sudden_death_tag_loses() {
    let engine = ProgressionEngine::default();
    let m = play(&engine, red_blue(), tied_regulation());
    let m = play(
        &engine,
        m,
        [
            RoundCandidate::tagged(p(4), p(2), 19.5),
            RoundCandidate::evaded(p(2), p(4)),
        ],
    );
    assert_eq!(m.winner(), Some("Blue"));
}

#[test]
fn test_team_eight_all_goes_to_sudden_death() {
    // Sixteen escapes tied 8-8 cannot be appended in turn order; build them
    // through edits, which recompute from the final scores.
    let engine = ProgressionEngine::default();
    let mut m = red_blue();
    for _ in 0..7 {
        for candidate in [RoundCandidate::evaded(p(3), p(1)), RoundCandidate::evaded(p(1), p(3))] {
            m = engine.insert_round(&m, m.round_count(), candidate).unwrap();
        }
    }
    m = engine
        .insert_round(&m, 0, RoundCandidate::evaded(p(4), p(2)))
        .unwrap();
    assert_eq!(m.status(), MatchStatus::InProgress);

    m = engine
        .insert_round(&m, 15, RoundCandidate::evaded(p(2), p(4)))
        .unwrap();
    assert_eq!(m.round_count(), 16);
    assert_eq!((m.team1_score(), m.team2_score()), (8, 8));
    assert_eq!(m.status(), MatchStatus::SuddenDeath);

    let m = play(
        &engine,
        m,
        [
            RoundCandidate::evaded(p(3), p(1)),
            RoundCandidate::evaded(p(1), p(3)),
        ],
    );
    assert_eq!(m.winner(), Some(DRAW));
    assert_eq!((m.team1_score(), m.team2_score()), (9, 9));
}

#[test]
fn test_team_early_elimination() {
    let engine = ProgressionEngine::default();
    let rounds = (0..8).map(|i| RoundCandidate::evaded(p(3 + i % 2), p(1)));
    let m = play(&engine, red_blue(), rounds);

    assert_eq!(m.round_count(), 8);
    assert_eq!(m.team1_score(), 8);
    assert_eq!(m.winner(), Some("Red"));
}

#[test]
fn test_team_plays_on_while_catchable() {
    let engine = ProgressionEngine::default();
    let rounds = (0..7).map(|_| RoundCandidate::evaded(p(3), p(1)));
    let m = play(&engine, red_blue(), rounds);

    assert_eq!(m.team1_score(), 7);
    assert_eq!(m.status(), MatchStatus::InProgress);
}

#[test]
fn test_team_continuation_messages() {
    let engine = ProgressionEngine::default();
    let after_escape = play(&engine, red_blue(), [RoundCandidate::evaded(p(3), p(1))]);

    let err = engine
        .propose_round(&after_escape, RoundCandidate::evaded(p(3), p(2)))
        .unwrap_err();
    assert_eq!(err.to_string(), "must continue as evader");

    let err = engine
        .propose_round(&after_escape, RoundCandidate::evaded(p(2), p(1)))
        .unwrap_err();
    assert_eq!(err.to_string(), "players must be from opposing teams");

    let after_tag = play(&engine, red_blue(), [RoundCandidate::tagged(p(3), p(1), 2.0)]);
    let err = engine
        .propose_round(&after_tag, RoundCandidate::evaded(p(1), p(4)))
        .unwrap_err();
    assert_eq!(err.to_string(), "must be evader after successful tag");

    let err = engine
        .propose_round(&after_tag, RoundCandidate::evaded(p(2), p(1)))
        .unwrap_err();
    assert_eq!(err.to_string(), "players must be from opposing teams");

    let err = engine
        .propose_round(&red_blue(), RoundCandidate::evaded(p(1), p(2)))
        .unwrap_err();
    assert_eq!(err.to_string(), "players must be from opposing teams");
}

#[test]
fn test_tagger_evades_next() {
    let engine = ProgressionEngine::default();
    let m = play(
        &engine,
        red_blue(),
        [
            RoundCandidate::tagged(p(3), p(1), 2.0),
            RoundCandidate::evaded(p(2), p(3)),
        ],
    );
    assert_eq!(m.team2_score(), 1);
    assert_eq!(m.last_round().map(|r| r.evader), Some(p(3)));
}

// =============================================================================
// Tag times
// =============================================================================

#[test]
fn test_tag_time_bounds() {
    let engine = ProgressionEngine::default();
    let m = solo();

    for bad in [-0.1, 20.01, f64::NAN, f64::INFINITY] {
        let err = engine
            .propose_round(&m, RoundCandidate::tagged(p(1), p(2), bad))
            .unwrap_err();
        assert_eq!(err, MatchError::InvalidTagTime);
    }

    let err = engine
        .propose_round(&m, RoundCandidate::new(p(1), p(2), true, None))
        .unwrap_err();
    assert_eq!(err.to_string(), "valid tag_time required");

    for good in [0.0, 20.0] {
        assert!(engine
            .propose_round(&m, RoundCandidate::tagged(p(1), p(2), good))
            .is_ok());
    }
}

#[test]
fn test_tag_time_ignored_without_tag() {
    let engine = ProgressionEngine::default();
    let m = engine
        .propose_round(&solo(), RoundCandidate::new(p(2), p(1), false, Some(99.0)))
        .unwrap();
    assert_eq!(m.rounds()[0].tag_time(), None);
    assert_eq!(m.team1_score(), 1);
}
