//! Property tests for ranking bookkeeping over arbitrary match sequences

mod fixtures;

use fixtures::TestLeague;
use proptest::prelude::*;
use team_ranking::types::NewMatch;

fn match_strategy() -> impl Strategy<Value = (usize, usize, u32, u32, bool)> {
    (0usize..4, 0usize..4, 0u32..6, 0u32..6, any::<bool>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rankings_stay_consistent(games in prop::collection::vec(match_strategy(), 0..40)) {
        let league = TestLeague::new();
        let teams = league.create_teams(&["Team A", "Team B", "Team C", "Team D"]);

        let mut expected_points = 0u32;
        let mut completed = 0u32;
        for (home, away, home_score, away_score, is_completed) in games {
            league
                .matches
                .create_match(NewMatch {
                    home_team_id: teams[home].team_id,
                    away_team_id: teams[away].team_id,
                    home_score,
                    away_score,
                    completed: is_completed,
                })
                .unwrap();

            if is_completed {
                completed += 1;
                expected_points += if home_score == away_score { 2 } else { 3 };
            }
        }

        let standings = league.rankings.list_rankings().unwrap();
        prop_assert_eq!(standings.len(), 4);

        for ranking in &standings {
            prop_assert_eq!(ranking.played, ranking.victories + ranking.draws + ranking.defeats);
            prop_assert_eq!(ranking.points, 3 * ranking.victories + ranking.draws);
        }
        for pair in standings.windows(2) {
            prop_assert!(pair[0].points >= pair[1].points);
        }

        let total_points: u32 = standings.iter().map(|ranking| ranking.points).sum();
        let total_played: u32 = standings.iter().map(|ranking| ranking.played).sum();
        prop_assert_eq!(total_points, expected_points);
        prop_assert_eq!(total_played, 2 * completed);
    }

    #[test]
    fn prop_concluded_match_is_frozen(home_score in 0u32..10, away_score in 0u32..10) {
        let league = TestLeague::new();
        let teams = league.create_teams(&["Team A", "Team B"]);
        let game = league
            .matches
            .create_match(NewMatch {
                home_team_id: teams[0].team_id,
                away_team_id: teams[1].team_id,
                home_score,
                away_score,
                completed: true,
            })
            .unwrap();
        let before = league.rankings.list_rankings().unwrap();

        let result = league.matches.update_match(
            game.id,
            team_ranking::types::MatchUpdate {
                home_score: away_score,
                away_score: home_score,
                completed: true,
            },
        );

        prop_assert!(result.is_err());
        prop_assert_eq!(league.rankings.list_rankings().unwrap(), before);
    }
}
