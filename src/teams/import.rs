//! Bulk team import from JSON files
//!
//! The expected format is an array of `{"name": "..."}` objects.

use crate::error::{LeagueError, Result};
use crate::types::TeamPayload;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a team import file
pub fn read_team_file(path: &Path) -> Result<Vec<TeamPayload>> {
    let data = fs::read_to_string(path).map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::NotFound => format!("file not found: {}", path.display()),
            _ => format!("cannot read {}: {}", path.display(), e),
        };
        LeagueError::InvalidTeamData { reason }
    })?;

    parse_team_entries(&data)
}

/// Parse import entries; an empty list or `null` is rejected
pub fn parse_team_entries(data: &str) -> Result<Vec<TeamPayload>> {
    let entries: Option<Vec<TeamPayload>> =
        serde_json::from_str(data).map_err(|e| LeagueError::InvalidTeamData {
            reason: e.to_string(),
        })?;

    match entries {
        Some(entries) if !entries.is_empty() => Ok(entries),
        _ => Err(LeagueError::InvalidTeamData {
            reason: "no teams provided".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let entries = parse_team_entries(r#"[{"name": "Team A"}, {"name": "Team B"}]"#).unwrap();
        assert_eq!(
            entries,
            vec![TeamPayload::new("Team A"), TeamPayload::new("Team B")]
        );
    }

    #[test]
    fn test_empty_and_null_rejected() {
        for data in ["[]", "null"] {
            let err = parse_team_entries(data).unwrap_err();
            assert!(matches!(err, LeagueError::InvalidTeamData { .. }));
        }
    }

    #[test]
    fn test_malformed_rejected() {
        let err = parse_team_entries(r#"[{"title": "Team A"}]"#).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_file_rejected() {
        let path = std::env::temp_dir().join("team-ranking-no-such-import.json");
        let err = read_team_file(&path).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_read_file() {
        let path = std::env::temp_dir().join(format!(
            "team-ranking-import-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"[{"name": "Team A"}]"#).unwrap();

        let entries = read_team_file(&path).unwrap();
        assert_eq!(entries.len(), 1);
        fs::remove_file(&path).unwrap();
    }
}
