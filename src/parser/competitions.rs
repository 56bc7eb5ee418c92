use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;

use super::record::CompetitionRecord;

#[derive(Debug, Deserialize)]
pub struct CompetitionsResponse {
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Deserialize)]
pub struct Competition {
    pub id: i64,
    pub area: Area,
    pub name: Option<String>,
    #[serde(rename = "currentSeason", default)]
    pub current_season: Option<Season>,
}

#[derive(Debug, Deserialize)]
pub struct Area {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Season {
    #[serde(rename = "currentMatchday", default)]
    pub current_matchday: Option<i64>,
}

/// Parse the competitions API response body
pub fn parse_competitions_json(raw: &str) -> Result<CompetitionsResponse> {
    serde_json::from_str(raw).context("Failed to parse competitions JSON")
}

/// Keep competitions whose area is a stored country, in response order.
///
/// Matching is exact and case-sensitive; entries for unknown areas are dropped.
pub fn select_competitions(
    response: CompetitionsResponse,
    country_names: &[String],
) -> Vec<CompetitionRecord> {
    let known: HashSet<&str> = country_names.iter().map(String::as_str).collect();

    response
        .competitions
        .into_iter()
        .filter(|c| {
            let keep = known.contains(c.area.name.as_str());
            if !keep {
                debug!("Dropping competition {} ({}): unknown area", c.id, c.area.name);
            }
            keep
        })
        .map(|c| CompetitionRecord {
            league_id: c.id,
            league_name: c.name,
            current_matchday: c.current_season.and_then(|s| s.current_matchday),
            country_name: c.area.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const RAW: &str = r#"{
        "count": 4,
        "competitions": [
            {"id": 2021, "area": {"id": 2072, "name": "England"}, "name": "Premier League",
             "currentSeason": {"id": 1, "currentMatchday": 12}},
            {"id": 2000, "area": {"id": 2267, "name": "World"}, "name": "FIFA World Cup",
             "currentSeason": {"id": 2, "currentMatchday": 3}},
            {"id": 2013, "area": {"id": 2032, "name": "Brazil"}, "name": "Série A",
             "currentSeason": null},
            {"id": 2019, "area": {"id": 2114, "name": "italy"}, "name": "Serie A"}
        ]
    }"#;

    #[test]
    fn test_keeps_only_known_areas() {
        let response = parse_competitions_json(RAW).unwrap();
        let rows = select_competitions(response, &names(&["England", "Brazil", "Italy"]));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].league_id, 2021);
        assert_eq!(rows[0].country_name, "England");
        assert_eq!(rows[0].league_name.as_deref(), Some("Premier League"));
        assert_eq!(rows[0].current_matchday, Some(12));
        assert_eq!(rows[1].country_name, "Brazil");
    }

    #[test]
    fn test_no_current_season_is_none() {
        let response = parse_competitions_json(RAW).unwrap();
        let rows = select_competitions(response, &names(&["Brazil"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].current_matchday, None);
    }

    #[test]
    fn test_missing_current_season_field_is_none() {
        let response = parse_competitions_json(RAW).unwrap();
        let rows = select_competitions(response, &names(&["italy"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].current_matchday, None);
    }

    #[test]
    fn test_empty_name_set_drops_everything() {
        let response = parse_competitions_json(RAW).unwrap();
        assert!(select_competitions(response, &[]).is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_fatal() {
        assert!(parse_competitions_json(r#"{"count": 0}"#).is_err());
        assert!(parse_competitions_json(r#"{"competitions": [{"id": 1}]}"#).is_err());
    }
}
