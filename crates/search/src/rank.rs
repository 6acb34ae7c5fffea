use reel_catalog::{Catalog, CatalogRecord};
use std::collections::HashSet;

/// A scored hit against the catalog.
///
/// Produced fresh per query (or per decoded pagination token) and discarded
/// once the response is rendered; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchMatch<'a> {
    pub record: &'a CatalogRecord,
    /// 0-100, higher is better.
    pub rank: u32,
}

/// Score and order catalog records against a free-text query, best first.
///
/// Matching is whole-token and case-insensitive: the score is the rounded
/// percentage of distinct query tokens that appear verbatim in the record's
/// `category + title` text, so repeating a word in the query neither helps
/// nor hurts. Zero-score records are excluded. The sort is stable, so equal
/// scores keep the catalog's original order. An empty (or all-whitespace)
/// query yields no matches rather than an error.
pub fn rank<'a>(query: &str, catalog: &'a Catalog) -> Vec<SearchMatch<'a>> {
    let query_tokens: HashSet<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if query_tokens.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SearchMatch<'a>> = catalog
        .records()
        .iter()
        .filter_map(|record| {
            let text = record.search_text();
            let record_tokens: HashSet<&str> = text.split_whitespace().collect();
            let hits = query_tokens
                .iter()
                .filter(|token| record_tokens.contains(token.as_str()))
                .count();
            if hits == 0 {
                return None;
            }
            let rank = (100.0 * hits as f64 / query_tokens.len() as f64).round() as u32;
            Some(SearchMatch { record, rank })
        })
        .collect();

    matches.sort_by_key(|m| std::cmp::Reverse(m.rank));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(key: &str, category: &str, title: &str) -> CatalogRecord {
        CatalogRecord {
            category: category.to_string(),
            title: title.to_string(),
            key: key.to_string(),
            media_ref: "img".to_string(),
            info_link: "wiki".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            record("tt001", "1950-1989", "Sholay"),
            record("tt002", "1950-1989", "Deewaar"),
            record("tt003", "1990-2009", "Dilwale Dulhania Le Jayenge"),
            record("tt004", "1990-2009", "Dil To Pagal Hai"),
            record("tt005", "2010-2019", "Dil Dhadakne Do"),
        ])
    }

    #[test]
    fn exact_title_token_scores_full() {
        let catalog = catalog();
        let matches = rank("sholay", &catalog);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.key, "tt001");
        assert_eq!(matches[0].rank, 100);
    }

    #[test]
    fn substring_does_not_match() {
        let catalog = catalog();
        assert!(rank("sho", &catalog).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = catalog();
        let matches = rank("SHOLAY", &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rank, 100);
    }

    #[test]
    fn category_tokens_count() {
        let catalog = catalog();
        let matches = rank("1950-1989", &catalog);

        let keys: Vec<&str> = matches.iter().map(|m| m.record.key.as_str()).collect();
        assert_eq!(keys, vec!["tt001", "tt002"]);
    }

    #[test]
    fn duplicate_query_tokens_count_once() {
        let catalog = catalog();
        // Distinct tokens are {dil, sholay}; each record hits one of two.
        let matches = rank("dil dil sholay", &catalog);

        let dil_hit = matches
            .iter()
            .find(|m| m.record.key == "tt004")
            .expect("tt004 matches on 'dil'");
        assert_eq!(dil_hit.rank, 50);

        let sholay_hit = matches
            .iter()
            .find(|m| m.record.key == "tt001")
            .expect("tt001 matches on 'sholay'");
        assert_eq!(sholay_hit.rank, 50);
    }

    #[test]
    fn partial_overlap_rounds_percentage() {
        let catalog = catalog();
        // One of three tokens hits "Dil To Pagal Hai" -> round(100/3) = 33.
        let matches = rank("dil bole hadippa", &catalog);

        let hit = matches
            .iter()
            .find(|m| m.record.key == "tt004")
            .expect("tt004 matches on 'dil'");
        assert_eq!(hit.rank, 33);
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let catalog = catalog();
        let matches = rank("dil do", &catalog);

        // tt005 matches both tokens, tt004 only "dil"; scores descend and the
        // zero-score records are gone.
        let scored: Vec<(&str, u32)> = matches
            .iter()
            .map(|m| (m.record.key.as_str(), m.rank))
            .collect();
        assert_eq!(scored, vec![("tt005", 100), ("tt004", 50)]);

        // Equal scores keep catalog order.
        let ties = rank("dil", &catalog);
        let keys: Vec<&str> = ties.iter().map(|m| m.record.key.as_str()).collect();
        assert_eq!(keys, vec!["tt004", "tt005"]);
        assert!(ties.iter().all(|m| m.rank == 100));
    }

    #[test]
    fn empty_query_yields_no_matches() {
        let catalog = catalog();
        assert!(rank("", &catalog).is_empty());
        assert!(rank("   ", &catalog).is_empty());
    }

    #[test]
    fn only_positive_scores_are_returned() {
        let catalog = catalog();
        let matches = rank("sholay nonsense words here", &catalog);
        assert!(matches.iter().all(|m| m.rank > 0));
    }
}
