//! Relevance filtering of raw vector matches.

use crate::models::{ProductMatch, RelevantProduct, RELEVANCE_THRESHOLD};

/// Selects the matches plausibly relevant to the query.
///
/// Keeps exactly the entries whose distance is present and within
/// [`RELEVANCE_THRESHOLD`], preserving input order. Entries without a
/// distance are dropped: absence of a relevance signal means "not shown".
pub struct RelevanceFilter;

impl RelevanceFilter {
    pub fn filter(results: Vec<ProductMatch>) -> Vec<RelevantProduct> {
        results
            .into_iter()
            .filter_map(|result| match result.distance {
                Some(distance) if distance <= RELEVANCE_THRESHOLD => Some(RelevantProduct {
                    id: result.id,
                    title: result.title,
                    distance,
                }),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn candidate(title: &str, distance: Option<f32>) -> ProductMatch {
        ProductMatch {
            id: Uuid::new_v4(),
            title: Some(title.to_string()),
            distance,
        }
    }

    #[test]
    fn test_keeps_only_entries_within_threshold() {
        let results = vec![
            candidate("a", Some(0.2)),
            candidate("b", Some(0.6)),
            candidate("c", Some(0.5)),
        ];

        let filtered = RelevanceFilter::filter(results);
        let titles: Vec<_> = filtered.iter().map(|p| p.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filtered = RelevanceFilter::filter(vec![candidate("edge", Some(RELEVANCE_THRESHOLD))]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].distance, RELEVANCE_THRESHOLD);
    }

    #[test]
    fn test_drops_entries_without_distance() {
        let filtered = RelevanceFilter::filter(vec![
            candidate("no-signal", None),
            candidate("good", Some(0.1)),
        ]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title.as_deref(), Some("good"));
    }

    #[test]
    fn test_preserves_input_order() {
        // Not sorted by distance: order comes from the store and stays.
        let results = vec![
            candidate("second-best", Some(0.4)),
            candidate("best", Some(0.1)),
            candidate("third", Some(0.45)),
        ];

        let filtered = RelevanceFilter::filter(results);
        let titles: Vec<_> = filtered.iter().map(|p| p.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["second-best", "best", "third"]);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(RelevanceFilter::filter(vec![]).is_empty());
    }
}
