use docbot_vector_store::RetrievedHit;
use std::cmp::Ordering;

/// Weight of one matched boost term relative to the similarity score
const BOOST_WEIGHT: f32 = 0.1;

/// Order hits best-first, nudging hits that mention domain keywords.
///
/// The boost counts how many of `boost_terms` occur in the hit text
/// (case-insensitive substring, one point per term). The effective sort key
/// is `score + boost * 0.1`, descending; scores are similarities, higher =
/// better. The sort is stable, so ties keep their input order. With no boost
/// terms this is a plain similarity sort and `boost` stays unset.
///
/// This is a heuristic re-ranking layer, not a relevance guarantee.
#[must_use]
pub fn rank(mut hits: Vec<RetrievedHit>, boost_terms: &[String]) -> Vec<RetrievedHit> {
    if !boost_terms.is_empty() {
        let lowered_terms: Vec<String> = boost_terms.iter().map(|t| t.to_lowercase()).collect();
        for hit in &mut hits {
            hit.boost = Some(lexical_boost(&hit.text, &lowered_terms));
        }
    }

    hits.sort_by(|a, b| {
        effective_score(b)
            .partial_cmp(&effective_score(a))
            .unwrap_or(Ordering::Equal)
    });
    hits
}

fn lexical_boost(text: &str, lowered_terms: &[String]) -> f32 {
    let lowered = text.to_lowercase();
    lowered_terms
        .iter()
        .filter(|term| lowered.contains(term.as_str()))
        .count() as f32
}

fn effective_score(hit: &RetrievedHit) -> f32 {
    hit.score + hit.boost.unwrap_or(0.0) * BOOST_WEIGHT
}
