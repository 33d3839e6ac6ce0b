//! Maps provider category vocabulary onto [`PoiType`].

use super::types::{PoiType, SearchCategory};

/// Ordered keyword rules: the first rule with a keyword contained in the
/// lower-cased category string decides the type.
const KEYWORD_RULES: &[(PoiType, &[&str])] = &[
    (PoiType::Hospital, &["hospital", "medical"]),
    (PoiType::Restaurant, &["restaurant", "food"]),
    (PoiType::PetrolStation, &["petrol", "gas", "cng"]),
    (PoiType::EvStation, &["charging", "ev"]),
];

pub fn classify_keyword(category: &str) -> Option<PoiType> {
    let category = category.to_lowercase();
    if category.is_empty() {
        return None;
    }
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| category.contains(kw)))
        .map(|(poi_type, _)| *poi_type)
}

/// Classifies a generic-provider record by its first category, falling back
/// to the category that was searched for.
pub fn classify(first_category: Option<&str>, searched: Option<SearchCategory>) -> PoiType {
    first_category
        .and_then(classify_keyword)
        .or_else(|| searched.map(|c| c.poi_type()))
        .unwrap_or(PoiType::Other)
}
