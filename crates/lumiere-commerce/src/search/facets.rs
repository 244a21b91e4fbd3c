//! Per-option facet counts.
//!
//! A count answers "how many products would the listing show if this option
//! were the whole selection for its facet", with every other facet applied.

use crate::catalog::Product;
use crate::search::engine::matches_filters;
use crate::search::{Appearance, Facet, FacetCounts, FacetKind, FilterState};

/// Count every facet option against the category subset.
///
/// Material, gem and size options are the values present in `subset`
/// (sizes ascending, the rest in first-seen order). Appearance always lists
/// all four predicates.
pub fn count_facets(subset: &[&Product], state: &FilterState) -> FacetCounts {
    let count = |probe: &FilterState| subset.iter().filter(|p| matches_filters(p, probe)).count();

    let mut material = Facet::new(FacetKind::Material);
    for color in distinct(subset.iter().flat_map(|p| p.colors.iter().cloned())) {
        let mut probe = state.clone();
        probe.material = Some(color.clone());
        let selected = state.material.as_deref() == Some(color.as_str());
        material.add_value(color, count(&probe), selected);
    }

    let mut appearance = Facet::new(FacetKind::Appearance);
    for predicate in Appearance::ALL {
        let mut probe = state.clone();
        probe.appearance = vec![predicate];
        let selected = state.appearance.contains(&predicate);
        appearance.add_value(predicate.as_str(), count(&probe), selected);
    }

    let mut gem = Facet::new(FacetKind::Gem);
    for gemstone in distinct(subset.iter().flat_map(|p| p.gemstones.iter().cloned())) {
        let mut probe = state.clone();
        probe.gems = vec![gemstone.clone()];
        let selected = state.gems.contains(&gemstone);
        gem.add_value(gemstone, count(&probe), selected);
    }

    let mut sizes: Vec<u16> = distinct(subset.iter().flat_map(|p| p.sizes.iter().copied()));
    sizes.sort_unstable();
    let mut size = Facet::new(FacetKind::Size);
    for value in sizes {
        let mut probe = state.clone();
        probe.size = Some(value);
        size.add_value(value.to_string(), count(&probe), state.size == Some(value));
    }

    FacetCounts {
        material,
        appearance,
        gem,
        size,
    }
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::search::engine::category_subset;

    #[test]
    fn test_appearance_lists_all_predicates() {
        let catalog = Catalog::builtin().unwrap();
        let state = FilterState::new(&catalog, Category::Rings.into());
        let subset = category_subset(&catalog, state.category);
        let facets = count_facets(&subset, &state);

        let values: Vec<&str> = facets
            .appearance
            .values
            .iter()
            .map(|v| v.value.as_str())
            .collect();
        assert_eq!(values, vec!["with_gem", "without_gem", "rough", "smooth"]);

        let with = facets.appearance.count_for("with_gem").unwrap();
        let without = facets.appearance.count_for("without_gem").unwrap();
        assert_eq!(with + without, subset.len());
    }

    #[test]
    fn test_count_ignores_own_facet_selection() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = FilterState::new(&catalog, Category::Rings.into());
        let subset = category_subset(&catalog, state.category);
        let before = count_facets(&subset, &state);

        state.select_material(Some("silver".into()));
        let after = count_facets(&subset, &state);

        assert_eq!(before.material.values.len(), after.material.values.len());
        for (b, a) in before.material.values.iter().zip(&after.material.values) {
            assert_eq!(b.count, a.count);
            assert_eq!(a.selected, a.value == "silver");
        }
    }

    #[test]
    fn test_sizes_sorted_and_distinct() {
        let catalog = Catalog::builtin().unwrap();
        let state = FilterState::new(&catalog, Category::Rings.into());
        let subset = category_subset(&catalog, state.category);
        let facets = count_facets(&subset, &state);

        let sizes: Vec<u16> = facets
            .size
            .values
            .iter()
            .map(|v| v.value.parse().unwrap())
            .collect();
        let mut sorted = sizes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sizes, sorted);
    }
}
