//! Static US state/territory adjacency table.
//!
//! Fixed, hand-authored graph of land borders. Island and
//! non-contiguous regions have no entry and resolve to an empty
//! neighbor set, as does any unknown code.

use std::collections::BTreeSet;

/// Land borders per region code. Corner-touch pairs (Four Corners)
/// are included in both directions.
const ADJACENCY: &[(&str, &[&str])] = &[
    ("AL", &["FL", "GA", "MS", "TN"]),
    ("AR", &["LA", "MO", "MS", "OK", "TN", "TX"]),
    ("AZ", &["CA", "CO", "NM", "NV", "UT"]),
    ("CA", &["AZ", "NV", "OR"]),
    ("CO", &["AZ", "KS", "NE", "NM", "OK", "UT", "WY"]),
    ("CT", &["MA", "NY", "RI"]),
    ("DC", &["MD", "VA"]),
    ("DE", &["MD", "NJ", "PA"]),
    ("FL", &["AL", "GA"]),
    ("GA", &["AL", "FL", "NC", "SC", "TN"]),
    ("IA", &["IL", "MN", "MO", "NE", "SD", "WI"]),
    ("ID", &["MT", "NV", "OR", "UT", "WA", "WY"]),
    ("IL", &["IA", "IN", "KY", "MO", "WI"]),
    ("IN", &["IL", "KY", "MI", "OH"]),
    ("KS", &["CO", "MO", "NE", "OK"]),
    ("KY", &["IL", "IN", "MO", "OH", "TN", "VA", "WV"]),
    ("LA", &["AR", "MS", "TX"]),
    ("MA", &["CT", "NH", "NY", "RI", "VT"]),
    ("MD", &["DC", "DE", "PA", "VA", "WV"]),
    ("ME", &["NH"]),
    ("MI", &["IN", "OH", "WI"]),
    ("MN", &["IA", "ND", "SD", "WI"]),
    ("MO", &["AR", "IA", "IL", "KS", "KY", "NE", "OK", "TN"]),
    ("MS", &["AL", "AR", "LA", "TN"]),
    ("MT", &["ID", "ND", "SD", "WY"]),
    ("NC", &["GA", "SC", "TN", "VA"]),
    ("ND", &["MN", "MT", "SD"]),
    ("NE", &["CO", "IA", "KS", "MO", "SD", "WY"]),
    ("NH", &["MA", "ME", "VT"]),
    ("NJ", &["DE", "NY", "PA"]),
    ("NM", &["AZ", "CO", "OK", "TX", "UT"]),
    ("NV", &["AZ", "CA", "ID", "OR", "UT"]),
    ("NY", &["CT", "MA", "NJ", "PA", "VT"]),
    ("OH", &["IN", "KY", "MI", "PA", "WV"]),
    ("OK", &["AR", "CO", "KS", "MO", "NM", "TX"]),
    ("OR", &["CA", "ID", "NV", "WA"]),
    ("PA", &["DE", "MD", "NJ", "NY", "OH", "WV"]),
    ("RI", &["CT", "MA"]),
    ("SC", &["GA", "NC"]),
    ("SD", &["IA", "MN", "MT", "ND", "NE", "WY"]),
    ("TN", &["AL", "AR", "GA", "KY", "MO", "MS", "NC", "VA"]),
    ("TX", &["AR", "LA", "NM", "OK"]),
    ("UT", &["AZ", "CO", "ID", "NM", "NV", "WY"]),
    ("VA", &["DC", "KY", "MD", "NC", "TN", "WV"]),
    ("VT", &["MA", "NH", "NY"]),
    ("WA", &["ID", "OR"]),
    ("WI", &["IA", "IL", "MI", "MN"]),
    ("WV", &["KY", "MD", "OH", "PA", "VA"]),
    ("WY", &["CO", "ID", "MT", "NE", "SD", "UT"]),
];

/// Non-contiguous states and territories with no land borders.
const ISOLATED: &[&str] = &["AK", "AS", "GU", "HI", "MP", "PR", "VI"];

/// Land-bordering region codes for `code`. Unknown codes yield an
/// empty slice, never an error.
pub fn neighbors(code: &str) -> &'static [&'static str] {
    ADJACENCY
        .iter()
        .find(|(region, _)| region.eq_ignore_ascii_case(code))
        .map(|(_, adjacent)| *adjacent)
        .unwrap_or(&[])
}

/// True if `code` is a known state or territory code.
pub fn is_known_region(code: &str) -> bool {
    ADJACENCY
        .iter()
        .any(|(region, _)| region.eq_ignore_ascii_case(code))
        || ISOLATED.iter().any(|region| region.eq_ignore_ascii_case(code))
}

/// Candidate region set for the region-fallback strategy:
/// `{start, end} ∪ neighbors(start) ∪ neighbors(end)`.
///
/// Missing endpoints contribute nothing. BTreeSet keeps the candidate
/// order deterministic.
pub fn candidate_regions(start: Option<&str>, end: Option<&str>) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    for code in [start, end].into_iter().flatten() {
        let code = code.to_ascii_uppercase();
        for neighbor in neighbors(&code) {
            set.insert((*neighbor).to_string());
        }
        set.insert(code);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_table_is_symmetric() {
        for (region, adjacent) in ADJACENCY {
            for neighbor in *adjacent {
                assert!(
                    neighbors(neighbor).contains(region),
                    "{region} lists {neighbor} but not vice versa"
                );
                assert_ne!(region, neighbor, "{region} lists itself");
            }
        }
    }

    #[test]
    fn california_borders() {
        let mut found: Vec<_> = neighbors("CA").to_vec();
        found.sort_unstable();
        assert_eq!(found, vec!["AZ", "NV", "OR"]);
    }

    #[test]
    fn unknown_and_island_codes_have_no_neighbors() {
        assert!(neighbors("HI").is_empty());
        assert!(neighbors("AK").is_empty());
        assert!(neighbors("ZZ").is_empty());
        assert!(is_known_region("HI"));
        assert!(!is_known_region("ZZ"));
    }

    #[test]
    fn candidate_regions_for_ca_to_nv() {
        let set = candidate_regions(Some("CA"), Some("NV"));
        let expected: BTreeSet<String> = ["AZ", "CA", "ID", "NV", "OR", "UT"]
            .iter()
            .map(|code| code.to_string())
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn island_region_contributes_only_itself() {
        let set = candidate_regions(Some("HI"), None);
        assert_eq!(set.len(), 1);
        assert!(set.contains("HI"));
    }

    #[test]
    fn candidate_regions_are_uppercased() {
        let set = candidate_regions(Some("ca"), None);
        assert!(set.contains("CA"));
        assert!(set.contains("OR"));
    }
}
