use crate::types::TasteProfile;

pub const DEFAULT_COLOR: &str = "#ddd";

const AMERICA_COLOR: &str = "#af855f";
const AMERICA_HOVER_COLOR: &str = "#e2b58d";
const AFRICA_COLOR: &str = "#d3a564";
const AFRICA_HOVER_COLOR: &str = "#ffd693";
const ASIA_COLOR: &str = "#563625";
const ASIA_HOVER_COLOR: &str = "#84604d";

/// Coffee macro-region, derived from a UN region label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoffeeRegion {
    LatinAmerica,
    Africa,
    Asia,
}

impl CoffeeRegion {
    // Case-sensitive substring containment, tested in fixed priority order.
    // A label containing more than one region word resolves to the earliest
    // ("Americas and Africa" is LatinAmerica) -- deterministic tie-break,
    // matching the cascade order of the source dataset's labels.
    pub fn classify(region_label: &str) -> Option<CoffeeRegion> {
        if region_label.contains("America") {
            Some(CoffeeRegion::LatinAmerica)
        } else if region_label.contains("Africa") {
            Some(CoffeeRegion::Africa)
        } else if region_label.contains("Asia") {
            Some(CoffeeRegion::Asia)
        } else {
            None
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CoffeeRegion::LatinAmerica => "Latin America",
            CoffeeRegion::Africa => "Africa",
            CoffeeRegion::Asia => "Asia",
        }
    }

    pub fn base_color(self) -> &'static str {
        match self {
            CoffeeRegion::LatinAmerica => AMERICA_COLOR,
            CoffeeRegion::Africa => AFRICA_COLOR,
            CoffeeRegion::Asia => ASIA_COLOR,
        }
    }

    pub fn hover_color(self) -> &'static str {
        match self {
            CoffeeRegion::LatinAmerica => AMERICA_HOVER_COLOR,
            CoffeeRegion::Africa => AFRICA_HOVER_COLOR,
            CoffeeRegion::Asia => ASIA_HOVER_COLOR,
        }
    }

    pub fn taste_summary(self) -> &'static str {
        match self {
            CoffeeRegion::LatinAmerica => "Chocolate, Nutty, Caramel",
            CoffeeRegion::Africa => "Fruity, Floral, Sweet",
            CoffeeRegion::Asia => "Dark Chocolate, Earthy, Herbal, Spice",
        }
    }
}

// Label-level helpers. Most world regions are not coffee regions, so an
// unmatched label is a normal outcome, not an error.

pub fn region_name(region_label: &str) -> Option<&'static str> {
    CoffeeRegion::classify(region_label).map(CoffeeRegion::display_name)
}

pub fn region_color(region_label: &str) -> &'static str {
    CoffeeRegion::classify(region_label)
        .map(CoffeeRegion::base_color)
        .unwrap_or(DEFAULT_COLOR)
}

pub fn region_hover_color(region_label: &str) -> &'static str {
    CoffeeRegion::classify(region_label)
        .map(CoffeeRegion::hover_color)
        .unwrap_or(DEFAULT_COLOR)
}

pub fn taste_profile(region_label: &str) -> Option<TasteProfile> {
    CoffeeRegion::classify(region_label).map(|region| TasteProfile {
        summary: region.taste_summary().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn american_labels_classify_as_latin_america() {
        for label in ["Americas", "South America", "North America", "Latin America and the Caribbean"] {
            assert_eq!(CoffeeRegion::classify(label), Some(CoffeeRegion::LatinAmerica));
            assert_eq!(region_name(label), Some("Latin America"));
            assert_eq!(region_color(label), "#af855f");
            assert_eq!(region_hover_color(label), "#e2b58d");
        }
    }

    #[test]
    fn african_and_asian_labels_classify() {
        assert_eq!(CoffeeRegion::classify("Africa"), Some(CoffeeRegion::Africa));
        assert_eq!(region_color("Sub-Saharan Africa"), "#d3a564");
        assert_eq!(region_hover_color("Africa"), "#ffd693");
        assert_eq!(
            taste_profile("Africa").unwrap().summary,
            "Fruity, Floral, Sweet"
        );

        assert_eq!(CoffeeRegion::classify("Asia"), Some(CoffeeRegion::Asia));
        assert_eq!(region_color("South-Eastern Asia"), "#563625");
        assert_eq!(region_hover_color("Asia"), "#84604d");
        assert_eq!(
            taste_profile("Asia").unwrap().summary,
            "Dark Chocolate, Earthy, Herbal, Spice"
        );
    }

    #[test]
    fn unmatched_labels_fall_back_to_defaults() {
        for label in ["Europe", "Oceania", "Antarctica", "Seven seas (open ocean)", ""] {
            assert_eq!(CoffeeRegion::classify(label), None);
            assert_eq!(region_name(label), None);
            assert_eq!(region_color(label), DEFAULT_COLOR);
            assert_eq!(region_hover_color(label), DEFAULT_COLOR);
            assert_eq!(taste_profile(label), None);
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(CoffeeRegion::classify("americas"), None);
        assert_eq!(region_color("AFRICA"), DEFAULT_COLOR);
    }

    #[test]
    fn label_containing_two_region_words_resolves_by_priority() {
        // America outranks Africa, Africa outranks Asia.
        assert_eq!(
            CoffeeRegion::classify("America and Africa"),
            Some(CoffeeRegion::LatinAmerica)
        );
        assert_eq!(
            CoffeeRegion::classify("Africa and Asia"),
            Some(CoffeeRegion::Africa)
        );
    }

    #[test]
    fn taste_summary_for_latin_america() {
        assert_eq!(
            taste_profile("South America").unwrap().summary,
            "Chocolate, Nutty, Caramel"
        );
    }
}
