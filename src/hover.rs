use crate::processing;
use crate::regions;
use crate::types::{CoffeeProducer, CountryFeature, MapCountry};
use serde::Serialize;

// Two countries highlight together when both are coffee regions sharing the
// same UN region label.
pub fn region_match(source: &MapCountry, target: &MapCountry) -> bool {
    source.is_coffee_region && target.is_coffee_region && source.region_un == target.region_un
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(String),
}

// Tooltip panel content. Both fields can be absent for a producer country
// whose region label matches no known region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub title: Option<&'static str>,
    pub summary: Option<String>,
}

// The live map model for one rendering pass. The country list is replaced
// wholesale on rebuild; between rebuilds only stroke/fill mutate, once per
// pointer enter and once per pointer leave, across all matching entries.
#[derive(Debug)]
pub struct WorldMapState {
    pub countries: Vec<MapCountry>,
    hover: HoverState,
}

impl WorldMapState {
    pub fn new(countries: Vec<MapCountry>) -> Self {
        WorldMapState {
            countries,
            hover: HoverState::Idle,
        }
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    // Pointer-enter over `country_name`. Moving straight from another country
    // coalesces the implied leave: the old region reverts before the new one
    // highlights. Returns tooltip content only for coffee regions.
    pub fn pointer_enter(&mut self, country_name: &str) -> Option<Tooltip> {
        if let HoverState::Hovering(current) = &self.hover {
            if current != country_name {
                let current = current.clone();
                self.recolor_matches_of(&current, Recolor::Base);
            }
        }

        let entered = match self.countries.iter().find(|c| c.country_name == country_name) {
            Some(c) => c.clone(),
            None => {
                self.hover = HoverState::Idle;
                return None;
            }
        };

        self.recolor_matches_of(country_name, Recolor::Hover);
        self.hover = HoverState::Hovering(country_name.to_string());

        if entered.is_coffee_region {
            Some(Tooltip {
                title: entered.coffee_region_name,
                summary: entered.taste_profile.map(|p| p.summary),
            })
        } else {
            None
        }
    }

    // Pointer-leave from `country_name`: revert the country's region group to
    // its base color and hide the tooltip.
    pub fn pointer_leave(&mut self, country_name: &str) {
        self.recolor_matches_of(country_name, Recolor::Base);
        self.hover = HoverState::Idle;
    }

    // Viewport-size change: recreate the whole list (path strings depend on
    // the projection fit) and drop any hover.
    pub fn rebuild(
        &mut self,
        features: &[CountryFeature],
        producers: &[CoffeeProducer],
        surface_size: (f64, f64),
    ) {
        self.countries = processing::build_countries(features, producers, surface_size);
        self.hover = HoverState::Idle;
    }

    fn recolor_matches_of(&mut self, country_name: &str, recolor: Recolor) {
        let subject = match self.countries.iter().find(|c| c.country_name == country_name) {
            Some(c) => c.clone(),
            None => return,
        };

        let color = match recolor {
            Recolor::Hover => regions::region_hover_color(&subject.region_un),
            Recolor::Base => regions::region_color(&subject.region_un),
        };

        for country in &mut self.countries {
            if region_match(country, &subject) {
                country.svg.stroke = color;
                country.svg.fill = color;
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Recolor {
    Base,
    Hover,
}
