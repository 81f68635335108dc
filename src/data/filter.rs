use serde::{Deserialize, Serialize};

use super::model::Facility;

// ---------------------------------------------------------------------------
// Attribute predicates
// ---------------------------------------------------------------------------

/// True when a free-form attribute reads "yes" in any casing.
pub fn is_yes(value: &str) -> bool {
    value.to_lowercase() == "yes"
}

/// The reference predicate: keep only facilities with baby change.
pub fn requires_baby_change(facility: &Facility) -> bool {
    is_yes(&facility.baby_change_available)
}

/// Which attributes a facility must offer to be shown.
///
/// A flag that is `false` places no constraint; with every flag off all
/// facilities pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityFilter {
    pub baby_change_required: bool,
    pub accessible_required: bool,
}

impl Default for FacilityFilter {
    fn default() -> Self {
        Self {
            baby_change_required: true,
            accessible_required: false,
        }
    }
}

impl FacilityFilter {
    /// No constraints at all.
    pub fn any() -> Self {
        Self {
            baby_change_required: false,
            accessible_required: false,
        }
    }

    pub fn matches(&self, facility: &Facility) -> bool {
        (!self.baby_change_required || requires_baby_change(facility))
            && (!self.accessible_required || is_yes(&facility.accessibility_info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(baby_change: &str, accessible: &str) -> Facility {
        Facility {
            name: "WC".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            opening_hours: String::new(),
            accessibility_info: accessible.to_string(),
            baby_change_available: baby_change.to_string(),
            charge_amount: String::new(),
        }
    }

    #[test]
    fn baby_change_predicate_is_case_insensitive_yes() {
        for yes in ["Yes", "YES", "yes", "yEs"] {
            assert!(requires_baby_change(&facility(yes, "")), "{yes}");
        }
        for no in ["No", "no", "", "Y", "yes please", " Yes"] {
            assert!(!requires_baby_change(&facility(no, "")), "{no:?}");
        }
    }

    #[test]
    fn default_filter_requires_baby_change_only() {
        let filter = FacilityFilter::default();
        assert!(filter.matches(&facility("Yes", "No")));
        assert!(!filter.matches(&facility("No", "Yes")));
    }

    #[test]
    fn flags_combine() {
        let filter = FacilityFilter {
            baby_change_required: true,
            accessible_required: true,
        };
        assert!(filter.matches(&facility("yes", "YES")));
        assert!(!filter.matches(&facility("yes", "No")));
        assert!(FacilityFilter::any().matches(&facility("", "")));
    }

    #[test]
    fn missing_flags_fall_back_to_defaults() {
        let filter: FacilityFilter = serde_json::from_str(r#"{"accessible_required": true}"#).unwrap();
        assert!(filter.baby_change_required);
        assert!(filter.accessible_required);
    }
}
