//! The membership tier lookup shared by every page that renders a customer.

/// A customer's membership level, derived from their member number.
///
/// Member numbers are persisted as text, so any value that does not parse as
/// a tier from 1 to 4 maps to [MemberTier::Unknown].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberTier {
    /// Tier 1.
    Bronze,
    /// Tier 2.
    Silver,
    /// Tier 3.
    Gold,
    /// Tier 4.
    Platinum,
    /// Fallback for member numbers outside the known tiers.
    Unknown,
}

/// The known tiers with their numeric form, in ascending order.
///
/// Used to render the tier `<select>` options on the customer forms.
pub const TIER_CHOICES: [(u8, MemberTier); 4] = [
    (1, MemberTier::Bronze),
    (2, MemberTier::Silver),
    (3, MemberTier::Gold),
    (4, MemberTier::Platinum),
];

impl MemberTier {
    /// Look up the tier for a raw member number string.
    pub fn from_member_number(member_number: &str) -> Self {
        match member_number.trim() {
            "1" => MemberTier::Bronze,
            "2" => MemberTier::Silver,
            "3" => MemberTier::Gold,
            "4" => MemberTier::Platinum,
            _ => MemberTier::Unknown,
        }
    }

    /// The display name for the tier.
    pub fn label(&self) -> &'static str {
        match self {
            MemberTier::Bronze => "Bronze",
            MemberTier::Silver => "Silver",
            MemberTier::Gold => "Gold",
            MemberTier::Platinum => "Platinum",
            MemberTier::Unknown => "Unknown",
        }
    }

    /// A one-line description of the tier's benefits.
    pub fn description(&self) -> &'static str {
        match self {
            MemberTier::Bronze => "Basic membership with standard benefits",
            MemberTier::Silver => "Standard membership with enhanced benefits",
            MemberTier::Gold => "Premium membership with exclusive benefits",
            MemberTier::Platinum => "Elite membership with all premium benefits",
            MemberTier::Unknown => "Membership tier not recognized",
        }
    }

    /// The Tailwind classes for the tier's badge.
    pub fn badge_style(&self) -> &'static str {
        match self {
            MemberTier::Bronze => "bg-amber-100 text-amber-800 border-amber-200",
            MemberTier::Silver => "bg-gray-100 text-gray-800 border-gray-200",
            MemberTier::Gold => "bg-yellow-100 text-yellow-800 border-yellow-200",
            MemberTier::Platinum => "bg-purple-100 text-purple-800 border-purple-200",
            MemberTier::Unknown => "bg-gray-100 text-gray-800 border-gray-200",
        }
    }
}

#[cfg(test)]
mod member_tier_tests {
    use std::collections::HashSet;

    use super::{MemberTier, TIER_CHOICES};

    #[test]
    fn known_tiers_have_distinct_labels() {
        let labels: HashSet<&str> = TIER_CHOICES
            .iter()
            .map(|(_, tier)| tier.label())
            .collect();

        assert_eq!(labels.len(), 4);
        assert!(!labels.contains("Unknown"));
    }

    #[test]
    fn every_known_number_maps_to_its_tier() {
        for (number, want) in TIER_CHOICES {
            let got = MemberTier::from_member_number(&number.to_string());

            assert_eq!(got, want);
        }
    }

    #[test]
    fn unknown_numbers_fall_back() {
        for member_number in ["0", "5", "42", "-1", "gold", "", "1.5"] {
            let tier = MemberTier::from_member_number(member_number);

            assert_eq!(tier, MemberTier::Unknown);
        }
    }

    #[test]
    fn whitespace_is_ignored() {
        let tier = MemberTier::from_member_number(" 3 ");

        assert_eq!(tier, MemberTier::Gold);
    }
}
