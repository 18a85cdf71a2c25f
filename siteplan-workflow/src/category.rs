//! Plan categories and the sections they belong to.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six sections of a website plan, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ProjectOverview,
    AudienceAndGoals,
    DesignRequirements,
    TechnicalSpecifications,
    ContentStrategy,
    SpecialConsiderations,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::ProjectOverview,
        Section::AudienceAndGoals,
        Section::DesignRequirements,
        Section::TechnicalSpecifications,
        Section::ContentStrategy,
        Section::SpecialConsiderations,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::ProjectOverview => "Project Overview",
            Section::AudienceAndGoals => "Audience & Goals",
            Section::DesignRequirements => "Design Requirements",
            Section::TechnicalSpecifications => "Technical Specifications",
            Section::ContentStrategy => "Content Strategy",
            Section::SpecialConsiderations => "Special Considerations",
        }
    }

    /// Categories rendered under this section, in order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| category.section() == *self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A labeled dimension of the website plan.
///
/// Declaration order is the rendering order: sorting categories sorts them
/// by section first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WebsiteType,
    WebsitePurpose,
    TargetAudience,
    PrimaryGoals,
    DesignStyle,
    Branding,
    KeyFeatures,
    Integrations,
    HostingPlatform,
    Security,
    ContentTypes,
    UpdateFrequency,
    BudgetTimeline,
    PerformanceScalability,
    AdditionalNotes,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::WebsiteType,
        Category::WebsitePurpose,
        Category::TargetAudience,
        Category::PrimaryGoals,
        Category::DesignStyle,
        Category::Branding,
        Category::KeyFeatures,
        Category::Integrations,
        Category::HostingPlatform,
        Category::Security,
        Category::ContentTypes,
        Category::UpdateFrequency,
        Category::BudgetTimeline,
        Category::PerformanceScalability,
        Category::AdditionalNotes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::WebsiteType => "Website Type",
            Category::WebsitePurpose => "Website Purpose",
            Category::TargetAudience => "Target Audience",
            Category::PrimaryGoals => "Primary Goals",
            Category::DesignStyle => "Design Style",
            Category::Branding => "Branding",
            Category::KeyFeatures => "Key Features",
            Category::Integrations => "Integrations",
            Category::HostingPlatform => "Hosting & Platform",
            Category::Security => "Security",
            Category::ContentTypes => "Content Types",
            Category::UpdateFrequency => "Update Frequency",
            Category::BudgetTimeline => "Budget & Timeline",
            Category::PerformanceScalability => "Performance & Scalability",
            Category::AdditionalNotes => "Additional Notes",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Category::WebsiteType | Category::WebsitePurpose => Section::ProjectOverview,
            Category::TargetAudience | Category::PrimaryGoals => Section::AudienceAndGoals,
            Category::DesignStyle | Category::Branding => Section::DesignRequirements,
            Category::KeyFeatures
            | Category::Integrations
            | Category::HostingPlatform
            | Category::Security => Section::TechnicalSpecifications,
            Category::ContentTypes | Category::UpdateFrequency => Section::ContentStrategy,
            Category::BudgetTimeline
            | Category::PerformanceScalability
            | Category::AdditionalNotes => Section::SpecialConsiderations,
        }
    }

    /// Wire name used in model responses (e.g. `design_style`)
    pub fn key(&self) -> &'static str {
        match self {
            Category::WebsiteType => "website_type",
            Category::WebsitePurpose => "website_purpose",
            Category::TargetAudience => "target_audience",
            Category::PrimaryGoals => "primary_goals",
            Category::DesignStyle => "design_style",
            Category::Branding => "branding",
            Category::KeyFeatures => "key_features",
            Category::Integrations => "integrations",
            Category::HostingPlatform => "hosting_platform",
            Category::Security => "security",
            Category::ContentTypes => "content_types",
            Category::UpdateFrequency => "update_frequency",
            Category::BudgetTimeline => "budget_timeline",
            Category::PerformanceScalability => "performance_scalability",
            Category::AdditionalNotes => "additional_notes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown plan category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts either the label ("Design Style") or the wire name
    /// ("design_style"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.label().eq_ignore_ascii_case(needle)
                    || category.key().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_categories() {
        for section in Section::ALL {
            assert!(
                section.categories().count() > 0,
                "{} has no categories",
                section
            );
        }
    }

    #[test]
    fn test_declaration_order_follows_sections() {
        let mut sorted = Category::ALL.to_vec();
        sorted.sort_by_key(|category| category.section());
        assert_eq!(sorted, Category::ALL.to_vec());
    }

    #[test]
    fn test_parse_label_and_key() {
        assert_eq!("Design Style".parse::<Category>(), Ok(Category::DesignStyle));
        assert_eq!("design_style".parse::<Category>(), Ok(Category::DesignStyle));
        assert_eq!(
            "  website purpose ".parse::<Category>(),
            Ok(Category::WebsitePurpose)
        );
        assert_eq!(
            "Performance & Scalability".parse::<Category>(),
            Ok(Category::PerformanceScalability)
        );
        assert!("Favourite Colour".parse::<Category>().is_err());
    }

    #[test]
    fn test_security_and_performance_have_their_own_fields() {
        assert_eq!(Category::Security.section(), Section::TechnicalSpecifications);
        assert_eq!(
            Category::PerformanceScalability.section(),
            Section::SpecialConsiderations
        );
        assert_ne!(Category::Security, Category::AdditionalNotes);
    }

    #[test]
    fn test_serde_uses_key() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }
}
