//! Read-only plan document derived from a session's answers.

use crate::category::{Category, Section};
use crate::session::SessionAnswers;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanField {
    pub category: Category,
    pub value: Option<String>,
}

impl PlanField {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(NOT_SPECIFIED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSection {
    pub section: Section,
    pub fields: Vec<PlanField>,
}

impl PlanSection {
    pub fn title(&self) -> &'static str {
        self.section.title()
    }

    pub fn field(&self, category: Category) -> Option<&PlanField> {
        self.fields.iter().find(|field| field.category == category)
    }
}

/// The final website plan: six sections, Project Overview first and
/// Special Considerations last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDocument {
    sections: Vec<PlanSection>,
}

impl PlanDocument {
    pub(crate) fn from_answers(answers: &SessionAnswers) -> Self {
        let sections = Section::ALL
            .into_iter()
            .map(|section| PlanSection {
                section,
                fields: section
                    .categories()
                    .map(|category| PlanField {
                        category,
                        value: answers.get(category).map(str::to_string),
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    pub fn sections(&self) -> &[PlanSection] {
        &self.sections
    }

    pub fn field(&self, category: Category) -> Option<&PlanField> {
        self.sections
            .iter()
            .find(|section| section.section == category.section())
            .and_then(|section| section.field(category))
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Website Plan\n");
        for (index, section) in self.sections.iter().enumerate() {
            out.push_str(&format!("\n## {}. {}\n\n", index + 1, section.title()));
            for field in &section.fields {
                out.push_str(&format!(
                    "- **{}:** {}\n",
                    field.label(),
                    field.display_value()
                ));
            }
        }
        out
    }
}

impl fmt::Display for PlanDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}. {}", index + 1, section.title())?;
            for field in &section.fields {
                writeln!(f, "   - {}: {}", field.label(), field.display_value())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Question, SessionCollector};

    fn sample_collector() -> SessionCollector {
        let mut collector = SessionCollector::default();
        let answers = [
            (Category::WebsitePurpose, "E-commerce"),
            (Category::PrimaryGoals, "Sell handmade jewelry online"),
            (Category::DesignStyle, "Modern"),
            (Category::KeyFeatures, "Product catalog, shopping cart, secure checkout"),
            (Category::ContentTypes, "Product photos and descriptions"),
            (Category::BudgetTimeline, "$5,000 over three months"),
        ];
        for (category, answer) in answers {
            collector
                .record(&Question::new(category, category.label()), answer)
                .unwrap();
        }
        collector
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let plan = sample_collector().render_plan().unwrap();
        let titles: Vec<&str> = plan.sections().iter().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Project Overview",
                "Audience & Goals",
                "Design Requirements",
                "Technical Specifications",
                "Content Strategy",
                "Special Considerations",
            ]
        );
    }

    #[test]
    fn test_recorded_values_render_verbatim() {
        let text = sample_collector().render_plan().unwrap().to_string();

        assert!(text.contains("   - Website Purpose: E-commerce\n"));
        assert!(text.contains("   - Primary Goals: Sell handmade jewelry online\n"));
        assert!(text.contains("   - Design Style: Modern\n"));
        assert!(text.contains(
            "   - Key Features: Product catalog, shopping cart, secure checkout\n"
        ));
        assert!(text.contains("   - Content Types: Product photos and descriptions\n"));
        assert!(text.contains("   - Budget & Timeline: $5,000 over three months\n"));
        assert!(text.contains("   - Target Audience: Not specified\n"));
    }

    #[test]
    fn test_unrecorded_fields_not_specified() {
        let plan = sample_collector().render_plan().unwrap();
        let audience = plan.field(Category::TargetAudience).unwrap();
        assert_eq!(audience.value, None);
        assert_eq!(audience.display_value(), NOT_SPECIFIED);

        // Only recorded categories carry a value
        let valued = plan
            .sections()
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter(|f| f.value.is_some())
            .count();
        assert_eq!(valued, 6);
    }

    #[test]
    fn test_text_layout() {
        let text = sample_collector().render_plan().unwrap().to_string();
        assert!(text.starts_with("1. Project Overview\n   - Website Type: Not specified\n"));
        assert!(text.contains("\n\n6. Special Considerations\n"));
        assert!(text.ends_with("   - Additional Notes: Not specified\n"));
    }

    #[test]
    fn test_markdown_layout() {
        let markdown = sample_collector().render_plan().unwrap().to_markdown();
        assert!(markdown.starts_with("# Website Plan\n"));
        assert!(markdown.contains("## 3. Design Requirements\n\n- **Design Style:** Modern\n"));
    }
}
