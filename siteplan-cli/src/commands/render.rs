//! Print the plan stored in a saved session

use crate::error::CliError;
use siteplan_workflow::storage::FileSessionStore;
use std::path::Path;

pub async fn render_state(state: &Path, markdown: bool) -> Result<(), CliError> {
    let snapshot = FileSessionStore::read_file(state).await?;
    println!("{}", render_snapshot_text(&snapshot, markdown)?);
    Ok(())
}

fn render_snapshot_text(
    snapshot: &siteplan_workflow::SessionSnapshot,
    markdown: bool,
) -> Result<String, CliError> {
    let plan = snapshot.collector().render_plan()?;
    Ok(if markdown {
        plan.to_markdown()
    } else {
        plan.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use siteplan_workflow::{
        Category, CompletionPolicy, Question, SessionCollector, SessionSnapshot, SessionState,
    };
    use uuid::Uuid;

    fn snapshot(answers: &[(Category, &str)]) -> SessionSnapshot {
        let mut collector = SessionCollector::new(CompletionPolicy::default());
        for (category, answer) in answers {
            let question = Question::new(*category, format!("Tell me about {}", category.label()));
            collector.record(&question, answer).unwrap();
        }
        SessionSnapshot {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            state: SessionState::Collecting,
            policy: CompletionPolicy::default(),
            exchanges: collector.exchanges().to_vec(),
            history: Vec::new(),
            asked_questions: Vec::new(),
            question_count: answers.len(),
            expertise: None,
            pending: None,
        }
    }

    #[test]
    fn test_incomplete_snapshot_reports_missing() {
        let snapshot = snapshot(&[(Category::WebsitePurpose, "E-commerce")]);
        let err = render_snapshot_text(&snapshot, false).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("Budget & Timeline"));
    }

    #[tokio::test]
    async fn test_render_saved_state_file() {
        let snapshot = snapshot(&[
            (Category::WebsitePurpose, "E-commerce"),
            (Category::PrimaryGoals, "Sell handmade jewelry online"),
            (Category::DesignStyle, "Modern"),
            (Category::KeyFeatures, "Shopping cart"),
            (Category::ContentTypes, "Product photos"),
            (Category::BudgetTimeline, "$5,000 over three months"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversation_state_20240101_120000.json");
        std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

        assert!(render_state(&path, true).await.is_ok());

        let text = render_snapshot_text(&snapshot, false).unwrap();
        assert!(text.contains("Design Style: Modern"));
        assert!(text.contains("Target Audience: Not specified"));

        let markdown = render_snapshot_text(&snapshot, true).unwrap();
        assert!(markdown.contains("- **Key Features:** Shopping cart"));
    }

    #[tokio::test]
    async fn test_missing_state_file() {
        let err = render_state(Path::new("/nonexistent/state.json"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Storage(_)));
    }
}
