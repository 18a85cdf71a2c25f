//! Writes a finished plan to disk as Markdown and HTML.

use crate::plan::PlanDocument;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write brief: {0}")]
    Io(#[from] std::io::Error),
}

/// Paths of an exported brief
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedBrief {
    pub markdown: PathBuf,
    pub html: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BriefExporter {
    output_dir: PathBuf,
}

impl BriefExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn export(&self, plan: &PlanDocument) -> Result<ExportedBrief, ExportError> {
        self.export_at(plan, Local::now()).await
    }

    pub async fn export_at(
        &self,
        plan: &PlanDocument,
        generated_at: DateTime<Local>,
    ) -> Result<ExportedBrief, ExportError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let stamp = generated_at.format("%Y%m%d_%H%M%S");
        let markdown = self.output_dir.join(format!("website_brief_{stamp}.md"));
        let html = self.output_dir.join(format!("website_brief_{stamp}.html"));

        tokio::fs::write(&markdown, plan.to_markdown()).await?;
        tokio::fs::write(&html, render_html(plan, generated_at)).await?;

        tracing::info!(
            markdown = %markdown.display(),
            html = %html.display(),
            "Exported website brief"
        );

        Ok(ExportedBrief { markdown, html })
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_html(plan: &PlanDocument, generated_at: DateTime<Local>) -> String {
    let mut body = String::new();
    for (index, section) in plan.sections().iter().enumerate() {
        body.push_str(&format!(
            "    <div class=\"section\">\n      <h2>{}. {}</h2>\n      <ul>\n",
            index + 1,
            escape_html(section.title())
        ));
        for field in &section.fields {
            let class = if field.value.is_some() { "" } else { " class=\"unspecified\"" };
            body.push_str(&format!(
                "        <li{}><strong>{}:</strong> {}</li>\n",
                class,
                escape_html(field.label()),
                escape_html(field.display_value())
            ));
        }
        body.push_str("      </ul>\n    </div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Website Requirements Brief</title>
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; line-height: 1.6; }}
    h1, h2 {{ color: #2c3e50; }}
    h2 {{ margin-top: 30px; }}
    .section {{ margin-bottom: 30px; }}
    .timestamp {{ color: #7f8c8d; font-size: 0.9em; }}
    .content {{ background: #f9f9f9; padding: 20px; border-radius: 5px; }}
    .unspecified {{ color: #95a5a6; }}
  </style>
</head>
<body>
  <h1>Website Requirements Brief</h1>
  <p class="timestamp">Generated: {}</p>
  <div class="content">
{}  </div>
</body>
</html>
"#,
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::session::{CompletionPolicy, Question, SessionCollector};
    use chrono::TimeZone;

    fn plan_with(answer: &str) -> PlanDocument {
        let mut collector = SessionCollector::new(CompletionPolicy::new([Category::Branding]));
        collector
            .record(&Question::new(Category::Branding, "Branding?"), answer)
            .unwrap();
        collector.render_plan().unwrap()
    }

    #[test]
    fn test_html_escapes_answers() {
        let html = render_html(&plan_with("<b>Bold</b> & \"bright\""), Local::now());
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; &quot;bright&quot;"));
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("<h2>2. Audience &amp; Goals</h2>"));
    }

    #[tokio::test]
    async fn test_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = BriefExporter::new(dir.path().join("briefs"));
        let generated_at = Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();

        let exported = exporter
            .export_at(&plan_with("Navy and gold"), generated_at)
            .await
            .unwrap();

        assert!(exported
            .markdown
            .ends_with("briefs/website_brief_20240517_093000.md"));
        let markdown = std::fs::read_to_string(&exported.markdown).unwrap();
        assert!(markdown.contains("- **Branding:** Navy and gold"));

        let html = std::fs::read_to_string(&exported.html).unwrap();
        assert!(html.contains("Generated: 2024-05-17 09:30:00"));
        assert!(html.contains("<strong>Target Audience:</strong> Not specified"));
    }
}
