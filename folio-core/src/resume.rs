//! Printable resume assembled from the page's own content
//!
//! The host scrapes the about, skills, projects and achievements sections
//! into a [`ResumeDocument`], writes the HTML fragments into the hidden print
//! container and hands that container to the PDF exporter with
//! [`PdfOptions`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub tech: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub summary: String,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<ProjectEntry>,
    pub achievements: Vec<Achievement>,
}

impl ResumeDocument {
    /// Join the first two about paragraphs into one summary line
    pub fn summary_from(paragraphs: &[String]) -> String {
        paragraphs
            .iter()
            .take(2)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `<ul>` of "Category: tag, tag"
    pub fn skills_html(&self) -> String {
        list(self.skills.iter().map(|s| {
            format!(
                "<strong>{}:</strong> {}",
                escape_html(&s.category),
                escape_html(&s.tags.join(", "))
            )
        }))
    }

    /// `<ul>` of "Title (tech): description"
    pub fn projects_html(&self) -> String {
        list(self.projects.iter().map(|p| {
            format!(
                "<strong>{}</strong> ({}): {}",
                escape_html(&p.title),
                escape_html(&p.tech.join(", ")),
                escape_html(&p.description)
            )
        }))
    }

    /// `<ul>` of "Title: description"
    pub fn achievements_html(&self) -> String {
        list(self.achievements.iter().map(|a| {
            format!(
                "<strong>{}:</strong> {}",
                escape_html(&a.title),
                escape_html(&a.description)
            )
        }))
    }
}

fn list(items: impl Iterator<Item = String>) -> String {
    let mut html = String::from("<ul>");
    for item in items {
        html.push_str("<li>");
        html.push_str(&item);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Escape text for safe insertion between HTML tags
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Options object in the shape the `html2pdf` exporter expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfOptions {
    pub margin: f32,
    pub filename: String,
    pub image: ImageOptions,
    pub html2canvas: CanvasOptions,
    #[serde(rename = "jsPDF")]
    pub js_pdf: PageOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub quality: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasOptions {
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub unit: String,
    pub format: String,
    pub orientation: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin: 0.5,
            filename: "Jitesh_Choudhary_Resume.pdf".to_string(),
            image: ImageOptions {
                kind: "jpeg".to_string(),
                quality: 0.98,
            },
            html2canvas: CanvasOptions { scale: 2.0 },
            js_pdf: PageOptions {
                unit: "in".to_string(),
                format: "letter".to_string(),
                orientation: "portrait".to_string(),
            },
        }
    }
}
