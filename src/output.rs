//! Writers for a rendered page: colored terminal text, JSON, and HTML.

use askama::Template;
use clap::ValueEnum;
use colored::*;
use std::io::Write;

use crate::error::Result;
use crate::query::SortKey;
use crate::view::RenderedPage;

/// Languages offered by the page's language dropdown.
pub const LANGUAGES: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "TypeScript",
    "Go",
    "Rust",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// Control values echoed back into the HTML page.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub language: Option<String>,
    pub sort: SortKey,
    pub show_counts: bool,
}

pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub page: &'a RenderedPage,
    pub languages: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    pub show_counts: bool,
}

impl<'a> PageTemplate<'a> {
    pub fn new(page: &'a RenderedPage, controls: &Controls) -> Self {
        let selected_language = controls.language.as_deref().unwrap_or_default();
        let languages = LANGUAGES
            .iter()
            .map(|name| SelectOption {
                value: name.to_string(),
                selected: *name == selected_language,
            })
            .collect();
        let sorts = [SortKey::Stars, SortKey::Forks, SortKey::Updated]
            .iter()
            .map(|key| SelectOption {
                value: key.to_string(),
                selected: *key == controls.sort,
            })
            .collect();

        Self {
            page,
            languages,
            sorts,
            show_counts: controls.show_counts,
        }
    }
}

pub fn render_html(page: &RenderedPage, controls: &Controls) -> Result<String> {
    Ok(PageTemplate::new(page, controls).render()?)
}

pub fn render_json(page: &RenderedPage) -> Result<String> {
    Ok(serde_json::to_string_pretty(page)?)
}

pub fn write_text<W: Write>(out: &mut W, page: &RenderedPage) -> Result<()> {
    if page.empty_visible || page.cards.is_empty() {
        writeln!(out, "{}", "No repositories found.".yellow())?;
        return Ok(());
    }

    for card in &page.cards {
        writeln!(out, "{}", card.full_name.bold().green())?;
        writeln!(out, "  {}", card.url.dimmed())?;
        writeln!(out, "  {}", card.description)?;

        let mut footer = format!("  {}", card.language.cyan());
        if !card.stars.hidden {
            footer.push_str(&format!("  ★ {}", card.stars.label));
        }
        if !card.forks.hidden {
            footer.push_str(&format!("  ⑂ {}", card.forks.label));
        }
        writeln!(out, "{}\n", footer)?;
    }
    Ok(())
}

pub fn write_page<W: Write>(
    out: &mut W,
    page: &RenderedPage,
    format: OutputFormat,
    controls: &Controls,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, page),
        OutputFormat::Json => Ok(writeln!(out, "{}", render_json(page)?)?),
        OutputFormat::Html => Ok(writeln!(out, "{}", render_html(page, controls)?)?),
    }
}
