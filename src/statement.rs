use crate::fetch::Fetch;
use crate::{regex, select};
use anyhow::Result;
use askama::Template;
use derive_builder::Builder;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;

pub const MAX_BODY_CHARS: usize = 1500;

/// Left behind in the title region by the sample-test headers of some pages.
const TITLE_ARTIFACT: &str = "InputOutputInputOutput";
const PROPERTY_TITLE: &str = "property-title";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProblemStatement {
    pub title: String,
    pub time_limit: String,
    pub memory_limit: String,
    pub input_file: String,
    pub output_file: String,
    pub body: String,
}

#[derive(Template)]
#[template(path = "description.txt")]
struct Description<'a> {
    title: &'a str,
    time_limit: &'a str,
    memory_limit: &'a str,
    input_file: &'a str,
    output_file: &'a str,
    body: &'a str,
}

#[derive(Debug, Clone, Builder)]
pub struct StatementExtractor {
    fetcher: Arc<dyn Fetch>,
    #[builder(default = "MAX_BODY_CHARS")]
    max_body_chars: usize,
}

impl StatementExtractor {
    pub async fn extract(&self, url: &str) -> Result<String> {
        let html = self.fetcher.fetch_text(url).await?;
        ProblemStatement::from_html(&html).format(self.max_body_chars)
    }
}

impl ProblemStatement {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = first_text(&document, select!(".title"))
            .replace(TITLE_ARTIFACT, "")
            .trim()
            .to_owned();
        let body = document
            .select(select!(".problem-statement p"))
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            title,
            time_limit: property_value(&document, select!(".time-limit")),
            memory_limit: property_value(&document, select!(".memory-limit")),
            input_file: property_value(&document, select!(".input-file")),
            output_file: property_value(&document, select!(".output-file")),
            body,
        }
    }

    pub fn format(&self, max_body_chars: usize) -> Result<String> {
        let body = truncate_at_sentence(&normalize_markup(&self.body), max_body_chars);
        let description = Description {
            title: &self.title,
            time_limit: &self.time_limit,
            memory_limit: &self.memory_limit,
            input_file: &self.input_file,
            output_file: &self.output_file,
            body: body.trim(),
        };
        Ok(description.render()?)
    }
}

/// Rewrites the TeX fragments of a statement into chat-friendly text. The
/// rules run in order, each one over the output of the previous.
pub fn normalize_markup(text: &str) -> String {
    let text = regex!(r"\$\$\$(.*?)\$\$\$").replace_all(text, "`$1`");
    let text = text
        .replace(r"\ldots", "...")
        .replace(r"\leq", "≤")
        .replace(r"\geq", "≤")
        .replace(r"\neq", "≠");
    let text = regex!(r"\\frac\{([^}]+)\}\{([^}]+)\}").replace_all(&text, "($1/$2)");
    let text = regex!(r"a_([0-9]+)").replace_all(&text, "aᵢ");
    regex!(r"10\^([0-9]+)")
        .replace_all(&text, "10^${1}")
        .into_owned()
}

/// Cuts `text` down to its first `max_chars` characters, backs off to the
/// last `.` in that prefix and appends `...`. Shorter text is returned as is.
pub fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((cut, _)) => {
            let prefix = &text[..cut];
            let end = prefix.rfind('.').map_or(0, |idx| idx + 1);
            format!("{}...", &prefix[..end])
        }
    }
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|elem| elem.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}

// `<div class="time-limit"><div class="property-title">time limit per test</div>1 second</div>`
fn property_value(document: &Html, selector: &Selector) -> String {
    let Some(elem) = document.select(selector).next() else {
        return String::new();
    };
    let value = elem.children().fold(String::new(), |mut ret, node| {
        if let Some(text) = node.value().as_text() {
            ret.push_str(text);
        } else if let Some(child) = ElementRef::wrap(node) {
            if !child.value().classes().any(|class| class == PROPERTY_TITLE) {
                ret.extend(child.text());
            }
        }
        ret
    });
    value.trim().to_owned()
}
