//! A parsed HTML document whose elements can be swapped for notes

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use tracing::debug;

use crate::error::{MotivadError, Result};
use crate::render::escape_html;

/// Class carried by every replacement element.
///
/// Replacements are `<span>` elements so they stay valid inside phrasing content
/// such as a `<p>`; no ad selector targets that tag or this class.
pub const NOTE_CLASS: &str = "nudge-note";

static NOTE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!("span.{}", NOTE_CLASS)).expect("Invalid note selector")
});

/// Summary of a matched element, for logging and listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdElement {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl AdElement {
    fn from_element(el: ElementRef<'_>) -> Self {
        let value = el.value();
        Self {
            tag: value.name().to_string(),
            id: value.attr("id").map(String::from),
            class: value.attr("class").map(String::from),
            src: value.attr("src").map(String::from),
        }
    }

    /// CSS-like label, e.g. `div#top-ad.ad-slot`
    pub fn describe(&self) -> String {
        let mut label = self.tag.clone();
        if let Some(ref id) = self.id {
            label.push('#');
            label.push_str(id);
        }
        if let Some(ref class) = self.class {
            for c in class.split_whitespace() {
                label.push('.');
                label.push_str(c);
            }
        }
        label
    }
}

/// What happened to one matched element
#[derive(Debug)]
pub enum ElementOutcome<T> {
    Replaced { element: AdElement, content: T },
    /// No longer in the document when its turn came
    Skipped { element: AdElement },
    Failed { element: AdElement, error: MotivadError },
}

/// A mutable HTML document
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Elements currently in the document matching `selector`, in document order
    pub fn find(&self, selector: &Selector) -> Vec<AdElement> {
        self.html
            .root_element()
            .select(selector)
            .map(AdElement::from_element)
            .collect()
    }

    /// Replace every element matching `selector` with a note.
    ///
    /// `make_content` is asked for the note text of each element still attached
    /// when its turn comes. An error from `make_content` or from the swap fails
    /// that element only.
    pub fn replace_each<T, F>(&mut self, selector: &Selector, mut make_content: F) -> Vec<ElementOutcome<T>>
    where
        T: AsRef<str>,
        F: FnMut(&AdElement) -> Result<T>,
    {
        let root = self.html.tree.root().id();
        let targets: Vec<_> = self
            .html
            .root_element()
            .select(selector)
            .map(|el| (el.id(), AdElement::from_element(el)))
            .collect();

        let mut outcomes = Vec::with_capacity(targets.len());
        for (node_id, element) in targets {
            let attached = self
                .html
                .tree
                .get(node_id)
                .map(|node| node.ancestors().any(|a| a.id() == root))
                .unwrap_or(false);
            if !attached {
                debug!(element = %element.describe(), "skipping element removed by an earlier replacement");
                outcomes.push(ElementOutcome::Skipped { element });
                continue;
            }

            let content = match make_content(&element) {
                Ok(content) => content,
                Err(error) => {
                    outcomes.push(ElementOutcome::Failed { element, error });
                    continue;
                }
            };

            let (note, children) = match note_nodes(content.as_ref()) {
                Ok(nodes) => nodes,
                Err(error) => {
                    outcomes.push(ElementOutcome::Failed { element, error });
                    continue;
                }
            };

            match self.html.tree.get_mut(node_id) {
                Some(mut target) => {
                    {
                        let mut inserted = target.insert_before(note);
                        for child in children {
                            inserted.append(child);
                        }
                    }
                    target.detach();
                    outcomes.push(ElementOutcome::Replaced { element, content });
                }
                None => outcomes.push(ElementOutcome::Failed {
                    element,
                    error: MotivadError::Detached,
                }),
            }
        }

        outcomes
    }

    /// Text of every replacement note, in document order
    pub fn notes(&self) -> Vec<String> {
        self.html
            .root_element()
            .select(&NOTE_SELECTOR)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    /// Serialize the document
    pub fn to_html(&self) -> String {
        self.html.html()
    }
}

/// Build the `<span class="nudge-note">` element and its children for `text`
fn note_nodes(text: &str) -> Result<(Node, Vec<Node>)> {
    let markup = format!("<span class=\"{}\">{}</span>", NOTE_CLASS, escape_html(text));
    let fragment = Html::parse_fragment(&markup);
    let note = fragment
        .select(&NOTE_SELECTOR)
        .next()
        .ok_or(MotivadError::Detached)?;

    let children = note.children().map(|child| child.value().clone()).collect();
    Ok((Node::Element(note.value().clone()), children))
}
