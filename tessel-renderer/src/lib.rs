//! Streaming renderer for tessel templates.
//!
//! Walks a parsed [`Document`] depth first and writes it to any
//! [`std::io::Write`] sink, one tag or text run per line, applying the three
//! directive attributes as it goes:
//!
//! - `t:if="${flag}"` drops the element and its subtree when false;
//! - `t:each="item: ${items}"` repeats the element once per item with `item`
//!   bound in the context;
//! - `t:text="${user.name}"` replaces the element's children with a value.
//!
//! Directive attributes never appear in the output. The document itself is
//! never modified, so one parse can be rendered many times.

mod error;
mod render;

pub use error::RenderError;
pub use render::{render, render_to_string};

use tessel_dom::Document;

pub const IF_ATTR: &str = "t:if";
pub const EACH_ATTR: &str = "t:each";
pub const TEXT_ATTR: &str = "t:text";

/// All reserved directive attribute names.
pub const DIRECTIVES: [&str; 3] = [IF_ATTR, EACH_ATTR, TEXT_ATTR];

pub fn is_directive(name: &str) -> bool {
    DIRECTIVES.contains(&name)
}

/// Counts of what a document contains, mostly for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub elements: usize,
    pub texts: usize,
    pub directives: usize,
}

fn summarize(nodes: &[tessel_dom::Node], counts: &mut Summary) {
    for node in nodes {
        match node {
            tessel_dom::Node::Text(_) => counts.texts += 1,
            tessel_dom::Node::Element {
                attrs, children, ..
            } => {
                counts.elements += 1;
                counts.directives += attrs.iter().filter(|a| is_directive(&a.name)).count();
                summarize(children, counts);
            }
        }
    }
}

pub fn summary(doc: &Document) -> Summary {
    let mut counts = Summary::default();
    summarize(&doc.children, &mut counts);
    counts
}
