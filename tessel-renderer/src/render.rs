use std::borrow::Cow;
use std::io::Write;

use tessel_core::{Context, EachSpec, PropertyPath, Value, is_true, resolve_path, to_sequence};
use tessel_dom::{Attrs, Document, Node};

use crate::{EACH_ATTR, IF_ATTR, RenderError, TEXT_ATTR, is_directive};

/// Render `doc` against `ctx` into `out`, flushing `out` at the end whether
/// or not rendering succeeded.
///
/// `ctx` is only modified while a `t:each` subtree renders; on return every
/// loop variable is back to its previous binding (or unbound), including
/// when an error aborted the render part way.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render<W: Write>(doc: &Document, ctx: &mut Context, out: &mut W) -> Result<(), RenderError> {
    let counts = crate::summary(doc);
    tracing::debug!(
        elements = counts.elements,
        directives = counts.directives,
        vars = ctx.len(),
        "render start"
    );

    let result = Renderer { ctx, out: &mut *out }.nodes(&doc.children);
    let flushed = out.flush();

    match &result {
        Ok(()) => tracing::debug!("render done"),
        Err(err) => tracing::debug!(%err, "render aborted"),
    }
    result?;
    flushed?;
    Ok(())
}

/// Convenience wrapper collecting the output in memory.
pub fn render_to_string(doc: &Document, ctx: &mut Context) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render(doc, ctx, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Borrowed view of an element node.
struct Element<'n> {
    tag: &'n str,
    attrs: &'n Attrs,
    children: &'n [Node],
    self_closing: bool,
}

/// What goes between an element's tags when it carries `t:text`.
enum Content<'n> {
    Children,
    Text(String),
    /// Depends on the element's own loop variable; resolved per item.
    PerItem(PropertyPath, &'n str),
}

struct Renderer<'a, W> {
    ctx: &'a mut Context,
    out: &'a mut W,
}

impl<W: Write> Renderer<'_, W> {
    fn nodes(&mut self, nodes: &[Node]) -> Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Text(t) => self.text(t)?,
                Node::Element {
                    tag,
                    attrs,
                    children,
                    self_closing,
                } => self.element(&Element {
                    tag,
                    attrs,
                    children,
                    self_closing: *self_closing,
                })?,
            }
        }
        Ok(())
    }

    fn element(&mut self, el: &Element<'_>) -> Result<(), RenderError> {
        tracing::trace!(tag = el.tag, "visit");

        if let Some(cond) = directive(el.attrs, IF_ATTR) {
            if !is_true(cond, self.ctx, None)? {
                tracing::debug!(tag = el.tag, cond, "condition false, subtree skipped");
                return Ok(());
            }
        }

        let each = match directive(el.attrs, EACH_ATTR) {
            Some(text) => Some((text, EachSpec::parse(text)?)),
            None => None,
        };
        let loop_var = each.as_ref().map(|(_, spec)| spec.var.as_str());

        let content = match directive(el.attrs, TEXT_ATTR) {
            None => Content::Children,
            Some(expr) => {
                let path = PropertyPath::parse(expr)?;
                if loop_var == Some(path.base.as_str()) {
                    Content::PerItem(path, expr)
                } else {
                    let value = resolve_path(&path, expr, self.ctx, None)?;
                    Content::Text(value.to_string())
                }
            }
        };

        match each {
            Some((expr, spec)) => self.each(el, expr, &spec, &content),
            None => self.emit(el, &content),
        }
    }

    fn each(
        &mut self,
        el: &Element<'_>,
        expr: &str,
        spec: &EachSpec,
        content: &Content<'_>,
    ) -> Result<(), RenderError> {
        let collection = resolve_path(&spec.path, expr, self.ctx, None)?;
        let items = to_sequence(collection, expr)?;
        tracing::debug!(var = %spec.var, items = items.len(), "loop start");

        let prior = self.ctx.get(&spec.var).cloned();
        let result = items.into_iter().try_for_each(|item: Value| {
            self.ctx.put(spec.var.as_str(), item);
            self.emit(el, content)
        });
        self.ctx.restore(&spec.var, prior);

        tracing::debug!(var = %spec.var, "loop variable restored");
        result
    }

    fn emit(&mut self, el: &Element<'_>, content: &Content<'_>) -> Result<(), RenderError> {
        let text = match content {
            Content::Children => None,
            Content::Text(t) => Some(Cow::Borrowed(t.as_str())),
            Content::PerItem(path, expr) => {
                Some(Cow::Owned(resolve_path(path, expr, self.ctx, None)?.to_string()))
            }
        };

        let leaf = el.self_closing && el.children.is_empty() && text.is_none();
        self.open_tag(el, leaf)?;
        if leaf {
            return Ok(());
        }

        match text {
            Some(t) if !t.is_empty() => writeln!(self.out, "{}", escape_text(&t))?,
            Some(_) => {}
            None => self.nodes(el.children)?,
        }
        writeln!(self.out, "</{}>", el.tag)?;
        Ok(())
    }

    fn open_tag(&mut self, el: &Element<'_>, leaf: bool) -> Result<(), RenderError> {
        write!(self.out, "<{}", el.tag)?;
        for attr in el.attrs.iter().filter(|a| !is_directive(&a.name)) {
            match &attr.value {
                Some(v) => write!(self.out, " {}=\"{}\"", attr.name, escape_attr(v))?,
                None => write!(self.out, " {}", attr.name)?,
            }
        }
        writeln!(self.out, "{}", if leaf { "/>" } else { ">" })?;
        Ok(())
    }

    fn text(&mut self, t: &str) -> Result<(), RenderError> {
        let t = t.trim();
        if !t.is_empty() {
            writeln!(self.out, "{t}")?;
        }
        Ok(())
    }
}

/// Directive text, if present and non-empty.
fn directive<'n>(attrs: &'n Attrs, name: &str) -> Option<&'n str> {
    attrs.value(name).filter(|v| !v.is_empty())
}

fn escape_attr(v: &str) -> Cow<'_, str> {
    if v.contains('"') {
        Cow::Owned(v.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(v)
    }
}

fn escape_text(v: &str) -> Cow<'_, str> {
    if !v.contains(['&', '<', '>']) {
        return Cow::Borrowed(v);
    }
    let mut out = String::with_capacity(v.len() + 8);
    for ch in v.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn empty_directive_is_ignored() {
        let attrs = Attrs::new().set("t:if", "").flag("t:each");
        assert_eq!(directive(&attrs, IF_ATTR), None);
        assert_eq!(directive(&attrs, EACH_ATTR), None);
    }
}
