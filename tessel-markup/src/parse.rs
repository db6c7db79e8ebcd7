use std::fs;
use std::path::Path;

use tessel_dom::{Attr, Attrs, Document, Node};

use crate::MarkupError;

/// Elements that never have children, with or without a trailing `/>`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Read and parse a markup file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, MarkupError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| MarkupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&src)
}

/// Minimal hand-rolled HTML-ish parser with support for:
/// - nested elements, self-closing tags (`<input/>`) and void elements (`<br>`)
/// - attributes with double-, single- or unquoted values, or none at all;
///   names may contain `:` so directive attributes like `t:if` survive
/// - comments and `<!DOCTYPE ...>` / `<?...?>` declarations (skipped)
///
/// Closing tags pop back to the nearest open element with the same name;
/// stray closing tags are ignored and unclosed elements end at EOF.
pub fn parse(input: &str) -> Result<Document, MarkupError> {
    let mut i = 0usize;
    let bytes = input.as_bytes();
    let mut stack: Vec<Node> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    while i < bytes.len() {
        if input[i..].starts_with("<!--") {
            let end = input[i + 4..]
                .find("-->")
                .ok_or(MarkupError::UnterminatedComment { offset: i })?;
            i += 4 + end + 3;
            continue;
        }

        if bytes[i] == b'<' && i + 1 < bytes.len() && matches!(bytes[i + 1], b'!' | b'?') {
            // doctype or processing instruction
            let end = input[i..].find('>').ok_or_else(|| MarkupError::UnterminatedTag {
                tag: "!".to_string(),
                offset: i,
            })?;
            i += end + 1;
            continue;
        }

        if bytes[i] == b'<' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
            let start = i;
            i += 2;
            let tag = read_ident(input, &mut i);
            match input[i..].find('>') {
                Some(end) => i += end + 1,
                None => {
                    return Err(MarkupError::UnterminatedTag { tag, offset: start });
                }
            }
            close_element(&mut stack, &mut roots, &tag);
            continue;
        }

        if bytes[i] == b'<' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_alphabetic() {
            let start = i;
            i += 1;
            let tag = read_ident(input, &mut i);
            let mut attrs: Vec<Attr> = Vec::new();
            let mut self_closing = false;

            loop {
                skip_ws(bytes, &mut i);
                if i >= bytes.len() {
                    return Err(MarkupError::UnterminatedTag { tag, offset: start });
                }
                match bytes[i] {
                    b'/' => {
                        // possible "/>"
                        i += 1;
                        skip_ws(bytes, &mut i);
                        if i < bytes.len() && bytes[i] == b'>' {
                            self_closing = true;
                            i += 1;
                            break;
                        }
                    }
                    b'>' => {
                        i += 1;
                        break;
                    }
                    _ => {
                        if let Some(attr) = read_attribute(input, &mut i)? {
                            attrs.push(attr);
                        } else {
                            // skip unknown token
                            i += 1;
                        }
                    }
                }
            }

            let void = VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(&tag));
            let node = Node::Element {
                tag,
                attrs: Attrs::from(attrs),
                children: Vec::new(),
                self_closing: self_closing || void,
            };
            if self_closing || void {
                push_child(&mut stack, &mut roots, node);
            } else {
                stack.push(node);
            }
            continue;
        }

        // text until the next '<'; a '<' that starts nothing is kept as text
        let start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        push_text(&mut stack, &mut roots, &input[start..i]);
    }

    // Unclosed tags: drain stack to roots (best-effort)
    while let Some(n) = stack.pop() {
        push_child(&mut stack, &mut roots, n);
    }

    // Trim root whitespace-only text nodes
    roots.retain(|n| !n.is_blank_text());

    tracing::debug!(roots = roots.len(), bytes = input.len(), "parsed markup");
    Ok(Document::new(roots))
}

fn push_child(stack: &mut [Node], roots: &mut Vec<Node>, node: Node) {
    if let Some(Node::Element { children, .. }) = stack.last_mut() {
        children.push(node);
    } else {
        roots.push(node);
    }
}

fn push_text(stack: &mut [Node], roots: &mut Vec<Node>, text: &str) {
    let siblings = match stack.last_mut() {
        Some(Node::Element { children, .. }) => children,
        _ => roots,
    };
    if let Some(Node::Text(prev)) = siblings.last_mut() {
        prev.push_str(text);
    } else {
        siblings.push(Node::Text(text.to_string()));
    }
}

fn close_element(stack: &mut Vec<Node>, roots: &mut Vec<Node>, tag: &str) {
    let Some(pos) = stack
        .iter()
        .rposition(|n| n.tag().is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    else {
        tracing::trace!(tag, "ignoring stray closing tag");
        return;
    };

    // everything opened after the match is implicitly closed inside it
    let mut closed = stack.split_off(pos);
    while let Some(node) = closed.pop() {
        if closed.is_empty() {
            push_child(stack, roots, node);
        } else {
            push_child(&mut closed, roots, node);
        }
    }
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn read_ident(input: &str, i: &mut usize) -> String {
    let bytes = input.as_bytes();
    let start = *i;
    while *i < bytes.len() {
        let c = bytes[*i];
        if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' || c == b':' {
            *i += 1;
        } else {
            break;
        }
    }
    input[start..*i].to_string()
}

fn read_attribute(input: &str, i: &mut usize) -> Result<Option<Attr>, MarkupError> {
    let bytes = input.as_bytes();
    let name_start = *i;
    while *i < bytes.len() {
        let c = bytes[*i];
        if c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b':' | b'@' | b'.') {
            *i += 1;
        } else {
            break;
        }
    }
    if *i == name_start {
        return Ok(None);
    }
    let name = input[name_start..*i].to_string();

    let after_name = *i;
    skip_ws(bytes, i);
    if *i >= bytes.len() || bytes[*i] != b'=' {
        // bare attribute; leave any whitespace for the caller
        *i = after_name;
        return Ok(Some(Attr { name, value: None }));
    }
    *i += 1;
    skip_ws(bytes, i);

    let value = match bytes.get(*i) {
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            let offset = *i;
            *i += 1;
            let start = *i;
            while *i < bytes.len() && bytes[*i] != quote {
                *i += 1;
            }
            if *i >= bytes.len() {
                return Err(MarkupError::UnterminatedQuote { attr: name, offset });
            }
            let v = input[start..*i].to_string();
            *i += 1; // consume closing quote
            v
        }
        _ => {
            let start = *i;
            while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
                if bytes[*i] == b'/' && bytes.get(*i + 1) == Some(&b'>') {
                    break;
                }
                *i += 1;
            }
            input[start..*i].to_string()
        }
    };

    Ok(Some(Attr {
        name,
        value: Some(value),
    }))
}
