//! Markdown to HTML for project documents.
//!
//! The source text is rewritten before rendering: the document is parsed to
//! an mdast tree, each link and image destination is located inside its
//! node's source span and replaced with the absolute URL, and every line
//! ending inside paragraph text becomes a hard break. Destinations written
//! with escapes or entity references are not found verbatim and are left
//! untouched.

use std::collections::HashSet;

use markdown::mdast::Node;
use markdown::{Options, ParseOptions};
use tracing::debug;

use crate::error::ShowcaseError;
use crate::render::links::LinkBase;

/// Which base a destination resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Asset,
    Page,
}

/// Pending replacement of `source[start..end]`.
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Render `text` as GFM HTML with destinations resolved against `base`.
///
/// Single newlines inside a paragraph render as `<br />`. Raw HTML in the
/// document is escaped, links open in a new tab, and images load lazily.
pub fn render_markdown(text: &str, base: &LinkBase) -> Result<String, ShowcaseError> {
    let rewritten = rewrite_source(text, base)?;
    let html = markdown::to_html_with_options(&rewritten, &Options::gfm())
        .map_err(|e| ShowcaseError::Render(e.to_string()))?;

    Ok(html
        .replace("<a href=", "<a target=\"_blank\" rel=\"noopener noreferrer\" href=")
        .replace("<img src=", "<img loading=\"lazy\" src="))
}

/// Return `text` with every link, image and definition destination made
/// absolute and every soft line break in paragraph text made hard.
pub fn rewrite_source(text: &str, base: &LinkBase) -> Result<String, ShowcaseError> {
    let tree = markdown::to_mdast(text, &ParseOptions::gfm())
        .map_err(|e| ShowcaseError::Render(e.to_string()))?;

    let mut image_refs = HashSet::new();
    collect_image_references(&tree, &mut image_refs);

    let mut edits = Vec::new();
    collect_edits(&tree, text, base, &image_refs, false, &mut edits);

    // Apply back to front so earlier offsets stay valid.
    edits.sort_by(|a, b| b.start.cmp(&a.start));
    let mut out = text.to_string();
    let mut limit = usize::MAX;
    for edit in edits {
        if edit.end > limit {
            continue;
        }
        out.replace_range(edit.start..edit.end, &edit.replacement);
        limit = edit.start;
    }
    Ok(out)
}

fn collect_image_references(node: &Node, ids: &mut HashSet<String>) {
    if let Node::ImageReference(image) = node {
        ids.insert(image.identifier.clone());
    }
    for child in node.children().into_iter().flatten() {
        collect_image_references(child, ids);
    }
}

fn collect_edits(
    node: &Node,
    text: &str,
    base: &LinkBase,
    image_refs: &HashSet<String>,
    in_paragraph: bool,
    edits: &mut Vec<Edit>,
) {
    if in_paragraph {
        if let Node::Text(_) = node {
            hard_breaks(node, text, edits);
        }
    }

    let found = match node {
        Node::Link(link) => Some((link.url.as_str(), Target::Page, "](")),
        Node::Image(image) => Some((image.url.as_str(), Target::Asset, "](")),
        Node::Definition(def) => {
            let target = if image_refs.contains(&def.identifier) {
                Target::Asset
            } else {
                Target::Page
            };
            Some((def.url.as_str(), target, "]:"))
        }
        _ => None,
    };

    if let Some((url, target, marker)) = found {
        if let Some(edit) = locate(node, text, url, target, marker, base) {
            edits.push(edit);
        }
    }

    let in_paragraph = in_paragraph || matches!(node, Node::Paragraph(_));
    for child in node.children().into_iter().flatten() {
        collect_edits(child, text, base, image_refs, in_paragraph, edits);
    }
}

/// A `\` before each line ending in a text node's span, turning the soft
/// break into a hard one.
fn hard_breaks(node: &Node, text: &str, edits: &mut Vec<Edit>) {
    let Some(position) = node.position() else {
        return;
    };
    let Some(span) = text.get(position.start.offset..position.end.offset) else {
        return;
    };

    for (i, _) in span.match_indices('\n') {
        let at = if span[..i].ends_with('\r') { i - 1 } else { i };
        let start = position.start.offset + at;
        edits.push(Edit {
            start,
            end: start,
            replacement: "\\".into(),
        });
    }
}

/// Find `url` after `marker` within the node's source span.
fn locate(
    node: &Node,
    text: &str,
    url: &str,
    target: Target,
    marker: &str,
    base: &LinkBase,
) -> Option<Edit> {
    let resolved = match target {
        Target::Asset => base.asset_url(url),
        Target::Page => base.page_url(url),
    };
    if resolved == url {
        return None;
    }

    let position = node.position()?;
    let span = text.get(position.start.offset..position.end.offset)?;

    // Inline destinations follow the last `](`; definitions the first `]:`.
    let marker_at = if marker == "](" {
        span.rfind(marker)?
    } else {
        span.find(marker)?
    };
    let after = marker_at + marker.len();
    let Some(found) = span[after..].find(url) else {
        debug!("destination '{url}' not written verbatim; left as is");
        return None;
    };

    let start = position.start.offset + after + found;
    let end = start + url.len();
    let bracketed = text[..start].ends_with('<');
    let needs_brackets = resolved.contains(|c: char| c.is_whitespace() || c == '(' || c == ')');

    let replacement = if needs_brackets && !bracketed {
        format!("<{resolved}>")
    } else {
        resolved
    };

    Some(Edit {
        start,
        end,
        replacement,
    })
}
