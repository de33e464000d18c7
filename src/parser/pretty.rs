use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

const INDENT: &str = " ";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is whitespace-sensitive or not markup.
const VERBATIM_ELEMENTS: &[&str] = &["pre", "textarea", "script", "style"];

/// One node per line, children indented one space deeper than their parent.
/// Whitespace-only text is dropped; other text is trimmed. Attributes are
/// sorted by name so the output is deterministic.
pub fn render(html: &Html) -> String {
    let mut out = String::new();
    for child in html.tree.root().children() {
        write_node(child, 0, &mut out);
    }
    out
}

fn write_node(node: NodeRef<'_, Node>, depth: usize, out: &mut String) {
    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                write_node(child, depth, out);
            }
        }
        Node::Doctype(doctype) => push_line(out, depth, &format!("<!DOCTYPE {}>", doctype.name())),
        Node::Comment(comment) => push_line(out, depth, &format!("<!--{}-->", &**comment)),
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                push_line(out, depth, &escape_text(trimmed));
            }
        }
        Node::Element(element) => {
            let name = element.name();
            if VERBATIM_ELEMENTS.contains(&name) {
                if let Some(el) = ElementRef::wrap(node) {
                    push_line(out, depth, &el.html());
                }
                return;
            }

            let mut attrs: Vec<(&str, &str)> = element.attrs().collect();
            attrs.sort_unstable();

            let mut open = format!("<{}", name);
            for (key, value) in attrs {
                open.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
            }
            open.push('>');
            push_line(out, depth, &open);

            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            for child in node.children() {
                write_node(child, depth + 1, out);
            }
            push_line(out, depth, &format!("</{}>", name));
        }
        _ => {}
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(line);
    out.push('\n');
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

// ── Tests ──
