//! Tolerant HTML parsing into a small element tree
//!
//! Scraped answer pages are untrusted and often malformed. The parser never
//! fails: unknown constructs are skipped, unclosed elements are closed at the
//! end of their parent, and stray closing tags are ignored.

use regex::Regex;
use std::sync::LazyLock;

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+)))?"#)
        .expect("bad regex")
});

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("bad regex"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// Open elements allowed at once; deeper start tags become empty leaves
const MAX_DEPTH: usize = 256;

/// Elements after which rendered text starts a new line
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "section", "table", "tbody", "thead", "tr", "ul",
];

/// A parsed node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A parsed element with lowercase tag and attribute names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(tag: impl Into<String>, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Whether the class list or id contains `marker`, case-insensitively
    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.classes()
            .chain(self.attr("id"))
            .any(|name| name.to_ascii_lowercase().contains(marker))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements in document order, excluding `self`
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut pending: Vec<&Element> = self.child_elements().collect();
        pending.reverse();
        while let Some(element) = pending.pop() {
            out.push(element);
            let start = pending.len();
            pending.extend(element.child_elements());
            pending[start..].reverse();
        }
        out
    }

    /// Visible text with whitespace collapsed; script and style content is skipped
    #[must_use]
    pub fn text(&self) -> String {
        let mut raw = String::new();
        self.push_text(&mut raw, false);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Unprocessed text of direct children, for script payloads
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn push_text(&self, out: &mut String, line_breaks: bool) {
        let mut pending = vec![TextStep::Enter(self)];
        while let Some(step) = pending.pop() {
            match step {
                TextStep::Enter(element) => {
                    if matches!(element.tag.as_str(), "script" | "style") {
                        continue;
                    }
                    for child in element.children.iter().rev() {
                        match child {
                            Node::Text(text) => pending.push(TextStep::Text(text)),
                            Node::Element(child) => {
                                pending.push(TextStep::Leave(&child.tag));
                                pending.push(TextStep::Enter(child));
                            }
                        }
                    }
                }
                TextStep::Text(text) => out.push_str(text),
                TextStep::Leave(tag) => {
                    if line_breaks && BLOCK_ELEMENTS.contains(&tag) {
                        out.push('\n');
                    } else if matches!(tag, "td" | "th") {
                        out.push(if line_breaks { '\t' } else { ' ' });
                    }
                }
            }
        }
    }
}

/// Work item for the text walk
enum TextStep<'a> {
    Enter(&'a Element),
    Text(&'a str),
    Leave(&'a str),
}

/// A parsed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse HTML, never failing
    ///
    /// # Examples
    /// ```
    /// use ladder_solver::extract::Document;
    ///
    /// let doc = Document::parse("<ul class=ladder><li>COLD<li>CORD</ul>");
    /// let list = &doc.elements()[0];
    /// assert!(list.has_marker("ladder"));
    /// assert_eq!(list.child_elements().count(), 2);
    /// ```
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Parser::new(html).run()
    }

    /// Every element in document order
    #[must_use]
    pub fn elements(&self) -> Vec<&Element> {
        self.root.descendants()
    }

    /// Elements with the given tag name
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|element| element.tag == tag)
            .collect()
    }

    /// Rendered page text: block elements on their own lines, table cells
    /// tab-separated, runs of spaces collapsed
    #[must_use]
    pub fn text(&self) -> String {
        let mut raw = String::new();
        self.root.push_text(&mut raw, true);
        raw.lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct Parser<'a> {
    html: &'a str,
    pos: usize,
    stack: Vec<Element>,
}

impl<'a> Parser<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            html,
            pos: 0,
            stack: vec![Element::new("#document", Vec::new())],
        }
    }

    fn rest(&self) -> &'a str {
        &self.html[self.pos..]
    }

    fn run(mut self) -> Document {
        while self.pos < self.html.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_past("-->");
            } else if rest.starts_with("</") {
                self.close_tag();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">");
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.open_tag();
            } else {
                self.text();
            }
        }

        while self.stack.len() > 1 {
            self.pop();
        }
        Document {
            root: self.stack.pop().unwrap_or_default(),
        }
    }

    fn skip_past(&mut self, marker: &str) {
        self.pos = self
            .rest()
            .find(marker)
            .map_or(self.html.len(), |i| self.pos + i + marker.len());
    }

    fn text(&mut self) {
        // A lone '<' that does not start a tag is literal text
        let skip = usize::from(self.rest().starts_with('<'));
        let end = self.rest()[skip..]
            .find('<')
            .map_or(self.html.len(), |i| self.pos + skip + i);
        let text = decode_entities(&self.html[self.pos..end]);
        self.pos = end;
        self.push_text(text);
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.children.push(Node::Text(text));
        }
    }

    /// Byte length of a tag up to and including its closing '>', respecting quotes
    fn tag_len(&self) -> usize {
        let mut quote = None;
        for (i, c) in self.rest().char_indices() {
            match (quote, c) {
                (None, '"' | '\'') => quote = Some(c),
                (Some(q), _) if q == c => quote = None,
                (None, '>') => return i + 1,
                _ => {}
            }
        }
        self.rest().len()
    }

    fn open_tag(&mut self) {
        let len = self.tag_len();
        let inner = self.rest()[1..len].trim_end_matches('>');
        self.pos += len;

        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(inner.len());
        let tag = inner[..name_end].to_ascii_lowercase();
        let attr_text = &inner[name_end..];
        let self_closing = attr_text.trim_end().ends_with('/');

        let attrs = ATTRIBUTE
            .captures_iter(attr_text)
            .map(|caps| {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or(String::new(), |m| decode_entities(m.as_str()));
                (caps[1].to_ascii_lowercase(), value)
            })
            .collect();

        self.auto_close(&tag);
        let element = Element::new(tag.clone(), attrs);

        if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
            self.attach(element);
        } else if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
            let mut element = element;
            let closing = format!("</{tag}");
            let rest = self.rest();
            let end = find_ascii_case_insensitive(rest, &closing).unwrap_or(rest.len());
            let body = &rest[..end];
            if !body.is_empty() {
                let body = if tag == "textarea" {
                    decode_entities(body)
                } else {
                    body.to_string()
                };
                element.children.push(Node::Text(body));
            }
            self.pos += end;
            self.skip_past(">");
            self.attach(element);
        } else if self.stack.len() >= MAX_DEPTH {
            self.attach(element);
        } else {
            self.stack.push(element);
        }
    }

    /// Implicitly close elements whose end tag is optional
    fn auto_close(&mut self, opening: &str) {
        let closes: &[&str] = match opening {
            "p" => &["p"],
            "li" => &["li"],
            "dt" | "dd" => &["dt", "dd"],
            "td" | "th" => &["td", "th"],
            "tr" => &["tr", "td", "th"],
            "option" => &["option"],
            _ => return,
        };
        while self
            .stack
            .last()
            .is_some_and(|top| closes.contains(&top.tag.as_str()))
        {
            self.pop();
        }
    }

    fn close_tag(&mut self) {
        let len = self.tag_len();
        let name = self.rest()[2..len]
            .trim_end_matches('>')
            .trim()
            .to_ascii_lowercase();
        self.pos += len;

        // Stray closers with no open element are ignored
        if let Some(depth) = self.stack.iter().rposition(|element| element.tag == name) {
            if depth > 0 {
                while self.stack.len() > depth {
                    self.pop();
                }
            }
        }
    }

    fn pop(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.attach(element);
        }
    }

    fn attach(&mut self, element: Element) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Replace character references with the characters they name
#[must_use]
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                named_entity(name)
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "rarr" | "rightarrow" => '→',
        "larr" | "leftarrow" => '←',
        "darr" => '↓',
        "mdash" => '—',
        "ndash" => '–',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        _ => return None,
    };
    Some(c)
}
