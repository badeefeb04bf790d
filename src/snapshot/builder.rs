use std::collections::BTreeMap;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::snapshot::element::{Element, ElementId, Selectors};
use crate::snapshot::error::ParseError;
use crate::snapshot::snapshot_model::Snapshot;
use crate::snapshot::text::element_text;

/// Wrapper elements the HTML tree builder creates even when the source omits them.
const IMPLIED_WRAPPERS: [&str; 3] = ["html", "head", "body"];

/// Elements whose text never renders as page content.
const HIDDEN_TEXT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotOptions {
    /// Maximum characters of text kept per element.
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,

    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            text_limit: default_text_limit(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_text_limit() -> usize { 200 }
fn default_max_document_bytes() -> usize { 32 * 1024 * 1024 }

impl Snapshot {
    /// Parse `document` and index every element in document order.
    pub fn build(document: &str, url: &str) -> Result<Snapshot, ParseError> {
        Self::build_with(document, url, &SnapshotOptions::default())
    }

    pub fn build_with(
        document: &str,
        url: &str,
        options: &SnapshotOptions,
    ) -> Result<Snapshot, ParseError> {
        check_document(document, options)?;

        let html = Html::parse_document(document);
        let authored = AuthoredTags::scan(document);

        let mut elements = Vec::new();
        let mut next_id: ElementId = 1;
        let mut tbodies = 0;

        // Pre-order walk over the whole tree, elements only.
        for node in html.tree.root().descendants() {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };

            let tag = el.value().name().to_lowercase();
            if IMPLIED_WRAPPERS.contains(&tag.as_str()) && !authored.wrappers.contains(&tag.as_str()) {
                continue;
            }
            if tag == "tbody" {
                tbodies += 1;
                if authored.tbodies.get(tbodies - 1) == Some(&false) {
                    continue;
                }
            }

            elements.push(extract_element(next_id, tag, el, options));
            next_id += 1;
        }

        Ok(Snapshot::new(url, elements))
    }
}

fn check_document(document: &str, options: &SnapshotOptions) -> Result<(), ParseError> {
    if document.len() > options.max_document_bytes {
        return Err(ParseError::TooLarge {
            len: document.len(),
            limit: options.max_document_bytes,
        });
    }

    if let Some(offset) = document.find('\0') {
        return Err(ParseError::Binary { offset });
    }

    if !document.trim().is_empty() && !document.contains('<') {
        return Err(ParseError::NoMarkup);
    }

    Ok(())
}

fn extract_element(id: ElementId, tag: String, el: ElementRef<'_>, options: &SnapshotOptions) -> Element {
    let raw_text = visible_text(el);

    let attributes: BTreeMap<String, String> = el
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let selectors = Selectors::from_attributes(&attributes);

    Element {
        id,
        tag,
        text: element_text(&raw_text, options.text_limit),
        attributes,
        selectors,
        visible: true,
    }
}

/// Concatenated descendant text, minus anything inside script-like elements
/// below `el`. A `<script>` or `<style>` keeps its own text.
fn visible_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();

    for node in el.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != el.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| HIDDEN_TEXT_TAGS.contains(&ancestor.value().name()));

        if !hidden {
            out.push_str(text);
        }
    }

    out
}

/// Start tags that appear in the source itself, as seen by the tokenizer.
#[derive(Debug, Default)]
struct AuthoredTags {
    /// Implied wrappers with at least one real start tag.
    wrappers: Vec<&'static str>,
    /// One entry per `tbody` the tree builder will create, in document order:
    /// `true` when the source opened it, `false` when a row implied it.
    tbodies: Vec<bool>,
    /// For each open table, whether a row group is currently open.
    tables: Vec<bool>,
}

impl AuthoredTags {
    fn scan(document: &str) -> Self {
        let mut input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(document));

        let mut tokenizer = Tokenizer::new(AuthoredTags::default(), TokenizerOpts::default());
        let _ = tokenizer.feed(&mut input);
        tokenizer.end();
        tokenizer.sink
    }

    fn start_tag(&mut self, name: &str) {
        if let Some(wrapper) = IMPLIED_WRAPPERS.into_iter().find(|w| *w == name) {
            if !self.wrappers.contains(&wrapper) {
                self.wrappers.push(wrapper);
            }
            return;
        }

        match name {
            "table" => self.tables.push(false),
            "tbody" | "thead" | "tfoot" => {
                if let Some(in_group) = self.tables.last_mut() {
                    if name == "tbody" {
                        self.tbodies.push(true);
                    }
                    *in_group = true;
                }
            }
            "tr" | "td" | "th" => {
                if let Some(in_group) = self.tables.last_mut() {
                    if !*in_group {
                        self.tbodies.push(false);
                        *in_group = true;
                    }
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "table" => {
                self.tables.pop();
            }
            "tbody" | "thead" | "tfoot" => {
                if let Some(in_group) = self.tables.last_mut() {
                    *in_group = false;
                }
            }
            _ => {}
        }
    }
}

impl TokenSink for AuthoredTags {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        let name: &str = &tag.name;

        if tag.kind != StartTag {
            self.end_tag(name);
            return TokenSinkResult::Continue;
        }

        self.start_tag(name);

        // Switch the tokenizer the way the tree builder would, so markup inside
        // scripts and styles is not read as tags.
        match name {
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}
