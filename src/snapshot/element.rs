use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of an element within one snapshot. Assigned in document order, starting at 1.
pub type ElementId = u32;

/// The fixed set of selector keys projected out of an element's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Id,
    Name,
    AriaLabel,
    Class,
    Css,
}

impl SelectorKind {
    pub const ALL: [SelectorKind; 5] = [
        SelectorKind::Id,
        SelectorKind::Name,
        SelectorKind::AriaLabel,
        SelectorKind::Class,
        SelectorKind::Css,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SelectorKind::Id => "id",
            SelectorKind::Name => "name",
            SelectorKind::AriaLabel => "aria-label",
            SelectorKind::Class => "class",
            SelectorKind::Css => "css",
        }
    }
}

/// Precomputed projection of the attributes the selector engine looks at.
///
/// Serializes as a map keyed by `SelectorKind::key`, with `null` for absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "aria-label", default)]
    pub aria_label: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub css: Option<String>,
}

impl Selectors {
    /// Project the selector keys out of a raw attribute map. `css` is never derived.
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        Self {
            id: attributes.get("id").cloned(),
            name: attributes.get("name").cloned(),
            aria_label: attributes.get("aria-label").cloned(),
            class: attributes.get("class").and_then(|raw| join_classes(raw)),
            css: None,
        }
    }

    pub fn get(&self, kind: SelectorKind) -> Option<&str> {
        match kind {
            SelectorKind::Id => self.id.as_deref(),
            SelectorKind::Name => self.name.as_deref(),
            SelectorKind::AriaLabel => self.aria_label.as_deref(),
            SelectorKind::Class => self.class.as_deref(),
            SelectorKind::Css => self.css.as_deref(),
        }
    }
}

fn join_classes(raw: &str) -> Option<String> {
    let joined = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

/// One markup node, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub tag: String,
    pub text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Element {
    pub fn selector(&self, kind: SelectorKind) -> Option<&str> {
        self.selectors.get(kind)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `id` selector, falling back to the raw `id` attribute.
    pub fn id_value(&self) -> Option<&str> {
        non_empty(self.selector(SelectorKind::Id)).or_else(|| non_empty(self.attr("id")))
    }

    /// The `name` selector, falling back to the raw `name` attribute.
    pub fn name_value(&self) -> Option<&str> {
        non_empty(self.selector(SelectorKind::Name)).or_else(|| non_empty(self.attr("name")))
    }

    /// Best-effort CSS selector a live driver could use to reach this element.
    pub fn css_hint(&self) -> String {
        if let Some(css) = non_empty(self.selector(SelectorKind::Css)) {
            return css.to_string();
        }
        match self.id_value() {
            Some(id) => format!("#{}", id),
            None => String::new(),
        }
    }

    /// Inputs that take typed text rather than a click.
    pub fn is_text_entry(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => matches!(
                self.attr("type").map(|t| t.to_ascii_lowercase()).as_deref(),
                None | Some("text")
                    | Some("email")
                    | Some("password")
                    | Some("search")
                    | Some("tel")
                    | Some("url")
                    | Some("number")
            ),
            _ => false,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(
            self.tag.as_str(),
            "input" | "button" | "a" | "select" | "textarea"
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn class_selector_is_space_joined() {
        let selectors = Selectors::from_attributes(&attrs(&[("class", "  btn\tbtn-primary  ")]));
        assert_eq!(selectors.class.as_deref(), Some("btn btn-primary"));
    }

    #[test]
    fn blank_class_projects_to_none() {
        let selectors = Selectors::from_attributes(&attrs(&[("class", "   ")]));
        assert_eq!(selectors.class, None);
    }

    #[test]
    fn projection_never_invents_css() {
        let selectors = Selectors::from_attributes(&attrs(&[("id", "go"), ("name", "q")]));
        assert_eq!(selectors.get(SelectorKind::Id), Some("go"));
        assert_eq!(selectors.get(SelectorKind::Name), Some("q"));
        assert_eq!(selectors.get(SelectorKind::AriaLabel), None);
        assert_eq!(selectors.get(SelectorKind::Css), None);
    }
}
