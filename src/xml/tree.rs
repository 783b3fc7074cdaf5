use serde_json::{Map, Value};

/// Key under which element text is rendered by [`Element::to_json`].
pub const TEXT_KEY: &str = "_text";

/// An XML element reduced to its text and its child elements, addressed by local name.
///
/// Children keep the order in which their names first appear in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: Option<String>,
    children: Vec<(String, Entry)>,
}

/// Value of a child name: one element, or all elements sharing that name.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Single(Element),
    Repeated(Vec<Element>),
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            children: Vec::new(),
        }
    }

    /// Add a child element. A name seen before is promoted to `Entry::Repeated` in place.
    pub fn push_child(&mut self, name: String, element: Element) {
        match self.children.iter_mut().find(|(key, _)| *key == name) {
            Some((_, entry)) => entry.push(element),
            None => self.children.push((name, Entry::Single(element))),
        }
    }

    pub fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(key, _)| key.as_str())
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.children.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// The only child of this element, `Ok(None)` when there is none, or the names of all
    /// children when there are several.
    pub fn sole_child(&self) -> Result<Option<(&str, &Entry)>, Vec<String>> {
        match self.children.as_slice() {
            [] => Ok(None),
            [(key, entry)] => Ok(Some((key.as_str(), entry))),
            _ => Err(self.keys().map(str::to_string).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Render as a JSON object: one key per child name, text under [`TEXT_KEY`].
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (key, entry) in &self.children {
            object.insert(key.clone(), entry.to_json());
        }
        if let Some(text) = &self.text {
            object.insert(TEXT_KEY.to_string(), Value::String(text.clone()));
        }
        Value::Object(object)
    }
}

impl Entry {
    fn push(&mut self, element: Element) {
        match self {
            Entry::Single(first) => {
                let first = std::mem::take(first);
                *self = Entry::Repeated(vec![first, element]);
            }
            Entry::Repeated(elements) => elements.push(element),
        }
    }

    pub fn single(&self) -> Option<&Element> {
        match self {
            Entry::Single(element) => Some(element),
            Entry::Repeated(_) => None,
        }
    }

    /// All elements of this entry in document order.
    pub fn elements(&self) -> &[Element] {
        match self {
            Entry::Single(element) => std::slice::from_ref(element),
            Entry::Repeated(elements) => elements,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Entry::Single(element) => element.to_json(),
            Entry::Repeated(elements) => {
                Value::Array(elements.iter().map(Element::to_json).collect())
            }
        }
    }
}
