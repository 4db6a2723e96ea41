use std::fmt::Display;

pub(crate) const BPMN_NAMESPACE: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
pub(crate) const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    pub(crate) namespace: Option<String>,
    pub(crate) name: String,
    pub(crate) value: String,
}

/// Namespace-resolved XML element. Children keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    pub(crate) namespace: Option<String>,
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) children: Vec<Element>,
    pub(crate) text: String,
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.attr("id") {
            Some(id) => write!(f, "{} {id}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Element {
    pub(crate) fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }

    pub(crate) fn is_bpmn(&self, name: &str) -> bool {
        self.is(BPMN_NAMESPACE, name)
    }

    // Attributes without a prefix carry no namespace.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    pub(crate) fn ns_attr(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name == name)
            .map(|a| a.value.as_str())
    }

    pub(crate) fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub(crate) fn text(&self) -> &str {
        self.text.trim()
    }

    pub(crate) fn bpmn_children<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.is_bpmn(name))
    }

    pub(crate) fn bpmn_child(&self, name: &str) -> Option<&Element> {
        self.bpmn_children(name).next()
    }

    pub(crate) fn has_bpmn_child(&self, name: &str) -> bool {
        self.bpmn_child(name).is_some()
    }

    /// Texts of `<bpmn:{name}>` children, e.g. `incoming`, `outgoing` or `flowNodeRef`.
    pub(crate) fn bpmn_child_texts(&self, name: &str) -> Vec<String> {
        self.bpmn_children(name)
            .map(|c| c.text().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Pre-order walk in document order, driven by an explicit stack.
    pub(crate) fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub(crate) struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}
