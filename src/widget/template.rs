//! The reusable alternative fragment and its instantiation.

use super::WidgetError;

/// One node of the static template fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentNode {
    /// The selectable radio input; receives the alternative index as value.
    Input,
    /// The visible label; receives the answer text.
    Label,
    /// Decoration node, cloned as-is.
    Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<FragmentNode>,
}

impl Fragment {
    pub fn new(nodes: Vec<FragmentNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }
}

/// A node of a rendered alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryNode {
    Input { value: String, checked: bool },
    Label { text: String },
    Span,
}

/// One rendered alternative: a clone of the template fragment with its
/// input and label bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeEntry {
    nodes: Vec<EntryNode>,
}

impl AlternativeEntry {
    pub fn nodes(&self) -> &[EntryNode] {
        &self.nodes
    }

    /// Raw value of the radio input.
    pub fn value(&self) -> &str {
        self.nodes
            .iter()
            .find_map(|node| match node {
                EntryNode::Input { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn label(&self) -> &str {
        self.nodes
            .iter()
            .find_map(|node| match node {
                EntryNode::Label { text } => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn is_checked(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, EntryNode::Input { checked: true, .. }))
    }

    pub(crate) fn set_checked(&mut self, state: bool) {
        for node in &mut self.nodes {
            if let EntryNode::Input { checked, .. } = node {
                *checked = state;
            }
        }
    }

    /// The input value parsed as an alternative index.
    pub fn index(&self) -> Result<usize, WidgetError> {
        let value = self.value();
        value.parse().map_err(|_| WidgetError::InvalidValue {
            value: value.to_string(),
        })
    }
}

/// Build a fresh entry from `fragment`, binding `index` to the input value
/// and `text` to the label.
///
/// The fragment must hold at least one input and one label; anything else it
/// holds is cloned unchanged.
pub fn render(fragment: &Fragment, index: usize, text: &str) -> Result<AlternativeEntry, WidgetError> {
    let has = |kind| fragment.nodes.contains(&kind);
    if !has(FragmentNode::Input) {
        return Err(WidgetError::MalformedTemplate { missing: "input" });
    }
    if !has(FragmentNode::Label) {
        return Err(WidgetError::MalformedTemplate { missing: "label" });
    }

    let nodes = fragment
        .nodes
        .iter()
        .map(|node| match node {
            FragmentNode::Input => EntryNode::Input {
                value: index.to_string(),
                checked: false,
            },
            FragmentNode::Label => EntryNode::Label {
                text: text.to_string(),
            },
            FragmentNode::Span => EntryNode::Span,
        })
        .collect();

    Ok(AlternativeEntry { nodes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Fragment {
        Fragment::new(vec![FragmentNode::Input, FragmentNode::Label, FragmentNode::Span])
    }

    #[test]
    fn test_render_binds_index_and_label() {
        let entry = render(&standard(), 3, "  Dog <b>  ").unwrap();
        assert_eq!(entry.value(), "3");
        assert_eq!(entry.index().unwrap(), 3);
        assert_eq!(entry.label(), "  Dog <b>  ");
        assert!(!entry.is_checked());
        assert_eq!(entry.nodes().len(), 3);
        assert_eq!(entry.nodes()[2], EntryNode::Span);
    }

    #[test]
    fn test_render_leaves_fragment_untouched() {
        let fragment = standard();
        let first = render(&fragment, 0, "Cat").unwrap();
        let second = render(&fragment, 1, "Dog").unwrap();
        assert_ne!(first, second);
        assert_eq!(fragment, standard());
    }

    #[test]
    fn test_render_requires_input_and_label() {
        let no_input = Fragment::new(vec![FragmentNode::Label, FragmentNode::Span]);
        assert_eq!(
            render(&no_input, 0, "x").unwrap_err(),
            WidgetError::MalformedTemplate { missing: "input" }
        );

        let no_label = Fragment::new(vec![FragmentNode::Input]);
        assert_eq!(
            render(&no_label, 0, "x").unwrap_err(),
            WidgetError::MalformedTemplate { missing: "label" }
        );
    }
}
