use crate::error::NetlistError;

pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{} -> n{}", self.from, self.to)
    }
}

/// Quote-safe form of `text` for a DOT string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug)]
pub enum NodeType {
    /// Input variable.
    Circle(String),
    /// Gate.
    Box(String),
    /// Named output.
    DoubleCircle(String),
}

impl NodeType {
    fn shape(&self) -> String {
        let shape_type = match self {
            NodeType::Circle(_) => "circle",
            NodeType::Box(_) => "box",
            NodeType::DoubleCircle(_) => "doublecircle",
        };

        format!("shape={shape_type}")
    }

    fn label(&self) -> String {
        match self {
            NodeType::Circle(label) | NodeType::Box(label) | NodeType::DoubleCircle(label) => {
                format!("label=\"{}\"", escape(label))
            }
        }
    }

    fn metadata() -> String {
        "height=.25 width=.2".to_owned()
    }
}

#[derive(Default)]
pub struct DotWriter {
    graph_name: String,

    nodes: Vec<(usize, NodeType)>,
    edges: Vec<Edge>,
}

impl DotWriter {
    #[must_use]
    pub fn new(graph_name: String) -> DotWriter {
        DotWriter {
            graph_name,
            ..Default::default()
        }
    }

    pub fn add_node(&mut self, node_idx: usize, node_type: NodeType) {
        self.nodes.push((node_idx, node_type));
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// # Errors
    /// Function returns an error if the writing to a file or flushing fails.
    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), NetlistError> {
        write!(
            writer,
            "digraph \"{}\" {{\n  rankdir=LR\n  overlap=false",
            escape(&self.graph_name)
        )?;

        for (node, node_type) in &self.nodes {
            write!(
                writer,
                "\n  n{node} [{} {} {}]",
                node_type.shape(),
                node_type.label(),
                NodeType::metadata(),
            )?;
        }

        for edge in &self.edges {
            write!(writer, "\n  {edge} [arrowsize=.50]")?;
        }

        write!(writer, "\n}}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::escape;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape("OR"), "OR");
        assert_eq!(escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape(r#"\""#), r#"\\\""#);
    }
}
