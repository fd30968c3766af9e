use std::fmt::Display;

use crate::ast::LogicNode;

/// Renders a gate tree with one node per line, children indented below
/// their parent:
///
/// ```text
/// OR
/// |-- AND
/// |   |-- A
/// |   |-- B
/// |-- NOT
///     |-- C
/// ```
pub struct TreePrinter<'a>(pub &'a LogicNode);

impl TreePrinter<'_> {
    fn write_node(
        f: &mut std::fmt::Formatter<'_>,
        node: &LogicNode,
        prefix: &str,
        last: bool,
        root: bool,
    ) -> std::fmt::Result {
        if root {
            writeln!(f, "{}", node.label())?;
        } else {
            writeln!(f, "{prefix}|-- {}", node.label())?;
        }

        let child_prefix = match (root, last) {
            (true, _) => String::new(),
            (false, true) => format!("{prefix}    "),
            (false, false) => format!("{prefix}|   "),
        };

        match node {
            LogicNode::Var(_) => Ok(()),
            LogicNode::Not(child) => TreePrinter::write_node(f, child, &child_prefix, true, false),
            LogicNode::Gate { left, right, .. } => {
                TreePrinter::write_node(f, left, &child_prefix, false, false)?;
                TreePrinter::write_node(f, right, &child_prefix, true, false)
            }
        }
    }
}

impl Display for TreePrinter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TreePrinter::write_node(f, self.0, "", true, true)
    }
}
