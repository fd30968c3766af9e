use derive_more::derive::AddAssign;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::ast::{GateKind, LogicNode};
use crate::error::NetlistError;
use crate::netlist::dot_writer::{DotWriter, Edge, NodeType};

/// Most outputs a combined netlist can carry.
pub const MAX_OUTPUTS: usize = 4;

/// Identifier of a netlist node, rendered as `n<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AddAssign)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Var,
    Gate,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ElementData {
    Node {
        id: NodeId,
        label: String,
        #[serde(rename = "type")]
        kind: NodeKind,
    },
    Edge {
        source: NodeId,
        target: NodeId,
    },
}

/// A graph element wrapped the way graph visualization front ends expect
/// it: `{ "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub data: ElementData,
}

/// Node and edge records of one or more gate trees, in emission order.
/// Every node record precedes the edges that reference it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Netlist {
    elements: Vec<Element>,
}

impl Netlist {
    #[must_use]
    pub fn new() -> Self {
        Netlist::default()
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over node records as `(id, label, kind)`.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str, NodeKind)> + '_ {
        self.elements.iter().filter_map(|element| match &element.data {
            ElementData::Node { id, label, kind } => Some((*id, label.as_str(), *kind)),
            ElementData::Edge { .. } => None,
        })
    }

    /// Iterate over edge records as `(source, target)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.elements.iter().filter_map(|element| match element.data {
            ElementData::Edge { source, target } => Some((source, target)),
            ElementData::Node { .. } => None,
        })
    }

    /// Sources of every edge entering `node`.
    #[must_use]
    pub fn inputs(&self, node: NodeId) -> Vec<NodeId> {
        self.edges()
            .filter(|(_, target)| *target == node)
            .map(|(source, _)| source)
            .collect()
    }

    fn add_node(&mut self, id: NodeId, label: String, kind: NodeKind) {
        self.elements.push(Element {
            data: ElementData::Node { id, label, kind },
        });
    }

    fn add_edge(&mut self, source: NodeId, target: NodeId) {
        self.elements.push(Element {
            data: ElementData::Edge { source, target },
        });
    }

    /// Serialize the netlist as a JSON array of elements.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, NetlistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that the JSON array of the netlist fits into `capacity` bytes
    /// and return its length. The JSON is counted, not stored.
    ///
    /// # Errors
    /// Returns [`NetlistError::CapacityExceeded`] when the JSON is longer
    /// than `capacity`.
    pub fn check_capacity(&self, capacity: usize) -> Result<usize, NetlistError> {
        let mut counter = ByteCounter::default();
        serde_json::to_writer(&mut counter, self)?;
        if counter.0 > capacity {
            return Err(NetlistError::CapacityExceeded {
                required: counter.0,
                capacity,
            });
        }
        Ok(counter.0)
    }

    /// Render the netlist as a Graphviz digraph: variables as circles,
    /// gates as boxes, and outputs as double circles.
    ///
    /// # Errors
    /// Function returns an error if the writing to a file or flushing fails.
    pub fn draw(&self, name: &str, writer: &mut dyn std::io::Write) -> Result<(), NetlistError> {
        let mut dot_writer = DotWriter::new(name.to_owned());
        for (id, label, kind) in self.nodes() {
            let label = label.to_owned();
            let node_type = match kind {
                NodeKind::Var => NodeType::Circle(label),
                NodeKind::Gate => NodeType::Box(label),
                NodeKind::Output => NodeType::DoubleCircle(label),
            };
            dot_writer.add_node(id.0, node_type);
        }

        for (source, target) in self.edges() {
            dot_writer.add_edge(Edge {
                from: source.0,
                to: target.0,
            });
        }

        dot_writer.write(writer)
    }
}

/// Sink counting the bytes written into it.
#[derive(Default)]
struct ByteCounter(usize);

impl std::io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Depth-first emitter sharing one id counter across every tree appended
/// to the same netlist.
struct Emitter<'a> {
    netlist: &'a mut Netlist,
    next_id: NodeId,
}

impl Emitter<'_> {
    fn allocate(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += NodeId(1);
        id
    }

    fn emit(&mut self, node: &LogicNode) -> NodeId {
        let id = self.allocate();
        let kind = match node {
            LogicNode::Var(_) => NodeKind::Var,
            LogicNode::Not(_) | LogicNode::Gate { .. } => NodeKind::Gate,
        };
        self.netlist.add_node(id, node.label(), kind);

        match node {
            LogicNode::Var(_) => {}
            LogicNode::Not(child) => {
                let child = self.emit(child);
                self.netlist.add_edge(child, id);
            }
            LogicNode::Gate { kind, left, right } => {
                self.connect_inputs(left, id, *kind);
                self.connect_inputs(right, id, *kind);
            }
        }

        id
    }

    /// Connect `node` as an input of `parent`. A child gate of the same
    /// associative kind is not emitted; its own inputs are connected to
    /// `parent` instead.
    fn connect_inputs(&mut self, node: &LogicNode, parent: NodeId, parent_kind: GateKind) {
        match node {
            LogicNode::Gate { kind, left, right }
                if *kind == parent_kind && parent_kind.is_associative() =>
            {
                self.connect_inputs(left, parent, parent_kind);
                self.connect_inputs(right, parent, parent_kind);
            }
            _ => {
                let child = self.emit(node);
                self.netlist.add_edge(child, parent);
            }
        }
    }
}

/// Append `tree` to `netlist` followed by an output node named `label`
/// fed by the root of the tree. Ids are allocated from `next_id` on; the
/// first unused id is returned.
pub fn append_tree(netlist: &mut Netlist, label: &str, tree: &LogicNode, next_id: NodeId) -> NodeId {
    let mut emitter = Emitter { netlist, next_id };
    let root = emitter.emit(tree);

    let output = emitter.allocate();
    emitter
        .netlist
        .add_node(output, label.to_owned(), NodeKind::Output);
    emitter.netlist.add_edge(root, output);

    emitter.next_id
}

/// Netlist of a single output. An absent tree gives an empty netlist.
#[must_use]
#[instrument(level = "debug", skip(tree))]
pub fn generate(label: &str, tree: Option<&LogicNode>) -> Netlist {
    let mut netlist = Netlist::new();
    if let Some(tree) = tree {
        append_tree(&mut netlist, label, tree, NodeId(0));
    }
    debug!(elements = netlist.elements.len(), "generated netlist");
    netlist
}

/// Netlist of up to [`MAX_OUTPUTS`] outputs sharing one id space. Absent
/// trees are skipped.
///
/// # Errors
/// Returns [`NetlistError::TooManyOutputs`] if more than [`MAX_OUTPUTS`]
/// outputs are given.
#[instrument(level = "debug", skip_all, fields(outputs = outputs.len()))]
pub fn generate_combined(outputs: &[(&str, Option<&LogicNode>)]) -> Result<Netlist, NetlistError> {
    if outputs.len() > MAX_OUTPUTS {
        return Err(NetlistError::TooManyOutputs {
            limit: MAX_OUTPUTS,
            got: outputs.len(),
        });
    }

    let mut netlist = Netlist::new();
    let mut next_id = NodeId(0);
    for (label, tree) in outputs {
        if let Some(tree) = tree {
            next_id = append_tree(&mut netlist, label, tree, next_id);
        }
    }

    debug!(elements = netlist.elements.len(), "generated combined netlist");
    Ok(netlist)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{generate, generate_combined, NodeId, NodeKind};
    use crate::ast::LogicNode;
    use crate::error::NetlistError;
    use crate::parser::parse;

    fn nodes_of(netlist: &super::Netlist, kind: NodeKind) -> Vec<(NodeId, String)> {
        netlist
            .nodes()
            .filter(|(_, _, node_kind)| *node_kind == kind)
            .map(|(id, label, _)| (id, label.to_owned()))
            .collect()
    }

    #[test]
    fn single_variable() {
        let tree = parse("A").unwrap();
        let netlist = generate("X", Some(&tree));

        assert_eq!(nodes_of(&netlist, NodeKind::Var), vec![(NodeId(0), "A".to_owned())]);
        assert_eq!(
            nodes_of(&netlist, NodeKind::Output),
            vec![(NodeId(1), "X".to_owned())]
        );
        assert!(nodes_of(&netlist, NodeKind::Gate).is_empty());
        assert_eq!(netlist.edges().collect::<Vec<_>>(), vec![(NodeId(0), NodeId(1))]);
    }

    fn single_gate(expression: &str, label: &str, inputs: usize) {
        let tree = parse(expression).unwrap();
        let netlist = generate("X", Some(&tree));

        assert_eq!(
            nodes_of(&netlist, NodeKind::Gate),
            vec![(NodeId(0), label.to_owned())],
            "{expression}"
        );
        let variables = nodes_of(&netlist, NodeKind::Var)
            .into_iter()
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        assert_eq!(variables.len(), inputs, "{expression}");
        assert_eq!(netlist.inputs(NodeId(0)), variables, "{expression}");

        let (output, _) = nodes_of(&netlist, NodeKind::Output)[0].clone();
        assert_eq!(netlist.inputs(output), vec![NodeId(0)], "{expression}");
        assert_eq!(netlist.edges().count(), inputs + 1, "{expression}");
    }

    #[test]
    fn flattens_every_associative_kind() {
        single_gate("A+B+C", "OR", 3);
        single_gate("A^B^C", "XOR", 3);
        single_gate("A*B*C", "AND", 3);
        single_gate("A*B*C*D", "AND", 4);
    }

    #[test]
    fn flattens_right_nested_children() {
        single_gate("A+(B+C)", "OR", 3);
        single_gate("A*(B*C)", "AND", 3);
    }

    #[test]
    fn flattens_both_sides() {
        single_gate("(A^B)^(C^D)", "XOR", 4);
        single_gate("(A+B)+(C+(D+E))", "OR", 5);

        let tree = parse("(A^B)^(C^D)").unwrap();
        let netlist = generate("X", Some(&tree));
        assert_eq!(
            nodes_of(&netlist, NodeKind::Var)
                .into_iter()
                .map(|(_, label)| label)
                .collect::<Vec<_>>(),
            vec!["A", "B", "C", "D"]
        );
    }

    #[test]
    fn does_not_flatten_across_kinds() {
        // (A + B) * C keeps the OR gate, NAND chains stay nested.
        let tree = parse("(A+B)*C").unwrap();
        let netlist = generate("X", Some(&tree));
        assert_eq!(nodes_of(&netlist, NodeKind::Gate).len(), 2);

        let tree = parse("A%B%C").unwrap();
        let netlist = generate("X", Some(&tree));
        assert_eq!(nodes_of(&netlist, NodeKind::Gate).len(), 2);
    }

    #[test]
    fn keeps_inverters() {
        let tree = parse("(A*B)'*C").unwrap();
        let netlist = generate("X", Some(&tree));

        // AND, NOT, AND: the inner AND sits behind an inverter.
        assert_eq!(
            nodes_of(&netlist, NodeKind::Gate)
                .into_iter()
                .map(|(_, label)| label)
                .collect::<Vec<_>>(),
            vec!["AND", "NOT", "AND"]
        );
    }

    #[test]
    fn preorder_ids_and_json() {
        let tree = LogicNode::var('A') | !LogicNode::var('B');
        let netlist = generate("Y", Some(&tree));
        assert_eq!(
            netlist.to_json().unwrap(),
            concat!(
                r#"[{"data":{"id":"n0","label":"OR","type":"gate"}},"#,
                r#"{"data":{"id":"n1","label":"A","type":"var"}},"#,
                r#"{"data":{"source":"n1","target":"n0"}},"#,
                r#"{"data":{"id":"n2","label":"NOT","type":"gate"}},"#,
                r#"{"data":{"id":"n3","label":"B","type":"var"}},"#,
                r#"{"data":{"source":"n3","target":"n2"}},"#,
                r#"{"data":{"source":"n2","target":"n0"}},"#,
                r#"{"data":{"id":"n4","label":"Y","type":"output"}},"#,
                r#"{"data":{"source":"n0","target":"n4"}}]"#,
            )
        );
    }

    #[test]
    fn absent_tree_is_empty() {
        let netlist = generate("X", None);
        assert!(netlist.is_empty());
        assert_eq!(netlist.to_json().unwrap(), "[]");
    }

    #[test]
    fn capacity_counts_json_bytes() {
        let tree = parse("A*B*C").unwrap();
        let netlist = generate("X", Some(&tree));
        let json = netlist.to_json().unwrap();

        assert_eq!(netlist.check_capacity(json.len()).unwrap(), json.len());
        assert_eq!(generate("X", None).check_capacity(2).unwrap(), 2);
        match netlist.check_capacity(json.len() - 1) {
            Err(NetlistError::CapacityExceeded { required, capacity }) => {
                assert_eq!(required, json.len());
                assert_eq!(capacity, json.len() - 1);
            }
            other => panic!("expected capacity error, got {other:?}"),
        }
    }

    #[test]
    fn combined_ids_never_collide() {
        let x = parse("A*B").unwrap();
        let z = parse("C'").unwrap();
        let netlist = generate_combined(&[("X", Some(&x)), ("Y", None), ("Z", Some(&z))]).unwrap();

        let ids = netlist.nodes().map(|(id, _, _)| id).collect::<Vec<_>>();
        assert_eq!(ids, (0..ids.len()).map(NodeId).collect::<Vec<_>>());
        assert_eq!(
            nodes_of(&netlist, NodeKind::Output)
                .into_iter()
                .map(|(_, label)| label)
                .collect::<Vec<_>>(),
            vec!["X", "Z"]
        );
    }

    #[test]
    fn combined_rejects_extra_outputs() {
        let tree = parse("A").unwrap();
        let outputs = vec![("X", Some(&tree)); 5];
        assert!(matches!(
            generate_combined(&outputs),
            Err(NetlistError::TooManyOutputs { limit: 4, got: 5 })
        ));
    }

    #[test]
    fn draws_dot() {
        let tree = parse("A+B'").unwrap();
        let netlist = generate("X", Some(&tree));
        let mut buffer = Vec::new();
        netlist.draw("X", &mut buffer).unwrap();
        let dot = String::from_utf8(buffer).unwrap();

        assert!(dot.starts_with("digraph \"X\" {"));
        assert!(dot.contains("n0 [shape=box label=\"OR\""));
        assert!(dot.contains("n1 [shape=circle label=\"A\""));
        assert!(dot.contains("[shape=doublecircle label=\"X\""));
        assert!(dot.contains("n1 -> n0 [arrowsize=.50]"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn escapes_dot_labels() {
        let tree = parse("A").unwrap();
        let netlist = generate("X\"y\\", Some(&tree));
        let mut buffer = Vec::new();
        netlist.draw("X\"y\\", &mut buffer).unwrap();
        let dot = String::from_utf8(buffer).unwrap();

        assert!(dot.starts_with(r#"digraph "X\"y\\" {"#));
        assert!(dot.contains(r#"label="X\"y\\""#));
    }
}
