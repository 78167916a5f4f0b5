//! Input forest: the read-only folder/file records the view is projected from.
//!
//! The model is never mutated after it has been handed to the projector.
//! It is decoded from JSON records shaped like
//! `{ "type": "folder", "name": "src", "children": [...] }`.

use serde::Deserialize;
use serde_json::Value;

use super::error::{Result, TreeError};

/// Folder or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Folder,
    File,
}

/// One record of the input forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub name: String,
    /// Always empty for files.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn folder(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            kind: NodeKind::Folder,
            name: name.into(),
            children,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::File,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Depth-first, children-in-order traversal starting at `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree.
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is popped next.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Depth-first traversal over every root of a forest, in order.
pub fn walk_forest(forest: &[TreeNode]) -> impl Iterator<Item = &TreeNode> {
    forest.iter().flat_map(TreeNode::walk)
}

/// Total number of records in a forest.
pub fn count_nodes(forest: &[TreeNode]) -> usize {
    walk_forest(forest).count()
}

// ───────────────────────────────────────── fixture ───────────

/// Loose shape of a record as it appears on disk; validated into [`TreeNode`].
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type", alias = "kind")]
    kind: Option<String>,
    name: Option<Value>,
    children: Option<Vec<Value>>,
}

/// Decode a JSON fixture into a forest.
///
/// Fails on the first malformed record; no partial forest is returned.
pub fn parse_fixture(json: &str) -> Result<Vec<TreeNode>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(records) = value else {
        return Err(malformed("$", "top level must be an array of nodes"));
    };
    records
        .iter()
        .enumerate()
        .map(|(i, record)| decode_node(record, format!("[{i}]")))
        .collect()
}

fn decode_node(value: &Value, path: String) -> Result<TreeNode> {
    if !value.is_object() {
        return Err(malformed(&path, "expected an object"));
    }
    let raw: RawNode =
        serde_json::from_value(value.clone()).map_err(|e| malformed(&path, &e.to_string()))?;

    let kind = match raw.kind.as_deref() {
        Some("folder") => NodeKind::Folder,
        Some("file") => NodeKind::File,
        Some(other) => return Err(malformed(&path, &format!("unknown kind `{other}`"))),
        None => return Err(malformed(&path, "missing `type`")),
    };
    let name = match raw.name {
        Some(Value::String(s)) => s,
        Some(_) => return Err(malformed(&path, "`name` must be a string")),
        None => return Err(malformed(&path, "missing `name`")),
    };

    let raw_children = raw.children.unwrap_or_default();
    if kind == NodeKind::File && !raw_children.is_empty() {
        return Err(malformed(&path, "a file cannot have children"));
    }

    let children = raw_children
        .iter()
        .enumerate()
        .map(|(i, child)| decode_node(child, format!("{path}.children[{i}]")))
        .collect::<Result<Vec<_>>>()?;

    Ok(TreeNode {
        kind,
        name,
        children,
    })
}

fn malformed(path: &str, reason: &str) -> TreeError {
    TreeError::MalformedFixture {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// The forest shown when no `--fixture` is given.
pub fn default_forest() -> Result<Vec<TreeNode>> {
    parse_fixture(include_str!("../../assets/default_tree.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::folder(
                "src",
                vec![
                    TreeNode::folder("components", vec![TreeNode::file("Header.jsx")]),
                    TreeNode::file("index.js"),
                ],
            ),
            TreeNode::file("README.md"),
        ]
    }

    #[test]
    fn walk_is_depth_first_in_order() {
        let forest = sample();
        let names: Vec<&str> = walk_forest(&forest).map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["src", "components", "Header.jsx", "index.js", "README.md"]
        );
    }

    #[test]
    fn count_nodes_counts_every_record() {
        assert_eq!(count_nodes(&sample()), 5);
        assert_eq!(count_nodes(&[]), 0);
    }

    #[test]
    fn parse_fixture_reads_nested_records() {
        let json = r#"[
            {"type": "folder", "name": "src", "children": [
                {"type": "file", "name": "index.js"}
            ]},
            {"type": "folder", "name": "data", "children": []},
            {"kind": "file", "name": ".gitignore"}
        ]"#;
        let forest = parse_fixture(json).unwrap();
        assert_eq!(forest.len(), 3);
        assert_eq!(forest[0].children[0], TreeNode::file("index.js"));
        assert!(forest[1].is_folder());
        assert!(forest[1].children.is_empty());
        assert_eq!(forest[2].kind, NodeKind::File);
    }

    #[test]
    fn parse_fixture_rejects_missing_kind_with_path() {
        let json = r#"[
            {"type": "folder", "name": "src", "children": [
                {"type": "file", "name": "ok.js"},
                {"name": "broken.js"}
            ]}
        ]"#;
        match parse_fixture(json) {
            Err(TreeError::MalformedFixture { path, reason }) => {
                assert_eq!(path, "[0].children[1]");
                assert!(reason.contains("type"));
            }
            other => panic!("expected malformed fixture, got {other:?}"),
        }
    }

    #[test]
    fn parse_fixture_rejects_file_with_children() {
        let json = r#"[{"type": "file", "name": "a.js", "children": [{"type": "file", "name": "b"}]}]"#;
        assert!(matches!(
            parse_fixture(json),
            Err(TreeError::MalformedFixture { .. })
        ));
    }

    #[test]
    fn parse_fixture_rejects_unknown_kind_and_bad_shapes() {
        assert!(parse_fixture(r#"[{"type": "link", "name": "x"}]"#).is_err());
        assert!(parse_fixture(r#"[{"type": "file"}]"#).is_err());
        assert!(parse_fixture(r#"[{"type": "file", "name": 3}]"#).is_err());
        assert!(parse_fixture(r#"{"type": "file", "name": "x"}"#).is_err());
        assert!(parse_fixture(r#"["x"]"#).is_err());
        assert!(matches!(parse_fixture("[{"), Err(TreeError::Json(_))));
    }

    #[test]
    fn default_forest_decodes() {
        let forest = default_forest().unwrap();
        let top: Vec<&str> = forest.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(top.first(), Some(&"src"));
        assert_eq!(top.last(), Some(&".gitignore"));
        assert_eq!(count_nodes(&forest), 33);
    }
}
