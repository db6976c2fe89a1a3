use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKey {
	Client,
	Compute,
	Data,
	Ai,
	External,
	Infra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}

	pub fn css_class(&self) -> &'static str {
		match self {
			Method::Get => "arch-ep-method arch-ep-method--get",
			Method::Post => "arch-ep-method arch-ep-method--post",
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct Endpoint {
	pub method: Method,
	pub path: &'static str,
}

/// Per-node detail payload. A node exposes endpoints, named containers, or
/// neither; never both.
#[derive(Clone, Copy, Debug)]
pub enum NodeExtra {
	None,
	Endpoints(&'static [Endpoint]),
	Containers(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug)]
pub struct Node {
	pub id: &'static str,
	pub label: &'static str,
	pub icon: &'static str,
	/// Position as percentages of the container, 0..=100.
	pub x: f64,
	pub y: f64,
	pub group: GroupKey,
	pub desc: &'static str,
	pub tech: Option<&'static str>,
	pub extra: NodeExtra,
}

#[derive(Clone, Copy, Debug)]
pub struct Edge {
	pub from: &'static str,
	pub to: &'static str,
	pub label: &'static str,
	/// Live edges carry runtime traffic and get the animated flow dot;
	/// the rest are structural and render dashed.
	pub live: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Group {
	pub key: GroupKey,
	pub color: &'static str,
	pub label: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Diagram {
	pub nodes: &'static [Node],
	pub edges: &'static [Edge],
	pub groups: &'static [Group],
}

/// Configuration defects caught by [`Diagram::validate`]. The tables are
/// authored by hand, so a dangling reference is an authoring error worth
/// failing loudly on rather than skipping at draw time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("duplicate node id `{0}`")]
	DuplicateNodeId(&'static str),
	#[error("edge `{label}` references unknown node `{id}`")]
	UnknownEdgeNode {
		label: &'static str,
		id: &'static str,
	},
	#[error("node `{id}` uses group {group:?} which has no legend entry")]
	MissingGroup { id: &'static str, group: GroupKey },
}

impl Diagram {
	pub fn node(&self, id: &str) -> Option<&'static Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn group(&self, key: GroupKey) -> Option<&'static Group> {
		self.groups.iter().find(|g| g.key == key)
	}

	/// True when `a` and `b` are joined by some edge, in either direction.
	pub fn adjacent(&self, a: &str, b: &str) -> bool {
		self.edges
			.iter()
			.any(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		for (i, node) in self.nodes.iter().enumerate() {
			if self.nodes[..i].iter().any(|n| n.id == node.id) {
				return Err(ConfigError::DuplicateNodeId(node.id));
			}
			if self.group(node.group).is_none() {
				return Err(ConfigError::MissingGroup {
					id: node.id,
					group: node.group,
				});
			}
		}
		for edge in self.edges {
			for id in [edge.from, edge.to] {
				if self.node(id).is_none() {
					return Err(ConfigError::UnknownEdgeNode {
						label: edge.label,
						id,
					});
				}
			}
		}
		Ok(())
	}
}
