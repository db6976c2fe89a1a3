//! The compiled-in portfolio architecture: what runs where and what talks
//! to what. Rendering code takes a [`Diagram`] by reference and never
//! assumes this particular table.

use super::types::{Diagram, Edge, Endpoint, Group, GroupKey, Method, Node, NodeExtra};

pub static ARCHITECTURE: Diagram = Diagram {
	nodes: NODES,
	edges: EDGES,
	groups: GROUPS,
};

const GROUPS: &[Group] = &[
	Group {
		key: GroupKey::Client,
		color: "#64748b",
		label: "Client",
	},
	Group {
		key: GroupKey::Compute,
		color: "#0078d4",
		label: "Compute",
	},
	Group {
		key: GroupKey::Data,
		color: "#f59e0b",
		label: "Data",
	},
	Group {
		key: GroupKey::Ai,
		color: "#a855f7",
		label: "AI / NLP",
	},
	Group {
		key: GroupKey::External,
		color: "#10b981",
		label: "External",
	},
	Group {
		key: GroupKey::Infra,
		color: "#f43f5e",
		label: "Infrastructure",
	},
];

const NODES: &[Node] = &[
	Node {
		id: "user",
		label: "Visitor",
		icon: "👤",
		x: 50.0,
		y: 7.0,
		group: GroupKey::Client,
		desc: "Portfolio visitors & recruiters hitting the live site.",
		tech: None,
		extra: NodeExtra::None,
	},
	Node {
		id: "swa",
		label: "Static Web App",
		icon: "⚡",
		x: 50.0,
		y: 24.0,
		group: GroupKey::Compute,
		desc: "Azure Static Web Apps — hosts frontend + integrated serverless Functions behind a global CDN.",
		tech: Some("Azure Static Web Apps · West US 2"),
		extra: NodeExtra::None,
	},
	Node {
		id: "functions",
		label: "Azure Functions",
		icon: "λ",
		x: 24.0,
		y: 44.0,
		group: GroupKey::Compute,
		desc: "5 Python serverless endpoints using the v2 programming model with @app.route decorators.",
		tech: Some("Python 3.11 · v2 Decorators"),
		extra: NodeExtra::Endpoints(&[
			Endpoint {
				method: Method::Get,
				path: "/api/GetVisitorCount",
			},
			Endpoint {
				method: Method::Get,
				path: "/api/GetGitHubStats",
			},
			Endpoint {
				method: Method::Get,
				path: "/api/GetResumeStats",
			},
			Endpoint {
				method: Method::Post,
				path: "/api/TrackResumeDownload",
			},
			Endpoint {
				method: Method::Post,
				path: "/api/SubmitContactForm",
			},
		]),
	},
	Node {
		id: "cosmos",
		label: "Cosmos DB",
		icon: "🪐",
		x: 76.0,
		y: 44.0,
		group: GroupKey::Data,
		desc: "Azure Cosmos DB (Serverless, SQL API) — 3 containers for visitor counts, resume downloads, and contact messages.",
		tech: Some("SQL API · Serverless · Partition /id"),
		extra: NodeExtra::Containers(&["Counter", "ResumeDownloads", "ContactMessages"]),
	},
	Node {
		id: "sentiment",
		label: "Sentiment Engine",
		icon: "🧠",
		x: 24.0,
		y: 66.0,
		group: GroupKey::Ai,
		desc: "NLP pipeline: TextBlob sentiment analysis with a custom keyword fallback, spam detection via regex + keyword scoring, and priority ranking 1–10.",
		tech: Some("TextBlob · Keyword Fallback · Spam Detection"),
		extra: NodeExtra::None,
	},
	Node {
		id: "github_api",
		label: "GitHub API",
		icon: "🐙",
		x: 76.0,
		y: 66.0,
		group: GroupKey::External,
		desc: "Live repo stats proxied through GetGitHubStats — stars, forks, languages, and recent activity.",
		tech: Some("REST API · Proxied via Azure Function"),
		extra: NodeExtra::None,
	},
	Node {
		id: "terraform",
		label: "Terraform",
		icon: "🏗️",
		x: 16.0,
		y: 88.0,
		group: GroupKey::Infra,
		desc: "All Azure resources managed as code — imported existing resources with lifecycle protection to prevent accidental deletion.",
		tech: Some("AzureRM Provider · prevent_destroy"),
		extra: NodeExtra::None,
	},
	Node {
		id: "actions",
		label: "GitHub Actions",
		icon: "🔄",
		x: 50.0,
		y: 88.0,
		group: GroupKey::Infra,
		desc: "CI/CD pipeline triggers on push to main — builds and deploys frontend + backend to Azure Static Web Apps automatically.",
		tech: Some("Auto-Deploy on Push to Main"),
		extra: NodeExtra::None,
	},
	Node {
		id: "insights",
		label: "App Insights",
		icon: "📊",
		x: 84.0,
		y: 88.0,
		group: GroupKey::Data,
		desc: "Application performance monitoring — tracks request rates, response times, failures, and dependencies across all endpoints.",
		tech: Some("appi-portfolio-prod · West US 2"),
		extra: NodeExtra::None,
	},
];

const EDGES: &[Edge] = &[
	Edge {
		from: "user",
		to: "swa",
		label: "HTTPS",
		live: true,
	},
	Edge {
		from: "swa",
		to: "functions",
		label: "API Routes",
		live: true,
	},
	Edge {
		from: "functions",
		to: "cosmos",
		label: "Read / Write",
		live: true,
	},
	Edge {
		from: "functions",
		to: "sentiment",
		label: "Analyze",
		live: false,
	},
	Edge {
		from: "functions",
		to: "github_api",
		label: "Proxy",
		live: false,
	},
	Edge {
		from: "actions",
		to: "swa",
		label: "Deploy",
		live: false,
	},
	Edge {
		from: "functions",
		to: "insights",
		label: "Telemetry",
		live: false,
	},
	Edge {
		from: "terraform",
		to: "cosmos",
		label: "Provision",
		live: false,
	},
	Edge {
		from: "terraform",
		to: "swa",
		label: "Provision",
		live: false,
	},
];

#[cfg(test)]
mod tests {
	use super::super::types::ConfigError;
	use super::*;

	#[test]
	fn shipped_configuration_is_valid() {
		assert_eq!(ARCHITECTURE.validate(), Ok(()));
	}

	#[test]
	fn validate_rejects_duplicate_node_ids() {
		let diagram = Diagram {
			nodes: &[
				Node {
					id: "a",
					label: "A",
					icon: "•",
					x: 0.0,
					y: 0.0,
					group: GroupKey::Client,
					desc: "",
					tech: None,
					extra: NodeExtra::None,
				},
				Node {
					id: "a",
					label: "A again",
					icon: "•",
					x: 10.0,
					y: 10.0,
					group: GroupKey::Client,
					desc: "",
					tech: None,
					extra: NodeExtra::None,
				},
			],
			edges: &[],
			groups: GROUPS,
		};
		assert_eq!(diagram.validate(), Err(ConfigError::DuplicateNodeId("a")));
	}

	#[test]
	fn validate_rejects_dangling_edge_endpoint() {
		let diagram = Diagram {
			nodes: &[Node {
				id: "a",
				label: "A",
				icon: "•",
				x: 0.0,
				y: 0.0,
				group: GroupKey::Client,
				desc: "",
				tech: None,
				extra: NodeExtra::None,
			}],
			edges: &[Edge {
				from: "a",
				to: "ghost",
				label: "Haunt",
				live: false,
			}],
			groups: GROUPS,
		};
		assert_eq!(
			diagram.validate(),
			Err(ConfigError::UnknownEdgeNode {
				label: "Haunt",
				id: "ghost",
			})
		);
	}

	#[test]
	fn every_node_group_has_a_legend_entry() {
		for node in ARCHITECTURE.nodes {
			assert!(ARCHITECTURE.group(node.group).is_some(), "{}", node.id);
		}
	}
}
