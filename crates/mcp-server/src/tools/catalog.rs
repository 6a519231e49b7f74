#[derive(Clone, Copy, Debug)]
pub(crate) struct ToolDescriptor {
    pub(crate) name: &'static str,
    pub(crate) summary: &'static str,
}

pub(crate) const TOOL_CATALOG: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "text-search",
        summary: "Full text search over an index (optional semantic ranking).",
    },
    ToolDescriptor {
        name: "list-indexes",
        summary: "List all indexes in the search service.",
    },
    ToolDescriptor {
        name: "index-info",
        summary: "Name and declared fields of one index.",
    },
    ToolDescriptor {
        name: "query",
        summary: "Filter-expression query (wildcard text search).",
    },
    ToolDescriptor {
        name: "vector-search",
        summary: "Vector similarity search over one vector field.",
    },
    ToolDescriptor {
        name: "hybrid-search",
        summary: "Combined text and vector search in one call.",
    },
];

pub(crate) fn tool_instructions() -> String {
    let mut lines = vec![
        "Azure Search provides query access to an Azure AI Search service.".to_string(),
        "Calls run against the configured default index unless `index_name` says otherwise."
            .to_string(),
        "Tools:".to_string(),
    ];
    for tool in TOOL_CATALOG {
        lines.push(format!("- {}: {}", tool.name, tool.summary));
    }
    lines.join("\n")
}
