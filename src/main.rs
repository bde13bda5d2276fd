use anyhow::{Context, Result};
use relgraph::{ActiveContext, GroupSpec, RelGraphConfig, TableGraph};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("relgraph v{}", relgraph::version());
    println!("==========================================");
    println!();

    let config = match std::env::var("RELGRAPH_CONFIG") {
        Ok(path) => RelGraphConfig::load(&path).with_context(|| format!("loading {}", path))?,
        Err(_) => RelGraphConfig::default(),
    };

    let mut graph = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
            let value: serde_json::Value =
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path))?;
            TableGraph::from_json_with_config(&value, config)?
        }
        None => TableGraph::from_json_with_config(&demo_graph(), config)?,
    };

    println!("{}", graph.describe());
    println!();

    demo_grouping(&mut graph)?;
    demo_distinct(&mut graph)?;

    Ok(())
}

fn demo_graph() -> serde_json::Value {
    json!({
        "nodes": [
            {"name": "Alice", "city": "New York"},
            {"name": "Bob", "city": "San Francisco"},
            {"name": "Charlie", "city": "New York"},
            {"name": "Dana", "city": "Boston"}
        ],
        "edges": [
            {"from": 0, "to": 1, "kind": "knows"},
            {"from": 1, "to": 2, "kind": "knows"},
            {"from": 2, "to": 3, "kind": "works_with"}
        ],
        "directed": false
    })
}

fn demo_grouping(graph: &mut TableGraph) -> Result<()> {
    println!("=== Grouping ===");
    graph.activate(ActiveContext::Nodes).group_by(GroupSpec::by(["city"]))?;
    println!("✓ Node groups by {:?}: sizes {:?}", graph.group_vars(), graph.group_size());

    graph.activate(ActiveContext::Edges).group_by(GroupSpec::by(["kind"]))?;
    println!("✓ Edge groups by {:?}: sizes {:?}", graph.group_vars(), graph.group_size());
    println!();
    Ok(())
}

fn demo_distinct(graph: &mut TableGraph) -> Result<()> {
    println!("=== Distinct ===");
    graph.activate(ActiveContext::Nodes).distinct(&["city"], true)?;
    println!("✓ One node per city; incident edges of removed nodes are gone");
    println!("{}", graph.describe());

    graph.activate(ActiveContext::Edges);
    println!("✓ Edge groups after cascade: sizes {:?}", graph.group_size());
    Ok(())
}
