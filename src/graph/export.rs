//! Rendering crawl results for downstream tools
//!
//! Three formats are produced from a [`CrawlSnapshot`]:
//! - **dot**: Graphviz document, nodes filled by depth color and sized by
//!   degree, with a depth legend cluster
//! - **json**: the snapshot itself
//! - **csv**: edge list with endpoint depths
//!
//! Layout and rasterizing are left to Graphviz (`dot -Tpng`, `neato`, ...).

use std::collections::HashMap;

use anyhow::Result;

use super::palette::ColorScheme;
use super::snapshot::CrawlSnapshot;
use super::GraphError;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Graphviz DOT
    #[default]
    Dot,
    /// Pretty-printed snapshot JSON
    Json,
    /// Edge list CSV
    Csv,
}

impl ExportFormat {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Some(ExportFormat::Dot),
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    /// Guess the format from an output file extension
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
            .or_else(|| match path.extension()?.to_str()? {
                "gv" => Some(ExportFormat::Dot),
                _ => None,
            })
    }
}

/// Presentation settings for rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: ExportFormat,
    pub color_scheme: ColorScheme,
    /// Base node area in square points
    pub node_size_base: u32,
    /// Extra node area per neighbour
    pub node_size_multiplier: u32,
    pub edge_color: String,
    pub edge_width: f32,
    pub background_color: String,
    pub font_size: u32,
    pub title_font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            format: ExportFormat::Dot,
            color_scheme: ColorScheme::Viridis,
            node_size_base: 8000,
            node_size_multiplier: 500,
            edge_color: "#CCCCCC".to_string(),
            edge_width: 1.5,
            background_color: "#FAFAFA".to_string(),
            font_size: 14,
            title_font_size: 24,
        }
    }
}

impl RenderConfig {
    pub fn new(format: ExportFormat) -> Self {
        RenderConfig {
            format,
            ..Default::default()
        }
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    /// Node width in inches for a given degree
    fn node_width(&self, degree: usize) -> f64 {
        let area = self.node_size_base as f64 + degree as f64 * self.node_size_multiplier as f64;
        area.sqrt() / 72.0
    }
}

/// Render a snapshot in the configured format
///
/// # Errors
/// Refuses empty snapshots with [`GraphError::Empty`].
pub fn render(snapshot: &CrawlSnapshot, config: &RenderConfig) -> Result<String> {
    if snapshot.nodes.is_empty() {
        return Err(GraphError::Empty.into());
    }

    match config.format {
        ExportFormat::Dot => Ok(render_dot(snapshot, config)),
        ExportFormat::Json => Ok(snapshot.to_json(true)?),
        ExportFormat::Csv => render_csv(snapshot),
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn render_dot(snapshot: &CrawlSnapshot, config: &RenderConfig) -> String {
    let mut out = String::new();
    out.push_str("graph related_jobs {\n");
    out.push_str(&format!(
        "  graph [label=\"Related jobs\\nseed: {}\", labelloc=t, fontsize={}, bgcolor=\"{}\", overlap=false, splines=true];\n",
        escape_dot(&snapshot.seed_name),
        config.title_font_size,
        config.background_color
    ));
    out.push_str(&format!(
        "  node [shape=ellipse, style=filled, fontcolor=\"#333333\", fontsize={}, fixedsize=false];\n",
        config.font_size
    ));
    out.push_str(&format!(
        "  edge [color=\"{}\", penwidth={}];\n",
        config.edge_color, config.edge_width
    ));

    for node in &snapshot.nodes {
        let depth = node.depth.unwrap_or(0);
        out.push_str(&format!(
            "  \"{}\" [fillcolor=\"{}\", width={:.2}, tooltip=\"depth {}\"];\n",
            escape_dot(&node.name),
            config.color_scheme.color_for(depth, snapshot.max_depth),
            config.node_width(node.degree),
            depth
        ));
    }

    push_depth_legend(&mut out, snapshot.max_depth, config);

    for (a, b) in &snapshot.edges {
        out.push_str(&format!("  \"{}\" -- \"{}\";\n", escape_dot(a), escape_dot(b)));
    }

    out.push_str("}\n");
    out
}

/// One swatch per depth, chained by invisible edges so they line up
fn push_depth_legend(out: &mut String, max_depth: usize, config: &RenderConfig) {
    out.push_str("  subgraph cluster_legend {\n");
    out.push_str("    label=\"depth\"; style=rounded; color=\"#999999\";\n");
    for depth in 0..=max_depth {
        out.push_str(&format!(
            "    \"__depth_{}\" [label=\"{}\", shape=box, width=0.4, fillcolor=\"{}\"];\n",
            depth,
            depth,
            config.color_scheme.color_for(depth, max_depth)
        ));
    }
    for depth in 1..=max_depth {
        out.push_str(&format!(
            "    \"__depth_{}\" -- \"__depth_{}\" [style=invis];\n",
            depth - 1,
            depth
        ));
    }
    out.push_str("  }\n");
}

fn render_csv(snapshot: &CrawlSnapshot) -> Result<String> {
    let depths: HashMap<&str, usize> = snapshot
        .nodes
        .iter()
        .filter_map(|n| Some((n.name.as_str(), n.depth?)))
        .collect();
    let depth_of = |name: &str| {
        depths
            .get(name)
            .map(|d| d.to_string())
            .unwrap_or_default()
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["source", "target", "source_depth", "target_depth"])?;
    for (a, b) in &snapshot.edges {
        let (depth_a, depth_b) = (depth_of(a), depth_of(b));
        writer.write_record([a.as_str(), b.as_str(), depth_a.as_str(), depth_b.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("csv flush failed: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}
