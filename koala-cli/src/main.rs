//! Koala CLI - inspect computed styles and box layout
//!
//! Reads a JSON document tree and an optional stylesheet, runs the cascade
//! and layout, and prints the result.
//!
//! ```text
//! koala page.json --css page.css
//! koala page.json --css page.css --json
//! koala page.json --styles --visited https://example.com/seen
//! ```

mod document;

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use koala_common::warning::clear_warnings;
use koala_css::{
    ApproximateMeasurer, BoxId, EdgeSizes, LayoutContext, LayoutTree, MatchContext, Rect, Style,
    Stylesheet, Viewport, compute_layout, compute_styles,
};
use koala_dom::{DomTree, NodeId, NodeType};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Koala - compute styles and layout for a document tree
#[derive(Parser, Debug)]
#[command(name = "koala")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the laid-out box tree
    koala page.json --css page.css

    # Same tree as JSON
    koala page.json --css page.css --json

    # Dump computed styles for every element
    koala page.json --css page.css --styles

    # Treat a link target as visited
    koala page.json --base-url https://example.com/ --visited https://example.com/about
"#)]
struct Cli {
    /// JSON document tree
    #[arg(value_name = "FILE")]
    document: PathBuf,

    /// Stylesheet to apply
    #[arg(long, value_name = "FILE")]
    css: Option<PathBuf>,

    /// Viewport width in px; also the layout container width
    #[arg(long, default_value = "800")]
    viewport_width: f32,

    /// Viewport height in px
    #[arg(long, default_value = "600")]
    viewport_height: f32,

    /// URL to treat as visited for `:visited` (repeatable)
    #[arg(long, value_name = "URL")]
    visited: Vec<String>,

    /// Base URL that link targets are resolved against
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Print JSON instead of a colored tree
    #[arg(long)]
    json: bool,

    /// Print computed styles instead of the box tree
    #[arg(long)]
    styles: bool,

    /// Log at debug level (overrides `RUST_LOG`)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dom = document::load_document(&cli.document)
        .with_context(|| format!("loading document {}", cli.document.display()))?;
    let stylesheet = match &cli.css {
        Some(path) => {
            let css = fs::read_to_string(path)
                .with_context(|| format!("reading stylesheet {}", path.display()))?;
            Stylesheet::parse(&css)
        }
        None => Stylesheet::default(),
    };
    tracing::debug!(rules = stylesheet.rules.len(), nodes = dom.len(), "inputs loaded");

    let viewport = Viewport::new(cli.viewport_width, cli.viewport_height);
    let visited: HashSet<String> = cli.visited.iter().cloned().collect();
    let is_visited = |url: &str| visited.contains(url);
    let base_url = cli.base_url.as_deref();
    let resolve_url = |href: &str| match base_url {
        Some(base) => resolve_against(base, href),
        None => href.to_string(),
    };
    let matching = MatchContext {
        is_visited: Some(&is_visited),
        resolve_url: Some(&resolve_url),
    };

    clear_warnings();
    let styles = compute_styles(&dom, &stylesheet, viewport, &matching);

    if cli.styles {
        if cli.json {
            let dump = style_dump(&dom, &styles);
            println!("{}", serde_json::to_string_pretty(&dump)?);
        } else {
            print_styles(&dom, &styles, dom.root(), 0);
        }
        return Ok(());
    }

    let mut layout = LayoutTree::build(&dom, &styles);
    let measurer = ApproximateMeasurer;
    let ctx = LayoutContext::new(viewport, &measurer);
    compute_layout(&mut layout, viewport.width, &ctx);

    if cli.json {
        let view = BoxView::new(&layout, layout.root());
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_layout(&layout, layout.root(), 0);
    }
    Ok(())
}

/// Install the fmt subscriber on stderr. `RUST_LOG` picks the filter unless
/// `--verbose` asks for debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Minimal reference resolution: absolute URLs pass through, `/path` keeps
/// the base's origin, anything else replaces the base's last path segment.
fn resolve_against(base: &str, href: &str) -> String {
    if href.contains("://") {
        return href.to_string();
    }
    let origin_end = base
        .find("://")
        .and_then(|scheme| base[scheme + 3..].find('/').map(|i| scheme + 3 + i))
        .unwrap_or(base.len());
    if href.starts_with('/') {
        return format!("{}{href}", &base[..origin_end]);
    }
    let dir_end = base[origin_end..]
        .rfind('/')
        .map_or(base.len(), |i| origin_end + i + 1);
    if dir_end == base.len() && !base.ends_with('/') {
        format!("{base}/{href}")
    } else {
        format!("{}{href}", &base[..dir_end])
    }
}

// ─── Box tree output ────────────────────────────────────────────────────────

fn print_layout(tree: &LayoutTree, id: BoxId, depth: usize) {
    let indent = "  ".repeat(depth);
    let layout_box = &tree[id];
    let rect = layout_box.rect;
    let geometry = format!(
        "({:.1}, {:.1}) {:.1}x{:.1}",
        rect.x, rect.y, rect.width, rect.height
    );

    let label = match (&layout_box.element, &layout_box.text) {
        (Some(element), _) => {
            let mut label = format!("<{}", element.tag_name);
            if let Some(id) = element.id() {
                let _ = write!(label, " id=\"{id}\"");
            }
            if let Some(class) = element.attr("class") {
                let _ = write!(label, " class=\"{class}\"");
            }
            label.push('>');
            label
        }
        (None, Some(text)) => format!("\"{}\"", preview(text)),
        (None, None) => "#document".to_string(),
    };

    println!(
        "{indent}{} {} {}",
        layout_box.box_type.as_ref().cyan(),
        label.bold(),
        geometry.dimmed()
    );
    if layout_box.text.is_some() && layout_box.wrapped_lines.len() > 1 {
        for line in &layout_box.wrapped_lines {
            println!("{indent}  {} {}", "|".dimmed(), line.green());
        }
    }
    for &child in tree.children(id) {
        print_layout(tree, child, depth + 1);
    }
}

fn preview(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > 50 {
        let head: String = collapsed.chars().take(50).collect();
        format!("{head}...")
    } else {
        collapsed
    }
}

/// JSON shape of one laid-out box.
#[derive(Serialize)]
struct BoxView {
    id: BoxId,
    #[serde(rename = "type")]
    box_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    rect: Rect,
    margin: EdgeSizes,
    padding: EdgeSizes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    lines: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<BoxView>,
}

impl BoxView {
    fn new(tree: &LayoutTree, id: BoxId) -> Self {
        let layout_box = &tree[id];
        Self {
            id,
            box_type: layout_box.box_type.to_string(),
            tag: layout_box.element.as_ref().map(|e| e.tag_name.clone()),
            text: layout_box.text.clone(),
            rect: layout_box.rect,
            margin: layout_box.margin,
            padding: layout_box.padding,
            lines: layout_box.wrapped_lines.clone(),
            children: tree
                .children(id)
                .iter()
                .map(|&child| Self::new(tree, child))
                .collect(),
        }
    }
}

// ─── Style output ───────────────────────────────────────────────────────────

fn print_styles(dom: &DomTree, styles: &HashMap<NodeId, Style>, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let Some(node) = dom.get(id) else { return };
    match &node.node_type {
        NodeType::Document => println!("{indent}{}", "#document".dimmed()),
        NodeType::Element(element) => {
            let summary = styles.get(&id).map(style_summary).unwrap_or_default();
            println!(
                "{indent}{} {}",
                format!("<{}>", element.tag_name).cyan(),
                summary.dimmed()
            );
        }
        NodeType::Text(text) => {
            if !text.trim().is_empty() {
                println!("{indent}{}", format!("\"{}\"", preview(text)).green());
            }
        }
        NodeType::Comment(_) => {}
    }
    for &child in dom.children(id) {
        print_styles(dom, styles, child, depth + 1);
    }
}

fn style_summary(style: &Style) -> String {
    let mut parts = vec![
        format!("color:{}", hex(style.color)),
        format!("font:{:.1}px", style.font_size),
    ];
    if let Some(bg) = style.background_color {
        parts.push(format!("bg:{}", hex(bg)));
    }
    if style.bold {
        parts.push("bold".to_string());
    }
    if style.italic {
        parts.push("italic".to_string());
    }
    if let Some(lh) = style.line_height {
        parts.push(format!("lh:{lh:.1}"));
    }
    if let Some(display) = style.display {
        parts.push(format!("display:{display}"));
    }
    if style.margin != EdgeSizes::default() {
        parts.push(format!("margin:{}", edges(style.margin)));
    }
    if style.padding != EdgeSizes::default() {
        parts.push(format!("pad:{}", edges(style.padding)));
    }
    if let Some(width) = style.width {
        parts.push(format!("width:{width:.1}px"));
    }
    format!("[{}]", parts.join(" "))
}

fn hex(color: koala_css::ColorValue) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn edges(e: EdgeSizes) -> String {
    format!("{} {} {} {}", e.top, e.right, e.bottom, e.left)
}

/// JSON shape of one element's computed style.
#[derive(Serialize)]
struct StyleEntry<'a> {
    node: usize,
    tag: &'a str,
    style: &'a Style,
}

fn style_dump<'a>(dom: &'a DomTree, styles: &'a HashMap<NodeId, Style>) -> Vec<StyleEntry<'a>> {
    let mut entries = Vec::new();
    let mut stack = vec![dom.root()];
    while let Some(id) = stack.pop() {
        if let (Some(element), Some(style)) = (dom.as_element(id), styles.get(&id)) {
            entries.push(StyleEntry {
                node: id.0,
                tag: &element.tag_name,
                style,
            });
        }
        stack.extend(dom.children(id).iter().rev().copied());
    }
    entries
}
