use std::path::Path;

use tracing::{debug, info};

use crate::builder::fabrication::{GenerationInstruction, PageObjectInFabrication};
use crate::builder::page_object_builder::PageObjectBuilder;
use crate::cli::config::{build_builder_options, effective_excludes, AppConfig, FilterArgs, GenerateArgs};
use crate::codegen::fingerprint::source_fingerprint;
use crate::element::element_model::{ElementId, ElementSnapshot, ElementTree};
use crate::error::CliError;

// ============================================================================
// generate subcommand
// ============================================================================

/// What `generate` produced and which files it touched.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub page_object: PageObjectInFabrication,
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
}

pub fn cmd_generate(args: &GenerateArgs, config: &AppConfig) -> Result<GenerateOutcome, CliError> {
    let options = build_builder_options(args, config);
    let exclude = effective_excludes(&args.filter, config);
    let mut builder = PageObjectBuilder::new(options);

    let mut snapshots = args.filter.snapshots.iter();
    let first = snapshots.next().ok_or(CliError::NoSnapshot)?;

    let mut instruction = GenerationInstruction::named(&args.name)
        .with_exclude(exclude.iter().cloned())
        .with_include(args.filter.include.iter().cloned());
    instruction.path = args.path.clone();
    if args.dry_run {
        instruction = instruction.as_virtual();
    }

    let mut page_object = builder.generate(instruction.clone(), &load_snapshot(first)?)?;
    for path in snapshots {
        debug!(snapshot = %path, "appending snapshot");
        page_object = builder.append(instruction.clone(), &load_snapshot(path)?, &page_object)?;
    }
    if let Some(route) = &args.route {
        page_object = builder.add_navigate_to(&page_object, route);
    }
    if args.fill_form {
        page_object = builder.add_fill_form(&page_object);
    }

    let mut outcome = GenerateOutcome {
        page_object,
        written: Vec::new(),
        unchanged: Vec::new(),
    };
    if !outcome.page_object.instruction.is_virtual {
        write_page_object(&mut outcome)?;
    }

    if let Some(path) = &args.save_tree {
        let json = serde_json::to_string_pretty(&outcome.page_object.tree.to_snapshot())
            .map_err(|e| CliError::JsonSnapshot {
                path: path.clone(),
                source: e,
            })?;
        write_file(Path::new(path), &json)?;
        outcome.written.push(path.clone());
    }

    Ok(outcome)
}

/// Write the generated file unless its content is unchanged, and the
/// extending file only if it does not exist yet.
fn write_page_object(outcome: &mut GenerateOutcome) -> Result<(), CliError> {
    let po = &outcome.page_object;

    let generated = &po.paths.generated;
    let unchanged = std::fs::read_to_string(generated)
        .map(|existing| source_fingerprint(&existing) == po.fingerprint)
        .unwrap_or(false);
    if unchanged {
        outcome.unchanged.push(generated.display().to_string());
    } else {
        write_file(generated, &po.generated_source)?;
        outcome.written.push(generated.display().to_string());
    }

    let extending = &po.paths.extending;
    if extending.exists() {
        outcome.unchanged.push(extending.display().to_string());
    } else {
        write_file(extending, &po.extending_source)?;
        outcome.written.push(extending.display().to_string());
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    let io_err = |source| CliError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)?;
    info!(path = %path.display(), "wrote file");
    Ok(())
}

// ============================================================================
// inspect subcommand
// ============================================================================

/// Run restrict, merge, collapse and resolve over the snapshots and
/// describe the resulting tree.
pub fn cmd_inspect(filter: &FilterArgs, config: &AppConfig) -> Result<String, CliError> {
    let exclude = effective_excludes(filter, config);
    let mut tree = ElementTree::new();
    for path in &filter.snapshots {
        let mut addend = ElementTree::from_snapshot(&load_snapshot(path)?);
        addend.restrict(&exclude, &filter.include);
        tree.merge_from(addend, None);
    }
    tree.collapse_duplicates();
    tree.resolve_conflicts().map_err(|e| CliError::Generation(e.into()))?;
    tree.compact();
    Ok(describe_tree(&tree))
}

/// One element per line, indented by depth:
/// `Results[]  <UL>  [array]`.
pub fn describe_tree(tree: &ElementTree) -> String {
    let mut out = String::new();
    describe_layer(tree, tree.roots(), 0, &mut out);
    out
}

fn describe_layer(tree: &ElementTree, layer: &[ElementId], depth: usize, out: &mut String) {
    for &id in layer {
        let el = tree.get(id);
        out.push_str(&"  ".repeat(depth));
        out.push_str(&el.conflict_free_id());
        out.push_str(&format!("  <{}>", el.element_type()));
        if el.is_array() {
            out.push_str("  [array]");
        }
        if el.is_private() {
            out.push_str("  [private]");
        }
        out.push('\n');
        describe_layer(tree, el.children(), depth + 1, out);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a snapshot from a `.yaml`/`.yml` file or, otherwise, a JSON file.
pub fn load_snapshot(path: &str) -> Result<Vec<ElementSnapshot>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;

    let is_yaml = Path::new(path)
        .extension()
        .map_or(false, |e| e == "yaml" || e == "yml");
    if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| CliError::YamlSnapshot {
            path: path.to_string(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| CliError::JsonSnapshot {
            path: path.to_string(),
            source,
        })
    }
}
