use std::path::{Component, Path, PathBuf};

use crate::element::case::pascal_to_kebab;

pub const PAGE_OBJECTS_DIR: &str = "page-objects";
pub const GENERATED_DIR: &str = "generated";
pub const SOURCE_EXTENSION: &str = "ts";

/// Where the two files of a page object live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageObjectPaths {
    /// `<e2e>/page-objects/generated/<path>/generated-<name>.ts`, rewritten on
    /// every operation.
    pub generated: PathBuf,

    /// `<e2e>/page-objects/<path>/<name>.ts`, created once and then owned by
    /// the user.
    pub extending: PathBuf,
}

pub fn page_object_paths(e2e_root: &Path, page_name: &str, instruct_path: Option<&str>) -> PageObjectPaths {
    let page_objects = e2e_root.join(PAGE_OBJECTS_DIR);
    let generated_root = page_objects.join(GENERATED_DIR);

    let sub_dir = instruct_path
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty());
    let within = |root: PathBuf| match sub_dir {
        Some(dir) => root.join(dir),
        None => root,
    };

    PageObjectPaths {
        generated: within(generated_root).join(format!(
            "{}.{SOURCE_EXTENSION}",
            pascal_to_kebab(&format!("Generated{page_name}"))
        )),
        extending: within(page_objects).join(format!("{}.{SOURCE_EXTENSION}", pascal_to_kebab(page_name))),
    }
}

/// Module specifier for importing `to_file` from `from_file`, without the
/// source extension: `./x`, `../generated/x`.
pub fn import_path(from_file: &Path, to_file: &Path) -> String {
    let from_dir: Vec<Component> = from_file
        .parent()
        .map(|p| p.components().collect())
        .unwrap_or_default();
    let target = to_file.with_extension("");
    let to: Vec<Component> = target.components().collect();

    let common = from_dir
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let rest = to[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let ups = from_dir.len() - common;
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}
