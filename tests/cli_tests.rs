use std::path::Path;

use clap::Parser;
use page_object_gen::cli::commands::{cmd_generate, cmd_inspect, load_snapshot};
use page_object_gen::cli::config::{
    build_builder_options, effective_excludes, load_config, AppConfig, Cli, Commands, FilterArgs, GenerateArgs,
};
use page_object_gen::error::CliError;

const LOGIN_SNAPSHOT: &str = r#"[
  {
    "id": "login-form",
    "type": "form",
    "children": [
      { "id": "user-name", "type": "input" },
      { "id": "password", "type": "input" },
      { "id": "submit", "type": "button" }
    ]
  }
]"#;

fn parse_generate(args: &[&str]) -> GenerateArgs {
    let argv = ["page-object-gen", "generate"].iter().chain(args).copied();
    match Cli::parse_from(argv).command {
        Commands::Generate(args) => args,
        _ => panic!("Expected Generate command"),
    }
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_generate_minimal() {
    let args = parse_generate(&["--snapshot", "login.json", "--name", "Login"]);
    assert_eq!(args.filter.snapshots, vec!["login.json"]);
    assert_eq!(args.name, "Login");
    assert!(args.filter.exclude.is_empty());
    assert!(args.filter.include.is_empty());
    assert_eq!(args.path, None);
    assert_eq!(args.route, None);
    assert!(!args.fill_form);
    assert!(!args.custom_browser);
    assert_eq!(args.output_dir, None);
    assert!(!args.dry_run);
}

#[test]
fn cli_parse_generate_all_args() {
    let args = parse_generate(&[
        "--snapshot",
        "a.json",
        "--snapshot",
        "b.yaml",
        "--exclude",
        "Footer",
        "--include",
        "LoginForm",
        "--include",
        "Menu",
        "--name",
        "Login",
        "--path",
        "auth",
        "--route",
        "/login",
        "--fill-form",
        "--custom-browser",
        "-o",
        "out",
        "--dry-run",
        "--save-tree",
        "tree.json",
        "--trace",
        "trace.jsonl",
    ]);
    assert_eq!(args.filter.snapshots, vec!["a.json", "b.yaml"]);
    assert_eq!(args.filter.exclude, vec!["Footer"]);
    assert_eq!(args.filter.include, vec!["LoginForm", "Menu"]);
    assert_eq!(args.path.as_deref(), Some("auth"));
    assert_eq!(args.route.as_deref(), Some("/login"));
    assert!(args.fill_form);
    assert!(args.custom_browser);
    assert_eq!(args.output_dir.as_deref(), Some("out"));
    assert!(args.dry_run);
    assert_eq!(args.save_tree.as_deref(), Some("tree.json"));
    assert_eq!(args.trace.as_deref(), Some("trace.jsonl"));
}

#[test]
fn cli_parse_requires_snapshot() {
    let result = Cli::try_parse_from(["page-object-gen", "generate", "--name", "Login"]);
    assert!(result.is_err());
}

#[test]
fn cli_parse_inspect() {
    let cli = Cli::parse_from([
        "page-object-gen",
        "inspect",
        "--snapshot",
        "page.json",
        "--exclude",
        "Ads",
    ]);
    match cli.command {
        Commands::Inspect(filter) => {
            assert_eq!(filter.snapshots, vec!["page.json"]);
            assert_eq!(filter.exclude, vec!["Ads"]);
        }
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "page-object-gen",
        "inspect",
        "--snapshot",
        "page.json",
        "-vv",
        "--config",
        "custom.yaml",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_defaults_when_file_missing() {
    let config = load_config(Some("/nonexistent/page-object-gen.yaml"));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.generate.output_dir, "e2e");
    assert_eq!(config.generate.tab, "  ");
    assert!(config.trace.file.is_none());
}

#[test]
fn config_parses_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "page-object-gen.yaml",
        "generate:\n  output_dir: tests/e2e\n  tab: \"    \"\n  exclude:\n    - Ads\ntrace:\n  file: trace.jsonl\n",
    );

    let config = load_config(Some(path.as_str()));
    assert_eq!(config.generate.output_dir, "tests/e2e");
    assert_eq!(config.generate.tab, "    ");
    assert!(!config.generate.custom_browser);
    assert_eq!(config.generate.exclude, vec!["Ads"]);
    assert_eq!(config.trace.file.as_deref(), Some("trace.jsonl"));
}

#[test]
fn config_malformed_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.yaml", "generate: [not, a, map");
    assert_eq!(load_config(Some(path.as_str())), AppConfig::default());
}

#[test]
fn builder_options_prefer_cli_over_config() {
    let mut config = AppConfig::default();
    config.generate.output_dir = "from-config".to_string();
    config.trace.file = Some("config-trace.jsonl".to_string());

    let args = parse_generate(&["--snapshot", "a.json", "--name", "A"]);
    let options = build_builder_options(&args, &config);
    assert_eq!(options.e2e_test_path, Path::new("from-config"));
    assert_eq!(options.trace_file.as_deref(), Some(Path::new("config-trace.jsonl")));

    let args = parse_generate(&["--snapshot", "a.json", "--name", "A", "-o", "cli", "--trace", "cli.jsonl"]);
    let options = build_builder_options(&args, &config);
    assert_eq!(options.e2e_test_path, Path::new("cli"));
    assert_eq!(options.trace_file.as_deref(), Some(Path::new("cli.jsonl")));
}

#[test]
fn excludes_combine_cli_and_config() {
    let mut config = AppConfig::default();
    config.generate.exclude = vec!["Ads".to_string(), "Footer".to_string()];
    let filter = FilterArgs {
        snapshots: vec!["a.json".to_string()],
        exclude: vec!["Footer".to_string(), "Banner".to_string()],
        include: vec![],
    };
    assert_eq!(effective_excludes(&filter, &config), vec!["Footer", "Banner", "Ads"]);
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn generate_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(dir.path(), "login.json", LOGIN_SNAPSHOT);
    let out = dir.path().join("e2e");
    let out_arg = out.display().to_string();

    let args = parse_generate(&[
        "--snapshot",
        &snapshot,
        "--name",
        "Login",
        "-o",
        &out_arg,
        "--route",
        "/login",
        "--fill-form",
    ]);
    let outcome = cmd_generate(&args, &AppConfig::default()).unwrap();
    assert_eq!(outcome.written.len(), 2);
    assert!(outcome.unchanged.is_empty());

    let generated = std::fs::read_to_string(out.join("page-objects/generated/generated-login.ts")).unwrap();
    assert!(generated.contains("export class GeneratedLogin {"));
    assert!(generated.contains("route = '/login';"));
    assert!(generated.contains("password?: string;"));

    let extending = std::fs::read_to_string(out.join("page-objects/login.ts")).unwrap();
    assert!(extending.contains("export class Login extends GeneratedLogin {"));
}

#[test]
fn generate_rerun_keeps_user_edits_and_unchanged_files() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(dir.path(), "login.json", LOGIN_SNAPSHOT);
    let out_arg = dir.path().join("e2e").display().to_string();
    let args = parse_generate(&["--snapshot", &snapshot, "--name", "Login", "-o", &out_arg]);

    let first = cmd_generate(&args, &AppConfig::default()).unwrap();
    let extending = first.page_object.paths.extending.clone();
    std::fs::write(&extending, "// edited by hand\n").unwrap();

    let second = cmd_generate(&args, &AppConfig::default()).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 2);
    assert_eq!(std::fs::read_to_string(&extending).unwrap(), "// edited by hand\n");
}

#[test]
fn generate_merges_json_and_yaml_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(dir.path(), "first.json", LOGIN_SNAPSHOT);
    let second = write(
        dir.path(),
        "second.yaml",
        "- id: login-form\n  type: form\n  children:\n    - id: remember-me\n      type: input\n- id: footer\n  type: div\n",
    );
    let tree_path = dir.path().join("tree.json").display().to_string();

    let args = parse_generate(&[
        "--snapshot",
        &first,
        "--snapshot",
        &second,
        "--name",
        "Login",
        "--dry-run",
        "--save-tree",
        &tree_path,
    ]);
    let outcome = cmd_generate(&args, &AppConfig::default()).unwrap();
    assert_eq!(
        outcome.page_object.tree.outline(),
        "LoginForm(UserName, Password, Submit, RememberMe), Footer"
    );
    assert!(outcome.page_object.instruction.is_virtual);
    assert_eq!(outcome.written, vec![tree_path.clone()]);

    let saved = load_snapshot(&tree_path).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].children.len(), 4);
    assert_eq!(saved[0].element_type, "FORM");
}

#[test]
fn generate_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(dir.path(), "login.json", LOGIN_SNAPSHOT);
    let out = dir.path().join("e2e");
    let out_arg = out.display().to_string();

    let args = parse_generate(&["--snapshot", &snapshot, "--name", "Login", "-o", &out_arg, "--dry-run"]);
    let outcome = cmd_generate(&args, &AppConfig::default()).unwrap();
    assert!(outcome.written.is_empty());
    assert!(!out.exists());
    assert!(outcome.page_object.generated_source.contains("getLoginForm()"));
}

#[test]
fn inspect_describes_resolved_tree() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write(
        dir.path(),
        "page.json",
        r#"[
          { "id": "results", "type": "ul", "children": [
              { "id": "row[]", "type": "li", "children": [{ "id": "title", "type": "span" }] },
              { "id": "row[]", "type": "li", "children": [{ "id": "title", "type": "span" }] }
          ]},
          { "id": "sidebar", "type": "aside", "children": [{ "id": "title", "type": "h2" }] },
          { "id": "ads", "type": "div" }
        ]"#,
    );
    let mut config = AppConfig::default();
    config.generate.exclude = vec!["Ads".to_string()];
    let filter = FilterArgs {
        snapshots: vec![snapshot],
        exclude: vec![],
        include: vec![],
    };

    let description = cmd_inspect(&filter, &config).unwrap();
    assert_eq!(
        description,
        "Results  <UL>\n  Row[]  <LI>  [array]\n    ResultsTitle  <SPAN>\nSidebar  <ASIDE>\n  SidebarTitle  <H2>\n"
    );
}

#[test]
fn load_snapshot_reports_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.json", "[{ \"id\": ");
    assert!(matches!(load_snapshot(&path), Err(CliError::JsonSnapshot { .. })));
    assert!(matches!(
        load_snapshot("/nonexistent/snapshot.json"),
        Err(CliError::Io { .. })
    ));
}
