use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use log::{debug, warn};
use mdfix_core::{find_files, FilePatchSet, PatchRule};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_NAME: &str = "mdfix.toml";
pub const STDIN_CONFIG: &str = "-";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixTable {
    /// Relative target paths resolve against this directory, itself
    /// relative to the fix table's location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,

    #[serde(default, rename = "target", alias = "targets")]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleConfig {
    pub search: String,

    #[serde(alias = "replacement")]
    pub replace: String,

    #[serde(default)]
    pub kind: RuleKind,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    #[default]
    Literal,
    Pattern,
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

impl RuleConfig {
    pub fn to_rule(&self) -> Result<PatchRule> {
        let rule = match self.kind {
            RuleKind::Literal => PatchRule::literal(self.search.as_str(), self.replace.as_str()),
            RuleKind::Pattern => PatchRule::pattern(&self.search, self.replace.as_str()),
        };
        Ok(rule?)
    }
}

impl FixTable {
    /// Expands the table into patch sets in declaration order. `dir` targets
    /// become one patch set per discovered file.
    pub fn into_patch_sets(self, table_dir: &Path) -> Result<Vec<FilePatchSet>> {
        let base = match &self.base_dir {
            Some(dir) => table_dir.join(expand_path(dir)?),
            None => table_dir.to_path_buf(),
        };

        let mut sets = Vec::new();

        for (i, target) in self.targets.iter().enumerate() {
            let label = format!("target #{}", i + 1);

            let rules = target
                .rules
                .iter()
                .enumerate()
                .map(|(j, r)| r.to_rule().with_context(|| format!("{} rule #{}", label, j + 1)))
                .collect::<Result<Vec<_>>>()?;

            match (&target.path, &target.dir) {
                (Some(path), None) => {
                    sets.push(FilePatchSet::new(base.join(expand_path(path)?), rules));
                }
                (None, Some(dir)) => {
                    let root = base.join(expand_path(dir)?);
                    match find_files(&root, &target.extensions) {
                        Ok(files) => {
                            debug!("{} expanded {:?} to {} file(s)", label, root, files.len());
                            sets.extend(
                                files.into_iter().map(|f| FilePatchSet::new(f, rules.clone())),
                            );
                        }
                        Err(e) => {
                            // Keep the directory as its own entry so the run reports it.
                            warn!("{}: failed to scan {:?}: {}", label, root, e);
                            sets.push(FilePatchSet::new(root, rules));
                        }
                    }
                }
                (Some(_), Some(_)) => bail!("{}: set either 'path' or 'dir', not both", label),
                (None, None) => bail!("{}: missing 'path' or 'dir'", label),
            }
        }

        Ok(sets)
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Failed to expand {:?}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[derive(Parser, Debug)]
#[command(name = "mdfix", author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Apply the fix table in ./mdfix.toml
    mdfix

    # Preview which files would change
    mdfix run --dry-run

    # Fail (exit 1) if any file still needs fixing, for CI or pre-commit
    mdfix check

    # One-off literal fix across several files
    mdfix replace '|Token|Hex|Usage|' '| Token | Hex | Usage |' docs/rules.md

    # One-off pattern fix with a capture group
    mdfix replace --regex '\*\*End of (.+)\*\*' '## End of $1' docs/*.md

    # Read the fix table from stdin
    cat fixes.toml | mdfix -c - run

CONFIG:
    Default fix table: ./mdfix.toml, falling back to ~/.config/mdfix/config.toml
    Run 'mdfix init' to write a starter table."#)]
pub struct Args {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the fix table, or '-' for stdin [default: ./mdfix.toml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Apply every target in the fix table
    Run {
        #[arg(long, help = "Report what would change without writing")]
        dry_run: bool,
    },

    /// Dry run that exits 1 if any file would change
    Check,

    /// Apply a single rule to the given files
    Replace {
        search: String,

        replace: String,

        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        #[arg(long, help = "Treat SEARCH as a regular expression")]
        regex: bool,

        #[arg(long, help = "Report what would change without writing")]
        dry_run: bool,
    },

    /// Write a starter fix table
    Init {
        #[arg(long, help = "Overwrite an existing fix table")]
        force: bool,
    },
}

pub fn resolve_config_path(args: &Args) -> PathBuf {
    if let Some(ref path) = args.config {
        return path.clone();
    }
    let local = PathBuf::from(LOCAL_CONFIG_NAME);
    if local.exists() {
        return local;
    }
    get_user_config_path().unwrap_or(local)
}

fn get_user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mdfix").map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn parse_fix_table(content: &str) -> Result<FixTable> {
    toml::from_str(content).with_context(|| "Failed to parse fix table")
}

/// Loads the fix table and expands it into patch sets. Targets in a table
/// read from stdin resolve against the working directory.
pub fn load_patch_sets(config_path: &Path) -> Result<Vec<FilePatchSet>> {
    let (content, table_dir) = if config_path == Path::new(STDIN_CONFIG) {
        if atty::is(atty::Stream::Stdin) {
            bail!("Fix table '-' requested but nothing was piped to stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read fix table from stdin")?;
        (buffer, PathBuf::from("."))
    } else {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read fix table at {:?}", config_path))?;
        let dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        (content, dir)
    };

    parse_fix_table(&content)?.into_patch_sets(&table_dir)
}

pub fn starter_fix_table() -> FixTable {
    FixTable {
        base_dir: None,
        targets: vec![
            TargetConfig {
                path: Some("docs/rules.md".to_string()),
                dir: None,
                extensions: default_extensions(),
                rules: vec![
                    RuleConfig {
                        search: "|Token|Hex|Usage|".to_string(),
                        replace: "| Token | Hex | Usage |".to_string(),
                        kind: RuleKind::Literal,
                    },
                    RuleConfig {
                        search: r"(?m)^\*\*(End of [^*\r\n]+)\*\*(\r?)$".to_string(),
                        replace: "## $1$2".to_string(),
                        kind: RuleKind::Pattern,
                    },
                ],
            },
            TargetConfig {
                path: None,
                dir: Some("docs/specs".to_string()),
                extensions: default_extensions(),
                rules: vec![RuleConfig {
                    search: "docs\\specs\\".to_string(),
                    replace: "docs/specs/".to_string(),
                    kind: RuleKind::Literal,
                }],
            },
        ],
    }
}

pub fn write_starter_fix_table(path: &Path, force: bool) -> Result<()> {
    if path == Path::new(STDIN_CONFIG) {
        bail!("Cannot write a fix table to stdin");
    }
    if path.exists() && !force {
        bail!("{:?} already exists (use --force to overwrite)", path);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {:?}", parent))?;
    }
    let toml_string =
        toml::to_string_pretty(&starter_fix_table()).context("Failed to serialize fix table")?;
    std::fs::write(path, toml_string)
        .with_context(|| format!("Failed to write fix table to {:?}", path))
}
