//! Enum Describe CLI
//!
//! Runs one generation pass over a crate and prints or writes the result.

use std::path::{Path, PathBuf};

use clap::Parser;
use enum_describe::config::MARKER_CRATE;
use enum_describe::{Builder, Compilation, GenerateError, Generator, GeneratorConfig};

/// Generate description lookups for the marked enums of a crate.
#[derive(Parser, Debug)]
#[command(name = "enum-describe", version, about, long_about = None)]
struct Cli {
    /// Crate root file (e.g. `src/lib.rs`).
    root: PathBuf,

    /// Crate name. Defaults to the name of the directory above `src/`.
    #[arg(long, value_name = "NAME")]
    crate_name: Option<String>,

    /// Extern crate visible to the sources, optionally renamed.
    #[arg(long = "extern", value_name = "NAME[=CRATE]")]
    externs: Vec<String>,

    /// Fully-qualified path of the marker derive.
    #[arg(long, value_name = "PATH")]
    marker: Option<String>,

    /// Name of the per-variant override attribute.
    #[arg(long = "description-attr", value_name = "NAME")]
    description_attribute: Option<String>,

    /// Describe this enum even without the marker (repeatable).
    #[arg(long, value_name = "PATH")]
    register: Vec<String>,

    /// Module where the generated files are included.
    #[arg(long, value_name = "PATH")]
    mount: Option<String>,

    /// Write both generated files into this directory instead of stdout.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print the support file instead of the descriptions.
    #[arg(long, conflicts_with = "out_dir")]
    support: bool,
}

fn main() {
    enum_describe::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GenerateError> {
    let crate_name = match cli.crate_name {
        Some(name) => name,
        None => infer_crate_name(&cli.root)?,
    };
    let externs: Vec<(String, String)> =
        cli.externs.iter().map(String::as_str).map(parse_extern).collect();

    let mut config = GeneratorConfig::default();
    if let Some(marker) = cli.marker {
        config = config.with_marker(marker);
    }
    if let Some(attribute) = cli.description_attribute {
        config = config.with_description_attribute(attribute);
    }
    if let Some(mount) = cli.mount {
        config = config.with_mount(mount);
    }
    for path in cli.register {
        config = config.register(path);
    }

    if let Some(out_dir) = cli.out_dir {
        let mut builder = Builder::new()
            .root(cli.root)
            .out_dir(out_dir)
            .crate_name(crate_name)
            .cargo_directives(false)
            .marker(config.marker)
            .description_attribute(config.description_attribute)
            .mount(config.mount);
        for path in config.registered {
            builder = builder.register(path);
        }
        for (name, krate) in externs {
            builder = builder.extern_crate(name, krate);
        }
        let report = builder.generate()?;
        for skipped in &report.output.skipped {
            eprintln!("warning: enum `{}` not described: {}", skipped.path, skipped.reason);
        }
        println!("{}", report.support_path.display());
        println!("{}", report.output_path.display());
        return Ok(());
    }

    let generator = Generator::new(config);
    if cli.support {
        print!("{}", generator.post_initialization());
        return Ok(());
    }

    let mut compilation = Compilation::load(crate_name, &cli.root)?;
    compilation.add_extern(MARKER_CRATE, MARKER_CRATE);
    for (name, krate) in externs {
        compilation.add_extern(name, krate);
    }
    let output = generator.generate(&compilation)?;
    for skipped in &output.skipped {
        eprintln!("warning: enum `{}` not described: {}", skipped.path, skipped.reason);
    }
    print!("{}", output.unit);
    Ok(())
}

/// `name` or `name=crate`.
fn parse_extern(arg: &str) -> (String, String) {
    match arg.split_once('=') {
        Some((name, krate)) => (name.trim().to_string(), krate.trim().to_string()),
        None => (arg.trim().to_string(), arg.trim().to_string()),
    }
}

/// Name of the package directory for a root like `<pkg>/src/lib.rs`.
fn infer_crate_name(root: &Path) -> Result<String, GenerateError> {
    root.parent()
        .and_then(Path::parent)
        .map(|dir| if dir.as_os_str().is_empty() { Path::new(".") } else { dir })
        .and_then(|dir| std::fs::canonicalize(dir).ok())
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
        .ok_or_else(|| {
            GenerateError::InvalidConfig(format!(
                "cannot infer a crate name from `{}`; pass --crate-name",
                root.display()
            ))
        })
}
