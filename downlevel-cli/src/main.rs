use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use downlevel_cli::config::{self, ConfigMerger};
use downlevel_cli::explain::{list_pass_keys, lookup_pass, render_explanation, render_pass_table};
use downlevel_cli::output::{EmittedModule, render_diff, source_path};
use downlevel_core::adapters::{FsModuleSource, FsWritePort};
use downlevel_core::pipeline::{PipelineError, RenderedModule, transpile_path};
use downlevel_core::ports::WritePort;
use downlevel_core::settings::Settings;
use downlevel_pass_api::{PassMeta, all_passes};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "downlevel",
    version,
    about = "Rewrites Python syntax trees so the result runs on older interpreters."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check and rewrite tree files for the target version.
    Transpile(TranspileArgs),
    /// List every checker and fixer with its version window.
    ListPasses(ListPassesArgs),
    /// Explain what a pass does and whether it runs for the configured versions.
    Explain(ExplainArgs),
}

#[derive(Debug, Args)]
struct VersionArgs {
    /// Version the input was written for (default: 3.6).
    #[arg(long, env = "DOWNLEVEL_SOURCE_VERSION")]
    source_version: Option<String>,

    /// Oldest version the output must run on (default: 2.7).
    #[arg(long, env = "DOWNLEVEL_TARGET_VERSION")]
    target_version: Option<String>,

    /// Config file (default: ./downlevel.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct TranspileArgs {
    #[command(flatten)]
    versions: VersionArgs,

    /// Comma-separated checker names (default: all).
    #[arg(long)]
    checkers: Option<String>,

    /// Comma-separated fixer names (default: all).
    #[arg(long)]
    fixers: Option<String>,

    /// Print a unified diff against each sibling `.py` file.
    #[arg(long, conflicts_with_all = ["in_place", "emit"])]
    diff: bool,

    /// Overwrite each sibling `.py` file with the rewritten source.
    #[arg(long, conflicts_with = "emit")]
    in_place: bool,

    /// Output format for stdout.
    #[arg(long, value_enum)]
    emit: Option<EmitFormat>,

    /// Tree files (`*.json`) to transpile.
    #[arg(required = true)]
    files: Vec<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ListPassesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    #[command(flatten)]
    versions: VersionArgs,

    /// Pass name, in any accepted spelling (e.g. `NewStyleClassesFixer`).
    name: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum EmitFormat {
    Source,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Transpile(args) => cmd_transpile(args),
        Command::ListPasses(args) => cmd_list_passes(args),
        Command::Explain(args) => cmd_explain(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// 2 when the input cannot be downleveled, 1 for every other failure.
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<PipelineError>()
        .map_or(1, PipelineError::exit_code);
    u8::try_from(code).unwrap_or(1)
}

fn load_settings(
    versions: &VersionArgs,
    checkers: Option<&str>,
    fixers: Option<&str>,
) -> anyhow::Result<Settings> {
    let file_config = config::load_or_default(versions.config.as_deref(), Utf8Path::new("."))
        .context("load downlevel.toml config")?;
    let build = ConfigMerger::new(file_config)
        .merge_transpile_args(
            versions.source_version.as_deref(),
            versions.target_version.as_deref(),
            checkers,
            fixers,
        )
        .map_err(PipelineError::from)?;
    let settings = Settings::new(build);
    settings.validate().map_err(PipelineError::from)?;

    debug!(
        "merged config: source={}, target={}, checkers={:?}, fixers={:?}",
        settings.build.source_version,
        settings.build.target_version,
        settings.build.checkers.names(),
        settings.build.fixers.names()
    );
    Ok(settings)
}

fn cmd_transpile(args: TranspileArgs) -> anyhow::Result<()> {
    let settings = load_settings(
        &args.versions,
        args.checkers.as_deref(),
        args.fixers.as_deref(),
    )?;

    // Every module is transpiled before anything is printed or written.
    let source = FsModuleSource;
    let mut rendered: Vec<(&Utf8Path, RenderedModule)> = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let module =
            transpile_path(&settings, &source, path).with_context(|| format!("transpile {}", path))?;
        rendered.push((path.as_path(), module));
    }

    if args.diff {
        let labelled: Vec<_> = rendered
            .iter()
            .map(|(path, module)| (source_path(path), module))
            .collect();
        print!(
            "{}",
            render_diff(labelled.iter().map(|(path, module)| (path.as_path(), *module)))
        );
        return Ok(());
    }

    if args.in_place {
        let port = FsWritePort;
        for (path, module) in &rendered {
            let target = source_path(path);
            port.write_file(&target, module.source.as_bytes())?;
            info!("wrote {}", target);
        }
        return Ok(());
    }

    match args.emit.unwrap_or(EmitFormat::Source) {
        EmitFormat::Source => {
            let many = rendered.len() > 1;
            for (path, module) in &rendered {
                if many {
                    println!("==> {} <==", source_path(path));
                }
                print!("{}", module.source);
            }
        }
        EmitFormat::Json => {
            let emitted: Vec<_> = rendered
                .iter()
                .map(|(path, module)| EmittedModule::new(path, module))
                .collect();
            let json = serde_json::to_string_pretty(&emitted).context("serialize json")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_list_passes(args: ListPassesArgs) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Text => print!("{}", render_pass_table()),
        OutputFormat::Json => {
            let passes: Vec<PassMeta> = all_passes().collect();
            let json = serde_json::to_string_pretty(&passes).context("serialize json")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let Some(pass) = lookup_pass(&args.name) else {
        let available = list_pass_keys().join(", ");
        anyhow::bail!(
            "Unknown pass: '{}'\n\nAvailable passes: {}",
            args.name,
            available
        );
    };

    let settings = load_settings(&args.versions, None, None)?;
    print!(
        "{}",
        render_explanation(
            &pass,
            settings.build.source_version,
            settings.build.target_version
        )
    );
    Ok(())
}
