//! CLI entry point for appdata

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use appdata::cmd::delete::{DeleteOptions, DeleteTarget};
use appdata::cmd::set::{NewValue, SetOptions};
use appdata::cmd::{self, clear::CLEAR_ALL};
use appdata::export::{self, Compression};
use appdata::store::STORE_ROOT_ENV;
use appdata::usage;
use appdata::{
    ApplicationData, Console, DisplayLevel, ExportOptions, Kind, LinePrompter, Locality, Overwrite,
    QueryFilter, QueryPrinter, Result, Selection, Selector, SettingsFormat, SettingsPath,
    SizeFormat, SizeOptions, SizeUnit, SortOrder, StoreConfig, TargetFormat, Wildcard,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "appdata")]
#[command(about = "Inspect and manipulate per-application settings and data stores")]
#[command(version)]
struct Cli {
    /// Print progress details
    #[arg(short, long, global = true, conflicts_with_all = ["brief", "quiet"])]
    verbose: bool,

    /// Print results only (default)
    #[arg(long, global = true, conflicts_with = "quiet")]
    brief: bool,

    /// Print nothing but prompts and query results
    #[arg(long, global = true)]
    quiet: bool,

    /// Directory holding the packages
    #[arg(long, global = true, env = STORE_ROOT_ENV, value_name = "DIR")]
    store_root: Option<PathBuf>,

    /// Same as --help
    #[arg(short = '?', action = clap::ArgAction::Help, global = true, hide = true)]
    #[allow(dead_code)]
    help_alias: Option<bool>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn level(&self) -> DisplayLevel {
        if self.verbose {
            DisplayLevel::Verbose
        } else if self.quiet && !self.brief {
            DisplayLevel::Quiet
        } else {
            DisplayLevel::Brief
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove the files and settings of localities
    Clear(ClearArgs),
    /// Show containers and values
    Get(GetArgs),
    /// Create a container and optionally set a value
    Set(SetArgs),
    /// Delete a container or values
    Delete(DeleteArgs),
    /// Export folders and settings to a directory or archive
    Export(ExportArgs),
    /// Show locality folder paths
    Path(PathArgs),
    /// Show the roaming storage quota
    Quota(PackageArg),
    /// Record that the package's data changed
    #[command(name = "signaldatachanged")]
    SignalDataChanged(PackageArg),
    /// Show folder and settings usage
    Size(SizeArgs),
    /// Show the application data version
    Version(PackageArg),
}

#[derive(Args, Debug)]
struct PackageArg {
    /// Package name
    package: String,
}

#[derive(Args, Debug)]
struct ClearArgs {
    /// Package name
    package: String,
    /// Local, roaming and temporary (default)
    #[arg(short, long)]
    all: bool,
    #[arg(short, long)]
    local: bool,
    #[arg(short, long)]
    roaming: bool,
    #[arg(short, long)]
    temporary: bool,
}

impl ClearArgs {
    fn localities(&self) -> Vec<Locality> {
        if self.all || !(self.local || self.roaming || self.temporary) {
            return CLEAR_ALL.to_vec();
        }
        let mut localities = Vec::new();
        if self.local {
            localities.push(Locality::Local);
        }
        if self.roaming {
            localities.push(Locality::Roaming);
        }
        if self.temporary {
            localities.push(Locality::Temporary);
        }
        localities
    }
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Package name
    package: String,
    /// Every locality (default)
    #[arg(short, long)]
    all: bool,
    #[arg(short = 'c', long = "localcache")]
    local_cache: bool,
    #[arg(short, long)]
    local: bool,
    #[arg(short, long)]
    roaming: bool,
    #[arg(short, long)]
    temporary: bool,
}

impl PathArgs {
    fn localities(&self) -> Vec<Locality> {
        let flags = [
            (self.local, Locality::Local),
            (self.local_cache, Locality::LocalCache),
            (self.roaming, Locality::Roaming),
            (self.temporary, Locality::Temporary),
        ];
        if self.all || flags.iter().all(|(set, _)| !set) {
            return Locality::ALL.to_vec();
        }
        flags.iter().filter(|(set, _)| *set).map(|(_, l)| *l).collect()
    }
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Package name
    package: String,
    /// Container path, e.g. local\people
    path: String,
    /// Match wildcards case-sensitively
    #[arg(long)]
    case_sensitive: bool,
    /// Only show containers whose name matches (* and ?)
    #[arg(long, value_name = "PAT")]
    find_container: Option<String>,
    /// Only show values whose key matches (* and ?)
    #[arg(long, value_name = "PAT")]
    find_value: Option<String>,
    /// Include child containers
    #[arg(short, long)]
    recurse: bool,
    /// Only show values of this kind
    #[arg(long = "type", value_name = "KIND")]
    kind: Option<String>,
    /// Only show the value with this key
    #[arg(long, value_name = "KEY")]
    value: Option<String>,
    /// Control color output: auto, always, never
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

impl GetArgs {
    fn filter(&self) -> Result<QueryFilter> {
        let wildcard = |p: &Option<String>| {
            p.as_deref()
                .map(|p| Wildcard::new(p, self.case_sensitive))
                .transpose()
        };
        Ok(QueryFilter {
            value_key: self.value.clone(),
            value_pattern: wildcard(&self.find_value)?,
            container_pattern: wildcard(&self.find_container)?,
            kind: self.kind.as_deref().map(Kind::filter_from_name).transpose()?,
            recurse: self.recurse,
        })
    }
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Package name
    package: String,
    /// Container path, e.g. local\people
    path: String,
    /// Key of the value to set
    #[arg(long, value_name = "KEY")]
    value: Option<String>,
    /// Kind of the value
    #[arg(long = "type", value_name = "KIND", default_value = "STRING")]
    kind: String,
    /// Value literal
    #[arg(long, value_name = "TEXT", default_value = "")]
    data: String,
    /// Replace an existing value: prompt, yes, no
    #[arg(long, value_enum, default_value_t = Overwrite::Prompt)]
    overwrite: Overwrite,
}

impl SetArgs {
    fn options(&self) -> Result<SetOptions> {
        let value = match &self.value {
            Some(key) => Some(NewValue {
                key: key.clone(),
                kind: Kind::settable_from_name(&self.kind)?,
                data: self.data.clone(),
            }),
            None => None,
        };
        Ok(SetOptions {
            path: SettingsPath::parse(&self.path)?,
            value,
            overwrite: self.overwrite,
        })
    }
}

#[derive(Args, Debug)]
struct DeleteArgs {
    /// Package name
    package: String,
    /// Container path, e.g. local\people
    path: String,
    /// Delete only this value
    #[arg(long, value_name = "KEY", conflicts_with = "all_values")]
    value: Option<String>,
    /// Delete every value in the container, keeping child containers
    #[arg(long)]
    all_values: bool,
    /// Do not ask for confirmation
    #[arg(long)]
    force: bool,
}

impl DeleteArgs {
    fn options(&self) -> Result<DeleteOptions> {
        let target = match (&self.value, self.all_values) {
            (Some(key), _) => DeleteTarget::Value(key.clone()),
            (None, true) => DeleteTarget::AllValues,
            (None, false) => DeleteTarget::Container,
        };
        Ok(DeleteOptions {
            path: SettingsPath::parse(&self.path)?,
            target,
            force: self.force,
        })
    }
}

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("level").multiple(false))]
struct ExportArgs {
    /// Package name
    package: String,
    /// Archive file or directory to write
    target: PathBuf,
    #[arg(long, value_enum, default_value_t = TargetFormat::Archive)]
    target_format: TargetFormat,
    #[arg(long, value_enum, default_value_t = SettingsFormat::Xml)]
    settings_format: SettingsFormat,
    /// Replace a non-empty target: prompt, yes, no
    #[arg(long, value_enum, default_value_t = Overwrite::Prompt)]
    overwrite: Overwrite,
    /// Order of containers and values in settings files
    #[arg(long, value_enum, default_value_t = SortOrder::None)]
    order: SortOrder,
    /// Parts to export, e.g. local, roaming:settings, temporary- (repeatable)
    #[arg(long = "locality", value_name = "SEL")]
    localities: Vec<Selector>,
    /// Store without compression
    #[arg(short = '0', group = "level")]
    store: bool,
    /// Compress fast
    #[arg(short = '1', group = "level")]
    fast: bool,
    /// Compress normally
    #[arg(short = '5', group = "level")]
    normal: bool,
    /// Compress small
    #[arg(short = '9', group = "level")]
    small: bool,
    #[arg(long, value_enum, group = "level")]
    compress: Option<Compression>,
    /// Leave directory entries out of archives
    #[arg(long)]
    no_dir_entries: bool,
}

impl ExportArgs {
    fn compression(&self) -> Compression {
        if self.store {
            Compression::None
        } else if self.fast {
            Compression::Fast
        } else if self.normal {
            Compression::Normal
        } else if self.small {
            Compression::Small
        } else {
            self.compress.unwrap_or_default()
        }
    }

    fn options(&self) -> ExportOptions {
        ExportOptions {
            target_format: self.target_format,
            settings_format: self.settings_format,
            overwrite: self.overwrite,
            order: self.order,
            selection: Selection::from_selectors(&self.localities),
            compression: self.compression(),
            dir_entries: !self.no_dir_entries,
        }
    }
}

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("unit").multiple(false))]
struct SizeArgs {
    /// Package name
    package: String,
    /// Parts to measure (repeatable)
    #[arg(long = "locality", value_name = "SEL")]
    localities: Vec<Selector>,
    /// Sizes in bytes (default)
    #[arg(short = 'b', group = "unit")]
    bytes: bool,
    /// Sizes in kilobytes
    #[arg(short = 'k', group = "unit")]
    kilo: bool,
    /// Sizes in megabytes
    #[arg(short = 'm', group = "unit")]
    mega: bool,
    /// Sizes in gigabytes
    #[arg(short = 'g', group = "unit")]
    giga: bool,
    #[arg(long, value_enum, default_value_t = SizeFormat::List)]
    format: SizeFormat,
}

impl SizeArgs {
    fn options(&self) -> SizeOptions {
        let unit = if self.kilo {
            SizeUnit::Kilo
        } else if self.mega {
            SizeUnit::Mega
        } else if self.giga {
            SizeUnit::Giga
        } else {
            SizeUnit::Bytes
        };
        SizeOptions {
            selection: Selection::from_selectors(&self.localities),
            unit,
            format: self.format,
        }
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise the display level picks the
/// filter.
fn init_tracing(level: DisplayLevel) {
    let default = match level {
        DisplayLevel::Verbose => "appdata=debug",
        DisplayLevel::Brief => "warn",
        DisplayLevel::Quiet => "error",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig::from_root(cli.store_root.clone());
    let mut console = Console::stdout(cli.level());
    let mut prompter = LinePrompter::stdio();
    let open = |package: &str| ApplicationData::open(&config, package);

    match &cli.command {
        Command::Clear(args) => cmd::clear::run(&open(&args.package)?, &args.localities(), &mut console),
        Command::Get(args) => {
            let path = SettingsPath::parse(&args.path)?;
            let filter = args.filter()?;
            let app = open(&args.package)?;
            let choice = if should_use_color(args.color) {
                ColorChoice::Always
            } else {
                ColorChoice::Never
            };
            let mut printer = QueryPrinter::new(StandardStream::stdout(choice));
            cmd::get::run(&app, &path, &filter, &mut printer).map(|_| ())
        }
        Command::Set(args) => {
            let options = args.options()?;
            cmd::set::run(&open(&args.package)?, &options, &mut console, &mut prompter)
        }
        Command::Delete(args) => {
            let options = args.options()?;
            cmd::delete::run(&open(&args.package)?, &options, &mut console, &mut prompter)
        }
        Command::Export(args) => {
            let app = open(&args.package)?;
            export::export(&app, &args.target, &args.options(), &mut console, &mut prompter).map(|_| ())
        }
        Command::Path(args) => cmd::info::paths(&open(&args.package)?, &args.localities(), &mut console),
        Command::Quota(args) => cmd::info::quota(&open(&args.package)?, &mut console),
        Command::SignalDataChanged(args) => {
            let mut app = open(&args.package)?;
            cmd::info::signal_data_changed(&mut app, &mut console)
        }
        Command::Size(args) => usage::report(&open(&args.package)?, &args.options(), &mut console),
        Command::Version(args) => cmd::info::version(&open(&args.package)?, &mut console),
    }
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        // Help and version output also exit with 1.
        let _ = e.print();
        process::exit(1);
    });

    init_tracing(cli.level());

    if let Err(e) = run(cli) {
        eprintln!("appdata: {}", e);
        process::exit(1);
    }
}
