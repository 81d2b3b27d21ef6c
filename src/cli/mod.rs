//! Command-line interface for cmdcomplete
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - The demo subcommands whose tree the completion engine resolves against
//! - Exposing that same clap definition as a [`CommandNode`] tree

pub mod completion;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::command::CommandNode;
use crate::completion::ScriptTemplate;
use crate::config::{Config, LogLevel};
use crate::error::{CompleteError, Result};

/// Shell tab-completion for nested command trees
#[derive(Parser, Debug)]
#[command(
    name = "cmdcomplete",
    version,
    about = "Shell tab-completion for nested command trees",
    long_about = "Demonstrates a completion resolver that walks nested subcommands using a \
partially typed command line. Enable completion with:

    eval \"$(cmdcomplete completion)\"",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Compilation targets for `build`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    #[value(name = "x86_64")]
    X86_64,
    Aarch64,
    Wasm32,
}

/// Verbosity levels for `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Deployment environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Staging,
    Production,
}

/// Subcommands for cmdcomplete
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the project
    Build {
        /// Build with optimizations
        #[arg(long)]
        release: bool,

        /// Target architecture
        #[arg(long, value_enum, value_name = "TARGET")]
        target: Option<Target>,
    },

    /// Run the project
    Run {
        /// Print what is being run
        #[arg(long)]
        verbose: bool,

        /// Output level
        #[arg(long, value_enum, value_name = "LEVEL")]
        level: Option<Level>,

        /// Arguments passed through to the program
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Deploy to an environment
    Deploy {
        /// Target environment
        #[arg(value_enum, value_name = "ENV")]
        env: Environment,

        /// Only show what would be deployed
        #[arg(long, overrides_with = "no_dry_run")]
        dry_run: bool,

        /// Deploy for real
        #[arg(long = "no-dry-run")]
        no_dry_run: bool,
    },

    /// Print the bash completion script
    Completion {
        /// Shell type (only bash is supported)
        #[arg(long, value_name = "SHELL", default_value = "bash")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

/// The command tree described by [`CliArgs`], checked for conflicting tokens
pub fn command_tree() -> Result<CommandNode> {
    let mut cmd = CliArgs::command();
    cmd.build();
    let tree = CommandNode::from_clap(&cmd);
    tree.validate()?;
    Ok(tree)
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,

    /// Name the program was invoked as
    prog_name: String,
}

impl CliInterface {
    /// Create a new CLI interface
    pub fn new(prog_name: impl Into<String>) -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self {
            args,
            config,
            prog_name: prog_name.into(),
        })
    }

    /// Load configuration from file and merge with environment and arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        config.apply_env()?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_logging_args(&mut config, args);
        Ok(config)
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Run the selected subcommand
    pub fn handle_subcommand(&self) -> Result<()> {
        match &self.args.command {
            Commands::Build { release, target } => {
                let target = target.unwrap_or(Target::X86_64);
                let profile = if *release { "release" } else { "debug" };
                println!("Building {} ({profile}) for {target:?}", self.prog_name);
            }
            Commands::Run {
                verbose,
                level,
                args,
            } => {
                if *verbose {
                    println!("Running with level {:?}", level.unwrap_or(Level::Medium));
                }
                println!("run {}", args.join(" "));
            }
            Commands::Deploy {
                env,
                dry_run,
                no_dry_run,
            } => {
                let mode = if *dry_run && !*no_dry_run {
                    "dry run"
                } else {
                    "live"
                };
                println!("Deploying to {env:?} ({mode})");
            }
            Commands::Completion { shell } => self.print_completion_script(shell)?,
            Commands::Config { show, validate } => {
                self.handle_config_command(*show, *validate)?
            }
            Commands::Version => self.show_version(),
        }
        Ok(())
    }

    /// Show version information
    fn show_version(&self) {
        println!("{} version {}", self.prog_name, env!("CARGO_PKG_VERSION"));
    }

    /// Print the shell integration script
    fn print_completion_script(&self, shell: &str) -> Result<()> {
        if !shell.eq_ignore_ascii_case("bash") {
            return Err(CompleteError::Generic(format!(
                "Unsupported shell: {shell}. Supported shells: bash"
            )));
        }

        let complete_var = self.config.complete_var_for(&self.prog_name);
        let script = ScriptTemplate::new(&self.prog_name, &complete_var)
            .with_vars(
                &self.config.completion.words_var,
                &self.config.completion.cword_var,
            )
            .render();
        println!("{script}");
        Ok(())
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        println!("Configuration file: {}", self.get_config_path().display());
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }
}
