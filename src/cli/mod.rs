//! Command-line interface.

pub mod audit;
pub mod completions;
pub mod environments;
pub mod groups;
pub mod init;
pub mod output;
pub mod run;
pub mod secrets;

use std::path::PathBuf;

use clap::{ArgMatches, Args, FromArgMatches, Parser, Subcommand};

use crate::core::environment::{EnvironmentOptions, SecretsEnvironment};
use crate::core::generate::{GenerateOptions, Registry};
use crate::core::paths;
use crate::error::{EnvironmentError, Result};

/// psec - manage environments of secrets.
#[derive(Parser)]
#[command(
    name = "psec",
    about = "Manage environments of secrets and their descriptions",
    version
)]
pub struct Cli {
    /// Environment to operate on
    #[arg(short = 'e', long, global = true, env = "D2_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Root directory holding environments
    #[arg(short = 'd', long, global = true, env = "D2_SECRETS_BASEDIR")]
    pub secrets_basedir: Option<PathBuf>,

    /// Create the base directory if it doesn't exist
    #[arg(long, global = true)]
    pub init: bool,

    /// Enable debug logging (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize a secrets base directory
    Init {
        /// Directory to initialize (defaults to the resolved base directory)
        basedir: Option<PathBuf>,
    },

    /// Manage environments
    #[command(alias = "env")]
    Environments {
        #[command(subcommand)]
        action: EnvironmentsAction,
    },

    /// Manage secret values
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },

    /// Manage groups of secret descriptions
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },

    /// Report files and directories other users can access
    Audit {
        /// Remove the access instead of only reporting it
        #[arg(long)]
        fix: bool,
    },

    /// Run a command with the environment's secrets exported
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Environment subcommands.
#[derive(Subcommand)]
pub enum EnvironmentsAction {
    /// Create one or more environments
    Create {
        /// Names to create (defaults to the current environment)
        names: Vec<String>,
        /// Copy descriptions from an environment, a `.d` directory or a group file
        #[arg(long, value_name = "SOURCE")]
        clone_from: Option<String>,
        /// Make each new environment an alias of the clone source
        #[arg(long, requires = "clone_from")]
        alias: bool,
    },

    /// List environments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an environment
    Delete {
        /// Environment to delete
        name: String,
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show or save the default environment for the current directory
    Default {
        /// Environment to save as the default
        name: Option<String>,
        /// Remove the saved default
        #[arg(long, conflicts_with = "name")]
        unset: bool,
    },

    /// Print an environment's directory
    Path {
        /// Environment (defaults to the current environment)
        name: Option<String>,
        /// Print the scratch directory instead, creating it if needed
        #[arg(long)]
        tmpdir: bool,
    },
}

/// Secret value subcommands.
#[derive(Subcommand)]
pub enum SecretsAction {
    /// Show variables, their types and (redacted) values
    Show {
        /// Variables to show (defaults to all)
        variables: Vec<String>,
        /// Only show variables in this group
        #[arg(short, long)]
        group: Option<String>,
        /// Print values instead of REDACTED
        #[arg(long)]
        no_redact: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one secret value
    Get {
        /// Variable name
        variable: String,
    },

    /// Set values as VARIABLE=VALUE (VARIABLE=@OTHER copies OTHER's value)
    Set {
        /// Assignments
        #[arg(required = true, value_name = "VARIABLE=VALUE")]
        assignments: Vec<String>,
    },

    /// Remove secret values
    Unset {
        /// Variables to unset
        #[arg(required = true)]
        variables: Vec<String>,
        /// Confirm removal
        #[arg(long)]
        force: bool,
    },

    /// Generate values for generable types
    Generate {
        /// Variables to generate (defaults to every generable variable)
        variables: Vec<String>,
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Describe variables or the supported secret types
    Describe {
        /// Variables to describe (defaults to all)
        variables: Vec<String>,
        /// List secret types instead
        #[arg(long)]
        types: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the secrets file path
    Path,
}

/// Group subcommands.
#[derive(Subcommand)]
pub enum GroupsAction {
    /// List groups and their variable counts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the variables in groups
    Show {
        /// Groups to show
        #[arg(required = true)]
        groups: Vec<String>,
    },

    /// Create a group from a group file or another environment's group
    Create {
        /// Group name
        name: String,
        /// A `.json` group file or an environment with a group of this name
        #[arg(long, value_name = "SOURCE", required = true)]
        clone_from: String,
    },

    /// Delete a group and its variables' values
    Delete {
        /// Group name
        name: String,
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Print the descriptions directory path
    Path,
}

/// Generator flags contributed by every registered secret type.
#[derive(Debug, Clone, Default)]
pub struct GeneratorArgs {
    pub options: GenerateOptions,
}

impl FromArgMatches for GeneratorArgs {
    fn from_arg_matches(matches: &ArgMatches) -> std::result::Result<Self, clap::Error> {
        Ok(Self {
            options: Registry::new().options_from_matches(matches),
        })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> std::result::Result<(), clap::Error> {
        self.options = Registry::new().options_from_matches(matches);
        Ok(())
    }
}

impl Args for GeneratorArgs {
    fn augment_args(cmd: clap::Command) -> clap::Command {
        Registry::new().augment(cmd)
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command {
        Registry::new().augment(cmd)
    }
}

/// Global selections shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub environment: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub create_root: bool,
}

impl Context {
    /// Base directory from `--secrets-basedir` or the defaults.
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_base_dir(),
        }
    }

    /// Handle on `name` (or the default environment). Nothing is loaded.
    pub fn environment(&self, name: Option<&str>) -> Result<SecretsEnvironment> {
        SecretsEnvironment::new(EnvironmentOptions {
            environment: name.map(str::to_string).or_else(|| self.environment.clone()),
            base_dir: self.base_dir.clone(),
            create_root: self.create_root,
            ..EnvironmentOptions::default()
        })
    }

    /// The current environment with descriptions and values loaded.
    pub fn load(&self) -> Result<SecretsEnvironment> {
        let mut env = self.environment(None)?;
        if !env.exists(true) {
            return Err(EnvironmentError::NotFound(env.name().to_string()).into());
        }
        env.read_secrets_and_descriptions()?;
        Ok(env)
    }
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns error if the command execution fails.
pub fn execute(cli: Cli) -> Result<()> {
    let ctx = Context {
        environment: cli.environment,
        base_dir: cli.secrets_basedir,
        create_root: cli.init,
    };

    match cli.command {
        Command::Init { basedir } => init::execute(&ctx, basedir),
        Command::Environments { action } => match action {
            EnvironmentsAction::Create {
                names,
                clone_from,
                alias,
            } => environments::create(&ctx, &names, clone_from.as_deref(), alias),
            EnvironmentsAction::List { json } => environments::list(&ctx, json),
            EnvironmentsAction::Delete { name, force } => environments::delete(&ctx, &name, force),
            EnvironmentsAction::Default { name, unset } => {
                environments::default(&ctx, name.as_deref(), unset)
            }
            EnvironmentsAction::Path { name, tmpdir } => {
                environments::path(&ctx, name.as_deref(), tmpdir)
            }
        },
        Command::Secrets { action } => match action {
            SecretsAction::Show {
                variables,
                group,
                no_redact,
                json,
            } => secrets::show(&ctx, &variables, group.as_deref(), no_redact, json),
            SecretsAction::Get { variable } => secrets::get(&ctx, &variable),
            SecretsAction::Set { assignments } => secrets::set(&ctx, &assignments),
            SecretsAction::Unset { variables, force } => secrets::unset(&ctx, &variables, force),
            SecretsAction::Generate {
                variables,
                generator,
            } => secrets::generate(&ctx, &variables, &generator.options),
            SecretsAction::Describe {
                variables,
                types,
                json,
            } => secrets::describe(&ctx, &variables, types, json),
            SecretsAction::Path => secrets::path(&ctx),
        },
        Command::Groups { action } => match action {
            GroupsAction::List { json } => groups::list(&ctx, json),
            GroupsAction::Show { groups: names } => groups::show(&ctx, &names),
            GroupsAction::Create { name, clone_from } => groups::create(&ctx, &name, &clone_from),
            GroupsAction::Delete { name, force } => groups::delete(&ctx, &name, force),
            GroupsAction::Path => groups::path(&ctx),
        },
        Command::Audit { fix } => audit::execute(&ctx, fix, cli.verbose),
        Command::Run { command } => run::execute(&ctx, &command),
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Refuse a destructive action unless `--force` was given.
pub(crate) fn require_force(force: bool, what: &str) -> Result<()> {
    if force {
        Ok(())
    } else {
        Err(crate::error::Error::Other(format!(
            "refusing to {} without --force",
            what
        )))
    }
}
