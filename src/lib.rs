//! psec - manage environments of secrets and their descriptions.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/                # Command-line interface
//! │   ├── init            # Initialize a base directory
//! │   ├── environments    # Create, list, delete, default, path
//! │   ├── secrets/        # Show, get, set, unset, generate, describe
//! │   ├── groups          # Group description files
//! │   ├── audit           # Permission audit
//! │   ├── run             # Run with secrets exported
//! │   └── completions     # Shell completions
//! └── core/               # Core library components
//!     ├── config          # .psec.toml base directory marker
//!     ├── paths           # Environment and base directory resolution
//!     ├── description     # Group file parsing and lookup tables
//!     ├── environment/    # SecretsEnvironment
//!     ├── generate/       # Secret type handlers and registry
//!     └── perms           # Private directories and permission stripping
//! ```
//!
//! # Example
//!
//! ```no_run
//! use psec::core::environment::{EnvironmentOptions, SecretsEnvironment};
//!
//! # fn main() -> psec::error::Result<()> {
//! let mut env = SecretsEnvironment::new(EnvironmentOptions {
//!     environment: Some("demo".to_string()),
//!     ..Default::default()
//! })?;
//! env.read_secrets_and_descriptions()?;
//! env.set_secret("app_user", "alice")?;
//! env.write_secrets()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
