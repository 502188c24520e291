//! Secret value generation.
//!
//! Each description `Type` maps to one [`SecretHandler`]. The [`Registry`]
//! is built once with every handler and only looked up afterwards.
//!
//! ## Adding a New Handler
//!
//! 1. Implement the `SecretHandler` trait in a new file
//! 2. Register it in `Registry::new`
//! 3. Contribute command-line flags through `arguments`/`apply_matches`

use std::collections::BTreeMap;

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;

use crate::error::{Error, GeneratorError, Result};

mod crypt;
mod digest;
mod password;
mod plain;
mod token;
mod words;

pub use crypt::{sha512_crypt, CryptHandler};
pub use digest::{DigestHandler, DigestKind};
pub use password::PasswordHandler;
pub use plain::PlainHandler;
pub use token::{Base64Handler, TokenEncoding, TokenHandler, UuidHandler};

/// Default random byte count for tokens.
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Named options a generation may use. Handlers read only what they need.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Ask for a fresh value instead of the batch's shared one.
    pub unique: bool,
    /// Random byte count for token and base64 types.
    pub bytes: Option<usize>,
    /// Number of words in a passphrase.
    pub words: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub delimiter: String,
    /// Input for `crypt_6`.
    pub password: Option<String>,
    /// Inputs for the digest types.
    pub user: Option<String>,
    pub credential: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            unique: false,
            bytes: None,
            words: 4,
            min_word_length: 3,
            max_word_length: 6,
            delimiter: ".".to_string(),
            password: None,
            user: None,
            credential: None,
        }
    }
}

/// Listing entry for `secrets describe --types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HandlerDescription {
    #[serde(rename = "Type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub generable: bool,
}

/// A strategy producing values for one secret type.
pub trait SecretHandler {
    /// Type name used in group descriptions.
    fn kind(&self) -> &'static str;

    /// One-line summary for help output.
    fn description(&self) -> &'static str;

    /// Produce one value.
    ///
    /// `Ok(None)` means the type can't be generated and the user must
    /// supply a value; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::MissingArgument` if a required input
    /// (password, user, credential) is absent.
    fn generate(&self, options: &GenerateOptions) -> Result<Option<String>>;

    /// Whether this type can be generated at all.
    ///
    /// A missing-argument failure still counts as generable: it only
    /// needs input.
    fn is_generable(&self) -> bool {
        let sample = GenerateOptions {
            unique: true,
            ..GenerateOptions::default()
        };
        match self.generate(&sample) {
            Ok(value) => value.is_some_and(|v| !v.is_empty()),
            Err(Error::Generator(GeneratorError::MissingArgument { .. })) => true,
            Err(_) => false,
        }
    }

    fn describe(&self) -> HandlerDescription {
        HandlerDescription {
            kind: self.kind(),
            description: self.description(),
            generable: self.is_generable(),
        }
    }

    /// Command-line flags this handler understands.
    fn arguments(&self) -> Vec<Arg> {
        Vec::new()
    }

    /// Copy this handler's flags from parsed matches into `options`.
    fn apply_matches(&self, _matches: &ArgMatches, _options: &mut GenerateOptions) {}
}

/// Lookup table from type name to handler.
pub struct Registry {
    handlers: BTreeMap<&'static str, Box<dyn SecretHandler>>,
}

impl Registry {
    /// Build the table with every supported type.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: BTreeMap::new(),
        };
        registry.register(Box::new(PasswordHandler::default()));
        registry.register(Box::new(PlainHandler::new(
            "string",
            "Simple string (not generable)",
        )));
        registry.register(Box::new(PlainHandler::new(
            "boolean",
            "Boolean 'true'/'false' (not generable)",
        )));
        registry.register(Box::new(CryptHandler));
        registry.register(Box::new(TokenHandler::new(TokenEncoding::Hex)));
        registry.register(Box::new(TokenHandler::new(TokenEncoding::UrlSafe)));
        registry.register(Box::new(Base64Handler::new(
            "random_base64",
            "Random bytes, base64 encoded",
            DEFAULT_TOKEN_BYTES,
        )));
        registry.register(Box::new(Base64Handler::new(
            "consul_key",
            "Consul gossip encryption key",
            16,
        )));
        registry.register(Box::new(DigestHandler::new(DigestKind::Sha1)));
        registry.register(Box::new(DigestHandler::new(DigestKind::Sha256)));
        registry.register(Box::new(DigestHandler::new(DigestKind::Zookeeper)));
        registry.register(Box::new(UuidHandler));
        registry
    }

    fn register(&mut self, handler: Box<dyn SecretHandler>) {
        self.handlers.insert(handler.kind(), handler);
    }

    /// Handler for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::TypeNotFound` for unregistered types.
    pub fn handler(&self, kind: &str) -> Result<&dyn SecretHandler> {
        self.handlers
            .get(kind)
            .map(|h| h.as_ref())
            .ok_or_else(|| GeneratorError::TypeNotFound(kind.to_string()).into())
    }

    /// Whether `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered type names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Generate one value of `kind`.
    pub fn generate(&self, kind: &str, options: &GenerateOptions) -> Result<Option<String>> {
        self.handler(kind)?.generate(options)
    }

    /// Describe every handler, sorted by type name.
    pub fn describe_all(&self) -> Vec<HandlerDescription> {
        self.handlers.values().map(|h| h.describe()).collect()
    }

    /// Add `--unique` and every handler's flags to `cmd`, once each.
    pub fn augment(&self, cmd: Command) -> Command {
        let mut cmd = cmd.arg(
            Arg::new("unique")
                .long("unique")
                .action(ArgAction::SetTrue)
                .help("Generate a distinct value for every variable"),
        );
        let mut seen = std::collections::HashSet::new();
        for handler in self.handlers.values() {
            for arg in handler.arguments() {
                if seen.insert(arg.get_id().clone()) {
                    cmd = cmd.arg(arg);
                }
            }
        }
        cmd
    }

    /// Collect options from matches produced by a command built with [`Registry::augment`].
    pub fn options_from_matches(&self, matches: &ArgMatches) -> GenerateOptions {
        let mut options = GenerateOptions {
            unique: flag::<bool>(matches, "unique").unwrap_or(false),
            ..GenerateOptions::default()
        };
        for handler in self.handlers.values() {
            handler.apply_matches(matches, &mut options);
        }
        options
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read an optional typed flag, tolerating ids the command doesn't define.
pub(crate) fn flag<T>(matches: &ArgMatches, id: &str) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}
