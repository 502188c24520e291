//! Random tokens: hex, URL-safe, base64 and UUIDs.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use clap::{value_parser, Arg, ArgMatches};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{flag, GenerateOptions, SecretHandler, DEFAULT_TOKEN_BYTES};
use crate::error::{GeneratorError, Result};

fn random_bytes(kind: &'static str, len: usize) -> Result<Vec<u8>> {
    if len == 0 {
        return Err(GeneratorError::InvalidOption {
            kind,
            reason: "byte count must be at least 1".to_string(),
        }
        .into());
    }
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    Ok(buf)
}

fn bytes_arg() -> Arg {
    Arg::new("bytes")
        .long("bytes")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Random byte count for token and base64 types")
}

fn apply_bytes(matches: &ArgMatches, options: &mut GenerateOptions) {
    if let Some(bytes) = flag::<usize>(matches, "bytes") {
        options.bytes = Some(bytes);
    }
}

/// Text encoding of a random token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEncoding {
    /// Lowercase hexadecimal.
    Hex,
    /// URL-safe base64 without padding.
    UrlSafe,
}

/// `token_hex` / `token_urlsafe`.
pub struct TokenHandler {
    encoding: TokenEncoding,
}

impl TokenHandler {
    pub fn new(encoding: TokenEncoding) -> Self {
        Self { encoding }
    }
}

impl SecretHandler for TokenHandler {
    fn kind(&self) -> &'static str {
        match self.encoding {
            TokenEncoding::Hex => "token_hex",
            TokenEncoding::UrlSafe => "token_urlsafe",
        }
    }

    fn description(&self) -> &'static str {
        match self.encoding {
            TokenEncoding::Hex => "Random token, hex encoded",
            TokenEncoding::UrlSafe => "Random token, URL-safe base64",
        }
    }

    fn generate(&self, options: &GenerateOptions) -> Result<Option<String>> {
        let bytes = random_bytes(self.kind(), options.bytes.unwrap_or(DEFAULT_TOKEN_BYTES))?;
        let token = match self.encoding {
            TokenEncoding::Hex => hex::encode(bytes),
            TokenEncoding::UrlSafe => URL_SAFE_NO_PAD.encode(bytes),
        };
        Ok(Some(token))
    }

    fn arguments(&self) -> Vec<Arg> {
        vec![bytes_arg()]
    }

    fn apply_matches(&self, matches: &ArgMatches, options: &mut GenerateOptions) {
        apply_bytes(matches, options);
    }
}

/// `random_base64` / `consul_key`: standard padded base64 of random bytes.
pub struct Base64Handler {
    kind: &'static str,
    description: &'static str,
    default_bytes: usize,
}

impl Base64Handler {
    pub fn new(kind: &'static str, description: &'static str, default_bytes: usize) -> Self {
        Self {
            kind,
            description,
            default_bytes,
        }
    }
}

impl SecretHandler for Base64Handler {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn generate(&self, options: &GenerateOptions) -> Result<Option<String>> {
        let bytes = random_bytes(self.kind, options.bytes.unwrap_or(self.default_bytes))?;
        Ok(Some(STANDARD.encode(bytes)))
    }

    fn arguments(&self) -> Vec<Arg> {
        vec![bytes_arg()]
    }

    fn apply_matches(&self, matches: &ArgMatches, options: &mut GenerateOptions) {
        apply_bytes(matches, options);
    }
}

/// `uuid4`.
pub struct UuidHandler;

impl SecretHandler for UuidHandler {
    fn kind(&self) -> &'static str {
        "uuid4"
    }

    fn description(&self) -> &'static str {
        "Random UUID (version 4)"
    }

    fn generate(&self, _options: &GenerateOptions) -> Result<Option<String>> {
        Ok(Some(uuid::Uuid::new_v4().to_string()))
    }
}
