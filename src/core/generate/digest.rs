//! Digests of `"user:credential"`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Arg, ArgMatches};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::{flag, GenerateOptions, SecretHandler};
use crate::error::{GeneratorError, Result};

/// Which digest a [`DigestHandler`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    /// Hex SHA-1.
    Sha1,
    /// Hex SHA-256.
    Sha256,
    /// ZooKeeper digest ACL form: `user:base64(sha1(user:credential))`.
    Zookeeper,
}

/// `sha1_digest`, `sha256_digest` and `zookeeper_digest`.
pub struct DigestHandler {
    digest: DigestKind,
}

impl DigestHandler {
    pub fn new(digest: DigestKind) -> Self {
        Self { digest }
    }
}

impl SecretHandler for DigestHandler {
    fn kind(&self) -> &'static str {
        match self.digest {
            DigestKind::Sha1 => "sha1_digest",
            DigestKind::Sha256 => "sha256_digest",
            DigestKind::Zookeeper => "zookeeper_digest",
        }
    }

    fn description(&self) -> &'static str {
        match self.digest {
            DigestKind::Sha1 => "SHA-1 digest of user:credential",
            DigestKind::Sha256 => "SHA-256 digest of user:credential",
            DigestKind::Zookeeper => "ZooKeeper digest ACL for user:credential",
        }
    }

    fn generate(&self, options: &GenerateOptions) -> Result<Option<String>> {
        let kind = self.kind();
        let user = options
            .user
            .as_deref()
            .ok_or(GeneratorError::MissingArgument {
                kind,
                argument: "user",
            })?;
        let credential =
            options
                .credential
                .as_deref()
                .ok_or(GeneratorError::MissingArgument {
                    kind,
                    argument: "credential",
                })?;
        let input = format!("{}:{}", user, credential);

        let value = match self.digest {
            DigestKind::Sha1 => hex::encode(Sha1::digest(input.as_bytes())),
            DigestKind::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            DigestKind::Zookeeper => {
                format!("{}:{}", user, STANDARD.encode(Sha1::digest(input.as_bytes())))
            }
        };
        Ok(Some(value))
    }

    fn arguments(&self) -> Vec<Arg> {
        vec![
            Arg::new("user")
                .long("user")
                .value_name("USER")
                .help("User name for digest types"),
            Arg::new("credential")
                .long("credential")
                .value_name("CREDENTIAL")
                .help("Credential for digest types"),
        ]
    }

    fn apply_matches(&self, matches: &ArgMatches, options: &mut GenerateOptions) {
        if let Some(user) = flag::<String>(matches, "user") {
            options.user = Some(user);
        }
        if let Some(credential) = flag::<String>(matches, "credential") {
            options.credential = Some(credential);
        }
    }
}
