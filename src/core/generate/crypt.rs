//! `crypt_6`: SHA-512 crypt (`$6$salt$hash`) as used in `/etc/shadow`.

use clap::{Arg, ArgMatches};
use rand::rngs::OsRng;
use rand::Rng;
use sha_crypt::{sha512_crypt_b64, Sha512Params};

use super::{flag, GenerateOptions, SecretHandler};
use crate::error::{GeneratorError, Result};

const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const SALT_LENGTH: usize = 16;

/// Hash `password` with `salt` (at most 16 bytes used) and default rounds.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidOption` if the hash can't be computed.
pub fn sha512_crypt(password: &[u8], salt: &str) -> Result<String> {
    let salt = &salt.as_bytes()[..salt.len().min(SALT_LENGTH)];
    let hash = sha512_crypt_b64(password, salt, &Sha512Params::default()).map_err(|e| {
        GeneratorError::InvalidOption {
            kind: "crypt_6",
            reason: format!("{:?}", e),
        }
    })?;
    Ok(format!("$6${}${}", String::from_utf8_lossy(salt), hash))
}

fn random_salt() -> String {
    (0..SALT_LENGTH)
        .map(|_| ALPHABET[OsRng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// `crypt_6`.
pub struct CryptHandler;

impl SecretHandler for CryptHandler {
    fn kind(&self) -> &'static str {
        "crypt_6"
    }

    fn description(&self) -> &'static str {
        "SHA-512 crypt digest of a password"
    }

    fn generate(&self, options: &GenerateOptions) -> Result<Option<String>> {
        let password = options
            .password
            .as_deref()
            .ok_or(GeneratorError::MissingArgument {
                kind: "crypt_6",
                argument: "password",
            })?;
        sha512_crypt(password.as_bytes(), &random_salt()).map(Some)
    }

    fn arguments(&self) -> Vec<Arg> {
        vec![Arg::new("password")
            .long("password")
            .value_name("PASSWORD")
            .help("Password to digest for crypt_6")]
    }

    fn apply_matches(&self, matches: &ArgMatches, options: &mut GenerateOptions) {
        if let Some(password) = flag::<String>(matches, "password") {
            options.password = Some(password);
        }
    }
}
