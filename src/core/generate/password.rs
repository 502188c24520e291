//! `password`: XKCD-style multi-word passphrases.
//!
//! Within one registry the handler hands out the same passphrase on every
//! call with the same word count, lengths and delimiter unless `unique` is
//! requested, so related variables generated in one batch share a password.

use std::cell::RefCell;

use clap::{value_parser, Arg, ArgMatches};
use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

use super::words::WORDS;
use super::{flag, GenerateOptions, SecretHandler};
use crate::error::{GeneratorError, Result};

/// Options that decide what a passphrase looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Shape {
    words: usize,
    min_word_length: usize,
    max_word_length: usize,
    delimiter: String,
}

impl Shape {
    fn of(options: &GenerateOptions) -> Self {
        Self {
            words: options.words,
            min_word_length: options.min_word_length,
            max_word_length: options.max_word_length,
            delimiter: options.delimiter.clone(),
        }
    }
}

/// `password`.
///
/// The cached passphrase is reused only for requests of the same shape.
#[derive(Default)]
pub struct PasswordHandler {
    last: RefCell<Option<(Shape, Zeroizing<String>)>>,
}

impl PasswordHandler {
    fn fresh(options: &GenerateOptions) -> Result<String> {
        if options.words == 0 {
            return Err(GeneratorError::InvalidOption {
                kind: "password",
                reason: "word count must be at least 1".to_string(),
            }
            .into());
        }
        let candidates: Vec<&str> = WORDS
            .iter()
            .copied()
            .filter(|w| (options.min_word_length..=options.max_word_length).contains(&w.len()))
            .collect();
        if candidates.is_empty() {
            return Err(GeneratorError::InvalidOption {
                kind: "password",
                reason: format!(
                    "no words between {} and {} characters",
                    options.min_word_length, options.max_word_length
                ),
            }
            .into());
        }

        let words: Vec<&str> = (0..options.words)
            .map(|_| candidates[OsRng.gen_range(0..candidates.len())])
            .collect();
        Ok(words.join(&options.delimiter))
    }
}

impl SecretHandler for PasswordHandler {
    fn kind(&self) -> &'static str {
        "password"
    }

    fn description(&self) -> &'static str {
        "Multi-word passphrase (XKCD style)"
    }

    fn generate(&self, options: &GenerateOptions) -> Result<Option<String>> {
        let shape = Shape::of(options);
        if !options.unique {
            if let Some((cached, last)) = self.last.borrow().as_ref() {
                if *cached == shape {
                    return Ok(Some(last.to_string()));
                }
            }
        }

        let password = Self::fresh(options)?;
        if !options.unique {
            *self.last.borrow_mut() = Some((shape, Zeroizing::new(password.clone())));
        }
        Ok(Some(password))
    }

    fn arguments(&self) -> Vec<Arg> {
        vec![
            Arg::new("words")
                .long("words")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of words in a password"),
            Arg::new("min_word_length")
                .long("min-words-length")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Minimum length of password words"),
            Arg::new("max_word_length")
                .long("max-words-length")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Maximum length of password words"),
            Arg::new("delimiter")
                .long("delimiter")
                .value_name("TEXT")
                .help("Text between password words"),
        ]
    }

    fn apply_matches(&self, matches: &ArgMatches, options: &mut GenerateOptions) {
        if let Some(words) = flag::<usize>(matches, "words") {
            options.words = words;
        }
        if let Some(min) = flag::<usize>(matches, "min_word_length") {
            options.min_word_length = min;
        }
        if let Some(max) = flag::<usize>(matches, "max_word_length") {
            options.max_word_length = max;
        }
        if let Some(delimiter) = flag::<String>(matches, "delimiter") {
            options.delimiter = delimiter;
        }
    }
}
