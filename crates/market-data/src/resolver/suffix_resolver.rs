//! Suffix resolver - numeric exchange codes.
//!
//! Bare numeric codes get the chart API's exchange suffix:
//!
//! | Input               | Result      |
//! |---------------------|-------------|
//! | 6 digits, leading 6 | `.SS`       |
//! | 6 digits, leading 0/3 | `.SZ`     |
//! | 4 digits            | `.HK`       |

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{CanonicalSymbol, ResolutionSource};

use super::traits::Resolver;

lazy_static! {
    static ref MAINLAND_CODE: Regex = Regex::new(r"^\d{6}$").unwrap();
    static ref HONG_KONG_CODE: Regex = Regex::new(r"^\d{4}$").unwrap();
}

#[derive(Default)]
pub struct SuffixResolver;

impl SuffixResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for SuffixResolver {
    fn resolve(&self, input: &str) -> Option<CanonicalSymbol> {
        let symbol = if MAINLAND_CODE.is_match(input) {
            match input.as_bytes()[0] {
                b'6' => format!("{}.SS", input),
                b'0' | b'3' => format!("{}.SZ", input),
                _ => return None,
            }
        } else if HONG_KONG_CODE.is_match(input) {
            format!("{:0>4}.HK", input)
        } else {
            return None;
        };

        Some(CanonicalSymbol::new(symbol, ResolutionSource::SuffixRule))
    }
}
