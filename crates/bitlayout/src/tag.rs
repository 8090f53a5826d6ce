//! Per-field layout annotations.
//!
//! Fields declared through [`bit_struct!`](crate::bit_struct) take their
//! annotation as `#[bit(..)]` tokens, resolved at compile time:
//!
//! - `ignore`: the field is left out of the layout, the cursor does not move.
//! - `skip`: the field's bits are stepped over, the value is never transferred.
//! - `big_endian` / `little_endian`: the field uses this byte order instead of
//!   the one passed to the read or write call.
//!
//! The textual form `"-"`, `"skip"`, `"BE"`, `"LE"` (comma separated) is
//! accepted by [`FieldConfig::from_str`](std::str::FromStr). In both forms the
//! first `ignore`/`skip` token ends the list; unknown text tokens are dropped.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::order::Endian;

/// Layout directives for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldConfig {
    pub ignore: bool,
    pub skip: bool,
    pub endian: Option<Endian>,
}

impl FieldConfig {
    pub const fn new() -> Self {
        FieldConfig {
            ignore: false,
            skip: false,
            endian: None,
        }
    }

    const fn closed(&self) -> bool {
        self.ignore || self.skip
    }

    pub const fn ignore(mut self) -> Self {
        if !self.closed() {
            self.ignore = true;
        }
        self
    }

    pub const fn skip(mut self) -> Self {
        if !self.closed() {
            self.skip = true;
        }
        self
    }

    pub const fn big_endian(mut self) -> Self {
        if !self.closed() {
            self.endian = Some(Endian::Big);
        }
        self
    }

    pub const fn little_endian(mut self) -> Self {
        if !self.closed() {
            self.endian = Some(Endian::Little);
        }
        self
    }

    /// Byte order the field is transferred with, given the ambient one.
    pub fn order(&self, ambient: Endian) -> Endian {
        self.endian.unwrap_or(ambient)
    }
}

impl FromStr for FieldConfig {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config = s
            .split(',')
            .fold(FieldConfig::new(), |config, token| match token.trim() {
                "-" => config.ignore(),
                "skip" => config.skip(),
                "BE" => config.big_endian(),
                "LE" => config.little_endian(),
                _ => config,
            });

        Ok(config)
    }
}

impl fmt::Display for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ignore {
            return f.write_str("-");
        }

        let mut tokens = Vec::with_capacity(2);
        if let Some(endian) = self.endian {
            tokens.push(match endian {
                Endian::Big => "BE",
                Endian::Little => "LE",
            });
        }
        if self.skip {
            tokens.push("skip");
        }

        f.write_str(&tokens.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> FieldConfig {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_single_tokens() {
        assert!(parse("-").ignore);
        assert!(parse("skip").skip);
        assert_eq!(parse("BE").endian, Some(Endian::Big));
        assert_eq!(parse("LE").endian, Some(Endian::Little));
        assert_eq!(parse(""), FieldConfig::new());
    }

    #[test]
    fn test_parse_first_match_wins() {
        let config = parse("-,skip");
        assert!(config.ignore);
        assert!(!config.skip);

        let config = parse("skip,BE");
        assert!(config.skip);
        assert_eq!(config.endian, None);

        let config = parse("BE,skip");
        assert!(config.skip);
        assert_eq!(config.endian, Some(Endian::Big));
    }

    #[test]
    fn test_parse_unknown_tokens() {
        assert_eq!(parse("reserved,LE"), FieldConfig::new().little_endian());
    }

    #[test]
    fn test_builder_matches_text() {
        assert_eq!(FieldConfig::new().ignore().skip(), parse("-,skip"));
        assert_eq!(FieldConfig::new().big_endian().little_endian(), parse("BE,LE"));
    }

    #[test]
    fn test_order() {
        assert_eq!(FieldConfig::new().order(Endian::Big), Endian::Big);
        assert_eq!(FieldConfig::new().little_endian().order(Endian::Big), Endian::Little);
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("BE,skip").to_string(), "BE,skip");
        assert_eq!(parse("-").to_string(), "-");
        assert_eq!(FieldConfig::new().to_string(), "");
    }
}
