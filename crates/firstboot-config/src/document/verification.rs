//! Content verification for fetched resources.

use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt, Snafu, ensure};

/// Expected content checksums for a fetched resource.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Verification {
    /// Checksum the fetched bytes must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Checksum>,
}

#[derive(Debug, Snafu)]
pub enum ChecksumParseError {
    #[snafu(display("checksum {checksum:?} is missing the `<function>-` prefix"))]
    MissingFunctionPrefix { checksum: String },

    #[snafu(display("checksum function {function:?} is not supported"))]
    UnsupportedFunction {
        source: strum::ParseError,
        function: String,
    },

    #[snafu(display("checksum {checksum:?} does not carry a {expected}-character hex digest"))]
    InvalidDigest { checksum: String, expected: usize },
}

/// A validated `<function>-<hexdigest>` checksum, e.g. `sha512-00ea…`.
///
/// The digest is stored (and re-serialized) in lowercase.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Checksum {
    pub function: HashFunction,
    pub digest: String,
}

/// Digest functions supported for content verification.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HashFunction {
    Sha256,
    Sha512,
}

impl HashFunction {
    /// Length of the hex digest this function produces.
    pub fn digest_len(&self) -> usize {
        match self {
            HashFunction::Sha256 => 64,
            HashFunction::Sha512 => 128,
        }
    }
}

impl FromStr for Checksum {
    type Err = ChecksumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (function, digest) = value
            .split_once('-')
            .context(MissingFunctionPrefixSnafu { checksum: value })?;
        let function = function
            .parse::<HashFunction>()
            .context(UnsupportedFunctionSnafu { function })?;
        ensure!(
            digest.len() == function.digest_len() && digest.bytes().all(|b| b.is_ascii_hexdigit()),
            InvalidDigestSnafu {
                checksum: value,
                expected: function.digest_len(),
            }
        );
        Ok(Checksum {
            function,
            digest: digest.to_ascii_lowercase(),
        })
    }
}

impl TryFrom<String> for Checksum {
    type Error = ChecksumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Checksum> for String {
    fn from(value: Checksum) -> Self {
        value.to_string()
    }
}

impl Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.function, self.digest)
    }
}

impl JsonSchema for Checksum {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Checksum".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "sha256-e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        HashFunction::Sha256
    )]
    #[case(
        "sha512-cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        HashFunction::Sha512
    )]
    fn checksum_parses_and_round_trips(#[case] input: &str, #[case] function: HashFunction) {
        let checksum: Checksum = input.parse().expect("checksum can not be parsed");
        assert_eq!(checksum.function, function);
        assert_eq!(checksum.to_string(), input);
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_digest("sha512")]
    #[case::unsupported_function("md5-d41d8cd98f00b204e9800998ecf8427e")]
    #[case::digest_too_short("sha256-abc123")]
    #[case::digest_not_hex("sha256-zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")]
    fn checksum_parsing_invalid_input(#[case] input: &str) {
        assert!(input.parse::<Checksum>().is_err());
    }

    #[test]
    fn checksum_digest_is_normalized_to_lowercase() {
        let checksum: Checksum =
            "sha256-E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
                .parse()
                .expect("checksum can not be parsed");
        assert_eq!(
            checksum.to_string(),
            "sha256-e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
