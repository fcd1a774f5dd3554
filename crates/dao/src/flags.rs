//! Reverse-parse options.

use serde::{Deserialize, Serialize};

/// Options controlling how a live document is read back into markup.
///
/// Accepted as a bitmask ([`Flags::STRIP_WHITESPACE`], [`Flags::TRIM`],
/// [`Flags::RETAIN_LIVE`]), an options object, or another `Flags`; always
/// held as three booleans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FlagsRepr", rename_all = "camelCase")]
pub struct Flags {
    /// Skip text nodes that are entirely whitespace.
    pub strip_whitespace: bool,
    /// Trim surrounding whitespace from retained text.
    pub trim: bool,
    /// Keep matched elements as foreign content instead of parsing them.
    #[serde(rename = "jQueryLive")]
    pub retain_live: bool,
}

impl Flags {
    pub const NONE: u32 = 0;
    pub const STRIP_WHITESPACE: u32 = 1;
    pub const TRIM: u32 = 2;
    pub const RETAIN_LIVE: u32 = 4;

    /// Unknown bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            strip_whitespace: bits & Self::STRIP_WHITESPACE != 0,
            trim: bits & Self::TRIM != 0,
            retain_live: bits & Self::RETAIN_LIVE != 0,
        }
    }

    pub fn bits(self) -> u32 {
        let mut bits = Self::NONE;
        if self.strip_whitespace {
            bits |= Self::STRIP_WHITESPACE;
        }
        if self.trim {
            bits |= Self::TRIM;
        }
        if self.retain_live {
            bits |= Self::RETAIN_LIVE;
        }
        bits
    }
}

impl From<u32> for Flags {
    fn from(bits: u32) -> Self {
        Flags::from_bits(bits)
    }
}

impl From<&Flags> for Flags {
    fn from(flags: &Flags) -> Self {
        *flags
    }
}

/// Options-object form. Missing keys are `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlagOptions {
    #[serde(alias = "strip_whitespace")]
    pub strip_whitespace: bool,
    pub trim: bool,
    #[serde(rename = "jQueryLive", alias = "retainLive", alias = "retain_live")]
    pub retain_live: bool,
}

impl From<FlagOptions> for Flags {
    fn from(options: FlagOptions) -> Self {
        Self {
            strip_whitespace: options.strip_whitespace,
            trim: options.trim,
            retain_live: options.retain_live,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagsRepr {
    Bits(u32),
    Options(FlagOptions),
}

impl From<FlagsRepr> for Flags {
    fn from(repr: FlagsRepr) -> Self {
        match repr {
            FlagsRepr::Bits(bits) => Flags::from_bits(bits),
            FlagsRepr::Options(options) => options.into(),
        }
    }
}
