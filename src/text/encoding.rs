//! # Printer Encodings
//!
//! The enumerated set of character encodings a document can target.
//!
//! | Identifier | Aliases | Cell model |
//! |------------|---------|------------|
//! | cp437, cp852, cp858, cp860, cp863, cp865, cp866, cp1252, multilingual | | one cell per character |
//! | cp932 | shiftjis | double-byte characters take two cells |
//! | cp936 | gb18030 | double-byte characters take two cells |
//! | cp949 | ksc5601 | double-byte characters take two cells |
//! | cp950 | big5 | double-byte characters take two cells |
//! | tis620 | | one cell per Thai cluster |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReceiptError;

/// Character encoding of the target printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Code page 437 (US)
    #[default]
    Cp437,
    /// Code page 852 (Latin 2)
    Cp852,
    /// Code page 858 (Latin 1 + Euro)
    Cp858,
    /// Code page 860 (Portuguese)
    Cp860,
    /// Code page 863 (Canadian French)
    Cp863,
    /// Code page 865 (Nordic)
    Cp865,
    /// Code page 866 (Cyrillic)
    Cp866,
    /// Windows-1252
    Cp1252,
    /// Japanese (Shift_JIS)
    #[serde(alias = "shiftjis")]
    Cp932,
    /// Simplified Chinese (GB18030)
    #[serde(alias = "gb18030")]
    Cp936,
    /// Korean (KS C 5601)
    #[serde(alias = "ksc5601")]
    Cp949,
    /// Traditional Chinese (Big5)
    #[serde(alias = "big5")]
    Cp950,
    /// Mixed single-byte code pages
    Multilingual,
    /// Thai (TIS-620)
    Tis620,
}

impl Encoding {
    /// All encodings, in display order.
    pub const ALL: [Encoding; 14] = [
        Encoding::Cp437,
        Encoding::Cp852,
        Encoding::Cp858,
        Encoding::Cp860,
        Encoding::Cp863,
        Encoding::Cp865,
        Encoding::Cp866,
        Encoding::Cp1252,
        Encoding::Cp932,
        Encoding::Cp936,
        Encoding::Cp949,
        Encoding::Cp950,
        Encoding::Multilingual,
        Encoding::Tis620,
    ];

    /// Canonical identifier.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Cp437 => "cp437",
            Encoding::Cp852 => "cp852",
            Encoding::Cp858 => "cp858",
            Encoding::Cp860 => "cp860",
            Encoding::Cp863 => "cp863",
            Encoding::Cp865 => "cp865",
            Encoding::Cp866 => "cp866",
            Encoding::Cp1252 => "cp1252",
            Encoding::Cp932 => "cp932",
            Encoding::Cp936 => "cp936",
            Encoding::Cp949 => "cp949",
            Encoding::Cp950 => "cp950",
            Encoding::Multilingual => "multilingual",
            Encoding::Tis620 => "tis620",
        }
    }

    /// Codec for the double-byte encodings; `None` for single-byte pages.
    pub fn multibyte_codec(self) -> Option<&'static encoding_rs::Encoding> {
        match self {
            Encoding::Cp932 => Some(encoding_rs::SHIFT_JIS),
            Encoding::Cp936 => Some(encoding_rs::GB18030),
            Encoding::Cp949 => Some(encoding_rs::EUC_KR),
            Encoding::Cp950 => Some(encoding_rs::BIG5),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shiftjis" => Ok(Encoding::Cp932),
            "gb18030" => Ok(Encoding::Cp936),
            "ksc5601" => Ok(Encoding::Cp949),
            "big5" => Ok(Encoding::Cp950),
            other => Encoding::ALL
                .into_iter()
                .find(|e| e.name() == other)
                .ok_or_else(|| ReceiptError::Config(format!("Unknown encoding '{}'", s))),
        }
    }
}
