use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sil_util::{Error, anyhow, bail};

/// An exact base-10 number: `mantissa * 10^-scale`.
///
/// Integer and character constants are exact here whatever their width;
/// the same constant's binary floating value is kept alongside it in
/// [`SymConstFieldInfo`](crate::SymConstFieldInfo). Encoded as a string
/// (`"-12.50"`) so no JSON reader rounds it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SymDecimal {
    mantissa: i128,
    scale: u32,
}

/// More fractional digits than this cannot be represented.
const MAX_SCALE: u32 = 28;

impl SymDecimal {
    pub fn from_int(value: i128) -> Self {
        SymDecimal {
            mantissa: value,
            scale: 0,
        }
    }

    pub fn from_char(value: char) -> Self {
        Self::from_int(value as i128)
    }

    pub fn mantissa(self) -> i128 {
        self.mantissa
    }

    /// Number of digits after the decimal point.
    pub fn scale(self) -> u32 {
        self.scale
    }

    /// The integer value, if there is no fractional part.
    pub fn to_i128(self) -> Option<i128> {
        let divisor = 10i128.pow(self.scale);
        (self.mantissa % divisor == 0).then(|| self.mantissa / divisor)
    }

    /// Nearest binary floating value.
    pub fn to_f64(self) -> f64 {
        // Round-tripping through the decimal text gives the correctly rounded value.
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for SymDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let digits = format!("{digits:0>width$}", width = scale + 1);
        let (int, frac) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{int}.{frac}")
    }
}

impl FromStr for SymDecimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, body) = match s.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", s),
        };
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() || !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            bail!("`{s}` is not a decimal number");
        }
        if body.ends_with('.') {
            bail!("`{s}` has no digits after the decimal point");
        }
        let scale = frac.len() as u32;
        if scale > MAX_SCALE {
            bail!("`{s}` has more than {MAX_SCALE} fractional digits");
        }
        // Parsing with the sign keeps `i128::MIN` in range.
        let mantissa: i128 = format!("{sign}{int}{frac}")
            .parse()
            .map_err(|_| anyhow!("`{s}` is out of range"))?;
        Ok(SymDecimal { mantissa, scale })
    }
}

impl From<SymDecimal> for String {
    fn from(value: SymDecimal) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SymDecimal {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
