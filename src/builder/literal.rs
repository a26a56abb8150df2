//! Decoding of numeric and string literal spellings

use smol_str::SmolStr;

use crate::hdl_ast::HdlValueInt;

/// Width of one digit in bits, for the bases a bit string can use
pub(crate) fn digit_width(base: u32) -> Option<u32> {
    match base {
        2 => Some(1),
        8 => Some(3),
        16 => Some(4),
        _ => None,
    }
}

fn strip_underscores(text: &str) -> String {
    text.chars().filter(|&c| c != '_').collect()
}

fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Decimal integer, optionally with a positive exponent: `1_000`, `1e3`
pub(crate) fn decimal(text: &str) -> HdlValueInt {
    let text = strip_underscores(text);
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => {
            let exp = text[at + 1..].trim_start_matches('+');
            (&text[..at], exp.parse::<usize>().unwrap_or(0))
        }
        None => (text.as_str(), 0),
    };
    let mantissa = trim_leading_zeros(mantissa);
    let mut value = mantissa.to_string();
    if mantissa != "0" {
        value.extend(std::iter::repeat_n('0', exponent));
    }
    HdlValueInt {
        value: SmolStr::new(value),
        base: 10,
        bits: None,
    }
}

/// VHDL based literal `16#FF#`. `None` for based reals (`2#1.1#`, an
/// exponent), which stay textual.
pub(crate) fn vhdl_based(text: &str) -> Option<HdlValueInt> {
    let mut parts = text.splitn(3, '#');
    let base: u32 = strip_underscores(parts.next()?).parse().ok()?;
    let digits = parts.next()?;
    let rest = parts.next()?;
    if !(2..=16).contains(&base) || digits.contains('.') || !rest.is_empty() {
        return None;
    }
    let digits = strip_underscores(digits).to_ascii_lowercase();
    Some(HdlValueInt {
        value: SmolStr::new(trim_leading_zeros(&digits)),
        base,
        bits: None,
    })
}

/// VHDL bit string `X"FF"`, `8ub"1010"`, `D"12"`.
///
/// Unsized binary, octal and hex strings get their natural width; unsized
/// decimal strings have none.
pub(crate) fn vhdl_bit_string(text: &str) -> Option<HdlValueInt> {
    let quote = text.find('"')?;
    let prefix = &text[..quote];
    let content = text[quote + 1..].strip_suffix('"')?;
    let size_len = prefix.find(|c: char| !c.is_ascii_digit() && c != '_')?;
    let size = &prefix[..size_len];
    let base = match prefix.chars().last()?.to_ascii_lowercase() {
        'b' => 2,
        'o' => 8,
        'x' => 16,
        'd' => 10,
        _ => return None,
    };
    let digits = strip_underscores(content).to_ascii_lowercase();
    let bits = if size.is_empty() {
        digit_width(base).map(|w| w * digits.len() as u32)
    } else {
        Some(strip_underscores(size).parse().ok()?)
    };
    Some(HdlValueInt {
        value: SmolStr::new(digits),
        base,
        bits,
    })
}

/// Verilog based number `8'hFF`, `'b1010`, `4'sb1x0z`, `8 'd 255`
pub(crate) fn verilog_based(text: &str) -> Option<HdlValueInt> {
    let (size, rest) = text.split_once('\'')?;
    let size = strip_underscores(size.trim());
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix(['s', 'S'])
        .unwrap_or(rest);
    let mut chars = rest.chars();
    let base = match chars.next()?.to_ascii_lowercase() {
        'b' => 2,
        'o' => 8,
        'h' => 16,
        'd' => 10,
        _ => return None,
    };
    let digits: String = chars
        .as_str()
        .trim()
        .chars()
        .filter(|&c| c != '_')
        .map(|c| if c == '?' { 'z' } else { c.to_ascii_lowercase() })
        .collect();
    let bits = if size.is_empty() {
        None
    } else {
        Some(size.parse().ok()?)
    };
    Some(HdlValueInt {
        value: SmolStr::new(digits),
        base,
        bits,
    })
}

/// Contents of a VHDL string literal; `""` stands for one quote
pub(crate) fn vhdl_string(text: &str) -> SmolStr {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    SmolStr::new(inner.replace("\"\"", "\""))
}

/// Contents of a Verilog string literal, escapes kept as written
pub(crate) fn verilog_string(text: &str) -> SmolStr {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    SmolStr::new(inner)
}

/// The character of a VHDL character literal `'a'`
pub(crate) fn vhdl_char(text: &str) -> Option<char> {
    let mut chars = text.strip_prefix('\'')?.chars();
    let ch = chars.next()?;
    (chars.as_str() == "'").then_some(ch)
}
