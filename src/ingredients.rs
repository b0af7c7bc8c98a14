//! Free-text ingredient normalization.
//!
//! Turns lines like `"1 1/2 cups flour (sifted)"` into a structured
//! [`IngredientLine`]. Parenthetical qualifiers are stripped; units are
//! matched case-insensitively and the ingredient keeps its original case.

use crate::model::IngredientLine;
use log::debug;

/// Canonical unit followed by every alias that maps onto it
const UNIT_ALIASES: &[(&str, &[&str])] = &[
    (
        "tbsp",
        &["tablespoon", "tablespoons", "tbsp", "tbsps", "tbs", "tbl"],
    ),
    ("tsp", &["teaspoon", "teaspoons", "tsp", "tsps"]),
    ("cups", &["cup", "cups"]),
    ("oz", &["ounce", "ounces", "oz"]),
    ("lb", &["pound", "pounds", "lb", "lbs"]),
    ("kg", &["kilogram", "kilograms", "kg", "kgs"]),
    ("g", &["gram", "grams", "g"]),
    (
        "ml",
        &["milliliter", "milliliters", "millilitre", "millilitres", "ml"],
    ),
    ("l", &["liter", "liters", "litre", "litres"]),
    ("pinch", &["pinch", "pinches"]),
];

const VULGAR_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅛', 0.125),
];

/// Parse one raw ingredient line. Never fails.
pub fn parse(raw: &str) -> IngredientLine {
    let cleaned = strip_parentheticals(raw);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut rest = &tokens[..];
    let count = take_count(&mut rest);

    let unit = match rest.first().and_then(|token| canonical_unit(token)) {
        Some(unit) => {
            rest = &rest[1..];
            unit.to_string()
        }
        None => String::new(),
    };

    let ingredient = rest.join(" ");
    if ingredient.is_empty() {
        debug!("No ingredient name left in {:?}, keeping raw text", raw);
        let text = if cleaned.is_empty() { raw.trim() } else { cleaned.as_str() };
        return IngredientLine {
            count: None,
            unit: String::new(),
            ingredient: text.to_string(),
        };
    }

    IngredientLine {
        count,
        unit,
        ingredient,
    }
}

/// Map a unit token to its canonical form, ignoring trailing punctuation
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches(['.', ',']).to_lowercase();
    UNIT_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&token.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Consume the leading quantity tokens, combining a whole number with a
/// following fraction ("1 1/2" is 1.5).
fn take_count(tokens: &mut &[&str]) -> Option<f64> {
    let remaining: &[&str] = *tokens;
    let first = remaining.first()?;
    let value = parse_quantity(first)?;
    *tokens = &remaining[1..];

    let is_whole = value.fract() == 0.0 && !first.contains('/');
    if let (true, Some(next)) = (is_whole, remaining.get(1)) {
        if is_fraction_token(next) {
            if let Some(fraction) = parse_quantity(next) {
                *tokens = &remaining[2..];
                return Some(value + fraction);
            }
        }
    }

    Some(value)
}

fn is_fraction_token(token: &str) -> bool {
    token.contains('/') || token.chars().any(|c| vulgar_value(c).is_some())
}

/// Parse a single quantity token: integer, decimal, `a/b`, `1-1/2`, `½` or `1½`
pub fn parse_quantity(token: &str) -> Option<f64> {
    let token = token.trim_end_matches(',');
    if token.is_empty() {
        return None;
    }

    // Hyphenated mixed numbers such as "4-1/2"
    if let Some((whole, fraction)) = token.split_once('-') {
        if fraction.contains('/') {
            return Some(parse_plain_number(whole)? + parse_fraction(fraction)?);
        }
        return None;
    }

    if token.contains('/') {
        return parse_fraction(token);
    }

    // Trailing vulgar fraction, optionally after a whole number ("1½")
    if let Some(last) = token.chars().last() {
        if let Some(fraction) = vulgar_value(last) {
            let whole = &token[..token.len() - last.len_utf8()];
            if whole.is_empty() {
                return Some(fraction);
            }
            return Some(parse_plain_number(whole)? + fraction);
        }
    }

    parse_plain_number(token)
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_plain_number(numerator)?;
    let denominator = parse_plain_number(denominator)?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn parse_plain_number(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn vulgar_value(c: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(symbol, _)| *symbol == c)
        .map(|(_, value)| *value)
}

/// Remove every balanced `( ... )` segment; an unclosed `(` is kept as text
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut pending = String::new();

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                pending.push(c);
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    pending.clear();
                    out.push(' ');
                } else {
                    pending.push(c);
                }
            }
            _ if depth > 0 => pending.push(c),
            _ => out.push(c),
        }
    }
    out.push_str(&pending);

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
