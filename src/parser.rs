//! Text syntax for symbolic colours.
//!
//! Supports function-style expressions:
//! - `primary.lvl1` or `$primary.lvl1` - a named colour
//! - `#FF0000` - a literal colour
//! - `blend(primary, secondary, 30%)` - 30% primary, 70% secondary
//! - `opacity(primary, 90%)` - set alpha
//! - `lighten(primary, 20%)`, `darken(...)`, `saturate(...)`, `desaturate(...)`
//!
//! Ratios are written as percentages (`30%`) or plain decimals (`0.3`).

use crate::error::{Result, SwatchError};
use crate::types::{Colour, SymbolicColour};

const FUNCTIONS: &str = "blend, opacity, lighten, darken, saturate, desaturate";

/// A parsed argument: either a colour or a ratio.
#[derive(Debug)]
enum Term {
    Colour(SymbolicColour),
    Ratio(f32),
}

/// Parse a symbolic colour expression.
pub fn parse_symbolic(input: &str) -> Result<SymbolicColour> {
    match parse_term(input)? {
        Term::Colour(colour) => Ok(colour),
        Term::Ratio(_) => Err(SwatchError::Parse {
            message: format!("Expected a colour, found a ratio: {}", input.trim()),
            help: Some("Ratios are only valid as function arguments".to_string()),
        }),
    }
}

fn parse_term(input: &str) -> Result<Term> {
    let input = input.trim();

    if input.is_empty() {
        return Err(SwatchError::Parse {
            message: "Empty colour expression".to_string(),
            help: None,
        });
    }

    if input.starts_with('#') {
        return Ok(Term::Colour(SymbolicColour::literal(Colour::from_hex(input)?)));
    }

    if let Some(num_str) = input.strip_suffix('%') {
        let value: f32 = num_str.trim().parse().map_err(|_| SwatchError::Parse {
            message: format!("Invalid percentage: {}", input),
            help: Some("Use format like 20% or 50.5%".to_string()),
        })?;
        return Ok(Term::Ratio(value / 100.0));
    }

    // Numeric only when the whole term is a number, so `2nd.surface` is a name
    if input.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-') {
        if let Ok(value) = input.parse::<f32>() {
            return Ok(Term::Ratio(value));
        }
    }

    if let Some(paren_pos) = input.find('(') {
        if !input.ends_with(')') {
            return Err(SwatchError::Parse {
                message: format!("Unclosed function call: {}", input),
                help: Some("Add closing parenthesis".to_string()),
            });
        }

        let name = input[..paren_pos].trim();
        let args = split_args(&input[paren_pos + 1..input.len() - 1])?
            .into_iter()
            .map(parse_term)
            .collect::<Result<Vec<_>>>()?;

        return apply(name, args).map(Term::Colour);
    }

    let name = input.strip_prefix('$').unwrap_or(input);
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == ',' || c == ')') {
        return Err(SwatchError::Parse {
            message: format!("Invalid colour name: {}", input),
            help: Some("Names look like primary or primary.lvl1".to_string()),
        });
    }

    Ok(Term::Colour(SymbolicColour::named(name)))
}

/// Split comma-separated arguments, respecting nested parentheses.
fn split_args(input: &str) -> Result<Vec<&str>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(vec![]);
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| SwatchError::Parse {
                    message: format!("Unbalanced parenthesis in: {}", input),
                    help: None,
                })?;
            }
            ',' if depth == 0 => {
                args.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(SwatchError::Parse {
            message: format!("Unbalanced parenthesis in: {}", input),
            help: None,
        });
    }

    args.push(&input[start..]);
    Ok(args)
}

fn apply(name: &str, args: Vec<Term>) -> Result<SymbolicColour> {
    let mut args = args.into_iter();

    match name {
        "blend" => {
            let from = expect_colour(args.next(), name)?;
            let to = expect_colour(args.next(), name)?;
            let ratio = expect_ratio(args.next(), name)?;
            expect_end(args, name)?;
            Ok(from.blend(ratio, &to))
        }
        "opacity" | "lighten" | "darken" | "saturate" | "desaturate" => {
            let base = expect_colour(args.next(), name)?;
            let ratio = expect_ratio(args.next(), name)?;
            expect_end(args, name)?;
            Ok(match name {
                "opacity" => base.opacity(ratio),
                "lighten" => base.lighten(ratio),
                "darken" => base.darken(ratio),
                "saturate" => base.saturate(ratio),
                _ => base.desaturate(ratio),
            })
        }
        _ => Err(SwatchError::Parse {
            message: format!("Unknown colour function: {}", name),
            help: Some(format!("Available functions: {}", FUNCTIONS)),
        }),
    }
}

fn usage(name: &str) -> String {
    match name {
        "blend" => "Usage: blend(primary, secondary, 30%)".to_string(),
        _ => format!("Usage: {}(primary, 20%)", name),
    }
}

fn expect_colour(term: Option<Term>, name: &str) -> Result<SymbolicColour> {
    match term {
        Some(Term::Colour(colour)) => Ok(colour),
        _ => Err(SwatchError::Parse {
            message: format!("{}() expects a colour argument", name),
            help: Some(usage(name)),
        }),
    }
}

fn expect_ratio(term: Option<Term>, name: &str) -> Result<f32> {
    match term {
        Some(Term::Ratio(ratio)) => Ok(ratio),
        _ => Err(SwatchError::Parse {
            message: format!("{}() expects a ratio argument", name),
            help: Some(usage(name)),
        }),
    }
}

fn expect_end(mut rest: impl Iterator<Item = Term>, name: &str) -> Result<()> {
    match rest.next() {
        None => Ok(()),
        Some(_) => Err(SwatchError::Parse {
            message: format!("Too many arguments to {}()", name),
            help: Some(usage(name)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description(input: &str) -> String {
        parse_symbolic(input).unwrap().description().to_string()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_symbolic("primary.lvl1").unwrap(), SymbolicColour::named("primary.lvl1"));
        assert_eq!(parse_symbolic("$primary").unwrap(), SymbolicColour::named("primary"));
    }

    #[test]
    fn test_names_may_start_with_digits() {
        assert_eq!(parse_symbolic("2nd.surface").unwrap(), SymbolicColour::named("2nd.surface"));
        assert_eq!(description("opacity(2nd.surface, 0.5)"), "2nd.surface(0.50)");
        assert_eq!(description("blend(.5x, -y, .25)"), "(.5x(0.25),-y(0.75))");
        assert!(parse_symbolic("0.5").is_err());
        assert!(parse_symbolic("-1").is_err());
    }

    #[test]
    fn test_parse_literal() {
        let colour = parse_symbolic("#FF0000").unwrap();
        assert_eq!(colour, SymbolicColour::literal(Colour::rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_blend() {
        assert_eq!(
            description("blend(primary, secondary, 30%)"),
            "(primary(0.30),secondary(0.70))"
        );
        assert_eq!(
            description("blend(primary, secondary, 0.3)"),
            "(primary(0.30),secondary(0.70))"
        );
    }

    #[test]
    fn test_parse_nested() {
        assert_eq!(
            description("opacity(blend($a, darken(b, 10%), 50%), 90%)"),
            "(a(0.50),(darken(0.10)->b)(0.50))(0.90)"
        );
    }

    #[test]
    fn test_parsed_equals_built() {
        let built = SymbolicColour::named("primary").opacity(0.9);
        assert_eq!(parse_symbolic("opacity(primary, 90%)").unwrap(), built);
    }

    #[test]
    fn test_unknown_function() {
        let err = parse_symbolic("invert(primary, 20%)").unwrap_err();
        assert!(err.to_string().contains("Unknown colour function"));
    }

    #[test]
    fn test_argument_errors() {
        assert!(parse_symbolic("blend(primary, 30%)").is_err());
        assert!(parse_symbolic("opacity(20%, primary)").is_err());
        assert!(parse_symbolic("opacity(primary, 20%, 30%)").is_err());
        assert!(parse_symbolic("opacity(primary, 20%").is_err());
        assert!(parse_symbolic("opacity(primary, x%)").is_err());
    }

    #[test]
    fn test_ratio_is_not_a_colour() {
        assert!(parse_symbolic("30%").is_err());
        assert!(parse_symbolic("").is_err());
        assert!(parse_symbolic("two words").is_err());
    }
}
