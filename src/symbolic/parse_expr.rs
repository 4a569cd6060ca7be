//! a module turns a String expression into a symbolic expression
//!
//! Grammar (usual precedence, `^` right-associative):
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | name '(' expr ')' | name | '(' expr ')'
//! ```
//! Decimal literals become exact rationals, so `1.5` is read as `3/2`.
use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_errors::{SymbolicError, SymbolicResult};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded},
};
use num::{BigInt, BigRational};
use std::str::FromStr;

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn decimal_to_rational(
    (int_part, frac_part): (&str, Option<&str>),
) -> Result<Expr, num::bigint::ParseBigIntError> {
    let frac_part = frac_part.unwrap_or("");
    let numer: BigInt = format!("{}{}", int_part, frac_part).parse()?;
    let denom = num::pow(BigInt::from(10), frac_part.len());
    Ok(Expr::Const(BigRational::new(numer, denom)))
}

/// integer and fraction digits are taken as separate outputs, `1.` reads as 1
fn number(input: &str) -> IResult<&str, Expr> {
    map_res(
        pair(digit1, opt(preceded(char('.'), digit0))),
        decimal_to_rational,
    )
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    let (rest, (head, tail)) = pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    )
    .parse(input)?;
    Ok((rest, &input[..head.len() + tail.len()]))
}

/// a variable, or a call when the name is followed by a bracket
fn name_or_call(input: &str) -> IResult<&str, Expr> {
    let (rest, name) = identifier(input)?;
    let (after_ws, _) = multispace0(rest)?;
    if !after_ws.starts_with('(') {
        return Ok((rest, Expr::var(name)));
    }
    let func = Function::from_str(name)
        .map_err(|_| nom::Err::Failure(Error::new(input, ErrorKind::Tag)))?;
    let (rest, arg) = delimited(char('('), expr, ws(char(')'))).parse(after_ws)?;
    Ok((rest, Expr::apply(func, arg)))
}

fn primary(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        number,
        name_or_call,
        delimited(char('('), expr, ws(char(')'))),
    )))
    .parse(input)
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = primary(input)?;
    let (input, exponent) = opt(preceded(alt((tag("**"), tag("^"))), unary)).parse(input)?;
    let result = match exponent {
        Some(exponent) => base.pow(exponent),
        None => base,
    };
    Ok((input, result))
}

fn negate(operand: Expr) -> Expr {
    match operand {
        Expr::Const(c) => Expr::Const(-c),
        other => -other,
    }
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), unary), negate),
        preceded(ws(char('+')), unary),
        power,
    ))
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(pair(ws(alt((char('*'), char('/')))), unary)).parse(input)?;
    let product = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => acc * rhs,
        _ => acc / rhs,
    });
    Ok((input, product))
}

fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(ws(alt((char('+'), char('-')))), term)).parse(input)?;
    let sum = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => acc + rhs,
        _ => acc - rhs,
    });
    Ok((input, sum))
}

impl Expr {
    /// Parses a string like `"(u^2 - C)^1.5"` or `"exp(-xi^2/6)"`.
    pub fn parse_expression(input: &str) -> SymbolicResult<Expr> {
        all_consuming(ws(expr))
            .parse(input)
            .map(|(_, parsed)| parsed)
            .map_err(|err| SymbolicError::Parse(format!("'{}': {}", input, err)))
    }

    /// parse a vector of strings, failing on the first malformed one
    pub fn parse_vector_expression(inputs: &[&str]) -> SymbolicResult<Vec<Expr>> {
        inputs.iter().map(|s| Expr::parse_expression(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_as_rational() {
        assert_eq!(Expr::parse_expression("1.5").unwrap(), Expr::rational(3, 2));
        assert_eq!(Expr::parse_expression("0.25").unwrap(), Expr::rational(1, 4));
        assert_eq!(Expr::parse_expression(" 7 ").unwrap(), Expr::int(7));
    }

    #[test]
    fn test_parse_decimal_before_bracket_or_end() {
        let x = || Expr::var("x");
        assert_eq!(Expr::parse_expression("2.5").unwrap(), Expr::rational(5, 2));
        assert_eq!(Expr::parse_expression("3.").unwrap(), Expr::int(3));
        assert_eq!(
            Expr::parse_expression("x^1.5").unwrap(),
            x().pow(Expr::rational(3, 2))
        );
        assert_eq!(
            Expr::parse_expression("(1 - C)^0.5").unwrap(),
            (Expr::int(1) - Expr::var("C")).pow(Expr::rational(1, 2))
        );
        assert_eq!(
            Expr::parse_expression("(x + 0.25)").unwrap(),
            x() + Expr::rational(1, 4)
        );
        assert_eq!(
            Expr::parse_expression("1.5*x").unwrap(),
            Expr::rational(3, 2) * x()
        );
        assert_eq!(
            Expr::parse_expression("(u^2 - C)^1.5").unwrap(),
            (Expr::var("u").pow(Expr::int(2)) - Expr::var("C")).pow(Expr::rational(3, 2))
        );
    }

    #[test]
    fn test_parse_identifiers_at_end_of_input() {
        assert_eq!(Expr::parse_expression("xi").unwrap(), Expr::var("xi"));
        assert_eq!(
            Expr::parse_expression("exp(-xi)").unwrap(),
            (-Expr::var("xi")).exp()
        );
    }

    #[test]
    fn test_parse_precedence() {
        let parsed = Expr::parse_expression("1 + 2*x^2").unwrap();
        let expected = Expr::int(1) + Expr::int(2) * Expr::var("x").pow(Expr::int(2));
        assert_eq!(parsed, expected);
        let power = Expr::parse_expression("x^2^3").unwrap();
        let expected = Expr::var("x").pow(Expr::int(2).pow(Expr::int(3)));
        assert_eq!(power, expected);
        let starred = Expr::parse_expression("x**2").unwrap();
        assert_eq!(starred, Expr::var("x").pow(Expr::int(2)));
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(Expr::parse_expression("-3").unwrap(), Expr::int(-3));
        let parsed = Expr::parse_expression("-x^2").unwrap();
        assert_eq!(parsed, -(Expr::var("x").pow(Expr::int(2))));
    }

    #[test]
    fn test_parse_functions_and_aliases() {
        let parsed = Expr::parse_expression("exp(u) + log(x) + tan(y)").unwrap();
        let expected = Expr::var("u").exp()
            + Expr::var("x").ln()
            + Expr::apply(Function::Tg, Expr::var("y"));
        assert_eq!(parsed, expected);
        assert_eq!(
            Expr::parse_expression("cosh (u)").unwrap(),
            Expr::var("u").cosh()
        );
    }

    #[test]
    fn test_parse_unicode_names() {
        let parsed = Expr::parse_expression("ξ^2/6").unwrap();
        assert_eq!(parsed, Expr::var("ξ").pow(Expr::int(2)) / Expr::int(6));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Expr::parse_expression("foo(x)"),
            Err(SymbolicError::Parse(_))
        ));
        assert!(Expr::parse_expression("(x + 1").is_err());
        assert!(Expr::parse_expression("x +").is_err());
        assert!(Expr::parse_expression("").is_err());
        assert!(Expr::parse_vector_expression(&["x", "y*"]).is_err());
    }
}
