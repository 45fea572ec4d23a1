//! Text → polynomial parsing.
//!
//! Grammar (whitespace ignored):
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' unary) | ('/' number) | power)*   juxtaposition multiplies
//! unary  := '-' unary | power
//! power  := atom ('^' integer)?
//! atom   := number | 'x' | 'y' | '(' expr ')'
//! number := digits ('.' digits)? ('/' digits)?
//! ```

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;
use std::str::FromStr;

use super::bivariate::BPoly;
use super::univariate::UPoly;

/// Errors raised while parsing polynomials or rational literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedChar { pos: usize, ch: char },
    UnexpectedEnd,
    BadNumber { pos: usize },
    BadExponent { pos: usize },
    DivisionByZero { pos: usize },
    TooDeep { pos: usize },
    NotUnivariate,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { pos, ch } => write!(f, "unexpected '{ch}' at offset {pos}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::BadNumber { pos } => write!(f, "malformed number at offset {pos}"),
            Self::BadExponent { pos } => write!(f, "exponent must be a small integer (offset {pos})"),
            Self::DivisionByZero { pos } => write!(f, "division by zero at offset {pos}"),
            Self::TooDeep { pos } => {
                write!(f, "parentheses nested deeper than {MAX_DEPTH} at offset {pos}")
            }
            Self::NotUnivariate => write!(f, "expected a polynomial in x only"),
        }
    }
}

impl std::error::Error for ParseError {}

impl FromStr for BPoly {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut p = Parser::new(s);
        let out = p.expr()?;
        p.skip_ws();
        match p.peek() {
            None => Ok(out),
            Some(ch) => Err(ParseError::UnexpectedChar { pos: p.pos, ch }),
        }
    }
}

impl FromStr for UPoly {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b: BPoly = s.parse()?;
        if b.degree_y() > 0 {
            return Err(ParseError::NotUnivariate);
        }
        Ok(b.coeff_y(0))
    }
}

/// Parse `3`, `-7/2` or `0.125` into an exact rational.
pub fn parse_rational(s: &str) -> Result<BigRational, ParseError> {
    let b: BPoly = s.parse()?;
    if !b.is_constant() {
        return Err(ParseError::BadNumber { pos: 0 });
    }
    Ok(b.coeff_y(0).coeff(0))
}

/// Deepest parenthesis nesting accepted.
const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            src: s.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.src.get(self.pos).map(|&b| b as char)
    }

    fn expr(&mut self) -> Result<BPoly, ParseError> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    acc = &acc + &self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    acc = &acc - &self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<BPoly, ParseError> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    acc = &acc * &self.unary()?;
                }
                Some('/') => {
                    self.pos += 1;
                    let at = self.pos;
                    let d = self.number()?;
                    if d.is_zero() {
                        return Err(ParseError::DivisionByZero { pos: at });
                    }
                    acc = acc.scale(&d.recip());
                }
                Some(c) if c == '(' || c == 'x' || c == 'y' || c.is_ascii_digit() => {
                    acc = &acc * &self.power()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn power(&mut self) -> Result<BPoly, ParseError> {
        let base = self.atom()?;
        if self.peek() != Some('^') {
            return Ok(base);
        }
        self.pos += 1;
        self.skip_ws();
        let at = self.pos;
        let start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let digits = std::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| ParseError::BadExponent { pos: at })?;
        let e: u32 = digits
            .parse()
            .map_err(|_| ParseError::BadExponent { pos: at })?;
        if e > 512 {
            return Err(ParseError::BadExponent { pos: at });
        }
        let mut acc = BPoly::one();
        for _ in 0..e {
            acc = &acc * &base;
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<BPoly, ParseError> {
        let mut negate = false;
        while self.peek() == Some('-') {
            self.pos += 1;
            negate = !negate;
        }
        let p = self.power()?;
        Ok(if negate { -&p } else { p })
    }

    fn atom(&mut self) -> Result<BPoly, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('x') => {
                self.pos += 1;
                Ok(BPoly::monomial(BigRational::one(), 1, 0))
            }
            Some('y') => {
                self.pos += 1;
                Ok(BPoly::monomial(BigRational::one(), 0, 1))
            }
            Some('(') => {
                if self.depth == MAX_DEPTH {
                    return Err(ParseError::TooDeep { pos: self.pos });
                }
                self.pos += 1;
                self.depth += 1;
                let inner = self.expr();
                self.depth -= 1;
                let inner = inner?;
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some(ch) => Err(ParseError::UnexpectedChar { pos: self.pos, ch }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => {
                let v = self.number()?;
                Ok(BPoly::constant(v))
            }
            Some(ch) => Err(ParseError::UnexpectedChar { pos: self.pos, ch }),
        }
    }

    /// Unsigned decimal literal (the `/` of a fraction is handled by `term`).
    fn number(&mut self) -> Result<BigRational, ParseError> {
        self.skip_ws();
        let at = self.pos;
        let mut int = BigInt::zero();
        let mut den = BigInt::one();
        let mut seen = false;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
            int = int * 10 + BigInt::from(self.src[self.pos] - b'0');
            self.pos += 1;
            seen = true;
        }
        if self.src.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
                int = int * 10 + BigInt::from(self.src[self.pos] - b'0');
                den *= 10;
                self.pos += 1;
                seen = true;
            }
        }
        if !seen {
            return Err(ParseError::BadNumber { pos: at });
        }
        Ok(BigRational::new(int, den))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parabola_and_products() {
        let f: BPoly = "y^2 - x".parse().unwrap();
        assert_eq!(f, BPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]));
        let g: BPoly = "(x - 1)*(y + 2)".parse().unwrap();
        assert_eq!(g, BPoly::from_terms(&[(1, 1, 1), (2, 1, 0), (-1, 0, 1), (-2, 0, 0)]));
        let h: BPoly = "2x y - 1/2".parse().unwrap();
        assert_eq!(h.to_string(), "2*x*y - 1/2");
    }

    #[test]
    fn minus_binds_looser_than_power() {
        let f: BPoly = "-x^2".parse().unwrap();
        assert_eq!(f, BPoly::from_terms(&[(-1, 2, 0)]));
    }

    #[test]
    fn display_round_trips() {
        let f: BPoly = "x^3 - 3*x*y^2 + y - 7".parse().unwrap();
        let again: BPoly = f.to_string().parse().unwrap();
        assert_eq!(f, again);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "y^2 - z".parse::<BPoly>(),
            Err(ParseError::UnexpectedChar { ch: 'z', .. })
        ));
        assert_eq!("x +".parse::<BPoly>(), Err(ParseError::UnexpectedEnd));
        assert_eq!("x/0".parse::<BPoly>(), Err(ParseError::DivisionByZero { pos: 2 }));
        assert_eq!("y - x".parse::<UPoly>(), Err(ParseError::NotUnivariate));
    }

    #[test]
    fn nesting_is_bounded() {
        let ok = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(ok.parse::<BPoly>(), Ok(BPoly::monomial(BigRational::one(), 1, 0)));
        let deep = "(".repeat(200_000) + "x";
        assert_eq!(
            deep.parse::<BPoly>(),
            Err(ParseError::TooDeep { pos: MAX_DEPTH })
        );
        let signs = "-".repeat(100_001) + "y";
        assert_eq!(signs.parse::<BPoly>(), Ok(BPoly::monomial(-BigRational::one(), 0, 1)));
    }

    #[test]
    fn rational_literals() {
        assert_eq!(
            parse_rational("-7/2").unwrap(),
            BigRational::new((-7).into(), 2.into())
        );
        assert_eq!(
            parse_rational("0.125").unwrap(),
            BigRational::new(1.into(), 8.into())
        );
        assert!(parse_rational("x").is_err());
    }
}
