use crate::{ThinError, ThinResult};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNodeRef, LiteralRef, NamedNodeRef, TermRef};
use oxsdatatypes::{Boolean, Double};
use std::cmp::Ordering;
use std::str::FromStr;

/// The value of a term as seen by filter expressions.
///
/// Numeric literals of any XSD numeric type are read as [f64]. A numeric literal with an invalid
/// lexical form has no value; creating a [TypedValueRef] for it raises a [ThinError].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValueRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    BlankNode(BlankNodeRef<'a>),
    Boolean(bool),
    Numeric(f64),
    /// A simple literal, a `xsd:string` or a language-tagged string.
    String(&'a str),
    /// Any other literal (e.g., `xsd:gYear`), compared by lexical form and datatype.
    OtherLiteral(LiteralRef<'a>),
}

impl<'a> TypedValueRef<'a> {
    /// Computes the value of `term`.
    pub fn try_from_term(term: TermRef<'a>) -> ThinResult<Self> {
        match term {
            TermRef::NamedNode(node) => Ok(Self::NamedNode(node)),
            TermRef::BlankNode(node) => Ok(Self::BlankNode(node)),
            TermRef::Literal(literal) => Self::try_from_literal(literal),
            #[allow(unreachable_patterns, reason = "Only reachable with RDF-star")]
            _ => ThinError::expected(),
        }
    }

    /// Computes the value of `literal`.
    pub fn try_from_literal(literal: LiteralRef<'a>) -> ThinResult<Self> {
        let datatype = literal.datatype();
        if datatype == xsd::STRING || datatype == rdf::LANG_STRING {
            return Ok(Self::String(literal.value()));
        }
        if datatype == xsd::BOOLEAN {
            let value = Boolean::from_str(literal.value())?;
            return Ok(Self::Boolean(value.into()));
        }
        if is_numeric_datatype(datatype) {
            return Ok(Self::Numeric(parse_numeric(literal.value())?));
        }
        Ok(Self::OtherLiteral(literal))
    }

    /// Compares two values.
    ///
    /// Only numeric values can be compared to numeric values and only strings to strings. Any other
    /// combination raises an expected error.
    pub fn compare(&self, other: &Self) -> ThinResult<Ordering> {
        match (self, other) {
            (Self::Numeric(lhs), Self::Numeric(rhs)) => lhs.partial_cmp(rhs).ok_or(ThinError {}),
            (Self::String(lhs), Self::String(rhs)) => Ok(lhs.cmp(rhs)),
            (Self::Boolean(lhs), Self::Boolean(rhs)) => Ok(lhs.cmp(rhs)),
            _ => ThinError::expected(),
        }
    }

    /// Tests two values for equality.
    ///
    /// Values of different kinds are never equal, except for literals of unknown datatypes that
    /// cannot be decided. These raise an expected error.
    pub fn equals(&self, other: &Self) -> ThinResult<bool> {
        match (self, other) {
            (Self::Numeric(lhs), Self::Numeric(rhs)) => Ok(lhs == rhs),
            (Self::String(lhs), Self::String(rhs)) => Ok(lhs == rhs),
            (Self::Boolean(lhs), Self::Boolean(rhs)) => Ok(lhs == rhs),
            (Self::NamedNode(lhs), Self::NamedNode(rhs)) => Ok(lhs == rhs),
            (Self::BlankNode(lhs), Self::BlankNode(rhs)) => Ok(lhs == rhs),
            (Self::OtherLiteral(lhs), Self::OtherLiteral(rhs)) => {
                if lhs == rhs {
                    Ok(true)
                } else if lhs.datatype() == rhs.datatype() {
                    Ok(false)
                } else {
                    ThinError::expected()
                }
            }
            (Self::OtherLiteral(_), _) | (_, Self::OtherLiteral(_)) => ThinError::expected(),
            _ => Ok(false),
        }
    }

    /// Returns the effective boolean value.
    pub fn effective_boolean_value(&self) -> ThinResult<bool> {
        match self {
            Self::Boolean(value) => Ok(*value),
            Self::Numeric(value) => Ok(*value != 0.0 && !value.is_nan()),
            Self::String(value) => Ok(!value.is_empty()),
            _ => ThinError::expected(),
        }
    }
}

/// Returns the numeric value of `term`, if it is a literal with a numeric datatype and a valid
/// lexical form.
pub fn numeric_value(term: TermRef<'_>) -> Option<f64> {
    match TypedValueRef::try_from_term(term) {
        Ok(TypedValueRef::Numeric(value)) => Some(value),
        _ => None,
    }
}

/// Returns the lexical form of a literal or the IRI of a named node. This is the value of the
/// `STR` function.
pub fn term_str(term: TermRef<'_>) -> Option<&str> {
    match term {
        TermRef::NamedNode(node) => Some(node.as_str()),
        TermRef::Literal(literal) => Some(literal.value()),
        _ => None,
    }
}

/// Returns the part of `iri` after the last `#` or `/`.
///
/// ```
/// use farmgraph_model::local_name;
///
/// assert_eq!(local_name("http://example.org/smart-farming#T1_R1"), "T1_R1");
/// assert_eq!(local_name("http://example.org/plots/T2_R4"), "T2_R4");
/// ```
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

fn parse_numeric(value: &str) -> ThinResult<f64> {
    let value = Double::from_str(value.trim())?;
    Ok(value.into())
}

fn is_numeric_datatype(datatype: NamedNodeRef<'_>) -> bool {
    [
        xsd::FLOAT,
        xsd::DOUBLE,
        xsd::DECIMAL,
        xsd::INTEGER,
        xsd::INT,
        xsd::LONG,
        xsd::SHORT,
        xsd::BYTE,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .contains(&datatype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    #[test]
    fn float_literal_is_numeric() {
        let literal = Literal::new_typed_literal("1110.99", xsd::FLOAT);
        assert_eq!(numeric_value(literal.as_ref().into()), Some(1110.99));
    }

    #[test]
    fn integer_literal_is_numeric() {
        let literal = Literal::new_typed_literal("5000", xsd::INTEGER);
        assert_eq!(numeric_value(literal.as_ref().into()), Some(5000.0));
    }

    #[test]
    fn invalid_numeric_literal_has_no_value() {
        let literal = Literal::new_typed_literal("n/a", xsd::FLOAT);
        assert_eq!(numeric_value(literal.as_ref().into()), None);
        assert!(TypedValueRef::try_from_literal(literal.as_ref()).is_err());
    }

    #[test]
    fn simple_literal_is_not_numeric() {
        let literal = Literal::new_simple_literal("900");
        assert_eq!(numeric_value(literal.as_ref().into()), None);
    }

    #[test]
    fn compare_string_with_number_is_error() {
        let lhs = TypedValueRef::String("1000");
        let rhs = TypedValueRef::Numeric(1000.0);
        assert_eq!(lhs.compare(&rhs), ThinError::expected());
    }

    #[test]
    fn gyear_literals_compare_by_lexical_form() {
        let lhs = Literal::new_typed_literal("2015", xsd::G_YEAR);
        let rhs = Literal::new_typed_literal("2016", xsd::G_YEAR);
        let lhs = TypedValueRef::try_from_literal(lhs.as_ref()).unwrap();
        let rhs = TypedValueRef::try_from_literal(rhs.as_ref()).unwrap();
        assert_eq!(lhs.equals(&lhs), Ok(true));
        assert_eq!(lhs.equals(&rhs), Ok(false));
    }

    #[test]
    fn local_name_without_separator_is_identity() {
        assert_eq!(local_name("T1_R1"), "T1_R1");
    }
}
