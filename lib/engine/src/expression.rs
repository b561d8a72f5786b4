use farmgraph_model::{
    term_str, Literal, Term, ThinError, ThinResult, TypedValueRef, Variable,
};
use std::cmp::Ordering;

/// A filter expression.
///
/// Expressions are evaluated against a single solution. Evaluation either produces a term or
/// raises an expected [ThinError], e.g., when a variable is unbound or two values cannot be
/// compared. A filter whose expression raises an error rejects the solution.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Variable(Variable),
    Literal(Literal),
    /// `STR(expr)`
    Str(Box<Expression>),
    /// `LCASE(expr)`
    LowerCase(Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
    GreaterOrEqual(Box<Expression>, Box<Expression>),
    /// `BOUND(?var)`
    Bound(Variable),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn str(inner: impl Into<Expression>) -> Self {
        Self::Str(Box::new(inner.into()))
    }

    pub fn lower_case(inner: impl Into<Expression>) -> Self {
        Self::LowerCase(Box::new(inner.into()))
    }

    pub fn equal(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Self {
        Self::Equal(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    pub fn less(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Self {
        Self::Less(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    pub fn greater(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Self {
        Self::Greater(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    pub fn greater_or_equal(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Self {
        Self::GreaterOrEqual(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    pub fn bound(variable: Variable) -> Self {
        Self::Bound(variable)
    }

    #[must_use]
    pub fn and(self, other: impl Into<Expression>) -> Self {
        Self::And(Box::new(self), Box::new(other.into()))
    }

    #[must_use]
    pub fn or(self, other: impl Into<Expression>) -> Self {
        Self::Or(Box::new(self), Box::new(other.into()))
    }

    pub fn not(inner: impl Into<Expression>) -> Self {
        Self::Not(Box::new(inner.into()))
    }

    /// Calls `callback` for every variable that occurs in the expression.
    pub fn for_each_variable(&self, callback: &mut impl FnMut(&Variable)) {
        match self {
            Self::Variable(variable) | Self::Bound(variable) => callback(variable),
            Self::Literal(_) => {}
            Self::Str(inner) | Self::LowerCase(inner) | Self::Not(inner) => {
                inner.for_each_variable(callback);
            }
            Self::Equal(lhs, rhs)
            | Self::Less(lhs, rhs)
            | Self::Greater(lhs, rhs)
            | Self::GreaterOrEqual(lhs, rhs)
            | Self::And(lhs, rhs)
            | Self::Or(lhs, rhs) => {
                lhs.for_each_variable(callback);
                rhs.for_each_variable(callback);
            }
        }
    }

    /// Evaluates the expression. `lookup` returns the term bound to a variable.
    pub fn evaluate<'a>(
        &self,
        lookup: &impl Fn(&Variable) -> Option<&'a Term>,
    ) -> ThinResult<Term> {
        match self {
            Self::Variable(variable) => lookup(variable).cloned().ok_or(ThinError {}),
            Self::Literal(literal) => Ok(literal.clone().into()),
            Self::Str(inner) => {
                let term = inner.evaluate(lookup)?;
                let value = term_str(term.as_ref()).ok_or(ThinError {})?;
                Ok(Literal::new_simple_literal(value).into())
            }
            Self::LowerCase(inner) => match inner.evaluate(lookup)? {
                Term::Literal(literal) => lower_case(&literal).map(Into::into),
                _ => ThinError::expected(),
            },
            Self::Equal(lhs, rhs) => {
                let (lhs, rhs) = (lhs.evaluate(lookup)?, rhs.evaluate(lookup)?);
                let equal = typed_value(&lhs)?.equals(&typed_value(&rhs)?)?;
                Ok(Literal::from(equal).into())
            }
            Self::Less(lhs, rhs) => compare(lhs, rhs, lookup, Ordering::is_lt),
            Self::Greater(lhs, rhs) => compare(lhs, rhs, lookup, Ordering::is_gt),
            Self::GreaterOrEqual(lhs, rhs) => compare(lhs, rhs, lookup, Ordering::is_ge),
            Self::Bound(variable) => Ok(Literal::from(lookup(variable).is_some()).into()),
            Self::And(lhs, rhs) => {
                // An error on one side is masked if the other side is false.
                match (
                    lhs.effective_boolean_value(lookup),
                    rhs.effective_boolean_value(lookup),
                ) {
                    (Ok(false), _) | (_, Ok(false)) => Ok(Literal::from(false).into()),
                    (Ok(true), Ok(true)) => Ok(Literal::from(true).into()),
                    _ => ThinError::expected(),
                }
            }
            Self::Or(lhs, rhs) => {
                // An error on one side is masked if the other side is true.
                match (
                    lhs.effective_boolean_value(lookup),
                    rhs.effective_boolean_value(lookup),
                ) {
                    (Ok(true), _) | (_, Ok(true)) => Ok(Literal::from(true).into()),
                    (Ok(false), Ok(false)) => Ok(Literal::from(false).into()),
                    _ => ThinError::expected(),
                }
            }
            Self::Not(inner) => {
                let value = inner.effective_boolean_value(lookup)?;
                Ok(Literal::from(!value).into())
            }
        }
    }

    /// Evaluates the expression and computes the effective boolean value of the result.
    pub fn effective_boolean_value<'a>(
        &self,
        lookup: &impl Fn(&Variable) -> Option<&'a Term>,
    ) -> ThinResult<bool> {
        let term = self.evaluate(lookup)?;
        typed_value(&term)?.effective_boolean_value()
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::Literal(Literal::new_simple_literal(value))
    }
}

fn typed_value(term: &Term) -> ThinResult<TypedValueRef<'_>> {
    TypedValueRef::try_from_term(term.as_ref())
}

fn compare<'a>(
    lhs: &Expression,
    rhs: &Expression,
    lookup: &impl Fn(&Variable) -> Option<&'a Term>,
    accept: impl Fn(Ordering) -> bool,
) -> ThinResult<Term> {
    let (lhs, rhs) = (lhs.evaluate(lookup)?, rhs.evaluate(lookup)?);
    let ordering = typed_value(&lhs)?.compare(&typed_value(&rhs)?)?;
    Ok(Literal::from(accept(ordering)).into())
}

fn lower_case(literal: &Literal) -> ThinResult<Literal> {
    match TypedValueRef::try_from_literal(literal.as_ref())? {
        TypedValueRef::String(value) => {
            let value = value.to_lowercase();
            Ok(match literal.language() {
                Some(language) => Literal::new_language_tagged_literal_unchecked(value, language),
                None => Literal::new_simple_literal(value),
            })
        }
        _ => ThinError::expected(),
    }
}
