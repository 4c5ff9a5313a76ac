use std::fmt;

/// Binary operators of the expression notation.
///
/// Every operator is written as a single character: `.` for [`And`], `+` for [`Or`]
/// and `#` for [`Xor`]. Negation is not a binary operator and is represented by
/// [`Symbol::Not`] instead.
///
/// [`And`]: Operator::And
/// [`Or`]: Operator::Or
/// [`Xor`]: Operator::Xor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Xor,
}

impl Operator {
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::And),
            '+' => Some(Self::Or),
            '#' => Some(Self::Xor),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::And => '.',
            Self::Or => '+',
            Self::Xor => '#',
        }
    }

    pub const fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a & b,
            Self::Or => a | b,
            Self::Xor => a ^ b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single character of an expression, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Var(char),
    Const(bool),
    Op(Operator),
    Not,
    OpenParen,
    CloseParen,
}

impl Symbol {
    pub const fn from_char(c: char) -> Self {
        match c {
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            '!' => Self::Not,
            '0' => Self::Const(false),
            '1' => Self::Const(true),
            _ => match Operator::from_char(c) {
                Some(op) => Self::Op(op),
                None => Self::Var(c),
            },
        }
    }

    pub const fn is_operand(&self) -> bool {
        matches!(self, Self::Var(_) | Self::Const(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "{v}"),
            Self::Const(b) => write!(f, "{}", u8::from(*b)),
            Self::Op(op) => fmt::Display::fmt(op, f),
            Self::Not => write!(f, "!"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
        }
    }
}
