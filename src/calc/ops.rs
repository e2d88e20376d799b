use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Mult,
    Div,
    Exp,
}

impl Operator {
    // button order, left to right
    pub const ALL: [Operator; 5] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Mult,
        Operator::Div,
        Operator::Exp,
    ];

    pub fn from_char(c: char) -> Option<Operator> {
        use self::Operator::*;

        Some(match c {
            '+' => Plus,
            '-' => Minus,
            '*' => Mult,
            '/' => Div,
            '^' => Exp,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> char {
        use self::Operator::*;

        match self {
            Plus => '+',
            Minus => '-',
            Mult => '*',
            Div => '/',
            Exp => '^',
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64, CalcError> {
        use self::Operator::*;

        Ok(match self {
            Plus => left + right,
            Minus => left - right,
            Mult => left * right,
            Div if right == 0.0 => return Err(CalcError::DivisionByZero),
            Div => left / right,
            Exp => left.powf(right),
        })
    }
}
