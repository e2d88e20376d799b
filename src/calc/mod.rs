use std::ops::RangeInclusive;

mod ops;

pub use self::ops::{CalcError, Operator};

pub const OPERAND_RANGE: RangeInclusive<f64> = 0.0..=15.0;

pub const PLACEHOLDER: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperandPair {
    pub first: f64,
    pub second: f64,
}

impl OperandPair {
    pub fn new(first: f64, second: f64) -> Option<Self> {
        if in_range(first) && in_range(second) {
            Some(Self { first, second })
        } else {
            None
        }
    }
}

pub fn in_range(value: f64) -> bool {
    OPERAND_RANGE.contains(&value)
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }

    let abs = n.abs();
    if abs != 0.0 && (abs < 1E-3 || abs >= 1E7) {
        let sci = format!("{:E}", n);
        match sci.find('E') {
            Some(idx) if !sci[..idx].contains('.') => {
                format!("{}.0{}", &sci[..idx], &sci[idx..])
            }
            _ => sci,
        }
    } else if n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Display {
    operands: OperandPair,
    operation: String,
    result: String,
}

impl Display {
    pub fn new(operands: OperandPair) -> Self {
        let mut display = Self {
            operands,
            operation: String::new(),
            result: String::new(),
        };
        display.reset_labels();
        display
    }

    pub fn operands(&self) -> OperandPair {
        self.operands
    }

    pub fn operation_text(&self) -> &str {
        &self.operation
    }

    pub fn result_text(&self) -> &str {
        &self.result
    }

    pub fn set_operands(&mut self, operands: OperandPair) {
        self.operands = operands;
        self.reset_labels();
    }

    pub fn press(&mut self, op: Operator) -> Result<f64, CalcError> {
        let OperandPair { first, second } = self.operands;

        match op.apply(first, second) {
            Ok(value) => {
                self.operation = format!(
                    "Operation: {} {} {}",
                    format_number(first),
                    op.symbol(),
                    format_number(second)
                );
                self.result = format!("Result: {}", format_number(value));
                Ok(value)
            }
            Err(err) => {
                self.operation = format!("Error: {}", err);
                self.result = format!("Result: {}", PLACEHOLDER);
                Err(err)
            }
        }
    }

    fn reset_labels(&mut self) {
        self.operation = format!("Operation: {}", PLACEHOLDER);
        self.result = format!("Result: {}", PLACEHOLDER);
    }
}
