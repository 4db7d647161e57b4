use crate::operand::{Condition, LiteralKind, Operand, OperandKind, Step};
use crate::{OperandError, Register};
use data_sheet::OperandDescriptor;

/// Operand names starting with this marker name an interrupt (`RST`) vector in hex.
pub const INTERRUPT_MARKER: char = '$';

pub const MAX_BIT_INDEX: u8 = 7;

const CONDITIONS: &[(&str, Condition)] = &[
    ("CY", Condition::Carry),
    ("NC", Condition::NoCarry),
    ("Z", Condition::Zero),
    ("NZ", Condition::NotZero),
];

const LITERALS: &[(&str, LiteralKind)] = &[
    ("n8", LiteralKind::Data8),
    ("n16", LiteralKind::Data16),
    ("a8", LiteralKind::IoOffset8),
    ("a16", LiteralKind::Address16),
    ("e8", LiteralKind::Relative8),
];

/// Map an operand name to the kind of operand it represents.
///
/// The checks run in a fixed order and the first one that matches wins:
///
/// 1. `$` followed by hex digits is an interrupt vector.
/// 2. A number (`7`, `-1`, `+3`, `1.5`) is a bit index and must be a whole number from 0 to 7.
/// 3. `CY`, `NC`, `Z` and `NZ` are conditions.
/// 4. `n8`, `n16`, `a8`, `a16` and `e8` are literals.
/// 5. Anything else is a register, kept verbatim even when it is not a known register name.
pub fn classify_name(name: &str) -> Result<OperandKind, OperandError> {
    if let Some(vector) = name.strip_prefix(INTERRUPT_MARKER) {
        if vector.is_empty() || !vector.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(OperandError::MalformedInterruptVector(name.to_owned()));
        }
        return u16::from_str_radix(vector, 16)
            .map(OperandKind::Interrupt)
            .map_err(|_| OperandError::MalformedInterruptVector(name.to_owned()));
    }

    if is_numeric(name) {
        return match name.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 && (0.0..=MAX_BIT_INDEX as f64).contains(&value) => {
                Ok(OperandKind::Bit(value as u8))
            }
            _ => Err(OperandError::BitIndexOutOfRange(name.to_owned())),
        };
    }

    if let Some((_, condition)) = CONDITIONS.iter().find(|(token, _)| *token == name) {
        return Ok(OperandKind::Condition(*condition));
    }

    if let Some((_, literal)) = LITERALS.iter().find(|(token, _)| *token == name) {
        return Ok(OperandKind::Literal(*literal));
    }

    Ok(OperandKind::Register(Register::from(name)))
}

/// Decimal number with an optional sign and fraction. Exponents, `inf` and `NaN` are names.
fn is_numeric(name: &str) -> bool {
    let unsigned = name.strip_prefix(&['+', '-'][..]).unwrap_or(name);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

pub fn classify(descriptor: &OperandDescriptor) -> Result<OperandKind, OperandError> {
    classify_name(&descriptor.name)
}

/// Classify the descriptor and carry over its addressing details.
pub fn classify_operand(descriptor: &OperandDescriptor) -> Result<Operand, OperandError> {
    let kind = classify(descriptor)?;

    let step = match (descriptor.increment, descriptor.decrement) {
        (false, false) => None,
        (true, false) => Some(Step::Increment),
        (false, true) => Some(Step::Decrement),
        (true, true) => return Err(OperandError::ConflictingStep(descriptor.name.clone())),
    };

    Ok(Operand {
        kind,
        immediate: descriptor.immediate,
        step,
    })
}
