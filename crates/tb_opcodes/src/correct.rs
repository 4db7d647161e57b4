use crate::Condition;
use data_sheet::OperandDescriptor;
use std::borrow::Cow;

/// Unprefixed control flow opcodes (`JR`, `JP`, `CALL`, `RET`) that can take a condition as
/// their first operand.
///
/// The data sheet names the carry condition `C`, the same as the register. For these codes only,
/// a leading `C` is the condition. Anywhere else (`LDH [C], A`, `RL C`, ...) it stays a register.
/// The set follows the SM83 encoding and has to be derived again for any other instruction set.
pub const CARRY_CONDITION_CODES: &[u8] = &[
    0x18, 0x20, 0x28, 0x30, 0x38, // JR
    0xC2, 0xC3, 0xCA, 0xD2, 0xDA, 0xE9, // JP
    0xC4, 0xCC, 0xCD, 0xD4, 0xDC, // CALL
    0xC0, 0xC8, 0xC9, 0xD0, 0xD8, // RET
];

/// The name of the carry register that collides with the carry condition.
pub const AMBIGUOUS_CARRY: &str = "C";

/// Rewrites the first operand of a fixed set of opcodes from the register name `C` to the carry
/// condition token before the operands are classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbiguityCorrector {
    codes: Vec<u8>,
}

impl AmbiguityCorrector {
    pub fn new(codes: impl IntoIterator<Item = u8>) -> Self {
        let mut codes = codes.into_iter().collect::<Vec<_>>();
        codes.sort_unstable();
        codes.dedup();
        Self { codes }
    }

    pub fn applies_to(&self, code: u8) -> bool {
        self.codes.binary_search(&code).is_ok()
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Returns the operands of `code` with the ambiguity resolved. The input is borrowed back
    /// untouched unless a rewrite was needed.
    pub fn correct<'a>(
        &self,
        code: u8,
        operands: &'a [OperandDescriptor],
    ) -> Cow<'a, [OperandDescriptor]> {
        match operands.first() {
            Some(first) if first.name == AMBIGUOUS_CARRY && self.applies_to(code) => {
                let mut corrected = operands.to_vec();
                corrected[0].name = Condition::Carry.token().to_owned();
                Cow::Owned(corrected)
            }
            _ => Cow::Borrowed(operands),
        }
    }
}

impl Default for AmbiguityCorrector {
    fn default() -> Self {
        Self::new(CARRY_CONDITION_CODES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, OperandKind, Register};

    fn jr_c() -> Vec<OperandDescriptor> {
        vec![
            OperandDescriptor::new("C", true),
            OperandDescriptor::new("e8", true),
        ]
    }

    #[test]
    fn rewrites_carry_for_listed_codes() {
        let corrector = AmbiguityCorrector::default();
        let operands = jr_c();

        let corrected = corrector.correct(0x38, &operands);
        assert!(matches!(corrected, Cow::Owned(_)));
        assert_eq!(corrected[0].name, "CY");
        assert_eq!(corrected[1], operands[1]);
        assert_eq!(
            classify(&corrected[0]),
            Ok(OperandKind::Condition(Condition::Carry))
        );
    }

    #[test]
    fn leaves_other_codes_alone() {
        let corrector = AmbiguityCorrector::default();
        let operands = vec![
            OperandDescriptor::new("C", false),
            OperandDescriptor::new("A", true),
        ];

        // LDH [C], A
        let corrected = corrector.correct(0xE2, &operands);
        assert!(matches!(corrected, Cow::Borrowed(_)));
        assert_eq!(
            classify(&corrected[0]),
            Ok(OperandKind::Register(Register::C))
        );
    }

    #[test]
    fn only_the_exact_name_is_rewritten() {
        let corrector = AmbiguityCorrector::default();
        for name in ["Z", "NC", "c", "CY", "a16"] {
            let operands = vec![OperandDescriptor::new(name, true)];
            let corrected = corrector.correct(0xDA, &operands);
            assert_eq!(corrected[0].name, name);
        }
    }

    #[test]
    fn only_the_first_operand_is_rewritten() {
        let corrector = AmbiguityCorrector::default();
        let operands = vec![
            OperandDescriptor::new("a16", true),
            OperandDescriptor::new("C", true),
        ];
        let corrected = corrector.correct(0xDA, &operands);
        assert_eq!(corrected[1].name, "C");
    }

    #[test]
    fn idempotent() {
        let corrector = AmbiguityCorrector::default();
        for code in 0..=u8::MAX {
            let operands = jr_c();
            let once = corrector.correct(code, &operands).into_owned();
            let twice = corrector.correct(code, &once).into_owned();
            assert_eq!(once, twice, "{:#04X}", code);
        }
    }

    #[test]
    fn empty_operands() {
        let corrector = AmbiguityCorrector::default();
        assert!(corrector.correct(0xC9, &[]).is_empty());
    }

    #[test]
    fn custom_code_set() {
        let corrector = AmbiguityCorrector::new([0x10, 0x10, 0x01]);
        assert_eq!(corrector.codes(), &[0x01_u8, 0x10][..]);
        assert!(corrector.applies_to(0x10));
        assert!(!corrector.applies_to(0x38));
    }
}
