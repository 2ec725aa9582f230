#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rule that was applied while simplifying an expression.
///
/// Steps are reported in the order the rules were applied, which is bottom-up: the children of a
/// node are simplified before the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// `a+0 = a`
    AddZero,

    /// Numbers in a sum were added together.
    FoldSum,

    /// `a*0 = 0`
    MultiplyZero,

    /// `a*1 = a`
    MultiplyOne,

    /// Numbers in a product were multiplied together.
    FoldProduct,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `ab+ac = a(b+c)`
    FactorCommon,

    /// `2a+4b = 2(a+2b)`
    FactorCoefficient,

    /// `a*b/a = b`
    CancelFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// A number raised to a number was computed exactly.
    FoldPower,

    /// `log_1(a) = 0`, where the logarithm is undefined.
    LogOneBase,

    /// `log_b(1) = 0`
    LogOne,

    /// `log_b(b) = 1`
    LogSame,

    /// The logarithm of a number to a number base was computed exactly.
    FoldLog,

    /// `log_b(a) = ln(a)/ln(b)`
    ChangeLogBase,

    /// `log_b(a^c) = c*log_b(a)`
    LogPower,

    /// `log_b(ac) = log_b(a)+log_b(c)`
    LogProduct,

    /// A trigonometric function of a multiple of `pi/4` was computed exactly.
    TrigSpecialAngle,

    /// A trigonometric function was evaluated at an angle where it is undefined.
    TrigUndefined,

    /// An inverse trigonometric function of a special value was computed exactly.
    InverseTrig,

    /// An inverse trigonometric function was evaluated outside of its domain.
    InverseTrigUndefined,
}
