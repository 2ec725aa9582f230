pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod log;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::{Call, FuncName};
pub use expr::{Expr, Primary};
pub use literal::{Literal, LitNum, LitSym};
pub use log::Log;
pub use paren::Paren;
pub use unary::Unary;
