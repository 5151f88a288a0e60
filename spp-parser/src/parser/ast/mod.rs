pub mod binary;
pub mod call;
pub mod expr;
pub mod list;
pub mod literal;
pub mod paren;
pub mod stmt;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::Expr;
pub use list::List;
pub use literal::{LitNum, LitSym, Literal};
pub use paren::Paren;
pub use stmt::{Equation, Stmt};
pub use unary::Unary;
