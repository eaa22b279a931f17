//! Expression nodes.

mod function_call;
mod in_condition;
mod subquery;

pub use function_call::FunctionCall;
pub use in_condition::InCondition;
pub use subquery::Subquery;
