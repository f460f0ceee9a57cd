pub mod check_in_record;
pub mod ledger_state;

pub use check_in_record::*;
pub use ledger_state::*;
