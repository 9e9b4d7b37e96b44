//! Evaluations: stored scoring results and the per-(user, company, role)
//! competency aggregate derived from them.

pub mod competency;
pub mod handlers;
