//! Interview threads: the question/answer loop between the generated
//! persona and the candidate, ending in an evaluation.

pub mod handlers;
pub mod machine;
pub mod threads;
