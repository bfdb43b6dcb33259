//! matrix-cli: the interactive front end of the matrix solver.
//!
//! `solver` holds the caller-side state the engine deliberately does not
//! keep (dimensions, operands, last result and error), coerces raw cell
//! input and renders results. `preferences` persists the light/dark theme.
pub mod preferences;
pub mod solver;
