//! JSON configuration for a calculation, with CLI overrides.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use matrix_engine::{Operation, Shape};

use crate::solver::input::{check_shape, inferred_shape, parse_cells_literal, parse_shape, CellInput};
use crate::solver::load_data::read_matrix_file;
use crate::solver::session::{Operand, SolverSession};

/// Inputs for one calculation.
///
/// Any field left out falls back to the initial state of an interactive
/// session: 2x2 zero operands and addition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub operation: Operation,
    pub matrix_a: Option<Vec<Vec<CellInput>>>,
    pub matrix_b: Option<Vec<Vec<CellInput>>>,
    /// `[rows, cols]`; inferred from `matrix_a` when absent.
    pub shape_a: Option<Shape>,
    /// `[rows, cols]`; inferred from `matrix_b` when absent.
    pub shape_b: Option<Shape>,
}

/// Load a solver configuration from a JSON file.
pub fn load_solver_config<P: AsRef<Path>>(path: P) -> Result<SolverConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: SolverConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

impl SolverConfig {
    /// Start from the config file (or defaults) and apply command-line overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_solver_config(path)?,
            None => SolverConfig::default(),
        };

        if let Some(op) = matches.get_one::<String>("operation") {
            config.operation = op.parse().map_err(anyhow::Error::msg)?;
        }

        if let Some(path) = matches.get_one::<PathBuf>("a_file") {
            config.matrix_a = Some(read_matrix_file(path)?);
        } else if let Some(literal) = matches.get_one::<String>("matrix_a") {
            config.matrix_a = Some(parse_cells_literal(literal));
        }

        if let Some(path) = matches.get_one::<PathBuf>("b_file") {
            config.matrix_b = Some(read_matrix_file(path)?);
        } else if let Some(literal) = matches.get_one::<String>("matrix_b") {
            config.matrix_b = Some(parse_cells_literal(literal));
        }

        if let Some(shape) = matches.get_one::<String>("shape_a") {
            config.shape_a = Some(parse_shape(shape)?);
        }
        if let Some(shape) = matches.get_one::<String>("shape_b") {
            config.shape_b = Some(parse_shape(shape)?);
        }

        Ok(config)
    }

    /// Resolve the effective shape of one operand.
    pub fn shape_of(&self, operand: Operand) -> Result<Shape> {
        let (explicit, cells) = match operand {
            Operand::A => (self.shape_a, &self.matrix_a),
            Operand::B => (self.shape_b, &self.matrix_b),
        };
        let shape = match (explicit, cells) {
            (Some(shape), _) => shape,
            (None, Some(cells)) if !cells.is_empty() => inferred_shape(cells),
            _ => (2, 2),
        };
        check_shape(shape).with_context(|| format!("Invalid size for matrix {}", operand.name()))
    }

    /// Build the session this configuration describes.
    pub fn build_session(&self) -> Result<SolverSession> {
        let mut session = SolverSession::with_shapes(
            self.shape_of(Operand::A)?,
            self.shape_of(Operand::B)?,
            self.operation,
        )?;
        if let Some(cells) = &self.matrix_a {
            session.fill(Operand::A, cells);
        }
        if let Some(cells) = &self.matrix_b {
            session.fill(Operand::B, cells);
        }
        Ok(session)
    }
}
