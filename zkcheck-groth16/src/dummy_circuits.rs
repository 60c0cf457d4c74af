// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_ff::PrimeField;
use ark_relations::{
    lc,
    r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError, Variable},
};

/// A dummy circuit that checks a multiplication constraint between some of its inputs
/// as well as a parametrized number of dummy constraints. It has one public input `a * b`.
#[derive(Debug, Copy, Clone)]
pub struct DummyCircuit<F: PrimeField> {
    /// the first input to the circuit
    pub a: Option<F>,
    /// the second input to the circuit
    pub b: Option<F>,
    /// The number of variables to the circuit
    pub num_variables: usize,
    /// the number of constraints to the circuit
    pub num_constraints: usize,
}

impl<F: PrimeField> ConstraintSynthesizer<F> for DummyCircuit<F> {
    // We'll be proving a relationship involving the product c of a & b.
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let a = cs.new_witness_variable(|| self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b = cs.new_witness_variable(|| self.b.ok_or(SynthesisError::AssignmentMissing))?;
        let c = cs.new_input_variable(|| {
            let a = self.a.ok_or(SynthesisError::AssignmentMissing)?;
            let b = self.b.ok_or(SynthesisError::AssignmentMissing)?;

            Ok(a * b)
        })?;

        // a, b, c are above, let's define the rest.
        for _ in 0..self.num_variables.saturating_sub(3) {
            let _ = cs.new_witness_variable(|| self.a.ok_or(SynthesisError::AssignmentMissing))?;
        }

        for _ in 0..self.num_constraints.max(1) {
            cs.enforce_constraint(lc!() + a, lc!() + b, lc!() + c)?;
        }

        Ok(())
    }
}

/// Proves knowledge of `a` and `b` with `a * b = c` for a public `c`.
#[derive(Debug, Copy, Clone)]
pub struct Multiplier<F: PrimeField> {
    /// The first private factor.
    pub a: Option<F>,
    /// The second private factor.
    pub b: Option<F>,
}

impl<F: PrimeField> ConstraintSynthesizer<F> for Multiplier<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let c = cs.new_input_variable(|| {
            Ok(self.a.ok_or(SynthesisError::AssignmentMissing)?
                * self.b.ok_or(SynthesisError::AssignmentMissing)?)
        })?;
        let a = cs.new_witness_variable(|| self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b = cs.new_witness_variable(|| self.b.ok_or(SynthesisError::AssignmentMissing))?;
        cs.enforce_constraint(lc!() + a, lc!() + b, lc!() + c)?;
        Ok(())
    }
}

/// Proves knowledge of `a`, `b` and `c` with `a * b * c = d` for a public `d`.
#[derive(Debug, Copy, Clone)]
pub struct Multiplier3<F: PrimeField> {
    /// The first private factor.
    pub a: Option<F>,
    /// The second private factor.
    pub b: Option<F>,
    /// The third private factor.
    pub c: Option<F>,
}

impl<F: PrimeField> ConstraintSynthesizer<F> for Multiplier3<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let ab_value = self.a.zip(self.b).map(|(a, b)| a * b);
        let d = cs.new_input_variable(|| {
            Ok(ab_value.ok_or(SynthesisError::AssignmentMissing)?
                * self.c.ok_or(SynthesisError::AssignmentMissing)?)
        })?;
        let a = cs.new_witness_variable(|| self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b = cs.new_witness_variable(|| self.b.ok_or(SynthesisError::AssignmentMissing))?;
        let c = cs.new_witness_variable(|| self.c.ok_or(SynthesisError::AssignmentMissing))?;
        let ab = cs.new_witness_variable(|| ab_value.ok_or(SynthesisError::AssignmentMissing))?;
        cs.enforce_constraint(lc!() + a, lc!() + b, lc!() + ab)?;
        cs.enforce_constraint(lc!() + ab, lc!() + c, lc!() + d)?;
        Ok(())
    }
}

/// A circuit whose public inputs are copies of private witnesses, one constraint
/// `x_i * 1 = w_i` per input. Used for keys with an arbitrary number of public inputs.
#[derive(Debug, Clone)]
pub struct InputEcho<F: PrimeField> {
    /// The values of the public inputs, or `None` for each when generating parameters.
    pub values: Vec<Option<F>>,
}

impl<F: PrimeField> InputEcho<F> {
    /// A circuit with the given public inputs.
    pub fn new(values: &[F]) -> Self {
        InputEcho {
            values: values.iter().copied().map(Some).collect(),
        }
    }
}

impl<F: PrimeField> ConstraintSynthesizer<F> for InputEcho<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        for value in self.values {
            let x = cs.new_input_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?;
            let w = cs.new_witness_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?;
            cs.enforce_constraint(lc!() + x, lc!() + Variable::One, lc!() + w)?;
        }
        Ok(())
    }
}
