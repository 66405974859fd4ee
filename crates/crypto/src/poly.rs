//! Polynomial evaluation and Lagrange interpolation at zero.
//!
//! The same code runs over three domains: the scalar field itself (private
//! keys), and G1/G2 under scalar multiplication (public keys, signatures).
//! Multiplying by the generator is a homomorphism, so evaluating a polynomial
//! of public keys at `x` gives the public key of the private-key polynomial
//! evaluated at `x`, and interpolation commutes the same way.
//!
//! Coefficients are given in ascending degree: index 0 is the constant term.

use std::ops::{Add, Mul};

use bls12_381::Scalar;
use ff::Field;

use crate::error::{Result, ThresholdError};

/// Anything that can serve as a polynomial coefficient over the scalar field.
pub trait Coefficient: Copy + Add<Output = Self> + Mul<Scalar, Output = Self> {}

impl<T> Coefficient for T where T: Copy + Add<Output = T> + Mul<Scalar, Output = T> {}

/// Evaluate `c[0] + c[1]·x + ... + c[k-1]·x^(k-1)` with Horner's method.
pub fn evaluate<T: Coefficient>(coefficients: &[T], x: &Scalar) -> Result<T> {
    let (last, rest) = coefficients
        .split_last()
        .ok_or(ThresholdError::InvalidInput("polynomial has no coefficients"))?;

    Ok(rest
        .iter()
        .rev()
        .fold(*last, |acc, coeff| acc * *x + *coeff))
}

/// Lagrange basis coefficients for evaluation at zero.
///
/// λ_i = Π_{j≠i} x_j / (x_j - x_i)
///
/// All points must be non-zero and pairwise distinct.
pub fn lagrange_coefficients_at_zero(points: &[Scalar]) -> Result<Vec<Scalar>> {
    if points.is_empty() {
        return Err(ThresholdError::InvalidInput("no interpolation points"));
    }

    // O(n^2) is fine for quorum sizes.
    for (i, x_i) in points.iter().enumerate() {
        if bool::from(x_i.is_zero()) {
            return Err(ThresholdError::DegenerateInterpolation);
        }
        if points[i + 1..].iter().any(|x_j| x_j == x_i) {
            return Err(ThresholdError::DegenerateInterpolation);
        }
    }

    let mut lambdas = Vec::with_capacity(points.len());
    for (i, x_i) in points.iter().enumerate() {
        let mut numerator = Scalar::ONE;
        let mut denominator = Scalar::ONE;

        for (j, x_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator *= x_j;
            denominator *= x_j - x_i;
        }

        let denom_inv = Option::<Scalar>::from(denominator.invert()).ok_or(
            ThresholdError::ArithmeticFailure("Lagrange denominator is not invertible"),
        )?;
        lambdas.push(numerator * denom_inv);
    }

    Ok(lambdas)
}

/// Recover the constant term of the polynomial through `(points[i], values[i])`.
///
/// Fewer samples than the polynomial's degree + 1 still produce a value; it
/// just is not the constant term.
pub fn interpolate_at_zero<T: Coefficient>(points: &[Scalar], values: &[T]) -> Result<T> {
    if points.len() != values.len() {
        return Err(ThresholdError::InvalidInput(
            "interpolation points and values differ in length",
        ));
    }

    let lambdas = lagrange_coefficients_at_zero(points)?;

    let mut terms = values
        .iter()
        .zip(lambdas.iter())
        .map(|(value, lambda)| *value * *lambda);
    let first = terms
        .next()
        .ok_or(ThresholdError::InvalidInput("no interpolation values"))?;

    Ok(terms.fold(first, |acc, term| acc + term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bls12_381::{G1Projective, G2Projective};
    use rand::rngs::OsRng;

    fn scalars(values: &[u64]) -> Vec<Scalar> {
        values.iter().map(|v| Scalar::from(*v)).collect()
    }

    #[test]
    fn test_polynomial_evaluation() {
        // f(x) = 5 + 3x + 2x^2
        let coeffs = scalars(&[5, 3, 2]);

        assert_eq!(evaluate(&coeffs, &Scalar::ZERO).unwrap(), Scalar::from(5u64));
        assert_eq!(evaluate(&coeffs, &Scalar::ONE).unwrap(), Scalar::from(10u64));
        assert_eq!(
            evaluate(&coeffs, &Scalar::from(2u64)).unwrap(),
            Scalar::from(19u64)
        );
    }

    #[test]
    fn test_constant_polynomial() {
        let coeffs = scalars(&[42]);
        assert_eq!(
            evaluate(&coeffs, &Scalar::from(1000u64)).unwrap(),
            Scalar::from(42u64)
        );
    }

    #[test]
    fn test_evaluate_empty_fails() {
        let coeffs: Vec<Scalar> = Vec::new();
        assert!(matches!(
            evaluate(&coeffs, &Scalar::ONE),
            Err(ThresholdError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_coefficient_order_matters() {
        let forward = scalars(&[1, 2, 3]);
        let backward = scalars(&[3, 2, 1]);
        let x = Scalar::from(10u64);
        assert_ne!(
            evaluate(&forward, &x).unwrap(),
            evaluate(&backward, &x).unwrap()
        );
    }

    #[test]
    fn test_group_evaluation_commutes_with_generator() {
        let coeffs: Vec<Scalar> = (0..4).map(|_| Scalar::random(&mut OsRng)).collect();
        let g1_coeffs: Vec<G1Projective> =
            coeffs.iter().map(|c| G1Projective::generator() * c).collect();
        let g2_coeffs: Vec<G2Projective> =
            coeffs.iter().map(|c| G2Projective::generator() * c).collect();
        let x = Scalar::random(&mut OsRng);

        let y = evaluate(&coeffs, &x).unwrap();
        assert_eq!(
            evaluate(&g1_coeffs, &x).unwrap(),
            G1Projective::generator() * y
        );
        assert_eq!(
            evaluate(&g2_coeffs, &x).unwrap(),
            G2Projective::generator() * y
        );
    }

    #[test]
    fn test_lagrange_coefficients() {
        // At x=0 through x = 1, 2, 3: λ = 3, -3, 1.
        let lambdas = lagrange_coefficients_at_zero(&scalars(&[1, 2, 3])).unwrap();

        assert_eq!(lambdas[0], Scalar::from(3u64));
        assert_eq!(lambdas[1], -Scalar::from(3u64));
        assert_eq!(lambdas[2], Scalar::ONE);

        let sum: Scalar = lambdas.iter().sum();
        assert_eq!(sum, Scalar::ONE);
    }

    #[test]
    fn test_lagrange_degenerate_points() {
        assert_eq!(
            lagrange_coefficients_at_zero(&scalars(&[1, 2, 1])),
            Err(ThresholdError::DegenerateInterpolation)
        );
        assert_eq!(
            lagrange_coefficients_at_zero(&scalars(&[0, 2])),
            Err(ThresholdError::DegenerateInterpolation)
        );
        assert!(matches!(
            lagrange_coefficients_at_zero(&[]),
            Err(ThresholdError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_interpolation_recovers_constant_term() {
        let coeffs: Vec<Scalar> = (0..3).map(|_| Scalar::random(&mut OsRng)).collect();
        let points = scalars(&[7, 11, 13, 17, 19]);
        let values: Vec<Scalar> = points
            .iter()
            .map(|x| evaluate(&coeffs, x).unwrap())
            .collect();

        assert_eq!(
            interpolate_at_zero(&points[..3], &values[..3]).unwrap(),
            coeffs[0]
        );
        assert_eq!(
            interpolate_at_zero(&points[2..], &values[2..]).unwrap(),
            coeffs[0]
        );
        assert_eq!(interpolate_at_zero(&points, &values).unwrap(), coeffs[0]);

        // Below threshold the result is well-defined but wrong.
        assert_ne!(
            interpolate_at_zero(&points[..2], &values[..2]).unwrap(),
            coeffs[0]
        );
    }

    #[test]
    fn test_group_interpolation_matches_scalar() {
        let coeffs: Vec<Scalar> = (0..3).map(|_| Scalar::random(&mut OsRng)).collect();
        let points = scalars(&[2, 4, 8]);
        let values: Vec<Scalar> = points
            .iter()
            .map(|x| evaluate(&coeffs, x).unwrap())
            .collect();
        let g1_values: Vec<G1Projective> =
            values.iter().map(|v| G1Projective::generator() * v).collect();

        let secret = interpolate_at_zero(&points, &values).unwrap();
        let public = interpolate_at_zero(&points, &g1_values).unwrap();
        assert_eq!(public, G1Projective::generator() * secret);
    }

    #[test]
    fn test_single_point_interpolation() {
        let value = G2Projective::generator() * Scalar::from(99u64);
        assert_eq!(
            interpolate_at_zero(&scalars(&[5]), &[value]).unwrap(),
            value
        );
    }

    #[test]
    fn test_interpolation_length_mismatch() {
        let values = scalars(&[1, 2]);
        assert!(matches!(
            interpolate_at_zero(&scalars(&[1, 2, 3]), &values),
            Err(ThresholdError::InvalidInput(_))
        ));
    }
}
