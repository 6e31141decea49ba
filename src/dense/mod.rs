use ndarray::Array2;

use crate::utils::VectorOps;

impl VectorOps for Array2<f64> {
    fn l2_norm(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    fn normalized(&self, guard: f64) -> Array2<f64> {
        self / (self.l2_norm() + guard)
    }

    fn abs_distance(&self, other: &Array2<f64>) -> f64 {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| {
                let diff = a.abs() - b.abs();
                diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_l2_norm() {
        let v = array![[3.0], [4.0]];
        assert_relative_eq!(v.l2_norm(), 5.0);
    }

    #[test]
    fn test_normalized() {
        let v = array![[3.0, 4.0]];
        let unit = v.normalized(1e-16);
        assert_relative_eq!(unit.l2_norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(unit[[0, 0]], 0.6, epsilon = 1e-12);

        // The guard keeps a zero vector finite.
        let zero = Array2::<f64>::zeros((3, 1));
        assert!(zero.normalized(1e-16).iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_abs_distance_ignores_sign() {
        let a = array![[0.6], [-0.8]];
        let b = array![[-0.6], [0.8]];
        assert_eq!(a.abs_distance(&b), 0.0);

        let c = array![[0.8], [0.6]];
        assert_relative_eq!(a.abs_distance(&c), (0.08f64).sqrt(), epsilon = 1e-12);
    }
}
