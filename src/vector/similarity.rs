//! Vector Arithmetic
//!
//! Dot products, norms and element-wise combination of embedding vectors.

/// Element-wise operations on embedding slices
pub trait VectorOps {
    fn dot(&self, other: &Self) -> f32;
    fn magnitude(&self) -> f32;
    fn normalize(&mut self) -> f32;
}

impl VectorOps for [f32] {
    #[inline]
    fn dot(&self, other: &Self) -> f32 {
        dot_product(self, other)
    }

    #[inline]
    fn magnitude(&self) -> f32 {
        magnitude(self)
    }

    fn normalize(&mut self) -> f32 {
        normalize(self)
    }
}

/// Compute dot product of two vectors
///
/// Uses unrolled loop for better CPU performance.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len().min(b.len());
    let mut sum = 0.0f32;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    let remainder = len % 4;

    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] * b[idx];
        sum += a[idx + 1] * b[idx + 1];
        sum += a[idx + 2] * b[idx + 2];
        sum += a[idx + 3] * b[idx + 3];
    }

    for i in (len - remainder)..len {
        sum += a[i] * b[i];
    }

    sum
}

/// Euclidean norm
#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Divide every element by the vector's norm and return that norm.
///
/// The division is unconditional: a zero vector becomes all NaN. Callers
/// that want to reject such vectors inspect the returned norm.
pub fn normalize(v: &mut [f32]) -> f32 {
    let mag = magnitude(v);
    for x in v.iter_mut() {
        *x /= mag;
    }
    mag
}

/// `a + b`
pub fn add(a: &[f32], b: &[f32]) -> Vec<f32> {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// `a - b`
pub fn sub(a: &[f32], b: &[f32]) -> Vec<f32> {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((dot_product(&a, &b) - 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_empty() {
        assert_eq!(dot_product(&[], &[]), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0, 0.0];
        let norm = normalize(&mut v);
        assert!((norm - 5.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert!(v[2].abs() < 1e-6);
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_is_nan() {
        let mut v = vec![0.0f32, 0.0];
        let norm = v.normalize();
        assert_eq!(norm, 0.0);
        assert!(v.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_add_sub() {
        let a = [1.0, 2.0];
        let b = [0.5, 4.0];
        assert_eq!(add(&a, &b), vec![1.5, 6.0]);
        assert_eq!(sub(&a, &b), vec![0.5, -2.0]);
    }
}
