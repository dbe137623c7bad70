//! Stateless numeric activations shared by the decoder.

/// Sigmoid activation function
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Softmax over a small logit vector.
///
/// The maximum is subtracted before exponentiating so large logits do not
/// overflow; the result is unchanged mathematically.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut out: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = out.iter().sum();
    if sum > 0.0 {
        for v in &mut out {
            *v /= sum;
        }
    }
    out
}

/// Index and value of the largest element. Ties resolve to the first index
/// attaining the maximum; `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some((i, v)),
        }
    }
    best
}
