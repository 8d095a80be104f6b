//! Forward 8x8 DCT-II.
//!
//! Separable row/column transform using the even/odd butterfly decomposition.
//! Each 1-D pass carries a factor of 1/2, which together with the `c4` term on
//! the DC output gives the orthonormal transform: a flat block of value `v`
//! produces a DC coefficient of `8 * v`, matching the scale the quantization
//! tables expect.

/// cos(k * pi / 16) for k = 0..=7.
#[allow(clippy::excessive_precision)]
const COSINES: [f32; 8] = [
    1.0,
    0.980_785_280_403_230_4,
    0.923_879_532_511_286_7,
    0.831_469_612_302_545_2,
    0.707_106_781_186_547_6,
    0.555_570_233_019_602_2,
    0.382_683_432_365_089_8,
    0.195_090_322_016_128_3,
];

/// In-place forward DCT of a level-shifted 8x8 block in natural order.
pub fn forward_dct(block: &mut [f32; 64]) {
    let c = &COSINES;

    for row in 0..8 {
        let base = row * 8;
        let mut line = [0.0f32; 8];
        line.copy_from_slice(&block[base..base + 8]);
        let out = dct_1d(&line, c);
        block[base..base + 8].copy_from_slice(&out);
    }

    for col in 0..8 {
        let mut line = [0.0f32; 8];
        for (row, value) in line.iter_mut().enumerate() {
            *value = block[row * 8 + col];
        }
        let out = dct_1d(&line, c);
        for (row, &value) in out.iter().enumerate() {
            block[row * 8 + col] = value;
        }
    }
}

#[inline]
fn dct_1d(x: &[f32; 8], c: &[f32; 8]) -> [f32; 8] {
    let s0 = x[0] + x[7];
    let s1 = x[1] + x[6];
    let s2 = x[2] + x[5];
    let s3 = x[3] + x[4];
    let d0 = x[0] - x[7];
    let d1 = x[1] - x[6];
    let d2 = x[2] - x[5];
    let d3 = x[3] - x[4];

    // even part
    let e0 = s0 + s3;
    let e1 = s1 + s2;
    let e2 = s0 - s3;
    let e3 = s1 - s2;

    [
        0.5 * c[4] * (e0 + e1),
        0.5 * (d0 * c[1] + d1 * c[3] + d2 * c[5] + d3 * c[7]),
        0.5 * (c[2] * e2 + c[6] * e3),
        0.5 * (d0 * c[3] - d1 * c[7] - d2 * c[1] - d3 * c[5]),
        0.5 * c[4] * (e0 - e1),
        0.5 * (d0 * c[5] - d1 * c[1] + d2 * c[7] + d3 * c[3]),
        0.5 * (c[6] * e2 - c[2] * e3),
        0.5 * (d0 * c[7] - d1 * c[5] + d2 * c[3] - d3 * c[1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Textbook O(n^4) orthonormal DCT-II.
    fn naive_dct(input: &[f32; 64]) -> [f64; 64] {
        let alpha = |k: usize| if k == 0 { (0.125f64).sqrt() } else { 0.5 };
        let mut out = [0.0f64; 64];
        for v in 0..8 {
            for u in 0..8 {
                let mut sum = 0.0f64;
                for y in 0..8 {
                    for x in 0..8 {
                        sum += input[y * 8 + x] as f64
                            * (((2 * x + 1) * u) as f64 * std::f64::consts::PI / 16.0).cos()
                            * (((2 * y + 1) * v) as f64 * std::f64::consts::PI / 16.0).cos();
                    }
                }
                out[v * 8 + u] = alpha(u) * alpha(v) * sum;
            }
        }
        out
    }

    #[test]
    fn test_cosine_table() {
        for (k, &c) in COSINES.iter().enumerate() {
            let expected = (k as f64 * std::f64::consts::PI / 16.0).cos();
            assert!((c as f64 - expected).abs() < 1e-7, "cos({k}pi/16) was {c}");
        }
    }

    #[test]
    fn test_flat_block_has_only_dc() {
        let mut block = [100.0f32; 64];
        forward_dct(&mut block);

        assert!((block[0] - 800.0).abs() < 1e-3, "DC was {}", block[0]);
        for (i, &coef) in block.iter().enumerate().skip(1) {
            assert!(coef.abs() < 1e-3, "AC {i} was {coef}");
        }
    }

    #[test]
    fn test_zero_block_stays_zero() {
        let mut block = [0.0f32; 64];
        forward_dct(&mut block);
        assert!(block.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_matches_naive_dct() {
        let mut block = [0.0f32; 64];
        for (i, value) in block.iter_mut().enumerate() {
            // deterministic pseudo-random pattern in -128..128
            *value = ((i * 73 + 41) % 256) as f32 - 128.0;
        }
        let expected = naive_dct(&block);

        forward_dct(&mut block);
        for (i, (&got, &want)) in block.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got as f64 - want).abs() < 1e-2,
                "coefficient {i}: got {got}, expected {want}"
            );
        }
    }

    #[test]
    fn test_horizontal_ramp_only_fills_first_row() {
        let mut block = [0.0f32; 64];
        for (i, value) in block.iter_mut().enumerate() {
            *value = (i % 8) as f32 * 16.0 - 56.0;
        }
        forward_dct(&mut block);

        // constant down each column, so every vertical frequency is zero
        for (i, &coef) in block.iter().enumerate().skip(8) {
            assert!(coef.abs() < 1e-3, "coefficient {i} was {coef}");
        }
        assert!(block[1] < 0.0);
    }
}
