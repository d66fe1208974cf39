use crate::foundation::math::Rng64;

const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Seeded 3D simplex gradient noise.
///
/// The permutation table is a Fisher-Yates shuffle of `0..=255` driven by [`Rng64`], so the
/// same seed always yields the same field.
#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise").finish_non_exhaustive()
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SimplexNoise {
    /// Noise field for `seed`.
    pub fn new(seed: u64) -> Self {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = Rng64::new(seed);
        for i in (1..256).rev() {
            let j = rng.below(i + 1);
            p.swap(i, j);
        }
        Self {
            perm: std::array::from_fn(|i| p[i & 255]),
        }
    }

    fn hash(&self, i: usize, j: usize, k: usize) -> usize {
        let pk = usize::from(self.perm[k]);
        let pj = usize::from(self.perm[j + pk]);
        usize::from(self.perm[i + pj]) % 12
    }

    /// Sample the field; results lie roughly in `[-1, 1]`.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = (x + y + z) * F3;
        let (i, j, k) = ((x + s).floor(), (y + s).floor(), (z + s).floor());
        let t = (i + j + k) * G3;
        let (x0, y0, z0) = (x - (i - t), y - (j - t), z - (k - t));

        let (o1, o2) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let corner = |o: [usize; 3], scale: f64| -> [f64; 3] {
            [
                x0 - o[0] as f64 + scale * G3,
                y0 - o[1] as f64 + scale * G3,
                z0 - o[2] as f64 + scale * G3,
            ]
        };
        let offsets = [[0, 0, 0], o1, o2, [1, 1, 1]];
        let corners = [
            [x0, y0, z0],
            corner(o1, 1.0),
            corner(o2, 2.0),
            corner([1, 1, 1], 3.0),
        ];

        let wrap = |v: f64| (v.rem_euclid(256.0)) as usize;
        let (ii, jj, kk) = (wrap(i), wrap(j), wrap(k));

        let mut sum = 0.0;
        for (o, c) in offsets.iter().zip(&corners) {
            let falloff = 0.6 - c[0] * c[0] - c[1] * c[1] - c[2] * c[2];
            if falloff < 0.0 {
                continue;
            }
            let g = GRAD3[self.hash(ii + o[0], jj + o[1], kk + o[2])];
            let f2 = falloff * falloff;
            sum += f2 * f2 * (g[0] * c[0] + g[1] * c[1] + g[2] * c[2]);
        }
        32.0 * sum
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generative/noise.rs"]
mod tests;
