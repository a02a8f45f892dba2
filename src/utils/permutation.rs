use crate::crypto::randomness::RandomSource;
use crate::graph::{Color, Coloring};

/// Bijection over the three colors; `images[c]` is where color `c` goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPermutation {
    images: [Color; 3],
}

impl ColorPermutation {
    pub fn identity() -> Self {
        ColorPermutation { images: Color::ALL }
    }

    /// Uniform sample over all six permutations (Fisher-Yates).
    pub fn sample(rng: &mut impl RandomSource) -> Self {
        let mut images = Color::ALL;
        for i in (1..images.len()).rev() {
            let j = rng.uniform_below(i + 1);
            images.swap(i, j);
        }
        ColorPermutation { images }
    }

    pub fn apply(&self, color: Color) -> Color {
        self.images[color.index()]
    }

    /// Recolors every node. Proper colorings stay proper since the map is injective.
    pub fn shuffle(&self, coloring: &Coloring) -> Coloring {
        coloring
            .iter()
            .map(|(node, color)| (node, self.apply(color)))
            .collect()
    }
}
