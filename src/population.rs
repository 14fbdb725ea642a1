//! Random population initialization.

use crate::error::{GeneticError, Result};
use crate::grid::Shape;
use crate::individual::Individual;
use crate::palette::Palette;
use crate::rng::RandomNumberGenerator;

/// Generates `size` independent individuals of the given shape, each cell drawn
/// uniformly with replacement from `palette`.
///
/// # Errors
///
/// Returns a configuration error if `size` is zero.
///
/// # Example
///
/// ```rust
/// use ascii_evolve::grid::Shape;
/// use ascii_evolve::palette::Palette;
/// use ascii_evolve::population;
/// use ascii_evolve::rng::RandomNumberGenerator;
///
/// let palette = Palette::parse(".:#").unwrap();
/// let shape = Shape::new(4, 6).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(2);
///
/// let population = population::generate(10, shape, &palette, &mut rng).unwrap();
/// assert_eq!(population.len(), 10);
/// assert!(population.iter().all(|i| i.shape() == shape));
/// ```
pub fn generate(
    size: usize,
    shape: Shape,
    palette: &Palette,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<Individual>> {
    if size == 0 {
        return Err(GeneticError::Configuration(
            "Population size cannot be zero".to_string(),
        ));
    }

    Ok((0..size)
        .map(|_| Individual::random(shape, palette, rng))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let palette = Palette::parse(".:-=+*#%@").unwrap();
        let shape = Shape::new(16, 24).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);

        let population = generate(100, shape, &palette, &mut rng).unwrap();

        assert_eq!(population.len(), 100);
        for individual in &population {
            assert_eq!(individual.shape(), shape);
            assert!(individual.cells().iter().all(|&c| palette.contains(c)));
        }
        // 384 cells over 9 symbols: two identical random grids would be a broken generator
        assert_ne!(population[0], population[1]);
    }

    #[test]
    fn test_generate_is_reproducible() {
        let palette = Palette::parse(".#").unwrap();
        let shape = Shape::new(3, 3).unwrap();

        let a = generate(5, shape, &palette, &mut RandomNumberGenerator::from_seed(7)).unwrap();
        let b = generate(5, shape, &palette, &mut RandomNumberGenerator::from_seed(7)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_zero_size() {
        let palette = Palette::parse(".#").unwrap();
        let shape = Shape::new(3, 3).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);

        assert!(matches!(
            generate(0, shape, &palette, &mut rng),
            Err(GeneticError::Configuration(_))
        ));
    }
}
