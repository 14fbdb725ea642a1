//! # Palette and Brightness Map
//!
//! A [`Palette`] is the ordered list of characters an individual may use,
//! darkest first. [`BrightnessMap`] assigns each of them an evenly spaced
//! brightness in `[0, 1]` according to that order.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::palette::{BrightnessMap, Palette};
//!
//! let palette = Palette::parse(" .:#\n").unwrap();
//! assert_eq!(palette.chars(), &['.', ':', '#']);
//!
//! let map = BrightnessMap::new(&palette);
//! assert_eq!(map.brightness('.'), Some(0.0));
//! assert_eq!(map.brightness(':'), Some(0.5));
//! assert_eq!(map.brightness('#'), Some(1.0));
//! assert_eq!(map.brightness('x'), None);
//! ```

use std::collections::HashMap;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Ordered, non-empty character set.
///
/// Duplicates are kept as given; they only make the duplicated character
/// more likely to be drawn.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Palette {
    /// Creates a palette from characters in brightness order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPalette` if `chars` is empty.
    pub fn new(chars: Vec<char>) -> Result<Self> {
        if chars.is_empty() {
            return Err(GeneticError::InvalidPalette(
                "Palette must contain at least one character".to_string(),
            ));
        }
        Ok(Self { chars })
    }

    /// Parses palette text, stripping surrounding whitespace.
    ///
    /// Whitespace between other characters is kept and becomes part of the palette.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text.trim().chars().collect())
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, character: char) -> bool {
        self.chars.contains(&character)
    }

    /// Draws a character uniformly at random.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> char {
        self.chars[rng.gen_index(self.chars.len())]
    }
}

const ASCII_TABLE_SIZE: usize = 128;

/// Character to brightness lookup derived from palette order.
///
/// The k-th character maps to `k / (n - 1)`, or to 0 for a single-character
/// palette. If a character occurs more than once, its last position wins.
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessMap {
    ascii: [Option<f64>; ASCII_TABLE_SIZE],
    other: HashMap<char, f64>,
    len: usize,
}

impl BrightnessMap {
    /// Builds the map for a palette.
    pub fn new(palette: &Palette) -> Self {
        Self::build(palette.chars())
    }

    /// Builds the map for a raw character slice.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPalette` if `chars` is empty.
    pub fn from_chars(chars: &[char]) -> Result<Self> {
        if chars.is_empty() {
            return Err(GeneticError::InvalidPalette(
                "Cannot build a brightness map from an empty palette".to_string(),
            ));
        }
        Ok(Self::build(chars))
    }

    fn build(chars: &[char]) -> Self {
        let steps = chars.len().saturating_sub(1);
        let mut map = Self {
            ascii: [None; ASCII_TABLE_SIZE],
            other: HashMap::new(),
            len: 0,
        };

        for (k, &c) in chars.iter().enumerate() {
            let value = if steps == 0 {
                0.0
            } else {
                k as f64 / steps as f64
            };
            map.insert(c, value);
        }
        map
    }

    fn insert(&mut self, character: char, value: f64) {
        let previous = match self.ascii.get_mut(character as usize) {
            Some(slot) => slot.replace(value),
            None => self.other.insert(character, value),
        };
        if previous.is_none() {
            self.len += 1;
        }
    }

    /// Brightness of `character`, or `None` if it is not in the palette.
    #[inline]
    pub fn brightness(&self, character: char) -> Option<f64> {
        match self.ascii.get(character as usize) {
            Some(value) => *value,
            None => self.other.get(&character).copied(),
        }
    }

    /// Number of distinct characters in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
