//! Flat real-valued encoding of a polygon image.
//!
//! A chromosome is a sequence of genes in `[0, 1]`. It is split into
//! consecutive chunks of `2 * vertex_count + 4` genes, one per polygon:
//! the `(x, y)` pairs of every vertex followed by red, green, blue and
//! alpha. Chunk order is paint order, the first chunk is the bottom layer.

use crate::error::{Error, Result};
use crate::{Colour, Polygon, rand_uniform};
use rand_core::RngCore;

/// How many polygons a chromosome encodes and how many vertices each has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolygonLayout {
    polygon_count: usize,
    vertex_count: usize,
}

impl PolygonLayout {
    pub fn new(polygon_count: usize, vertex_count: usize) -> Result<Self> {
        if polygon_count == 0 {
            return Err(Error::NoPolygons);
        }
        if vertex_count < 3 {
            return Err(Error::TooFewVertices(vertex_count));
        }
        Ok(Self {
            polygon_count,
            vertex_count,
        })
    }

    pub fn polygon_count(&self) -> usize {
        self.polygon_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of coordinate genes at the start of each chunk.
    #[inline]
    pub fn coordinate_genes(&self) -> usize {
        self.vertex_count * 2
    }

    #[inline]
    pub fn genes_per_polygon(&self) -> usize {
        self.coordinate_genes() + 4
    }

    #[inline]
    pub fn chromosome_len(&self) -> usize {
        self.polygon_count * self.genes_per_polygon()
    }

    /// Rejects chromosomes whose length does not match this layout, or
    /// that carry a gene outside `[0, 1]` (NaN included).
    pub fn check(&self, chromosome: &Chromosome) -> Result<()> {
        let expected = self.chromosome_len();
        if chromosome.len() != expected {
            return Err(Error::ChromosomeLength {
                expected,
                actual: chromosome.len(),
            });
        }
        if let Some((index, &value)) = chromosome
            .genes()
            .iter()
            .enumerate()
            .find(|(_, g)| !(0.0..=1.0).contains(*g))
        {
            return Err(Error::GeneOutOfRange { index, value });
        }
        Ok(())
    }

    /// True if gene `index` holds a vertex coordinate rather than a colour channel.
    #[inline]
    pub fn is_coordinate(&self, index: usize) -> bool {
        index % self.genes_per_polygon() < self.coordinate_genes()
    }

    /// Decodes a chromosome into pixel-space polygons for a `width` x `height` canvas.
    pub fn decode(&self, chromosome: &Chromosome, width: u32, height: u32) -> Result<Vec<Polygon>> {
        self.check(chromosome)?;
        let polygons = chromosome
            .genes()
            .chunks_exact(self.genes_per_polygon())
            .map(|chunk| {
                let (coords, rgba) = chunk.split_at(self.coordinate_genes());
                let vertices = coords
                    .chunks_exact(2)
                    .map(|xy| {
                        (
                            (xy[0] * width as f64) as i32,
                            (xy[1] * height as f64) as i32,
                        )
                    })
                    .collect();
                Polygon {
                    vertices,
                    colour: Colour {
                        r: channel(rgba[0]),
                        g: channel(rgba[1]),
                        b: channel(rgba[2]),
                        alpha: channel(rgba[3]),
                    },
                }
            })
            .collect();
        Ok(polygons)
    }
}

// truncating denormalisation; `as` saturates anything outside [0, 255]
#[inline]
fn channel(gene: f64) -> u8 {
    (gene * 255.0) as u8
}

/// A candidate solution: one gene per polygon parameter, each in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Chromosome(Vec<f64>);

impl Chromosome {
    pub fn new(genes: Vec<f64>) -> Self {
        Self(genes)
    }

    /// Uniform random chromosome in `[0, 1]^len`.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> Self {
        Self((0..len).map(|_| rand_uniform(rng, 0.0, 1.0)).collect())
    }

    pub fn genes(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
