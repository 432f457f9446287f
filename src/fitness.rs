//! Rendering a chromosome and scoring it against the reference image.

use crate::chromosome::{Chromosome, PolygonLayout};
use crate::error::{Error, Result};
use crate::frame_buffer::FrameBuffer;
use image::RgbImage;
use image_compare::{Algorithm, rgb_similarity_structure};

/// Difference metric. Lower is better for both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Metric {
    /// Summed squared channel error divided by the pixel count
    Mse,
    /// One minus the mean structural similarity
    Ssim,
}

/// Paints `chromosome` onto a fresh black `width` x `height` canvas.
pub fn render(
    chromosome: &Chromosome,
    layout: &PolygonLayout,
    width: u32,
    height: u32,
) -> Result<FrameBuffer> {
    let polygons = layout.decode(chromosome, width, height)?;
    let mut fb = FrameBuffer::new(width, height);
    fb.draw_polygons(&polygons);
    Ok(fb)
}

/// Smallest side accepted for structural similarity, one comparison window.
pub const SSIM_MIN_SIDE: u32 = 8;

/// Comparison-ready form of the reference, built once per run.
enum CachedReference {
    Mse,
    Ssim(RgbImage),
}

/// Scores images against a cached reference with a fixed metric.
pub struct DifferenceEvaluator {
    reference: FrameBuffer,
    cached: CachedReference,
}

impl DifferenceEvaluator {
    pub fn new(reference: FrameBuffer, metric: Metric) -> Result<Self> {
        let cached = match metric {
            Metric::Mse => CachedReference::Mse,
            Metric::Ssim => {
                if reference.width < SSIM_MIN_SIDE || reference.height < SSIM_MIN_SIDE {
                    return Err(Error::ImageTooSmall {
                        width: reference.width,
                        height: reference.height,
                        min: SSIM_MIN_SIDE,
                    });
                }
                CachedReference::Ssim(reference.to_rgb_image()?)
            }
        };
        Ok(Self { reference, cached })
    }

    pub fn reference(&self) -> &FrameBuffer {
        &self.reference
    }

    pub fn score(&self, image: &FrameBuffer) -> Result<f64> {
        if (image.width, image.height) != (self.reference.width, self.reference.height) {
            return Err(Error::DimensionMismatch {
                expected: (self.reference.width, self.reference.height),
                actual: (image.width, image.height),
            });
        }
        match &self.cached {
            CachedReference::Mse => Ok(image.mse(&self.reference)),
            CachedReference::Ssim(reference) => {
                let candidate = image.to_rgb_image()?;
                let similarity =
                    rgb_similarity_structure(&Algorithm::MSSIMSimple, &candidate, reference)?;
                Ok((1.0 - similarity.score).max(0.0))
            }
        }
    }
}

/// `fitness(chromosome) = score(render(chromosome))`. Pure, no randomness.
pub struct Fitness {
    layout: PolygonLayout,
    evaluator: DifferenceEvaluator,
}

impl Fitness {
    pub fn new(reference: FrameBuffer, layout: PolygonLayout, metric: Metric) -> Result<Self> {
        Ok(Self {
            layout,
            evaluator: DifferenceEvaluator::new(reference, metric)?,
        })
    }

    pub fn layout(&self) -> &PolygonLayout {
        &self.layout
    }

    pub fn render(&self, chromosome: &Chromosome) -> Result<FrameBuffer> {
        let reference = self.evaluator.reference();
        render(chromosome, &self.layout, reference.width, reference.height)
    }

    pub fn evaluate(&self, chromosome: &Chromosome) -> Result<f64> {
        let image = self.render(chromosome)?;
        self.evaluator.score(&image)
    }
}
