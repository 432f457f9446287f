use rand_core::RngCore;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub mod app;
pub mod chromosome;
pub mod config;
pub mod error;
pub mod fitness;
pub mod frame_buffer;
pub mod monitor;
pub mod operators;
pub mod search;
pub mod snapshot;
pub mod tabu_memory;

pub use chromosome::{Chromosome, PolygonLayout};
pub use error::{Error, Result};
pub use fitness::{DifferenceEvaluator, Fitness, Metric};
pub use frame_buffer::FrameBuffer;
pub use search::{IteratedLocalSearch, Search, SearchMonitor, SearchResult, TabuSearch};
pub use tabu_memory::TabuMemory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: u8,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r, self.g, self.b, self.alpha
        )
    }
}

/// A polygon in pixel space, decoded from one chunk of a chromosome.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<(i32, i32)>,
    pub colour: Colour,
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon [")?;
        for (i, (x, y)) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "({x},{y})")?;
        }
        write!(f, "] {}", self.colour)
    }
}

// return random number in the specified range (including min and max)
pub fn rand_between<R: RngCore + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let range = (max - min + 1) as u64;
    let r = rng.next_u64() % range;
    min + r as i64
}

// return random real in [low, high), 53 bits of precision
pub fn rand_uniform<R: RngCore + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    let unit = (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64);
    low + (high - low) * unit
}

pub fn save_svg<P: AsRef<Path>>(
    filename: P,
    polygons: &[Polygon],
    width: u32,
    height: u32,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut w = BufWriter::new(file);

    // Header
    writeln!(
        w,
        r#"<?xml version="1.0" standalone="no"?><!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd"><svg width="{width}" height="{height}" style="background-color:#000000;" version="1.1" xmlns="http://www.w3.org/2000/svg">"#
    )?;

    // Black background rectangle
    writeln!(
        w,
        r#"<polygon points="0,0 {width},0 {width},{height} 0,{height}" style="fill:#000000;stroke:#000000;stroke-width:0;fill-opacity:1;"/>"#
    )?;

    for p in polygons {
        let points = p
            .vertices
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ");
        let c = &p.colour;
        let opacity = c.alpha as f32 / 255.0;
        writeln!(
            w,
            r#"<polygon points="{}" style="fill:#{:02x}{:02x}{:02x};stroke-width:0;fill-opacity:{:.3};"/>"#,
            points, c.r, c.g, c.b, opacity
        )?;
    }

    writeln!(w, "</svg>")?;
    w.flush()?;
    Ok(())
}
