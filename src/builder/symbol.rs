#[cfg(feature = "render")]
use image::{GrayImage, Luma};
use std::ops::Deref;

use crate::common::{metadata::*, BitStream, LayerIter};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    /// Bullseye, orientation marks and reference grid
    Func(Color),
    /// Mode message
    Mode(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Mode(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Finished Aztec symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    grid: Vec<Module>,
    w: usize,
    layers: Layers,
    // Data codewords, as written into the mode message
    data_cw: usize,
    ecc_cw: usize,
}

// Symbol type for builder
//------------------------------------------------------------------------------

impl Symbol {
    pub(crate) fn new(layers: Layers, data_cw: usize, ecc_cw: usize) -> Self {
        debug_assert!(layers.is_valid(), "Invalid layers {layers:?}");

        let w = layers.width();
        Self { grid: vec![Module::Empty; w * w], w, layers, data_cw, ecc_cw }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn layer_count(&self) -> usize {
        *self.layers
    }

    pub fn is_compact(&self) -> bool {
        self.layers.is_compact()
    }

    /// Number of data codewords
    pub fn codewords(&self) -> usize {
        self.data_cw
    }

    pub fn ecc_codewords(&self) -> usize {
        self.ecc_cw
    }

    pub fn total_codewords(&self) -> usize {
        self.data_cw + self.ecc_cw
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        *self.get(r as i16, c as i16) == Color::Dark
    }

    /// Row major module colors, dark as `true`
    pub fn matrix(&self) -> Vec<Vec<bool>> {
        self.grid
            .chunks_exact(self.w)
            .map(|row| row.iter().map(|m| **m == Color::Dark).collect())
            .collect()
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Mode(Color::Dark) => 'm',
                    Module::Mode(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be less than w");
        debug_assert!(-w <= c && c < w, "column should be less than w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    fn center(&self) -> i16 {
        (self.w / 2) as i16
    }
}


// Function patterns
//------------------------------------------------------------------------------

impl Symbol {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        if !self.layers.is_compact() {
            self.draw_reference_grid();
        }
        self.draw_bullseye();
        self.draw_orientation_marks();
    }

    // Lines every 16 modules from the center in both directions, alternating
    // colors with the center dark
    fn draw_reference_grid(&mut self) {
        let w = self.w as i16;
        let center = self.center();
        let lines = (0..w).filter(|i| (i - center) % 16 == 0).collect::<Vec<_>>();
        for &l in lines.iter() {
            for k in 0..w {
                let clr = Color::from((k - center) % 2 == 0);
                self.set(l, k, Module::Func(clr));
                self.set(k, l, Module::Func(clr));
            }
        }
    }

    // Concentric square rings, dark at even distance from the center, with the
    // light ring holding the mode message around them
    fn draw_bullseye(&mut self) {
        let center = self.center();
        let radius = self.layers.bullseye_radius();
        for r in -radius..=radius {
            for c in -radius..=radius {
                let d = r.abs().max(c.abs());
                let clr = Color::from(d < radius && d % 2 == 0);
                self.set(center + r, center + c, Module::Func(clr));
            }
        }
    }

    fn draw_orientation_marks(&mut self) {
        let center = self.center();
        let s = self.layers.bullseye_radius();
        let marks = [
            (center - s, center - s),
            (center - s, center - s + 1),
            (center - s + 1, center - s),
            (center - s, center + s),
            (center - s + 1, center + s),
            (center + s - 1, center + s),
        ];
        for (r, c) in marks {
            self.set(r, c, Module::Func(Color::Dark));
        }
    }
}


// Mode message & data placement
//------------------------------------------------------------------------------

impl Symbol {
    /// Writes the mode message clockwise around the bullseye, starting at the top
    /// left. Full range symbols skip the reference grid line through the center.
    pub(crate) fn draw_mode_message(&mut self, msg: &BitStream) {
        let center = self.center();
        let s = self.layers.bullseye_radius();
        let (side, offsets): (usize, Vec<i16>) = if self.layers.is_compact() {
            (7, (0..7).map(|i| center - 3 + i).collect())
        } else {
            (10, (0..10).map(|i| center - 5 + i + i / 5).collect())
        };
        debug_assert!(msg.len() == side * 4, "Invalid mode message length {}", msg.len());

        let bit = |i: usize| Module::Mode(Color::from(msg.get(i)));
        for (i, &o) in offsets.iter().enumerate() {
            self.set(center - s, o, bit(i));
            self.set(o, center + s, bit(i + side));
            self.set(center + s, o, bit(side * 3 - 1 - i));
            self.set(o, center - s, bit(side * 4 - 1 - i));
        }
    }

    /// Writes the layer payload, leading padding included, from the outermost layer
    /// inwards.
    pub(crate) fn draw_data(&mut self, payload: &BitStream) {
        debug_assert!(
            payload.len() == self.layers.total_bits(),
            "Payload doesn't fill the layers: Payload {}, Capacity {}",
            payload.len(),
            self.layers.total_bits()
        );

        for ((r, c), bit) in LayerIter::new(self.layers).zip(payload.clone()) {
            self.set(r, c, Module::Data(Color::from(bit)));
        }
    }
}

// Rendering
//------------------------------------------------------------------------------

impl Symbol {
    /// Grayscale image with a light quiet zone, `module_sz` pixels per module
    #[cfg(feature = "render")]
    pub fn render(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE as u32 * module_sz;
        let sym_sz = self.w as u32 * module_sz;
        let total_sz = qz_sz + sym_sz + qz_sz;

        let mut canvas = GrayImage::from_pixel(total_sz, total_sz, Luma([255]));
        for i in qz_sz..qz_sz + sym_sz {
            for j in qz_sz..qz_sz + sym_sz {
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                let pixel = self.get(r, c).select(Luma([0]), Luma([255]));
                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }

    /// Text rendering for terminals, light modules as full blocks
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE * module_sz;
        let sym_sz = self.w * module_sz;
        let total_sz = qz_sz + sym_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + sym_sz || j < qz_sz || j >= qz_sz + sym_sz {
                    canvas.push('█');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.push(self.get(r, c).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}


// Global constants
//------------------------------------------------------------------------------

/// Light margin around rendered symbols, in modules
pub const QUIET_ZONE: usize = 2;
