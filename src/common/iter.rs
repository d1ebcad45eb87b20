use super::Layers;

// Iterator for placing data in the layers of a symbol
//------------------------------------------------------------------------------

/// Yields matrix coordinates `(r, c)` in payload bit order.
///
/// Layers are visited from the outermost inwards. Each layer is four sides two
/// modules thick: left going down, bottom going right, right going up and top going
/// left. Every step along a side covers a pair of modules, outer one first.
#[derive(Debug, Clone)]
pub struct LayerIter {
    map: Vec<i16>,
    base: usize,
    layers: usize,
    // Extra modules per side on top of 4 per layer
    side_extra: usize,
    layer: usize,
    side: usize,
    j: usize,
    k: usize,
}

impl LayerIter {
    pub fn new(layers: Layers) -> Self {
        let side_extra = if layers.is_compact() { 9 } else { 12 };
        Self {
            map: layers.alignment_map(),
            base: layers.base_width(),
            layers: *layers,
            side_extra,
            layer: 0,
            side: 0,
            j: 0,
            k: 0,
        }
    }

    fn row_size(&self) -> usize {
        (self.layers - self.layer) * 4 + self.side_extra
    }
}

impl Iterator for LayerIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.layer >= self.layers {
            return None;
        }

        let low = self.layer * 2;
        let high = self.base - 1 - low;
        let (j, k, m) = (self.j, self.k, &self.map);
        let res = match self.side {
            0 => (m[low + j], m[low + k]),
            1 => (m[high - k], m[low + j]),
            2 => (m[high - j], m[high - k]),
            _ => (m[low + k], m[high - j]),
        };

        self.k += 1;
        if self.k == 2 {
            self.k = 0;
            self.j += 1;
        }
        if self.j == self.row_size() {
            self.j = 0;
            self.side += 1;
        }
        if self.side == 4 {
            self.side = 0;
            self.layer += 1;
        }

        Some(res)
    }
}
