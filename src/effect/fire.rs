//! Heat-diffusion fire simulation.
//!
//! A per-pixel integer heat field: random cooling, upward drift by
//! weighted averaging, random sparks near the origin, then a heat-to-
//! color mapping. The heat array persists across ticks and is only
//! rebuilt on reset.

use embassy_time::Instant;

use super::Effect;
use crate::{
    MAX_PIXELS,
    color::{FIRE_PALETTE, Rgb, heat_color},
    random::Xorshift32,
};

/// Number of cells at the origin eligible for ignition.
const SPARK_ZONE: u32 = 8;
/// Spark energy range added to an ignited cell.
const SPARK_MIN: u32 = 160;
const SPARK_MAX: u32 = 255;

/// How heat values translate to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatMap {
    /// Index into the fixed 33-entry fire palette.
    Palette,
    /// Piecewise black->red->yellow->white ramp.
    Ramp,
}

#[derive(Debug, Clone)]
pub struct FireEffect {
    cooling: u8,
    sparking: u8,
    map: HeatMap,
    heat: heapless::Vec<u8, MAX_PIXELS>,
    rng: Xorshift32,
}

impl FireEffect {
    pub const fn new(cooling: u8, sparking: u8, map: HeatMap, seed: u32) -> Self {
        Self {
            cooling,
            sparking,
            map,
            heat: heapless::Vec::new(),
            rng: Xorshift32::new(seed),
        }
    }

    /// Current heat field (empty until the first tick).
    pub fn heat(&self) -> &[u8] {
        &self.heat
    }
}

impl Effect for FireEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let n = leds.len().min(MAX_PIXELS);
        if n == 0 {
            return;
        }
        if self.heat.len() != n {
            self.heat.clear();
            // Capacity is MAX_PIXELS and n is clamped, so this cannot fail.
            let _ = self.heat.resize(n, 0);
        }

        // 1. Cool every cell a little. Short strips make the bound
        // exceed one byte; anything over 255 extinguishes the cell
        // outright.
        let cool_bound = u32::from(self.cooling) * 10 / n as u32 + 2;
        for h in &mut self.heat {
            let cooldown = self.rng.range(0, cool_bound).min(255) as u8;
            *h = h.saturating_sub(cooldown);
        }

        // 2. Drift heat upward: each cell becomes a weighted average of
        // its two predecessors, scanned from the far end.
        for k in (2..n).rev() {
            let below = u16::from(self.heat[k - 1]);
            let below2 = u16::from(self.heat[k - 2]);
            self.heat[k] = ((below + below2 + below2) / 3) as u8;
        }

        // 3. Random spark near the origin.
        if self.rng.chance(self.sparking) {
            let y = self.rng.below(SPARK_ZONE.min(n as u32)) as usize;
            let boost = self.rng.range(SPARK_MIN, SPARK_MAX) as u8;
            self.heat[y] = self.heat[y].saturating_add(boost);
        }

        // 4. Map heat to colors.
        for (led, &h) in leds.iter_mut().zip(self.heat.iter()) {
            *led = match self.map {
                HeatMap::Palette => {
                    let idx = usize::from(h) * (FIRE_PALETTE.len() - 1) / 255;
                    FIRE_PALETTE[idx]
                }
                HeatMap::Ramp => heat_color(h),
            };
        }
    }

    fn reset(&mut self) {
        self.heat.clear();
    }
}
