//! Seeded random city layout: full-length road bands first, then buildings
//! packed against them, then a warehouse sample.
//!
//! # Road bands
//!
//! Horizontal bands start at row 2 and repeat while the band start is more
//! than two rows from the bottom edge.  Each band is `1..=max_road_width`
//! rows wide and is followed by a gap of at least `min_building_size` rows.
//! Vertical bands do the same on columns.  Every band runs the full length of
//! the grid; with `max_road_width <= 2` no band touches the border on its
//! long side.
//!
//! # Buildings
//!
//! Random rectangles are proposed until `placement_attempts` consecutive
//! proposals fail.  A proposal succeeds only when it touches a road (ring
//! test, corners included) and covers nothing but empty cells.

use log::{debug, trace};

use cg_core::{BuildingId, CityRng, LayoutConfig};

use crate::{CellGrid, Grid, GridResult};

/// Paints random layouts onto a [`Grid`].
#[derive(Clone, Debug, Default)]
pub struct LayoutGenerator {
    config: LayoutConfig,
}

impl LayoutGenerator {
    /// Validate `config` and wrap it.
    pub fn new(config: LayoutConfig) -> GridResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Allocate a `width × height` grid and paint a layout onto it.
    pub fn generate(&self, width: u32, height: u32, rng: &mut CityRng) -> GridResult<Grid> {
        let mut grid = Grid::new(width, height)?;
        self.reset(&mut grid, rng)?;
        Ok(grid)
    }

    /// Discard every cell of `grid` and paint a fresh layout from the next
    /// draws of `rng`.
    pub fn reset(&self, grid: &mut Grid, rng: &mut CityRng) -> GridResult<()> {
        grid.clear();

        let road_cells = self.paint_roads(grid, rng);
        let buildings  = self.place_buildings(grid, rng);
        let warehouses = self.pick_warehouses(grid, rng)?;

        debug!(
            "generated {}x{} layout: {road_cells} road cells, {buildings} buildings, {warehouses} warehouses",
            grid.width(),
            grid.height(),
        );
        Ok(())
    }

    fn paint_roads(&self, grid: &mut Grid, rng: &mut CityRng) -> usize {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let mut painted = 0;

        let mut y = 2;
        while y < height - 2 {
            let band = self.band_width(rng);
            for w in 0..band {
                painted += grid.fill_road_row(y + w);
            }
            trace!("horizontal road band rows {y}..{}", y + band);
            y += band + self.band_gap(rng);
        }

        let mut x = 2;
        while x < width - 2 {
            let band = self.band_width(rng);
            for w in 0..band {
                painted += grid.fill_road_column(x + w);
            }
            trace!("vertical road band columns {x}..{}", x + band);
            x += band + self.band_gap(rng);
        }

        painted
    }

    #[inline]
    fn band_width(&self, rng: &mut CityRng) -> i32 {
        rng.gen_range(1..=self.config.max_road_width) as i32
    }

    #[inline]
    fn band_gap(&self, rng: &mut CityRng) -> i32 {
        let slack = self.config.max_building_size - self.config.min_building_size;
        (self.config.min_building_size + rng.gen_range(0..=slack)) as i32
    }

    fn place_buildings(&self, grid: &mut Grid, rng: &mut CityRng) -> usize {
        let (min, max) = (self.config.min_building_size, self.config.max_building_size);
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let mut placed = 0;

        let mut attempts = self.config.placement_attempts;
        while attempts > 0 {
            let w = rng.gen_range(min..=max);
            let h = rng.gen_range(min..=max);
            if w as i32 > width || h as i32 > height {
                attempts -= 1;
                continue;
            }
            let x = rng.gen_range(0..=width - w as i32);
            let y = rng.gen_range(0..=height - h as i32);

            if grid.is_adjacent_to_road(x, y, w, h) {
                if let Some(id) = grid.place_building(x, y, w, h) {
                    trace!("placed {id} at ({x}, {y}) size {w}x{h}");
                    placed += 1;
                    attempts = self.config.placement_attempts;
                    continue;
                }
            }
            attempts -= 1;
        }

        placed
    }

    fn pick_warehouses(&self, grid: &mut Grid, rng: &mut CityRng) -> GridResult<usize> {
        let ids: Vec<BuildingId> = BuildingId::range_to(grid.next_building_id()).collect();
        let picked = rng.sample(&ids, self.config.warehouse_count(ids.len()));
        for &id in &picked {
            grid.mark_warehouse(id)?;
        }
        Ok(picked.len())
    }
}
