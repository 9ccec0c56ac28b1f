use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;
use web_time::{SystemTime, UNIX_EPOCH};

use super::*;

/// Uniform rejection sampling over the whole board. The start tile, and its neighbors with
/// [`StartTile::AlwaysZero`], hold sentinel mines while sampling and are cleared afterwards.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: Option<SmallRng>,
    start_tile: StartTile,
}

impl RandomMinefieldGenerator {
    /// Reproducible sequence of layouts, one per game.
    pub fn new(seed: u64, start_tile: StartTile) -> Self {
        Self {
            rng: Some(SmallRng::seed_from_u64(seed)),
            start_tile,
        }
    }

    /// Seeded from the wall clock when the first mines are placed.
    pub fn from_clock(start_tile: StartTile) -> Self {
        Self {
            rng: None,
            start_tile,
        }
    }

    pub fn start_tile(&self) -> StartTile {
        self.start_tile
    }
}

impl Default for RandomMinefieldGenerator {
    fn default() -> Self {
        Self::from_clock(StartTile::default())
    }
}

fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    (nanos as u64) ^ ((nanos >> 64) as u64)
}

/// Tiles kept clear of mines, the start tile always comes first.
fn excluded_tiles(start: Coord2, size: Coord2, start_tile: StartTile) -> impl Iterator<Item = Coord2> {
    let tiles = NeighborIter::with_center(start, size);
    match start_tile {
        StartTile::SimpleSafe => tiles.take(1),
        StartTile::AlwaysZero => tiles.take(9),
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        let size = config.size;
        let start = config.validate_coords(start)?;
        let total_tiles = config.total_tiles();
        let free_tiles = |start_tile| {
            total_tiles - excluded_tiles(start, size, start_tile).count() as CellCount
        };

        let start_tile = match self.start_tile {
            StartTile::AlwaysZero if config.mines > free_tiles(StartTile::AlwaysZero) => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                StartTile::SimpleSafe
            }
            start_tile => start_tile,
        };

        // sampling could never finish otherwise
        if config.mines == 0 || config.mines > free_tiles(start_tile) {
            return Err(GameError::InvalidMineCount {
                mines: config.mines,
                max: total_tiles.saturating_sub(1),
            });
        }

        let rng = self.rng.get_or_insert_with(|| {
            let seed = clock_seed();
            log::debug!("seeding mine placement from clock: {seed}");
            SmallRng::seed_from_u64(seed)
        });

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in excluded_tiles(start, size, start_tile) {
            mines[coords.to_nd_index()] = true;
        }

        let mut mines_placed = 0;
        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..size.0), rng.random_range(0..size.1));
            let tile = &mut mines[coords.to_nd_index()];
            if !*tile {
                *tile = true;
                mines_placed += 1;
            }
        }

        for coords in excluded_tiles(start, size, start_tile) {
            mines[coords.to_nd_index()] = false;
        }

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "placed {} mines on {:?} board, start tile {:?} ({:?})",
            layout.mine_count(),
            size,
            start,
            start_tile
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, config: GameConfig, start: Coord2, start_tile: StartTile) -> MineLayout {
        RandomMinefieldGenerator::new(seed, start_tile)
            .generate(config, start)
            .unwrap()
    }

    #[test]
    fn places_exact_mine_count_and_keeps_start_safe() {
        let config = GameConfig::expert();
        for seed in 0..32 {
            let start = ((seed * 7 % 30) as Coord, (seed * 3 % 16) as Coord);
            let layout = generate(seed, config, start, StartTile::SimpleSafe);

            assert_eq!(layout.mine_count(), config.mines);
            assert_eq!(layout.size(), config.size);
            assert!(!layout.contains_mine(start));
        }
    }

    #[test]
    fn nearly_full_board_leaves_only_start_tile() {
        let config = GameConfig::new((3, 3), 8).unwrap();
        let layout = generate(5, config, (1, 1), StartTile::SimpleSafe);

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));
    }

    #[test]
    fn always_zero_clears_neighborhood() {
        let config = GameConfig::intermediate();
        for seed in 0..16 {
            let layout = generate(seed, config, (0, 5), StartTile::AlwaysZero);

            assert_eq!(layout.mine_count(), config.mines);
            assert!(!layout.contains_mine((0, 5)));
            assert_eq!(layout.adjacent_mine_count((0, 5)), 0);
        }
    }

    #[test]
    fn always_zero_falls_back_when_board_is_too_full() {
        let config = GameConfig::new((3, 3), 5).unwrap();
        let layout = generate(1, config, (1, 1), StartTile::AlwaysZero);

        assert_eq!(layout.mine_count(), 5);
        assert!(!layout.contains_mine((1, 1)));
    }

    #[test]
    fn same_seed_same_layouts() {
        let config = GameConfig::beginner();
        let mut a = RandomMinefieldGenerator::new(42, StartTile::SimpleSafe);
        let mut b = RandomMinefieldGenerator::new(42, StartTile::SimpleSafe);

        for _ in 0..3 {
            assert_eq!(a.generate(config, (4, 4)), b.generate(config, (4, 4)));
        }
    }

    #[test]
    fn rejects_unsatisfiable_config() {
        let config = GameConfig {
            size: (2, 2),
            mines: 4,
        };
        let mut generator = RandomMinefieldGenerator::new(0, StartTile::SimpleSafe);

        assert_eq!(
            generator.generate(config, (0, 0)),
            Err(GameError::InvalidMineCount { mines: 4, max: 3 })
        );
    }

    #[test]
    fn rejects_start_outside_board() {
        let mut generator = RandomMinefieldGenerator::default();

        assert_eq!(
            generator.generate(GameConfig::beginner(), (9, 0)),
            Err(GameError::InvalidCoords)
        );
    }
}
