use crate::location::Location;
use eyre::{eyre, WrapErr};

/// Map2D is what the search needs to know about a map: its extent, and what it costs to enter a
/// cell.
pub trait Map2D {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn contains(&self, location: &Location) -> bool {
        (0..self.width()).contains(&location.x) && (0..self.height()).contains(&location.y)
    }

    /// The cost of stepping into `location`, None if it's blocked or outside the map
    fn cell_cost(&self, location: &Location) -> Option<f32>;

    fn is_passable(&self, location: &Location) -> bool {
        self.cell_cost(location).is_some()
    }
}

/// Which moves are allowed between cells
#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// up, down, left, right
    Four,
    /// also the diagonals, without cutting blocked corners
    #[default]
    Eight,
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// GridMap is a rectangular grid of cells, each either blocked or with an entry cost, plus the
/// start and goal of the route to find. Row 0 is the top of the map, y grows downward.
#[derive(Debug, Clone)]
pub struct GridMap {
    name: String,
    width: i32,
    height: i32,
    /// row-major, None for a blocked cell
    cells: Vec<Option<f32>>,
    start: Location,
    goal: Location,
}

/// The YAML layout of a map file
#[derive(serde::Serialize, serde::Deserialize)]
struct MapFile {
    rows: Vec<String>,
    start: Option<[i32; 2]>,
    goal: Option<[i32; 2]>,
}

impl GridMap {
    /// An unobstructed map of unit cost cells, routing from the top left to the bottom right corner
    #[cfg(test)]
    pub fn open(width: i32, height: i32) -> GridMap {
        let cell_count = (width.max(0) as usize) * (height.max(0) as usize);
        GridMap {
            name: format!("open {width}x{height}"),
            width,
            height,
            cells: vec![Some(1.0); cell_count],
            start: Location::new(0, 0),
            goal: Location::new(width - 1, height - 1),
        }
    }

    /// Load a map from the contents of a YAML map file. `name` is only used for errors and output.
    pub fn from_yaml(name: &str, data: &[u8]) -> eyre::Result<GridMap> {
        let file: MapFile = serde_yaml::from_slice(data)
            .wrap_err_with(|| format!("Failed to load yaml file {}", name))?;

        let start = file.start.map(|[x, y]| Location::new(x, y));
        let goal = file.goal.map(|[x, y]| Location::new(x, y));
        Self::parse(name, &file.rows, start, goal)
    }

    /// Build a map from rows of cell glyphs:
    /// `.` open, `#` blocked, `1`-`9` open with that entry cost, `S` start and `G` goal.
    /// Exactly one S and one G are required.
    pub fn parse_rows<R: AsRef<str>>(name: &str, rows: &[R]) -> eyre::Result<GridMap> {
        Self::parse(name, rows, None, None)
    }

    /// `start` and `goal` take the place of the S and G markers when given
    fn parse<R: AsRef<str>>(
        name: &str,
        rows: &[R],
        start_override: Option<Location>,
        goal_override: Option<Location>,
    ) -> eyre::Result<GridMap> {
        let height = rows.len();
        let width = rows
            .first()
            .map(|r| r.as_ref().chars().count())
            .ok_or_else(|| eyre!("map {} has no rows", name))?;
        if width == 0 {
            return Err(eyre!("map {} has an empty first row", name));
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(eyre!(
                    "map {}: row {} is {} cells wide, expected {}",
                    name,
                    y,
                    row.chars().count(),
                    width
                ));
            }

            for (x, glyph) in row.chars().enumerate() {
                let location = Location::new(x.try_into()?, y.try_into()?);
                let cell = match glyph {
                    '.' => Some(1.0),
                    '#' => None,
                    'S' => {
                        if start.replace(location).is_some() {
                            return Err(eyre!("map {} has more than one start", name));
                        }
                        Some(1.0)
                    }
                    'G' => {
                        if goal.replace(location).is_some() {
                            return Err(eyre!("map {} has more than one goal", name));
                        }
                        Some(1.0)
                    }
                    '1'..='9' => glyph.to_digit(10).map(|d| d as f32),
                    _ => {
                        return Err(eyre!("map {}: unknown cell {:?} at {}", name, glyph, location))
                    }
                };
                cells.push(cell);
            }
        }

        let start = start_override
            .or(start)
            .ok_or_else(|| eyre!("map {} has no start", name))?;
        let goal = goal_override
            .or(goal)
            .ok_or_else(|| eyre!("map {} has no goal", name))?;

        Ok(GridMap {
            name: name.to_string(),
            width: width.try_into()?,
            height: height.try_into()?,
            cells,
            start,
            goal,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn start(&self) -> Location {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Location {
        self.goal
    }

    #[cfg(test)]
    pub fn set_blocked(&mut self, location: &Location) {
        if let Some(i) = self.cell_index(location) {
            self.cells[i] = None;
        }
    }

    /// Every cell reachable in one move from `location`, with the cost of that move.
    /// A diagonal step costs √2 times the cell's entry cost.
    pub fn neighbours(
        &self,
        location: &Location,
        connectivity: Connectivity,
    ) -> Vec<(f32, Location)> {
        let mut out = Vec::with_capacity(8);

        for (dx, dy) in ORTHOGONAL {
            let n = location.offset(dx, dy);
            if let Some(cost) = self.cell_cost(&n) {
                out.push((cost, n));
            }
        }

        if connectivity == Connectivity::Eight {
            for (dx, dy) in DIAGONAL {
                let n = location.offset(dx, dy);
                let Some(cost) = self.cell_cost(&n) else {
                    continue;
                };
                if self.is_passable(&location.offset(dx, 0))
                    && self.is_passable(&location.offset(0, dy))
                {
                    out.push((cost * std::f32::consts::SQRT_2, n));
                }
            }
        }

        out
    }

    #[inline]
    fn cell_index(&self, location: &Location) -> Option<usize> {
        if !self.contains(location) {
            return None;
        }
        Some(location.y as usize * self.width as usize + location.x as usize)
    }
}

impl Map2D for GridMap {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn cell_cost(&self, location: &Location) -> Option<f32> {
        self.cell_index(location).and_then(|i| self.cells[i])
    }
}
