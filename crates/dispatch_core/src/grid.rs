use std::fmt;

use anyhow::{ensure, Context};
use log::debug;

use crate::constants::Weight;
use crate::graph::{cell_id, Graph};

/// Closed vocabulary of grid cell markers.
///
/// Any marker outside the vocabulary is kept as [`CellType::Unknown`] and is
/// trafficable at unit cost: the engine must not fail on symbols it does not
/// recognize (incident markers placed by the caller, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// `S` — origin/depot, cost 1.
    Depot,
    /// `.` — open terrain, cost 1.
    Open,
    /// `T` — terrain penalty, cost 3.
    Rough,
    /// `D` — destination marker, cost 1.
    Target,
    /// `X` — impassable. Contributes no node and no edge to the graph.
    Blocked,
    /// Anything else — treated as open terrain.
    Unknown(char),
}

impl CellType {
    pub fn from_char(c: char) -> Self {
        match c {
            'S' => CellType::Depot,
            '.' => CellType::Open,
            'T' => CellType::Rough,
            'D' => CellType::Target,
            'X' => CellType::Blocked,
            other => CellType::Unknown(other),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            CellType::Depot => 'S',
            CellType::Open => '.',
            CellType::Rough => 'T',
            CellType::Target => 'D',
            CellType::Blocked => 'X',
            CellType::Unknown(c) => c,
        }
    }

    /// Cost of stepping onto a cell of this type. Total over the vocabulary;
    /// blocked cells report an infinite weight, though graph construction
    /// models them by absence instead.
    pub fn cost(self) -> Weight {
        match self {
            CellType::Rough => 3.0,
            CellType::Blocked => Weight::INFINITY,
            _ => 1.0,
        }
    }

    pub fn is_passable(self) -> bool {
        !matches!(self, CellType::Blocked)
    }
}

/// Rectangular 2-D array of cell types.
///
/// Owned by the caller of the dispatcher; the engine only reads it per
/// dispatch request and never retains or mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellType>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Builds a grid from rows of cell markers.
    ///
    /// Fails if the rows are empty or ragged (not all the same length).
    pub fn from_rows(rows: &[Vec<char>]) -> anyhow::Result<Self> {
        ensure!(!rows.is_empty(), "Grid has no rows");
        let width = rows[0].len();
        ensure!(width > 0, "Grid rows are empty");

        let mut cells = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == width,
                "Row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            );
            cells.extend(row.iter().map(|&c| CellType::from_char(c)));
        }

        Ok(Grid {
            cells,
            width,
            height: rows.len(),
        })
    }

    /// Parses a grid from text, one row per non-empty line.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        Self::from_rows(&rows).context("Failed to parse grid")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell type at (row, col), or `None` outside the bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<CellType> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(self.cells[row as usize * self.width + col as usize])
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds the weighted adjacency structure for `grid`.
///
/// Every passable cell becomes a node. Each of its four axis-aligned
/// neighbors that is in bounds and passable contributes a directed edge
/// weighted by the cost of stepping onto the neighbor. Reads the grid only,
/// so it is safe to re-invoke on every dispatch request.
pub fn build_graph(grid: &Grid) -> Graph {
    const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    let mut graph = Graph::with_capacity(grid.width() * grid.height());

    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            let cell = grid.get(row, col).unwrap_or(CellType::Blocked);
            if !cell.is_passable() {
                continue;
            }

            let node = cell_id(row, col);
            graph.add_node(node);

            for (dr, dc) in NEIGHBORS {
                let (nr, nc) = (row + dr, col + dc);
                match grid.get(nr, nc) {
                    Some(neighbor) if neighbor.is_passable() => {
                        graph.add_edge(node, cell_id(nr, nc), neighbor.cost());
                    }
                    _ => {}
                }
            }
        }
    }

    debug!(
        "Built graph with {} nodes and {} edges from {}x{} grid",
        graph.node_count(),
        graph.edge_count(),
        grid.width(),
        grid.height()
    );

    graph
}
