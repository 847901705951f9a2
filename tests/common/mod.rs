#![allow(dead_code)]

use gridhunt::{Cell, Grid, Orientation, PlanRequest};

/// Scenario parsed from an ASCII map
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Cell,
    pub goal: Cell,
    pub exit: Cell,
    pub hazard: Option<Cell>,
}

impl Scenario {
    pub fn request(&self, orientation: Orientation) -> PlanRequest {
        PlanRequest {
            grid: self.grid.clone(),
            start: self.start,
            orientation,
            goal: self.goal,
            exit: self.exit,
            hazard: self.hazard,
        }
    }
}

/// Parse a map where the first line is the top row (highest `y`).
///
/// `.` free, `#` blocked, `S` start, `G` goal, `W` hazard, `E` exit,
/// `X` start and exit, `P` goal on a blocked cell.
/// Without an `E` or `X` the exit is the start cell.
pub fn parse_map(map: &str) -> Scenario {
    let lines: Vec<&str> = map
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let height = lines.len() as i32;
    let width = lines[0].chars().count() as i32;

    let mut blocked = Vec::new();
    let mut start = None;
    let mut goal = None;
    let mut exit = None;
    let mut hazard = None;

    for (row, line) in lines.iter().enumerate() {
        assert_eq!(line.chars().count() as i32, width, "ragged map row {}", row);
        let y = height - 1 - row as i32;
        for (x, ch) in line.chars().enumerate() {
            let cell = Cell::new(x as i32, y);
            match ch {
                '.' => {}
                '#' => blocked.push(cell),
                'S' => start = Some(cell),
                'G' => goal = Some(cell),
                'W' => hazard = Some(cell),
                'E' => exit = Some(cell),
                'X' => {
                    start = Some(cell);
                    exit = Some(cell);
                }
                'P' => {
                    blocked.push(cell);
                    goal = Some(cell);
                }
                other => panic!("unknown map symbol '{}'", other),
            }
        }
    }

    let start = start.expect("map needs a start");
    Scenario {
        grid: Grid::new(width, height, blocked).expect("valid map"),
        start,
        goal: goal.expect("map needs a goal"),
        exit: exit.unwrap_or(start),
        hazard,
    }
}

/// Mirror a scenario left-right
pub fn flip_horizontal(scenario: &Scenario) -> Scenario {
    let w = scenario.grid.width;
    let flip = |c: Cell| Cell::new(w - 1 - c.x, c.y);
    remap(scenario, flip)
}

/// Mirror a scenario top-bottom
pub fn flip_vertical(scenario: &Scenario) -> Scenario {
    let h = scenario.grid.height;
    let flip = |c: Cell| Cell::new(c.x, h - 1 - c.y);
    remap(scenario, flip)
}

/// Mirror a scenario both ways
pub fn flip_both(scenario: &Scenario) -> Scenario {
    flip_vertical(&flip_horizontal(scenario))
}

/// The original scenario plus its three mirror images
pub fn variants(scenario: &Scenario) -> Vec<(&'static str, Scenario)> {
    vec![
        ("original", scenario.clone()),
        ("h_flip", flip_horizontal(scenario)),
        ("v_flip", flip_vertical(scenario)),
        ("hv_flip", flip_both(scenario)),
    ]
}

fn remap(scenario: &Scenario, f: impl Fn(Cell) -> Cell) -> Scenario {
    let blocked: Vec<Cell> = scenario.grid.blocked_cells().into_iter().map(&f).collect();
    Scenario {
        grid: Grid::new(scenario.grid.width, scenario.grid.height, blocked).expect("valid map"),
        start: f(scenario.start),
        goal: f(scenario.goal),
        exit: f(scenario.exit),
        hazard: scenario.hazard.map(&f),
    }
}
