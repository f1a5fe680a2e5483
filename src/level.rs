//! Level layouts
//!
//! A level places its enemies and obstacles into an engine relative to the
//! engine's play area and hands back the decorative guides (lane lines and
//! patrol rectangles) the renderer draws behind them.

use serde::{Deserialize, Serialize};

use crate::sim::path::EnemyPath;
use crate::sim::point::Bounds;
use crate::sim::{Engine, prefab};

/// Speed shared by the straight-line enemies
const STRAIGHT_SPEED: f64 = 50.0;

/// Background decorations for a loaded level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guides {
    /// Y of each straight-path lane
    pub lanes: Vec<f64>,
    /// Y of each zig-zag lane
    pub zigzag_lanes: Vec<f64>,
    /// Rectangles patrolled by rectangular-path enemies
    pub patrols: Vec<Bounds>,
}

pub trait Level: std::fmt::Debug {
    fn name(&self) -> &str;

    /// Queue this level's entities on `engine`. Nothing is enabled until the
    /// engine's next drain.
    fn load(&self, engine: &mut Engine) -> Guides;
}

/// Four staggered enemies sliding left and right
#[derive(Debug, Clone, Copy, Default)]
pub struct Level1;

impl Level for Level1 {
    fn name(&self) -> &str {
        "Level 1"
    }

    fn load(&self, engine: &mut Engine) -> Guides {
        let b = engine.bounds();
        let mut guides = Guides::default();
        for i in 0..4_u32 {
            let x = b.x + 50.0 + f64::from(i) * 60.0;
            let y = b.y + 70.0 + f64::from(i) * 65.0;
            engine.add_enabled(prefab::enemy(
                format!("enemy{i}"),
                x,
                y,
                EnemyPath::straight(STRAIGHT_SPEED),
            ));
            guides.lanes.push(y);
        }
        guides
    }
}

/// One straight enemy, one zig-zagging enemy and a block in the middle
#[derive(Debug, Clone, Copy, Default)]
pub struct Level2;

impl Level2 {
    /// The zig-zag enemy starts this far above its lane
    const ZIGZAG_LIFT: f64 = 26.0;
}

impl Level for Level2 {
    fn name(&self) -> &str {
        "Level 2"
    }

    fn load(&self, engine: &mut Engine) -> Guides {
        let b = engine.bounds();

        let lane = b.y + 80.0;
        engine.add_enabled(prefab::enemy(
            "enemy1",
            b.x + 40.0,
            lane,
            EnemyPath::straight(STRAIGHT_SPEED),
        ));

        let zigzag_lane = b.y + 160.0;
        engine.add_enabled(prefab::enemy(
            "enemy2",
            b.x,
            zigzag_lane - Self::ZIGZAG_LIFT,
            EnemyPath::zigzag(),
        ));

        engine.add_enabled(prefab::obstacle("obstacle", 160.0, 250.0, 40.0, 40.0));

        Guides {
            lanes: vec![lane],
            zigzag_lanes: vec![zigzag_lane],
            patrols: Vec::new(),
        }
    }
}

/// Four enemies patrolling rectangles in the corners, two blocks near the
/// bottom
#[derive(Debug, Clone, Copy, Default)]
pub struct Level3;

impl Level3 {
    const PATROL_WIDTH: f64 = 120.0;
    const PATROL_HEIGHT: f64 = 70.0;
    const SIDE_MARGIN: f64 = 15.0;
    const TOP_MARGIN: f64 = 50.0;
    const BOTTOM_MARGIN: f64 = 150.0;
    const PATROL_SPEED: f64 = 70.0;
    const BLOCK_SIZE: f64 = 40.0;
    const BLOCK_RISE: f64 = 100.0;

    fn patrols(b: &Bounds) -> [(&'static str, Bounds); 4] {
        let left = b.x + Self::SIDE_MARGIN;
        let right = b.max_x() - Self::SIDE_MARGIN - Self::PATROL_WIDTH;
        let top = b.y + Self::TOP_MARGIN;
        let bottom = b.max_y() - Self::BOTTOM_MARGIN - Self::PATROL_HEIGHT;
        let rect = |x, y| Bounds::new(x, y, Self::PATROL_WIDTH, Self::PATROL_HEIGHT);
        [
            ("enemy_lvl3_TL", rect(left, top)),
            ("enemy_lvl3_TR", rect(right, top)),
            ("enemy_lvl3_BL", rect(left, bottom)),
            ("enemy_lvl3_BR", rect(right, bottom)),
        ]
    }
}

impl Level for Level3 {
    fn name(&self) -> &str {
        "Level 3"
    }

    fn load(&self, engine: &mut Engine) -> Guides {
        let b = engine.bounds();
        let mut guides = Guides::default();

        for (name, rect) in Self::patrols(&b) {
            engine.add_enabled(prefab::enemy(
                name,
                rect.x,
                rect.y,
                EnemyPath::rectangular(rect, Self::PATROL_SPEED),
            ));
            guides.patrols.push(rect);
        }

        let size = Self::BLOCK_SIZE;
        let y = b.max_y() - Self::BLOCK_RISE;
        engine.add_enabled(prefab::obstacle(
            "obstacle_L3_left",
            b.x + b.width / 4.0 - size / 2.0,
            y,
            size,
            size,
        ));
        engine.add_enabled(prefab::obstacle(
            "obstacle_L3_right",
            b.x + b.width * 3.0 / 4.0 - size / 2.0,
            y,
            size,
            size,
        ));

        guides
    }
}

/// The three stock levels in play order
pub fn standard_levels() -> Vec<Box<dyn Level>> {
    vec![Box::new(Level1), Box::new(Level2), Box::new(Level3)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use crate::sim::point::Point;

    fn play_area() -> Engine {
        Engine::with_bounds(Bounds::new(25.0, 10.0, 365.0, 400.0))
    }

    fn loaded(level: &dyn Level) -> (Engine, Guides) {
        let mut engine = play_area();
        let guides = level.load(&mut engine);
        assert!(engine.is_empty(), "loading only queues");
        engine.apply_pending();
        (engine, guides)
    }

    fn count(engine: &Engine, kind: EntityKind) -> usize {
        engine.live_entities().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn test_level1_staggers_four_enemies() {
        let (engine, guides) = loaded(&Level1);
        assert_eq!(count(&engine, EntityKind::Enemy), 4);
        let positions: Vec<Point> = engine
            .live_entities()
            .map(|e| e.transform().position)
            .collect();
        assert_eq!(positions[0], Point::new(75.0, 80.0));
        assert_eq!(positions[3], Point::new(255.0, 275.0));
        assert_eq!(guides.lanes, vec![80.0, 145.0, 210.0, 275.0]);
    }

    #[test]
    fn test_level2_mixes_paths_and_obstacle() {
        let (engine, guides) = loaded(&Level2);
        assert_eq!(count(&engine, EntityKind::Enemy), 2);
        assert_eq!(count(&engine, EntityKind::Obstacle), 1);
        let zigzag = engine
            .live_entities()
            .find(|e| matches!(e.behavior().path(), Some(EnemyPath::ZigZag(_))))
            .map(|e| e.transform().position);
        assert_eq!(zigzag, Some(Point::new(25.0, 144.0)));
        assert_eq!(guides.zigzag_lanes, vec![170.0]);
    }

    #[test]
    fn test_level3_patrols_fit_the_play_area() {
        let (engine, guides) = loaded(&Level3);
        let area = engine.bounds();
        assert_eq!(count(&engine, EntityKind::Enemy), 4);
        assert_eq!(count(&engine, EntityKind::Obstacle), 2);
        assert_eq!(guides.patrols.len(), 4);
        for rect in &guides.patrols {
            assert!(area.contains(Point::new(rect.min_x(), rect.min_y())));
            assert!(area.contains(Point::new(rect.max_x(), rect.max_y())));
        }
        assert_eq!(guides.patrols[1].x, 25.0 + 365.0 - 15.0 - 120.0);
    }

    #[test]
    fn test_standard_levels_order() {
        let names: Vec<String> = standard_levels()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, ["Level 1", "Level 2", "Level 3"]);
    }
}
