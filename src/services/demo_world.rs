// src/services/demo_world.rs
//
// Small stand-in simulation for driving the viewer without an external
// simulator: a 10x10 world with two wandering agents and three blocks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::{json, Map, Value};

use crate::models::GridCell;

const AGENT_DEPTH: i32 = 5;
const OBJECT_DEPTH: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    fn offset(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoObject {
    pub id: String,
    pub location: GridCell,
    pub depth: i32,
    pub shape: Value,
    pub colour: String,
    pub size: f32,
    pub img_name: Option<String>,
    pub moves: bool,
}

pub struct DemoWorld {
    pub width: u32,
    pub height: u32,
    pub tick: u64,
    pub objects: Vec<DemoObject>,
    rng: StdRng,
}

impl DemoWorld {
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            width: 10,
            height: 10,
            tick: 0,
            objects: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };

        world.add_agent("agent_1", GridCell::new(1, 0), "#92f441");
        world.add_agent("human_agent_1", GridCell::new(4, 0), "#e9b92b");
        for (i, (x, y)) in [(4, 4), (5, 5), (6, 6)].into_iter().enumerate() {
            world.objects.push(DemoObject {
                id: format!("block_{}", i + 1),
                location: GridCell::new(x, y),
                depth: OBJECT_DEPTH,
                shape: json!(0),
                colour: "#4286f4".to_string(),
                size: 1.0,
                img_name: None,
                moves: false,
            });
        }
        world
    }

    fn add_agent(&mut self, id: &str, location: GridCell, colour: &str) {
        self.objects.push(DemoObject {
            id: id.to_string(),
            location,
            depth: AGENT_DEPTH,
            shape: json!(1),
            colour: colour.to_string(),
            size: 0.8,
            img_name: None,
            moves: true,
        });
    }

    /// Advances one tick: every moving object takes a random step that
    /// keeps it inside the grid.
    pub fn step(&mut self) {
        let (width, height) = (self.width as i32, self.height as i32);
        for obj in self.objects.iter_mut().filter(|o| o.moves) {
            let options: Vec<GridCell> = Heading::ALL
                .iter()
                .map(|h| {
                    let (dx, dy) = h.offset();
                    GridCell::new(obj.location.x + dx, obj.location.y + dy)
                })
                .filter(|c| c.x >= 0 && c.y >= 0 && c.x < width && c.y < height)
                .collect();

            if let Some(next) = options.choose(&mut self.rng) {
                obj.location = *next;
            }
        }
        self.tick += 1;
    }

    pub fn snapshot(&self) -> Value {
        let mut state: Map<String, Value> = Map::new();
        for obj in &self.objects {
            let layer = state
                .entry(obj.depth.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(layer) = layer {
                layer.insert(
                    obj.id.clone(),
                    json!({
                        "location": [obj.location.x, obj.location.y],
                        "visualization": {
                            "shape": obj.shape,
                            "colour": obj.colour,
                            "size": obj.size,
                            "opacity": 1.0,
                        },
                        "img_name": obj.img_name,
                    }),
                );
            }
        }

        json!({
            "tick": self.tick,
            "grid_size": [self.width, self.height],
            "state": state,
        })
    }

    pub fn snapshot_json(&self) -> String {
        self.snapshot().to_string()
    }
}
