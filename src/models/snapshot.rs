// src/models/snapshot.rs
//
// Per-tick world snapshots as sent by the simulation.
// The top level must be well formed; individual objects that fail
// validation are skipped and logged so the rest of the tick still draws.

use nannou::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::models::GridCell;
use crate::utilities::hex_to_rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Triangle,
    Circle,
    Image,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub shape: Shape,
    pub colour: Rgba,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    pub location: GridCell,
    pub visualization: Visualization,
    pub img_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tick: u64,
    pub grid_size: (u32, u32),
    /// depth -> object id -> state, drawn in ascending depth order
    pub layers: BTreeMap<i32, BTreeMap<String, ObjectState>>,
    /// number of objects dropped during validation
    pub skipped: usize,
}

#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    DepthKey(String),
    GridSize(u32, u32),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(e) => write!(f, "malformed snapshot: {}", e),
            SnapshotError::DepthKey(key) => write!(f, "depth key {:?} is not an integer", key),
            SnapshotError::GridSize(w, h) => write!(f, "invalid grid size [{}, {}]", w, h),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

/************************* Wire format ********************/

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    // required, tick rate and stale detection depend on it
    tick: u64,
    grid_size: (u32, u32),
    #[serde(default)]
    state: BTreeMap<String, BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(alias = "position")]
    location: GridCell,
    visualization: RawVisualization,
    #[serde(default)]
    img_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVisualization {
    shape: RawShape,
    #[serde(default = "default_colour")]
    colour: String,
    #[serde(default = "full")]
    size: f32,
    #[serde(default = "full")]
    opacity: f32,
}

// Shapes arrive either as the simulation's integer codes or as "img"
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawShape {
    Code(i64),
    Name(String),
}

fn default_colour() -> String {
    "#000000".to_string()
}

fn full() -> f32 {
    1.0
}

impl RawShape {
    fn to_shape(&self) -> Option<Shape> {
        match self {
            RawShape::Code(0) => Some(Shape::Rectangle),
            RawShape::Code(1) => Some(Shape::Triangle),
            RawShape::Code(2) => Some(Shape::Circle),
            RawShape::Name(name) => match name.as_str() {
                "img" => Some(Shape::Image),
                "rectangle" => Some(Shape::Rectangle),
                "triangle" => Some(Shape::Triangle),
                "circle" => Some(Shape::Circle),
                _ => None,
            },
            RawShape::Code(_) => None,
        }
    }
}

impl Snapshot {
    pub fn parse(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        let (width, height) = raw.grid_size;
        if width == 0 || height == 0 {
            return Err(SnapshotError::GridSize(width, height));
        }

        let mut snapshot = Snapshot {
            tick: raw.tick,
            grid_size: raw.grid_size,
            layers: BTreeMap::new(),
            skipped: 0,
        };

        for (depth_key, objects) in raw.state {
            let depth: i32 = depth_key
                .trim()
                .parse()
                .map_err(|_| SnapshotError::DepthKey(depth_key.clone()))?;

            let layer = snapshot.layers.entry(depth).or_default();
            for (id, value) in objects {
                match validate_object(value) {
                    Ok(object) => {
                        layer.insert(id, object);
                    }
                    Err(reason) => {
                        tracing::warn!(tick = raw.tick, object = %id, %reason, "skipping object");
                        snapshot.skipped += 1;
                    }
                }
            }
        }

        // Ids must be unique across layers, the topmost one is kept
        let mut ids: HashSet<String> = HashSet::new();
        let mut duplicates = 0;
        for (depth, layer) in snapshot.layers.iter_mut().rev() {
            layer.retain(|id, _| {
                if ids.insert(id.clone()) {
                    return true;
                }
                tracing::warn!(tick = raw.tick, object = %id, depth = *depth, "duplicate object id, skipping");
                duplicates += 1;
                false
            });
        }
        snapshot.skipped += duplicates;

        Ok(snapshot)
    }

    pub fn object_count(&self) -> usize {
        self.layers.values().map(|layer| layer.len()).sum()
    }

    /// All (id, state) pairs in draw order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &ObjectState)> {
        self.layers
            .values()
            .flat_map(|layer| layer.iter().map(|(id, obj)| (id.as_str(), obj)))
    }

    /// Image names referenced by image-shaped objects.
    pub fn image_names(&self) -> impl Iterator<Item = &str> {
        self.objects().filter_map(|(_, obj)| match obj.visualization.shape {
            Shape::Image => obj.img_name.as_deref(),
            _ => None,
        })
    }
}

fn validate_object(value: Value) -> Result<ObjectState, String> {
    let raw: RawObject = serde_json::from_value(value).map_err(|e| e.to_string())?;
    let vis = raw.visualization;

    let shape = vis
        .shape
        .to_shape()
        .ok_or_else(|| format!("unknown shape {:?}", vis.shape))?;

    let img_name = raw.img_name.filter(|name| !name.is_empty());
    if shape == Shape::Image && img_name.is_none() {
        return Err("image shape without img_name".to_string());
    }

    // Colour is unused for images, so a bad one only matters for primitives
    let colour = match (hex_to_rgba(&vis.colour, vis.opacity), shape) {
        (Some(colour), _) => colour,
        (None, Shape::Image) => rgba(0.0, 0.0, 0.0, vis.opacity.clamp(0.0, 1.0)),
        (None, _) => return Err(format!("invalid colour {:?}", vis.colour)),
    };

    Ok(ObjectState {
        location: raw.location,
        visualization: Visualization {
            shape,
            colour,
            size: vis.size.clamp(0.0, 1.0),
        },
        img_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "tick": 12,
        "grid_size": [10, 8],
        "state": {
            "5": {
                "agent_1": {
                    "location": [1, 0],
                    "visualization": { "shape": 2, "colour": "#92f441", "size": 0.8, "opacity": 1.0 },
                    "img_name": null
                },
                "human_1": {
                    "position": [4, 0],
                    "visualization": { "shape": "img", "colour": "#e9b92b" },
                    "img_name": "walker.gif"
                }
            },
            "0": {
                "block_1": {
                    "location": [4, 4],
                    "visualization": { "shape": 0, "colour": "#C2C2C2" }
                }
            }
        }
    }"##;

    #[test]
    fn test_parse_valid_snapshot() {
        let snapshot = Snapshot::parse(SAMPLE).unwrap();
        assert_eq!(snapshot.tick, 12);
        assert_eq!(snapshot.grid_size, (10, 8));
        assert_eq!(snapshot.object_count(), 3);
        assert_eq!(snapshot.skipped, 0);

        let agent = &snapshot.layers[&5]["agent_1"];
        assert_eq!(agent.location, GridCell::new(1, 0));
        assert_eq!(agent.visualization.shape, Shape::Circle);
        assert_eq!(agent.visualization.size, 0.8);

        let human = &snapshot.layers[&5]["human_1"];
        assert_eq!(human.location, GridCell::new(4, 0));
        assert_eq!(human.img_name.as_deref(), Some("walker.gif"));
    }

    #[test]
    fn test_objects_are_in_depth_order() {
        let snapshot = Snapshot::parse(SAMPLE).unwrap();
        let ids: Vec<&str> = snapshot.objects().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["block_1", "agent_1", "human_1"]);
        let images: Vec<&str> = snapshot.image_names().collect();
        assert_eq!(images, vec!["walker.gif"]);
    }

    #[test]
    fn test_negative_and_numeric_depths_sort_numerically() {
        let json = r##"{ "tick": 0, "grid_size": [2, 2], "state": {
            "10": { "a": { "location": [0, 0], "visualization": { "shape": 0 } } },
            "-1": { "b": { "location": [0, 0], "visualization": { "shape": 0 } } },
            "2":  { "c": { "location": [0, 0], "visualization": { "shape": 0 } } }
        } }"##;
        let snapshot = Snapshot::parse(json).unwrap();
        let ids: Vec<&str> = snapshot.objects().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_malformed_objects_are_skipped() {
        let json = r##"{ "tick": 3, "grid_size": [5, 5], "state": { "1": {
            "ok":        { "location": [1, 1], "visualization": { "shape": 1, "colour": "#ffffff" } },
            "no_loc":    { "visualization": { "shape": 0 } },
            "bad_shape": { "location": [0, 0], "visualization": { "shape": 9 } },
            "bad_clr":   { "location": [0, 0], "visualization": { "shape": 0, "colour": "blue" } },
            "no_img":    { "location": [0, 0], "visualization": { "shape": "img" }, "img_name": "" },
            "not_obj":   42
        } } }"##;
        let snapshot = Snapshot::parse(json).unwrap();
        assert_eq!(snapshot.object_count(), 1);
        assert_eq!(snapshot.skipped, 5);
        assert!(snapshot.layers[&1].contains_key("ok"));
    }

    #[test]
    fn test_image_ignores_bad_colour() {
        let json = r##"{ "tick": 0, "grid_size": [5, 5], "state": { "1": {
            "img": { "location": [0, 0], "visualization": { "shape": "img", "colour": "none" }, "img_name": "a.png" }
        } } }"##;
        let snapshot = Snapshot::parse(json).unwrap();
        assert_eq!(snapshot.object_count(), 1);
    }

    #[test]
    fn test_size_is_clamped() {
        let json = r##"{ "tick": 0, "grid_size": [5, 5], "state": { "1": {
            "big": { "location": [0, 0], "visualization": { "shape": 0, "size": 4.0 } }
        } } }"##;
        let snapshot = Snapshot::parse(json).unwrap();
        assert_eq!(snapshot.layers[&1]["big"].visualization.size, 1.0);
    }

    #[test]
    fn test_top_level_errors() {
        assert!(matches!(
            Snapshot::parse("not json"),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Snapshot::parse(r#"{ "state": {} }"#),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Snapshot::parse(r#"{ "tick": 1, "grid_size": [0, 4] }"#),
            Err(SnapshotError::GridSize(0, 4))
        ));
        assert!(matches!(
            Snapshot::parse(r#"{ "tick": 1, "grid_size": [4, 4], "state": { "top": {} } }"#),
            Err(SnapshotError::DepthKey(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_keep_topmost_layer() {
        let json = r##"{ "tick": 2, "grid_size": [5, 5], "state": {
            "0":  { "twin": { "location": [0, 0], "visualization": { "shape": 0 } },
                    "solo": { "location": [1, 1], "visualization": { "shape": 0 } } },
            "10": { "twin": { "location": [3, 3], "visualization": { "shape": 2 } } },
            "2":  { "twin": { "location": [2, 2], "visualization": { "shape": 1 } } }
        } }"##;
        let snapshot = Snapshot::parse(json).unwrap();
        assert_eq!(snapshot.object_count(), 2);
        assert_eq!(snapshot.skipped, 2);

        let ids: Vec<&str> = snapshot.objects().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["solo", "twin"]);
        assert_eq!(snapshot.layers[&10]["twin"].location, GridCell::new(3, 3));
    }

    #[test]
    fn test_missing_tick_is_rejected() {
        assert!(matches!(
            Snapshot::parse(r#"{ "grid_size": [4, 4], "state": {} }"#),
            Err(SnapshotError::Json(_))
        ));
    }
}
