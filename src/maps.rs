/// The fixed catalogue of wall layouts. One is picked on the selection
/// screen and stays active until the process exits.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapId {
    One,
    Two,
    Three,
}

const MAP_ONE: [Rect; 5] = [
    Rect::new(300, 150, 100, 400),
    Rect::new(600, 100, 50, 300),
    Rect::new(150, 500, 400, 50),
    Rect::new(800, 300, 200, 50),
    Rect::new(500, 600, 300, 30),
];

const MAP_TWO: [Rect; 5] = [
    Rect::new(300, 100, 480, 30),
    Rect::new(300, 550, 480, 30),
    Rect::new(300, 100, 30, 200),
    Rect::new(750, 380, 30, 200),
    Rect::new(450, 320, 180, 30),
];

const MAP_THREE: [Rect; 5] = [
    Rect::new(150, 150, 200, 30),
    Rect::new(750, 150, 200, 30),
    Rect::new(300, 300, 500, 30),
    Rect::new(150, 450, 200, 30),
    Rect::new(750, 450, 200, 30),
];

impl MapId {
    pub const ALL: [MapId; 3] = [MapId::One, MapId::Two, MapId::Three];

    pub fn walls(self) -> &'static [Rect] {
        match self {
            MapId::One => &MAP_ONE,
            MapId::Two => &MAP_TWO,
            MapId::Three => &MAP_THREE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MapId::One => "Map 1",
            MapId::Two => "Map 2",
            MapId::Three => "Map 3",
        }
    }

    /// The selection key shown on the menu ('1', '2', '3').
    pub fn key(self) -> char {
        match self {
            MapId::One => '1',
            MapId::Two => '2',
            MapId::Three => '3',
        }
    }

    pub fn from_key(key: char) -> Option<MapId> {
        MapId::ALL.into_iter().find(|map| map.key() == key)
    }
}
