use map_engine::{Rect, Rgba, Vec2};

const GROUND_COLOR: Rgba = [112, 168, 92, 255];
const WALL_COLOR: Rgba = [84, 84, 96, 255];
const PATH_COLOR: Rgba = [204, 192, 160, 255];
const BLOCK_COLOR: Rgba = [150, 160, 204, 255];
const WINDOW_COLOR: Rgba = [212, 232, 250, 255];
const DOOR_COLOR: Rgba = [92, 62, 40, 255];
const CANTEEN_COLOR: Rgba = [222, 190, 140, 255];
const SIGN_COLOR: Rgba = [160, 40, 40, 255];
const SIGN_TEXT_COLOR: Rgba = [255, 255, 255, 255];
const CAR_PARK_COLOR: Rgba = [120, 120, 120, 255];
const CAR_PARK_BORDER_COLOR: Rgba = [240, 220, 60, 255];
const CAR_PARK_DIVIDER_COLOR: Rgba = [240, 240, 240, 255];
const TREE_COLOR: Rgba = [34, 110, 48, 255];
const LABEL_COLOR: Rgba = [20, 20, 20, 255];

pub(crate) const WALL_THICKNESS: f32 = 4.0;
pub(crate) const CAR_PARK_BORDER_THICKNESS: f32 = 3.0;
pub(crate) const CAR_PARK_DIVIDERS: u32 = 5;
pub(crate) const TREE_RADIUS: f32 = 14.0;
pub(crate) const LABEL_SCALE: i32 = 2;
pub(crate) const LABEL_GAP: f32 = 6.0;

const TREE_CENTERS: [(f32, f32); 6] = [
    (320.0, 90.0),
    (480.0, 90.0),
    (320.0, 200.0),
    (480.0, 200.0),
    (330.0, 470.0),
    (470.0, 470.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WindowGrid {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) size: Vec2,
    pub(crate) gap: Vec2,
    pub(crate) inset: Vec2,
    pub(crate) color: Rgba,
}

impl WindowGrid {
    /// Window rectangles row by row, offset from the top-left of `body`.
    pub(crate) fn rects(&self, body: Rect) -> Vec<Rect> {
        let mut rects = Vec::with_capacity((self.columns * self.rows) as usize);
        for row in 0..self.rows {
            for column in 0..self.columns {
                rects.push(Rect::new(
                    body.x + self.inset.x + column as f32 * (self.size.x + self.gap.x),
                    body.y + self.inset.y + row as f32 * (self.size.y + self.gap.y),
                    self.size.x,
                    self.size.y,
                ));
            }
        }
        rects
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Door {
    pub(crate) size: Vec2,
    pub(crate) color: Rgba,
}

impl Door {
    /// Centered on the bottom edge of `body`.
    pub(crate) fn rect(&self, body: Rect) -> Rect {
        Rect::new(
            body.center().x - self.size.x * 0.5,
            body.bottom() - self.size.y,
            self.size.x,
            self.size.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sign {
    pub(crate) size: Vec2,
    pub(crate) top_offset: f32,
    pub(crate) text: &'static str,
    pub(crate) color: Rgba,
    pub(crate) text_color: Rgba,
}

impl Sign {
    pub(crate) fn rect(&self, body: Rect) -> Rect {
        Rect::new(
            body.center().x - self.size.x * 0.5,
            body.y + self.top_offset,
            self.size.x,
            self.size.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Building {
    pub(crate) label: &'static str,
    pub(crate) body: Rect,
    pub(crate) color: Rgba,
    pub(crate) windows: WindowGrid,
    pub(crate) door: Door,
    pub(crate) sign: Option<Sign>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CarPark {
    pub(crate) label: &'static str,
    pub(crate) body: Rect,
    pub(crate) color: Rgba,
    pub(crate) border_color: Rgba,
    pub(crate) border_thickness: f32,
    pub(crate) dividers: u32,
    pub(crate) divider_color: Rgba,
}

impl CarPark {
    /// Vertical bay dividers, evenly spaced across the interior.
    pub(crate) fn divider_segments(&self) -> Vec<(Vec2, Vec2)> {
        let spacing = self.body.width / (self.dividers + 1) as f32;
        (1..=self.dividers)
            .map(|index| {
                let x = self.body.x + spacing * index as f32;
                (Vec2::new(x, self.body.y), Vec2::new(x, self.body.bottom()))
            })
            .collect()
    }
}

/// One static shape on the campus map, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Structure {
    Ground { rect: Rect, color: Rgba },
    Wall { rect: Rect, thickness: f32, color: Rgba },
    Building(Building),
    CarPark(CarPark),
    Tree { center: Vec2, radius: f32, color: Rgba },
    Path { rect: Rect, color: Rgba },
}

impl Structure {
    /// Name and footprint for labelled structures.
    pub(crate) fn label(&self) -> Option<(&'static str, Rect)> {
        match self {
            Structure::Building(building) => Some((building.label, building.body)),
            Structure::CarPark(car_park) => Some((car_park.label, car_park.body)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CampusLayout {
    structures: Vec<Structure>,
    label_color: Rgba,
}

impl CampusLayout {
    pub(crate) fn campus(bounds: Vec2) -> Self {
        let mut structures = vec![
            Structure::Ground {
                rect: Rect::new(0.0, 0.0, bounds.x, bounds.y),
                color: GROUND_COLOR,
            },
            Structure::Wall {
                rect: Rect::new(10.0, 10.0, bounds.x - 20.0, bounds.y - 20.0),
                thickness: WALL_THICKNESS,
                color: WALL_COLOR,
            },
            Structure::Building(teaching_block("BLOCK A", Rect::new(60.0, 60.0, 220.0, 160.0))),
            Structure::Building(teaching_block("BLOCK B", Rect::new(520.0, 60.0, 220.0, 160.0))),
            Structure::Building(canteen(Rect::new(80.0, 380.0, 200.0, 140.0))),
            Structure::CarPark(CarPark {
                label: "CAR PARK",
                body: Rect::new(520.0, 380.0, 220.0, 160.0),
                color: CAR_PARK_COLOR,
                border_color: CAR_PARK_BORDER_COLOR,
                border_thickness: CAR_PARK_BORDER_THICKNESS,
                dividers: CAR_PARK_DIVIDERS,
                divider_color: CAR_PARK_DIVIDER_COLOR,
            }),
        ];
        structures.extend(TREE_CENTERS.iter().map(|&(x, y)| Structure::Tree {
            center: Vec2::new(x, y),
            radius: TREE_RADIUS,
            color: TREE_COLOR,
        }));
        structures.push(Structure::Path {
            rect: Rect::new(40.0, 280.0, 720.0, 40.0),
            color: PATH_COLOR,
        });
        structures.push(Structure::Path {
            rect: Rect::new(380.0, 40.0, 40.0, 520.0),
            color: PATH_COLOR,
        });

        Self {
            structures,
            label_color: LABEL_COLOR,
        }
    }

    pub(crate) fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub(crate) fn label_color(&self) -> Rgba {
        self.label_color
    }
}

fn teaching_block(label: &'static str, body: Rect) -> Building {
    Building {
        label,
        body,
        color: BLOCK_COLOR,
        windows: WindowGrid {
            columns: 4,
            rows: 3,
            size: Vec2::new(30.0, 18.0),
            gap: Vec2::new(20.0, 12.0),
            inset: Vec2::new(20.0, 16.0),
            color: WINDOW_COLOR,
        },
        door: Door {
            size: Vec2::new(30.0, 40.0),
            color: DOOR_COLOR,
        },
        sign: None,
    }
}

fn canteen(body: Rect) -> Building {
    Building {
        label: "CANTEEN",
        body,
        color: CANTEEN_COLOR,
        windows: WindowGrid {
            columns: 3,
            rows: 2,
            size: Vec2::new(30.0, 18.0),
            gap: Vec2::new(25.0, 12.0),
            inset: Vec2::new(30.0, 30.0),
            color: WINDOW_COLOR,
        },
        door: Door {
            size: Vec2::new(30.0, 36.0),
            color: DOOR_COLOR,
        },
        sign: Some(Sign {
            size: Vec2::new(100.0, 16.0),
            top_offset: 6.0,
            text: "CANTEEN",
            color: SIGN_COLOR,
            text_color: SIGN_TEXT_COLOR,
        }),
    }
}
